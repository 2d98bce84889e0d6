use line_chart_rs::api::Palette;
use line_chart_rs::render::Color;
use proptest::prelude::*;

proptest! {
    #[test]
    fn palette_color_is_cyclic(
        channels in prop::collection::vec((0u8..=255, 0u8..=255, 0u8..=255), 1..12),
        index in 0usize..1_000
    ) {
        let hex: Vec<String> = channels
            .iter()
            .map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
            .collect();
        let palette = Palette::from_hex(&hex).expect("palette");

        prop_assert_eq!(palette.len(), hex.len());
        prop_assert_eq!(palette.color(index), palette.color(index + palette.len()));
        prop_assert_eq!(
            palette.color(index),
            Color::from_hex(&hex[index % hex.len()]).expect("color")
        );
    }

    #[test]
    fn mixed_palette_keeps_base_first(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let base = Color::from_hex(&format!("#{r:02x}{g:02x}{b:02x}")).expect("color");
        let palette = Palette::mix(base);

        prop_assert_eq!(palette.len(), 7);
        prop_assert_eq!(palette.color(0), base);
    }
}
