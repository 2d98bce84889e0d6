use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::ColorOption;

pub const DEFAULT_BASE_COLOR: &str = "#9ac7f7";
const DEFAULT_BASE: Color = Color::rgb(154.0 / 255.0, 199.0 / 255.0, 247.0 / 255.0);

/// Cyclic series colors: series `i` gets `colors[i % len]`.
///
/// Index based, so reordering series reorders their colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: SmallVec<[Color; 8]>,
}

impl Palette {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> ChartResult<Self> {
        let colors: SmallVec<[Color; 8]> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> ChartResult<Self> {
        let parsed = colors
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(parsed)
    }

    /// Shades of `base`: the base itself, then alternating darker and
    /// lighter blends of growing strength.
    #[must_use]
    pub fn mix(base: Color) -> Self {
        let mut colors = SmallVec::new();
        colors.push(base);
        for step in 1..=3 {
            let amount = 0.2 * f64::from(step);
            colors.push(base.mix(Color::BLACK, amount));
            colors.push(base.mix(Color::WHITE, amount));
        }
        Self { colors }
    }

    /// Explicit palette if non-empty, else shades of the configured base
    /// color, else shades of [`DEFAULT_BASE_COLOR`].
    ///
    /// Never fails: an unparsable palette or base color is logged and
    /// replaced by shades of [`DEFAULT_BASE_COLOR`].
    #[must_use]
    pub fn resolve(explicit: Option<&[String]>, base: Option<&ColorOption>) -> Self {
        if let Some(colors) = explicit.filter(|colors| !colors.is_empty()) {
            return Self::from_hex(colors).unwrap_or_else(|err| {
                warn!(%err, "unparsable palette; using default shades");
                Self::mix(DEFAULT_BASE)
            });
        }
        let hex = base.map_or(DEFAULT_BASE_COLOR, ColorOption::hex);
        debug!(base = hex, "deriving palette from base color");
        match Color::from_hex(hex) {
            Ok(color) => Self::mix(color),
            Err(err) => {
                warn!(base = hex, %err, "unparsable base color; using default shades");
                Self::mix(DEFAULT_BASE)
            }
        }
    }


    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;
    use crate::api::ColorOption;
    use crate::render::Color;

    #[test]
    fn explicit_palette_wins_over_base_color() {
        let explicit = vec!["#ff0000".to_owned(), "#00ff00".to_owned()];
        let base = ColorOption::Hex("#0000ff".to_owned());
        let palette = Palette::resolve(Some(explicit.as_slice()), Some(&base));
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color(0), Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn object_color_option_seeds_the_mix() {
        let base = ColorOption::Object {
            color: "#336699".to_owned(),
        };
        let palette = Palette::resolve(None, Some(&base));
        assert_eq!(palette.color(0).to_hex(), "#336699");
        assert_eq!(palette.len(), 7);
    }

    #[test]
    fn empty_explicit_palette_falls_back_to_default_base() {
        let palette = Palette::resolve(Some(&[][..]), None);
        assert_eq!(palette.color(0).to_hex(), "#9ac7f7");
    }

    #[test]
    fn unparsable_colors_fall_back_to_default_shades() {
        let named = vec!["red".to_owned(), "#00ff00".to_owned()];
        assert_eq!(
            Palette::resolve(Some(named.as_slice()), None),
            Palette::resolve(None, None)
        );
        let base = ColorOption::Hex("steelblue".to_owned());
        assert_eq!(Palette::resolve(None, Some(&base)).color(0).to_hex(), "#9ac7f7");
    }
}
