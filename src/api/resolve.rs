use tracing::warn;

use crate::render::Color;

/// Picks the most specific configured value.
///
/// `specific` (per element) wins over `group` (shared styling), which wins
/// over `default`. Absent values are never an error.
#[must_use]
pub fn resolve<T>(specific: Option<T>, group: Option<T>, default: T) -> T {
    specific.or(group).unwrap_or(default)
}

/// Parses a configured hex color, falling back to `fallback` when it is not
/// a hex color. `field` names the option in the warning.
pub(super) fn color_or(hex: &str, fallback: Color, field: &'static str) -> Color {
    match Color::from_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!(field, value = hex, %err, "unparsable color; using fallback");
            fallback
        }
    }
}

/// Clamps an opacity into `[0, 1]`; non-finite values take `fallback`.
pub(super) fn opacity_or(opacity: f64, fallback: f64) -> f64 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::{color_or, opacity_or, resolve};
    use crate::render::Color;

    #[test]
    fn precedence_is_specific_then_group_then_default() {
        assert_eq!(resolve(Some(0.2), Some(0.8), 0.5), 0.2);
        assert_eq!(resolve(None, Some(0.8), 0.5), 0.8);
        assert_eq!(resolve(None, None, 0.5), 0.5);
        assert_eq!(resolve(Some(0.2), None, 0.5), 0.2);
    }

    #[test]
    fn named_colors_fall_back() {
        assert_eq!(color_or("red", Color::BLACK, "fill"), Color::BLACK);
        assert_eq!(color_or("#ffffff", Color::BLACK, "fill"), Color::WHITE);
    }

    #[test]
    fn opacity_is_clamped_into_unit_range() {
        assert_eq!(opacity_or(1.5, 0.5), 1.0);
        assert_eq!(opacity_or(-0.1, 0.5), 0.0);
        assert_eq!(opacity_or(f64::NAN, 0.5), 0.5);
        assert_eq!(opacity_or(0.3, 0.5), 0.3);
    }
}
