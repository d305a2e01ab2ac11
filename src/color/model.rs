//! WCAG 2.1 relative luminance and contrast ratio.

use super::parse::{parse_color, RgbaColor};

/// AA minimum for normal text.
pub const NORMAL_TEXT_MINIMUM: f64 = 4.5;
/// AA minimum for large text.
pub const LARGE_TEXT_MINIMUM: f64 = 3.0;

const LARGE_TEXT_PX: f64 = 24.0;
const LARGE_BOLD_TEXT_PX: f64 = 18.66;

fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]` using BT.709 coefficients.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratio in `[1, 21]`. Alpha is ignored.
pub fn contrast_ratio_rgb(a: RgbaColor, b: RgbaColor) -> f64 {
    let la = relative_luminance(a.r, a.g, a.b);
    let lb = relative_luminance(b.r, b.g, b.b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of two CSS colors, or `0.0` when either fails to parse.
///
/// A zero result means "not evaluable" and must not be compared against a
/// minimum.
pub fn contrast_ratio(fg: &str, bg: &str) -> f64 {
    match (parse_color(fg), parse_color(bg)) {
        (Some(fg), Some(bg)) => contrast_ratio_rgb(fg, bg),
        _ => 0.0,
    }
}

/// `"bold"`/`"bolder"` or a numeric weight of at least 700.
pub fn is_bold(font_weight: &str) -> bool {
    let weight = font_weight.trim();
    weight.eq_ignore_ascii_case("bold")
        || weight.eq_ignore_ascii_case("bolder")
        || weight.parse::<f64>().map(|w| w >= 700.0).unwrap_or(false)
}

/// WCAG large text: at least 24px, or at least 18.66px and bold.
pub fn is_large_text(font_size_px: f64, font_weight: &str) -> bool {
    font_size_px >= LARGE_TEXT_PX || (font_size_px >= LARGE_BOLD_TEXT_PX && is_bold(font_weight))
}

pub fn minimum_contrast_ratio(is_large: bool) -> f64 {
    if is_large {
        LARGE_TEXT_MINIMUM
    } else {
        NORMAL_TEXT_MINIMUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn luminance_bounds() {
        assert!(relative_luminance(0, 0, 0).abs() < EPS);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < EPS);
    }

    #[test]
    fn black_on_white_is_21() {
        assert!((contrast_ratio("#000000", "#ffffff") - 21.0).abs() < 1e-6);
    }

    #[test]
    fn ratio_is_symmetric_and_one_against_itself() {
        let pairs = [
            ("rgb(0, 0, 0)", "rgb(200, 200, 200)"),
            ("#336699", "white"),
            ("red", "blue"),
        ];
        for (a, b) in pairs {
            assert!((contrast_ratio(a, b) - contrast_ratio(b, a)).abs() < EPS);
            assert!((contrast_ratio(a, a) - 1.0).abs() < EPS);
            let ratio = contrast_ratio(a, b);
            assert!((1.0..=21.0).contains(&ratio), "{a} vs {b} -> {ratio}");
        }
    }

    #[test]
    fn unparseable_color_is_zero_sentinel() {
        assert_eq!(contrast_ratio("transparent", "#fff"), 0.0);
        assert_eq!(contrast_ratio("#000", "bogus"), 0.0);
    }

    #[test]
    fn alpha_does_not_affect_ratio() {
        let opaque = contrast_ratio("rgb(0, 0, 0)", "rgb(255, 255, 255)");
        let translucent = contrast_ratio("rgba(0, 0, 0, 0.2)", "rgb(255, 255, 255)");
        assert!((opaque - translucent).abs() < EPS);
    }

    #[test]
    fn large_text_thresholds() {
        assert!(is_large_text(24.0, "normal"));
        assert!(!is_large_text(18.0, "normal"));
        assert!(is_large_text(18.66, "bold"));
        assert!(!is_large_text(19.0, "400"));
        assert!(is_large_text(19.0, "700"));
        assert!(!is_large_text(18.0, "900"));
    }

    #[test]
    fn minimum_ratio_depends_on_size() {
        assert_eq!(minimum_contrast_ratio(true), 3.0);
        assert_eq!(minimum_contrast_ratio(false), 4.5);
    }

    #[test]
    fn light_grey_pairs_fail_normal_text() {
        let strong = contrast_ratio("rgb(0, 0, 0)", "rgb(200, 200, 200)");
        assert!((strong - 12.55).abs() < 0.05, "got {strong}");

        let weak = contrast_ratio("rgb(150, 150, 150)", "rgb(200, 200, 200)");
        assert!(weak < NORMAL_TEXT_MINIMUM);
        assert!(weak > 1.5 && weak < 2.0, "got {weak}");
    }
}
