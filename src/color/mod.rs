//! Color parsing and WCAG contrast math.

pub mod model;
pub mod parse;

pub use model::{
    contrast_ratio, contrast_ratio_rgb, is_bold, is_large_text, minimum_contrast_ratio,
    relative_luminance, LARGE_TEXT_MINIMUM, NORMAL_TEXT_MINIMUM,
};
pub use parse::{parse_color, RgbaColor};
