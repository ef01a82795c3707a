//! Color naming and color pairing rules.

pub mod compatibility;
pub mod names;

pub use compatibility::{compatible_colors, COLOR_COMPATIBILITY, DEFAULT_COMPATIBLE};
pub use names::{rgb_to_color_name, to_hex, COLOR_NAMES, MIXED};
