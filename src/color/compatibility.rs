//! Color pairing table.

/// Used for colors missing from [`COLOR_COMPATIBILITY`]
pub const DEFAULT_COMPATIBLE: &[&str] = &["white", "black"];

/// Color name -> compatible colors, best pairing first
pub const COLOR_COMPATIBILITY: &[(&str, &[&str])] = &[
    (
        "black",
        &["white", "gray", "red", "blue", "yellow", "pink", "purple"],
    ),
    (
        "white",
        &["black", "blue", "red", "green", "yellow", "purple", "brown"],
    ),
    ("gray", &["white", "black", "blue", "yellow", "pink", "purple"]),
    ("blue", &["white", "gray", "yellow", "orange", "red", "brown"]),
    ("red", &["white", "black", "gray", "blue", "yellow"]),
    ("green", &["white", "brown", "yellow", "red", "blue"]),
    ("yellow", &["black", "blue", "white", "gray", "purple"]),
    ("brown", &["white", "blue", "green", "yellow", "orange"]),
    ("pink", &["white", "gray", "black", "blue", "green"]),
    ("purple", &["white", "yellow", "gray", "black"]),
    ("orange", &["blue", "white", "brown", "green"]),
    ("navy", &["white", "yellow", "red", "orange", "pink"]),
];

/// Compatible colors for `name`, falling back to [`DEFAULT_COMPATIBLE`]
pub fn compatible_colors(name: &str) -> &'static [&'static str] {
    COLOR_COMPATIBILITY
        .iter()
        .find(|(color, _)| *color == name)
        .map(|(_, compatible)| *compatible)
        .unwrap_or(DEFAULT_COMPATIBLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_color() {
        assert_eq!(compatible_colors("blue")[..2], ["white", "gray"]);
        assert_eq!(compatible_colors("navy")[0], "white");
    }

    #[test]
    fn test_unknown_color_falls_back() {
        assert_eq!(compatible_colors("mixed"), DEFAULT_COMPATIBLE);
        assert_eq!(compatible_colors("magenta"), DEFAULT_COMPATIBLE);
        assert_eq!(compatible_colors(""), DEFAULT_COMPATIBLE);
    }

    #[test]
    fn test_every_entry_has_a_pair() {
        for (color, compatible) in COLOR_COMPATIBILITY {
            assert!(compatible.len() >= 2, "{color} needs at least two pairings");
        }
    }
}
