//! RGB to color-name classification.
//!
//! A coarse heuristic, not a perceptual distance model: rules are tested in
//! order and the first match wins.

/// Returned when no rule matches
pub const MIXED: &str = "mixed";

/// Every name [`rgb_to_color_name`] can return, in rule order
pub const COLOR_NAMES: &[&str] = &[
    "white", "black", "red", "green", "blue", "yellow", "magenta", "cyan", "orange", "purple",
    "gray", "brown", "pink", MIXED,
];

/// A single named channel-threshold test
struct ColorRule {
    name: &'static str,
    matches: fn(u8, u8, u8) -> bool,
}

// Order is significant: several ranges overlap (orange/brown, gray/pink).
const COLOR_RULES: &[ColorRule] = &[
    ColorRule {
        name: "white",
        matches: |r, g, b| r > 200 && g > 200 && b > 200,
    },
    ColorRule {
        name: "black",
        matches: |r, g, b| r < 50 && g < 50 && b < 50,
    },
    ColorRule {
        name: "red",
        matches: |r, g, b| r > 200 && g < 100 && b < 100,
    },
    ColorRule {
        name: "green",
        matches: |r, g, b| r < 100 && g > 200 && b < 100,
    },
    ColorRule {
        name: "blue",
        matches: |r, g, b| r < 100 && g < 100 && b > 200,
    },
    ColorRule {
        name: "yellow",
        matches: |r, g, b| r > 200 && g > 200 && b < 100,
    },
    ColorRule {
        name: "magenta",
        matches: |r, g, b| r > 200 && g < 100 && b > 200,
    },
    ColorRule {
        name: "cyan",
        matches: |r, g, b| r < 100 && g > 200 && b > 200,
    },
    ColorRule {
        name: "orange",
        matches: |r, g, b| r > 150 && g > 100 && b < 100,
    },
    ColorRule {
        name: "purple",
        matches: |r, g, b| r > 128 && g < 100 && b > 128,
    },
    ColorRule {
        name: "gray",
        matches: |r, g, b| r > 100 && g > 100 && b > 100,
    },
    ColorRule {
        name: "brown",
        matches: |r, g, b| r > 139 && g > 69 && b < 50,
    },
    ColorRule {
        name: "pink",
        matches: |r, g, b| r > 200 && g > 150 && b > 150,
    },
];

/// Name an RGB triple using the first matching rule, or [`MIXED`]
pub fn rgb_to_color_name(rgb: [u8; 3]) -> &'static str {
    let [r, g, b] = rgb;
    COLOR_RULES
        .iter()
        .find(|rule| (rule.matches)(r, g, b))
        .map(|rule| rule.name)
        .unwrap_or(MIXED)
}

/// Format an RGB triple as lower-case `#rrggbb`
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
