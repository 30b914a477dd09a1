//! Color expressions of the style mini-language.
//!
//! A color expression is a whitespace-separated word list: modifier keywords
//! accumulate signed deltas on the saturation/lightness/opacity levels, and
//! the remaining word names the base color (`"brighter blue"`,
//! `"deep royal red"`). Resolving a `Color` to an actual hex/RGB value is the
//! palette's job, not ours.

/// A parsed color: base name plus accumulated modifier levels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub base_name: String,
    pub saturation_level: i32,
    pub lightness_level: i32,
    pub opacity_level: i32,
}

/// Deltas on (saturation, lightness, opacity) for one modifier keyword.
fn modifier(word: &str) -> Option<(i32, i32, i32)> {
    let (saturation, lightness, opacity) = match word {
        "bright" => (0, 1, 0),
        "brighter" => (0, 2, 0),
        "brightest" => (0, 3, 0),

        "dark" => (0, -1, 0),
        "darker" => (0, -2, 0),
        "darkest" => (0, -3, 0),

        "pale" | "dull" => (-1, 0, 0),
        "paler" | "duller" => (-2, 0, 0),
        "palest" | "dullest" => (-3, 0, 0),

        "pure" | "bold" | "vivid" => (1, 0, 0),
        "purer" | "bolder" | "vivider" => (2, 0, 0),
        "purest" | "boldest" | "vividest" => (3, 0, 0),

        "light" | "pastel" => (-1, 1, 0),
        "lighter" => (-2, 2, 0),
        "lightest" => (-3, 3, 0),

        "deep" | "royal" => (1, -1, 0),
        "deeper" => (2, -2, 0),
        "deepest" => (3, -3, 0),

        "dim" | "faint" => (0, 0, -1),
        "dimmer" | "fainter" => (0, 0, -2),
        "dimmest" | "faintest" => (0, 0, -3),

        _ => return None,
    };
    Some((saturation, lightness, opacity))
}

impl Color {
    /// Parses a color expression. Deltas accumulate across modifier words;
    /// the first non-modifier word becomes the base name and any later
    /// non-modifier word overwrites it.
    pub fn parse(s: &str) -> Color {
        let mut color = Color::default();

        for word in s.split_whitespace() {
            if let Some((saturation, lightness, opacity)) = modifier(word) {
                color.saturation_level += saturation;
                color.lightness_level += lightness;
                color.opacity_level += opacity;
            } else {
                color.base_name = word.to_string();
            }
        }

        color
    }

    pub fn has_modifier(&self) -> bool {
        self.saturation_level != 0 || self.lightness_level != 0 || self.opacity_level != 0
    }
}
