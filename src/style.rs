//! Style marks: the `<...>` mini-language attached to inline and table parts.

use crate::color::Color;

/// A parsed style mark.
///
/// The booleans are tri-state: `None` means the mark did not mention the
/// property, which matters when styles are merged (later set values win).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

fn is_text_color_property(property: &str) -> bool {
    matches!(property, "text" | "tx" | "foreground" | "fg")
}

fn is_background_color_property(property: &str) -> bool {
    matches!(property, "background" | "bg")
}

impl Style {
    /// Parses a style mark body, a comma-separated list of either bare flags
    /// (`bold`, `italic`, `underline`), `property:color` pairs, or bare color
    /// expressions. A bare color targets the text color when the mark
    /// decorates a text element, the background otherwise.
    pub fn parse(s: &str, for_text_element: bool) -> Style {
        let mut style = Style::default();

        for entry in s.trim().split(',') {
            let mut split = entry.split(':');
            let property = split.next().unwrap_or("");
            let value = split.next().unwrap_or("");

            let (property, value) = if !value.is_empty() {
                let target = if is_text_color_property(property) {
                    "text"
                } else if is_background_color_property(property) {
                    "background"
                } else if for_text_element {
                    "text"
                } else {
                    "background"
                };
                (target, value)
            } else {
                match property {
                    "bold" => {
                        style.bold = Some(true);
                        continue;
                    }
                    "italic" => {
                        style.italic = Some(true);
                        continue;
                    }
                    "underline" => {
                        style.underline = Some(true);
                        continue;
                    }
                    _ => (if for_text_element { "text" } else { "background" }, property),
                }
            };

            match property {
                "text" => style.text_color = Some(Color::parse(value)),
                _ => style.background_color = Some(Color::parse(value)),
            }
        }

        style
    }

    /// Merges styles left to right; later set values win, unset values keep
    /// what was already there.
    pub fn merge<'a>(styles: impl IntoIterator<Item = &'a Style>) -> Style {
        let mut merged = Style::default();

        for style in styles {
            if style.text_color.is_some() {
                merged.text_color = style.text_color.clone();
            }
            if style.background_color.is_some() {
                merged.background_color = style.background_color.clone();
            }
            if style.bold.is_some() {
                merged.bold = style.bold;
            }
            if style.italic.is_some() {
                merged.italic = style.italic;
            }
            if style.underline.is_some() {
                merged.underline = style.underline;
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_flags() {
        let style = Style::parse("bold", true);
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.italic, None);
        assert_eq!(style.underline, None);
    }

    #[test]
    fn bare_color_targets_text_for_text_elements() {
        let style = Style::parse("blue", true);
        assert_eq!(style.text_color.as_ref().map(|c| c.base_name.as_str()), Some("blue"));
        assert_eq!(style.background_color, None);
    }

    #[test]
    fn bare_color_targets_background_otherwise() {
        let style = Style::parse("blue", false);
        assert_eq!(style.background_color.as_ref().map(|c| c.base_name.as_str()), Some("blue"));
        assert_eq!(style.text_color, None);
    }

    #[test]
    fn property_aliases() {
        let style = Style::parse("fg:red,bg:brighter blue", true);
        assert_eq!(style.text_color.as_ref().map(|c| c.base_name.as_str()), Some("red"));
        let bg = style.background_color.unwrap();
        assert_eq!(bg.base_name, "blue");
        assert_eq!(bg.lightness_level, 2);
    }

    #[test]
    fn unknown_property_falls_back_to_element_target() {
        let style = Style::parse("border:red", false);
        assert_eq!(style.background_color.as_ref().map(|c| c.base_name.as_str()), Some("red"));
    }

    #[test]
    fn merge_later_values_win() {
        let a = Style::parse("bold,red", true);
        let b = Style::parse("green", true);
        let merged = Style::merge([&a, &b]);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.text_color.as_ref().map(|c| c.base_name.as_str()), Some("green"));
    }
}
