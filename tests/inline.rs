//! Inline markup: escaping, nesting, data marks.

use quillmark::{Part, parse};

fn paragraph_children(input: &str) -> Vec<Part> {
    let doc = parse(input);
    match doc.parts.into_iter().next() {
        Some(Part::Paragraph { parts }) => parts,
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

fn text(s: &str) -> Part {
    Part::Text { text: s.to_string() }
}

#[test]
fn emphasis_and_backslash() {
    let parts = paragraph_children(r"*Emphasis with \* char*");
    assert_eq!(
        parts,
        vec![Part::EmphasisText { level: 1, parts: vec![text("Emphasis with * char")] }]
    );
}

#[test]
fn decorated_text_and_backslash() {
    let parts = paragraph_children(r"_Decorated text with \* char_");
    assert_eq!(
        parts,
        vec![Part::DecoratedText {
            level: 1,
            underline: true,
            parts: vec![text("Decorated text with * char")],
        }]
    );
}

#[test]
fn styled_text_and_backslash() {
    let parts = paragraph_children(r"[Styled text with \* char]<blue>");
    match parts.as_slice() {
        [Part::StyledText { style, title, parts }] => {
            assert_eq!(*title, None);
            let color = style.as_ref().and_then(|s| s.text_color.as_ref()).expect("text color");
            assert_eq!(color.base_name, "blue");
            assert_eq!(color.saturation_level, 0);
            assert_eq!(color.lightness_level, 0);
            assert_eq!(color.opacity_level, 0);
            assert_eq!(parts, &vec![text("Styled text with * char")]);
        }
        other => panic!("expected styled text, got {other:?}"),
    }
}

#[test]
fn link_and_backslash() {
    let parts = paragraph_children(r"[Link with \* char](example.com/welcome)");
    match parts.as_slice() {
        [Part::Link { href, parts, .. }] => {
            assert_eq!(href, "example.com/welcome");
            assert_eq!(parts, &vec![text("Link with * char")]);
        }
        other => panic!("expected a link, got {other:?}"),
    }
}

#[test]
fn link_with_style_and_title() {
    let parts = paragraph_children("[go](dest)<red>[tooltip]");
    match parts.as_slice() {
        [Part::Link { href, style, title, .. }] => {
            assert_eq!(href, "dest");
            assert_eq!(title.as_deref(), Some("tooltip"));
            let color = style.as_ref().and_then(|s| s.text_color.as_ref()).expect("text color");
            assert_eq!(color.base_name, "red");
        }
        other => panic!("expected a link, got {other:?}"),
    }
}

#[test]
fn emphasis_levels_nest() {
    let parts = paragraph_children("**bold** and ***all***");
    assert_eq!(
        parts,
        vec![
            Part::EmphasisText { level: 2, parts: vec![text("bold")] },
            text(" and "),
            Part::EmphasisText { level: 3, parts: vec![text("all")] },
        ]
    );
}

#[test]
fn inline_code_keeps_markup_literal() {
    let parts = paragraph_children("run `cargo *build*` now");
    assert_eq!(
        parts,
        vec![text("run "), Part::Code { text: "cargo *build*".to_string() }, text(" now")]
    );
}

#[test]
fn pictogram_from_shortcode() {
    let parts = paragraph_children("rate ![star]");
    match parts.as_slice() {
        [Part::Text { .. }, Part::Pictogram { code, emoji, alt_text, .. }] => {
            assert_eq!(code, "star");
            assert!(emoji.is_some());
            assert!(alt_text.is_some());
        }
        other => panic!("expected a pictogram, got {other:?}"),
    }
}

#[test]
fn inline_image_with_title() {
    let parts = paragraph_children("see ![diagram](d.svg)[The diagram]");
    match parts.as_slice() {
        [Part::Text { .. }, Part::Image { href, alt_text, title }] => {
            assert_eq!(href, "d.svg");
            assert_eq!(alt_text, "diagram");
            assert_eq!(title.as_deref(), Some("The diagram"));
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn unterminated_constructs_fall_back_to_text() {
    assert_eq!(paragraph_children("half *open"), vec![text("half *open")]);
    assert_eq!(paragraph_children("half [open"), vec![text("half [open")]);
    assert_eq!(paragraph_children("half `open"), vec![text("half `open")]);
}

#[test]
fn escaped_space_at_line_end_is_a_line_break() {
    let parts = paragraph_children("first\\ \nsecond");
    assert_eq!(parts, vec![text("first\n second")]);
}

#[test]
fn whitespace_runs_collapse_across_lines() {
    let parts = paragraph_children("one\n   two");
    assert_eq!(parts, vec![text("one two")]);
}

#[test]
fn parse_never_panics_on_markup_soup() {
    for input in [
        "*[`_](<\\",
        "|][(*)<>`\\ _",
        "![![![",
        "``` [x](y",
        "####### \\",
        "---[ [ [",
        "|- - -|",
    ] {
        let _ = parse(input);
    }
}
