//! Inline markup scanner.
//!
//! Operates on a bounded span of the source, producing inline parts (text,
//! emphasis, decoration, code, links, styled text, images, pictograms) into a
//! caller-provided child list. Whitespace runs collapse to a single space;
//! any construct whose closer cannot be found leaves the cursor untouched so
//! the triggering character falls back to literal text.

pub mod data_marks;

use crate::block_parser::scan::{
    at, count_streak, end_of_empty_line, is_white_space, search_closer, search_next_visible,
    search_previous_visible, search_switch_closer,
};
use crate::parts::Part;
use data_marks::{IMAGE_DATA_MARK, STYLE_DATA_MARK, parse_data_mark};

/// Scanning state threaded through inline parsing: the cursor, the start of
/// the pending literal-text chunk, and the forced-space joint used when a
/// multiline table cell is merged.
#[derive(Debug)]
pub(crate) struct InlineCursor {
    pub(crate) i: usize,
    pub(crate) chunk_start: usize,
    pub(crate) force_chunk_space: bool,
}

impl InlineCursor {
    pub(crate) fn new() -> Self {
        Self { i: 0, chunk_start: 0, force_chunk_space: false }
    }
}

/// Parses the inline content of a block span ending at `block_end`. With
/// `trim`, leading and trailing whitespace of the span is excluded first.
pub(crate) fn parse_inline(
    src: &[char],
    cur: &mut InlineCursor,
    out: &mut Vec<Part>,
    block_end: usize,
    trim: bool,
) {
    let mut scan_end = block_end;

    if trim {
        let Some(first) = search_next_visible(src, cur.i, block_end) else {
            cur.i = block_end;
            if at(src, cur.i) == Some('\n') {
                cur.i += 1;
            }
            return;
        };

        // The backward scan cannot fail since the forward search succeeded.
        let last = search_previous_visible(src, block_end - 1, first.saturating_sub(1))
            .unwrap_or(first);
        cur.i = first;
        scan_end = last + 1;
    }

    parse_nested_inline(src, cur, out, scan_end);
}

/// The recursive scan loop shared by block content and nested inline spans.
pub(crate) fn parse_nested_inline(
    src: &[char],
    cur: &mut InlineCursor,
    out: &mut Vec<Part>,
    scan_end: usize,
) {
    let mut last_was_space = cur.i > 0 && is_white_space(src[cur.i - 1]);
    cur.chunk_start = cur.i;

    while cur.i < scan_end {
        let c = src[cur.i];
        let is_space = is_white_space(c);

        if is_space {
            add_inline_text_chunk(src, cur, out, None);
            parse_white_space(src, cur, out);
        } else if c == '\\' {
            add_inline_text_chunk(src, cur, out, None);
            parse_escape(src, cur, out);
        } else if c == '*' && !at(src, cur.i + 1).is_some_and(is_white_space) {
            add_inline_text_chunk(src, cur, out, None);
            parse_emphasis_text(src, cur, out, scan_end);
        } else if c == '_' && !at(src, cur.i + 1).is_some_and(is_white_space) {
            add_inline_text_chunk(src, cur, out, None);
            parse_decorated_text(src, cur, out, scan_end);
        } else if c == '`' {
            add_inline_text_chunk(src, cur, out, None);
            parse_code(src, cur, out, scan_end);
        } else if c == '[' {
            add_inline_text_chunk(src, cur, out, None);
            parse_styled_text(src, cur, out, scan_end);
        } else if c == '!' && at(src, cur.i + 1) == Some('[') && last_was_space {
            add_inline_text_chunk(src, cur, out, None);
            parse_image(src, cur, out, scan_end);
        }

        last_was_space = is_space;
        cur.i += 1;
    }

    add_inline_text_chunk(src, cur, out, None);

    cur.i = scan_end;
    if at(src, cur.i) == Some('\n') {
        cur.i += 1;
    }
}

/// Flushes the pending literal chunk (or a forced replacement) into the
/// output, merging with a trailing text part when there is one.
fn add_inline_text_chunk(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, forced: Option<&str>) {
    let mut chunk = match forced {
        Some(s) => s.to_string(),
        None if cur.chunk_start < cur.i => src[cur.chunk_start..cur.i].iter().collect(),
        None => String::new(),
    };

    if cur.force_chunk_space {
        chunk.insert(0, ' ');
        cur.force_chunk_space = false;
    }

    if !chunk.is_empty() {
        if let Some(Part::Text { text }) = out.last_mut() {
            text.push_str(&chunk);
        } else {
            out.push(Part::Text { text: chunk });
        }
    }

    if forced.is_none() {
        cur.chunk_start = cur.i;
    }
}

/// Collapses a whitespace run (embedded newlines included) to one space.
fn parse_white_space(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>) {
    let mut end = cur.i + 1;
    while at(src, end).is_some_and(is_white_space) {
        end += 1;
    }

    cur.i = end - 1;
    cur.chunk_start = cur.i + 1;

    add_inline_text_chunk(src, cur, out, Some(" "));
}

/// Consumes exactly one escaped character. An escaped space at line start or
/// followed only by trailing whitespace becomes an explicit line break, as
/// does an escaped newline.
fn parse_escape(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>) {
    if cur.i + 1 >= src.len() {
        cur.chunk_start = cur.i + 1;
        return;
    }

    match src[cur.i + 1] {
        ' ' => {
            if cur.i > 0 && src[cur.i - 1] == '\n' {
                add_inline_text_chunk(src, cur, out, Some("\n"));
            } else if end_of_empty_line(src, cur.i + 2).is_some() {
                add_inline_text_chunk(src, cur, out, Some("\n"));
            } else {
                add_inline_text_chunk(src, cur, out, Some(" "));
            }
        }
        '\n' => add_inline_text_chunk(src, cur, out, Some("\n")),
        escaped => add_inline_text_chunk(src, cur, out, Some(&escaped.to_string())),
    }

    cur.i += 1;
    cur.chunk_start = cur.i + 1;
}

fn parse_emphasis_text(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, scan_end: usize) {
    let streak = count_streak(src, cur.i, '*');
    if streak > 3 {
        return;
    }
    let Some(end) = search_switch_closer(src, cur.i + streak, '*', streak, true, false, scan_end)
    else {
        return;
    };

    cur.i += streak;
    let mut parts = Vec::new();
    parse_nested_inline(src, cur, &mut parts, end + 1 - streak);
    out.push(Part::EmphasisText { level: streak, parts });

    cur.i = end;
    cur.chunk_start = cur.i + 1;
}

fn parse_decorated_text(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, scan_end: usize) {
    let streak = count_streak(src, cur.i, '_');
    if streak > 2 {
        return;
    }
    let Some(end) = search_switch_closer(src, cur.i + streak, '_', streak, true, false, scan_end)
    else {
        return;
    };

    cur.i += streak;
    let mut parts = Vec::new();
    parse_nested_inline(src, cur, &mut parts, end + 1 - streak);
    out.push(Part::DecoratedText { level: streak, underline: true, parts });

    cur.i = end;
    cur.chunk_start = cur.i + 1;
}

fn parse_code(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, scan_end: usize) {
    let streak = count_streak(src, cur.i, '`');
    // A double fence allows a literal backtick inside the code span.
    if streak > 2 {
        return;
    }
    let Some(end) = search_switch_closer(src, cur.i + streak, '`', streak, false, false, scan_end)
    else {
        return;
    };

    let mut slice_start = cur.i + streak;
    let mut slice_end = end + 1 - streak;

    // One space of padding is dropped when it separates the fence from an
    // inner backtick.
    if at(src, slice_start) == Some(' ') && at(src, slice_start + 1) == Some('`') {
        slice_start += 1;
    }
    if slice_end >= 2 && src[slice_end - 1] == ' ' && src[slice_end - 2] == '`' {
        slice_end -= 1;
    }

    let text: String = src[slice_start..slice_end.max(slice_start)].iter().collect();
    out.push(Part::Code { text });

    cur.i = end;
    cur.chunk_start = cur.i + 1;
}

/// Styled text / link markup: `[content]` followed by a data-mark chain. The
/// node is emitted only when an href, a style, or a title was captured; a
/// chain satisfying none of these consumes nothing extra and the bracket
/// falls back to literal text (or, when groups were consumed, is dropped).
fn parse_styled_text(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, scan_end: usize) {
    let Some(end) = search_closer(src, cur.i + 1, '[', ']', false, scan_end) else {
        return;
    };

    let start = cur.i + 1;
    cur.i = end;
    let Some(data) = parse_data_mark(src, cur, STYLE_DATA_MARK, scan_end, true) else {
        return;
    };
    let full_markup_end = cur.i;

    let href = data.href_at(0).map(str::to_string);
    let style = data.first_style();
    let title = data.text_at(0).map(str::to_string);

    if href.is_none() && style.is_none() && title.is_none() {
        return;
    }

    cur.i = start;
    let mut parts = Vec::new();
    parse_nested_inline(src, cur, &mut parts, end);

    out.push(match href {
        Some(href) => Part::Link { href, style, title, parts },
        None => Part::StyledText { style, title, parts },
    });

    cur.i = full_markup_end;
    cur.chunk_start = cur.i + 1;
}

/// Image / pictogram markup: `![alt]` plus a data-mark chain; an href makes
/// an image, no href makes a pictogram whose code is the bracket content.
fn parse_image(src: &[char], cur: &mut InlineCursor, out: &mut Vec<Part>, scan_end: usize) {
    let Some(end) = search_closer(src, cur.i + 2, '[', ']', false, scan_end) else {
        return;
    };

    let text: String = src[cur.i + 2..end].iter().collect();
    cur.i = end;
    cur.chunk_start = end + 1;
    let Some(data) = parse_data_mark(src, cur, IMAGE_DATA_MARK, scan_end, true) else {
        return;
    };

    if let Some(href) = data.href_at(0) {
        out.push(Part::Image {
            href: href.to_string(),
            alt_text: text,
            title: data.text_at(0).map(str::to_string),
        });
    } else {
        out.push(Part::pictogram(
            text,
            data.text_at(0).map(str::to_string),
            data.text_at(1).map(str::to_string),
        ));
    }
}
