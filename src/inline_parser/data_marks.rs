//! The data-mark reader: the generic `[extra]`, `(href)`, `<style>` suffix
//! chain attachable to styled text, links, images, media blocks, and table
//! cells. Each group respects nested same-bracket depth and backslash
//! escapes; a group whose closer is missing aborts the whole chain.

use super::InlineCursor;
use crate::block_parser::scan::{at, search_closer};
use crate::style::Style;

/// Which group kinds a given construct accepts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DataMarkAllow {
    pub(crate) text: bool,
    pub(crate) href: bool,
    pub(crate) style: bool,
}

/// Styled text / links accept everything.
pub(crate) const STYLE_DATA_MARK: DataMarkAllow =
    DataMarkAllow { text: true, href: true, style: true };

/// Images and media blocks take extra text and hrefs, no style.
pub(crate) const IMAGE_DATA_MARK: DataMarkAllow =
    DataMarkAllow { text: true, href: true, style: false };

pub(crate) const MEDIA_DATA_MARK: DataMarkAllow = IMAGE_DATA_MARK;

/// Table cells, rows, captions, and column templates take only a style.
pub(crate) const CELL_DATA_MARK: DataMarkAllow =
    DataMarkAllow { text: false, href: false, style: true };

/// Captured data-mark groups, in source order per kind.
#[derive(Debug, Default)]
pub(crate) struct DataMark {
    text: Vec<String>,
    href: Vec<String>,
    style: Vec<Style>,
}

impl DataMark {
    /// The n-th `[...]` group, empty captures counting as absent.
    pub(crate) fn text_at(&self, index: usize) -> Option<&str> {
        self.text.get(index).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// The n-th `(...)` group, empty captures counting as absent.
    pub(crate) fn href_at(&self, index: usize) -> Option<&str> {
        self.href.get(index).map(String::as_str).filter(|s| !s.is_empty())
    }

    pub(crate) fn first_style(&self) -> Option<Style> {
        self.style.first().cloned()
    }
}

/// Reads zero or more data-mark groups following the construct the cursor
/// sits on. Returns `None` when a group opener has no closer before
/// `scan_end`; the cursor is then left where the last complete group ended.
pub(crate) fn parse_data_mark(
    src: &[char],
    cur: &mut InlineCursor,
    allow: DataMarkAllow,
    scan_end: usize,
    for_text_element: bool,
) -> Option<DataMark> {
    let mut data = DataMark::default();

    loop {
        match at(src, cur.i + 1) {
            Some('[') if allow.text => {
                let end = search_closer(src, cur.i + 2, '[', ']', false, scan_end)?;
                data.text.push(src[cur.i + 2..end].iter().collect());
                cur.i = end;
                cur.chunk_start = cur.i + 1;
            }
            Some('(') if allow.href => {
                let end = search_closer(src, cur.i + 2, '(', ')', true, scan_end)?;
                data.href.push(src[cur.i + 2..end].iter().collect());
                cur.i = end;
                cur.chunk_start = cur.i + 1;
            }
            Some('<') if allow.style => {
                let end = search_closer(src, cur.i + 2, '<', '>', true, scan_end)?;
                let mark: String = src[cur.i + 2..end].iter().collect();
                data.style.push(Style::parse(&mark, for_text_element));
                cur.i = end;
                cur.chunk_start = cur.i + 1;
            }
            _ => break,
        }
    }

    Some(data)
}
