//! Block-level parser.
//!
//! Walks the source line by line, classifies each line's indentation and
//! leading syntax, and appends parts to the current container. Nesting
//! (quotes, lists, tables) is driven by an explicit frame stack: entering a
//! container moves it from its parent's child list onto the stack, and
//! unwinding pushes it back where it came from.

pub(crate) mod scan;

mod code_blocks;
mod headings;
mod indent;
mod lists;
mod media;
mod metadata;
mod tables;

use crate::inline_parser::{self, InlineCursor};
use crate::parts::Part;
use indent::{IndentClass, LineStart, detect_indent};
use scan::{at, end_of_empty_line, end_of_line};

/// Leading-syntax classification of a line, in fixed precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Paragraph,
    Header,
    ListItem,
    OrderedListItem,
    Cite,
    Media,
    FloatLeftMedia,
    FloatRightMedia,
    HorizontalRule,
    ClearFloat,
    Code,
    TableRow,
    TableRowSeparator,
    TableRowThickSeparator,
    TableCaption,
    Anchor,
    Metadata,
}

pub(crate) fn detect_block_type(src: &[char], i: usize) -> BlockKind {
    if at(src, i) == Some('\\') {
        return BlockKind::Paragraph;
    }

    if at(src, i) == Some('#') {
        if at(src, i + 1) == Some('(') {
            return BlockKind::Anchor;
        }
        return BlockKind::Header;
    }

    if at(src, i) == Some('!') && at(src, i + 2) == Some('[') {
        return match at(src, i + 1) {
            Some('=') => BlockKind::Media,
            Some('<') => BlockKind::FloatLeftMedia,
            Some('>') => BlockKind::FloatRightMedia,
            _ => BlockKind::Paragraph,
        };
    }

    if matches!(at(src, i), Some('*' | '-')) && at(src, i + 1) == Some(' ') {
        return BlockKind::ListItem;
    }

    if at(src, i) == Some('-') && at(src, i + 1) == Some('-') {
        if at(src, i + 2) == Some('-') {
            if at(src, i + 3) == Some('[') {
                return BlockKind::Metadata;
            }
            return BlockKind::HorizontalRule;
        }
        if at(src, i + 2) == Some(' ') && end_of_empty_line(src, i + 3).is_none() {
            return BlockKind::Cite;
        }
    }

    if at(src, i) == Some('<')
        && at(src, i + 1) == Some('-')
        && at(src, i + 2) == Some('-')
        && at(src, i + 3) == Some('-')
    {
        return BlockKind::ClearFloat;
    }

    if at(src, i) == Some('`') && at(src, i + 1) == Some('`') && at(src, i + 2) == Some('`') {
        return BlockKind::Code;
    }

    if at(src, i) == Some('|') {
        if at(src, i + 1) == Some('[') {
            return BlockKind::TableCaption;
        }
        if at(src, i + 1) == Some('-')
            || (matches!(at(src, i + 1), Some('<' | '>')) && at(src, i + 2) == Some('-'))
        {
            return BlockKind::TableRowSeparator;
        }
        if at(src, i + 1) == Some('=')
            || (matches!(at(src, i + 1), Some('<' | '>')) && at(src, i + 2) == Some('='))
        {
            return BlockKind::TableRowThickSeparator;
        }
        return BlockKind::TableRow;
    }

    if at(src, i).is_some_and(|c| c.is_ascii_digit()) {
        let mut after_number = i + 1;
        while at(src, after_number).is_some_and(|c| c.is_ascii_digit()) {
            after_number += 1;
        }
        if at(src, after_number) == Some('.') && matches!(at(src, after_number + 1), Some(' ' | '\t')) {
            return BlockKind::OrderedListItem;
        }
    }

    BlockKind::Paragraph
}

/// What may extend a block past its first line.
pub(crate) struct BlockEndParams {
    /// Empty lines do not interrupt the block.
    pub(crate) accept_empty_line: bool,
    /// A following line of this block type chains onto the block.
    pub(crate) accept_block_type: Option<BlockKind>,
    /// A continue-indented (+2) line joins the block.
    pub(crate) accept_continue_indent: bool,
    /// Any deeper-indented line joins the block.
    pub(crate) accept_indent: bool,
}

pub(crate) const PARAGRAPH_END: BlockEndParams = BlockEndParams {
    accept_empty_line: false,
    accept_block_type: Some(BlockKind::Paragraph),
    accept_continue_indent: false,
    accept_indent: false,
};

pub(crate) const HEADER_END: BlockEndParams = BlockEndParams {
    accept_empty_line: false,
    accept_block_type: None,
    accept_continue_indent: true,
    accept_indent: false,
};

pub(crate) const CITE_END: BlockEndParams = HEADER_END;

// Lists themselves are auto-aggregating; an item body needs continue indent.
pub(crate) const LIST_ITEM_END: BlockEndParams = HEADER_END;

/// Finds where the block starting at `next_scan_start` ends: the end of the
/// last line that still belongs to it, per `params`.
pub(crate) fn detect_block_end(
    src: &[char],
    mut next_scan_start: usize,
    parent_indent: usize,
    params: &BlockEndParams,
) -> usize {
    let mut block_end = next_scan_start;

    while next_scan_start < src.len() {
        let eol = end_of_line(src, next_scan_start);
        block_end = eol;
        next_scan_start = eol + 1;

        if next_scan_start > src.len() {
            break;
        }

        match detect_indent(src, next_scan_start, parent_indent) {
            LineStart::Empty { end_of_line } => {
                if !params.accept_empty_line {
                    return block_end;
                }
                next_scan_start = end_of_line + 1;
                continue;
            }
            LineStart::Block(indent) => {
                match indent.class {
                    IndentClass::Discontinue | IndentClass::Unlist | IndentClass::Unquote => {
                        return block_end;
                    }
                    IndentClass::Continue if params.accept_continue_indent => continue,
                    IndentClass::Continue | IndentClass::List | IndentClass::Quote
                        if params.accept_indent =>
                    {
                        continue;
                    }
                    _ => {}
                }

                let detected = detect_block_type(src, next_scan_start);
                if params.accept_block_type != Some(detected) {
                    return block_end;
                }
            }
        }
    }

    block_end
}

struct Frame {
    container: Part,
}

pub(crate) struct BlockParser<'a> {
    src: &'a [char],
    cur: InlineCursor,
    stack: Vec<Frame>,
    root: Vec<Part>,
    last_line_was_empty: bool,
    last_block: Option<BlockKind>,
    /// Raw metadata payloads by type, in first-seen order.
    raw_metadata: Vec<(String, String)>,
}

impl<'a> BlockParser<'a> {
    pub(crate) fn new(src: &'a [char]) -> Self {
        Self {
            src,
            cur: InlineCursor::new(),
            stack: Vec::new(),
            root: Vec::new(),
            last_line_was_empty: false,
            last_block: None,
            raw_metadata: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> (Vec<Part>, Vec<(String, String)>) {
        while self.cur.i < self.src.len() {
            self.parse_block();
        }

        while !self.stack.is_empty() {
            self.unstack();
        }

        tables::post_process_row_spans(&mut self.root);

        (self.root, self.raw_metadata)
    }

    fn parse_block(&mut self) {
        let indent = match detect_indent(self.src, self.cur.i, self.parent_indent()) {
            LineStart::Empty { end_of_line } => {
                self.cur.i = end_of_line + 1;
                self.last_line_was_empty = true;
                self.last_block = None;
                return;
            }
            LineStart::Block(indent) => indent,
        };

        if indent.class == IndentClass::Quote {
            self.parts().push(Part::quote(indent.spaces));
            self.stack_last();
        } else if indent.class.unwinds() {
            self.unstack_to_indent(indent.spaces);
        }

        self.cur.i += indent.char_count;
        let kind = detect_block_type(self.src, self.cur.i);

        log::debug!("block {:?} at {} (indent {:?})", kind, self.cur.i, indent.class);

        match kind {
            BlockKind::Paragraph => self.parse_paragraph(),
            BlockKind::Header => self.parse_header(),
            BlockKind::Cite => self.parse_cite(),
            BlockKind::ListItem => self.parse_list_item(indent.spaces),
            BlockKind::OrderedListItem => self.parse_ordered_list_item(indent.spaces),
            BlockKind::Media => self.parse_media(None),
            BlockKind::FloatLeftMedia => self.parse_media(Some(crate::parts::Float::Left)),
            BlockKind::FloatRightMedia => self.parse_media(Some(crate::parts::Float::Right)),
            BlockKind::HorizontalRule => self.parse_horizontal_rule(),
            BlockKind::ClearFloat => self.parse_clear_float(),
            BlockKind::Code => self.parse_code_block(),
            BlockKind::TableCaption => self.parse_table_caption(),
            BlockKind::TableRow => self.parse_table_row(),
            BlockKind::TableRowSeparator => self.parse_table_row_separator(false),
            BlockKind::TableRowThickSeparator => self.parse_table_row_separator(true),
            BlockKind::Anchor => self.parse_anchor(),
            BlockKind::Metadata => self.parse_metadata(),
        }

        self.last_line_was_empty = false;
        self.last_block = Some(kind);
        if at(self.src, self.cur.i) == Some('\n') {
            self.cur.i += 1;
        }
    }

    /// Child list of the innermost open container.
    fn parts(&mut self) -> &mut Vec<Part> {
        match self.stack.last_mut() {
            Some(frame) => frame
                .container
                .children_mut()
                .expect("stacked part is a container"),
            None => &mut self.root,
        }
    }

    fn parent_indent(&self) -> usize {
        self.stack.last().map_or(0, |frame| frame.container.indent())
    }

    /// Makes the most recently appended part the open container.
    fn stack_last(&mut self) {
        let container = self.parts().pop().expect("a part to enter");
        self.stack.push(Frame { container });
    }

    /// Closes the innermost container, re-attaching it to its parent.
    fn unstack(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.parts().push(frame.container);
        }
    }

    /// Unwinds open containers down to the given absolute indent. A quote is
    /// kept at equal indent; everything else at equal indent is closed.
    fn unstack_to_indent(&mut self, to_indent: usize) {
        while let Some(frame) = self.stack.last() {
            let parent_indent = frame.container.indent();
            if to_indent < parent_indent
                || (to_indent == parent_indent && !frame.container.is_quote())
            {
                log::trace!("unwinding {:?} at indent {}", frame.container.kind(), parent_indent);
                self.unstack();
            } else {
                break;
            }
        }
    }

    fn parse_paragraph(&mut self) {
        let mut paragraph = Part::paragraph();
        let block_end = detect_block_end(self.src, self.cur.i, self.parent_indent(), &PARAGRAPH_END);
        self.parse_inline_into(&mut paragraph, block_end, false);
        self.parts().push(paragraph);
    }

    /// Degrades a failed construct to a paragraph re-parsed from `start`.
    fn parse_paragraph_at(&mut self, start: usize) {
        self.cur.i = start;
        self.parse_paragraph();
    }

    /// Parses inline content into a not-yet-attached container part.
    fn parse_inline_into(&mut self, part: &mut Part, block_end: usize, trim: bool) {
        if let Some(children) = part.children_mut() {
            inline_parser::parse_inline(self.src, &mut self.cur, children, block_end, trim);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn kind_of(line: &str) -> BlockKind {
        detect_block_type(&chars(line), 0)
    }

    #[test]
    fn block_type_precedence() {
        assert_eq!(kind_of("\\# not a header"), BlockKind::Paragraph);
        assert_eq!(kind_of("# header"), BlockKind::Header);
        assert_eq!(kind_of("#(anchor)"), BlockKind::Anchor);
        assert_eq!(kind_of("!=[alt](href)"), BlockKind::Media);
        assert_eq!(kind_of("!<[alt](href)"), BlockKind::FloatLeftMedia);
        assert_eq!(kind_of("!>[alt](href)"), BlockKind::FloatRightMedia);
        assert_eq!(kind_of("* item"), BlockKind::ListItem);
        assert_eq!(kind_of("- item"), BlockKind::ListItem);
        assert_eq!(kind_of("---"), BlockKind::HorizontalRule);
        assert_eq!(kind_of("---[meta["), BlockKind::Metadata);
        assert_eq!(kind_of("-- a cite"), BlockKind::Cite);
        assert_eq!(kind_of("-- "), BlockKind::Paragraph);
        assert_eq!(kind_of("<--->"), BlockKind::ClearFloat);
        assert_eq!(kind_of("```js"), BlockKind::Code);
        assert_eq!(kind_of("|[ caption ]|"), BlockKind::TableCaption);
        assert_eq!(kind_of("|---|"), BlockKind::TableRowSeparator);
        assert_eq!(kind_of("|<---|"), BlockKind::TableRowSeparator);
        assert_eq!(kind_of("|===|"), BlockKind::TableRowThickSeparator);
        assert_eq!(kind_of("| cell |"), BlockKind::TableRow);
        assert_eq!(kind_of("12. item"), BlockKind::OrderedListItem);
        assert_eq!(kind_of("12.item"), BlockKind::Paragraph);
        assert_eq!(kind_of("plain text"), BlockKind::Paragraph);
    }

    #[test]
    fn paragraph_end_joins_consecutive_lines() {
        let src = chars("one\ntwo\n\nthree");
        assert_eq!(detect_block_end(&src, 0, 0, &PARAGRAPH_END), 7);
    }

    #[test]
    fn paragraph_ends_before_other_block_kinds() {
        let src = chars("one\n# header");
        assert_eq!(detect_block_end(&src, 0, 0, &PARAGRAPH_END), 3);
    }

    #[test]
    fn header_accepts_continue_indent() {
        let src = chars("# title\n  still title\nnot title");
        assert_eq!(detect_block_end(&src, 2, 0, &HEADER_END), 21);
    }
}
