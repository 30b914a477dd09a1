//! Header, cite, and anchor blocks.

use super::scan::{at, count_streak, search_closer};
use super::{BlockParser, CITE_END, HEADER_END, detect_block_end};
use crate::parts::Part;

impl BlockParser<'_> {
    pub(crate) fn parse_header(&mut self) {
        let streak = count_streak(self.src, self.cur.i, '#');
        self.cur.i += streak;
        if at(self.src, self.cur.i) == Some(' ') {
            self.cur.i += 1;
        }

        let mut header = Part::header(streak);
        let block_end = detect_block_end(self.src, self.cur.i, self.parent_indent(), &HEADER_END);
        self.parse_inline_into(&mut header, block_end, false);
        self.parts().push(header);
    }

    pub(crate) fn parse_cite(&mut self) {
        self.cur.i += 3;

        let mut cite = Part::cite();
        let block_end = detect_block_end(self.src, self.cur.i, self.parent_indent(), &CITE_END);
        self.parse_inline_into(&mut cite, block_end, false);
        self.parts().push(cite);
    }

    /// `#(target)` — a named anchor.
    pub(crate) fn parse_anchor(&mut self) {
        let Some(end) = search_closer(self.src, self.cur.i + 2, '(', ')', true, self.src.len())
        else {
            return self.parse_paragraph();
        };

        let href: String = self.src[self.cur.i + 2..end].iter().collect();
        self.parts().push(Part::Anchor { href, parts: Vec::new() });

        self.cur.i = end + 1;
    }
}
