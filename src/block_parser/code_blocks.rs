//! Fenced code blocks.

use super::scan::{count_streak, end_of_line, search_block_switch_closer};
use super::BlockParser;
use crate::parts::Part;

impl BlockParser<'_> {
    /// ` ``` ` fences with an optional language tag on the opening line. An
    /// unterminated fence falls back to an ordinary paragraph.
    pub(crate) fn parse_code_block(&mut self) {
        let streak = count_streak(self.src, self.cur.i, '`');
        let eol = end_of_line(self.src, self.cur.i + streak);

        let lang: String = self.src[self.cur.i + streak..eol].iter().collect();
        let lang = match lang.trim() {
            "" => None,
            tag => Some(tag.to_string()),
        };

        let content_start = eol + 1;
        let Some((content_end, block_end)) =
            search_block_switch_closer(self.src, content_start, '`', 3)
        else {
            return self.parse_paragraph();
        };

        // The newline before the closing fence is stripped from the content.
        let text_end = content_end.saturating_sub(1).max(content_start);
        let text: String = self.src[content_start..text_end].iter().collect();

        self.parts().push(Part::CodeBlock { text, lang });
        self.cur.i = block_end;
    }
}
