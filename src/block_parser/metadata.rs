//! Metadata and theme blocks.
//!
//! A block opens with `---[type[` (type defaults to `metadata`), accumulates
//! raw lines verbatim, and closes with a line starting `]]---`. The payload
//! stays opaque here; the caller-supplied metadata parser interprets it after
//! the document is built.

use super::scan::{end_of_line, search_next};
use super::BlockParser;

const METADATA_CLOSER: [char; 5] = [']', ']', '-', '-', '-'];

impl BlockParser<'_> {
    pub(crate) fn parse_metadata(&mut self) {
        let eol = end_of_line(self.src, self.cur.i + 4);

        let Some(next_bracket) = search_next(self.src, self.cur.i + 4, eol, '[') else {
            return self.parse_paragraph();
        };

        let kind: String = self.src[self.cur.i + 4..next_bracket].iter().collect();
        let kind = match kind.trim() {
            "" => "metadata".to_string(),
            name => name.to_string(),
        };

        let content_start = eol + 1;
        let Some((content_end, block_end)) =
            super::scan::search_fixed_block_switch_closer(self.src, content_start, &METADATA_CLOSER)
        else {
            return self.parse_paragraph();
        };

        // The trailing newline is kept so concatenated blocks stay line-split.
        let chunk: String = self.src[content_start.min(content_end)..content_end].iter().collect();

        if let Some((_, existing)) = self.raw_metadata.iter_mut().find(|(k, _)| *k == kind) {
            existing.push_str(&chunk);
        } else {
            self.raw_metadata.push((kind, chunk));
        }

        self.cur.i = block_end;
    }
}
