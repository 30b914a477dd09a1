//! List and ordered-list items.
//!
//! Lists are auto-aggregating: an item opens a new list container only when
//! the previous sibling is not already one. The enclosing list stays open on
//! the frame stack so following items and sub-lists land inside it; the
//! indentation unwind closes it.

use super::scan::at;
use super::{BlockParser, LIST_ITEM_END, detect_block_end};
use crate::parts::Part;

impl BlockParser<'_> {
    pub(crate) fn parse_list_item(&mut self, indent: usize) {
        self.cur.i += 2;

        let parts = self.parts();
        if !matches!(parts.last(), Some(Part::List { .. })) {
            parts.push(Part::list(indent));
        }
        self.stack_last();

        let mut item = Part::list_item(indent);
        let block_end = detect_block_end(self.src, self.cur.i, self.parent_indent(), &LIST_ITEM_END);
        self.parse_inline_into(&mut item, block_end, false);
        self.parts().push(item);
    }

    pub(crate) fn parse_ordered_list_item(&mut self, indent: usize) {
        let mut end_of_number = self.cur.i;
        while at(self.src, end_of_number).is_some_and(|c| c.is_ascii_digit()) {
            end_of_number += 1;
        }

        let digits: String = self.src[self.cur.i..end_of_number].iter().collect();
        let order: u32 = digits.parse().unwrap_or(u32::MAX);
        self.cur.i = end_of_number + 2;

        let parts = self.parts();
        if !matches!(parts.last(), Some(Part::OrderedList { .. })) {
            parts.push(Part::ordered_list(indent));
        }
        self.stack_last();

        // The auto index tracks true document order, independent of the
        // user-supplied numbers.
        let index = match &mut self.stack.last_mut().expect("list frame").container {
            Part::OrderedList { auto_index, .. } => {
                let index = *auto_index;
                *auto_index += 1;
                index
            }
            _ => 0,
        };

        let mut item = Part::ordered_list_item(indent, order, index);
        let block_end = detect_block_end(self.src, self.cur.i, self.parent_indent(), &LIST_ITEM_END);
        self.parse_inline_into(&mut item, block_end, false);
        self.parts().push(item);
    }
}
