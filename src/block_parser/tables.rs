//! The table layout engine.
//!
//! Rows accumulate on the most recent table until an intervening empty line.
//! The first separator line (`|-` family) retroactively promotes every
//! buffered row to a head row and parses per-column alignment, head-column,
//! and style markers into the table's column templates. A second separator
//! switches the table into multiline-row mode: body rows merge column-wise
//! into logical rows, and `- -` markers on separator lines record row-span
//! continuations resolved by a post-processing pass once the document is
//! fully parsed.

use super::scan::{at, count_streak, end_of_line, is_white_space, last_char_of_line, search_next, search_previous};
use super::{BlockKind, BlockParser};
use crate::inline_parser::{self, data_marks::{CELL_DATA_MARK, parse_data_mark}};
use crate::parts::{Align, CellRef, ColumnTemplate, Part, TableCellData};

fn cell_data(part: &Part) -> Option<&TableCellData> {
    match part {
        Part::TableCell { data, .. } | Part::TableHeadCell { data, .. } => Some(data),
        _ => None,
    }
}

fn cell_data_mut(part: &mut Part) -> Option<&mut TableCellData> {
    match part {
        Part::TableCell { data, .. } | Part::TableHeadCell { data, .. } => Some(data),
        _ => None,
    }
}

/// End-of-line geometry shared by every `|`-line parser: the scan bound for
/// bar searches and the cursor position the line leaves behind.
fn line_geometry(src: &[char], start: usize) -> (usize, usize) {
    let last_char = last_char_of_line(src, start + 1);
    let bar_bound = last_char.map_or(0, |last| last + 1);
    let line_end = last_char.map_or_else(|| end_of_line(src, start), |last| last + 1);
    (bar_bound, line_end)
}

impl BlockParser<'_> {
    /// Enters the table this `|` line belongs to: the previous sibling when
    /// it is a table and no empty line intervened, a fresh one otherwise.
    fn enter_table(&mut self) {
        let reuse =
            !self.last_line_was_empty && matches!(self.parts().last(), Some(Part::Table { .. }));
        if !reuse {
            self.parts().push(Part::table());
        }
        self.stack_last();
    }

    /// `|[ caption ]|` with an optional trailing style mark. Consecutive
    /// caption lines merge into one caption.
    pub(crate) fn parse_table_caption(&mut self) {
        let src = self.src;
        let start = self.cur.i;

        let Some(last_char) = last_char_of_line(src, start + 1) else {
            return self.parse_paragraph();
        };

        let Some(end) = super::scan::search_closer(src, start + 2, '[', ']', true, last_char)
        else {
            return self.parse_paragraph();
        };

        // The bracket pair must be space-padded and closed against the end bar.
        if at(src, start + 2) != Some(' ')
            || end == 0
            || src[end - 1] != ' '
            || at(src, end + 1) != Some('|')
        {
            return self.parse_paragraph();
        }

        self.enter_table();
        self.cur.i = start + 3;

        {
            let cur = &mut self.cur;
            let stack = &mut self.stack;
            if let Some(Part::Table { parts: table_children, .. }) =
                stack.last_mut().map(|frame| &mut frame.container)
            {
                if !matches!(table_children.last(), Some(Part::TableCaption { .. })) {
                    table_children.push(Part::table_caption());
                }
                let caption = table_children.last_mut().expect("caption just ensured");
                let children = caption.children_mut().expect("caption holds children");
                inline_parser::parse_inline(src, cur, children, end - 1, true);
            }
        }

        if at(src, end + 2) == Some('<') {
            self.cur.i = end + 1;
            let style = parse_data_mark(src, &mut self.cur, CELL_DATA_MARK, last_char + 1, false)
                .and_then(|data| data.first_style());
            if let Some(style) = style
                && let Some(Part::Table { parts: table_children, .. }) =
                    self.stack.last_mut().map(|frame| &mut frame.container)
                && let Some(Part::TableCaption { style: caption_style, .. }) =
                    table_children.last_mut()
            {
                *caption_style = Some(style);
            }
        }

        self.cur.i = last_char + 1;
    }

    /// A `|` row: cells between bars, each with an optional leading style
    /// mark and space-trimmed inline content. In multiline-row mode a row
    /// directly following another row merges into it column-wise instead.
    pub(crate) fn parse_table_row(&mut self) {
        let src = self.src;
        let start = self.cur.i;
        let (bar_bound, line_end) = line_geometry(src, start);

        self.enter_table();

        let merge = match &self.stack.last().expect("table frame").container {
            Part::Table { data, parts } => {
                data.multiline_row_mode
                    && self.last_block == Some(BlockKind::TableRow)
                    && matches!(parts.last(), Some(Part::TableRow { .. }))
            }
            _ => false,
        };

        if merge {
            return self.parse_table_multiline_row(bar_bound, line_end);
        }

        let mut row = Part::table_row();
        let first_bar = start;
        let mut current_bar = start;

        while let Some(next_bar) = search_next(src, current_bar + 1, bar_bound, '|') {
            let column_separator = at(src, next_bar + 1) == Some('|');
            let last_space = search_previous(src, next_bar.saturating_sub(1), current_bar, ' ');

            let mut style = None;
            let first_space = if at(src, current_bar + 1) == Some('<') {
                self.cur.i = current_bar;
                if let Some(data) =
                    parse_data_mark(src, &mut self.cur, CELL_DATA_MARK, next_bar, false)
                {
                    style = data.first_style();
                }
                search_next(src, self.cur.i, next_bar, ' ')
            } else {
                search_next(src, current_bar + 1, next_bar, ' ')
            };

            let mut cell = Part::table_cell(current_bar - first_bar, next_bar - first_bar);
            if let Some(data) = cell_data_mut(&mut cell) {
                data.style = style;
                data.column_separator = column_separator;
            }

            if let (Some(first_space), Some(last_space)) = (first_space, last_space) {
                self.cur.i = first_space + 1;
                let children = cell.children_mut().expect("cell holds children");
                inline_parser::parse_inline(src, &mut self.cur, children, last_space, true);
            }

            row.children_mut().expect("row holds children").push(cell);

            current_bar = if column_separator { next_bar + 1 } else { next_bar };
        }

        if let Part::Table { data, .. } = &self.stack.last().expect("table frame").container {
            compute_index_column_span(&data.columns, &mut row);
        }

        // Trailing style mark after the last bar styles the whole row.
        if at(src, current_bar + 1) == Some('<') {
            self.cur.i = current_bar;
            let style = parse_data_mark(src, &mut self.cur, CELL_DATA_MARK, bar_bound, false)
                .and_then(|data| data.first_style());
            if let (Some(style), Part::TableRow { data, .. }) = (style, &mut row) {
                data.style = Some(style);
            }
        }

        self.parts().push(row);
        self.cur.i = line_end;
    }

    /// Merges the current `|` line into the logical row under construction:
    /// each cell's content is appended, by column position, to the matching
    /// cell of the previous line, joined with a forced space.
    fn parse_table_multiline_row(&mut self, bar_bound: usize, line_end: usize) {
        let src = self.src;
        let mut current_bar = self.cur.i;
        let mut column_index = 0usize;

        while let Some(next_bar) = search_next(src, current_bar + 1, bar_bound, '|') {
            let column_separator = at(src, next_bar + 1) == Some('|');
            let first_space = search_next(src, current_bar + 1, next_bar, ' ');
            let last_space = search_previous(src, next_bar.saturating_sub(1), current_bar, ' ');

            if let (Some(first_space), Some(last_space)) = (first_space, last_space) {
                let cur = &mut self.cur;
                let stack = &mut self.stack;
                if let Some(Part::Table { parts: table_children, .. }) =
                    stack.last_mut().map(|frame| &mut frame.container)
                    && let Some(row) = table_children.last_mut()
                    && let Some(cells) = row.children_mut()
                    && let Some(cell) = cells.get_mut(column_index)
                    && let Some(children) = cell.children_mut()
                {
                    cur.i = first_space + 1;
                    cur.force_chunk_space = true;
                    inline_parser::parse_inline(src, cur, children, last_space, true);
                }
            }

            current_bar = if column_separator { next_bar + 1 } else { next_bar };
            column_index += 1;
        }

        self.cur.i = line_end;
    }

    /// A separator line. The first one on a table is the head separator;
    /// later ones are body-row separators that toggle multiline-row mode and
    /// carry row-span continuation markers.
    pub(crate) fn parse_table_row_separator(&mut self, thick: bool) {
        let src = self.src;
        let start = self.cur.i;
        let (bar_bound, line_end) = line_geometry(src, start);

        {
            let reuse = !self.last_line_was_empty
                && matches!(self.parts().last(), Some(Part::Table { .. }));
            if !reuse {
                self.parts().push(Part::table());
            }
        }

        let has_head_separator = matches!(
            self.parts().last(),
            Some(Part::Table { data, .. }) if data.has_head_separator
        );
        if !has_head_separator {
            return self.parse_table_head_row_separator(thick, bar_bound, line_end);
        }

        let parts = self.parts();
        let Some(Part::Table { data, parts: table_children }) = parts.last_mut() else {
            return;
        };

        // First body-row separator: merge every body row parsed so far into
        // one logical row and switch to multiline-row mode.
        let mut target_row: Option<usize> = None;
        if !data.has_row_separator {
            log::debug!("table enters multiline row mode");
            data.multiline_row_mode = true;

            let mut index = 0;
            while index < table_children.len() {
                if !matches!(table_children[index], Part::TableRow { .. }) {
                    index += 1;
                    continue;
                }

                match target_row {
                    None => {
                        target_row = Some(index);
                        index += 1;
                    }
                    Some(first) => {
                        let row = table_children.remove(index);
                        let Part::TableRow { parts: cells, .. } = row else { unreachable!() };
                        let first_cells =
                            table_children[first].children_mut().expect("row holds children");
                        for (column_index, mut cell) in cells.into_iter().enumerate() {
                            if cell_data(&cell).is_none() {
                                continue;
                            }
                            if let Some(existing) = first_cells.get_mut(column_index) {
                                let extra =
                                    std::mem::take(cell.children_mut().expect("cell children"));
                                merge_inline_parts(
                                    existing.children_mut().expect("cell children"),
                                    extra,
                                );
                            } else {
                                first_cells.push(cell);
                            }
                        }
                    }
                }
            }
        }
        data.has_row_separator = true;

        let target_row = target_row
            .or_else(|| table_children.iter().rposition(|p| matches!(p, Part::TableRow { .. })));
        let Some(target_row) = target_row else {
            self.cur.i = line_end;
            return;
        };

        if thick && let Part::TableRow { data: row_data, .. } = &mut table_children[target_row] {
            row_data.row_separator = true;
        }

        // Scan the separator cells for `- -` row-span markers; each one
        // continues the template column whose left bar is nearest.
        let mut continue_columns: Vec<usize> = Vec::new();
        let first_bar = start;
        let mut current_bar = start;
        let mut separator_cell_index = 0usize;

        while let Some(next_bar) = search_next(src, current_bar + 1, bar_bound, '|') {
            let column_separator = at(src, next_bar + 1) == Some('|');

            if at(src, current_bar + 1) == Some('-')
                && at(src, current_bar + 2) == Some(' ')
                && next_bar >= 2
                && src[next_bar - 1] == '-'
                && src[next_bar - 2] == ' '
            {
                let sx = current_bar - first_bar;
                let mut closest_delta = usize::MAX;
                let mut closest_column = separator_cell_index;

                for (column_index, column) in
                    data.columns.iter().enumerate().skip(separator_cell_index)
                {
                    let delta = sx.abs_diff(column.sx);
                    if delta < closest_delta {
                        closest_delta = delta;
                        closest_column = column_index;
                    }
                }

                continue_columns.push(closest_column);
            }

            current_bar = if column_separator { next_bar + 1 } else { next_bar };
            separator_cell_index += 1;
        }

        if !continue_columns.is_empty() {
            data.has_row_span = true;
            if let Part::TableRow { data: row_data, .. } = &mut table_children[target_row] {
                row_data.continue_row_span.extend(continue_columns);
            }
        }

        self.cur.i = line_end;
    }

    /// The head separator: builds the column templates (bar positions,
    /// alignment, head-column flag, per-column style), then retroactively
    /// promotes every buffered row into the table head row.
    fn parse_table_head_row_separator(&mut self, thick: bool, bar_bound: usize, line_end: usize) {
        let src = self.src;
        let hbar = if thick { '=' } else { '-' };
        let first_bar = self.cur.i;
        let mut current_bar = self.cur.i;
        let mut columns: Vec<ColumnTemplate> = Vec::new();

        while let Some(next_bar) = search_next(src, current_bar + 1, bar_bound, '|') {
            let column_separator = at(src, next_bar + 1) == Some('|');
            let first_hbar = search_next(src, current_bar + 1, next_bar, hbar);
            let last_hbar = search_previous(src, next_bar.saturating_sub(1), current_bar, hbar);

            let mut left_align = false;
            let mut right_align = false;
            let mut left_center = false;
            let mut right_center = false;
            let mut head_column = false;
            let mut style = None;

            if let Some(first_hbar) = first_hbar {
                if first_hbar - current_bar >= 2 {
                    for i in current_bar + 1..first_hbar {
                        match src[i] {
                            '<' => left_align = true,
                            '>' => left_center = true,
                            _ => {}
                        }
                    }
                }

                if let Some(last_hbar) = last_hbar {
                    if next_bar - last_hbar >= 2 {
                        for i in last_hbar + 1..next_bar {
                            match src[i] {
                                '<' => right_center = true,
                                '>' => right_align = true,
                                ':' => head_column = true,
                                _ => {}
                            }
                        }
                    }

                    // A gap in the dash run can hide a style mark.
                    let hbar_streak = count_streak(src, first_hbar, hbar);
                    if first_hbar + hbar_streak - 1 != last_hbar
                        && at(src, first_hbar + hbar_streak) == Some('<')
                    {
                        self.cur.i = first_hbar + hbar_streak - 1;
                        if let Some(data) =
                            parse_data_mark(src, &mut self.cur, CELL_DATA_MARK, last_hbar, false)
                        {
                            style = data.first_style();
                        }
                    }
                }
            }

            columns.push(ColumnTemplate {
                sx: current_bar - first_bar,
                ex: next_bar - first_bar,
                align: if left_center && right_center {
                    Align::Center
                } else if left_align && right_align {
                    Align::Justify
                } else if left_align {
                    Align::Left
                } else if right_align {
                    Align::Right
                } else {
                    Align::Default
                },
                head_column,
                column_separator,
                style,
            });

            current_bar = if column_separator { next_bar + 1 } else { next_bar };
        }

        let parts = self.parts();
        let Some(Part::Table { data, parts: table_children }) = parts.last_mut() else {
            return;
        };

        data.has_head_separator = true;
        data.columns = columns;

        // Promote the first buffered row to the head row and merge every
        // later one into it, column-wise.
        let mut head_index: Option<usize> = None;
        let mut index = 0;
        while index < table_children.len() {
            if !matches!(table_children[index], Part::TableRow { .. }) {
                index += 1;
                continue;
            }

            match head_index {
                None => {
                    let row = std::mem::replace(&mut table_children[index], Part::ClearFloat);
                    let mut head = row.to_head();

                    if let Some(cells) = head.children_mut() {
                        for cell in cells.iter_mut() {
                            let promoted =
                                std::mem::replace(cell, Part::ClearFloat).to_head();
                            *cell = promoted;
                            if let Part::TableHeadCell { is_column_head, .. } = cell {
                                *is_column_head = true;
                            }
                        }
                    }

                    if thick && let Part::TableHeadRow { data: row_data, .. } = &mut head {
                        row_data.row_separator = true;
                    }

                    table_children[index] = head;
                    head_index = Some(index);
                    index += 1;
                }
                Some(head_at) => {
                    let row = table_children.remove(index);
                    let Part::TableRow { parts: cells, .. } = row else { unreachable!() };
                    let head_cells =
                        table_children[head_at].children_mut().expect("row holds children");

                    for (column_index, mut cell) in cells.into_iter().enumerate() {
                        if cell_data(&cell).is_none() {
                            continue;
                        }
                        if let Some(existing) = head_cells.get_mut(column_index) {
                            let extra =
                                std::mem::take(cell.children_mut().expect("cell children"));
                            merge_inline_parts(
                                existing.children_mut().expect("cell children"),
                                extra,
                            );
                        } else {
                            let mut promoted = cell.to_head();
                            if let Part::TableHeadCell { is_column_head, .. } = &mut promoted {
                                *is_column_head = true;
                            }
                            head_cells.push(promoted);
                        }
                    }
                }
            }
        }

        if let Some(head_at) = head_index {
            compute_index_column_span(&data.columns, &mut table_children[head_at]);
        }

        self.cur.i = line_end;
    }
}

/// Assigns each cell of a finished row its column index and infers column
/// spans: while the row has fewer cells than the table has columns, a cell
/// whose end bar sits strictly closer to the next column's boundary than to
/// its own absorbs that column. Ties stay on the current column. A cell
/// landing on a head column is promoted to a row-head cell.
pub(crate) fn compute_index_column_span(columns: &[ColumnTemplate], row: &mut Part) {
    let Some(cells) = row.children_mut() else {
        return;
    };

    let mut extra_span = columns.len() as isize - cells.len() as isize;
    let mut column_index = 0usize;

    for cell_index in 0..cells.len() {
        let Some(ex) = cell_data(&cells[cell_index]).map(|data| data.ex) else {
            column_index += 1;
            continue;
        };

        if let Some(data) = cell_data_mut(&mut cells[cell_index]) {
            data.column = Some(column_index);
        }

        if columns.get(column_index).is_some_and(|column| column.head_column) {
            if matches!(cells[cell_index], Part::TableCell { .. }) {
                let promoted =
                    std::mem::replace(&mut cells[cell_index], Part::ClearFloat).to_head();
                cells[cell_index] = promoted;
            }
            if let Part::TableHeadCell { is_row_head, .. } = &mut cells[cell_index] {
                *is_row_head = true;
            }
        }

        let mut column_span = 1usize;
        while extra_span > 0
            && let (Some(current), Some(next)) =
                (columns.get(column_index), columns.get(column_index + 1))
            && ex.abs_diff(current.ex) > ex.abs_diff(next.ex)
        {
            column_index += 1;
            extra_span -= 1;
            column_span += 1;
        }

        if column_span >= 2
            && let Some(data) = cell_data_mut(&mut cells[cell_index])
        {
            data.column_span = column_span;
        }

        column_index += 1;
    }
}

/// Joins two inline sequences, merging adjacent text parts and inserting one
/// space when neither boundary already carries whitespace.
pub(crate) fn merge_inline_parts(parts: &mut Vec<Part>, mut extra: Vec<Part>) {
    if extra.is_empty() {
        return;
    }
    if parts.is_empty() {
        parts.append(&mut extra);
        return;
    }

    let need_space = {
        let last_char = parts.last().and_then(|p| p.text()).and_then(|t| t.chars().last());
        let first_char = extra.first().and_then(|p| p.text()).and_then(|t| t.chars().next());
        !last_char.is_some_and(is_white_space) && !first_char.is_some_and(is_white_space)
    };

    let both_text = matches!(
        (parts.last(), extra.first()),
        (Some(Part::Text { .. }), Some(Part::Text { .. }))
    );

    if both_text {
        let Part::Text { text: first_text } = extra.remove(0) else { unreachable!() };
        if let Some(Part::Text { text }) = parts.last_mut() {
            if need_space {
                text.push(' ');
            }
            text.push_str(&first_text);
        }
        parts.append(&mut extra);
        return;
    }

    if need_space {
        if let Some(Part::Text { text }) = parts.last_mut() {
            text.push(' ');
        } else if let Some(Part::Text { text }) = extra.first_mut() {
            text.insert(0, ' ');
        } else {
            parts.push(Part::Text { text: " ".to_string() });
        }
    }
    parts.append(&mut extra);
}

/// Resolves row-span continuations on every table that recorded them, then
/// prunes the merged-away subordinate cells.
pub(crate) fn post_process_row_spans(parts: &mut Vec<Part>) {
    for part in parts.iter_mut() {
        if let Part::Table { data, parts: children } = part {
            if data.has_row_span {
                apply_row_spans(children);
            }
            post_process_row_spans(children);
        } else if let Some(children) = part.children_mut() {
            post_process_row_spans(children);
        }
    }
}

fn find_cell_by_column(row: &Part, column: usize) -> Option<usize> {
    row.children()
        .iter()
        .position(|cell| cell_data(cell).is_some_and(|data| data.column == Some(column)))
}

fn apply_row_spans(rows: &mut Vec<Part>) {
    let mut last_row: Option<usize> = None;
    let mut last_continue: Vec<usize> = Vec::new();

    for row_index in 0..rows.len() {
        if !matches!(rows[row_index], Part::TableRow { .. }) {
            continue;
        }

        if let Some(master_row) = last_row {
            for &column in &last_continue {
                let Some(sub_index) = find_cell_by_column(&rows[row_index], column) else {
                    continue;
                };
                let Some(master_index) = find_cell_by_column(&rows[master_row], column) else {
                    continue;
                };

                // Continuation links always point at the ultimate master, so
                // one hop resolves chains across several rows.
                let master_ref = rows[master_row].children()[master_index]
                    .cell_master()
                    .unwrap_or(CellRef { row: master_row, cell: master_index });

                let sub_children = {
                    let cells = rows[row_index].children_mut().expect("row holds children");
                    std::mem::take(cells[sub_index].children_mut().expect("cell children"))
                };

                {
                    let cells = rows[master_ref.row].children_mut().expect("row holds children");
                    let master = &mut cells[master_ref.cell];
                    merge_inline_parts(master.children_mut().expect("cell children"), sub_children);
                    if let Some(data) = cell_data_mut(master) {
                        data.row_span += 1;
                    }
                }

                let cells = rows[row_index].children_mut().expect("row holds children");
                if let Some(data) = cell_data_mut(&mut cells[sub_index]) {
                    data.master_cell = Some(master_ref);
                }
            }
        }

        last_row = Some(row_index);
        last_continue = match &rows[row_index] {
            Part::TableRow { data, .. } => data.continue_row_span.clone(),
            _ => Vec::new(),
        };
    }

    for row in rows.iter_mut() {
        if let Part::TableRow { parts: cells, .. } = row {
            cells.retain(|cell| cell_data(cell).is_none_or(|data| data.master_cell.is_none()));
        }
    }
}

impl Part {
    fn cell_master(&self) -> Option<CellRef> {
        cell_data(self).and_then(|data| data.master_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::TableRowData;

    fn text(s: &str) -> Part {
        Part::Text { text: s.to_string() }
    }

    fn cell_at(sx: usize, ex: usize, column: usize, parts: Vec<Part>) -> Part {
        let mut cell = Part::table_cell(sx, ex);
        if let Some(data) = cell_data_mut(&mut cell) {
            data.column = Some(column);
        }
        if let Some(children) = cell.children_mut() {
            *children = parts;
        }
        cell
    }

    fn column(sx: usize, ex: usize) -> ColumnTemplate {
        ColumnTemplate { sx, ex, ..ColumnTemplate::default() }
    }

    #[test]
    fn merge_inserts_inferred_space() {
        let mut parts = vec![text("one")];
        merge_inline_parts(&mut parts, vec![text("two")]);
        assert_eq!(parts, vec![text("one two")]);
    }

    #[test]
    fn merge_skips_space_when_whitespace_adjoins() {
        let mut parts = vec![text("one ")];
        merge_inline_parts(&mut parts, vec![text("two")]);
        assert_eq!(parts, vec![text("one two")]);
    }

    #[test]
    fn merge_bridges_non_text_parts() {
        let mut parts = vec![Part::EmphasisText { level: 1, parts: vec![text("a")] }];
        merge_inline_parts(&mut parts, vec![text("b")]);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], text(" b"));
    }

    #[test]
    fn column_span_absorbs_nearer_columns() {
        // Columns end at 10, 20, 30; a two-cell row whose first cell ends at
        // 19 must span the first two columns.
        let columns = vec![column(0, 10), column(10, 20), column(20, 30)];
        let mut row = Part::TableRow {
            data: TableRowData::default(),
            parts: vec![cell_at(0, 19, 0, vec![]), cell_at(19, 30, 0, vec![])],
        };
        compute_index_column_span(&columns, &mut row);

        let cells = row.children();
        let first = cell_data(&cells[0]).unwrap();
        assert_eq!(first.column, Some(0));
        assert_eq!(first.column_span, 2);
        let second = cell_data(&cells[1]).unwrap();
        assert_eq!(second.column, Some(2));
        assert_eq!(second.column_span, 1);
    }

    #[test]
    fn column_span_tie_stays_put() {
        // ex 15 is equidistant from 10 and 20: the cell keeps its column.
        let columns = vec![column(0, 10), column(10, 20)];
        let mut row = Part::TableRow {
            data: TableRowData::default(),
            parts: vec![cell_at(0, 15, 0, vec![])],
        };
        compute_index_column_span(&columns, &mut row);
        assert_eq!(cell_data(&row.children()[0]).unwrap().column_span, 1);
    }

    #[test]
    fn row_span_merge_and_prune() {
        let mut first = TableRowData::default();
        first.continue_row_span = vec![0];
        let mut rows = vec![
            Part::TableRow { data: first, parts: vec![cell_at(0, 10, 0, vec![text("top")])] },
            Part::TableRow {
                data: TableRowData::default(),
                parts: vec![cell_at(0, 10, 0, vec![text("bottom")])],
            },
        ];

        apply_row_spans(&mut rows);

        let master = &rows[0].children()[0];
        assert_eq!(master.children(), &[text("top bottom")]);
        assert_eq!(cell_data(master).unwrap().row_span, 2);
        assert!(rows[1].children().is_empty());
    }
}
