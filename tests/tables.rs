//! The table layout engine: head promotion, column templates, column-span
//! and row-span inference, multiline rows, captions.

use quillmark::{Align, Part, TableCellData, parse};

fn text(s: &str) -> Part {
    Part::Text { text: s.to_string() }
}

fn only_table(doc: &quillmark::Document) -> (&quillmark::TableData, &[Part]) {
    match doc.parts.as_slice() {
        [Part::Table { data, parts }] => (data, parts),
        other => panic!("expected one table, got {other:?}"),
    }
}

fn cell_data(part: &Part) -> &TableCellData {
    match part {
        Part::TableCell { data, .. } | Part::TableHeadCell { data, .. } => data,
        other => panic!("expected a cell, got {other:?}"),
    }
}

fn cell_text(part: &Part) -> String {
    let mut out = String::new();
    for child in part.children() {
        if let Part::Text { text } = child {
            out.push_str(text);
        }
    }
    out
}

#[test]
fn single_row_table() {
    let doc = parse("| a | b |");
    let (data, rows) = only_table(&doc);
    assert!(data.columns.is_empty());
    match rows {
        [Part::TableRow { parts: cells, .. }] => {
            assert_eq!(cells.len(), 2);
            assert_eq!(cell_text(&cells[0]), "a");
            assert_eq!(cell_text(&cells[1]), "b");
            assert_eq!(cell_data(&cells[0]).column, Some(0));
            assert_eq!(cell_data(&cells[1]).column, Some(1));
            assert_eq!(cell_data(&cells[0]).sx, 0);
            assert_eq!(cell_data(&cells[0]).ex, 4);
        }
        other => panic!("expected one row, got {other:?}"),
    }
}

#[test]
fn empty_line_starts_a_new_table() {
    let doc = parse("| a |\n\n| b |");
    assert_eq!(doc.parts.len(), 2);
    assert!(doc.parts.iter().all(|p| matches!(p, Part::Table { .. })));
}

#[test]
fn head_separator_promotes_the_first_row() {
    let doc = parse("| H1 | H2 |\n|----|----|\n| a  | b  |");
    let (data, rows) = only_table(&doc);

    assert!(data.has_head_separator);
    assert_eq!(data.columns.len(), 2);
    assert_eq!(data.columns[0].sx, 0);
    assert_eq!(data.columns[0].ex, 5);
    assert_eq!(data.columns[1].ex, 10);

    match rows {
        [Part::TableHeadRow { parts: head_cells, .. }, Part::TableRow { parts: body_cells, .. }] => {
            assert!(head_cells.iter().all(|c| matches!(
                c,
                Part::TableHeadCell { is_column_head: true, .. }
            )));
            assert_eq!(cell_text(&head_cells[0]), "H1");
            assert_eq!(cell_text(&body_cells[1]), "b");
        }
        other => panic!("expected head row then body row, got {other:?}"),
    }
}

#[test]
fn head_separator_converts_every_buffered_row() {
    // Both pre-separator rows merge into one head row, column-wise.
    let doc = parse("| A | B |\n| C | D |\n|---|---|");
    let (_, rows) = only_table(&doc);

    match rows {
        [Part::TableHeadRow { parts: cells, .. }] => {
            assert_eq!(cells.len(), 2);
            assert_eq!(cell_text(&cells[0]), "A C");
            assert_eq!(cell_text(&cells[1]), "B D");
        }
        other => panic!("expected a single merged head row, got {other:?}"),
    }
}

#[test]
fn alignment_markers() {
    let doc = parse("| L | R | C |\n|<--|-->|>-<|");
    let (data, _) = only_table(&doc);
    assert_eq!(data.columns[0].align, Align::Left);
    assert_eq!(data.columns[1].align, Align::Right);
    assert_eq!(data.columns[2].align, Align::Center);
}

#[test]
fn justify_alignment() {
    let doc = parse("| J |\n|<->|");
    let (data, _) = only_table(&doc);
    assert_eq!(data.columns[0].align, Align::Justify);
}

#[test]
fn head_column_promotes_body_cells_to_row_heads() {
    let doc = parse("| k | v |\n|--:|---|\n| x | y |");
    let (data, rows) = only_table(&doc);
    assert!(data.columns[0].head_column);

    match rows.last() {
        Some(Part::TableRow { parts: cells, .. }) => {
            assert!(
                matches!(
                    &cells[0],
                    Part::TableHeadCell { is_row_head: true, is_column_head: false, .. }
                ),
                "{cells:?}"
            );
            assert!(matches!(&cells[1], Part::TableCell { .. }));
        }
        other => panic!("expected a body row, got {other:?}"),
    }
}

#[test]
fn column_span_from_bar_alignment() {
    let doc = parse("| A | B | C |\n|---|---|---|\n| wide  | c |");
    let (_, rows) = only_table(&doc);

    match rows.last() {
        Some(Part::TableRow { parts: cells, .. }) => {
            let wide = cell_data(&cells[0]);
            assert_eq!(wide.column, Some(0));
            assert_eq!(wide.column_span, 2, "end bar at 8 is nearer column 1's boundary");
            let last = cell_data(&cells[1]);
            assert_eq!(last.column, Some(2));
            assert_eq!(last.column_span, 1);
        }
        other => panic!("expected a body row, got {other:?}"),
    }
}

#[test]
fn no_extra_span_without_missing_cells() {
    let doc = parse("| A | B |\n|--|----|\n| mid | x |");
    let (data, rows) = only_table(&doc);
    assert_eq!(data.columns[0].ex, 3);
    assert_eq!(data.columns[1].ex, 8);

    match rows.last() {
        Some(Part::TableRow { parts: cells, .. }) => {
            // With as many cells as columns there is no extra span to give.
            assert_eq!(cell_data(&cells[0]).column_span, 1);
        }
        other => panic!("expected a body row, got {other:?}"),
    }
}

#[test]
fn row_separator_enables_multiline_rows() {
    let doc = parse("| H |\n|---|\n| one |\n| two |\n|---|\n| three |");
    let (data, rows) = only_table(&doc);
    assert!(data.multiline_row_mode);
    assert!(data.has_row_separator);

    match rows {
        [Part::TableHeadRow { .. }, Part::TableRow { parts: first, .. }, Part::TableRow { parts: second, .. }] =>
        {
            assert_eq!(cell_text(&first[0]), "one two");
            assert_eq!(cell_text(&second[0]), "three");
        }
        other => panic!("expected head plus two logical rows, got {other:?}"),
    }
}

#[test]
fn rows_after_a_separator_merge_until_the_next_one() {
    let doc = parse("| H |\n|---|\n| a |\n|---|\n| b |\n| c |");
    let (_, rows) = only_table(&doc);

    match rows {
        [Part::TableHeadRow { .. }, Part::TableRow { parts: first, .. }, Part::TableRow { parts: second, .. }] =>
        {
            assert_eq!(cell_text(&first[0]), "a");
            assert_eq!(cell_text(&second[0]), "b c");
        }
        other => panic!("expected two logical rows, got {other:?}"),
    }
}

#[test]
fn row_span_merges_into_master_and_prunes_subordinates() {
    let doc = parse("| A | B |\n|---|---|\n| a | b |\n|- -|---|\n| c | d |");
    let (data, rows) = only_table(&doc);
    assert!(data.has_row_span);

    match rows {
        [Part::TableHeadRow { .. }, Part::TableRow { parts: first, .. }, Part::TableRow { parts: second, .. }] =>
        {
            // The master absorbed the continuation cell's content, in order.
            assert_eq!(first.len(), 2);
            assert_eq!(cell_text(&first[0]), "a c");
            assert_eq!(cell_data(&first[0]).row_span, 2);
            assert_eq!(cell_data(&first[0]).master_cell, None);

            // The subordinate cell is gone from its row.
            assert_eq!(second.len(), 1);
            assert_eq!(cell_text(&second[0]), "d");
        }
        other => panic!("expected head plus two rows, got {other:?}"),
    }
}

#[test]
fn row_span_chains_accumulate_on_the_first_master() {
    let doc = parse(
        "| A |\n|---|\n| a |\n|- -|\n| b |\n|- -|\n| c |",
    );
    let (_, rows) = only_table(&doc);

    let body_rows: Vec<&Part> =
        rows.iter().filter(|p| matches!(p, Part::TableRow { .. })).collect();
    assert_eq!(body_rows.len(), 3);

    let master = &body_rows[0].children()[0];
    assert_eq!(cell_text(master), "a b c");
    assert_eq!(cell_data(master).row_span, 3);
    assert!(body_rows[1].children().is_empty());
    assert!(body_rows[2].children().is_empty());
}

#[test]
fn thick_separator_flags_the_row() {
    let doc = parse("| H |\n|===|\n| a |");
    let (data, rows) = only_table(&doc);
    assert!(data.has_head_separator);

    match &rows[0] {
        Part::TableHeadRow { data: row_data, .. } => assert!(row_data.row_separator),
        other => panic!("expected a head row, got {other:?}"),
    }
}

#[test]
fn caption_with_style_mark() {
    let doc = parse("|[ The caption ]|<bg:red>\n| a |");
    let (_, children) = only_table(&doc);

    match &children[0] {
        Part::TableCaption { style, parts } => {
            assert_eq!(parts, &vec![text("The caption")]);
            let background =
                style.as_ref().and_then(|s| s.background_color.as_ref()).expect("background");
            assert_eq!(background.base_name, "red");
        }
        other => panic!("expected a caption, got {other:?}"),
    }
    assert!(matches!(&children[1], Part::TableRow { .. }));
}

#[test]
fn malformed_caption_degrades_to_paragraph() {
    // Missing space padding against the brackets.
    let doc = parse("|[no padding]|");
    assert!(matches!(doc.parts.as_slice(), [Part::Paragraph { .. }]), "{:?}", doc.parts);
}

#[test]
fn cell_style_marks() {
    let doc = parse("|<green> styled | plain |");
    let (_, rows) = only_table(&doc);

    match rows {
        [Part::TableRow { parts: cells, .. }] => {
            let style = cell_data(&cells[0]).style.as_ref().expect("cell style");
            let background = style.background_color.as_ref().expect("background color");
            assert_eq!(background.base_name, "green");
            assert_eq!(cell_text(&cells[0]), "styled");
            assert_eq!(cell_data(&cells[1]).style, None);
        }
        other => panic!("expected one row, got {other:?}"),
    }
}

#[test]
fn double_bar_marks_a_column_separator() {
    let doc = parse("| a || b |");
    let (_, rows) = only_table(&doc);
    match rows {
        [Part::TableRow { parts: cells, .. }] => {
            assert!(cell_data(&cells[0]).column_separator);
            assert!(!cell_data(&cells[1]).column_separator);
        }
        other => panic!("expected one row, got {other:?}"),
    }
}

#[test]
fn inline_markup_inside_cells() {
    let doc = parse("| *em* | `code` |");
    let (_, rows) = only_table(&doc);
    match rows {
        [Part::TableRow { parts: cells, .. }] => {
            assert_eq!(
                cells[0].children(),
                &[Part::EmphasisText { level: 1, parts: vec![text("em")] }]
            );
            assert_eq!(cells[1].children(), &[Part::Code { text: "code".to_string() }]);
        }
        other => panic!("expected one row, got {other:?}"),
    }
}
