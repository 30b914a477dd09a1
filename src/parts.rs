//! Typed parts of the document tree.
//!
//! A [`Part`] is one node of the tree produced by the parser: either a
//! container owning an ordered list of child parts, or a leaf holding scalar
//! data. The tree is built once during parsing and treated as immutable by
//! every consumer afterwards.

use crate::style::Style;

/// Horizontal float placement for media blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Float {
    Left,
    Right,
}

/// Column alignment, from the head separator's `<`/`>` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Default,
    Left,
    Right,
    Center,
    Justify,
}

/// Per-column template of a table, built from the head separator line.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnTemplate {
    /// Position of the column's left bar, relative to the first bar of the line.
    pub sx: usize,
    /// Position of the column's right bar, relative to the first bar of the line.
    pub ex: usize,
    pub align: Align,
    /// Cells of this column are row-head cells (`:` marker).
    pub head_column: bool,
    /// A doubled bar (`||`) follows this column.
    pub column_separator: bool,
    pub style: Option<Style>,
}

/// Table-level layout state and column templates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableData {
    pub columns: Vec<ColumnTemplate>,
    /// Body rows span multiple source lines, delimited by row separators.
    pub multiline_row_mode: bool,
    pub has_head_separator: bool,
    pub has_row_separator: bool,
    pub has_row_span: bool,
}

/// Shared data of table rows and table head rows.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRowData {
    pub style: Option<Style>,
    /// A thick separator follows this row.
    pub row_separator: bool,
    /// Column indexes whose cells continue into the next row (`- -` markers).
    pub continue_row_span: Vec<usize>,
}

/// Address of a cell inside its table: child position of the row in the
/// table's part list, and child position of the cell in that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    pub row: usize,
    pub cell: usize,
}

/// Shared data of table cells and table head cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableCellData {
    pub style: Option<Style>,
    /// Column index, assigned once the owning row is complete.
    pub column: Option<usize>,
    /// A doubled bar (`||`) follows this cell.
    pub column_separator: bool,
    pub column_span: usize,
    pub row_span: usize,
    /// Position of the cell's left bar, relative to the first bar of the line.
    pub sx: usize,
    /// Position of the cell's right bar, relative to the first bar of the line.
    pub ex: usize,
    /// Set on row-span continuation cells during post-processing; such cells
    /// are removed from their row once their content has been merged into the
    /// master cell, so no rendered tree retains this link.
    pub master_cell: Option<CellRef>,
}

impl TableCellData {
    pub(crate) fn new(sx: usize, ex: usize) -> Self {
        Self {
            style: None,
            column: None,
            column_separator: false,
            column_span: 1,
            row_span: 1,
            sx,
            ex,
            master_cell: None,
        }
    }
}

/// Media block payload shared by image, audio, and video blocks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaData {
    pub href: String,
    pub alt_text: String,
    pub float: Option<Float>,
    pub caption: Option<String>,
    pub title: Option<String>,
}

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Part {
    // Block containers
    Paragraph { parts: Vec<Part> },
    Header { level: usize, parts: Vec<Part> },
    Cite { parts: Vec<Part> },
    List { indent: usize, parts: Vec<Part> },
    ListItem { indent: usize, parts: Vec<Part> },
    OrderedList { indent: usize, auto_index: u32, parts: Vec<Part> },
    OrderedListItem { indent: usize, order: u32, index: u32, parts: Vec<Part> },
    Quote { indent: usize, parts: Vec<Part> },
    Anchor { href: String, parts: Vec<Part> },

    // Inline containers
    EmphasisText { level: usize, parts: Vec<Part> },
    DecoratedText { level: usize, underline: bool, parts: Vec<Part> },
    Link { href: String, style: Option<Style>, title: Option<String>, parts: Vec<Part> },
    StyledText { style: Option<Style>, title: Option<String>, parts: Vec<Part> },

    // Tables
    Table { data: TableData, parts: Vec<Part> },
    TableCaption { style: Option<Style>, parts: Vec<Part> },
    TableRow { data: TableRowData, parts: Vec<Part> },
    TableHeadRow { data: TableRowData, parts: Vec<Part> },
    TableCell { data: TableCellData, parts: Vec<Part> },
    TableHeadCell { data: TableCellData, is_column_head: bool, is_row_head: bool, parts: Vec<Part> },

    // Leaves
    Text { text: String },
    Code { text: String },
    HorizontalRule { clear_float: bool },
    ClearFloat,
    CodeBlock { text: String, lang: Option<String> },
    Image { href: String, alt_text: String, title: Option<String> },
    Pictogram { code: String, emoji: Option<String>, alt_text: Option<String>, title: Option<String> },
    ImageBlock { media: MediaData },
    AudioBlock { media: MediaData },
    VideoBlock { media: MediaData },
}

/// The type tag of a [`Part`], used by renderer grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartKind {
    Paragraph,
    Header,
    Cite,
    List,
    ListItem,
    OrderedList,
    OrderedListItem,
    Quote,
    Anchor,
    EmphasisText,
    DecoratedText,
    Link,
    StyledText,
    Table,
    TableCaption,
    TableRow,
    TableHeadRow,
    TableCell,
    TableHeadCell,
    Text,
    Code,
    HorizontalRule,
    ClearFloat,
    CodeBlock,
    Image,
    Pictogram,
    ImageBlock,
    AudioBlock,
    VideoBlock,
}

impl Part {
    pub(crate) fn paragraph() -> Self {
        Part::Paragraph { parts: Vec::new() }
    }

    pub(crate) fn header(level: usize) -> Self {
        Part::Header { level, parts: Vec::new() }
    }

    pub(crate) fn cite() -> Self {
        Part::Cite { parts: Vec::new() }
    }

    pub(crate) fn list(indent: usize) -> Self {
        Part::List { indent, parts: Vec::new() }
    }

    pub(crate) fn list_item(indent: usize) -> Self {
        Part::ListItem { indent, parts: Vec::new() }
    }

    pub(crate) fn ordered_list(indent: usize) -> Self {
        Part::OrderedList { indent, auto_index: 0, parts: Vec::new() }
    }

    pub(crate) fn ordered_list_item(indent: usize, order: u32, index: u32) -> Self {
        Part::OrderedListItem { indent, order, index, parts: Vec::new() }
    }

    pub(crate) fn quote(indent: usize) -> Self {
        Part::Quote { indent, parts: Vec::new() }
    }

    pub(crate) fn table() -> Self {
        Part::Table { data: TableData::default(), parts: Vec::new() }
    }

    pub(crate) fn table_caption() -> Self {
        Part::TableCaption { style: None, parts: Vec::new() }
    }

    pub(crate) fn table_row() -> Self {
        Part::TableRow { data: TableRowData::default(), parts: Vec::new() }
    }

    pub(crate) fn table_cell(sx: usize, ex: usize) -> Self {
        Part::TableCell { data: TableCellData::new(sx, ex), parts: Vec::new() }
    }

    /// Builds a pictogram, resolving the code through the emoji shortcode
    /// table; the canonical emoji name backfills a missing alt text.
    pub(crate) fn pictogram(code: String, alt_text: Option<String>, title: Option<String>) -> Self {
        let emoji = emojis::get_by_shortcode(&code);
        let alt_text = alt_text.or_else(|| emoji.map(|e| e.name().to_string()));
        Part::Pictogram {
            code,
            emoji: emoji.map(|e| e.as_str().to_string()),
            alt_text,
            title,
        }
    }

    pub fn kind(&self) -> PartKind {
        match self {
            Part::Paragraph { .. } => PartKind::Paragraph,
            Part::Header { .. } => PartKind::Header,
            Part::Cite { .. } => PartKind::Cite,
            Part::List { .. } => PartKind::List,
            Part::ListItem { .. } => PartKind::ListItem,
            Part::OrderedList { .. } => PartKind::OrderedList,
            Part::OrderedListItem { .. } => PartKind::OrderedListItem,
            Part::Quote { .. } => PartKind::Quote,
            Part::Anchor { .. } => PartKind::Anchor,
            Part::EmphasisText { .. } => PartKind::EmphasisText,
            Part::DecoratedText { .. } => PartKind::DecoratedText,
            Part::Link { .. } => PartKind::Link,
            Part::StyledText { .. } => PartKind::StyledText,
            Part::Table { .. } => PartKind::Table,
            Part::TableCaption { .. } => PartKind::TableCaption,
            Part::TableRow { .. } => PartKind::TableRow,
            Part::TableHeadRow { .. } => PartKind::TableHeadRow,
            Part::TableCell { .. } => PartKind::TableCell,
            Part::TableHeadCell { .. } => PartKind::TableHeadCell,
            Part::Text { .. } => PartKind::Text,
            Part::Code { .. } => PartKind::Code,
            Part::HorizontalRule { .. } => PartKind::HorizontalRule,
            Part::ClearFloat => PartKind::ClearFloat,
            Part::CodeBlock { .. } => PartKind::CodeBlock,
            Part::Image { .. } => PartKind::Image,
            Part::Pictogram { .. } => PartKind::Pictogram,
            Part::ImageBlock { .. } => PartKind::ImageBlock,
            Part::AudioBlock { .. } => PartKind::AudioBlock,
            Part::VideoBlock { .. } => PartKind::VideoBlock,
        }
    }

    /// Child parts, empty for leaves.
    pub fn children(&self) -> &[Part] {
        match self {
            Part::Paragraph { parts }
            | Part::Header { parts, .. }
            | Part::Cite { parts }
            | Part::List { parts, .. }
            | Part::ListItem { parts, .. }
            | Part::OrderedList { parts, .. }
            | Part::OrderedListItem { parts, .. }
            | Part::Quote { parts, .. }
            | Part::Anchor { parts, .. }
            | Part::EmphasisText { parts, .. }
            | Part::DecoratedText { parts, .. }
            | Part::Link { parts, .. }
            | Part::StyledText { parts, .. }
            | Part::Table { parts, .. }
            | Part::TableCaption { parts, .. }
            | Part::TableRow { parts, .. }
            | Part::TableHeadRow { parts, .. }
            | Part::TableCell { parts, .. }
            | Part::TableHeadCell { parts, .. } => parts,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Part>> {
        match self {
            Part::Paragraph { parts }
            | Part::Header { parts, .. }
            | Part::Cite { parts }
            | Part::List { parts, .. }
            | Part::ListItem { parts, .. }
            | Part::OrderedList { parts, .. }
            | Part::OrderedListItem { parts, .. }
            | Part::Quote { parts, .. }
            | Part::Anchor { parts, .. }
            | Part::EmphasisText { parts, .. }
            | Part::DecoratedText { parts, .. }
            | Part::Link { parts, .. }
            | Part::StyledText { parts, .. }
            | Part::Table { parts, .. }
            | Part::TableCaption { parts, .. }
            | Part::TableRow { parts, .. }
            | Part::TableHeadRow { parts, .. }
            | Part::TableCell { parts, .. }
            | Part::TableHeadCell { parts, .. } => Some(parts),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(
            self,
            Part::Text { .. }
                | Part::Code { .. }
                | Part::HorizontalRule { .. }
                | Part::ClearFloat
                | Part::CodeBlock { .. }
                | Part::Image { .. }
                | Part::Pictogram { .. }
                | Part::ImageBlock { .. }
                | Part::AudioBlock { .. }
                | Part::VideoBlock { .. }
        )
    }

    /// Literal text carried by text-bearing leaves.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } | Part::Code { text } | Part::CodeBlock { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Indentation of the container, 0 for parts that carry none.
    pub(crate) fn indent(&self) -> usize {
        match self {
            Part::List { indent, .. }
            | Part::ListItem { indent, .. }
            | Part::OrderedList { indent, .. }
            | Part::OrderedListItem { indent, .. }
            | Part::Quote { indent, .. } => *indent,
            _ => 0,
        }
    }

    pub(crate) fn is_quote(&self) -> bool {
        matches!(self, Part::Quote { .. })
    }

    /// Promotes a body row or cell to its head counterpart; every other part
    /// is returned unchanged.
    pub(crate) fn to_head(self) -> Part {
        match self {
            Part::TableRow { data, parts } => Part::TableHeadRow { data, parts },
            Part::TableCell { data, parts } => Part::TableHeadCell {
                data,
                is_column_head: false,
                is_row_head: false,
                parts,
            },
            other => other,
        }
    }
}
