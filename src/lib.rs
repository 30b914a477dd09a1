//! Parser for the Quill line-oriented book markup language.
//!
//! Quill compiles plain text into a typed [`Document`] tree which pluggable
//! renderers consume through the [`Renderer`] visitor contract. The grammar
//! covers headers, paragraphs, cites, quotes driven purely by indentation,
//! (ordered) lists, fenced code, anchors, media blocks, metadata/theme
//! payloads, a `<...>` style/color mini-language, and tables with column-span
//! and row-span inference from character-column alignment.
//!
//! ```
//! let doc = quillmark::parse("# The Title\n\nSome *emphasized* text.");
//! assert_eq!(doc.title, "The Title");
//! ```
//!
//! Parsing is a pure, synchronous function of the input text: malformed
//! inline or table markup never aborts a parse, it degrades to literal text
//! or a plain paragraph.

mod block_parser;
mod color;
mod document;
mod inline_parser;
mod parts;
mod render;
mod style;

pub use color::Color;
pub use document::Document;
pub use parts::{
    Align, CellRef, ColumnTemplate, Float, MediaData, Part, PartKind, TableCellData, TableData,
    TableRowData,
};
pub use render::{Fragment, RenderMeta, Renderer};
pub use style::Style;

/// Interprets the raw text of a `---[type[` ... `]]---` block.
pub type MetadataParser =
    Box<dyn Fn(&str) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>>;

#[derive(Default)]
pub struct ParseOptions {
    /// Parser for metadata and theme payloads; JSON when not given.
    pub metadata_parser: Option<MetadataParser>,
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses a Quill document with default options.
pub fn parse(input: &str) -> Document {
    parse_with_options(input, ParseOptions::default())
}

/// Parses a Quill document.
///
/// Metadata and theme payloads are handed to the configured metadata parser
/// after the tree is built; a payload its parser rejects is dropped silently
/// and the rest of the document is unaffected.
pub fn parse_with_options(input: &str, options: ParseOptions) -> Document {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let normalized = input.replace("\r\n", "\n");
    let src: Vec<char> = normalized.chars().collect();

    let (parts, raw_metadata) = block_parser::BlockParser::new(&src).parse();

    let mut document = Document::new();
    document.parts = parts;
    document.auto_title();

    for (kind, raw) in raw_metadata {
        let parsed = match &options.metadata_parser {
            Some(parser) => parser(&raw),
            None => serde_json::from_str(&raw).map_err(Into::into),
        };

        match parsed {
            Ok(value) => match kind.as_str() {
                "metadata" => document.metadata = Some(value),
                "theme" => {
                    if let serde_json::Value::Object(map) = value {
                        document.theme = Some(map);
                    }
                }
                _ => {}
            },
            Err(error) => log::debug!("dropping unparsable {kind} block: {error}"),
        }
    }

    document
}
