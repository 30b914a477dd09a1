//! The parsed document: title, opaque metadata, theme, and the part tree.

use crate::parts::Part;
use crate::render::{RenderMeta, Renderer, render_parts};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Derived from the first top-level header when one exists.
    pub title: String,
    /// Whatever the metadata parser produced for the `metadata` payload.
    pub metadata: Option<serde_json::Value>,
    /// The `theme` payload, kept only when it parsed to an object.
    pub theme: Option<serde_json::Map<String, serde_json::Value>>,
    pub parts: Vec<Part>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self {
            title: "Document".to_string(),
            metadata: None,
            theme: None,
            parts: Vec::new(),
        }
    }

    /// Depth-first render through the given renderer. Rendering never
    /// mutates the tree; the same document renders to the same output.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> R::Fragment {
        let mut ancestors: Vec<&Part> = Vec::new();
        let content = render_parts(renderer, &self.parts, &mut ancestors);
        renderer.document(RenderMeta { title: &self.title }, content)
    }

    /// Concatenated literal text of the whole tree.
    pub fn text(&self) -> String {
        collect_text(&self.parts)
    }

    pub(crate) fn auto_title(&mut self) {
        let header = self.parts.iter().find(|part| matches!(part, Part::Header { .. }));
        if let Some(header) = header {
            let text = collect_text(header.children());
            if !text.is_empty() {
                self.title = text;
            }
        }
    }
}

fn collect_text(parts: &[Part]) -> String {
    let mut out = String::new();
    push_text(parts, &mut out);
    out
}

fn push_text(parts: &[Part], out: &mut String) {
    for part in parts {
        if let Some(text) = part.text() {
            out.push_str(text);
        } else if !part.children().is_empty() {
            push_text(part.children(), out);
        }
    }
}
