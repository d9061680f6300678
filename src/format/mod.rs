//! Markdown rendering of types and descriptions with cross-references.

mod text;
mod types;

pub use text::format_text;
pub use types::format_type;

use crate::doc::DocGraph;

impl DocGraph {
    /// Render type tokens, linking every token that names a top-level element.
    pub fn format_type(&self, tokens: &[String]) -> String {
        format_type(tokens, |word| self.root(word).map(|element| element.link()))
    }

    /// Render a description, resolving `{@link path}` through [`DocGraph::get`].
    pub fn format_text(&self, text: &str) -> String {
        format_text(text, |path| self.get(path).map(|element| element.link()))
    }
}
