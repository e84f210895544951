//! Rendering module for converting note documents to Markdown.

mod markdown;
mod result;

pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use result::{ExtractionStats, RenderResult};
