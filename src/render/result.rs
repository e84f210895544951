//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of list items rendered (nested items included)
    pub list_item_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of block quotes
    pub blockquote_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Number of nodes with an unrecognized type
    pub unknown_node_count: u32,

    /// Approximate word count of the text leaves (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count of the text leaves (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment code block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Increment block quote count.
    pub fn add_blockquote(&mut self) {
        self.blockquote_count += 1;
    }

    /// Increment horizontal rule count.
    pub fn add_horizontal_rule(&mut self) {
        self.horizontal_rule_count += 1;
    }

    /// Increment unknown node count.
    pub fn add_unknown_node(&mut self) {
        self.unknown_node_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
