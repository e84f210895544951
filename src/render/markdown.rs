//! Markdown rendering for note documents.
//!
//! Rendering is a post-order walk: each node renders its children, strips
//! the trailing whitespace of their concatenation, wraps the result in its
//! own markup and terminates it with a single newline. Text leaves are the
//! exception and return their marked text without a terminator, so runs
//! inside one paragraph join inline.

use crate::model::{ListKind, Mark, Node, MAX_HEADING_LEVEL};

use super::{ExtractionStats, RenderResult};

/// Indentation prepended to a list nested inside another list.
const NESTED_LIST_INDENT: &str = "  ";

/// Convert a document tree to Markdown.
pub fn to_markdown(node: &Node) -> String {
    MarkdownRenderer::new().render(node)
}

/// Convert a document tree to Markdown with statistics.
pub fn to_markdown_with_stats(node: &Node) -> RenderResult {
    MarkdownRenderer::new().render_with_stats(node)
}

/// Markdown renderer.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    collect_stats: bool,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a tree to Markdown.
    pub fn render(self, node: &Node) -> String {
        self.render_with_index(node, 1)
    }

    /// Render a tree whose root carries the ordinal `list_index`.
    ///
    /// Only meaningful when the root is an ordered list item.
    pub fn render_with_index(mut self, node: &Node, list_index: usize) -> String {
        self.render_node(node, list_index)
    }

    /// Render a tree to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, node: &Node) -> RenderResult {
        self.collect_stats = true;
        let content = self.render_node(node, 1);
        RenderResult::new(content, self.stats)
    }

    fn render_node(&mut self, node: &Node, list_index: usize) -> String {
        let child_text = self.render_children(node);
        self.record(node);

        let mut output = match node {
            Node::Text { text, marks } => return apply_marks(text, marks),
            Node::Doc { .. } | Node::Paragraph { .. } | Node::Unknown { .. } => child_text,
            Node::Heading { level, .. } => format!(
                "{} {}",
                "#".repeat((*level).min(MAX_HEADING_LEVEL)),
                child_text
            ),
            Node::CodeBlock { language, .. } => format!(
                "```{}\n{}\n```",
                language.as_deref().unwrap_or_default(),
                child_text
            ),
            Node::Blockquote { .. } => quote_lines(&child_text),
            Node::List { kind, checked, .. } => match kind {
                ListKind::Bullet => format!("- {}", child_text),
                ListKind::Ordered => format!("{}. {}", list_index, child_text),
                ListKind::Task => {
                    format!("- [{}] {}", if *checked { 'x' } else { ' ' }, child_text)
                }
                ListKind::Other(_) => child_text,
            },
            Node::HorizontalRule => "---".to_string(),
        };

        output.push('\n');
        output
    }

    /// Concatenate the renders of a node's children.
    ///
    /// Sibling list items share a running ordinal: it advances after each
    /// ordered item and restarts at 1 after anything else. A list nested in
    /// a list is indented and starts its own run.
    fn render_children(&mut self, node: &Node) -> String {
        let parent_is_list = node.is_list();
        let mut output = String::new();
        let mut ordinal = 1;

        for child in node.children() {
            if parent_is_list && child.is_list() {
                output.push_str(NESTED_LIST_INDENT);
            }
            output.push_str(&self.render_node(child, ordinal));

            ordinal = if child.is_ordered_list() { ordinal + 1 } else { 1 };
        }

        output.truncate(output.trim_end().len());
        output
    }

    fn record(&mut self, node: &Node) {
        if !self.collect_stats {
            return;
        }
        match node {
            Node::Paragraph { .. } => self.stats.add_paragraph(),
            Node::Heading { .. } => self.stats.add_heading(),
            Node::CodeBlock { .. } => self.stats.add_code_block(),
            Node::Blockquote { .. } => self.stats.add_blockquote(),
            Node::List { .. } => self.stats.add_list_item(),
            Node::HorizontalRule => self.stats.add_horizontal_rule(),
            Node::Unknown { kind, .. } => {
                log::debug!("Passing through unknown node type {:?}", kind);
                self.stats.add_unknown_node();
            }
            Node::Text { text, .. } => self.stats.count_text(text),
            Node::Doc { .. } => {}
        }
    }
}

/// Wrap text in its marks.
///
/// Marks are applied from last to first, so the first mark in the source
/// ends up outermost. A code mark wraps the raw text in backticks and
/// discards every other mark.
fn apply_marks(text: &str, marks: &[Mark]) -> String {
    let mut result = text.to_string();

    for mark in marks.iter().rev() {
        result = match mark {
            Mark::Code => return format!("`{}`", text),
            Mark::Bold => format!("**{}**", result),
            Mark::Italic => format!("*{}*", result),
            Mark::Underline => format!("~{}~", result),
            Mark::Strike => format!("~~{}~~", result),
            Mark::Link { href } => {
                format!("[{}]({})", result, href.as_deref().unwrap_or_default())
            }
            Mark::Unknown(_) => result,
        };
    }

    result
}

/// Prefix every line with `> `, leaving blank lines as a bare `>`.
fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("> {}", line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
