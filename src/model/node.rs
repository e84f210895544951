//! Rich-text document tree used by Raycast Notes.
//!
//! Notes store their body as a ProseMirror-style JSON tree. Every node has a
//! `type` tag, optional `content` children and optional `attrs`; text leaves
//! additionally carry `text` and `marks`. The tree is decoded into a closed
//! [`Node`] enum so rendering can match exhaustively. Tags outside the known
//! vocabulary are kept as [`Node::Unknown`] with their children intact.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Deepest heading Markdown can express; larger levels are clamped to it.
pub const MAX_HEADING_LEVEL: usize = 6;

/// A node of the note document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    /// Document root
    Doc {
        /// Child blocks
        content: Vec<Node>,
    },

    /// Text leaf
    Text {
        /// Literal text
        text: String,
        /// Inline marks, in source order
        marks: Vec<Mark>,
    },

    /// Paragraph block
    Paragraph {
        /// Inline children
        content: Vec<Node>,
    },

    /// Heading block
    Heading {
        /// Heading level; `1` when the attribute is missing, at most
        /// [`MAX_HEADING_LEVEL`]
        level: usize,
        /// Inline children
        content: Vec<Node>,
    },

    /// Fenced code block
    CodeBlock {
        /// Info string after the opening fence
        language: Option<String>,
        /// Text children
        content: Vec<Node>,
    },

    /// Block quote
    Blockquote {
        /// Child blocks
        content: Vec<Node>,
    },

    /// A single list item. Raycast encodes each item as its own `list`
    /// node; nested `list` children are sub-items.
    List {
        /// Item marker style
        kind: ListKind,
        /// Check state for task items
        checked: bool,
        /// Item body followed by any nested lists
        content: Vec<Node>,
    },

    /// Thematic break
    HorizontalRule,

    /// Node with a tag outside the known vocabulary
    Unknown {
        /// The original `type` tag
        kind: String,
        /// Child nodes
        content: Vec<Node>,
    },
}

impl Node {
    /// Decode a node tree from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a node tree from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Create a document root.
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc { content }
    }

    /// Create an unmarked text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a text leaf with marks.
    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// Create a paragraph.
    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    /// Create a heading with a single text child.
    pub fn heading(text: impl Into<String>, level: usize) -> Self {
        Node::Heading {
            level,
            content: vec![Node::text(text)],
        }
    }

    /// Create a list item whose body is a paragraph of `text`.
    pub fn list_item(kind: ListKind, text: impl Into<String>) -> Self {
        Node::List {
            kind,
            checked: false,
            content: vec![Node::paragraph(vec![Node::text(text)])],
        }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::List { content, .. }
            | Node::Unknown { content, .. } => content,
            Node::Text { .. } | Node::HorizontalRule => &[],
        }
    }

    /// The `type` tag this node was decoded from.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Text { .. } => "text",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Blockquote { .. } => "blockquote",
            Node::List { .. } => "list",
            Node::HorizontalRule => "horizontalRule",
            Node::Unknown { kind, .. } => kind,
        }
    }

    /// Check if this is a list node of any kind.
    pub fn is_list(&self) -> bool {
        matches!(self, Node::List { .. })
    }

    /// Check if this is an ordered list node.
    pub fn is_ordered_list(&self) -> bool {
        matches!(
            self,
            Node::List {
                kind: ListKind::Ordered,
                ..
            }
        )
    }

    /// Concatenated text of all leaves, without any markup.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            _ => self.children().iter().map(Node::plain_text).collect(),
        }
    }
}

/// Marker style of a list item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListKind {
    /// `- item`
    #[default]
    Bullet,
    /// `1. item`
    Ordered,
    /// `- [ ] item`
    Task,
    /// Unrecognized kind, rendered without a marker
    Other(String),
}

impl ListKind {
    fn from_attr(kind: Option<&str>) -> Self {
        match kind {
            None | Some("bullet") => ListKind::Bullet,
            Some("ordered") => ListKind::Ordered,
            Some("task") => ListKind::Task,
            Some(other) => ListKind::Other(other.to_string()),
        }
    }
}

/// Inline style annotation on a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMark")]
pub enum Mark {
    /// Strong emphasis
    Bold,
    /// Emphasis
    Italic,
    /// Underline
    Underline,
    /// Strikethrough
    Strike,
    /// Inline code
    Code,
    /// Hyperlink
    Link {
        /// Link target, if present
        href: Option<String>,
    },
    /// Mark with an unrecognized tag
    Unknown(String),
}

/// Wire shape of a node. Every field is optional so that partially formed
/// trees still decode.
#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<Vec<Node>>,
    #[serde(default)]
    attrs: Option<Map<String, Value>>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    marks: Option<Vec<Mark>>,
}

impl RawNode {
    fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name).filter(|v| !v.is_null())
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let level = raw
            .attr("level")
            .and_then(Value::as_u64)
            .map(|l| l.min(MAX_HEADING_LEVEL as u64) as usize)
            .unwrap_or(1);
        let language = raw
            .attr("language")
            .and_then(Value::as_str)
            .map(str::to_string);
        let kind = ListKind::from_attr(raw.attr("kind").and_then(Value::as_str));
        let checked = raw
            .attr("checked")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let tag = raw.kind.unwrap_or_default();
        let content = raw.content.unwrap_or_default();

        match tag.as_str() {
            "doc" => Node::Doc { content },
            "text" => Node::Text {
                text: raw.text.unwrap_or_default(),
                marks: raw.marks.unwrap_or_default(),
            },
            "paragraph" => Node::Paragraph { content },
            "heading" => Node::Heading { level, content },
            "codeBlock" => Node::CodeBlock { language, content },
            "blockquote" => Node::Blockquote { content },
            "list" => Node::List {
                kind,
                checked,
                content,
            },
            "horizontalRule" => Node::HorizontalRule,
            _ => Node::Unknown {
                kind: tag.clone(),
                content,
            },
        }
    }
}

#[derive(Deserialize)]
struct RawMark {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    attrs: Option<Map<String, Value>>,
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        match raw.kind.as_deref().unwrap_or_default() {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "link" => Mark::Link {
                href: raw
                    .attrs
                    .as_ref()
                    .and_then(|a| a.get("href"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            other => Mark::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_heading_with_level() {
        let node = Node::from_value(json!({
            "type": "heading",
            "attrs": {"level": 3},
            "content": [{"type": "text", "text": "Title"}]
        }))
        .unwrap();

        assert_eq!(node, Node::heading("Title", 3));
    }

    #[test]
    fn test_heading_level_clamped() {
        let node = Node::from_value(json!({
            "type": "heading",
            "attrs": {"level": 1_000_000_000_000_000u64},
            "content": [{"type": "text", "text": "Deep"}]
        }))
        .unwrap();

        assert_eq!(node, Node::heading("Deep", MAX_HEADING_LEVEL));
    }

    #[test]
    fn test_heading_level_defaults_to_one() {
        let node = Node::from_value(json!({"type": "heading"})).unwrap();
        assert!(matches!(node, Node::Heading { level: 1, .. }));
    }

    #[test]
    fn test_null_attrs_are_absent() {
        let node = Node::from_value(json!({
            "type": "codeBlock",
            "attrs": {"language": null},
            "content": []
        }))
        .unwrap();
        assert!(matches!(node, Node::CodeBlock { language: None, .. }));

        let node = Node::from_value(json!({
            "type": "list",
            "attrs": {"kind": null, "order": null, "checked": null}
        }))
        .unwrap();
        assert!(matches!(
            node,
            Node::List {
                kind: ListKind::Bullet,
                checked: false,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_list_kinds() {
        let ordered = Node::from_value(json!({"type": "list", "attrs": {"kind": "ordered"}})).unwrap();
        assert!(ordered.is_ordered_list());

        let task = Node::from_value(json!({
            "type": "list",
            "attrs": {"kind": "task", "checked": true}
        }))
        .unwrap();
        assert!(matches!(
            task,
            Node::List {
                kind: ListKind::Task,
                checked: true,
                ..
            }
        ));

        let other = Node::from_value(json!({"type": "list", "attrs": {"kind": "toggle"}})).unwrap();
        assert!(matches!(
            other,
            Node::List {
                kind: ListKind::Other(ref k),
                ..
            } if k == "toggle"
        ));
    }

    #[test]
    fn test_decode_marks() {
        let node = Node::from_value(json!({
            "type": "text",
            "text": "x",
            "marks": [
                {"type": "bold"},
                {"type": "link", "attrs": {"href": "https://example.com", "target": "_blank"}},
                {"type": "highlight"}
            ]
        }))
        .unwrap();

        let Node::Text { marks, .. } = node else {
            panic!("Expected text node");
        };
        assert_eq!(
            marks,
            vec![
                Mark::Bold,
                Mark::Link {
                    href: Some("https://example.com".to_string())
                },
                Mark::Unknown("highlight".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_type_keeps_children() {
        let node = Node::from_value(json!({
            "type": "callout",
            "content": [{"type": "text", "text": "inside"}]
        }))
        .unwrap();

        assert_eq!(node.type_name(), "callout");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.plain_text(), "inside");
    }

    #[test]
    fn test_horizontal_rule_is_leaf() {
        let node = Node::from_value(json!({"type": "horizontalRule"})).unwrap();
        assert_eq!(node, Node::HorizontalRule);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        assert!(Node::from_slice(b"{not json").is_err());
    }
}
