//! Data model for Raycast Notes.
//!
//! [`Note`] is the record stored in the config export; its `document`
//! field decodes into a [`Node`] tree that the renderer turns into Markdown.

mod node;
mod note;

pub use node::{ListKind, Mark, Node, MAX_HEADING_LEVEL};
pub use note::{Note, UNTITLED};
