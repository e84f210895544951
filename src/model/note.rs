//! Note records from the Raycast Notes extension.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Node;
use crate::error::{Error, Result};

/// Title used when a note has none.
pub const UNTITLED: &str = "untitled";

/// A note record as stored in the config.
///
/// Every field is optional on the wire; [`Note::validate`] reports which
/// required fields are missing so a single bad record can be skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Base64-encoded JSON of the document tree
    #[serde(default)]
    pub document: Option<String>,

    /// Last modification time (ISO-8601)
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl Note {
    /// Decode a note from a JSON value.
    ///
    /// Entries that are not objects, or whose fields have the wrong type,
    /// become an empty note that fails validation.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Unreadable note record: {}", e);
            Note::default()
        })
    }

    /// Note identifier, or an empty string.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Title, falling back to `untitled`.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Check that `id`, `document` and `modifiedAt` are present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("id", &self.id),
            ("document", &self.document),
            ("modifiedAt", &self.modified_at),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MalformedNote(format!(
                "{} is missing {}",
                self.title(),
                missing.join(", ")
            )))
        }
    }

    /// Decode the embedded document tree.
    pub fn decode_document(&self) -> Result<Node> {
        let encoded = self
            .document
            .as_deref()
            .ok_or_else(|| Error::MalformedNote(format!("{} has no document", self.title())))?;
        let json = STANDARD.decode(encoded.trim())?;
        Node::from_slice(&json)
    }

    /// Decode the embedded document and render it to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        let document = self.decode_document()?;
        Ok(crate::render::to_markdown(&document))
    }

    /// Parse `modifiedAt`.
    ///
    /// RFC 3339 timestamps (including a trailing `Z`) are accepted; a
    /// timestamp without an offset is taken as UTC.
    pub fn modified_at(&self) -> Result<DateTime<Utc>> {
        let raw = self
            .modified_at
            .as_deref()
            .ok_or_else(|| Error::MalformedNote(format!("{} has no modifiedAt", self.title())))?;

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")?;
        Ok(naive.and_utc())
    }
}
