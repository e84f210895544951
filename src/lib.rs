//! # rayconfig
//!
//! Decrypt Raycast configuration exports and turn their notes into Markdown.
//!
//! A `.rayconfig` file is gzip-compressed JSON, prefixed with a random
//! header and encrypted with AES-256-CBC under a key derived from the
//! export passphrase. The Notes extension stores every note as a base64
//! encoded rich-text document tree, which this crate renders to Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rayconfig::{export_notes, ExportOptions};
//!
//! fn main() -> rayconfig::Result<()> {
//!     let report = export_notes(
//!         "Raycast.rayconfig",
//!         "pass0010",
//!         ExportOptions::new().with_output_dir("./notes"),
//!     )?;
//!     println!("{} notes saved", report.saved_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Decode and encode**: round-trip `.rayconfig` exports
//! - **Markdown rendering**: headings, lists, task lists, quotes, code and inline marks
//! - **Parallel export**: notes are rendered on the Rayon thread pool

pub mod config;
pub mod decoder;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use config::{RayConfig, NOTES_PACKAGE_KEY};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_gzip_bytes, InputFormat};
pub use error::{Error, Result};
pub use export::{
    note_filename, sanitize_title, ExportOptions, ExportReport, NoteExporter, NoteOutcome,
    NoteResult,
};
pub use model::{ListKind, Mark, Node, Note};
pub use render::{to_markdown, ExtractionStats, MarkdownRenderer, RenderResult};

use std::path::Path;

/// Decrypt a `.rayconfig` file and return the raw config JSON.
///
/// # Example
///
/// ```no_run
/// use rayconfig::decrypt_file;
///
/// let json = decrypt_file("Raycast.rayconfig", "pass0010").unwrap();
/// std::fs::write("Raycast.json", json).unwrap();
/// ```
pub fn decrypt_file<P: AsRef<Path>>(path: P, passphrase: &str) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    decoder::decode(passphrase, &data)
}

/// Encrypt raw config JSON into `.rayconfig` form.
pub fn encrypt_bytes(json: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    decoder::encode(passphrase, json)
}

/// Load a config file that is either an encrypted export or decrypted JSON.
///
/// A passphrase is only required for encrypted input.
pub fn load_config<P: AsRef<Path>>(path: P, passphrase: Option<&str>) -> Result<RayConfig> {
    let data = std::fs::read(path)?;
    match detect_format_from_bytes(&data)? {
        InputFormat::Json => Ok(RayConfig::from_json_bytes(data)),
        InputFormat::Encrypted => {
            let passphrase = passphrase.ok_or(Error::PasswordRequired)?;
            RayConfig::import_bytes(&data, passphrase)
        }
    }
}

/// Render every note of a config file into Markdown files.
///
/// Fails when the config cannot be loaded or holds no notes; individual
/// bad notes are recorded in the returned report.
pub fn export_notes<P: AsRef<Path>>(
    path: P,
    passphrase: &str,
    options: ExportOptions,
) -> Result<ExportReport> {
    let config = load_config(path, Some(passphrase))?;
    let notes = config.require_notes()?;
    NoteExporter::new(options).export(&notes)
}

/// Render a single note's document to Markdown.
pub fn note_to_markdown(note: &Note) -> Result<String> {
    note.to_markdown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_plain_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"a": 1}"#).unwrap();

        let config = load_config(&path, None).unwrap();
        assert_eq!(config.json().unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_load_config_encrypted_requires_password() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Raycast.rayconfig");
        fs::write(&path, encrypt_bytes(b"{}", "secret").unwrap()).unwrap();

        assert!(matches!(
            load_config(&path, None),
            Err(Error::PasswordRequired)
        ));
        assert!(matches!(
            load_config(&path, Some("wrong")),
            Err(Error::InvalidPassword)
        ));
        assert!(load_config(&path, Some("secret")).is_ok());
    }

    #[test]
    fn test_decrypt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Raycast.rayconfig");
        fs::write(&path, encrypt_bytes(b"{\"k\":true}", "pw").unwrap()).unwrap();

        assert_eq!(decrypt_file(&path, "pw").unwrap(), b"{\"k\":true}");
        assert!(matches!(
            decrypt_file(&path, "wrong"),
            Err(Error::InvalidPassword)
        ));
    }

    #[test]
    fn test_decrypt_file_missing() {
        let result = decrypt_file("/nonexistent/Raycast.rayconfig", "pw");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_export_notes_without_notes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Raycast.rayconfig");
        fs::write(&path, encrypt_bytes(b"{}", "pw").unwrap()).unwrap();

        let result = export_notes(&path, "pw", ExportOptions::new().with_output_dir(dir.path()));
        assert!(matches!(result, Err(Error::NotesNotFound)));
    }

    #[test]
    fn test_export_options_builder_defaults() {
        let options = ExportOptions::new().sequential();
        assert!(!options.parallel);
        assert!(options.preserve_mtime);
    }
}
