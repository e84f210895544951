//! Input format detection.
//!
//! The CLI accepts both encrypted `.rayconfig` exports and config JSON that
//! was already decrypted, so inputs are classified before decoding.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// gzip magic bytes.
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// How many leading bytes are inspected when sniffing a file.
const SNIFF_LEN: usize = 64;

/// Kind of config input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Encrypted export (`.rayconfig`)
    Encrypted,
    /// Decrypted config JSON
    Json,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Encrypted => write!(f, "encrypted export"),
            InputFormat::Json => write!(f, "config JSON"),
        }
    }
}

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use rayconfig::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("Raycast.rayconfig").unwrap();
/// println!("Input is {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(SNIFF_LEN as u64);
    let mut head = Vec::with_capacity(SNIFF_LEN);
    reader.read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect the input format from the leading bytes of a file.
///
/// Config JSON always starts with an object, so the first non-whitespace
/// byte is `{` and the bytes are UTF-8. Anything else is treated as
/// ciphertext. Empty input is an error.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let first = data
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .ok_or_else(|| Error::Other("Input is empty".into()))?;

    // A sniffed prefix may end inside a multi-byte character.
    let is_text = match std::str::from_utf8(data) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };

    if *first == b'{' && is_text {
        Ok(InputFormat::Json)
    } else {
        Ok(InputFormat::Encrypted)
    }
}

/// Check whether bytes start with the gzip magic number.
pub fn is_gzip_bytes(data: &[u8]) -> bool {
    data.starts_with(GZIP_MAGIC)
}
