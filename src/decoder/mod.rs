//! Decoder for encrypted Raycast configuration exports.
//!
//! A `.rayconfig` file is a gzip stream of JSON, prefixed with 16 random
//! bytes, PKCS#7 padded and encrypted with AES-256-CBC under a key derived
//! from the export passphrase.

mod cipher;
mod key;

pub use cipher::{decrypt, encrypt, BLOCK_SIZE, HEADER_LENGTH};
pub use key::{DerivedKey, IV_LENGTH, KEY_LENGTH};

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::detect::is_gzip_bytes;
use crate::error::{Error, Result};

/// Decrypt and decompress an export, returning the raw JSON bytes.
pub fn decode(passphrase: &str, data: &[u8]) -> Result<Vec<u8>> {
    let compressed = decrypt(passphrase, data)?;

    if !is_gzip_bytes(&compressed) {
        log::debug!("Decrypted payload does not start with gzip magic");
        return Err(Error::InvalidPassword);
    }

    let mut raw = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut raw)
        .map_err(|e| {
            log::debug!("gzip decompression failed: {}", e);
            Error::InvalidPassword
        })?;

    log::debug!("Decoded {} bytes of config JSON", raw.len());
    Ok(raw)
}

/// Compress and encrypt raw JSON bytes into export form.
pub fn encode(passphrase: &str, raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    let compressed = encoder.finish()?;
    encrypt(passphrase, &compressed)
}
