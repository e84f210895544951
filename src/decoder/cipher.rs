//! AES-256-CBC layer with the random 16-byte header.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{Error, Result};

use super::key::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Length of the random header prepended to every payload.
pub const HEADER_LENGTH: usize = 16;

/// Decrypt `data` and return the payload that follows the random header.
///
/// Fails with [`Error::InvalidPassword`] when the ciphertext is not block
/// aligned, the padding is inconsistent, or the plaintext is too short to
/// carry the header.
pub fn decrypt(passphrase: &str, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        log::debug!(
            "Ciphertext length {} is not a multiple of {}",
            data.len(),
            BLOCK_SIZE
        );
        return Err(Error::InvalidPassword);
    }

    let derived = DerivedKey::from_passphrase(passphrase);
    let cipher = Aes256CbcDec::new(
        GenericArray::from_slice(derived.key()),
        GenericArray::from_slice(derived.iv()),
    );

    let mut plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| Error::InvalidPassword)?;

    if plaintext.len() < HEADER_LENGTH {
        return Err(Error::InvalidPassword);
    }

    Ok(plaintext.split_off(HEADER_LENGTH))
}

/// Encrypt `payload` behind a fresh random header.
pub fn encrypt(passphrase: &str, payload: &[u8]) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_LENGTH];
    getrandom::getrandom(&mut header)
        .map_err(|e| Error::Other(format!("Failed to generate header bytes: {}", e)))?;

    let mut plaintext = Vec::with_capacity(HEADER_LENGTH + payload.len());
    plaintext.extend_from_slice(&header);
    plaintext.extend_from_slice(payload);

    let derived = DerivedKey::from_passphrase(passphrase);
    let cipher = Aes256CbcEnc::new(
        GenericArray::from_slice(derived.key()),
        GenericArray::from_slice(derived.iv()),
    );

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(&plaintext))
}
