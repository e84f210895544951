//! Key and IV derivation from a passphrase.
//!
//! Raycast derives both values from two chained SHA-256 digests:
//!
//! - `D1 = sha256(passphrase)`
//! - `D2 = sha256(D1 ++ passphrase)`
//!
//! The AES-256 key is `D1` and the CBC IV is the first 16 bytes of `D2`.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

/// Length of the AES-256 key in bytes.
pub const KEY_LENGTH: usize = 32;

/// Length of the CBC initialization vector in bytes.
pub const IV_LENGTH: usize = 16;

/// Key material derived from a passphrase, wiped on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
    iv: [u8; IV_LENGTH],
}

impl DerivedKey {
    /// Derive the key and IV for `passphrase`.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let passwd = passphrase.as_bytes();

        let d1 = Sha256::digest(passwd);
        let d2 = Sha256::new().chain_update(d1).chain_update(passwd).finalize();

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&d1[..KEY_LENGTH]);
        let mut iv = [0u8; IV_LENGTH];
        iv.copy_from_slice(&d2[..IV_LENGTH]);

        Self { key, iv }
    }

    /// Raw AES key bytes.
    pub fn key(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// Raw CBC IV bytes.
    pub fn iv(&self) -> &[u8; IV_LENGTH] {
        &self.iv
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let a = DerivedKey::from_passphrase("pass0010");
        let b = DerivedKey::from_passphrase("pass0010");
        assert_eq!(a.key(), b.key());
        assert_eq!(a.iv(), b.iv());
    }

    #[test]
    fn test_key_is_first_digest() {
        let derived = DerivedKey::from_passphrase("secret");
        let d1 = Sha256::digest(b"secret");
        assert_eq!(&derived.key()[..], &d1[..]);
    }

    #[test]
    fn test_iv_is_truncated_second_digest() {
        let derived = DerivedKey::from_passphrase("secret");
        let d1 = Sha256::digest(b"secret");
        let mut input = d1.to_vec();
        input.extend_from_slice(b"secret");
        let d2 = Sha256::digest(&input);
        assert_eq!(&derived.iv()[..], &d2[..16]);
    }

    #[test]
    fn test_different_passphrases_differ() {
        let a = DerivedKey::from_passphrase("one");
        let b = DerivedKey::from_passphrase("two");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_debug_redacts_material() {
        let derived = DerivedKey::from_passphrase("secret");
        let shown = format!("{:?}", derived);
        assert!(shown.contains("REDACTED"));
    }
}
