//! Decrypted Raycast configuration.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::decoder;
use crate::error::{Error, Result};
use crate::model::Note;

/// Key of the Notes extension inside the config object.
pub const NOTES_PACKAGE_KEY: &str = "builtin_package_raycastNotes";

/// Raw JSON of a decrypted Raycast config export.
///
/// # Example
///
/// ```no_run
/// use rayconfig::RayConfig;
///
/// let config = RayConfig::import_file("Raycast.rayconfig", "pass0010")?;
/// for note in config.notes()?.unwrap_or_default() {
///     println!("{}", note.title());
/// }
/// # Ok::<(), rayconfig::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RayConfig {
    raw: Vec<u8>,
}

impl RayConfig {
    /// Wrap already decrypted config JSON.
    pub fn from_json_bytes(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// Decrypt an export held in memory.
    pub fn import_bytes(data: &[u8], passphrase: &str) -> Result<Self> {
        Ok(Self::from_json_bytes(decoder::decode(passphrase, data)?))
    }

    /// Read and decrypt an export file.
    pub fn import_file<P: AsRef<Path>>(path: P, passphrase: &str) -> Result<Self> {
        let data = fs::read(path)?;
        Self::import_bytes(&data, passphrase)
    }

    /// Encrypt the config into export form.
    pub fn export_bytes(&self, passphrase: &str) -> Result<Vec<u8>> {
        decoder::encode(passphrase, &self.raw)
    }

    /// Encrypt the config and write it to `path`.
    pub fn export_file<P: AsRef<Path>>(&self, path: P, passphrase: &str) -> Result<()> {
        fs::write(path, self.export_bytes(passphrase)?)?;
        Ok(())
    }

    /// The decrypted JSON bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Parse the config JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.raw)?)
    }

    /// Notes stored by the Notes extension.
    ///
    /// Returns `None` when the config has no notes package or the package
    /// has no `notes` array.
    pub fn notes(&self) -> Result<Option<Vec<Note>>> {
        let mut config = self.json()?;
        let notes = match config
            .get_mut(NOTES_PACKAGE_KEY)
            .and_then(|package| package.get_mut("notes"))
            .map(Value::take)
        {
            Some(Value::Array(entries)) => entries,
            _ => return Ok(None),
        };

        Ok(Some(notes.into_iter().map(Note::from_value).collect()))
    }

    /// Notes stored by the Notes extension, failing when there are none.
    pub fn require_notes(&self) -> Result<Vec<Note>> {
        match self.notes()? {
            Some(notes) if !notes.is_empty() => Ok(notes),
            _ => Err(Error::NotesNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with(value: Value) -> RayConfig {
        RayConfig::from_json_bytes(serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn test_notes_present() {
        let config = config_with(json!({
            NOTES_PACKAGE_KEY: {"notes": [{"id": "a"}, {"id": "b"}]}
        }));
        let notes = config.notes().unwrap().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].id(), "b");
    }

    #[test]
    fn test_notes_missing_package() {
        let config = config_with(json!({"other": {}}));
        assert!(config.notes().unwrap().is_none());
        assert!(matches!(config.require_notes(), Err(Error::NotesNotFound)));
    }

    #[test]
    fn test_notes_empty_list_is_not_found() {
        let config = config_with(json!({NOTES_PACKAGE_KEY: {"notes": []}}));
        assert_eq!(config.notes().unwrap(), Some(Vec::new()));
        assert!(matches!(config.require_notes(), Err(Error::NotesNotFound)));
    }

    #[test]
    fn test_invalid_json() {
        let config = RayConfig::from_json_bytes(b"not json".to_vec());
        assert!(matches!(config.json(), Err(Error::Json(_))));
    }

    #[test]
    fn test_export_import_round_trip() {
        let config = config_with(json!({NOTES_PACKAGE_KEY: {"notes": []}}));
        let exported = config.export_bytes("pw").unwrap();
        let imported = RayConfig::import_bytes(&exported, "pw").unwrap();
        assert_eq!(imported.raw(), config.raw());
    }

    #[test]
    fn test_import_wrong_password() {
        let exported = config_with(json!({})).export_bytes("pw").unwrap();
        let result = RayConfig::import_bytes(&exported, "nope");
        assert!(matches!(result, Err(Error::InvalidPassword)));
    }
}
