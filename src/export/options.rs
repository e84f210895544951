//! Export options and configuration.

use std::path::PathBuf;

/// Default directory notes are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "notes";

/// Options for exporting notes to Markdown files.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the Markdown files are written to
    pub output_dir: PathBuf,

    /// Whether to render notes on the rayon thread pool
    pub parallel: bool,

    /// Set each file's modification time to the note's `modifiedAt`
    pub preserve_mtime: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable copying `modifiedAt` onto the written files.
    pub fn with_preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: true,
            preserve_mtime: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new()
            .with_output_dir("out")
            .sequential()
            .with_preserve_mtime(false);

        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert!(!options.parallel);
        assert!(!options.preserve_mtime);
    }

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("notes"));
        assert!(options.parallel);
        assert!(options.preserve_mtime);
    }
}
