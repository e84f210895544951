//! Writing notes out as Markdown files.
//!
//! Each note becomes `{id}-{title}.md` inside the output directory, with
//! the file's modification time taken from the note's `modifiedAt`.
//! Notes are independent, so a bad record is skipped or reported as failed
//! without stopping the rest of the batch.

mod filename;
mod options;

pub use filename::{note_filename, sanitize_title, MAX_TITLE_CHARS};
pub use options::{ExportOptions, DEFAULT_OUTPUT_DIR};

use std::fs::{self, File};
use std::panic;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Node, Note};
use crate::render::to_markdown_with_stats;

/// What happened to a single note.
#[derive(Debug)]
pub enum NoteOutcome {
    /// Markdown was written to this path.
    Saved(PathBuf),
    /// The note was malformed and not exported.
    Skipped(String),
    /// The note could not be rendered or written.
    Failed(Error),
}

/// Outcome for one note, with enough context to report it.
#[derive(Debug)]
pub struct NoteResult {
    pub id: String,
    pub title: String,
    pub outcome: NoteOutcome,
}

impl NoteResult {
    /// Whether the note was written.
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, NoteOutcome::Saved(_))
    }
}

/// Per-note outcomes of an export run, in input order.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub results: Vec<NoteResult>,
}

impl ExportReport {
    pub fn saved_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_saved()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, NoteOutcome::Skipped(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, NoteOutcome::Failed(_)))
            .count()
    }

    /// Paths of every written file.
    pub fn saved_paths(&self) -> Vec<&Path> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                NoteOutcome::Saved(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// True when no note failed. Skipped notes do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Exports notes to a directory of Markdown files.
///
/// # Example
///
/// ```no_run
/// use rayconfig::{ExportOptions, NoteExporter, RayConfig};
///
/// let config = RayConfig::import_file("Raycast.rayconfig", "pass0010")?;
/// let exporter = NoteExporter::new(ExportOptions::new().with_output_dir("out"));
/// let report = exporter.export(&config.require_notes()?)?;
/// println!("saved {} notes", report.saved_count());
/// # Ok::<(), rayconfig::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteExporter {
    options: ExportOptions,
}

impl NoteExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export every note. Fails only if the output directory cannot be created.
    pub fn export(&self, notes: &[Note]) -> Result<ExportReport> {
        self.export_with(notes, |_| {})
    }

    /// Export every note, calling `on_note` as each one finishes.
    ///
    /// With parallel export enabled `on_note` runs on rayon worker threads
    /// in completion order.
    pub fn export_with<F>(&self, notes: &[Note], on_note: F) -> Result<ExportReport>
    where
        F: Fn(&NoteResult) + Sync + Send,
    {
        fs::create_dir_all(&self.options.output_dir)?;

        let process = |note: &Note| {
            let result = self.export_note(note);
            on_note(&result);
            result
        };

        let results: Vec<NoteResult> = if self.options.parallel {
            notes.par_iter().map(process).collect()
        } else {
            notes.iter().map(process).collect()
        };

        Ok(ExportReport { results })
    }

    /// Export a single note into the output directory.
    ///
    /// Notes missing required fields or carrying an undecodable document
    /// are skipped. Any later error fails the note.
    pub fn export_note(&self, note: &Note) -> NoteResult {
        let outcome = match prepare(note) {
            Err(e) => {
                log::warn!("Skipping note: {}", e);
                NoteOutcome::Skipped(e.to_string())
            }
            Ok(document) => match self.write_note(note, &document) {
                Ok(path) => {
                    log::debug!("Saved {}", path.display());
                    NoteOutcome::Saved(path)
                }
                Err(e) => {
                    log::warn!("Failed to export note {}: {}", note.title(), e);
                    NoteOutcome::Failed(e)
                }
            },
        };

        NoteResult {
            id: note.id().to_string(),
            title: note.title().to_string(),
            outcome,
        }
    }

    fn write_note(&self, note: &Note, document: &Node) -> Result<PathBuf> {
        let rendered = panic::catch_unwind(|| to_markdown_with_stats(document))
            .map_err(|_| Error::Render(format!("renderer panicked on {}", note.title())))?;
        log::debug!(
            "Rendered {}: {} words, {} headings",
            note.title(),
            rendered.stats.word_count,
            rendered.stats.heading_count
        );
        let modified = if self.options.preserve_mtime {
            Some(SystemTime::from(note.modified_at()?))
        } else {
            None
        };

        let path = self
            .options
            .output_dir
            .join(note_filename(note.id(), note.title()));
        fs::write(&path, rendered.content)?;

        if let Some(modified) = modified {
            File::options()
                .write(true)
                .open(&path)?
                .set_modified(modified)?;
        }

        Ok(path)
    }
}

/// Validate a note and decode its document tree.
fn prepare(note: &Note) -> Result<Node> {
    note.validate()?;
    note.decode_document().map_err(|e| {
        Error::MalformedNote(format!(
            "{} has an unreadable document: {}",
            note.title(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::json;
    use tempfile::TempDir;

    fn note(id: &str, title: &str, modified_at: &str) -> Note {
        let doc = json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": title}]}]
        });
        Note {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            document: Some(STANDARD.encode(serde_json::to_vec(&doc).unwrap())),
            modified_at: Some(modified_at.to_string()),
        }
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let exporter = NoteExporter::new(ExportOptions::new().with_output_dir(dir.path()));

        let result = exporter.export_note(&note("n1", "Hello", "2025-01-01T00:00:00Z"));
        let path = dir.path().join("n1-Hello.md");

        assert!(result.is_saved());
        assert_eq!(fs::read_to_string(path).unwrap(), "Hello\n");
    }

    #[test]
    fn test_malformed_note_skipped() {
        let dir = TempDir::new().unwrap();
        let exporter = NoteExporter::new(ExportOptions::new().with_output_dir(dir.path()));

        let mut broken = note("n2", "Broken", "2025-01-01T00:00:00Z");
        broken.document = None;

        let result = exporter.export_note(&broken);
        assert!(matches!(result.outcome, NoteOutcome::Skipped(_)));
        assert!(!dir.path().join("n2-Broken.md").exists());
    }

    #[test]
    fn test_unreadable_document_skipped() {
        let dir = TempDir::new().unwrap();
        let exporter = NoteExporter::new(ExportOptions::new().with_output_dir(dir.path()));

        let mut broken = note("n5", "Garbled", "2025-01-01T00:00:00Z");
        broken.document = Some(STANDARD.encode(b"{not json"));

        let result = exporter.export_note(&broken);
        match result.outcome {
            NoteOutcome::Skipped(reason) => assert!(reason.contains("unreadable document")),
            other => panic!("expected skipped, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_timestamp_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let exporter = NoteExporter::new(ExportOptions::new().with_output_dir(dir.path()));

        let result = exporter.export_note(&note("n3", "Late", "someday"));
        assert!(matches!(
            result.outcome,
            NoteOutcome::Failed(Error::InvalidTimestamp(_))
        ));
        assert!(!dir.path().join("n3-Late.md").exists());
    }

    #[test]
    fn test_bad_timestamp_ignored_without_mtime() {
        let dir = TempDir::new().unwrap();
        let exporter = NoteExporter::new(
            ExportOptions::new()
                .with_output_dir(dir.path())
                .with_preserve_mtime(false),
        );

        let result = exporter.export_note(&note("n4", "Late", "someday"));
        assert!(result.is_saved());
    }

    #[test]
    fn test_report_counts() {
        let dir = TempDir::new().unwrap();
        let exporter =
            NoteExporter::new(ExportOptions::new().with_output_dir(dir.path()).sequential());

        let mut skipped = note("b", "Skip", "2025-01-01T00:00:00Z");
        skipped.id = None;
        let notes = vec![
            note("a", "One", "2025-01-01T00:00:00Z"),
            skipped,
            note("c", "Three", "bad"),
        ];

        let report = exporter.export(&notes).unwrap();
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.saved_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_success());
        assert_eq!(report.results[0].id, "a");
        assert_eq!(report.saved_paths(), vec![dir.path().join("a-One.md").as_path()]);
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("notes");
        let exporter = NoteExporter::new(ExportOptions::new().with_output_dir(&out));

        let report = exporter
            .export(&[note("x", "Title", "2025-01-01T00:00:00Z")])
            .unwrap();
        assert!(report.is_success());
        assert!(out.join("x-Title.md").exists());
    }
}
