//! File naming for exported notes.

/// Titles longer than this many characters are truncated.
pub const MAX_TITLE_CHARS: usize = 150;

/// Appended to truncated titles.
const ELLIPSIS: &str = "...";

/// Make a note title safe to use inside a file name.
///
/// `/` becomes `-`; titles longer than [`MAX_TITLE_CHARS`] characters are
/// cut to that length and suffixed with `...`.
pub fn sanitize_title(title: &str) -> String {
    let title = title.replace('/', "-");
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title;
    }

    let mut truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// File name for a note: `{id}-{sanitized title}.md`.
pub fn note_filename(id: &str, title: &str) -> String {
    format!("{}-{}.md", id, sanitize_title(title))
}
