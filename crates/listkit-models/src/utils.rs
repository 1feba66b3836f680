//! Filename utilities shared across the export crates.

/// Maximum length of a sanitized title used in output filenames.
const MAX_SANITIZED_TITLE_LEN: usize = 60;

/// Sanitize a listing title for use in output filenames.
///
/// Every non-alphanumeric character becomes an underscore, runs of
/// underscores collapse to one, leading/trailing underscores are trimmed,
/// the result is lowercased and capped at 60 characters. Non-ASCII letters
/// are replaced rather than stripped so sanitized names stay plain ASCII and
/// never need URL re-encoding downstream.
///
/// Idempotent: sanitizing an already-sanitized string returns it unchanged.
pub fn sanitize_filename_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len().min(MAX_SANITIZED_TITLE_LEN));
    let mut last_was_underscore = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
        if out.len() >= MAX_SANITIZED_TITLE_LEN {
            break;
        }
    }

    out.trim_matches('_').to_string()
}
