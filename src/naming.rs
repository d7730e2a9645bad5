//! Filename slug normalization for web-served assets.
//!
//! `"My Photo!.JPG"` becomes `"my-photo.jpg"`: lowercase, hyphens for
//! separators, nothing outside `[a-z0-9-]` in the stem. The function is total
//! (any input yields a deterministic output, possibly with an empty stem) and
//! idempotent, so re-running a rename pass over already-clean names is a no-op.

/// Normalize a filename to a web-safe slug, preserving the (lowercased)
/// extension.
pub fn sanitize_filename(filename: &str) -> String {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (filename, None),
    };

    let mut slug = String::with_capacity(stem.len());
    let mut pending_hyphen = false;
    for ch in stem.chars() {
        let ch = ch.to_ascii_lowercase();
        match ch {
            'a'..='z' | '0'..='9' => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(ch);
            }
            ' ' | '_' | '-' => pending_hyphen = true,
            // Everything else (punctuation, non-ASCII) is dropped outright.
            _ => {}
        }
    }

    match extension {
        Some(ext) => format!("{slug}.{}", ext.to_ascii_lowercase()),
        None => slug,
    }
}
