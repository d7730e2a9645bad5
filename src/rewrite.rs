//! Source reference rewriting after an asset rename pass.
//!
//! Given the `old basename -> new basename` mapping produced by the image
//! pipeline, every project source file is scanned for occurrences of each old
//! name — both literally and with spaces URL-encoded as `%20`, since both
//! spellings appear in markup — and rewritten in place. Files are only
//! written back when something actually changed, so a second run over the
//! same tree modifies nothing.

use crate::process::FilenameMapping;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-run rewrite statistics.
#[derive(Debug, Default)]
pub struct RewriteReport {
    pub files_modified: usize,
    pub total_replacements: usize,
    pub failed: usize,
}

/// Replace every mapped old name in `content`, counting replacements.
/// The URL-encoded variant only differs for names containing spaces.
pub fn rewrite_content(content: &str, mapping: &FilenameMapping) -> (String, usize) {
    let mut output = content.to_string();
    let mut replacements = 0;
    for (old, new) in mapping {
        let mut patterns = vec![old.clone()];
        let encoded = old.replace(' ', "%20");
        if encoded != *old {
            patterns.push(encoded);
        }
        for pattern in patterns {
            let count = output.matches(&pattern).count();
            if count > 0 {
                output = output.replace(&pattern, new);
                replacements += count;
            }
        }
    }
    (output, replacements)
}

/// Rewrite references across `files`, writing back only changed files.
/// Unreadable files are reported and counted, never fatal. With `dry_run`
/// the changes are counted but nothing is written.
pub fn update_source_references(
    files: &[PathBuf],
    mapping: &FilenameMapping,
    dry_run: bool,
) -> RewriteReport {
    let mut report = RewriteReport::default();
    if mapping.is_empty() {
        return report;
    }

    for path in files {
        match rewrite_file(path, mapping, dry_run) {
            Ok(0) => {}
            Ok(count) => {
                println!("Updated {} reference(s) in {}", count, path.display());
                report.files_modified += 1;
                report.total_replacements += count;
            }
            Err(e) => {
                eprintln!("Error updating {}: {e}", path.display());
                report.failed += 1;
            }
        }
    }

    report
}

fn rewrite_file(path: &Path, mapping: &FilenameMapping, dry_run: bool) -> Result<usize, RewriteError> {
    let content = std::fs::read_to_string(path)?;
    let (rewritten, replacements) = rewrite_content(&content, mapping);
    if replacements > 0 && !dry_run {
        std::fs::write(path, rewritten)?;
    }
    Ok(replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn mapping(pairs: &[(&str, &str)]) -> FilenameMapping {
        pairs
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect()
    }

    #[test]
    fn replaces_literal_and_url_encoded_references() {
        let m = mapping(&[("My Photo.png", "my-photo.webp")]);
        let content = r#"<img src="/assets/My Photo.png"> and url('/assets/My%20Photo.png')"#;
        let (rewritten, count) = rewrite_content(content, &m);
        assert_eq!(count, 2);
        assert_eq!(
            rewritten,
            r#"<img src="/assets/my-photo.webp"> and url('/assets/my-photo.webp')"#
        );
    }

    #[test]
    fn counts_every_occurrence() {
        let m = mapping(&[("a.png", "a.webp")]);
        let (rewritten, count) = rewrite_content("a.png a.png a.png", &m);
        assert_eq!(count, 3);
        assert_eq!(rewritten, "a.webp a.webp a.webp");
    }

    #[test]
    fn untouched_content_reports_zero() {
        let m = mapping(&[("gone.png", "gone.webp")]);
        let (rewritten, count) = rewrite_content("nothing relevant here", &m);
        assert_eq!(count, 0);
        assert_eq!(rewritten, "nothing relevant here");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let m = mapping(&[("Old Name.jpg", "old-name.webp")]);
        let (once, first) = rewrite_content("src=\"Old Name.jpg\"", &m);
        let (twice, second) = rewrite_content(&once, &m);
        assert!(first > 0);
        assert_eq!(second, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn only_changed_files_are_written() {
        let tmp = TempDir::new().unwrap();
        let touched = tmp.path().join("page.tsx");
        let untouched = tmp.path().join("other.tsx");
        std::fs::write(&touched, "import hero from './Hero Shot.png';").unwrap();
        std::fs::write(&untouched, "no references").unwrap();
        let untouched_mtime = std::fs::metadata(&untouched).unwrap().modified().unwrap();

        let m = mapping(&[("Hero Shot.png", "hero-shot.webp")]);
        let report =
            update_source_references(&[touched.clone(), untouched.clone()], &m, false);
        assert_eq!(report.files_modified, 1);
        assert_eq!(report.total_replacements, 1);
        assert_eq!(
            std::fs::read_to_string(&touched).unwrap(),
            "import hero from './hero-shot.webp';"
        );
        assert_eq!(
            std::fs::metadata(&untouched).unwrap().modified().unwrap(),
            untouched_mtime
        );
    }

    #[test]
    fn dry_run_counts_without_writing() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("page.tsx");
        std::fs::write(&file, "src=\"cover.png\"").unwrap();

        let m = mapping(&[("cover.png", "cover.webp")]);
        let report = update_source_references(&[file.clone()], &m, true);
        assert_eq!(report.files_modified, 1);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "src=\"cover.png\"");
    }

    #[test]
    fn empty_mapping_short_circuits() {
        let report = update_source_references(&[PathBuf::from("/nonexistent")], &BTreeMap::new(), false);
        assert_eq!(report.files_modified, 0);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn unreadable_file_is_counted_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("ok.tsx");
        std::fs::write(&good, "x.png").unwrap();
        let missing = tmp.path().join("missing.tsx");

        let m = mapping(&[("x.png", "x.webp")]);
        let report = update_source_references(&[missing, good], &m, false);
        assert_eq!(report.failed, 1);
        assert_eq!(report.files_modified, 1);
    }
}
