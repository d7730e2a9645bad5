//! Asset and source-file discovery.
//!
//! Two walks feed the image pipeline:
//!
//! - [`find_images`] collects renameable/convertible raster assets from the
//!   configured image roots (recursively, deduplicated, sorted).
//! - [`find_source_files`] collects the project source files whose asset
//!   references may need rewriting after a rename pass.
//!
//! A missing image root is a warning, not an error: partially-populated
//! projects are common and the rest of the run proceeds.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Raster formats the pipeline handles. WebP files are rename candidates
/// but never converted again.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Source formats scanned for asset references.
pub const SOURCE_EXTENSIONS: &[&str] =
    &["tsx", "ts", "jsx", "js", "json", "css", "scss", "md"];

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.contains(&ext.as_str())
        })
}

/// Recursively collect image files under each root. Roots that do not exist
/// are reported and skipped; the result is sorted and free of duplicates even
/// when roots nest.
pub fn find_images(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for root in roots {
        if !root.is_dir() {
            println!("Warning: directory not found: {}", root.display());
            continue;
        }
        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file() && has_extension(entry.path(), IMAGE_EXTENSIONS) {
                found.insert(entry.path().to_path_buf());
            }
        }
    }
    found.into_iter().collect()
}

/// Collect source files under `root`, pruning excluded directories. Plain
/// exclusion entries match a directory name anywhere in the tree; entries
/// containing `/` match one directory by its path relative to `root`.
pub fn find_source_files(root: &Path, excluded_dirs: &[String]) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, root, excluded_dirs))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), SOURCE_EXTENSIONS))
        .map(|entry| entry.into_path())
        .collect();
    found.sort();
    found
}

fn is_excluded_dir(entry: &walkdir::DirEntry, root: &Path, excluded_dirs: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    excluded_dirs.iter().any(|excluded| {
        if excluded.contains('/') {
            entry
                .path()
                .strip_prefix(root)
                .is_ok_and(|rel| rel == Path::new(excluded))
        } else {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name == excluded)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn finds_images_recursively_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("images");
        touch(&root.join("b.png"));
        touch(&root.join("a.jpg"));
        touch(&root.join("nested/deep/c.gif"));
        touch(&root.join("notes.txt"));

        let images = find_images(&[root.clone()]);
        assert_eq!(
            images,
            vec![
                root.join("a.jpg"),
                root.join("b.png"),
                root.join("nested/deep/c.gif"),
            ]
        );
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        touch(&root.join("UPPER.JPG"));
        touch(&root.join("mixed.PnG"));
        assert_eq!(find_images(&[root]).len(), 2);
    }

    #[test]
    fn missing_root_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present");
        touch(&present.join("a.jpg"));
        let images = find_images(&[tmp.path().join("absent"), present.clone()]);
        assert_eq!(images, vec![present.join("a.jpg")]);
    }

    #[test]
    fn nested_roots_do_not_duplicate() {
        let tmp = TempDir::new().unwrap();
        let outer = tmp.path().join("images");
        let inner = outer.join("brands");
        touch(&inner.join("logo.png"));
        let images = find_images(&[outer, inner.clone()]);
        assert_eq!(images, vec![inner.join("logo.png")]);
    }

    #[test]
    fn source_files_respect_exclusions() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        touch(&root.join("app/page.tsx"));
        touch(&root.join("styles/site.css"));
        touch(&root.join("node_modules/pkg/index.js"));
        touch(&root.join("public/assets/data.json"));
        touch(&root.join("public/assets/config/favicon-meta.json"));
        touch(&root.join("README.md"));
        touch(&root.join("image.png"));

        let excluded = vec!["node_modules".to_string(), "public/assets/config".to_string()];
        let files = find_source_files(&root, &excluded);
        assert_eq!(
            files,
            vec![
                root.join("README.md"),
                root.join("app/page.tsx"),
                root.join("public/assets/data.json"),
                root.join("styles/site.css"),
            ]
        );
    }

    #[test]
    fn path_exclusions_are_anchored_to_the_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        touch(&root.join("public/assets/config/site.json"));
        touch(&root.join("vendored/public/assets/config/site.json"));

        let excluded = vec!["public/assets/config".to_string()];
        let files = find_source_files(&root, &excluded);
        assert_eq!(files, vec![root.join("vendored/public/assets/config/site.json")]);
    }

    #[test]
    fn exclusion_matches_directory_names_anywhere() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        touch(&root.join("src/vendor/dist/bundle.js"));
        let files = find_source_files(&root, &["dist".to_string()]);
        assert!(files.is_empty());
    }
}
