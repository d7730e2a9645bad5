//! Business document loading and nested key lookup.
//!
//! The business document is a single YAML file describing the operator:
//! scalar facts (`BUSINESS_NAME`, `WEBSITE_URL`, `TAGLINE`), nested maps
//! (`CONTACT`, `HOURS`, `SOCIAL_MEDIA`), and ordered lists of structured
//! records (`SERVICES` with optional `SUB_SERVICES`, `LOCATIONS` with
//! `CITY`/`STATE`, `BLOG_TOPICS`).
//!
//! It is loaded once at process start and treated as read-only for the
//! whole run. Absence of a key is never an error — every consumer supplies
//! a default, so lookups return `Option` and the document is never
//! schema-validated beyond that.
//!
//! `serde_yaml::Value` already is the tagged scalar/list/map sum type the
//! rest of the crate pattern-matches on, so no intermediate model exists.

use serde_yaml::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Business document not found: {0}")]
    NotFound(String),
    #[error("Failed to parse business document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the business document. Missing or unparsable input is fatal — this
/// is the only unrecoverable error in the whole run.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Resolve a dotted key path (`CONTACT.PHONE`) by descending the document
/// one segment at a time.
///
/// Returns `None` the moment a segment is missing or the current value is
/// not a mapping.
pub fn resolve<'a>(document: &'a Value, dotted_key: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in dotted_key.split('.') {
        current = current.as_mapping()?.get(Value::from(segment))?;
    }
    Some(current)
}

/// Like [`resolve`], but retries the *last* segment in lower-case against
/// the parent mapping before giving up.
///
/// Documents in the wild mix key conventions at the leaf level only
/// (`CONTACT.PHONE` vs `CONTACT.phone`); intermediate segments are always
/// uppercase, so the fallback applies to the leaf alone.
pub fn resolve_with_fallback<'a>(document: &'a Value, dotted_key: &str) -> Option<&'a Value> {
    if let Some(value) = resolve(document, dotted_key) {
        return Some(value);
    }
    let (parent_path, leaf) = dotted_key.rsplit_once('.')?;
    let parent = resolve(document, parent_path)?;
    parent.as_mapping()?.get(Value::from(leaf.to_lowercase()))
}

/// Direct lookup of a top-level key.
pub fn get<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    document.as_mapping()?.get(Value::from(key))
}

/// Top-level string lookup with a default for absent or non-string values.
pub fn get_str(document: &Value, key: &str, default: &str) -> String {
    get(document, key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn resolve_single_segment() {
        let d = doc("BUSINESS_NAME: Acme");
        assert_eq!(resolve(&d, "BUSINESS_NAME").unwrap().as_str(), Some("Acme"));
    }

    #[test]
    fn resolve_nested_path() {
        let d = doc("CONTACT:\n  PHONE: '555-0100'\n  EMAIL: a@b.c");
        assert_eq!(
            resolve(&d, "CONTACT.PHONE").unwrap().as_str(),
            Some("555-0100")
        );
    }

    #[test]
    fn resolve_matches_manual_descent() {
        let d = doc("A:\n  B:\n    C: deep");
        let manual = d
            .as_mapping()
            .unwrap()
            .get(Value::from("A"))
            .unwrap()
            .as_mapping()
            .unwrap()
            .get(Value::from("B"))
            .unwrap();
        assert_eq!(resolve(&d, "A.B"), Some(manual));
        assert_eq!(resolve(&d, "A.B.C").unwrap().as_str(), Some("deep"));
    }

    #[test]
    fn resolve_absent_segment_is_none() {
        let d = doc("CONTACT:\n  PHONE: '555-0100'");
        assert!(resolve(&d, "CONTACT.FAX").is_none());
        assert!(resolve(&d, "MISSING.PHONE").is_none());
    }

    #[test]
    fn resolve_through_non_mapping_is_none() {
        let d = doc("CONTACT: just a string");
        assert!(resolve(&d, "CONTACT.PHONE").is_none());
    }

    #[test]
    fn fallback_retries_lowercase_leaf() {
        let d = doc("CONTACT:\n  phone: '555-0100'");
        assert!(resolve(&d, "CONTACT.PHONE").is_none());
        assert_eq!(
            resolve_with_fallback(&d, "CONTACT.PHONE").unwrap().as_str(),
            Some("555-0100")
        );
    }

    #[test]
    fn fallback_does_not_apply_to_intermediate_segments() {
        let d = doc("contact:\n  PHONE: '555-0100'");
        assert!(resolve_with_fallback(&d, "CONTACT.PHONE").is_none());
    }

    #[test]
    fn fallback_prefers_exact_match() {
        let d = doc("CONTACT:\n  PHONE: upper\n  phone: lower");
        assert_eq!(
            resolve_with_fallback(&d, "CONTACT.PHONE").unwrap().as_str(),
            Some("upper")
        );
    }

    #[test]
    fn get_str_supplies_default() {
        let d = doc("BUSINESS_NAME: Acme");
        assert_eq!(get_str(&d, "TAGLINE", "fallback"), "fallback");
        assert_eq!(get_str(&d, "BUSINESS_NAME", "x"), "Acme");
    }

    #[test]
    fn load_missing_document_is_fatal() {
        let err = load_document(Path::new("/nonexistent/business.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[test]
    fn load_unparsable_document_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("business.yaml");
        std::fs::write(&path, "KEY: [unclosed").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}
