//! Run configuration.
//!
//! The original workflow drove everything from constants at the top of a
//! script. Here the knobs live in two explicit structs constructed once at
//! process start and passed into each stage — no hidden global state:
//!
//! - [`GenerateConfig`]: where the business document, templates, and
//!   generated artifacts live.
//! - [`ImageConfig`]: which directories hold image assets, where source
//!   files are scanned for references, and how conversion behaves.
//!
//! All fields have defaults matching the stock project layout:
//!
//! ```text
//! business.yaml                # The business document
//! templates/                   # *.template inputs
//! .cursor/rules/               # .mdc outputs
//! data/                        # Derived JSON data files
//! lib/                         # Generated/patched config modules
//! public/                      # Web manifest + JSON template outputs
//! public/assets/images/        # Image asset roots (plus subdirectories)
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Paths for the generate stage (templates + data file emitters).
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// The business document (YAML).
    pub business_file: PathBuf,
    /// Directory containing `*.template` inputs.
    pub templates_dir: PathBuf,
    /// Output directory for `.mdc` rule files.
    pub rules_dir: PathBuf,
    /// Output directory for derived JSON data files.
    pub data_dir: PathBuf,
    /// Directory holding the generated and patched config modules.
    pub lib_dir: PathBuf,
    /// Output directory for the web manifest and `.json` template outputs.
    pub public_dir: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            business_file: PathBuf::from("business.yaml"),
            templates_dir: PathBuf::from("templates"),
            rules_dir: PathBuf::from(".cursor/rules"),
            data_dir: PathBuf::from("data"),
            lib_dir: PathBuf::from("lib"),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Settings for the image asset pipeline (rename, convert, rewrite).
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Directories scanned for image assets (each scanned shallow + recursive).
    pub image_roots: Vec<PathBuf>,
    /// Root of the source tree scanned for references to renamed assets.
    pub source_root: PathBuf,
    /// Directories excluded from the source scan: plain names match any
    /// path component, entries containing `/` match a path relative to
    /// `source_root`.
    pub excluded_dirs: Vec<String>,
    /// WebP encoding quality (1-100).
    pub quality: u8,
    /// Whether to transcode assets to WebP at all.
    pub convert_to_webp: bool,
    /// Whether to delete the pre-conversion file after a successful encode.
    pub delete_original: bool,
    /// Whether to rewrite references in source files afterwards.
    pub update_references: bool,
    /// Report what would change without touching any file.
    pub dry_run: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            image_roots: vec![
                PathBuf::from("public/assets/images"),
                PathBuf::from("public/assets/images/brands"),
                PathBuf::from("public/assets/images/portfolio"),
                PathBuf::from("public/assets/images/services"),
            ],
            source_root: PathBuf::from("."),
            excluded_dirs: [
                "node_modules",
                ".next",
                ".git",
                "dist",
                "build",
                "out",
                "public/assets/config",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            quality: 85,
            convert_to_webp: true,
            delete_original: true,
            update_references: true,
            dry_run: false,
        }
    }
}

impl ImageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if self.image_roots.is_empty() {
            return Err(ConfigError::Validation(
                "at least one image root is required".into(),
            ));
        }
        Ok(())
    }
}
