//! Image rename and WebP conversion pipeline.
//!
//! For every discovered image the pipeline:
//!
//! 1. Renames the file to its sanitized slug (see [`crate::naming`]),
//!    refusing to overwrite an unrelated file that already owns the target
//!    name.
//! 2. Converts JPEG/PNG/GIF payloads to lossy WebP at the configured quality,
//!    preserving alpha when the source has it. A pre-existing `.webp` sibling
//!    means someone already converted this asset, so the step is skipped.
//! 3. Records `old basename -> final basename` in the mapping consumed by the
//!    reference rewriter, but only when the name actually changed.
//!
//! Faults are isolated per asset: a truncated JPEG fails that one file,
//! increments the failure count, and the run continues. Re-running over an
//! already-clean tree renames nothing, converts nothing, and yields an empty
//! mapping.

use crate::config::ImageConfig;
use crate::naming::sanitize_filename;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("WebP encoding failed: {0}")]
    WebpEncode(String),
    #[error("invalid file name: {0}")]
    InvalidName(PathBuf),
}

/// `old basename -> final basename`, populated only for files whose on-disk
/// name changed.
pub type FilenameMapping = BTreeMap<String, String>;

/// Per-run pipeline statistics.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub renamed: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Positive when WebP output is smaller than the source.
    pub bytes_saved: i64,
    pub mapping: FilenameMapping,
}

/// Run the rename/convert pipeline over `images`.
pub fn process_images(images: &[PathBuf], config: &ImageConfig) -> ProcessReport {
    let mut report = ProcessReport::default();
    let total = images.len();

    for (index, path) in images.iter().enumerate() {
        let position = format!("[{}/{}]", index + 1, total);
        if let Err(e) = process_one(&position, path, config, &mut report) {
            eprintln!("{position} Error processing {}: {e}", path.display());
            report.failed += 1;
        }
    }

    report
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|n| n.to_str()).map(str::to_string)
}

fn is_webp(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("webp"))
}

/// Process a single image, updating counts and the mapping as each step
/// lands. Rename bookkeeping happens before conversion is attempted, so a
/// conversion failure still leaves the rename recorded and its references
/// rewritable.
fn process_one(
    position: &str,
    path: &Path,
    config: &ImageConfig,
    report: &mut ProcessReport,
) -> Result<(), ProcessError> {
    let name = file_name(path).ok_or_else(|| ProcessError::InvalidName(path.to_path_buf()))?;
    let sanitized = sanitize_filename(&name);
    let needs_rename = sanitized != name;
    let needs_convert = config.convert_to_webp && !is_webp(path);

    if !needs_rename && !needs_convert {
        println!("{position} Skipped (already clean): {name}");
        report.skipped += 1;
        return Ok(());
    }

    let parent = path.parent().ok_or_else(|| ProcessError::InvalidName(path.to_path_buf()))?;

    let mut current = path.to_path_buf();
    if needs_rename {
        let target = parent.join(&sanitized);
        // The target can be the source itself under another spelling on a
        // case-insensitive filesystem; only a different file is a collision.
        if target.exists() && target != *path {
            println!("{position} Target exists, skipping rename: {name} -> {sanitized}");
            report.skipped += 1;
            return Ok(());
        }
        if !config.dry_run {
            std::fs::rename(&current, &target)?;
        }
        println!("{position} Renamed: {name} -> {sanitized}");
        current = target;
        report.renamed += 1;
        report.mapping.insert(name.clone(), sanitized.clone());
    }

    if needs_convert {
        let webp_path = current.with_extension("webp");
        let webp_name = file_name(&webp_path).unwrap_or_default();
        if webp_path.exists() {
            println!("WebP already exists, skipping conversion: {}", webp_path.display());
        } else if config.dry_run {
            report.converted += 1;
            report.mapping.insert(name, webp_name);
        } else {
            let original_size = std::fs::metadata(&current)?.len() as i64;
            encode_webp(&current, &webp_path, config.quality)?;
            let webp_size = std::fs::metadata(&webp_path)?.len() as i64;
            report.bytes_saved += original_size - webp_size;
            let savings = if original_size > 0 {
                (original_size - webp_size) as f64 / original_size as f64 * 100.0
            } else {
                0.0
            };
            println!(
                "{position} Converted to WebP: {webp_name} ({:.1}KB -> {:.1}KB, saved {savings:.1}%)",
                original_size as f64 / 1024.0,
                webp_size as f64 / 1024.0,
            );
            report.converted += 1;
            if config.delete_original {
                std::fs::remove_file(&current)?;
            }
            report.mapping.insert(name, webp_name);
        }
    }

    Ok(())
}

/// Decode `source`, normalize its color model, and write lossy WebP to
/// `target`. Paletted and grayscale inputs are expanded; alpha survives.
fn encode_webp(source: &Path, target: &Path, quality: u8) -> Result<(), ProcessError> {
    let decoded = image::open(source)?;
    let encoded = if decoded.color().has_alpha() {
        let rgba = decoded.to_rgba8();
        webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height()).encode(quality as f32)
    } else {
        let rgb = decoded.to_rgb8();
        webp::Encoder::from_rgb(&rgb, rgb.width(), rgb.height()).encode(quality as f32)
    };
    if encoded.is_empty() {
        return Err(ProcessError::WebpEncode(format!(
            "encoder produced no output for {}",
            source.display()
        )));
    }
    std::fs::write(target, &*encoded)?;
    Ok(())
}
