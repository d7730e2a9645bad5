//! # Bizgen
//!
//! A site content generator for small-business web projects. One YAML
//! document — the business document — is the single source of truth for
//! business facts (name, services, locations, contact details), and every
//! derived artifact is regenerated from it rather than edited by hand.
//!
//! # Architecture: Two Pipelines
//!
//! ```text
//! 1. Generate   business.yaml + templates/  →  rules, JSON data, config modules
//! 2. Images     asset directories           →  slug renames + WebP + reference rewrites
//! ```
//!
//! The generate pipeline substitutes `{{PLACEHOLDER}}` tokens in template
//! files and emits derived data files (FAQ, portfolio, services, manifest)
//! plus a typed configuration module. The image pipeline normalizes asset
//! filenames, transcodes raster images to WebP, and rewrites every reference
//! to a renamed asset across the source tree. Both pipelines are idempotent:
//! running them twice on unchanged inputs changes nothing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | Business document loading and dotted-path lookup |
//! | [`defaults`] | Derived-default placeholder values computed from document facts |
//! | [`render`] | Placeholder-name-driven rendering of YAML values to text |
//! | [`template`] | `{{PLACEHOLDER}}` substitution engine over `*.template` files |
//! | [`emit`] | Derived data-file emitters and the config-block patcher |
//! | [`naming`] | Web-safe filename slug normalization |
//! | [`assets`] | Image and source-file discovery |
//! | [`process`] | Asset rename + WebP conversion pipeline |
//! | [`rewrite`] | Reference rewriting in source files after renames |
//! | [`config`] | Run configuration for both pipelines |
//!
//! # Design Decisions
//!
//! ## Placeholder Names Drive Rendering
//!
//! How a YAML value renders depends on the placeholder it fills, not on the
//! value alone: a list becomes a JSON array under an `*_ARRAY` name, a
//! markdown bullet list under `*_MD`, and a comma-joined string elsewhere.
//! The mapping lives in one place ([`render::RenderHint::for_placeholder`])
//! so template authors can predict output from the name.
//!
//! ## Lossy WebP via a Dedicated Encoder
//!
//! Decoding and color-model normalization use the `image` crate; encoding
//! goes through `webp`, because the `image` crate's WebP encoder is
//! lossless-only and the pipeline wants a quality knob.
//!
//! ## Fault Isolation Per Item
//!
//! One broken template or truncated JPEG never aborts a run. Each item is
//! processed independently, failures are printed and counted, and the exit
//! summary reports how many items succeeded, were skipped, and failed.

pub mod assets;
pub mod config;
pub mod defaults;
pub mod document;
pub mod emit;
pub mod naming;
pub mod process;
pub mod render;
pub mod rewrite;
pub mod template;
