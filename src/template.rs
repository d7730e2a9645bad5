//! Template rendering: placeholder substitution and fixed text transforms.
//!
//! Each `*.template` file in the templates directory goes through the same
//! pipeline:
//!
//! 1. **Scan** — collect the distinct `{{PLACEHOLDER}}` tokens.
//! 2. **Resolve** — numbered `EXAMPLE_1..EXAMPLE_4` tokens come from the
//!    document's `EXAMPLES` list; dotted names go through nested lookup
//!    (with a lower-case-leaf retry); plain names try the document first,
//!    then the derived-defaults table. An unresolvable token renders as an
//!    empty string with a warning — resolution never aborts a file.
//! 3. **Transform** — `<a href=...>` anchors become `<Link>` components in
//!    every template; rule templates additionally get prose apostrophes
//!    escaped to `&apos;`, with HTML-tag, brace, and bracket spans left
//!    untouched so embedded JSX and JSON survive.
//! 4. **Write** — the template's own suffix picks the destination:
//!    `.mdc.template` → rules dir as `.mdc`, `.json.template` → public dir
//!    as `.json` (validated as JSON after writing, failure reported but the
//!    file stays), anything else → rules dir as `.mdc`.
//!
//! Rendering is one-shot: resolving a token twice yields the same text, but
//! the output files carry no re-entrant markers, so this is a generator,
//! not a re-runnable templating system.

use crate::config::GenerateConfig;
use crate::defaults::derived_defaults;
use crate::document::{get, resolve_with_fallback};
use crate::render::{self, RenderHint, render_supporting_topics, scalar_string};
use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Templates folder not found: {0}")]
    MissingTemplatesDir(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern"));

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s+([^>]*?)href=["']([^"']*)["']([^>]*?)>([^<]*)</a>"#)
        .expect("anchor pattern")
});

/// Spans protected from prose transforms: HTML-tag-like, brace-delimited,
/// and bracket-delimited.
static PROTECTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>|\{[^}]*\}|\[[^\]]*\]").expect("protected span pattern"));

/// Per-run template statistics.
#[derive(Debug, Default)]
pub struct TemplateReport {
    pub processed: usize,
    pub failed: usize,
}

/// Resolves placeholders against one loaded business document.
///
/// The derived-defaults table is computed once at construction and shared
/// across all templates in the run.
pub struct TemplateEngine<'a> {
    document: &'a Value,
    defaults: std::collections::BTreeMap<String, Value>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self {
            defaults: derived_defaults(document),
            document,
        }
    }

    /// Process every `*.template` file in the configured templates
    /// directory. A missing directory aborts the template stage; per-file
    /// errors are reported and counted, never propagated.
    pub fn run(&self, config: &GenerateConfig) -> Result<TemplateReport, TemplateError> {
        if !config.templates_dir.exists() {
            return Err(TemplateError::MissingTemplatesDir(
                config.templates_dir.clone(),
            ));
        }
        std::fs::create_dir_all(&config.rules_dir)?;
        std::fs::create_dir_all(&config.public_dir)?;

        let mut report = TemplateReport::default();
        let mut entries: Vec<PathBuf> = std::fs::read_dir(&config.templates_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .is_some_and(|n| n.to_string_lossy().ends_with(".template"))
            })
            .collect();
        entries.sort();

        for template_path in &entries {
            let file_name = template_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            println!("Processing: {file_name}");
            match self.process_one(&file_name, template_path, config) {
                Ok(output_path) => {
                    println!("Generated: {}", output_path.display());
                    report.processed += 1;
                }
                Err(e) => {
                    eprintln!("Error processing {file_name}: {e}");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    fn process_one(
        &self,
        file_name: &str,
        template_path: &std::path::Path,
        config: &GenerateConfig,
    ) -> Result<PathBuf, TemplateError> {
        let body = std::fs::read_to_string(template_path)?;
        let mut output = self.resolve_body(&body);
        output = rewrite_anchors(&output);
        if file_name.ends_with(".mdc.template") {
            output = escape_apostrophes(&output);
        }

        let output_path = route_output(file_name, config);
        std::fs::write(&output_path, &output)?;

        if output_path.extension().is_some_and(|e| e == "json")
            && let Err(e) = serde_json::from_str::<serde_json::Value>(&output)
        {
            eprintln!(
                "Warning: {} is not valid JSON: {e}",
                output_path.display()
            );
        }
        Ok(output_path)
    }

    /// Scan a template body and substitute every placeholder token.
    pub fn resolve_body(&self, body: &str) -> String {
        let tokens: BTreeSet<String> = PLACEHOLDER
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect();

        let mut output = body.to_string();
        for token in &tokens {
            let rendered = self.resolve_token(token);
            output = output.replace(&format!("{{{{{token}}}}}"), &rendered);
        }
        output
    }

    /// Resolve one token to its rendered text. Idempotent and independent
    /// of any other token's resolution.
    fn resolve_token(&self, token: &str) -> String {
        if let Some(text) = self.resolve_example(token) {
            return text;
        }

        let hint = RenderHint::for_placeholder(token);
        let value = if token.contains('.') {
            resolve_with_fallback(self.document, token)
        } else {
            get(self.document, token).or_else(|| self.defaults.get(token))
        };
        if let Some(value) = value {
            return render::render(value, hint);
        }

        // Synthetic two-level markdown for the supporting-topics map.
        if token == "SUPPORTING_TOPICS_MD"
            && let Some(topics) = get(self.document, "SUPPORTING_TOPICS")
        {
            return render_supporting_topics(topics);
        }

        eprintln!("Warning: placeholder '{token}' not found in business data");
        String::new()
    }

    /// `EXAMPLE_1..EXAMPLE_4` index into the document's ordered `EXAMPLES`
    /// list, defaulting to empty when the index exceeds its length.
    fn resolve_example(&self, token: &str) -> Option<String> {
        let index: usize = token.strip_prefix("EXAMPLE_")?.parse().ok()?;
        if !(1..=4).contains(&index) {
            return None;
        }
        let text = get(self.document, "EXAMPLES")
            .and_then(Value::as_sequence)
            .and_then(|examples| examples.get(index - 1))
            .map(scalar_string)
            .unwrap_or_default();
        Some(text)
    }
}

/// Rewrite every `<a ... href="...">text</a>` into the framework's `<Link>`
/// component, preserving other attributes and inner text. Case-insensitive,
/// matches across lines.
pub fn rewrite_anchors(content: &str) -> String {
    ANCHOR
        .replace_all(content, r#"<Link href="$2" $1$3>$4</Link>"#)
        .into_owned()
}

/// Escape prose apostrophes to `&apos;` without corrupting embedded markup.
///
/// The body is tokenized into protected spans (HTML-tag-like, brace- and
/// bracket-delimited) and plain text; only the plain segments are
/// transformed, then the segments are reassembled in order. No masking
/// sentinels exist, so no sentinel can ever collide with real content.
pub fn escape_apostrophes(content: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    for span in PROTECTED_SPAN.find_iter(content) {
        output.push_str(&content[last..span.start()].replace('\'', "&apos;"));
        output.push_str(span.as_str());
        last = span.end();
    }
    output.push_str(&content[last..].replace('\'', "&apos;"));
    output
}

/// Map a template file name to its destination path and extension.
pub fn route_output(file_name: &str, config: &GenerateConfig) -> PathBuf {
    if let Some(stem) = file_name.strip_suffix(".mdc.template") {
        config.rules_dir.join(format!("{stem}.mdc"))
    } else if let Some(stem) = file_name.strip_suffix(".json.template") {
        config.public_dir.join(format!("{stem}.json"))
    } else {
        let stem = file_name.strip_suffix(".template").unwrap_or(file_name);
        config.rules_dir.join(format!("{stem}.mdc"))
    }
}
