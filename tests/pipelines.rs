//! End-to-end test of both pipelines against a miniature project tree.
//!
//! Builds a temp directory with a business document, templates, an
//! seo-config module, source files, and real PNG assets, then runs the
//! generate pipeline and the image pipeline the way the CLI wires them up.

use bizgen::config::{GenerateConfig, ImageConfig};
use bizgen::{assets, document, emit, process, rewrite, template};
use image::{Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

const BUSINESS_YAML: &str = r#"
BUSINESS_NAME: High Desert Landscaping
WEBSITE_URL: https://highdesert.example
PRIMARY_KEYWORD: Landscaping
CATEGORIES:
  PRIMARY: Landscaping Company
  SECONDARY:
    - Lawn Care
LOCATIONS:
  - CITY: Reno
    STATE: NV
  - CITY: Sparks
    STATE: NV
CORE_SERVICES:
  - Lawn Care
  - Irrigation
SERVICES:
  - NAME: Lawn Care
    URL: /lawn-care/
  - NAME: Irrigation
    URL: /irrigation/
CONTACT:
  PHONE: 555-0100
  EMAIL: info@highdesert.example
  CITY: Reno
  STATE: NV
HOURS:
  MONDAY: "08:00 - 17:00"
BLOG_TOPICS:
  - Lawn Tips
META:
  title: High Desert Landscaping
  description: Landscaping in Reno
  keywords: landscaping, reno
"#;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project(tmp: &TempDir) -> (GenerateConfig, ImageConfig) {
    let root = tmp.path();
    write(&root.join("business.yaml"), BUSINESS_YAML);
    write(
        &root.join("templates/seo.mdc.template"),
        "# SEO rules for {{BUSINESS_NAME}}\n\nServe {{LOCATIONS_MD}}\nCall to action: {{CTA_TEXT}}\n",
    );
    write(
        &root.join("templates/site.json.template"),
        "{\n  \"name\": \"{{BUSINESS_NAME}}\",\n  \"keyword\": \"{{PRIMARY_KEYWORD}}\"\n}\n",
    );
    write(
        &root.join("lib/seo-config.ts"),
        "import { BUSINESS_INFO } from './business-config';\n\nexport const siteConfig: SiteConfig = {\n  name: \"stale\",\n};\n\nexport const other = { keep: true };\n",
    );
    write(
        &root.join("app/page.tsx"),
        "<img src=\"/assets/images/Hero Shot.png\" alt=\"hero\" />\n<img src=\"/assets/images/Hero%20Shot.png\" />\n",
    );

    let hero = root.join("public/assets/images/Hero Shot.png");
    std::fs::create_dir_all(hero.parent().unwrap()).unwrap();
    RgbImage::from_pixel(16, 16, Rgb([30, 120, 60])).save(&hero).unwrap();

    let generate_config = GenerateConfig {
        business_file: root.join("business.yaml"),
        templates_dir: root.join("templates"),
        rules_dir: root.join(".cursor/rules"),
        data_dir: root.join("data"),
        lib_dir: root.join("lib"),
        public_dir: root.join("public"),
    };
    let image_config = ImageConfig {
        image_roots: vec![root.join("public/assets/images")],
        source_root: root.to_path_buf(),
        ..ImageConfig::default()
    };
    (generate_config, image_config)
}

fn run_generate(config: &GenerateConfig) -> (usize, usize) {
    let business = document::load_document(&config.business_file).unwrap();
    let engine = template::TemplateEngine::new(&business);
    let template_report = engine.run(config).unwrap();
    let emit_report = emit::emit_all(&business, config);
    (template_report.processed, emit_report.generated)
}

fn run_images(config: &ImageConfig) -> (process::ProcessReport, rewrite::RewriteReport) {
    let images = assets::find_images(&config.image_roots);
    let report = process::process_images(&images, config);
    let sources = assets::find_source_files(&config.source_root, &config.excluded_dirs);
    let rewrite_report = rewrite::update_source_references(&sources, &report.mapping, config.dry_run);
    (report, rewrite_report)
}

#[test]
fn generate_pipeline_produces_all_artifacts() {
    let tmp = TempDir::new().unwrap();
    let (generate_config, _) = project(&tmp);

    let (templates, emitted) = run_generate(&generate_config);
    assert_eq!(templates, 2);
    assert_eq!(emitted, 6);

    let rules = std::fs::read_to_string(tmp.path().join(".cursor/rules/seo.mdc")).unwrap();
    assert!(rules.contains("# SEO rules for High Desert Landscaping"));
    assert!(rules.contains("- Reno-NV"));
    assert!(rules.contains("- Sparks-NV"));
    // CTA_TEXT has no direct entry and falls back to the derived default.
    assert!(rules.contains("Contact us today for a free consultation!"));

    let site: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(tmp.path().join("public/site.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(site["name"], "High Desert Landscaping");

    let faq: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(tmp.path().join("data/faq.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(faq["faqs"].as_array().unwrap().len(), 6);

    let business_config =
        std::fs::read_to_string(tmp.path().join("lib/business-config.ts")).unwrap();
    assert!(business_config.contains("name: \"High Desert Landscaping\""));

    let seo = std::fs::read_to_string(tmp.path().join("lib/seo-config.ts")).unwrap();
    assert!(seo.contains("import { BUSINESS_INFO } from './business-config';"));
    assert!(seo.contains("businessHours: BUSINESS_HOURS_SCHEMA"));
    assert!(seo.contains("export const other = { keep: true };"));
    assert!(!seo.contains("\"stale\""));
}

#[test]
fn generate_pipeline_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let (generate_config, _) = project(&tmp);

    run_generate(&generate_config);
    let first = std::fs::read(tmp.path().join(".cursor/rules/seo.mdc")).unwrap();
    let first_config = std::fs::read(tmp.path().join("lib/business-config.ts")).unwrap();
    run_generate(&generate_config);
    assert_eq!(std::fs::read(tmp.path().join(".cursor/rules/seo.mdc")).unwrap(), first);
    assert_eq!(
        std::fs::read(tmp.path().join("lib/business-config.ts")).unwrap(),
        first_config
    );
}

#[test]
fn image_pipeline_renames_converts_and_rewrites() {
    let tmp = TempDir::new().unwrap();
    let (_, image_config) = project(&tmp);

    let (report, rewrite_report) = run_images(&image_config);
    assert_eq!(report.renamed, 1);
    assert_eq!(report.converted, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(
        report.mapping.get("Hero Shot.png").map(String::as_str),
        Some("hero-shot.webp")
    );

    let images_dir = tmp.path().join("public/assets/images");
    assert!(images_dir.join("hero-shot.webp").exists());
    assert!(!images_dir.join("Hero Shot.png").exists());
    assert!(!images_dir.join("hero-shot.png").exists());

    // Both the literal and the %20-encoded reference are rewritten.
    assert_eq!(rewrite_report.total_replacements, 2);
    let page = std::fs::read_to_string(tmp.path().join("app/page.tsx")).unwrap();
    assert!(page.contains("/assets/images/hero-shot.webp"));
    assert!(!page.contains("Hero"));
}

#[test]
fn image_pipeline_second_run_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let (_, image_config) = project(&tmp);

    run_images(&image_config);
    let page_before = std::fs::read(tmp.path().join("app/page.tsx")).unwrap();
    let (report, rewrite_report) = run_images(&image_config);
    assert_eq!(report.renamed, 0);
    assert_eq!(report.converted, 0);
    assert_eq!(report.skipped, 1);
    assert!(report.mapping.is_empty());
    assert_eq!(rewrite_report.files_modified, 0);
    assert_eq!(std::fs::read(tmp.path().join("app/page.tsx")).unwrap(), page_before);
}

#[test]
fn dry_run_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let (_, mut image_config) = project(&tmp);
    image_config.dry_run = true;

    let (report, rewrite_report) = run_images(&image_config);
    assert_eq!(report.renamed, 1);
    assert_eq!(report.converted, 1);
    assert!(tmp.path().join("public/assets/images/Hero Shot.png").exists());
    assert!(!tmp.path().join("public/assets/images/hero-shot.webp").exists());
    assert_eq!(rewrite_report.files_modified, 1);
    let page = std::fs::read_to_string(tmp.path().join("app/page.tsx")).unwrap();
    assert!(page.contains("Hero Shot.png"));
}
