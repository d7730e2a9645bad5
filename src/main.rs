use bizgen::{assets, config, document, emit, process, rewrite, template};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Shared flags for the image pipeline.
#[derive(clap::Args, Clone)]
struct ImageArgs {
    /// Directories scanned for image assets (repeatable)
    #[arg(long = "image-root")]
    image_roots: Vec<PathBuf>,

    /// Root of the source tree scanned for asset references
    #[arg(long, default_value = ".")]
    source_root: PathBuf,

    /// WebP encoding quality (1-100)
    #[arg(long, default_value_t = 85)]
    quality: u8,

    /// Rename only — keep original formats
    #[arg(long)]
    no_convert: bool,

    /// Keep the original file next to its WebP conversion
    #[arg(long)]
    keep_originals: bool,

    /// Skip rewriting references in source files
    #[arg(long)]
    no_update_references: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl ImageArgs {
    fn to_config(&self, dry_run: bool) -> config::ImageConfig {
        let mut image_config = config::ImageConfig {
            source_root: self.source_root.clone(),
            quality: self.quality,
            convert_to_webp: !self.no_convert,
            delete_original: !self.keep_originals,
            update_references: !self.no_update_references,
            dry_run,
            ..config::ImageConfig::default()
        };
        if !self.image_roots.is_empty() {
            image_config.image_roots = self.image_roots.clone();
        }
        image_config
    }
}

#[derive(Parser)]
#[command(name = "bizgen")]
#[command(about = "Business site content generator")]
#[command(long_about = "\
Business site content generator

One YAML document is the single source of truth for business facts. The
generate pipeline substitutes {{PLACEHOLDER}} tokens in template files and
emits derived data files and config modules; the image pipeline normalizes
asset filenames, converts images to WebP, and rewrites references.

Project layout:

  business.yaml                # The business document
  templates/                   # *.template inputs
  ├── seo.mdc.template         # → .cursor/rules/seo.mdc
  └── site.json.template       # → public/site.json
  .cursor/rules/               # Generated rule files
  data/                        # Generated JSON data files
  lib/                         # Generated/patched config modules
  public/assets/images/        # Image asset roots

Run without a subcommand for an interactive menu.")]
#[command(version)]
struct Cli {
    /// The business document
    #[arg(long, default_value = "business.yaml", global = true)]
    business_file: PathBuf,

    /// Directory containing *.template inputs
    #[arg(long, default_value = "templates", global = true)]
    templates_dir: PathBuf,

    /// Report what would change without touching any file
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render templates and emit derived data files from the business document
    Generate,
    /// Rename image assets, convert to WebP, and rewrite references
    Images(ImageArgs),
    /// Run both pipelines: generate, then images
    All(ImageArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let generate_config = config::GenerateConfig {
        business_file: cli.business_file.clone(),
        templates_dir: cli.templates_dir.clone(),
        ..config::GenerateConfig::default()
    };

    let code = match &cli.command {
        Some(Command::Generate) => run_generate(&generate_config),
        Some(Command::Images(args)) => run_images(&args.to_config(cli.dry_run), args.yes),
        Some(Command::All(args)) => {
            let code = run_generate(&generate_config);
            if code != 0 {
                code
            } else {
                run_images(&args.to_config(cli.dry_run), args.yes)
            }
        }
        None => run_menu(&cli, &generate_config),
    };
    ExitCode::from(code)
}

fn run_menu(cli: &Cli, generate_config: &config::GenerateConfig) -> u8 {
    println!("What would you like to do?");
    println!("  1. Generate site content from {}", cli.business_file.display());
    println!("  2. Process image assets (rename, convert, rewrite references)");
    println!("  3. Both");
    println!("  4. Exit");
    let Some(choice) = prompt("Choice [1-4]: ") else {
        return 1;
    };

    let image_args = ImageArgs {
        image_roots: vec![],
        source_root: PathBuf::from("."),
        quality: 85,
        no_convert: false,
        keep_originals: false,
        no_update_references: false,
        yes: false,
    };

    match choice.trim() {
        "1" => run_generate(generate_config),
        "2" => run_images(&image_args.to_config(cli.dry_run), false),
        "3" => {
            let code = run_generate(generate_config);
            if code != 0 {
                return code;
            }
            run_images(&image_args.to_config(cli.dry_run), false)
        }
        "4" => 0,
        other => {
            eprintln!("Invalid choice: {other}");
            1
        }
    }
}

fn run_generate(generate_config: &config::GenerateConfig) -> u8 {
    let business = match document::load_document(&generate_config.business_file) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    println!("==> Rendering templates from {}", generate_config.templates_dir.display());
    let engine = template::TemplateEngine::new(&business);
    let template_report = match engine.run(generate_config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    println!("==> Emitting derived data files");
    let emit_report = emit::emit_all(&business, generate_config);

    println!(
        "==> Generate complete: {} template(s) rendered, {} data file(s) written, {} failed",
        template_report.processed,
        emit_report.generated,
        template_report.failed + emit_report.failed,
    );
    0
}

fn run_images(image_config: &config::ImageConfig, yes: bool) -> u8 {
    if let Err(e) = image_config.validate() {
        eprintln!("Error: {e}");
        return 1;
    }

    if !yes && !image_config.dry_run {
        println!("This will rename image files, convert them to WebP, and rewrite");
        println!("references across the source tree.");
        let Some(answer) = prompt("Continue? [y/N]: ") else {
            return 1;
        };
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return 0;
        }
    }

    println!("==> Scanning image directories");
    let images = assets::find_images(&image_config.image_roots);
    println!("Found {} image(s)", images.len());

    let report = process::process_images(&images, image_config);

    if image_config.update_references && !report.mapping.is_empty() {
        println!("==> Updating references in source files");
        let sources =
            assets::find_source_files(&image_config.source_root, &image_config.excluded_dirs);
        let rewrite_report =
            rewrite::update_source_references(&sources, &report.mapping, image_config.dry_run);
        println!(
            "Updated {} reference(s) in {} file(s)",
            rewrite_report.total_replacements, rewrite_report.files_modified,
        );
    }

    println!(
        "==> Images complete: {} renamed, {} converted, {} skipped, {} failed",
        report.renamed, report.converted, report.skipped, report.failed,
    );
    if report.bytes_saved != 0 {
        println!("Saved {} KB", report.bytes_saved / 1024);
    }
    if image_config.dry_run {
        println!("(dry run; no files were changed)");
    }
    0
}

fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).ok()?;
    Some(line)
}
