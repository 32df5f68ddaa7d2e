use clap::{Parser, Subcommand};
use screen_gal::{config, emit, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "screen-gal")]
#[command(about = "Build pipeline for the Movie Computer Screens Collection")]
#[command(long_about = "\
Build pipeline for the Movie Computer Screens Collection

Validates the authored gallery content and composes the site manifest the
rendering layer consumes.

Content structure:

  content/
  ├── site.toml          # Site config (optional, sparse overrides)
  ├── projects.json      # Project records, an ordered JSON array
  ├── i18n/
  │   ├── en.json        # Translation resources, one per configured locale
  │   └── de.json
  └── media/             # Previews referenced by records
      ├── hal9000.png
      └── hal9000.gif

Records authored under older schema revisions (plain-string film titles,
missing optional keys) are normalized during scan; schema violations fail
with the record position and field path.

SCREEN_GAL_BASE_URL, if set, overrides the configured base URL.

Run 'screen-gal gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".screen-gal-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan and validate content into a manifest
    Scan,
    /// Compose the site manifest from a scanned manifest
    Emit,
    /// Run the full pipeline: scan → emit
    Build,
    /// Validate content without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let base_url_override = std::env::var(config::BASE_URL_ENV).ok();

    match cli.command {
        Command::Scan => {
            let result = scan::scan(&cli.source, base_url_override)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&result, &cli.source);
        }
        Command::Emit => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let site = emit::emit(&manifest_path, &cli.output)?;
            output::print_emit_output(&site, &cli.output);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let result = scan::scan(&cli.source, base_url_override)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&result, &cli.source);

            println!("==> Stage 2: Emitting {}", cli.output.display());
            let site = emit::emit(&manifest_path, &cli.output)?;
            output::print_emit_output(&site, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let result = scan::scan(&cli.source, base_url_override)?;
            output::print_scan_output(&result, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
