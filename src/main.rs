use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wedding_directory::listing::location::{LocationAdapter, MemoryLocation};
use wedding_directory::listing::sort::SortMode;
use wedding_directory::listing::{Filter, Listing, ListingOptions};
use wedding_directory::{config, generate, output, scan};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "wedding-directory")]
#[command(about = "Static site generator for a wedding vendor directory and blog")]
#[command(long_about = "\
Static site generator for a wedding vendor directory and blog

Markdown files with YAML front matter become vendor listings, blog posts,
author pages and standalone pages. The directory listing filters by category
and location, and keeps the active filters in the page URL.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── directory/                   # One file per vendor → /directory/<slug>/
  │   └── acme-catering.md
  ├── posts/                       # Blog posts → /blog/<slug>/
  ├── authors/                     # Post authors → /authors/<slug>/
  ├── about/-index.md              # About page (leading dash required)
  └── pages/                       # Standalone pages → /<slug>/

Vendor front matter:
  title (required), description, image, logo, website, email, phone,
  address, category [Other], location [Australia], featured, draft, date,
  social { facebook, instagram, pinterest }

Run 'wedding-directory gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".wedding-directory-temp", global = true)]
    temp_dir: PathBuf,

    /// Log progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags for running the directory listing from the terminal.
#[derive(clap::Args)]
struct ListArgs {
    /// Query string as it would appear in the page URL, e.g. "category=catering"
    #[arg(long, default_value = "")]
    query: String,

    /// Select a category after mounting (term or slug, "all" to clear)
    #[arg(long)]
    category: Option<String>,

    /// Select a location after mounting (term or slug, "all" to clear)
    #[arg(long)]
    location: Option<String>,

    /// Sort order: alphabetical, date or random (default from config)
    #[arg(long)]
    sort: Option<SortMode>,

    /// Only featured vendors
    #[arg(long)]
    featured: bool,

    /// Maximum number of vendors (0 = no cap)
    #[arg(long)]
    max: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Filter and sort the directory as the listing page would
    List(ListArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.output)?;
            output::print_generate_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            output::print_check_output(&manifest);
            println!("==> Content is valid");
        }
        Command::List(args) => {
            let manifest = scan::scan(&cli.source)?;
            let settings = &manifest.config.directory;
            let options = ListingOptions {
                sort: Some(args.sort.unwrap_or(settings.sort)),
                featured_only: args.featured || settings.featured_only,
                max_items: args.max.or(settings.cap()),
                show_filters: true,
            };
            let mut listing = Listing::new(
                manifest.directory.clone(),
                options,
                MemoryLocation::with_search("/directory/", &args.query),
            );
            listing.mount();
            if let Some(category) = &args.category {
                listing.select_category(parse_filter(category));
            }
            if let Some(location) = &args.location {
                listing.select_location(parse_filter(location));
            }

            let view = listing.view();
            let query = listing.location().search();
            output::print_listing(&view, &query, &settings.noun, &settings.noun_plural);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

fn parse_filter(raw: &str) -> Filter {
    if raw.eq_ignore_ascii_case("all") {
        Filter::All
    } else {
        Filter::term(raw)
    }
}
