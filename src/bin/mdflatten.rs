//! CLI binary for mdflatten.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `FlattenConfig` and prints the flattened document.

use anyhow::{Context, Result};
use clap::Parser;
use mdflatten::{convert, convert_to_file, FlattenConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Flatten a docs tree to stdout
  mdflatten nav.json

  # Write to a file, 80-column tables
  mdflatten nav.json -o manual.md -w 80

  # Swap image extensions for a LaTeX-bound document
  mdflatten nav.json -i pdf --adjust-image-paths -o manual.md

  # Skip generated fragments during include expansion
  mdflatten nav.json -x 'generated/*' -x downloads.md

  # Legacy encodings
  mdflatten nav.json -e windows-1252

NAV CONFIG:
  {
    "docs_dir": "docs",
    "site_dir": "site",
    "markdown_extensions": ["toc", "markdown_include.include"],
    "pages": [
      { "file": "index.md", "title": "Overview" },
      { "title": "Guide", "pages": [
          { "file": "guide/install.md", "title": "Installation" }
      ]}
    ]
  }

  Sections nest their pages one chapter level deeper. Listing "toc" or
  "markdown_include.include" under markdown_extensions enables the TOC and
  include filters, matching what the site itself renders.
"#;

/// Flatten multi-page Markdown documentation into a single Pandoc-ready document.
#[derive(Parser, Debug)]
#[command(
    name = "mdflatten",
    version,
    about = "Flatten multi-page Markdown documentation into a single Pandoc-ready document",
    long_about = "Concatenate the pages of a documentation tree in nav order, rewriting \
site-generator syntax (includes, [TOC] markers, cross-page links, anchors) and reflowing \
pipe tables into fixed-width grid tables pandoc can render anywhere.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Navigation config file (JSON).
    #[arg(default_value = "nav.json")]
    nav: PathBuf,

    /// Write the document to this file instead of stdout.
    #[arg(short, long, env = "MDFLATTEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Total width of generated grid tables in characters.
    #[arg(short, long, env = "MDFLATTEN_WIDTH", default_value_t = 100)]
    width: usize,

    /// Width of rogue columns (data cells beyond the header's column count).
    #[arg(long, env = "MDFLATTEN_ROGUE_WIDTH", default_value_t = 20)]
    rogue_width: usize,

    /// Encoding for reading source pages (WHATWG label).
    #[arg(short, long, env = "MDFLATTEN_ENCODING", default_value = "utf-8")]
    encoding: String,

    /// Extension to substitute image extensions with, e.g. "pdf".
    #[arg(short, long, env = "MDFLATTEN_IMAGE_EXT")]
    image_ext: Option<String>,

    /// Re-anchor relative image paths at the site directory.
    #[arg(long, env = "MDFLATTEN_ADJUST_IMAGE_PATHS")]
    adjust_image_paths: bool,

    /// Include-directive patterns to skip (repeatable, glob-style).
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// Force include expansion on, regardless of the nav config.
    #[arg(long)]
    include: bool,

    /// Force TOC generation on, regardless of the nav config.
    #[arg(long)]
    toc: bool,

    /// Leave pipe tables as they are.
    #[arg(long)]
    no_tables: bool,

    /// Leave cross-references as they are.
    #[arg(long)]
    no_xrefs: bool,

    /// Keep <a name=...></a> anchor tags.
    #[arg(long)]
    keep_anchors: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDFLATTEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDFLATTEN_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut config = FlattenConfig::builder()
        .target_width(cli.width)
        .rogue_width(cli.rogue_width)
        .encoding(&cli.encoding)
        .adjust_image_paths(cli.adjust_image_paths)
        .exclude(cli.exclude.clone())
        .filter_include(cli.include)
        .filter_toc(cli.toc)
        .filter_tables(!cli.no_tables)
        .filter_xrefs(!cli.no_xrefs)
        .strip_anchors(!cli.keep_anchors)
        .build()
        .context("Invalid configuration")?;

    // Optional field without a builder setter for the None case.
    config.image_ext = cli.image_ext.clone();

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = convert_to_file(&cli.nav, output_path, &config)
            .context("Flattening failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} pages, {} lines  {}ms  →  {}",
                green("✔"),
                stats.pages,
                stats.lines,
                stats.duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let output = convert(&cli.nav, &config).context("Flattening failed")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.markdown().as_bytes())
            .context("Failed to write to stdout")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} pages, {} lines  {}",
                green("✔"),
                output.stats.pages,
                output.stats.lines,
                dim(&format!("{}ms", output.stats.duration_ms)),
            );
        }
    }

    Ok(())
}
