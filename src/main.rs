use book_summary::config::{self, GenConfig};
use book_summary::{generate, output};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "book-summary")]
#[command(about = "Generate SUMMARY.md from a book's directory tree")]
#[command(long_about = "\
Generate SUMMARY.md from a book's directory tree

Directories become chapters, files become pages, and names become titles
(GettingStarted.md → \"Getting Started\"). A chapter's README.md is its
cover page and supplies its link.

Content structure:

  book/
  ├── README.md             # Cover page of the book (warns if missing)
  ├── SUMMARY.md            # Generated, overwritten on every run
  ├── GLOSSARY.md           # Never indexed
  ├── book.json             # Never indexed
  ├── regex.md              # Naming rules: pattern line, separator line, ...
  ├── Introduction.md       # * [Introduction](Introduction.md)
  └── PartOne/              # * [Part One](Part One/README.md)
      ├── README.md         #   (cover page, no entry of its own)
      └── FirstSteps.md     #     * [First Steps](PartOne/FirstSteps.md)

Hidden entries and the reserved files above are skipped at every level.

Passing `true` as the second argument also rewrites every indexed file in
place: lines are trimmed and end with two spaces, and Dropbox share links
on their own line become <img> tags. Fenced code blocks are left alone.")]
#[command(version = version_string())]
struct Cli {
    /// Content root of the book
    #[arg(default_value = ".")]
    root: PathBuf,

    /// `true` to filter markdown sources in place
    #[arg(value_name = "FILTER")]
    filter: Option<String>,

    /// Order entries by name instead of directory listing order
    #[arg(long)]
    sort: bool,

    /// Print the index instead of writing it, and filter nothing
    #[arg(long)]
    dry_run: bool,

    /// Also write the scanned tree as JSON to this path
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> GenConfig {
        let mut config = GenConfig::new(self.root);
        config.apply_filter = config::parse_filter_flag(self.filter.as_deref());
        config.sort_entries = self.sort;
        config.dry_run = self.dry_run;
        config.manifest = self.manifest;
        config
    }
}

fn main() -> ExitCode {
    // `-h`, `--help` and `-help` all land here; help never counts as a run
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };

    init_tracing(cli.verbose);
    let config = cli.into_config();

    match generate::generate(&config) {
        Ok(report) => {
            if config.dry_run {
                output::print_index(&report);
            }
            output::print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout stays clean for the index and report.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
