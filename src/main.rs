//! twinfile - find and remove duplicate files.
//!
//! Usage:
//!   twin [PATH]              Find duplicates under PATH
//!   twin find [PATH]         Find duplicates and print a report
//!   twin dedupe [PATH]       Delete duplicates under a retention policy
//!   twin --help              Show help

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Context, Result};

use twinfile_analyze::{report, DuplicateConfig, DuplicateFinder};
use twinfile_core::{FingerprintMethod, ScanConfig, ScanReport};
use twinfile_ops::{DedupeOptions, RetentionPolicy};
use twinfile_scan::Scanner;

#[derive(Parser)]
#[command(
    name = "twinfile",
    version,
    about = "Find and remove duplicate files",
    long_about = "twinfile finds duplicate files by content fingerprint.\n\n\
                  Run `twin [PATH]` for a quick report, or use the dedupe \
                  subcommand to reclaim the wasted space."
)]
struct Cli {
    /// Path to search (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Find duplicate files and print a report
    Find {
        /// Path to search
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Also write the text report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete duplicates, keeping one file per group
    Dedupe {
        /// Path to search
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Which member of each group to keep
        #[arg(short, long, default_value = "first")]
        keep: Keep,

        /// Move files to the system trash instead of deleting
        #[arg(long)]
        trash: bool,

        /// Skip the interactive confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Scan options shared by every subcommand.
#[derive(Debug, clap::Args)]
struct ScanArgs {
    /// Comparison method
    #[arg(short, long, default_value = "sha256")]
    method: Method,

    /// Ignore files smaller than this many KB
    #[arg(long, value_name = "KB")]
    min_size_kb: Option<u64>,

    /// Only consider direct children of PATH
    #[arg(long)]
    no_recursive: bool,

    /// Fingerprint files across worker threads
    #[arg(short, long)]
    parallel: bool,

    /// Glob patterns for file names to skip (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    ignore: Vec<String>,
}

impl ScanArgs {
    fn default_args() -> Self {
        Self {
            method: Method::default(),
            min_size_kb: None,
            no_recursive: false,
            parallel: false,
            ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Method {
    Md5,
    #[default]
    Sha256,
    Size,
}

impl From<Method> for FingerprintMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Md5 => Self::Md5,
            Method::Sha256 => Self::Sha256,
            Method::Size => Self::SizeOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Keep {
    #[default]
    First,
    Newest,
    Oldest,
}

impl From<Keep> for RetentionPolicy {
    fn from(keep: Keep) -> Self {
        match keep {
            Keep::First => Self::KeepFirst,
            Keep::Newest => Self::KeepNewest,
            Keep::Oldest => Self::KeepOldest,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Find {
            path,
            scan,
            format,
            output,
        }) => run_find(&path, &scan, format, output),
        Some(Command::Dedupe {
            path,
            scan,
            keep,
            trash,
            yes,
        }) => run_dedupe(&path, &scan, keep, trash, yes),
        None => run_find(&cli.path, &ScanArgs::default_args(), OutputFormat::Text, None),
    }
}

/// Scan the path and group candidates into a duplicate report.
fn scan_and_group(path: &Path, args: &ScanArgs) -> Result<ScanReport> {
    let scan_config = ScanConfig::builder()
        .root(path)
        .recursive(!args.no_recursive)
        .min_size(args.min_size_kb.map(|kb| kb * 1024))
        .ignore_patterns(args.ignore.clone())
        .build()
        .map_err(|e| eyre!("invalid configuration: {e}"))?;

    eprintln!("Scanning {}...", path.display());
    let outcome = Scanner::new().scan(&scan_config).context("Scan failed")?;

    let method: FingerprintMethod = args.method.into();
    eprintln!(
        "Fingerprinting {} candidates ({method})...",
        outcome.candidates.len()
    );

    let dup_config = DuplicateConfig::builder()
        .method(method)
        .parallel(args.parallel)
        .build()
        .map_err(|e| eyre!("invalid configuration: {e}"))?;

    let finder = DuplicateFinder::with_config(dup_config);
    Ok(finder.group_with_warnings(outcome.candidates, outcome.warnings))
}

/// Run duplicate detection and print the report.
fn run_find(
    path: &Path,
    args: &ScanArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let scan_report = scan_and_group(path, args)?;

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", report::render(&scan_report));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&scan_report)?);
        }
    }

    if let Some(destination) = output {
        report::persist(&scan_report, &destination).context("Failed to persist report")?;
        eprintln!("Report written to {}", destination.display());
    }

    Ok(())
}

/// Run duplicate detection, then delete non-retained members.
fn run_dedupe(path: &Path, args: &ScanArgs, keep: Keep, use_trash: bool, yes: bool) -> Result<()> {
    let scan_report = scan_and_group(path, args)?;

    if !scan_report.has_duplicates() {
        println!("No duplicate files found.");
        return Ok(());
    }

    println!();
    print!("{}", report::render(&scan_report));
    println!();

    let confirmed = yes || confirm_deletion(&scan_report)?;

    let options = DedupeOptions {
        policy: keep.into(),
        use_trash,
    };
    let result = twinfile_ops::apply(&scan_report, &options, confirmed);

    if !confirmed {
        println!("Aborted, nothing deleted.");
        return Ok(());
    }

    println!(
        " Deleted {} file(s), freed {}",
        result.deleted_count,
        format_size(result.freed_bytes)
    );
    if result.failed_count > 0 {
        println!(" {} deletion(s) failed:", result.failed_count);
        for error in &result.errors {
            println!("   {error}");
        }
    }

    Ok(())
}

/// Ask for the literal confirmation token on stdin.
fn confirm_deletion(scan_report: &ScanReport) -> Result<bool> {
    print!(
        "About to delete {} file(s), reclaiming {}. Type YES to confirm: ",
        scan_report.deletable_files(),
        format_size(scan_report.total_wasted_bytes)
    );
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim() == "YES")
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
