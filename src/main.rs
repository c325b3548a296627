//! URL Refiner main entry point
//!
//! This is the command-line interface for the URL Refiner.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url_refiner::config::{
    load_raw_config_with_hash, RawConfig, RawParamList, RawValue, RewriteConfig, RewriteMode,
};
use url_refiner::output::{print_statistics, write_refined, Stats};
use url_refiner::{handle_json, process, Response};

/// Directory searched when the input file is not found as given
const INPUTS_DIR: &str = "Inputs";

/// Rewrite text when --rewrite-value is not given
const DEFAULT_REWRITE_VALUE: &str = "FUZZ";

/// Directory that receives saved output files
const OUTPUT_DIR: &str = "output";

/// URL Refiner: canonicalize and deduplicate URL lists
///
/// Reads URLs from a file or stdin, removes duplicates under exact or
/// fuzzy comparison, and prints the survivors in their original order.
#[derive(Parser, Debug)]
#[command(name = "url-refiner")]
#[command(version = "1.0.0")]
#[command(about = "Process and deduplicate URLs", long_about = None)]
struct Cli {
    /// Input file; if not found, checked in 'Inputs/'. Reads stdin when omitted
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Save the output to a timestamped file in the 'output' directory
    #[arg(short, long)]
    output: bool,

    /// TOML configuration file; command-line flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comparison mode: "exact" or "fuzzy"
    #[arg(short, long)]
    mode: Option<String>,

    /// URLs kept per structural pattern in fuzzy mode
    #[arg(long)]
    value: Option<String>,

    /// Query parameters to exclude from comparison (repeatable, comma-separated)
    #[arg(short, long = "exclude", value_name = "PARAM")]
    exclude: Vec<String>,

    /// Ignore the URL path for deduplication
    #[arg(long)]
    ignore_path: bool,

    /// Rewrite query values of emitted URLs
    #[arg(long, value_enum)]
    rewrite: Option<RewriteArg>,

    /// Text used by --rewrite [default: FUZZ]
    #[arg(long, requires = "rewrite")]
    rewrite_value: Option<String>,

    /// Read one JSON request from stdin and print the JSON response
    #[arg(long, conflicts_with_all = ["input", "output"])]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RewriteArg {
    Replace,
    Append,
}

impl From<RewriteArg> for RewriteMode {
    fn from(arg: RewriteArg) -> Self {
        match arg {
            RewriteArg::Replace => RewriteMode::Replace,
            RewriteArg::Append => RewriteMode::Append,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.json {
        return handle_json_mode();
    }

    let config = build_config(&cli)?;
    let urls = read_urls(cli.input.as_deref())?;

    if urls.is_empty() {
        eprintln!("Warning: Input is empty. No URLs to process.");
        return Ok(());
    }

    match process(&urls, &config) {
        Response::Success { data, stats } => write_output(&data, &stats, cli.output, cli.quiet),
        Response::Error { message } => bail!(message),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("url_refiner=info,warn"),
            1 => EnvFilter::new("url_refiner=debug,info"),
            2 => EnvFilter::new("url_refiner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --json: one request on stdin, one response on stdout
fn handle_json_mode() -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Could not read request from stdin")?;

    println!("{}", handle_json(&input));
    Ok(())
}

/// Merges the optional config file with command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<RawConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_raw_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration '{}'", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => RawConfig::default(),
    };

    if let Some(mode) = &cli.mode {
        config.mode = Some(mode.clone());
    }
    if let Some(value) = &cli.value {
        config.value = Some(RawValue::Text(value.clone()));
    }
    if !cli.exclude.is_empty() {
        config.exclude_params = Some(RawParamList::List(cli.exclude.clone()));
    }
    if cli.ignore_path {
        config.ignore_path = true;
    }
    if let Some(rewrite) = cli.rewrite {
        config.rewrite = Some(RewriteConfig {
            mode: rewrite.into(),
            value: cli
                .rewrite_value
                .clone()
                .unwrap_or_else(|| DEFAULT_REWRITE_VALUE.to_string()),
        });
    }

    Ok(config)
}

/// Reads trimmed, non-blank lines from the input file or stdin
fn read_urls(input: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match input {
        Some(path) => {
            let file = resolve_input(path)?;
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read file '{}'", file.display()))?;
            Ok(collect_lines(content.lines()))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("No input file provided via --input and no data from stdin. Use --help for more info.");
            }

            let lines = stdin
                .lock()
                .lines()
                .collect::<io::Result<Vec<_>>>()
                .context("Could not read URLs from stdin")?;
            Ok(collect_lines(lines.iter().map(String::as_str)))
        }
    }
}

/// Finds the input file as given, or by name inside the inputs directory
fn resolve_input(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if let Some(name) = path.file_name() {
        let fallback = Path::new(INPUTS_DIR).join(name);
        if fallback.is_file() {
            return Ok(fallback);
        }
    }

    bail!(
        "Input file not found at '{}' or within the '{}' directory.",
        path.display(),
        INPUTS_DIR
    )
}

fn collect_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prints the refined URLs or saves them to a timestamped file
fn write_output(urls: &[String], stats: &Stats, save_to_file: bool, quiet: bool) -> anyhow::Result<()> {
    if urls.is_empty() {
        eprintln!("Warning: No unique URLs were produced.");
        return Ok(());
    }

    if save_to_file {
        let path = write_refined(urls, Path::new(OUTPUT_DIR))
            .with_context(|| format!("Could not write to directory '{}'", OUTPUT_DIR))?;
        println!(
            "Success! Processed {} URLs. Found {} duplicates. Saved {} unique URLs to '{}'.",
            stats.total_input,
            stats.duplicates_removed,
            stats.total_output,
            path.display()
        );
    } else {
        for url in urls {
            println!("{}", url);
        }
    }

    if !quiet {
        print_statistics(stats);
    }

    Ok(())
}
