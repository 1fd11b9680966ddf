use crate::config::{Preset, ScrapeConfig};
use crate::engine::Engine;
use crate::error::ScrapeError;
use crate::log::ActivityLogger;
use crate::tools::analyze::analyze;
use crate::tools::fetch::{HttpFetcher, PageFetcher};
use crate::types::{ResultSet, RunOutcome, RunReport};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "labelscrape", version, about = "Labeled product attributes from catalog pages (JSON only)")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape every product linked from a listing page
    Run(RunArgs),
    /// Extract a single product page into one row
    Page(PageArgs),
    /// Capacity-density points and per-series trees from scraped rows
    Analyze(AnalyzeArgs),
    /// Print the effective configuration as JSON
    Config(ConfigArgs),
    /// Show the activity log, newest first
    Logs {
        /// Only runs that failed
        #[arg(long)]
        errors: bool,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Built-in field table and selectors
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,
    /// JSON configuration file (see `labelscrape config`)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    /// Listing page: URL, file path, or `-` for stdin
    input: String,
    #[command(flatten)]
    cfg: ConfigArgs,
    /// Base for relative product links (defaults to the listing URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Pause between product pages
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Per-request timeout
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Write JSON here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PageArgs {
    /// Product page: URL, file path, or `-` for stdin
    input: String,
    #[command(flatten)]
    cfg: ConfigArgs,
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Rows written by `labelscrape run` (file path or `-` for stdin)
    input: String,
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ConfigArgs {
    /// `--config`, then `--preset`, then `~/.labelscrape/config.json`, then the default preset.
    fn resolve(&self) -> crate::Result<ScrapeConfig> {
        if let Some(path) = &self.config {
            return ScrapeConfig::load(path);
        }
        if let Some(preset) = self.preset {
            return Ok(ScrapeConfig::preset(preset));
        }
        match ScrapeConfig::user_config_path() {
            Some(path) => ScrapeConfig::load(&path),
            None => Ok(ScrapeConfig::default()),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Runtime::new().context("failed to create async runtime")?;

    match cli.cmd {
        Command::Run(args) => runtime.block_on(run_cmd(args)),
        Command::Page(args) => runtime.block_on(page_cmd(args)),
        Command::Analyze(args) => analyze_cmd(args),
        Command::Config(args) => {
            let cfg = args.resolve()?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
            Ok(())
        }
        Command::Logs { errors } => {
            for line in ActivityLogger::new()?.read_logs(errors)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn run_cmd(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = args.cfg.resolve()?;
    if let Some(ms) = args.delay_ms {
        cfg.fetch.delay_ms = ms;
    }
    if let Some(ms) = args.timeout_ms {
        cfg.fetch.timeout_ms = ms;
    }

    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let engine = Engine::new(&cfg, &fetcher)?;

    let base = match &args.base_url {
        Some(raw) => Some(Url::parse(raw).with_context(|| format!("invalid --base-url {raw}"))?),
        None => Url::parse(&args.input).ok(),
    };

    let start = Instant::now();
    let listing = read_input(&args.input, &fetcher).await?;

    let token = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current page");
            token.cancel();
        }
    });

    let report = engine.run_listing(&listing, base.as_ref()).await;
    record_run(&args.input, &report, start);

    write_output(&report.rows.to_json_pretty()?, args.output.as_deref())
}

async fn page_cmd(args: PageArgs) -> anyhow::Result<()> {
    let cfg = args.cfg.resolve()?;
    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let engine = Engine::new(&cfg, &fetcher)?;

    let html = read_input(&args.input, &fetcher).await?;
    let record = engine.extract(&html);

    write_output(&serde_json::to_string_pretty(&record)?, args.output.as_deref())
}

fn analyze_cmd(args: AnalyzeArgs) -> anyhow::Result<()> {
    let json = read_local(&args.input)?;
    let rows: ResultSet = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of string rows", args.input))?;

    let analysis = analyze(&rows);
    if analysis.points.is_empty() {
        tracing::warn!(rows = rows.len(), "no rows had a usable size, weight, and capacity");
    }

    write_output(&serde_json::to_string_pretty(&analysis)?, args.output.as_deref())
}

/// Read a file, or stdin for `-`.
fn read_local(input: &str) -> crate::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| ScrapeError::input("stdin", e))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).map_err(|e| ScrapeError::input(input, e))
    }
}

/// Read markup from stdin (`-`), a URL, or a file.
async fn read_input(input: &str, fetcher: &dyn PageFetcher) -> crate::Result<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        fetcher
            .fetch(input)
            .await
            .map_err(|e| ScrapeError::input(input, e))
    } else {
        read_local(input)
    }
}

fn write_output(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

/// Best effort; a broken activity log never fails a run.
fn record_run(source: &str, report: &RunReport, start: Instant) {
    let Ok(logger) = ActivityLogger::new() else {
        return;
    };
    let details = format!(
        "{} rows, {} failed, {} in {}ms",
        report.rows.len(),
        report.failures,
        report.outcome.as_str(),
        start.elapsed().as_millis()
    );
    let _ = match report.outcome {
        RunOutcome::ContainerNotFound => logger.error(Some(source), "run", Some(&details)),
        _ => logger.info(Some(source), "run", Some(&details)),
    };
}
