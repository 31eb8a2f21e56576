//! needsplit — Preview tool for the contribution splitting engine.
//!
//! Loads candidate needs from a JSON file, runs the split engine, and prints
//! the allocation plan with its fee breakdown. Nothing is charged or stored.

mod config;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use needsplit_core::money::{format_minor, parse_major};
use needsplit_core::traits::SplitCalculator;
use needsplit_core::types::{Need, NeedCategory, SplitMode, SplitOptions};
use needsplit_engine::{EngineConfig, SplitEngine};
use tracing::{debug, info};

use crate::config::EnvDefaults;

/// Split one contribution across open needs.
#[derive(Parser)]
#[command(name = "needsplit")]
#[command(version, about = "Preview how a contribution is split across open needs")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). Defaults to NEEDSPLIT_LOG_LEVEL or "warn".
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Platform fee in basis points. Defaults to NEEDSPLIT_FEE_BPS or 500.
    #[arg(long, global = true)]
    fee_bps: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an allocation plan.
    Split(SplitArgs),
    /// Show the fee and net payout for an amount.
    Fee(FeeArgs),
}

#[derive(Args)]
struct SplitArgs {
    /// JSON file holding an array of needs (amounts in minor units).
    #[arg(short, long)]
    needs: PathBuf,

    /// Contribution in major units (e.g. 50.00).
    #[arg(short, long, value_parser = parse_amount)]
    amount: i64,

    /// Distribution policy: even, priority, or category.
    #[arg(short, long, default_value = "even")]
    mode: SplitMode,

    /// Only consider needs in this category.
    #[arg(short, long)]
    category: Option<NeedCategory>,

    /// Fund at most this many needs.
    #[arg(long)]
    max_recipients: Option<usize>,

    /// Category weight for the category policy, e.g. `medical=3`. Repeatable.
    #[arg(short, long = "weight", value_parser = parse_weight)]
    weights: Vec<(NeedCategory, u32)>,

    /// Output format ("text" or "json").
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[derive(Args)]
struct FeeArgs {
    /// Amount in major units (e.g. 50.00).
    #[arg(short, long, value_parser = parse_amount)]
    amount: i64,
}

fn parse_amount(s: &str) -> Result<i64, String> {
    parse_major(s).map_err(|e| e.to_string())
}

fn parse_weight(s: &str) -> Result<(NeedCategory, u32), String> {
    let (cat, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=WEIGHT, got {s:?}"))?;
    let cat: NeedCategory = cat.parse()?;
    let weight: u32 = weight
        .trim()
        .parse()
        .map_err(|_| format!("weight must be a non-negative integer, got {weight:?}"))?;
    Ok((cat, weight))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let defaults = EnvDefaults::from_env()?;

    let level = cli.log_level.as_deref().unwrap_or(&defaults.log_level);
    init_logging(level, &cli.log_format);

    let engine = SplitEngine::with_config(EngineConfig {
        fee_bps: cli.fee_bps.unwrap_or(defaults.fee_bps),
    })
    .context("invalid engine configuration")?;
    debug!(fee_bps = engine.config().fee_bps, "engine ready");

    match cli.command {
        Commands::Split(args) => run_split(&engine, args, &mut std::io::stdout().lock()),
        Commands::Fee(args) => run_fee(&engine, args),
    }
}

fn run_split(engine: &SplitEngine, args: SplitArgs, out: &mut impl Write) -> Result<()> {
    let needs = load_needs(&args.needs)?;
    info!(count = needs.len(), path = %args.needs.display(), "loaded needs");

    let options = SplitOptions {
        category_filter: args.category,
        max_recipients: args.max_recipients,
        category_weights: args.weights.into_iter().collect(),
    };

    let result = engine
        .compute_split(args.amount, &needs, args.mode, &options)
        .context("split failed")?;

    match args.format.as_str() {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        "text" => write!(out, "{}", render::render_text(&result))?,
        other => bail!("unknown output format: {other}"),
    }
    Ok(())
}

fn run_fee(engine: &SplitEngine, args: FeeArgs) -> Result<()> {
    if args.amount <= 0 {
        bail!("amount must be positive");
    }
    let fee = engine.fee_for(args.amount)?;
    println!("amount: {}", format_minor(args.amount));
    println!("fee:    {}", format_minor(fee));
    println!("net:    {}", format_minor(args.amount - fee));
    Ok(())
}

/// Read a JSON array of needs from `path`.
fn load_needs(path: &Path) -> Result<Vec<Need>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` overrides `level_str` when set. Logs go to stderr so the plan on
/// stdout stays machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
