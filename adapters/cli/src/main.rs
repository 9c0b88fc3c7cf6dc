#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Wildfire campaign and reports
//! what the boss cast during each wave.

mod campaign;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildfire_system_boss_abilities::PatternBook;

use campaign::{Campaign, CampaignSettings};

/// Runs Wildfire boss waves without a presentation layer.
#[derive(Debug, Parser)]
#[command(name = "wildfire", version, about)]
struct Args {
    /// TOML document with boss patterns; the bundled patterns are used when absent.
    #[arg(long, value_name = "FILE")]
    patterns: Option<PathBuf>,
    /// Seed for every random choice the boss makes.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Number of waves to play.
    #[arg(long, default_value_t = 15)]
    waves: u32,
    /// Length of every wave in seconds.
    #[arg(long, default_value_t = 40)]
    wave_seconds: u64,
    /// Simulation step in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Number of rings around the board centre.
    #[arg(long, default_value_t = 8)]
    radius: u32,
    /// Every n-th wave occupies the boss slot.
    #[arg(long, default_value_t = 5)]
    boss_every: u32,
    /// Consecutive waves sharing one wave group.
    #[arg(long, default_value_t = 5)]
    group_size: u32,
}

/// Entry point for the Wildfire command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    ensure!(args.tick_ms > 0, "--tick-ms must be positive");
    ensure!(args.wave_seconds > 0, "--wave-seconds must be positive");
    ensure!(args.boss_every > 0, "--boss-every must be positive");
    ensure!(args.group_size > 0, "--group-size must be positive");

    let patterns = load_patterns(args.patterns.as_ref())?;
    info!(patterns = patterns.len(), seed = args.seed, "patterns loaded");

    let settings = CampaignSettings {
        waves: args.waves,
        wave_length: Duration::from_secs(args.wave_seconds),
        tick: Duration::from_millis(args.tick_ms),
        radius: args.radius,
        boss_every: args.boss_every,
        group_size: args.group_size,
    };
    let mut campaign = Campaign::new(settings, patterns, args.seed);
    for summary in campaign.run() {
        println!("{summary}");
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_patterns(path: Option<&PathBuf>) -> Result<PatternBook> {
    let Some(path) = path else {
        return PatternBook::builtin().context("bundled boss patterns are invalid");
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read boss patterns from {}", path.display()))?;
    PatternBook::from_toml_str(&source)
        .with_context(|| format!("failed to parse boss patterns in {}", path.display()))
}
