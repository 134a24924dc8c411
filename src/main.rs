//! Headless self-play runner (default binary).
//!
//! The bot plays the simulation on a synthetic millisecond clock, with
//! gravity pacing taken from the current level. Prints a run report at
//! the end, as text or JSON. Set RUST_LOG=debug to watch the bot's
//! decisions.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::bot::BotDriver;
use blockfall::core::{
    calculate_drop_score, calculate_line_score, get_drop_interval_ms, Engine, EngineConfig,
};

/// Driver and gravity update cadence
const TICK_MS: u64 = 10;

#[derive(Debug, Clone)]
struct RunOptions {
    seed: u64,
    pieces: u32,
    items: bool,
    gravity_ms: Option<u64>,
    json: bool,
    quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
        Self {
            seed,
            pieces: 200,
            items: true,
            gravity_ms: None,
            json: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    seed: u64,
    pieces_placed: u32,
    lines_cleared: u32,
    level: u32,
    score: u64,
    items_spawned: u32,
    game_over: bool,
    sim_time_ms: u64,
}

fn main() -> Result<()> {
    let opts = parse_args()?;

    let default_level = if opts.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let report = run(&opts);
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run(opts: &RunOptions) -> RunReport {
    let mut config = EngineConfig::with_seed(opts.seed);
    config.items_enabled = opts.items;
    let mut engine = Engine::new(config);
    engine.start();
    info!(seed = opts.seed, pieces = opts.pieces, items = opts.items, "starting self-play");

    let mut driver = BotDriver::default();
    let mut now: u64 = 0;
    let mut next_gravity_at = gravity_interval_ms(opts, 0);
    let mut score: u64 = 0;
    let mut items_spawned: u32 = 0;
    let mut last_seq = 0;
    // Generous wall-clock cap so a stuck run still terminates
    let deadline = u64::from(opts.pieces).saturating_mul(10_000).max(10_000);

    while !engine.game_over() && engine.pieces_placed() < opts.pieces && now < deadline {
        let seq = engine.piece_seq();
        if seq != last_seq {
            last_seq = seq;
            if engine.active().map_or(false, |p| p.is_item()) {
                items_spawned += 1;
            }
        }

        let level_before = engine.level();
        let lines_before = engine.lines_cleared();
        let placed_before = engine.pieces_placed();
        let y_before = engine.active().map(|p| p.y);
        let planned_row = driver.plan().map(|m| m.landing_row);

        driver.update(&mut engine, now);

        // Hard drops score double per descended row
        if engine.pieces_placed() > placed_before {
            if let (Some(y0), Some(row)) = (y_before, planned_row) {
                score += u64::from(calculate_drop_score((row - y0).max(0) as u32, true));
            }
        }
        let cleared = engine.lines_cleared() - lines_before;
        if cleared > 0 {
            score += u64::from(calculate_line_score(cleared as usize, level_before));
        }

        if now >= next_gravity_at {
            if !engine.landed() && engine.active().is_some() {
                engine.move_down();
            }
            next_gravity_at = now + gravity_interval_ms(opts, engine.level());
        }

        now += TICK_MS;
    }

    info!(
        pieces = engine.pieces_placed(),
        lines = engine.lines_cleared(),
        score,
        game_over = engine.game_over(),
        "self-play finished"
    );

    RunReport {
        seed: opts.seed,
        pieces_placed: engine.pieces_placed(),
        lines_cleared: engine.lines_cleared(),
        level: engine.level(),
        score,
        items_spawned,
        game_over: engine.game_over(),
        sim_time_ms: now,
    }
}

fn gravity_interval_ms(opts: &RunOptions, level: u32) -> u64 {
    opts.gravity_ms.unwrap_or_else(|| get_drop_interval_ms(level))
}

fn print_report(report: &RunReport) {
    println!("seed           {}", report.seed);
    println!("pieces placed  {}", report.pieces_placed);
    println!("lines cleared  {}", report.lines_cleared);
    println!("level          {}", report.level);
    println!("score          {}", report.score);
    println!("items spawned  {}", report.items_spawned);
    println!("sim time       {} ms", report.sim_time_ms);
    println!("game over      {}", report.game_over);
}

fn parse_args() -> Result<RunOptions> {
    let mut opts = RunOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => opts.seed = next_value(&mut args, "--seed")?,
            "--pieces" => opts.pieces = next_value(&mut args, "--pieces")?,
            "--no-items" => opts.items = false,
            "--gravity-ms" => opts.gravity_ms = Some(next_value(&mut args, "--gravity-ms")?),
            "--json" => opts.json = true,
            "--quiet" => opts.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?} (try --help)"),
        }
    }
    Ok(opts)
}

fn next_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T> {
    let raw = args.next().ok_or_else(|| anyhow!("{flag} needs a value"))?;
    raw.parse()
        .map_err(|_| anyhow!("invalid value {raw:?} for {flag}"))
}

fn print_usage() {
    println!("blockfall - headless bot self-play");
    println!();
    println!("Usage: blockfall [options]");
    println!("  --seed N        RNG seed (default: time-derived)");
    println!("  --pieces N      stop after N pieces (default 200)");
    println!("  --no-items      disable item pieces");
    println!("  --gravity-ms N  fixed gravity interval instead of level pacing");
    println!("  --json          print the report as JSON");
    println!("  --quiet         only warnings unless RUST_LOG is set");
}
