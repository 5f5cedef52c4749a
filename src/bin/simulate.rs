//! Headless autopilot for tuning and regression checks.
//!
//! Plays seeded sessions without a terminal, jumping whenever the nearest
//! obstacle comes within reach, and reports how far each run got.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # One run, seed 42, 3000 ticks
//!   cargo run --bin simulate -- --runs 20         # Seeds 42..62
//!   cargo run --bin simulate -- --seed 7 --quiet  # Summary line only

use std::env;
use std::process;
use trex_run::core::{logging, GameConfig, GameError, JUMP_APEX_HEIGHT, RUNNER_X};
use trex_run::runner::{GamePhase, InputEvent, Key, Session, TickInput};

#[derive(Debug, Clone, Copy)]
struct SimOptions {
    ticks: u64,
    seed: u64,
    runs: u32,
    quiet: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            ticks: 3000,
            seed: 42,
            runs: 1,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RunResult {
    seed: u64,
    score: u32,
    ticks: u64,
    crashed: bool,
}

fn main() {
    logging::init_stderr_logger();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Usage: simulate [--ticks N] [--seed N] [--runs N] [--quiet]");
            process::exit(2);
        }
    };

    let mut results = Vec::with_capacity(options.runs as usize);
    for run in 0..options.runs {
        let seed = options.seed.wrapping_add(run as u64);
        match simulate(seed, options.ticks) {
            Ok(result) => {
                if !options.quiet {
                    println!(
                        "seed {:>6}  score {:>4}  ticks {:>6}  {}",
                        result.seed,
                        result.score,
                        result.ticks,
                        if result.crashed { "crashed" } else { "survived" }
                    );
                }
                results.push(result);
            }
            Err(e) => {
                eprintln!("seed {}: {}", seed, e);
                process::exit(1);
            }
        }
    }

    if results.is_empty() {
        return;
    }
    let total: u64 = results.iter().map(|r| r.score as u64).sum();
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let crashes = results.iter().filter(|r| r.crashed).count();
    println!(
        "{} runs: mean score {:.1}, best {}, {} crashed",
        results.len(),
        total as f64 / results.len() as f64,
        best,
        crashes
    );
}

fn parse_args(args: &[String]) -> Result<SimOptions, String> {
    let mut options = SimOptions::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => options.ticks = parse_value(args, &mut i)?,
            "--seed" => options.seed = parse_value(args, &mut i)?,
            "--runs" => options.runs = parse_value(args, &mut i)?,
            "--quiet" | "-q" => options.quiet = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, raw))
}

/// Play one session until it crashes or `max_ticks` pass.
fn simulate(seed: u64, max_ticks: u64) -> Result<RunResult, GameError> {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let tick_ms = config.tick_interval_ms();
    let mut session = Session::from_config(&config)?;

    let mut ticks = 0;
    while ticks < max_ticks && session.phase() == GamePhase::Playing {
        let events = if should_jump(&session) {
            vec![InputEvent::KeyDown(Key::Space)]
        } else {
            Vec::new()
        };
        session.tick(&TickInput::with_events(ticks * tick_ms, events))?;
        ticks += 1;
    }

    Ok(RunResult {
        seed,
        score: session.score(),
        ticks,
        crashed: session.game_over(),
    })
}

/// Jump when the nearest obstacle ahead will reach the runner at about
/// the top of the arc.
fn should_jump(session: &Session) -> bool {
    let character = session.character();
    if !character.is_grounded() {
        return false;
    }
    let ticks_to_apex = JUMP_APEX_HEIGHT / character.jump_speed;
    session.obstacles().obstacles().iter().any(|o| {
        let gap = o.x - RUNNER_X;
        gap >= 0.0 && gap <= o.speed * ticks_to_apex
    })
}
