mod ui;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use trex_run::build_info;
use trex_run::core::config::ConfigSource;
use trex_run::core::{game_loop, logging, GameConfig};
use trex_run::Session;
use ui::TerminalPlatform;

/// Command-line options.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    log: Option<PathBuf>,
}

enum Command {
    Play(Options),
    Version,
    Help,
}

fn print_help() {
    println!("T-Rex Run - Terminal Side-Scrolling Runner\n");
    println!("Usage: trex-run [options]\n");
    println!("Options:");
    println!("  --config <path>  Read settings from a JSON file");
    println!("  --seed <n>       Seed obstacle placement");
    println!("  --log <path>     Write the log here instead of the data directory");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
    println!("\nControls: Space/Up jump, Esc/Q quit, Y/N or click on the game-over menu.");
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => {
                let value = iter.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(value));
            }
            "--log" => {
                let value = iter.next().context("--log needs a path")?;
                options.log = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a number")?;
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => bail!("unknown argument: {}\nRun 'trex-run --help' for usage.", other),
        }
    }
    Ok(Command::Play(options))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Command::Version => {
            println!("trex-run {}", build_info::version_string());
            return Ok(());
        }
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Play(options) => options,
    };

    let log_path = options.log.clone().or_else(logging::default_log_path);
    if let Some(path) = &log_path {
        // Play on without a log.
        if let Err(e) = logging::init_file_logger(path) {
            eprintln!("Warning: could not open log {}: {}", path.display(), e);
        }
    }

    let (mut config, source) =
        GameConfig::resolve(options.config.as_deref()).context("failed to load configuration")?;
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    match &source {
        ConfigSource::File(path) => log::info!("config loaded from {}", path.display()),
        ConfigSource::Defaults => log::info!("using default config"),
    }

    let mut session = Session::from_config(&config).context("failed to start session")?;

    let mut platform = TerminalPlatform::enter(
        (config.screen_width, config.screen_height),
        config.ticks_per_second,
    )
    .context("failed to set up terminal")?;

    let outcome = game_loop::run(&mut platform, &mut session);

    // Restore before reporting anything so messages land on the normal screen.
    platform.restore().context("failed to restore terminal")?;

    let summary = outcome.context("game loop failed")?;
    log::info!(
        "exiting after {} ticks, final score {}",
        summary.ticks,
        summary.final_score
    );
    println!("Final score: {}", summary.final_score);
    Ok(())
}
