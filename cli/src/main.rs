use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use twenty48_core::{BoardEngine, Phase, RandomSpawner, Snapshot, SpawnSource};

use command::Command;
use config::CliConfig;

mod command;
mod config;

#[derive(Parser, Debug)]
#[command(version, about = "Slide and merge tiles from the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with board size and seed
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print one JSON snapshot per line instead of a text board
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = CliConfig::load(args.config.as_deref())?;
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    log::debug!("seed: {seed}");

    let mut engine = BoardEngine::new(config.game_config(), RandomSpawner::new(seed));
    run(&mut engine, io::stdin().lock(), io::stdout().lock(), args.json)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Starts a game and forwards one command per input line until `quit` or EOF.
fn run<S, R, W>(engine: &mut BoardEngine<S>, input: R, mut output: W, json: bool) -> Result<()>
where
    S: SpawnSource,
    R: BufRead,
    W: Write,
{
    print_snapshot(&mut output, &engine.start(), json)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let snapshot = match line.parse::<Command>() {
            Ok(Command::Move(direction)) => engine.apply_move(direction),
            Ok(Command::Start) => engine.start(),
            Ok(Command::Quit) => break,
            Err(err) => {
                log::warn!("{err}");
                if !json {
                    writeln!(output, "{err}")?;
                }
                continue;
            }
        };

        print_snapshot(&mut output, &snapshot, json)?;
        if snapshot.phase == Phase::Lost && !json {
            writeln!(output, "Game over, type `new` to play again")?;
        }
    }

    output.flush()?;
    Ok(())
}

fn print_snapshot<W: Write>(output: &mut W, snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *output, snapshot)?;
        writeln!(output)?;
    } else {
        writeln!(output, "{snapshot}")?;
    }
    Ok(())
}
