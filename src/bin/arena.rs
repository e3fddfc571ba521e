use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use std::time::Instant;

use power4::arena::{play_round, Outcome, Tally};
use power4::bot::Difficulty;

/// Pit two bot difficulty tiers against each other.
#[derive(Parser)]
#[command(name = "arena", about = "Play bot-versus-bot Power 4 games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// First tier: beginner, amateur or expert
    #[arg(long, default_value = "expert")]
    first: String,

    /// Second tier: beginner, amateur or expert
    #[arg(long, default_value = "amateur")]
    second: String,

    /// Seed of the first game; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }
    let first: Difficulty = cli.first.parse()?;
    let second: Difficulty = cli.second.parse()?;

    info!(
        "playing {} games, {} vs {}, seeds {}..{}",
        cli.games,
        first,
        second,
        cli.seed,
        cli.seed + cli.games
    );
    let start = Instant::now();

    let progress = ProgressBar::new(cli.games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes: Vec<Outcome> = (0..cli.games)
        .into_par_iter()
        .map(|i| {
            let outcome = play_round(first, second, cli.seed + i);
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish();

    let mut tally = Tally::default();
    for outcome in outcomes {
        tally.record(outcome, first, second);
    }

    println!(
        "{} wins: {}, {} wins: {}, full boards: {} ({} games in {:.1}s)",
        first,
        tally.a_wins,
        second,
        tally.b_wins,
        tally.exhausted,
        tally.games(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
