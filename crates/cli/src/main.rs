// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! War card game simulator.
//!
//! Plays many games of War in parallel and prints the number of games won by
//! each player:
//!
//! ```bash
//! $ warsim -n 1000 --seed 42
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use warsim_core::{Card, DeckConfig, GameConfig, TrialSummary, TrialsConfig, run_trials};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of games to play.
    #[clap(long, short = 'n', default_value_t = TrialsConfig::TRIALS,
           value_parser = clap::value_parser!(u64).range(1..))]
    trials: u64,
    /// Number of suits to use.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    suits: u32,
    /// Number of ranks to use.
    #[clap(long, default_value_t = 13, value_parser = clap::value_parser!(u32).range(1..))]
    ranks: u32,
    /// Comma separated suits labels.
    #[clap(long, value_delimiter = ',', default_value = "♠,♡,♢,♣")]
    labels: Vec<String>,
    /// Number of worker threads, defaults to the available parallelism.
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..))]
    workers: Option<u16>,
    /// Seed for a reproducible run.
    #[clap(long)]
    seed: Option<u64>,
    /// Number of cards each player adds to the pile on a war.
    #[clap(long, default_value_t = GameConfig::WAR_ANTE)]
    ante: usize,
    /// Abort games that last longer than this number of turns.
    #[clap(long, default_value_t = GameConfig::MAX_TURNS,
           value_parser = clap::value_parser!(u64).range(1..))]
    max_turns: u64,
    /// Print games statistics.
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn configs(&self) -> Result<(TrialsConfig, GameConfig)> {
        let labels = self.labels.iter().map(|s| s.trim());
        let deck = DeckConfig::new(self.suits, self.ranks, labels)?;

        let mut trials = TrialsConfig {
            trials: self.trials,
            seed: self.seed,
            ..TrialsConfig::default()
        };

        if let Some(workers) = self.workers {
            trials.workers = workers as usize;
        }

        let game = GameConfig {
            deck,
            war_ante: self.ante,
            max_turns: self.max_turns,
        };

        Ok((trials, game))
    }
}

fn print_stats(summary: &TrialSummary) {
    println!("Player 1 wins:   {:.2}%", summary.player1_ratio() * 100.0);
    println!("Mean turns:      {:.1}", summary.mean_turns());
    println!("Mean wars:       {:.1}", summary.mean_wars());
    println!("Longest game:    {} turns", summary.longest_game);
    println!("Elapsed:         {:.3}s", summary.elapsed.as_secs_f64());
}

/// Fails the run if any trial failed, each failure has already been logged by
/// the runner.
fn check_failures(summary: &TrialSummary) -> Result<()> {
    if !summary.failures.is_empty() {
        bail!("{} of {} trials failed", summary.failures.len(), summary.trials);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let (trials, game) = cli.configs()?;

    let size = game.deck.size() as u32;
    info!(
        "Deck {} to {}",
        game.deck.label(Card::new(0)),
        game.deck.label(Card::new(size - 1))
    );

    let summary = run_trials(&trials, &game)?;
    println!("{} {}", summary.player1_wins, summary.player2_wins);

    if cli.verbose {
        print_stats(&summary);
    }

    check_failures(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags() {
        let cli = Cli::try_parse_from(["warsim"]).unwrap();
        let (trials, game) = cli.configs().unwrap();
        assert_eq!(trials.trials, 100);
        assert_eq!(trials.seed, None);
        assert!(trials.workers > 0);
        assert_eq!(game, GameConfig::default());
    }

    #[test]
    fn custom_layout() {
        let cli = Cli::try_parse_from([
            "warsim", "-n", "7", "--suits", "2", "--ranks", "5", "--labels", "a, b",
            "--workers", "3", "--seed", "9",
        ])
        .unwrap();

        let (trials, game) = cli.configs().unwrap();
        assert_eq!(trials.trials, 7);
        assert_eq!(trials.workers, 3);
        assert_eq!(trials.seed, Some(9));
        assert_eq!(game.deck.size(), 10);
        assert_eq!(game.deck.labels(), ["a", "b"]);
    }

    #[test]
    fn failed_trials_fail_the_run() {
        let cli = Cli::try_parse_from([
            "warsim", "-n", "3", "--seed", "1", "--workers", "2", "--max-turns", "1",
        ])
        .unwrap();

        let (trials, game) = cli.configs().unwrap();
        let summary = run_trials(&trials, &game).unwrap();
        assert_eq!(summary.failures.len(), 3);

        let err = check_failures(&summary).unwrap_err();
        assert_eq!(err.to_string(), "3 of 3 trials failed");

        let (trials, game) = Cli::try_parse_from(["warsim", "-n", "3", "--seed", "1"])
            .unwrap()
            .configs()
            .unwrap();
        let summary = run_trials(&trials, &game).unwrap();
        assert!(check_failures(&summary).is_ok());
    }

    #[test]
    fn invalid_flags() {
        assert!(Cli::try_parse_from(["warsim", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["warsim", "--ranks", "0"]).is_err());
        assert!(Cli::try_parse_from(["warsim", "--workers", "0"]).is_err());

        // Five suits need five labels.
        let cli = Cli::try_parse_from(["warsim", "--suits", "5"]).unwrap();
        assert!(cli.configs().is_err());
    }
}
