// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel War trials.
use log::{error, info};
use parking_lot::Mutex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

use crate::war::{GameConfig, GameError, Player, War};

/// Invalid trials or game configuration.
///
/// The deck layout is validated when the [DeckConfig](warsim_cards::DeckConfig)
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one trial is needed.
    #[error("the number of trials must be positive")]
    NoTrials,
    /// At least one worker is needed.
    #[error("the number of workers must be positive")]
    NoWorkers,
    /// Games need at least one turn.
    #[error("the turns limit must be positive")]
    NoTurns,
}

/// Trials configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialsConfig {
    /// The number of games to play.
    pub trials: u64,
    /// The number of worker threads.
    pub workers: usize,
    /// Seed for reproducible runs, if not set each game seeds from the OS.
    pub seed: Option<u64>,
}

impl TrialsConfig {
    /// The default number of trials.
    pub const TRIALS: u64 = 100;

    fn validate(&self, game: &GameConfig) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        if game.max_turns == 0 {
            return Err(ConfigError::NoTurns);
        }

        Ok(())
    }

    /// Returns the random generator for a trial.
    fn trial_rng(&self, trial: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(trial_seed(seed, trial)),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for TrialsConfig {
    fn default() -> Self {
        Self {
            trials: Self::TRIALS,
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            seed: None,
        }
    }
}

/// Derives a trial seed from the run seed so that each trial has its own
/// stream independent from the worker that runs it.
fn trial_seed(seed: u64, trial: u64) -> u64 {
    seed.wrapping_add((trial + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A trial that didn't complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialFailure {
    /// The trial index.
    pub trial: u64,
    /// The game error.
    pub error: GameError,
}

/// The aggregated trials results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSummary {
    /// The number of trials run.
    pub trials: u64,
    /// Games won by player one.
    pub player1_wins: u64,
    /// Games won by player two.
    pub player2_wins: u64,
    /// Trials aborted with an error, ordered by trial index.
    pub failures: Vec<TrialFailure>,
    /// Turns played by all completed games.
    pub total_turns: u64,
    /// Wars in all completed games.
    pub total_wars: u64,
    /// The number of turns of the longest game.
    pub longest_game: u64,
    /// Wall time for all trials.
    pub elapsed: Duration,
}

impl TrialSummary {
    /// The number of completed games.
    pub fn completed(&self) -> u64 {
        self.player1_wins + self.player2_wins
    }

    /// The fraction of completed games won by player one.
    pub fn player1_ratio(&self) -> f64 {
        ratio(self.player1_wins, self.completed())
    }

    /// Average turns per completed game.
    pub fn mean_turns(&self) -> f64 {
        ratio(self.total_turns, self.completed())
    }

    /// Average wars per completed game.
    pub fn mean_wars(&self) -> f64 {
        ratio(self.total_wars, self.completed())
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}

/// Shared counters updated by the workers.
#[derive(Default)]
struct Counters {
    next_trial: AtomicU64,
    player1_wins: AtomicU64,
    player2_wins: AtomicU64,
    turns: AtomicU64,
    wars: AtomicU64,
    longest_game: AtomicU64,
    failures: Mutex<Vec<TrialFailure>>,
}

/// Plays `trials.trials` independent games on `trials.workers` threads.
///
/// Each trial shuffles its own deck with its own generator, workers pick the
/// next trial from a shared counter until all trials are done. Returns after
/// all trials have completed.
pub fn run_trials(trials: &TrialsConfig, game: &GameConfig) -> Result<TrialSummary, ConfigError> {
    trials.validate(game)?;

    let num_workers = trials.workers.min(usize::try_from(trials.trials).unwrap_or(usize::MAX));
    info!(
        "Running {} trials on {num_workers} workers with {} cards decks",
        trials.trials,
        game.deck.size()
    );

    let now = Instant::now();
    let counters = Counters::default();

    thread::scope(|s| {
        for _ in 0..num_workers {
            let counters = &counters;
            s.spawn(move || {
                loop {
                    let trial = counters.next_trial.fetch_add(1, Ordering::Relaxed);
                    if trial >= trials.trials {
                        break;
                    }

                    let mut war = War::new(game, trials.trial_rng(trial));
                    match war.play() {
                        Ok(outcome) => {
                            let wins = match outcome.winner {
                                Player::One => &counters.player1_wins,
                                Player::Two => &counters.player2_wins,
                            };

                            wins.fetch_add(1, Ordering::Relaxed);
                            counters.turns.fetch_add(outcome.turns, Ordering::Relaxed);
                            counters.wars.fetch_add(outcome.wars, Ordering::Relaxed);
                            counters.longest_game.fetch_max(outcome.turns, Ordering::Relaxed);
                        }
                        Err(e) => {
                            error!("Trial {trial} failed: {e}");
                            counters.failures.lock().push(TrialFailure { trial, error: e });
                        }
                    }
                }
            });
        }
    });

    let mut failures = counters.failures.into_inner();
    failures.sort_by_key(|f| f.trial);

    let summary = TrialSummary {
        trials: trials.trials,
        player1_wins: counters.player1_wins.into_inner(),
        player2_wins: counters.player2_wins.into_inner(),
        failures,
        total_turns: counters.turns.into_inner(),
        total_wars: counters.wars.into_inner(),
        longest_game: counters.longest_game.into_inner(),
        elapsed: now.elapsed(),
    };

    info!(
        "Completed {} trials in {:.3}s, {} failed",
        summary.completed(),
        summary.elapsed.as_secs_f64(),
        summary.failures.len()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warsim_cards::DeckConfig;

    fn seeded(trials: u64, workers: usize, seed: u64) -> TrialsConfig {
        TrialsConfig {
            trials,
            workers,
            seed: Some(seed),
        }
    }

    #[test]
    fn wins_add_up() {
        let game = GameConfig::default();
        for (trials, workers) in [(1, 1), (100, 4), (37, 8), (5, 16)] {
            let summary = run_trials(&seeded(trials, workers, 11), &game).unwrap();
            assert_eq!(summary.trials, trials);
            assert_eq!(summary.player1_wins + summary.player2_wins, trials);
            assert!(summary.failures.is_empty());
            assert!(summary.longest_game > 0);
            assert!(summary.total_turns >= summary.longest_game);
        }
    }

    #[test]
    fn unseeded_wins_add_up() {
        let trials = TrialsConfig {
            trials: 50,
            workers: 4,
            seed: None,
        };

        let summary = run_trials(&trials, &GameConfig::default()).unwrap();
        assert_eq!(summary.completed(), 50);
    }

    #[test]
    fn parallel_matches_sequential() {
        let game = GameConfig::default();
        let sequential = run_trials(&seeded(200, 1, 7), &game).unwrap();
        let parallel = run_trials(&seeded(200, 8, 7), &game).unwrap();

        assert_eq!(sequential.player1_wins, parallel.player1_wins);
        assert_eq!(sequential.player2_wins, parallel.player2_wins);
        assert_eq!(sequential.total_turns, parallel.total_turns);
        assert_eq!(sequential.total_wars, parallel.total_wars);
        assert_eq!(sequential.longest_game, parallel.longest_game);
    }

    #[test]
    fn trial_seeds_differ() {
        let seeds = (0..1000)
            .map(|t| trial_seed(5, t))
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(seeds.len(), 1000);
    }

    #[test]
    fn wins_are_balanced() {
        // Both halves are dealt from a uniform shuffle so the odds are even.
        let summary = run_trials(&seeded(2000, 4, 3), &GameConfig::default()).unwrap();
        let ratio = summary.player1_ratio();
        assert!((0.4..0.6).contains(&ratio), "ratio {ratio}");
        assert!(summary.mean_turns() > 1.0);
        assert!(summary.mean_wars() > 0.0);
    }

    #[test]
    fn failures_are_reported() {
        let game = GameConfig {
            max_turns: 1,
            ..GameConfig::default()
        };

        let summary = run_trials(&seeded(10, 3, 1), &game).unwrap();
        assert_eq!(summary.completed(), 0);
        assert_eq!(summary.failures.len(), 10);
        assert_eq!(summary.player1_ratio(), 0.0);

        for (idx, failure) in summary.failures.iter().enumerate() {
            assert_eq!(failure.trial, idx as u64);
            assert_eq!(failure.error, GameError::TurnLimit { turns: 1 });
        }
    }

    #[test]
    fn other_layouts() {
        let game = GameConfig {
            deck: DeckConfig::numbered(3, 5).unwrap(),
            ..GameConfig::default()
        };

        let summary = run_trials(&seeded(64, 4, 2), &game).unwrap();
        assert_eq!(summary.completed(), 64);
    }

    #[test]
    fn invalid_config() {
        let game = GameConfig::default();
        assert_eq!(
            run_trials(&seeded(0, 1, 0), &game),
            Err(ConfigError::NoTrials)
        );
        assert_eq!(
            run_trials(&seeded(1, 0, 0), &game),
            Err(ConfigError::NoWorkers)
        );

        let game = GameConfig {
            max_turns: 0,
            ..GameConfig::default()
        };
        assert_eq!(run_trials(&seeded(1, 1, 0), &game), Err(ConfigError::NoTurns));
    }
}
