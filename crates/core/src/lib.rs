// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! War card game simulator.
//!
//! Plays the two players card game War on a shuffled deck with [War] and runs
//! many independent games in parallel with [run_trials] to estimate how often
//! each side wins:
//!
//! ```
//! # use warsim_core::*;
//! let trials = TrialsConfig {
//!     trials: 20,
//!     workers: 2,
//!     seed: Some(42),
//! };
//!
//! let summary = run_trials(&trials, &GameConfig::default()).unwrap();
//! assert_eq!(summary.player1_wins + summary.player2_wins, 20);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod trials;
pub use trials::{ConfigError, TrialFailure, TrialSummary, TrialsConfig, run_trials};

pub mod war;
pub use war::{GameConfig, GameError, GameOutcome, Player, War};

// Reexport cards types.
pub use warsim_cards::{Card, Deck, DeckConfig, Rank, Suit};
