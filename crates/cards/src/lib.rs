// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! War simulator cards types.
//!
//! A deck layout is described by a [DeckConfig], the number of suits, the
//! number of ranks per suit and the suits labels:
//!
//! ```
//! # use warsim_cards::{Card, DeckConfig};
//! let config = DeckConfig::default();
//! assert_eq!(config.size(), 52);
//!
//! let ace = Card::new(12);
//! assert_eq!(config.label(ace).to_string(), "A♠");
//! ```
//!
//! and a [Deck] type for shuffling, cutting, riffling and dealing cards:
//!
//! ```
//! # use warsim_cards::{Deck, DeckConfig};
//! # use rand::{SeedableRng, rngs::StdRng};
//! let config = DeckConfig::default();
//! let mut deck = Deck::new(&config);
//! deck.shuffle(&mut StdRng::seed_from_u64(7));
//!
//! let (mut p1, p2) = deck.cut();
//! assert_eq!(p1.len() + p2.len(), config.size());
//!
//! let card = p1.top().unwrap();
//! p1.add([card]);
//! assert_eq!(p1.len(), 26);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod config;
pub use config::{CardLabel, ConfigError, DeckConfig};

mod deck;
pub use deck::{Card, Deck, Rank, Suit, riffle};
