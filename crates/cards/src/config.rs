// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deck layout configuration and cards formatting.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// The default suits labels.
const DEFAULT_LABELS: [&str; 4] = ["♠", "♡", "♢", "♣"];

/// Labels for the ranks above ten when a suit has 13 ranks.
const FACES: [&str; 4] = ["J", "Q", "K", "A"];

/// The number of ranks with the standard faces layout.
const STANDARD_RANKS: u32 = 13;

/// Invalid deck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The deck must have at least one suit.
    #[error("the number of suits must be positive")]
    NoSuits,
    /// A suit must have at least one rank.
    #[error("the number of ranks must be positive")]
    NoRanks,
    /// There are fewer labels than suits.
    #[error("{suits} suits need at least {suits} labels, got {labels}")]
    MissingLabels {
        /// The configured number of suits.
        suits: u32,
        /// The number of labels provided.
        labels: usize,
    },
    /// The deck identities don't fit a card id.
    #[error("a deck with {suits} suits and {ranks} ranks is too large")]
    TooLarge {
        /// The configured number of suits.
        suits: u32,
        /// The configured number of ranks.
        ranks: u32,
    },
}

/// The deck layout: number of suits, ranks per suit and suits labels.
///
/// A config is validated on construction, deserialization included, so any
/// deck built from it has at least one card and every suit has a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeckConfig")]
pub struct DeckConfig {
    suits: u32,
    ranks: u32,
    labels: Vec<String>,
}

/// Unchecked deserialized config.
#[derive(Deserialize)]
struct RawDeckConfig {
    suits: u32,
    ranks: u32,
    labels: Vec<String>,
}

impl TryFrom<RawDeckConfig> for DeckConfig {
    type Error = ConfigError;

    fn try_from(raw: RawDeckConfig) -> Result<Self, Self::Error> {
        DeckConfig::new(raw.suits, raw.ranks, raw.labels)
    }
}

impl DeckConfig {
    /// Creates a config with the given suits labels.
    pub fn new<I, S>(suits: u32, ranks: u32, labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if suits == 0 {
            return Err(ConfigError::NoSuits);
        }

        if ranks == 0 {
            return Err(ConfigError::NoRanks);
        }

        if suits.checked_mul(ranks).is_none() {
            return Err(ConfigError::TooLarge { suits, ranks });
        }

        let labels = labels.into_iter().map(Into::into).collect::<Vec<_>>();
        if labels.len() < suits as usize {
            return Err(ConfigError::MissingLabels {
                suits,
                labels: labels.len(),
            });
        }

        Ok(Self {
            suits,
            ranks,
            labels,
        })
    }

    /// Creates a config with generated suits labels `S0`, `S1`, ...
    pub fn numbered(suits: u32, ranks: u32) -> Result<Self, ConfigError> {
        Self::new(suits, ranks, (0..suits).map(|s| format!("S{s}")))
    }

    /// The number of suits.
    pub fn suits(&self) -> u32 {
        self.suits
    }

    /// The number of ranks per suit.
    pub fn ranks(&self) -> u32 {
        self.ranks
    }

    /// The suits labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The number of cards in a full deck.
    pub fn size(&self) -> usize {
        self.suits as usize * self.ranks as usize
    }

    /// Returns the suit of a card in this layout.
    pub fn suit_of(&self, card: Card) -> Suit {
        card.suit(self.ranks)
    }

    /// Returns the rank of a card in this layout.
    pub fn rank_of(&self, card: Card) -> Rank {
        card.rank(self.ranks)
    }

    /// Returns the label of a suit.
    pub fn suit_label(&self, suit: Suit) -> &str {
        &self.labels[suit.index()]
    }

    /// Returns a displayable label for a card, e.g. `4♡` or `A♠`.
    ///
    /// With 13 ranks per suit the ranks show as 2 to 10 then J, Q, K, A followed
    /// by the suit label, with any other number of ranks the zero based rank is
    /// shown instead.
    pub fn label(&self, card: Card) -> CardLabel<'_> {
        CardLabel { config: self, card }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            suits: DEFAULT_LABELS.len() as u32,
            ranks: STANDARD_RANKS,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A card formatted with its deck layout.
#[derive(Debug, Clone, Copy)]
pub struct CardLabel<'a> {
    config: &'a DeckConfig,
    card: Card,
}

impl fmt::Display for CardLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = self.config.rank_of(self.card).value();
        if self.config.ranks != STANDARD_RANKS {
            return write!(f, "{rank}");
        }

        let suit = self.config.suit_label(self.config.suit_of(self.card));
        if rank < 9 {
            write!(f, "{}{suit}", rank + 2)
        } else {
            write!(f, "{}{suit}", FACES[rank as usize - 9])
        }
    }
}
