// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! War game engine.
//!
//! A game starts by cutting a shuffled deck in two, then at each turn both
//! players put their top card on a pile and the player with the higher rank
//! takes the whole pile. On a tie (a war) both players add up to `war_ante`
//! cards to the pile and the next turn decides who takes it. The game ends
//! when a player runs out of cards.
use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    time::{Duration, Instant},
};
use thiserror::Error;

use warsim_cards::{Card, Deck, DeckConfig};

/// A game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// The deck layout.
    pub deck: DeckConfig,
    /// The number of face down cards each player adds to the pile on a war.
    pub war_ante: usize,
    /// A game that doesn't end within this number of turns is aborted.
    pub max_turns: u64,
}

impl GameConfig {
    /// The default number of cards added on a war.
    pub const WAR_ANTE: usize = 3;
    /// The default turns limit.
    pub const MAX_TURNS: u64 = 1_000_000;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck: DeckConfig::default(),
            war_ante: Self::WAR_ANTE,
            max_turns: Self::MAX_TURNS,
        }
    }
}

/// A War player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player dealt the bottom half of the deck.
    One,
    /// The player dealt the top half of the deck.
    Two,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// The result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The player that won the game.
    pub winner: Player,
    /// The game wall time.
    pub elapsed: Duration,
    /// The number of turns played.
    pub turns: u64,
    /// The number of ties.
    pub wars: u64,
}

impl GameOutcome {
    /// Checks if player one won this game.
    pub fn player1_won(&self) -> bool {
        self.winner == Player::One
    }
}

/// A game that couldn't complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Cards have been lost or duplicated, this is a bookkeeping bug.
    #[error("turn {turn}: expected {expected} cards in play, found {found}")]
    Conservation {
        /// The turn where the check failed.
        turn: u64,
        /// The number of cards dealt at the start of the game.
        expected: usize,
        /// The number of cards counted.
        found: usize,
    },
    /// The game didn't end within the configured turns limit.
    #[error("game didn't end after {turns} turns")]
    TurnLimit {
        /// The number of turns played.
        turns: u64,
    },
}

/// The cards in play during a game.
#[derive(Debug)]
struct Table {
    p1: Deck,
    p2: Deck,
    pile: Deck,
    /// The number of cards dealt at the start of the game.
    size: usize,
}

impl Table {
    /// Deals a deck to the two players.
    fn deal(deck: Deck) -> Self {
        let size = deck.len();
        let (p1, p2) = deck.cut();
        Self {
            p1,
            p2,
            pile: Deck::empty(),
            size,
        }
    }

    /// Deals the top card of each player, the game is over if a player has
    /// no cards left.
    fn reveal(&mut self) -> Option<(Card, Card)> {
        match (self.p1.top(), self.p2.top()) {
            (Some(c1), Some(c2)) => Some((c1, c2)),
            (c1, c2) => {
                self.p1.add(c1);
                self.p2.add(c2);
                None
            }
        }
    }

    fn in_play(&self) -> usize {
        self.p1.len() + self.p2.len() + self.pile.len()
    }

    /// Checks no card has been lost or duplicated.
    fn check(&self, turn: u64) -> Result<(), GameError> {
        let found = self.in_play();
        if found != self.size {
            return Err(GameError::Conservation {
                turn,
                expected: self.size,
                found,
            });
        }

        Ok(())
    }
}

/// A War game engine.
///
/// The engine owns its random source used to shuffle the deck and the pile,
/// a seeded generator replays the same game.
#[derive(Debug)]
pub struct War<'a, R> {
    config: &'a GameConfig,
    rng: R,
}

impl<'a, R: Rng> War<'a, R> {
    /// Creates a game engine.
    pub fn new(config: &'a GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Plays a game with a new shuffled deck.
    pub fn play(&mut self) -> Result<GameOutcome, GameError> {
        let start = Instant::now();
        let deck = Deck::new_and_shuffled(&self.config.deck, &mut self.rng);
        self.play_table(Table::deal(deck), start)
    }

    /// Plays a game dealing the given deck as it is.
    pub fn play_deck(&mut self, deck: Deck) -> Result<GameOutcome, GameError> {
        self.play_table(Table::deal(deck), Instant::now())
    }

    fn play_table(
        &mut self,
        mut table: Table,
        start: Instant,
    ) -> Result<GameOutcome, GameError> {
        let ranks = self.config.deck.ranks();
        let mut turns = 0;
        let mut wars = 0;

        loop {
            table.check(turns)?;

            let Some((c1, c2)) = table.reveal() else {
                break;
            };

            if turns >= self.config.max_turns {
                return Err(GameError::TurnLimit { turns });
            }

            table.pile.add([c1, c2]);
            table.pile.shuffle(&mut self.rng);

            match c1.rank(ranks).cmp(&c2.rank(ranks)) {
                Ordering::Greater => table.p1.add(table.pile.take_all()),
                Ordering::Less => table.p2.add(table.pile.take_all()),
                Ordering::Equal => {
                    wars += 1;
                    // A player with fewer cards antes what is left.
                    table.pile.add(table.p1.top_n(self.config.war_ante));
                    table.pile.add(table.p2.top_n(self.config.war_ante));
                    table.pile.shuffle(&mut self.rng);
                }
            }

            turns += 1;
        }

        // If a war ante empties both hands player one takes the game.
        let winner = if table.p2.is_empty() {
            Player::One
        } else {
            Player::Two
        };

        let outcome = GameOutcome {
            winner,
            elapsed: start.elapsed(),
            turns,
            wars,
        };

        debug!(
            "Game won by {} after {} turns and {} wars in {:?}",
            outcome.winner, outcome.turns, outcome.wars, outcome.elapsed
        );

        Ok(outcome)
    }
}
