// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and deck definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

use crate::DeckConfig;

/// A playing card.
///
/// A card is identified by an integer in `0..suits * ranks`, the suit and rank
/// are derived from the identity given the deck layout:
///
/// ```text
///   suit = id / ranks
///   rank = id % ranks
/// ```
///
/// so that a full deck in canonical order is the identity range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// Creates a card with the given identity.
    pub const fn new(id: u32) -> Card {
        Self(id)
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the card suit for a deck with `ranks` ranks per suit.
    #[inline]
    pub fn suit(&self, ranks: u32) -> Suit {
        Suit(self.0 / ranks)
    }

    /// Returns the card rank for a deck with `ranks` ranks per suit.
    #[inline]
    pub fn rank(&self, ranks: u32) -> Rank {
        Rank(self.0 % ranks)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card suit, an index into the deck suits labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Suit(u32);

impl Suit {
    /// The zero based suit index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Card rank, the value compared when two cards are played against each other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u32);

impl Rank {
    /// The zero based rank value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A cards deck.
///
/// The front of the deck is the top, cards are dealt from the top and added
/// to the bottom. Each deck owns its cards, cutting or dealing never shares
/// storage between decks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Creates a full deck in canonical order.
    pub fn new(config: &DeckConfig) -> Self {
        let size = config.size() as u32;
        Self {
            cards: (0..size).map(Card).collect(),
        }
    }

    /// Creates a deck with no cards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a full deck and shuffles it.
    pub fn new_and_shuffled<R: Rng + ?Sized>(config: &DeckConfig, rng: &mut R) -> Self {
        let mut deck = Self::new(config);
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the deck in place.
    ///
    /// Fisher-Yates: each card at index i is swapped with a card at a uniformly
    /// random index in `0..=i`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..self.cards.len() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Shuffles the deck using a freshly seeded thread local generator.
    pub fn shuffle_from_entropy(&mut self) {
        self.shuffle(&mut rand::rng());
    }

    /// Cuts the deck at its midpoint.
    ///
    /// Returns `(bottom, top)` where top holds the first `len / 2` cards, for
    /// odd sized decks the bottom half gets the extra card.
    pub fn cut(mut self) -> (Deck, Deck) {
        let h = self.cards.len() / 2;
        let bottom = self.cards.split_off(h);
        (Deck { cards: bottom }, self)
    }

    /// Cuts the deck into `parts` contiguous piles, top pile first.
    ///
    /// Piles sizes differ by at most one card with the larger piles first.
    pub fn cut_into(mut self, parts: usize) -> Vec<Deck> {
        if parts == 0 {
            return Vec::new();
        }

        let (size, extra) = (self.cards.len() / parts, self.cards.len() % parts);
        (0..parts)
            .map(|idx| {
                let n = size + usize::from(idx < extra);
                let rest = self.cards.split_off(n);
                Deck {
                    cards: std::mem::replace(&mut self.cards, rest),
                }
            })
            .collect()
    }

    /// Deals the top card, returns `None` if the deck is empty.
    pub fn top(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Deals up to `n` cards from the top.
    ///
    /// If the deck has fewer than `n` cards it returns all of them and the
    /// deck becomes empty.
    pub fn top_n(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Adds cards to the bottom of the deck keeping their order.
    pub fn add<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    /// Removes all cards from the deck, top first.
    pub fn take_all(&mut self) -> Vec<Card> {
        self.cards.drain(..).collect()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Sorts the deck in canonical order.
    pub fn sort(&mut self) {
        self.cards.make_contiguous().sort_unstable();
    }

    /// Iterates the cards from the top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> + ExactSizeIterator {
        self.cards.iter()
    }

    /// Returns the cards from the top as a vector.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

/// Merges two decks with a mechanical riffle.
///
/// Cards alternate one from each deck starting with `d1` until one of them is
/// empty, then the rest of the other deck follows in order.
pub fn riffle(mut d1: Deck, mut d2: Deck) -> Deck {
    let mut deck = Deck::empty();
    while !d1.is_empty() && !d2.is_empty() {
        deck.add(d1.top());
        deck.add(d2.top());
    }

    deck.add(d1);
    deck.add(d2);
    deck
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::collections::vec_deque::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
