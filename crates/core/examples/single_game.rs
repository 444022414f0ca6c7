// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example single_game -- 42
// ```

use rand::{SeedableRng, rngs::StdRng};

use warsim_core::{Deck, GameConfig, War};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let deck = Deck::new_and_shuffled(&config.deck, &mut rng);

    let (p1, p2) = deck.clone().cut();
    for (name, hand) in [("Player 1", &p1), ("Player 2", &p2)] {
        let cards = hand
            .cards()
            .into_iter()
            .map(|c| config.deck.label(c).to_string())
            .collect::<Vec<_>>();
        println!("{name}: {}", cards.join(" "));
    }

    match War::new(&config, rng).play_deck(deck) {
        Ok(outcome) => {
            println!("Winner:  {}", outcome.winner);
            println!("Turns:   {}", outcome.turns);
            println!("Wars:    {}", outcome.wars);
            println!("Elapsed: {:?}", outcome.elapsed);
        }
        Err(e) => eprintln!("Game failed: {e}"),
    }
}
