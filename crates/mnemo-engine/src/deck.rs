//! Deck generation: paired symbol cards in a uniform random order.

use rand::seq::SliceRandom;

use crate::config::SYMBOLS;
use crate::model::Card;

/// Generates a shuffled deck of `2 * pair_count` cards, each of the
/// first `pair_count` symbols appearing exactly twice.
///
/// Card ids are assigned before the shuffle, so `card-{i}` says nothing
/// about a card's position. The shuffle is a Fisher–Yates permutation
/// from the thread RNG; decks are not reproducible across calls.
///
/// # Panics
///
/// Panics if `pair_count` is 0 or exceeds the symbol alphabet. Callers
/// get `pair_count` from validated configuration, so this is a
/// programming error rather than a recoverable condition.
pub fn generate(pair_count: usize) -> Vec<Card> {
    assert!(
        pair_count > 0 && pair_count <= SYMBOLS.len(),
        "pair_count must be between 1 and {}, got {pair_count}",
        SYMBOLS.len()
    );

    let symbols = &SYMBOLS[..pair_count];
    let mut deck: Vec<Card> = symbols
        .iter()
        .chain(symbols.iter())
        .enumerate()
        .map(|(i, &symbol)| Card {
            id: format!("card-{i}"),
            symbol,
            matched: false,
        })
        .collect();

    deck.shuffle(&mut rand::rng());
    deck
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_deck_has_two_of_each_symbol() {
        let deck = generate(8);
        assert_eq!(deck.len(), 16);

        let mut counts: HashMap<char, usize> = HashMap::new();
        for card in &deck {
            *counts.entry(card.symbol).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deck_starts_fully_unmatched() {
        let deck = generate(5);
        assert!(deck.iter().all(|c| !c.matched));
    }

    #[test]
    fn test_deck_uses_first_symbols_of_alphabet() {
        let deck = generate(3);
        for card in &deck {
            assert!(SYMBOLS[..3].contains(&card.symbol));
        }
    }

    #[test]
    fn test_card_ids_are_unique() {
        let deck = generate(SYMBOLS.len());
        let mut ids: Vec<&str> = deck.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    #[should_panic(expected = "pair_count")]
    fn test_zero_pairs_panics() {
        generate(0);
    }

    #[test]
    #[should_panic(expected = "pair_count")]
    fn test_too_many_pairs_panics() {
        generate(SYMBOLS.len() + 1);
    }
}
