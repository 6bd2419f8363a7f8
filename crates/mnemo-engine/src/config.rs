//! Game configuration: scoring rules and the card symbol alphabet.

use serde::{Deserialize, Serialize};

/// The symbol alphabet decks are drawn from.
///
/// A deck of `pair_count` pairs uses the first `pair_count` symbols,
/// each exactly twice. This caps `pair_count` at 16.
pub const SYMBOLS: [char; 16] = [
    'Α', 'Β', 'Γ', 'Δ', 'Ε', 'Ζ', 'Η', 'Θ', 'Ι', 'Κ', 'Λ', 'Μ', 'Ν', 'Ξ',
    'Ο', 'Π',
];

/// Scoring and deck-size settings for a game.
///
/// One `GameConfig` is shared by every room on a server; per-room
/// configuration is not a thing in this game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Each player's score at the start of a game.
    pub starting_score: u32,

    /// Deducted from the acting player's score on every mismatch,
    /// floored at 0.
    pub penalty: u32,

    /// Number of symbol pairs per deck. Must be `1..=SYMBOLS.len()`;
    /// anything else is a configuration error, not a runtime condition.
    pub pair_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_score: 100,
            penalty: 4,
            pair_count: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_standard_rules() {
        let config = GameConfig::default();
        assert_eq!(config.starting_score, 100);
        assert_eq!(config.penalty, 4);
        assert_eq!(config.pair_count, 8);
    }

    #[test]
    fn test_symbol_alphabet_has_no_duplicates() {
        let mut symbols = SYMBOLS.to_vec();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), SYMBOLS.len());
    }
}
