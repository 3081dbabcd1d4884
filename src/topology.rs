use std::fmt;

use crate::constants::MIN_DRAW_SIZE;
use crate::error::{BracketError, Result};

/// Number of entrants in a single-elimination draw.
///
/// Always a power of two of at least 2, so the round count is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawSize(u32);

impl DrawSize {
    /// Validate a draw size. Non-powers-of-two are rejected instead of
    /// producing a fractional round count.
    pub fn new(size: u32) -> Result<Self> {
        if size < MIN_DRAW_SIZE || !size.is_power_of_two() {
            return Err(BracketError::InvalidDrawSize(size));
        }
        Ok(DrawSize(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DrawSize {
    type Error = BracketError;

    fn try_from(size: u32) -> Result<Self> {
        DrawSize::new(size)
    }
}

impl fmt::Display for DrawSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of rounds in the draw, log2 of its size.
pub fn rounds_count(draw_size: DrawSize) -> u32 {
    draw_size.0.trailing_zeros()
}

/// Number of matches played in `round` (1-indexed). Zero outside the draw.
pub fn matches_in_round(draw_size: DrawSize, round: u32) -> u32 {
    if round == 0 || round > rounds_count(draw_size) {
        return 0;
    }
    draw_size.0 >> round
}

/// Column header for a round.
///
/// The label is keyed on the players left once the round completes, so
/// round 1 of a 128 draw is "Round of 64" and its final round falls
/// through to "Round 7".
pub fn round_title(draw_size: DrawSize, round: u32) -> String {
    // None once the round lies past the final (fewer than one player left)
    let remaining = rounds_count(draw_size)
        .checked_sub(round)
        .map(|exp| 1u64 << exp);

    match remaining {
        Some(left) if left >= 64 => format!("Round of {}", left),
        Some(32) => "Round of 32".to_string(),
        Some(16) => "Round of 16".to_string(),
        Some(8) => "Quarterfinals".to_string(),
        Some(4) => "Semifinals".to_string(),
        Some(2) => "Final".to_string(),
        _ => format!("Round {}", round),
    }
}

/// Titles for every round of the draw, round 1 first.
pub fn round_titles(draw_size: DrawSize) -> Vec<String> {
    (1..=rounds_count(draw_size))
        .map(|round| round_title(draw_size, round))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> DrawSize {
        DrawSize::new(n).unwrap()
    }

    #[test]
    fn test_rounds_count() {
        assert_eq!(rounds_count(size(128)), 7);
        assert_eq!(rounds_count(size(64)), 6);
        assert_eq!(rounds_count(size(2)), 1);
    }

    #[test]
    fn test_invalid_draw_sizes_rejected() {
        for n in [0, 1, 3, 6, 96, 100, 127] {
            assert!(
                matches!(DrawSize::new(n), Err(BracketError::InvalidDrawSize(v)) if v == n),
                "{} should be rejected",
                n
            );
        }
        assert!(DrawSize::try_from(256).is_ok());
    }

    #[test]
    fn test_matches_in_round() {
        let draw = size(128);
        assert_eq!(matches_in_round(draw, 1), 64);
        assert_eq!(matches_in_round(draw, 6), 2);
        assert_eq!(matches_in_round(draw, 7), 1);
        assert_eq!(matches_in_round(draw, 0), 0);
        assert_eq!(matches_in_round(draw, 8), 0);

        let total: u32 = (1..=7).map(|r| matches_in_round(draw, r)).sum();
        assert_eq!(total, 127);
    }

    #[test]
    fn test_round_titles_128() {
        let draw = size(128);
        assert_eq!(round_title(draw, 1), "Round of 64");
        assert_eq!(round_title(draw, 2), "Round of 32");
        assert_eq!(round_title(draw, 3), "Round of 16");
        assert_eq!(round_title(draw, 4), "Quarterfinals");
        assert_eq!(round_title(draw, 5), "Semifinals");
        assert_eq!(round_title(draw, 6), "Final");
        // One player left matches no named case
        assert_eq!(round_title(draw, 7), "Round 7");
    }

    #[test]
    fn test_round_title_outside_draw() {
        let draw = size(128);
        assert_eq!(round_title(draw, 0), "Round of 128");
        assert_eq!(round_title(draw, 8), "Round 8");
        assert_eq!(round_title(draw, 40), "Round 40");
        assert_eq!(round_title(size(256), 1), "Round of 128");
    }

    #[test]
    fn test_round_title_small_draw() {
        let draw = size(8);
        assert_eq!(round_titles(draw), vec!["Semifinals", "Final", "Round 3"]);
    }

    #[test]
    fn test_round_title_deterministic() {
        for n in [2, 4, 8, 16, 32, 64, 128, 256, 1024] {
            let draw = size(n);
            for round in 0..=rounds_count(draw) + 1 {
                assert_eq!(round_title(draw, round), round_title(draw, round));
            }
        }
    }
}
