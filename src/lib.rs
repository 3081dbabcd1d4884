//! Bracket Core - round structure and pick scoring for single-elimination draws.
//!
//! The topology functions label the rounds of a power-of-two draw, and the
//! scoring engine grades an entrant's picks against recorded results with
//! round-weighted points. Python bindings are available behind the
//! `python` feature.

pub mod constants;
pub mod draw;
pub mod error;
pub mod leaderboard;
pub mod points;
pub mod scoring;
pub mod topology;

#[cfg(feature = "python")]
mod python;

pub use constants::{DEFAULT_DRAW_SIZE, DEFAULT_POINTS, MIN_DRAW_SIZE};
pub use draw::{match_id, Draw, Match};
pub use error::{BracketError, Result};
pub use leaderboard::{leaderboard, summarize, Entry, LeaderboardSummary, Standing};
pub use points::PointsTable;
pub use scoring::{score_picks, score_picks_default, MatchResult, Pick, ScoreBreakdown};
pub use topology::{matches_in_round, round_title, round_titles, rounds_count, DrawSize};
