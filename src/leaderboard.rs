use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::points::PointsTable;
use crate::scoring::{score_picks, MatchResult, Pick, ScoreBreakdown};

/// One entrant's saved picks for a draw.
#[derive(Clone, Debug)]
pub struct Entry {
    pub label: String,
    pub picks: Vec<Pick>,
}

impl Entry {
    pub fn new(label: impl Into<String>, picks: Vec<Pick>) -> Self {
        Entry {
            label: label.into(),
            picks,
        }
    }
}

/// An entrant's place on the leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    /// 1-based; tied totals share a rank and the next rank skips
    pub rank: usize,
    pub label: String,
    pub score: ScoreBreakdown,
}

/// Score every entry against the results and rank them.
///
/// Entries are scored in parallel. Ordering is by total descending,
/// then label.
pub fn leaderboard(
    entries: &[Entry],
    results: &[MatchResult],
    points: &PointsTable,
) -> Vec<Standing> {
    let mut scored: Vec<(String, ScoreBreakdown)> = entries
        .par_iter()
        .map(|entry| (entry.label.clone(), score_picks(&entry.picks, results, points)))
        .collect();

    scored.sort_by(|a, b| b.1.total.total_cmp(&a.1.total).then_with(|| a.0.cmp(&b.0)));

    let mut standings: Vec<Standing> = Vec::with_capacity(scored.len());
    for (i, (label, score)) in scored.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.score.total == score.total => prev.rank,
            _ => i + 1,
        };
        standings.push(Standing { rank, label, score });
    }

    standings
}

/// Spread of totals across a leaderboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeaderboardSummary {
    pub entries: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 with fewer than two entries
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn summarize(standings: &[Standing]) -> LeaderboardSummary {
    if standings.is_empty() {
        return LeaderboardSummary::default();
    }

    let totals: Vec<f64> = standings.iter().map(|s| s.score.total).collect();
    let std_dev = if totals.len() < 2 { 0.0 } else { totals.iter().std_dev() };

    LeaderboardSummary {
        entries: totals.len(),
        mean: totals.iter().mean(),
        std_dev,
        min: Statistics::min(totals.iter()),
        max: Statistics::max(totals.iter()),
    }
}
