use log::{trace, warn};
use std::collections::{BTreeMap, HashMap};

use crate::points::PointsTable;

/// One entrant's predicted winner for a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pick {
    pub match_id: String,
    pub winner_id: String,
}

impl Pick {
    pub fn new(match_id: impl Into<String>, winner_id: impl Into<String>) -> Self {
        Pick {
            match_id: match_id.into(),
            winner_id: winner_id.into(),
        }
    }
}

/// Recorded outcome of a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchResult {
    pub match_id: String,
    pub winner_id: String,
    pub round: u32,
}

impl MatchResult {
    pub fn new(match_id: impl Into<String>, winner_id: impl Into<String>, round: u32) -> Self {
        MatchResult {
            match_id: match_id.into(),
            winner_id: winner_id.into(),
            round,
        }
    }
}

/// Score of one entrant's picks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub total: f64,

    /// Points per round. A round appears once any pick was checked
    /// against one of its results, even if every such pick was wrong.
    pub by_round: BTreeMap<u32, f64>,

    /// Picks that had a result to be checked against
    pub scored: usize,

    /// Scored picks naming the actual winner
    pub correct: usize,
}

/// Score picks against the known results.
///
/// Picks without a result are skipped. A correct pick earns the points of
/// the result's round; rounds the table does not cover earn 0. Duplicate
/// result ids resolve to the last one given.
pub fn score_picks(
    picks: &[Pick],
    results: &[MatchResult],
    points: &PointsTable,
) -> ScoreBreakdown {
    let mut by_match: HashMap<&str, &MatchResult> = HashMap::with_capacity(results.len());
    for result in results {
        if by_match.insert(result.match_id.as_str(), result).is_some() {
            warn!("duplicate result for match {}, keeping the last", result.match_id);
        }
    }

    let mut score = ScoreBreakdown::default();
    for pick in picks {
        let Some(result) = by_match.get(pick.match_id.as_str()) else {
            trace!("no result yet for match {}", pick.match_id);
            continue;
        };

        let correct = result.winner_id == pick.winner_id;
        let pts = if correct { points.points_for(result.round) } else { 0.0 };

        score.total += pts;
        *score.by_round.entry(result.round).or_insert(0.0) += pts;
        score.scored += 1;
        if correct {
            score.correct += 1;
        }
    }

    score
}

/// [`score_picks`] with the default points table.
pub fn score_picks_default(picks: &[Pick], results: &[MatchResult]) -> ScoreBreakdown {
    score_picks(picks, results, &PointsTable::default())
}
