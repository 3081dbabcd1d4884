use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

use crate::error::{BracketError, Result};
use crate::points::PointsTable;
use crate::scoring::{score_picks, MatchResult, Pick};
use crate::topology::{matches_in_round, round_title, rounds_count, DrawSize};

/// A match slot in the draw.
///
/// Participants stay empty until the feeding matches are decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub round: u32,
    pub index: u32,
    pub p1: Option<String>,
    pub p2: Option<String>,
    pub winner: Option<String>,
}

impl Match {
    fn empty(round: u32, index: u32) -> Self {
        Match {
            id: match_id(round, index),
            round,
            index,
            p1: None,
            p2: None,
            winner: None,
        }
    }

    /// Slot filled by the winner of feeding match `index`.
    fn slot_mut(&mut self, index: u32) -> &mut Option<String> {
        if index % 2 == 0 {
            &mut self.p1
        } else {
            &mut self.p2
        }
    }

    pub fn has_participant(&self, player: &str) -> bool {
        self.p1.as_deref() == Some(player) || self.p2.as_deref() == Some(player)
    }

    /// The participant that did not win, once decided.
    pub fn loser(&self) -> Option<&str> {
        let winner = self.winner.as_deref()?;
        [self.p1.as_deref(), self.p2.as_deref()]
            .into_iter()
            .flatten()
            .find(|&p| p != winner)
    }
}

/// Identifier of the match at `index` in `round`.
pub fn match_id(round: u32, index: u32) -> String {
    format!("r{}-m{}", round, index)
}

/// Single-elimination draw: every match of every round.
#[derive(Clone, Debug)]
pub struct Draw {
    size: DrawSize,
    /// Round 1 first, each round ordered by index
    matches: Vec<Match>,
    positions: HashMap<String, usize>,
}

impl Draw {
    /// Build an empty draw with all `size - 1` matches stubbed.
    pub fn new(size: DrawSize) -> Self {
        let mut matches = Vec::with_capacity(size.get() as usize - 1);
        for round in 1..=rounds_count(size) {
            for index in 0..matches_in_round(size, round) {
                matches.push(Match::empty(round, index));
            }
        }

        let positions = matches
            .iter()
            .enumerate()
            .map(|(pos, m)| (m.id.clone(), pos))
            .collect();

        Draw {
            size,
            matches,
            positions,
        }
    }

    /// Build a draw and pair up round 1 in entrant order.
    pub fn with_entrants(size: DrawSize, entrants: &[String]) -> Result<Self> {
        let mut draw = Draw::new(size);
        draw.seed_first_round(entrants)?;
        Ok(draw)
    }

    /// Fill round 1: match `i` gets entrants `2i` and `2i + 1`.
    pub fn seed_first_round(&mut self, entrants: &[String]) -> Result<()> {
        let expected = self.size.get() as usize;
        if entrants.len() != expected {
            return Err(BracketError::EntrantCount {
                expected,
                found: entrants.len(),
            });
        }

        for (m, pair) in self.matches.iter_mut().zip(entrants.chunks(2)) {
            m.p1 = Some(pair[0].clone());
            m.p2 = Some(pair[1].clone());
        }

        debug!("seeded {} entrants into a draw of {}", expected, self.size);
        Ok(())
    }

    pub fn size(&self) -> DrawSize {
        self.size
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.positions.get(match_id).map(|&pos| &self.matches[pos])
    }

    /// Matches grouped by round, each group ordered by index.
    pub fn rounds(&self) -> Vec<&[Match]> {
        let mut start = 0;
        (1..=rounds_count(self.size))
            .map(|round| {
                let end = start + matches_in_round(self.size, round) as usize;
                let slice = &self.matches[start..end];
                start = end;
                slice
            })
            .collect()
    }

    /// Round titles paired with their matches, for laying out the draw.
    pub fn columns(&self) -> Vec<(String, &[Match])> {
        self.rounds()
            .into_iter()
            .enumerate()
            .map(|(i, matches)| (round_title(self.size, i as u32 + 1), matches))
            .collect()
    }

    /// Record the winner of a match and advance them into the next round.
    ///
    /// Match `index` feeds match `index / 2`: even indexes fill the top
    /// slot, odd ones the bottom. Both participants must be known.
    /// Recording a different winner again resets every later match the
    /// old winner had reached.
    pub fn record_result(&mut self, id: &str, winner: &str) -> Result<()> {
        let pos = *self
            .positions
            .get(id)
            .ok_or_else(|| BracketError::UnknownMatch(id.to_string()))?;

        let m = &mut self.matches[pos];
        if m.p1.is_none() || m.p2.is_none() {
            return Err(BracketError::MatchNotReady(id.to_string()));
        }
        if !m.has_participant(winner) {
            return Err(BracketError::NotAParticipant {
                match_id: id.to_string(),
                player: winner.to_string(),
            });
        }
        let previous = m.winner.replace(winner.to_string());
        let (round, index) = (m.round, m.index);

        if round == rounds_count(self.size) {
            debug!("{} wins the draw", winner);
            return Ok(());
        }

        let next_pos = self.next_position(round, index);
        let next = &mut self.matches[next_pos];
        *next.slot_mut(index) = Some(winner.to_string());
        debug!("{} advances from {} to {}", winner, id, next.id);

        if previous.as_deref().is_some_and(|p| p != winner) && next.winner.take().is_some() {
            debug!("{} reset after correcting {}", next.id, id);
            self.clear_downstream(round + 1, index / 2);
        }
        Ok(())
    }

    fn next_position(&self, round: u32, index: u32) -> usize {
        self.positions[&match_id(round + 1, index / 2)]
    }

    /// Walk forward from a match whose winner was just cleared, emptying
    /// the slot it fed and undoing any decided match along the way.
    fn clear_downstream(&mut self, mut round: u32, mut index: u32) {
        while round < rounds_count(self.size) {
            let next_pos = self.next_position(round, index);
            let next = &mut self.matches[next_pos];
            *next.slot_mut(index) = None;
            if next.winner.take().is_none() {
                break;
            }
            debug!("{} reset", next.id);
            round += 1;
            index /= 2;
        }
    }

    /// Record several results in order, stopping at the first failure.
    pub fn record_results<'a, I>(&mut self, winners: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (id, winner) in winners {
            self.record_result(id, winner)?;
        }
        Ok(())
    }

    /// Decided matches as scoring input.
    pub fn results(&self) -> Vec<MatchResult> {
        self.matches
            .iter()
            .filter_map(|m| {
                m.winner
                    .as_ref()
                    .map(|w| MatchResult::new(m.id.clone(), w.clone(), m.round))
            })
            .collect()
    }

    /// Players who have lost a decided match.
    pub fn eliminated(&self) -> HashSet<&str> {
        self.matches.iter().filter_map(Match::loser).collect()
    }

    /// Best score the picks can still reach: points already earned plus
    /// every undecided match whose picked winner is still alive.
    pub fn max_possible(&self, picks: &[Pick], points: &PointsTable) -> f64 {
        let earned = score_picks(picks, &self.results(), points).total;
        let out = self.eliminated();

        let pending: f64 = picks
            .iter()
            .filter_map(|pick| {
                let m = self.get(&pick.match_id)?;
                if m.winner.is_some() || out.contains(pick.winner_id.as_str()) {
                    return None;
                }
                Some(points.points_for(m.round))
            })
            .sum();

        earned + pending
    }

    /// Fill out a complete bracket of picks by coin flip.
    ///
    /// Decided matches keep their real winner. Matches with no known
    /// contestant get no pick, and neither do the matches they feed.
    pub fn quick_pick(&self, seed: Option<u64>) -> Vec<Pick> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut picks = Vec::new();
        let mut advancing: Vec<Option<String>> = Vec::new();

        for (r, round) in self.rounds().into_iter().enumerate() {
            let mut winners = Vec::with_capacity(round.len());

            for (i, m) in round.iter().enumerate() {
                let (a, b) = if r == 0 {
                    (m.p1.clone(), m.p2.clone())
                } else {
                    (advancing[2 * i].clone(), advancing[2 * i + 1].clone())
                };

                let winner = match (&m.winner, a, b) {
                    (Some(w), _, _) => Some(w.clone()),
                    (None, Some(a), Some(b)) => Some(if rng.gen_bool(0.5) { a } else { b }),
                    (None, Some(only), None) | (None, None, Some(only)) => Some(only),
                    (None, None, None) => None,
                };

                if let Some(w) = &winner {
                    picks.push(Pick::new(m.id.clone(), w.clone()));
                }
                winners.push(winner);
            }

            advancing = winners;
        }

        picks
    }
}
