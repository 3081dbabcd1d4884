use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::DEFAULT_POINTS;
use crate::error::{BracketError, Result};
use crate::topology::{matches_in_round, rounds_count, DrawSize};

/// Points awarded for a correct pick, indexed by round.
///
/// Index 0 holds round 1. Rounds past the end of the table are worth
/// nothing rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct PointsTable {
    points: Vec<f64>,
}

impl Default for PointsTable {
    fn default() -> Self {
        PointsTable {
            points: DEFAULT_POINTS.to_vec(),
        }
    }
}

impl PointsTable {
    /// Create a table, rejecting negative or non-finite values.
    pub fn new(points: Vec<f64>) -> Result<Self> {
        for (i, &value) in points.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(BracketError::NegativePoints {
                    round: i as u32 + 1,
                    value,
                });
            }
        }
        Ok(PointsTable { points })
    }

    /// Read a table from a file.
    /// Format: values separated by commas or newlines, `#` starts a comment
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut points = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            parse_line(&line?, n + 1, &mut points)?;
        }

        debug!("loaded {} round values from {}", points.len(), path.display());
        PointsTable::new(points)
    }

    /// Parse a table from text in the same format as [`PointsTable::read_from_file`].
    pub fn parse(text: &str) -> Result<Self> {
        let mut points = Vec::new();
        for (n, line) in text.lines().enumerate() {
            parse_line(line, n + 1, &mut points)?;
        }
        PointsTable::new(points)
    }

    /// Points for a correct pick in `round` (1-indexed).
    pub fn points_for(&self, round: u32) -> f64 {
        round
            .checked_sub(1)
            .and_then(|i| self.points.get(i as usize))
            .copied()
            .unwrap_or(0.0)
    }

    /// Score of a perfect bracket over the whole draw.
    pub fn max_total(&self, draw_size: DrawSize) -> f64 {
        (1..=rounds_count(draw_size))
            .map(|round| matches_in_round(draw_size, round) as f64 * self.points_for(round))
            .sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn parse_line(line: &str, line_no: usize, points: &mut Vec<f64>) -> Result<()> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };

    for part in line.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: f64 = part.parse().map_err(|_| BracketError::ParsePoints {
            line: line_no,
            value: part.to_string(),
        })?;
        points.push(value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table() {
        let table = PointsTable::default();
        assert_eq!(table.len(), 7);
        assert_eq!(table.points_for(1), 10.0);
        assert_eq!(table.points_for(7), 200.0);
    }

    #[test]
    fn test_points_out_of_range() {
        let table = PointsTable::default();
        assert_eq!(table.points_for(0), 0.0);
        assert_eq!(table.points_for(8), 0.0);
        assert_eq!(table.points_for(u32::MAX), 0.0);
    }

    #[test]
    fn test_negative_points_rejected() {
        let err = PointsTable::new(vec![1.0, -2.0]).unwrap_err();
        assert!(matches!(err, BracketError::NegativePoints { round: 2, .. }));
        assert!(PointsTable::new(vec![f64::NAN]).is_err());
        assert!(PointsTable::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_parse() {
        let table = PointsTable::parse("# classic\n1, 2, 4\n8\n\n16,32 # late rounds\n").unwrap();
        assert_eq!(table.as_slice(), &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0]);

        let err = PointsTable::parse("1,2\n3,x").unwrap_err();
        assert!(matches!(err, BracketError::ParsePoints { line: 2, ref value } if value == "x"));
    }

    #[test]
    fn test_read_from_file() {
        let path = std::env::temp_dir().join(format!("bracket_points_{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "10,20,30,50,80,120,200").unwrap();
        }

        let table = PointsTable::read_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(table, PointsTable::default());

        assert!(matches!(
            PointsTable::read_from_file(&path),
            Err(BracketError::Io(_))
        ));
    }

    #[test]
    fn test_max_total() {
        let table = PointsTable::default();
        let draw = DrawSize::new(128).unwrap();
        // 64*10 + 32*20 + 16*30 + 8*50 + 4*80 + 2*120 + 1*200
        assert_eq!(table.max_total(draw), 2920.0);

        // Rounds the table does not cover add nothing
        let short = PointsTable::new(vec![1.0]).unwrap();
        assert_eq!(short.max_total(DrawSize::new(8).unwrap()), 4.0);
    }
}
