use pyo3::prelude::*;
use std::collections::BTreeMap;

use crate::constants::DEFAULT_POINTS;
use crate::leaderboard::{leaderboard, Entry};
use crate::points::PointsTable;
use crate::scoring::{score_picks, MatchResult, Pick};
use crate::topology::{self, DrawSize};

/// Points table exposed to Python.
#[pyclass(name = "PointsTable")]
#[derive(Clone, Debug, Default)]
pub struct PyPointsTable {
    inner: PointsTable,
}

#[pymethods]
impl PyPointsTable {
    #[new]
    #[pyo3(signature = (points = None))]
    pub fn new(points: Option<Vec<f64>>) -> PyResult<Self> {
        Ok(PyPointsTable {
            inner: table_from(points)?,
        })
    }

    /// Read a table from a file of comma or newline separated values.
    #[staticmethod]
    pub fn read_from_file(filepath: &str) -> PyResult<Self> {
        Ok(PyPointsTable {
            inner: PointsTable::read_from_file(filepath)?,
        })
    }

    pub fn points_for(&self, round: u32) -> f64 {
        self.inner.points_for(round)
    }

    pub fn max_total(&self, draw_size: u32) -> PyResult<f64> {
        Ok(self.inner.max_total(DrawSize::new(draw_size)?))
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("PointsTable({:?})", self.inner.as_slice())
    }
}

fn table_from(points_per_round: Option<Vec<f64>>) -> PyResult<PointsTable> {
    Ok(match points_per_round {
        Some(p) => PointsTable::new(p)?,
        None => PointsTable::default(),
    })
}

fn picks_from(picks: Vec<(String, String)>) -> Vec<Pick> {
    picks.into_iter().map(|(m, w)| Pick::new(m, w)).collect()
}

fn results_from(results: Vec<(String, String, u32)>) -> Vec<MatchResult> {
    results
        .into_iter()
        .map(|(m, w, round)| MatchResult::new(m, w, round))
        .collect()
}

#[pyfunction]
fn rounds_count(draw_size: u32) -> PyResult<u32> {
    Ok(topology::rounds_count(DrawSize::new(draw_size)?))
}

#[pyfunction]
fn round_title(draw_size: u32, round: u32) -> PyResult<String> {
    Ok(topology::round_title(DrawSize::new(draw_size)?, round))
}

#[pyfunction]
fn round_titles(draw_size: u32) -> PyResult<Vec<String>> {
    Ok(topology::round_titles(DrawSize::new(draw_size)?))
}

/// Score `(match_id, winner_id)` picks against `(match_id, winner_id, round)` results.
///
/// Returns `(total, by_round)`.
#[pyfunction]
#[pyo3(name = "score_picks", signature = (picks, results, points_per_round = None))]
fn py_score_picks(
    picks: Vec<(String, String)>,
    results: Vec<(String, String, u32)>,
    points_per_round: Option<Vec<f64>>,
) -> PyResult<(f64, BTreeMap<u32, f64>)> {
    let table = table_from(points_per_round)?;
    let score = score_picks(&picks_from(picks), &results_from(results), &table);
    Ok((score.total, score.by_round))
}

/// Rank entries given as `{label: picks}`.
///
/// Returns `(rank, label, total)` rows, best first.
#[pyfunction]
#[pyo3(name = "leaderboard", signature = (entries, results, points_per_round = None))]
fn py_leaderboard(
    py: Python<'_>,
    entries: BTreeMap<String, Vec<(String, String)>>,
    results: Vec<(String, String, u32)>,
    points_per_round: Option<Vec<f64>>,
) -> PyResult<Vec<(usize, String, f64)>> {
    let table = table_from(points_per_round)?;
    let entries: Vec<Entry> = entries
        .into_iter()
        .map(|(label, picks)| Entry::new(label, picks_from(picks)))
        .collect();
    let results = results_from(results);

    let standings = py.allow_threads(|| leaderboard(&entries, &results, &table));
    Ok(standings
        .into_iter()
        .map(|s| (s.rank, s.label, s.score.total))
        .collect())
}

/// Python module definition
#[pymodule]
fn bracket_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPointsTable>()?;

    m.add_function(wrap_pyfunction!(rounds_count, m)?)?;
    m.add_function(wrap_pyfunction!(round_title, m)?)?;
    m.add_function(wrap_pyfunction!(round_titles, m)?)?;

    m.add_function(wrap_pyfunction!(py_score_picks, m)?)?;
    m.add_function(wrap_pyfunction!(py_leaderboard, m)?)?;

    m.add("DEFAULT_POINTS", DEFAULT_POINTS.to_vec())?;

    Ok(())
}
