use thiserror::Error;

/// Failures raised at the validation boundaries of the core.
///
/// Scoring itself never fails; these only come out of constructing a
/// draw size or points table, or mutating a [`crate::Draw`].
#[derive(Debug, Error)]
pub enum BracketError {
    #[error("draw size {0} is not a power of two of at least 2")]
    InvalidDrawSize(u32),

    #[error("points for round {round} must be a non-negative number, got {value}")]
    NegativePoints { round: u32, value: f64 },

    #[error("unknown match: {0}")]
    UnknownMatch(String),

    #[error("match {0} does not have both participants yet")]
    MatchNotReady(String),

    #[error("{player} is not a participant of match {match_id}")]
    NotAParticipant { match_id: String, player: String },

    #[error("expected {expected} entrants, found {found}")]
    EntrantCount { expected: usize, found: usize },

    #[error("invalid points value {value:?} on line {line}")]
    ParsePoints { line: usize, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BracketError>;

#[cfg(feature = "python")]
impl From<BracketError> for pyo3::PyErr {
    fn from(err: BracketError) -> Self {
        use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};

        match err {
            BracketError::UnknownMatch(_) => PyKeyError::new_err(err.to_string()),
            BracketError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
