//! Error types raised while building a grid or a simulation.
//!
//! Every variant is detected at construction time; analysing or committing a tick never fails.

use crate::rules::RuleKind;
use thiserror::Error;

/// Malformed neighbor pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("neighbor pattern group {group}: {reason} (token {token:?})")]
pub struct PatternError {
    /// Zero-based index of the `/`-separated group.
    pub group: usize,
    /// The offending token, or the whole group when tokens are missing.
    pub token: String,
    pub reason: &'static str,
}

/// Errors that can occur while constructing a grid or a rule set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// Declared grid size disagrees with the number of initial states.
    #[error("grid inconsistency: a {rows}x{cols} grid needs {expected} initial states, found {actual}")]
    GridInconsistency {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    /// An initial state token is not a non-negative integer.
    #[error("invalid initial state {token:?} at position {position}")]
    InvalidStateToken { position: usize, token: String },

    /// The neighbor pattern could not be parsed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A rule set needs a parameter the configuration does not provide.
    #[error("{kind} simulation requires parameter `{name}`")]
    MissingParameter { kind: RuleKind, name: &'static str },

    /// The declared simulation type names no known rule set.
    #[error("unknown simulation type {0:?}")]
    UnknownSimulation(String),

    /// Grid with zero rows or columns.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
}

impl AutomatonError {
    /// True for errors caused by grid dimensions disagreeing with the supplied states.
    pub fn is_grid_inconsistency(&self) -> bool {
        matches!(self, AutomatonError::GridInconsistency { .. })
    }
}
