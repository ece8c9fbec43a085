//! Cellular automaton engine with configurable neighbor topology.
//!
//! A tick is two phases: [`Automaton::analyze`] lets the active rule set write
//! next states (claiming movement destinations through [`resolver`]), and
//! [`Automaton::update`] commits them for every cell at once.

pub mod cell;
pub mod error;
pub mod grid;
pub mod resolver;
pub mod rules;
pub mod simulation;
pub mod topology;

pub use cell::{Cell, State, EMPTY};
pub use error::{AutomatonError, PatternError};
pub use grid::Grid;
pub use rules::{Parameters, RuleKind, RuleSet, Rules};
pub use simulation::Automaton;
pub use topology::{NeighborGroup, NeighborPattern};
