use serde::{Serialize, Deserialize};

/// Committed population of the grid at a specific tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    /// `population[s]` is the number of cells whose committed state is `s`.
    pub population: Vec<u64>,
}

impl Snapshot {
    /// Count for a single state, zero for states never seen.
    pub fn count(&self, state: usize) -> u64 {
        self.population.get(state).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.population.iter().sum()
    }
}
