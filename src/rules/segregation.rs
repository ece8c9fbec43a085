use super::{Parameters, RuleKind, RuleSet};
use crate::cell::EMPTY;
use crate::error::AutomatonError;
use crate::grid::Grid;
use crate::resolver;
use log::{trace, warn};
use rand::Rng;

/// Schelling-style relocation of unsatisfied agents into random empty cells.
///
/// The empty pool is rebuilt from committed state at the start of each tick and
/// then updated in place during the sweep: a destination leaves the pool and the
/// vacated source joins it immediately, so later movers in the same sweep may
/// land where an earlier mover left.
#[derive(Debug, Clone)]
pub struct Segregation {
    threshold: f64,
    pool: Vec<usize>,
}

impl Segregation {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, pool: Vec::new() }
    }

    pub fn from_parameters(parameters: &Parameters) -> Result<Self, AutomatonError> {
        let threshold = parameters.require(RuleKind::Segregation, "segregation_threshold")?;
        Ok(Self::new(threshold))
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Empty pool as left by the last sweep.
    pub fn pool(&self) -> &[usize] {
        &self.pool
    }

    /// Fraction of neighbors sharing the cell's state, `None` for isolated cells.
    fn similarity(grid: &Grid, id: usize) -> Option<f64> {
        let total = grid.neighbors(id).len();
        if total == 0 {
            return None;
        }
        let similar = grid.count_neighbors_in_state(id, grid.state(id));
        Some(similar as f64 / total as f64)
    }

    /// An occupied cell relocates when strictly fewer than `threshold` of its neighbors agree.
    pub fn wants_to_relocate(&self, grid: &Grid, id: usize) -> bool {
        if grid.state(id) == EMPTY {
            return false;
        }
        matches!(Self::similarity(grid, id), Some(fraction) if fraction < self.threshold)
    }
}

impl RuleSet for Segregation {
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        resolver::begin_sweep(grid);
        self.pool = grid.empty_cells();

        let mut moved = 0;
        for id in 0..grid.len() {
            if !self.wants_to_relocate(grid, id) {
                continue;
            }
            let state = grid.state(id);

            let Some(target) = resolver::claim_random(grid, &self.pool, rng) else {
                warn!("Cell {} wants to relocate but no empty cell is left.", id);
                continue;
            };
            grid.set_next_state(target, state);
            grid.set_next_state(id, EMPTY);
            self.pool.retain(|&cell| cell != target);
            self.pool.push(id);
            moved += 1;
        }
        trace!("Segregation sweep: {} agents relocated.", moved);
    }
}
