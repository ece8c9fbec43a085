use super::{clamp_probability, Parameters, RuleSet};
use crate::cell::{State, EMPTY};
use crate::grid::Grid;
use rand::Rng;

pub const TREE: State = 1;
pub const BURNING: State = 2;

/// Fire spreading through a forest, with optional regrowth.
///
/// Burning cells always burn out to empty. A tree next to fire ignites with
/// `burn_probability`. An empty cell next to a tree grows one with
/// `tree_probability`; it gets at most one draw per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadingOfFire {
    burn_probability: f64,
    tree_probability: f64,
}

impl Default for SpreadingOfFire {
    fn default() -> Self {
        Self { burn_probability: 1.0, tree_probability: 0.0 }
    }
}

impl SpreadingOfFire {
    pub fn new(burn_probability: f64, tree_probability: f64) -> Self {
        Self {
            burn_probability: clamp_probability(burn_probability),
            tree_probability: clamp_probability(tree_probability),
        }
    }

    pub fn from_parameters(parameters: &Parameters) -> Self {
        let default = Self::default();
        Self::new(
            parameters.get_or("burn_probability", default.burn_probability),
            parameters.get_or("tree_probability", default.tree_probability),
        )
    }

    pub fn burn_probability(&self) -> f64 {
        self.burn_probability
    }

    pub fn tree_probability(&self) -> f64 {
        self.tree_probability
    }

    fn has_neighbor_in(grid: &Grid, id: usize, state: State) -> bool {
        grid.neighbors(id).iter().any(|&n| grid.state(n) == state)
    }

    // One growth draw per empty cell, however many trees surround it.
    fn analyze_empty<R: Rng + ?Sized>(&self, grid: &mut Grid, id: usize, rng: &mut R) {
        let grows = Self::has_neighbor_in(grid, id, TREE) && rng.random_bool(self.tree_probability);
        grid.set_next_state(id, if grows { TREE } else { EMPTY });
    }
}

impl RuleSet for SpreadingOfFire {
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        for id in 0..grid.len() {
            match grid.state(id) {
                EMPTY => self.analyze_empty(grid, id, rng),
                TREE => {
                    if Self::has_neighbor_in(grid, id, BURNING) && rng.random_bool(self.burn_probability) {
                        grid.set_next_state(id, BURNING);
                    }
                }
                BURNING => grid.set_next_state(id, EMPTY),
                _ => {}
            }
        }
    }
}
