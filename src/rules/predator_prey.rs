use super::{Parameters, RuleKind, RuleSet};
use crate::cell::{State, EMPTY};
use crate::error::AutomatonError;
use crate::grid::Grid;
use crate::resolver;
use log::trace;
use rand::Rng;
use std::collections::HashMap;

pub const FISH: State = 1;
pub const SHARK: State = 2;

/// Tunables of the predator/prey variant, all required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredatorPreyParams {
    pub starting_shark_energy: f64,
    pub shark_energy_gain: f64,
    pub shark_energy_loss: f64,
    pub shark_reproduction_threshold: f64,
    pub fish_reproduction_threshold: f64,
}

impl PredatorPreyParams {
    pub fn from_parameters(parameters: &Parameters) -> Result<Self, AutomatonError> {
        let kind = RuleKind::PredatorPrey;
        Ok(Self {
            starting_shark_energy: parameters.require(kind, "starting_shark_energy")?,
            shark_energy_gain: parameters.require(kind, "shark_energy_gain")?,
            shark_energy_loss: parameters.require(kind, "shark_energy_loss")?,
            shark_reproduction_threshold: parameters.require(kind, "shark_reproducibility_threshold")?,
            fish_reproduction_threshold: parameters.require(kind, "fish_reproducibility_threshold")?,
        })
    }
}

/// Fish wander into empty cells, sharks hunt fish and burn energy.
///
/// One tick is two sweeps in ascending id order, each starting with every cell
/// available. The fish sweep reads committed states. The shark sweep reads the
/// next states already written by the fish sweep, so a fish that just moved is
/// hunted at its destination. Move counters and energy are keyed by cell id and
/// follow the actor when it moves.
#[derive(Debug, Clone)]
pub struct PredatorPrey {
    params: PredatorPreyParams,
    fish_moves: HashMap<usize, f64>,
    shark_moves: HashMap<usize, f64>,
    shark_energy: HashMap<usize, f64>,
}

impl PredatorPrey {
    /// Seeds the counters from the grid's initial fish and sharks.
    pub fn new(params: PredatorPreyParams, grid: &Grid) -> Self {
        let mut fish_moves = HashMap::new();
        let mut shark_moves = HashMap::new();
        let mut shark_energy = HashMap::new();
        for cell in grid {
            match cell.state() {
                FISH => {
                    fish_moves.insert(cell.id(), 0.0);
                }
                SHARK => {
                    shark_moves.insert(cell.id(), 0.0);
                    shark_energy.insert(cell.id(), params.starting_shark_energy);
                }
                _ => {}
            }
        }
        Self { params, fish_moves, shark_moves, shark_energy }
    }

    pub fn params(&self) -> &PredatorPreyParams {
        &self.params
    }

    pub fn fish_moves(&self, id: usize) -> Option<f64> {
        self.fish_moves.get(&id).copied()
    }

    pub fn shark_moves(&self, id: usize) -> Option<f64> {
        self.shark_moves.get(&id).copied()
    }

    pub fn shark_energy(&self, id: usize) -> Option<f64> {
        self.shark_energy.get(&id).copied()
    }

    fn fish_sweep<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> usize {
        let mut moved = 0;
        for id in 0..grid.len() {
            if grid.state(id) != FISH {
                continue;
            }
            let empty = resolver::available_in_state(grid, id, EMPTY);
            if let Some(target) = resolver::claim_random(grid, &empty, rng) {
                self.move_fish(grid, id, target);
                moved += 1;
            }
        }
        moved
    }

    fn move_fish(&mut self, grid: &mut Grid, source: usize, target: usize) {
        let moves = self.fish_moves.get(&source).copied().unwrap_or(0.0) + 1.0;
        if moves < self.params.fish_reproduction_threshold {
            self.fish_moves.remove(&source);
            self.fish_moves.insert(target, moves);
            grid.set_next_state(source, EMPTY);
        } else {
            // The parent stays put and a newborn takes the target.
            self.fish_moves.insert(source, 0.0);
            self.fish_moves.insert(target, 0.0);
        }
        grid.set_next_state(target, FISH);
    }

    fn shark_sweep<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> usize {
        let mut moved = 0;
        for id in 0..grid.len() {
            if grid.state(id) != SHARK {
                continue;
            }
            let mut targets = resolver::available_in_next_state(grid, id, FISH);
            if targets.is_empty() {
                targets = resolver::available_in_next_state(grid, id, EMPTY);
            }
            if targets.is_empty() {
                self.shark_stays(grid, id);
            } else if self.energy(id) <= 0.0 {
                self.remove_shark(grid, id);
            } else if let Some(target) = resolver::claim_random(grid, &targets, rng) {
                self.move_shark(grid, id, target);
                moved += 1;
            }
        }
        moved
    }

    fn move_shark(&mut self, grid: &mut Grid, source: usize, target: usize) {
        let moves = self.shark_moves.get(&source).copied().unwrap_or(0.0) + 1.0;
        let mut energy = self.energy(source) - self.params.shark_energy_loss;
        if grid.next_state(target) == FISH {
            energy += self.params.shark_energy_gain;
            self.fish_moves.remove(&target);
        }

        if moves < self.params.shark_reproduction_threshold {
            self.shark_moves.remove(&source);
            self.shark_energy.remove(&source);
            self.shark_moves.insert(target, moves);
            self.shark_energy.insert(target, energy);
            grid.set_next_state(source, EMPTY);
        } else {
            self.shark_moves.insert(source, 0.0);
            self.shark_moves.insert(target, 0.0);
            self.shark_energy.insert(target, energy);
            self.shark_energy.insert(source, self.params.starting_shark_energy);
        }
        grid.set_next_state(target, SHARK);
    }

    // Idling always costs exactly one unit, independent of the per-move loss.
    fn shark_stays(&mut self, grid: &mut Grid, id: usize) {
        let energy = self.energy(id) - 1.0;
        if energy > 0.0 {
            self.shark_energy.insert(id, energy);
        } else {
            self.remove_shark(grid, id);
        }
    }

    fn remove_shark(&mut self, grid: &mut Grid, id: usize) {
        self.shark_moves.remove(&id);
        self.shark_energy.remove(&id);
        grid.set_next_state(id, EMPTY);
    }

    fn energy(&self, id: usize) -> f64 {
        self.shark_energy.get(&id).copied().unwrap_or(0.0)
    }
}

impl RuleSet for PredatorPrey {
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        resolver::begin_sweep(grid);
        let fish_moved = self.fish_sweep(grid, rng);

        resolver::begin_sweep(grid);
        let sharks_moved = self.shark_sweep(grid, rng);

        trace!("Predator/prey sweep: {} fish moved, {} sharks moved.", fish_moved, sharks_moved);
    }
}
