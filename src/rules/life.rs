use super::{Parameters, RuleSet};
use crate::cell::State;
use crate::grid::Grid;
use rand::Rng;

pub const ALIVE: State = 1;
pub const DEAD: State = 2;

/// Life-like growth and death with a closed survival band.
///
/// An alive cell survives with `min..=max` alive neighbors; a dead cell is born
/// with exactly `max`. State 0 is inert and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOfLife {
    pub min_threshold: usize,
    pub max_threshold: usize,
}

impl Default for GameOfLife {
    fn default() -> Self {
        Self { min_threshold: 2, max_threshold: 3 }
    }
}

impl GameOfLife {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let default = Self::default();
        Self {
            min_threshold: threshold(parameters, "min_population_threshold", default.min_threshold),
            max_threshold: threshold(parameters, "max_population_threshold", default.max_threshold),
        }
    }
}

fn threshold(parameters: &Parameters, name: &str, default: usize) -> usize {
    parameters.get_or(name, default as f64).round().max(0.0) as usize
}

impl RuleSet for GameOfLife {
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, _rng: &mut R) {
        for id in 0..grid.len() {
            let alive = grid.count_neighbors_in_state(id, ALIVE);
            match grid.state(id) {
                ALIVE if alive < self.min_threshold || alive > self.max_threshold => {
                    grid.set_next_state(id, DEAD);
                }
                DEAD if alive == self.max_threshold => grid.set_next_state(id, ALIVE),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NeighborPattern;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn tick(grid: &mut Grid, rules: &mut GameOfLife) {
        let mut rng = StdRng::seed_from_u64(0);
        rules.analyze(grid, &mut rng);
        grid.commit();
    }

    fn alive_ids(grid: &Grid) -> Vec<usize> {
        grid.iter().filter(|c| c.state() == ALIVE).map(|c| c.id()).collect()
    }

    #[test]
    fn test_block_is_fixed_point() {
        #[rustfmt::skip]
        let states = vec![
            2, 2, 2, 2,
            2, 1, 1, 2,
            2, 1, 1, 2,
            2, 2, 2, 2,
        ];
        let mut grid = Grid::new(4, 4, NeighborPattern::moore(), states).unwrap();
        let mut rules = GameOfLife::default();
        for _ in 0..5 {
            tick(&mut grid, &mut rules);
            assert_eq!(alive_ids(&grid), vec![5, 6, 9, 10]);
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        #[rustfmt::skip]
        let states = vec![
            2, 2, 2,
            1, 1, 1,
            2, 2, 2,
        ];
        let mut grid = Grid::new(3, 3, NeighborPattern::moore(), states).unwrap();
        let mut rules = GameOfLife::default();
        tick(&mut grid, &mut rules);
        assert_eq!(alive_ids(&grid), vec![1, 4, 7]);
        tick(&mut grid, &mut rules);
        assert_eq!(alive_ids(&grid), vec![3, 4, 5]);
    }

    #[test]
    fn test_lonely_cell_dies_and_empty_stays_inert() {
        let states = vec![0, 1, 0];
        let mut grid = Grid::new(1, 3, NeighborPattern::moore(), states).unwrap();
        tick(&mut grid, &mut GameOfLife::default());
        assert_eq!(grid.state(1), DEAD);
        assert_eq!(grid.state(0), 0);
        assert_eq!(grid.state(2), 0);
    }

    #[test]
    fn test_thresholds_from_parameters() {
        let mut values = HashMap::new();
        values.insert("min_population_threshold".to_string(), 1.0);
        values.insert("max_population_threshold".to_string(), 4.0);
        let rules = GameOfLife::from_parameters(&Parameters::new(values));
        assert_eq!(rules, GameOfLife { min_threshold: 1, max_threshold: 4 });
        assert_eq!(GameOfLife::from_parameters(&Parameters::default()), GameOfLife::default());
    }

    #[test]
    fn test_wider_band_keeps_lonely_pair_alive() {
        let states = vec![1, 1];
        let mut grid = Grid::new(1, 2, NeighborPattern::moore(), states).unwrap();
        let mut rules = GameOfLife { min_threshold: 1, max_threshold: 3 };
        tick(&mut grid, &mut rules);
        assert_eq!(alive_ids(&grid), vec![0, 1]);
    }
}
