use super::RuleSet;
use crate::cell::State;
use crate::grid::Grid;
use rand::Rng;

pub const OPEN: State = 0;
pub const FULL: State = 1;
pub const BLOCKED: State = 2;

/// Every full cell fills its open neighbors on the next tick.
///
/// Reads committed state only and never demotes a cell, so visiting order does not matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Percolation;

impl RuleSet for Percolation {
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, _rng: &mut R) {
        for id in 0..grid.len() {
            if grid.state(id) != FULL {
                continue;
            }
            let open: Vec<usize> = grid
                .neighbors(id)
                .iter()
                .copied()
                .filter(|&n| grid.state(n) == OPEN)
                .collect();
            for neighbor in open {
                grid.set_next_state(neighbor, FULL);
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

    fn tick(grid: &mut Grid) {
        let mut rng = StdRng::seed_from_u64(0);
        Percolation.analyze(grid, &mut rng);
        grid.commit();
    }

    #[test]
    fn test_fill_spreads_one_ring_per_tick() {
        let mut grid = Grid::new(1, 5, NeighborPattern::von_neumann(), vec![1, 0, 0, 0, 0]).unwrap();
        tick(&mut grid);
        assert_eq!(grid.cells().iter().map(|c| c.state()).collect::<Vec<_>>(), vec![1, 1, 0, 0, 0]);
        tick(&mut grid);
        tick(&mut grid);
        tick(&mut grid);
        assert!(grid.iter().all(|c| c.state() == FULL));
    }

    #[test]
    fn test_blocked_cells_stop_the_flow() {
        #[rustfmt::skip]
        let states = vec![
            1, 2, 0,
            0, 2, 0,
            0, 2, 0,
        ];
        let mut grid = Grid::new(3, 3, NeighborPattern::von_neumann(), states).unwrap();
        for _ in 0..6 {
            tick(&mut grid);
        }
        let full: Vec<usize> = grid.iter().filter(|c| c.state() == FULL).map(|c| c.id()).collect();
        assert_eq!(full, vec![0, 3, 6]);
        assert!([1, 4, 7].iter().all(|&id| grid.state(id) == BLOCKED));
        assert!([2, 5, 8].iter().all(|&id| grid.state(id) == OPEN));
    }

    #[test]
    fn test_analyze_leaves_committed_state_alone() {
        let mut grid = Grid::new(1, 3, NeighborPattern::moore(), vec![0, 1, 0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        Percolation.analyze(&mut grid, &mut rng);
        assert_eq!(grid.state(0), OPEN);
        assert_eq!(grid.next_state(0), FULL);
        assert_eq!(grid.next_state(2), FULL);
    }
}
