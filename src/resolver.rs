//! Movement conflict resolution through per-sweep availability.
//!
//! Every movement sweep starts with [`begin_sweep`]. A destination picked with
//! [`claim_random`] is marked unavailable at once, so no later actor in the
//! same sweep can select it. The sweep itself is sequential; this is
//! bookkeeping, not locking.

use crate::cell::{Cell, State};
use crate::grid::Grid;
use rand::Rng;

/// Resets availability for every cell.
pub fn begin_sweep(grid: &mut Grid) {
    grid.reset_availability();
}

/// Available neighbors of `id` that satisfy `accept`, in neighbor order.
pub fn available_neighbors<F>(grid: &Grid, id: usize, mut accept: F) -> Vec<usize>
where
    F: FnMut(&Cell) -> bool,
{
    grid.neighbors(id)
        .iter()
        .copied()
        .filter(|&n| {
            let neighbor = &grid.cells()[n];
            neighbor.is_available() && accept(neighbor)
        })
        .collect()
}

/// Available neighbors of `id` whose committed state is `state`.
pub fn available_in_state(grid: &Grid, id: usize, state: State) -> Vec<usize> {
    available_neighbors(grid, id, |cell| cell.state() == state)
}

/// Available neighbors of `id` whose already-written next state is `state`.
pub fn available_in_next_state(grid: &Grid, id: usize, state: State) -> Vec<usize> {
    available_neighbors(grid, id, |cell| cell.next_state() == state)
}

/// Uniformly picks one of `candidates`.
pub fn pick<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// Uniformly picks one candidate and claims it for the rest of the sweep.
pub fn claim_random<R: Rng + ?Sized>(
    grid: &mut Grid,
    candidates: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let target = pick(candidates, rng)?;
    grid.claim(target);
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NeighborPattern;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(states: Vec<State>) -> Grid {
        let cols = states.len();
        Grid::new(1, cols, NeighborPattern::moore(), states).unwrap()
    }

    #[test]
    fn test_claimed_cell_is_not_offered_again() {
        let mut grid = line(vec![1, 0, 1]);
        let mut rng = StdRng::seed_from_u64(7);
        let first = available_in_state(&grid, 0, 0);
        assert_eq!(first, vec![1]);
        assert_eq!(claim_random(&mut grid, &first, &mut rng), Some(1));
        assert!(available_in_state(&grid, 2, 0).is_empty());
    }

    #[test]
    fn test_begin_sweep_releases_claims() {
        let mut grid = line(vec![1, 0, 1]);
        let mut rng = StdRng::seed_from_u64(7);
        claim_random(&mut grid, &[1], &mut rng);
        begin_sweep(&mut grid);
        assert_eq!(available_in_state(&grid, 2, 0), vec![1]);
    }

    #[test]
    fn test_pick_from_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng), None);
    }

    #[test]
    fn test_pick_covers_every_candidate() {
        let mut rng = StdRng::seed_from_u64(99);
        let candidates = [3, 5, 8];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let chosen = pick(&candidates, &mut rng).unwrap();
            let slot = candidates.iter().position(|&c| c == chosen).unwrap();
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_next_state_filter() {
        let mut grid = line(vec![2, 0, 0]);
        grid.set_next_state(1, 1);
        assert_eq!(available_in_next_state(&grid, 0, 1), vec![1]);
        assert!(available_in_state(&grid, 0, 1).is_empty());
    }
}
