use crate::cell::{Cell, State, EMPTY};
use crate::error::AutomatonError;
use crate::topology::NeighborPattern;
use automaton_common::GridConfig;
use log::debug;

/// Owns every cell of the automaton. Cells are stored densely, `id = row * cols + col`.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    pattern: NeighborPattern,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from row-major initial states, computing every neighbor list once.
    pub fn new(
        rows: usize,
        cols: usize,
        pattern: NeighborPattern,
        states: Vec<State>,
    ) -> Result<Self, AutomatonError> {
        if rows == 0 || cols == 0 {
            return Err(AutomatonError::EmptyGrid);
        }
        let expected = rows * cols;
        if states.len() != expected {
            return Err(AutomatonError::GridInconsistency {
                rows,
                cols,
                expected,
                actual: states.len(),
            });
        }

        let cells = states
            .into_iter()
            .enumerate()
            .map(|(id, state)| {
                let neighbors = pattern.neighbors_of(id / cols, id % cols, rows, cols);
                Cell::new(id, state, neighbors)
            })
            .collect();

        debug!("Built {}x{} grid with pattern '{}'.", rows, cols, pattern);
        Ok(Self { rows, cols, pattern, cells })
    }

    /// Parses the pattern and the initial state token stream of a grid configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self, AutomatonError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(AutomatonError::EmptyGrid);
        }
        let pattern: NeighborPattern = config.neighbor_pattern.parse()?;
        let states = config
            .initial_state_tokens()
            .enumerate()
            .map(|(position, token)| {
                token.parse::<State>().map_err(|_| AutomatonError::InvalidStateToken {
                    position,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config.rows, config.cols, pattern, states)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pattern(&self) -> &NeighborPattern {
        &self.pattern
    }

    /// Id of the cell at `(row, col)`, `None` outside the grid.
    pub fn id_at(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// `(row, col)` of a valid id.
    pub fn position(&self, id: usize) -> (usize, usize) {
        (id / self.cols, id % self.cols)
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.id_at(row, col).and_then(|id| self.cells.get(id))
    }

    /// All cells in ascending id order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    // The accessors below index directly: ids come from this grid's own neighbor lists.

    pub fn state(&self, id: usize) -> State {
        self.cells[id].state()
    }

    pub fn next_state(&self, id: usize) -> State {
        self.cells[id].next_state()
    }

    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.cells[id].neighbors()
    }

    pub fn is_available(&self, id: usize) -> bool {
        self.cells[id].is_available()
    }

    pub(crate) fn set_next_state(&mut self, id: usize, state: State) {
        self.cells[id].set_next_state(state);
    }

    /// Marks a cell as a movement destination for the rest of the sweep.
    pub(crate) fn claim(&mut self, id: usize) {
        self.cells[id].set_available(false);
    }

    /// Makes every cell claimable again. Called before each movement sweep.
    pub(crate) fn reset_availability(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.set_available(true));
    }

    /// Number of neighbors of `id` whose committed state equals `state`.
    pub fn count_neighbors_in_state(&self, id: usize, state: State) -> usize {
        self.neighbors(id)
            .iter()
            .filter(|&&n| self.cells[n].state() == state)
            .count()
    }

    /// Ids of every cell whose committed state is empty, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|cell| cell.state() == EMPTY)
            .map(Cell::id)
            .collect()
    }

    /// Per-state counts of committed states, at least `min_states` long.
    pub fn population(&self, min_states: usize) -> Vec<u64> {
        let highest = self.cells.iter().map(|c| c.state() as usize + 1).max().unwrap_or(0);
        let mut counts = vec![0u64; highest.max(min_states)];
        for cell in &self.cells {
            counts[cell.state() as usize] += 1;
        }
        counts
    }

    /// Commit phase: `state <- next_state` and `available <- true` for every cell.
    pub fn commit(&mut self) {
        self.cells.iter_mut().for_each(Cell::commit);
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_config(rows: usize, cols: usize, states: &str) -> GridConfig {
        GridConfig {
            rows,
            cols,
            neighbor_pattern: "-1 -1 c3/0 -1 c3/1 -1 c3".to_string(),
            initial_states: states.to_string(),
            colors: vec![],
        }
    }

    #[test]
    fn test_ids_are_row_major() {
        let grid = Grid::from_config(&grid_config(2, 3, "0 1 2\n3 4 5")).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.id_at(1, 2), Some(5));
        assert_eq!(grid.id_at(2, 0), None);
        assert_eq!(grid.position(4), (1, 1));
        assert_eq!(grid.cell_at(1, 0).unwrap().state(), 3);
        for (i, cell) in grid.iter().enumerate() {
            assert_eq!(cell.id(), i);
            assert_eq!(cell.state() as usize, i);
        }
    }

    #[test]
    fn test_neighbors_computed_on_non_square_grid() {
        let grid = Grid::from_config(&grid_config(2, 3, "0 0 0 0 0 0")).unwrap();
        assert_eq!(grid.neighbors(0), &[1, 3, 4]);
        assert_eq!(grid.neighbors(4), &[0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_too_few_states_is_inconsistent() {
        let err = Grid::from_config(&grid_config(3, 3, "0 0 0 0 0 0 0 0")).unwrap_err();
        assert!(err.is_grid_inconsistency());
        assert_eq!(
            err,
            AutomatonError::GridInconsistency { rows: 3, cols: 3, expected: 9, actual: 8 }
        );
    }

    #[test]
    fn test_too_many_states_is_inconsistent() {
        let err = Grid::from_config(&grid_config(1, 2, "0 0 0")).unwrap_err();
        assert!(err.is_grid_inconsistency());
    }

    #[test]
    fn test_bad_token_is_parse_error() {
        let err = Grid::from_config(&grid_config(1, 3, "0 x 0")).unwrap_err();
        assert_eq!(err, AutomatonError::InvalidStateToken { position: 1, token: "x".into() });
        assert!(!err.is_grid_inconsistency());
    }

    #[test]
    fn test_bad_pattern_is_pattern_error() {
        let mut config = grid_config(1, 1, "0");
        config.neighbor_pattern = "0 1 1".to_string();
        assert!(matches!(Grid::from_config(&config), Err(AutomatonError::Pattern(_))));
    }

    #[test]
    fn test_commit_copies_next_and_resets_availability() {
        let mut grid = Grid::from_config(&grid_config(1, 3, "0 1 0")).unwrap();
        grid.set_next_state(0, 2);
        grid.claim(2);
        assert_eq!(grid.state(0), 0);
        assert!(!grid.is_available(2));
        grid.commit();
        assert_eq!(grid.state(0), 2);
        assert!(grid.iter().all(Cell::is_committed));
    }

    #[test]
    fn test_empty_cells_and_population() {
        let grid = Grid::from_config(&grid_config(2, 2, "0 1 0 3")).unwrap();
        assert_eq!(grid.empty_cells(), vec![0, 2]);
        assert_eq!(grid.population(2), vec![2, 1, 0, 1]);
        assert_eq!(grid.population(6).len(), 6);
    }
}
