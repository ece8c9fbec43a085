/// Discrete cell state. Meaning depends on the active rule set.
pub type State = u8;

/// The state every rule set treats as unoccupied.
pub const EMPTY: State = 0;

/// A single grid cell.
///
/// `state` is authoritative for rendering and for neighbor analysis; `next_state`
/// is written during analysis and becomes `state` at commit. Neighbors are ids
/// into the owning grid, never references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: usize,
    state: State,
    next_state: State,
    neighbors: Vec<usize>,
    available: bool,
}

impl Cell {
    pub(crate) fn new(id: usize, state: State, neighbors: Vec<usize>) -> Self {
        Self {
            id,
            state,
            next_state: state,
            neighbors,
            available: true,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn next_state(&self) -> State {
        self.next_state
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// False once a rule set has claimed this cell as a movement destination in the current sweep.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// True when no write is pending for the next tick.
    pub fn is_committed(&self) -> bool {
        self.state == self.next_state && self.available
    }

    pub(crate) fn set_next_state(&mut self, state: State) {
        self.next_state = state;
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub(crate) fn commit(&mut self) {
        self.state = self.next_state;
        self.available = true;
    }
}
