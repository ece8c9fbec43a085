use crate::cell::Cell;
use crate::error::AutomatonError;
use crate::grid::Grid;
use crate::rules::{Parameters, RuleKind, Rules};
use automaton_common::{SimulationConfig, Snapshot};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Runs one configured cellular automaton: a grid, its rule set, and the random source.
pub struct Automaton<R: Rng = StdRng> {
    grid: Grid,
    rules: Rules,
    colors: Vec<String>,
    /// Length of every population vector: covers the variant's states, the
    /// initial grid, and the color table.
    population_width: usize,
    /// Random source for neighbor selection and Bernoulli draws.
    rng: R,
    /// Number of committed ticks.
    tick: u64,
    /// Populations collected by `record_snapshot`.
    recorded_snapshots: Vec<Snapshot>,
}

impl Automaton<StdRng> {
    /// Creates an automaton from configuration.
    ///
    /// With `run.seed` set the run is reproducible; without it the random source
    /// is seeded from the operating system and runs are not repeatable.
    pub fn new(config: &SimulationConfig) -> Result<Self, AutomatonError> {
        let rng = match config.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Automaton<R> {
    /// Creates an automaton drawing randomness from `rng`.
    ///
    /// Every configuration error is reported here, before any tick can run.
    pub fn with_rng(config: &SimulationConfig, rng: R) -> Result<Self, AutomatonError> {
        let kind: RuleKind = config.simulation_type.parse()?;
        let grid = Grid::from_config(&config.grid)?;
        let parameters = Parameters::from(&config.parameters);
        let rules = Rules::new(kind, &parameters, &grid)?;

        info!(
            "Initialized {} on a {}x{} grid ({} cells).",
            kind,
            grid.rows(),
            grid.cols(),
            grid.len()
        );
        debug!("Parameters: {:?}", config.parameters);

        let colors = config.grid.colors.clone();
        let highest = grid.iter().map(|c| c.state() as usize).max().unwrap_or(0);
        let population_width = kind.state_count().max(highest + 1).max(colors.len());
        if highest >= colors.len() {
            warn!(
                "State {} appears in the grid but only {} colors are configured.",
                highest,
                colors.len()
            );
        }

        Ok(Self {
            grid,
            rules,
            colors,
            population_width,
            rng,
            tick: 0,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Analysis phase: the rule set writes next states. Committed state is untouched.
    pub fn analyze(&mut self) {
        self.rules.analyze(&mut self.grid, &mut self.rng);
    }

    /// Commit phase: next states become current and every cell becomes available.
    pub fn update(&mut self) {
        self.grid.commit();
        self.tick += 1;
    }

    /// One full tick.
    pub fn step(&mut self) {
        self.analyze();
        self.update();
        debug!("Tick {} population: {:?}", self.tick, self.population());
    }

    pub fn kind(&self) -> RuleKind {
        self.rules.kind()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.grid.cell(id)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.cell_at(row, col)
    }

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    /// Color name per state, index = state.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Color for a state, `None` when the table has no entry.
    pub fn color_of(&self, state: usize) -> Option<&str> {
        self.colors.get(state).map(String::as_str)
    }

    /// Committed per-state counts. The length stays fixed for the whole run.
    pub fn population(&self) -> Vec<u64> {
        self.grid.population(self.population_width)
    }

    /// Stores a snapshot of the committed population at the current tick.
    pub fn record_snapshot(&mut self) {
        let snapshot = Snapshot {
            tick: self.tick,
            population: self.population(),
        };
        self.recorded_snapshots.push(snapshot);
    }

    /// Provides access to the recorded snapshots.
    pub fn recorded_snapshots(&self) -> &[Snapshot] {
        &self.recorded_snapshots
    }
}
