//! Rule sets. Each variant reads committed state, writes `next_state`, and may
//! claim destinations; none of them commits.

pub mod fire;
pub mod life;
pub mod percolation;
pub mod predator_prey;
pub mod segregation;

pub use fire::SpreadingOfFire;
pub use life::GameOfLife;
pub use percolation::Percolation;
pub use predator_prey::{PredatorPrey, PredatorPreyParams};
pub use segregation::Segregation;

use crate::cell::EMPTY;
use crate::error::AutomatonError;
use crate::grid::Grid;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The analysis half of a tick.
pub trait RuleSet {
    /// Computes next states from the grid's committed states and neighbor lists.
    fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R);
}

/// Declared simulation kind, selected once from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    GameOfLife,
    Percolation,
    PredatorPrey,
    Segregation,
    SpreadingOfFire,
}

impl RuleKind {
    /// Number of states the variant itself defines, counting from 0.
    /// Segregation only defines `EMPTY`; its group identities come from the grid.
    pub fn state_count(self) -> usize {
        let highest = match self {
            RuleKind::GameOfLife => life::DEAD,
            RuleKind::Percolation => percolation::BLOCKED,
            RuleKind::PredatorPrey => predator_prey::SHARK,
            RuleKind::Segregation => EMPTY,
            RuleKind::SpreadingOfFire => fire::BURNING,
        };
        highest as usize + 1
    }
}

impl FromStr for RuleKind {
    type Err = AutomatonError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase()
            .replace("and", "");
        match normalized.as_str() {
            "gameoflife" | "life" => Ok(RuleKind::GameOfLife),
            "percolation" => Ok(RuleKind::Percolation),
            "predatorprey" | "wator" => Ok(RuleKind::PredatorPrey),
            "segregation" => Ok(RuleKind::Segregation),
            "spreadingoffire" | "fire" => Ok(RuleKind::SpreadingOfFire),
            _ => Err(AutomatonError::UnknownSimulation(name.to_string())),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::GameOfLife => "Game of Life",
            RuleKind::Percolation => "Percolation",
            RuleKind::PredatorPrey => "Predator Prey",
            RuleKind::Segregation => "Segregation",
            RuleKind::SpreadingOfFire => "Spreading of Fire",
        };
        f.write_str(name)
    }
}

/// Named floating point parameters supplied by the configuration.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: HashMap<String, f64>,
}

impl Parameters {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Fails with `MissingParameter` when `name` is absent.
    pub fn require(&self, kind: RuleKind, name: &'static str) -> Result<f64, AutomatonError> {
        self.values
            .get(name)
            .copied()
            .ok_or(AutomatonError::MissingParameter { kind, name })
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }
}

impl From<&HashMap<String, f64>> for Parameters {
    fn from(values: &HashMap<String, f64>) -> Self {
        Self::new(values.clone())
    }
}

/// Clamps a probability into `[0, 1]`; NaN becomes 0.
pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// The active rule set, one case per simulation kind.
#[derive(Debug, Clone)]
pub enum Rules {
    GameOfLife(GameOfLife),
    Percolation(Percolation),
    PredatorPrey(PredatorPrey),
    Segregation(Segregation),
    SpreadingOfFire(SpreadingOfFire),
}

impl Rules {
    /// Builds the rule set for `kind`, seeding auxiliary state from the grid's initial occupants.
    pub fn new(kind: RuleKind, parameters: &Parameters, grid: &Grid) -> Result<Self, AutomatonError> {
        let rules = match kind {
            RuleKind::GameOfLife => Rules::GameOfLife(GameOfLife::from_parameters(parameters)),
            RuleKind::Percolation => Rules::Percolation(Percolation),
            RuleKind::PredatorPrey => {
                let params = PredatorPreyParams::from_parameters(parameters)?;
                Rules::PredatorPrey(PredatorPrey::new(params, grid))
            }
            RuleKind::Segregation => Rules::Segregation(Segregation::from_parameters(parameters)?),
            RuleKind::SpreadingOfFire => {
                Rules::SpreadingOfFire(SpreadingOfFire::from_parameters(parameters))
            }
        };
        Ok(rules)
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rules::GameOfLife(_) => RuleKind::GameOfLife,
            Rules::Percolation(_) => RuleKind::Percolation,
            Rules::PredatorPrey(_) => RuleKind::PredatorPrey,
            Rules::Segregation(_) => RuleKind::Segregation,
            Rules::SpreadingOfFire(_) => RuleKind::SpreadingOfFire,
        }
    }

    pub fn analyze<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        match self {
            Rules::GameOfLife(rules) => rules.analyze(grid, rng),
            Rules::Percolation(rules) => rules.analyze(grid, rng),
            Rules::PredatorPrey(rules) => rules.analyze(grid, rng),
            Rules::Segregation(rules) => rules.analyze(grid, rng),
            Rules::SpreadingOfFire(rules) => rules.analyze(grid, rng),
        }
    }

    /// Auxiliary predator/prey state, if that variant is active.
    pub fn as_predator_prey(&self) -> Option<&PredatorPrey> {
        match self {
            Rules::PredatorPrey(rules) => Some(rules),
            _ => None,
        }
    }
}
