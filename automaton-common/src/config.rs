use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

// Configuration for the grid layout and initial occupants
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Neighbor offsets in the `<row> <col> c<count>` grammar, groups separated by `/`.
    pub neighbor_pattern: String,
    /// Exactly `rows * cols` whitespace separated integers, row-major.
    pub initial_states: String,
    /// Color name per discrete state; index = state value.
    #[serde(default)]
    pub colors: Vec<String>,
}

impl GridConfig {
    /// Iterates the raw initial state tokens in row-major order.
    pub fn initial_state_tokens(&self) -> impl Iterator<Item = &str> {
        self.initial_states.split_whitespace()
    }
}

// Configuration for the tick loop
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Seed for neighbor selection and Bernoulli draws. `None` means unseeded (not reproducible).
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_record_interval")]
    pub record_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            ticks: default_ticks(),
            seed: None,
            record_interval: default_record_interval(),
        }
    }
}

fn default_ticks() -> u64 {
    100
}

fn default_record_interval() -> u64 {
    1
}

// Main automaton configuration structure, loaded from a TOML file.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    /// Declared simulation kind, e.g. "Game of Life" or "Predator Prey".
    pub simulation_type: String,
    pub grid: GridConfig,
    #[serde(default)]
    pub parameters: HashMap<String, f64>,
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Loads the automaton configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))
    }

    /// Parses and validates a configuration held in memory.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    // Token count and neighbor pattern are checked by the engine when the grid is built.
    fn validate(&self) -> Result<()> {
        if self.simulation_type.trim().is_empty() {
            anyhow::bail!("simulation_type must not be empty.");
        }
        if self.grid.rows == 0 || self.grid.cols == 0 {
            anyhow::bail!(
                "grid dimensions must be positive (got {}x{}).",
                self.grid.rows,
                self.grid.cols
            );
        }
        if self.run.record_interval == 0 {
            anyhow::bail!("record_interval must be greater than 0.");
        }
        Ok(())
    }
}
