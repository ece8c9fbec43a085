pub mod config;
pub mod snapshot;

// Re-export key types for easier use by dependent crates
pub use config::{SimulationConfig, GridConfig, RunConfig};
pub use snapshot::Snapshot;
