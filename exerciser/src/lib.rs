pub mod config;
pub mod data;
mod error;
mod runner;
pub mod scenario;

pub use config::{ExerciserConfig, ExerciserConfigBuilder};
pub use error::Error;
pub use runner::run_until;
pub use scenario::{run, RunReport, ScenarioState, COMPLETION_MARKER};
