//! Strategy for computing the staged generation.
//!
//! Both modes read only committed state and yield the same result; they
//! differ in whether the per-cell work is spread across the rayon pool.

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum StepMode {
    /// Cell by cell on the calling thread
    #[default]
    Serial,
    /// Rayon-parallel staging into a scratch buffer, then serial write-back
    Parallel,
}

impl StepMode {
    /// Get all available modes
    pub fn all() -> Vec<StepMode> {
        vec![StepMode::Serial, StepMode::Parallel]
    }

    /// Display name for logs and benchmark tables
    pub fn name(&self) -> &'static str {
        match self {
            StepMode::Serial => "Serial",
            StepMode::Parallel => "Parallel",
        }
    }
}
