mod config;
mod driver;
mod pacer;
mod simulation;

pub use config::{Config, ConfigError};
pub use driver::{Driver, RunSummary};
pub use pacer::TickPacer;
pub use simulation::{Phase, Simulation, TickReport};
