// Domain layer - cells, toroidal grid, rules
pub mod domain;

// Application layer - simulation, pacing, configuration
pub mod application;

// Infrastructure layer - rendering, window events
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Grid, Rule, ConwayRule, BirthSurvival, Pattern, presets, StepMode};
pub use application::{Config, ConfigError, Driver, Simulation, TickPacer, TickReport};
pub use rendering::{Renderer, TileAdapter, TileLayout};
pub use input::EventSource;
