mod cell;
mod grid;
mod rules;
mod patterns;
mod step_mode;

pub use cell::{Cell, Color, Position};
pub use grid::{Grid, GridError, NEIGHBOR_OFFSETS};
pub use rules::{Rule, ConwayRule, BirthSurvival, RuleError, next_state};
pub use patterns::{Pattern, Preset, presets};
pub use step_mode::StepMode;
