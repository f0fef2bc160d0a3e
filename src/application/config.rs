use std::time::Duration;

use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

use crate::domain::{BirthSurvival, Grid, GridError, Preset, RuleError, StepMode};
use crate::rendering::TileLayout;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("alive rate must be within 0.0..=1.0, got {0}")]
    AliveRate(f64),

    #[error("tick rate must be a positive number of ticks per second, got {0}")]
    TickRate(f64),

    #[error("window must be at least 1x1 pixels, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
}

/// Runtime options for the simulation window
#[derive(Clone, Debug, PartialEq, Parser)]
#[command(name = "tile_life", version, about = "Game of Life on a toroidal grid of colored tiles")]
pub struct Config {
    /// Grid rows
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 2.0)]
    pub tick_rate: f64,

    /// Probability that a cell starts alive
    #[arg(long, default_value_t = 0.3)]
    pub alive_rate: f64,

    /// Window width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Life-like rule in B/S notation
    #[arg(long, default_value = "B3/S23", value_parser = parse_rule)]
    pub rule: BirthSurvival,

    /// How the next generation is staged
    #[arg(long, value_enum, default_value_t = StepMode::Serial)]
    pub mode: StepMode,

    /// Start from a centered preset instead of a random fill
    #[arg(long, value_enum)]
    pub pattern: Option<Preset>,
}

fn parse_rule(s: &str) -> Result<BirthSurvival, RuleError> {
    s.parse()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            tick_rate: 2.0,
            alive_rate: 0.3,
            width: 640,
            height: 480,
            seed: None,
            rule: BirthSurvival::CONWAY,
            mode: StepMode::Serial,
            pattern: None,
        }
    }
}

impl Config {
    /// Reject anything that would make the simulation unable to start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(GridError::EmptyDimension { cols: self.cols, rows: self.rows }.into());
        }
        if !(0.0..=1.0).contains(&self.alive_rate) {
            return Err(ConfigError::AliveRate(self.alive_rate));
        }
        self.tick_budget()?;
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::WindowSize { width: self.width, height: self.height });
        }
        Ok(())
    }

    /// Per-tick time budget. Fails for rates whose period does not fit a `Duration`.
    pub fn tick_budget(&self) -> Result<Duration, ConfigError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::TickRate(self.tick_rate));
        }
        Duration::try_from_secs_f64(1.0 / self.tick_rate)
            .map_err(|_| ConfigError::TickRate(self.tick_rate))
    }

    /// Tile size derived from window size and grid dimensions
    pub fn tile_layout(&self) -> TileLayout {
        TileLayout::fit(self.width as f32, self.height as f32, self.cols, self.rows)
    }

    /// The configured seed, or a fresh one from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Build the starting grid from an explicitly seeded generator
    pub fn build_grid(&self, seed: u64) -> Result<Grid, ConfigError> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = match self.pattern {
            Some(preset) => {
                let mut grid = Grid::colored(self.cols, self.rows, &mut rng)?;
                preset.pattern().place_centered(&mut grid);
                grid
            }
            None => Grid::random(self.cols, self.rows, self.alive_rate, &mut rng)?,
        };
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser_defaults() {
        let parsed = Config::try_parse_from(["tile_life"]).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_parse_all_options() {
        let config = Config::try_parse_from([
            "tile_life", "--rows", "30", "--cols", "40", "--tick-rate", "10",
            "--alive-rate", "0.5", "--seed", "99", "--rule", "B36/S23",
            "--mode", "parallel", "--pattern", "r-pentomino",
        ])
        .unwrap();
        assert_eq!((config.rows, config.cols), (30, 40));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.rule, BirthSurvival::HIGHLIFE);
        assert_eq!(config.mode, StepMode::Parallel);
        assert_eq!(config.pattern, Some(Preset::RPentomino));
        assert_eq!(config.tick_budget(), Ok(Duration::from_millis(100)));
    }

    #[test]
    fn test_bad_rule_is_a_parse_error() {
        assert!(Config::try_parse_from(["tile_life", "--rule", "B9"]).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_rows = Config { rows: 0, ..Config::default() };
        assert_eq!(
            zero_rows.validate(),
            Err(ConfigError::Grid(GridError::EmptyDimension { cols: 10, rows: 0 }))
        );

        let rate = Config { alive_rate: 1.5, ..Config::default() };
        assert_eq!(rate.validate(), Err(ConfigError::AliveRate(1.5)));
        assert!(Config { alive_rate: f64::NAN, ..Config::default() }.validate().is_err());

        assert_eq!(
            Config { tick_rate: 0.0, ..Config::default() }.validate(),
            Err(ConfigError::TickRate(0.0))
        );
        assert!(Config { tick_rate: f64::INFINITY, ..Config::default() }.validate().is_err());

        // period overflows Duration
        assert_eq!(
            Config { tick_rate: 1e-30, ..Config::default() }.validate(),
            Err(ConfigError::TickRate(1e-30))
        );
        assert!(Config { tick_rate: 1e-30, ..Config::default() }.tick_budget().is_err());

        assert_eq!(
            Config { width: 0, ..Config::default() }.validate(),
            Err(ConfigError::WindowSize { width: 0, height: 480 })
        );
    }

    #[test]
    fn test_tick_budget_from_rate() {
        let budget = |tick_rate| Config { tick_rate, ..Config::default() }.tick_budget();
        assert_eq!(budget(2.0), Ok(Duration::from_millis(500)));
        assert_eq!(budget(50.0), Ok(Duration::from_millis(20)));
    }

    #[test]
    fn test_tile_layout_is_window_over_grid() {
        let config = Config { rows: 12, cols: 16, ..Config::default() };
        assert_eq!(config.tile_layout(), TileLayout::new(40.0, 40.0));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = Config::default();
        let a = config.build_grid(1234).unwrap();
        let b = config.build_grid(1234).unwrap();
        assert_eq!(a.alive_positions(), b.alive_positions());
        assert!(a.cells().zip(b.cells()).all(|(x, y)| x.color() == y.color()));
    }

    #[test]
    fn test_explicit_seed_is_used() {
        let config = Config { seed: Some(5), ..Config::default() };
        assert_eq!(config.resolve_seed(), 5);
    }

    #[test]
    fn test_pattern_seeding() {
        let config = Config { rows: 5, cols: 5, pattern: Some(Preset::Blinker), ..Config::default() };
        let grid = config.build_grid(0).unwrap();
        assert_eq!(grid.alive_count(), 3);
        assert!(grid.is_alive(1, 2) && grid.is_alive(2, 2) && grid.is_alive(3, 2));
    }

    #[test]
    fn test_build_grid_validates_first() {
        let config = Config { cols: 0, ..Config::default() };
        assert!(config.build_grid(0).is_err());
    }
}
