use clap::ValueEnum;

use super::Grid;

/// Represents a pattern that can be seeded onto the grid
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>,  // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// Place pattern with its top-left corner at `(x, y)`, wrapping around the torus
    pub fn place_on(&self, grid: &mut Grid, x: usize, y: usize) {
        let (cols, rows) = grid.dimensions();
        for (dx, dy) in &self.cells {
            grid.set_alive((x + dx) % cols, (y + dy) % rows, true);
        }
    }

    /// Place pattern so its bounding box is centered on the grid
    pub fn place_centered(&self, grid: &mut Grid) {
        let (cols, rows) = grid.dimensions();
        let x = cols.saturating_sub(self.width) / 2;
        let y = rows.saturating_sub(self.height) / 2;
        self.place_on(grid, x, y);
    }
}

/// Preset names accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Block,
    Blinker,
    Toad,
    Beacon,
    Glider,
    RPentomino,
}

impl Preset {
    pub fn pattern(self) -> Pattern {
        match self {
            Preset::Block => presets::block(),
            Preset::Blinker => presets::blinker(),
            Preset::Toad => presets::toad(),
            Preset::Beacon => presets::beacon(),
            Preset::Glider => presets::glider(),
            Preset::RPentomino => presets::r_pentomino(),
        }
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ]
        )
    }

    /// Blinker - period 2 oscillator, horizontal phase
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![
                (0, 0), (1, 0), (2, 0),
            ]
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ]
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Oscillator (period 2)",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ]
        )
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ]
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ]
        )
    }
}
