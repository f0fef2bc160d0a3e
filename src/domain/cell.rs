use rand::Rng;

/// Column/row coordinate of a cell. `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// RGBA color, one byte per channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Light opaque color: every channel lands in `128..=255`.
    pub fn random_light<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: 128 + rng.random_range(0..128u8),
            g: 128 + rng.random_range(0..128u8),
            b: 128 + rng.random_range(0..128u8),
            a: 255,
        }
    }
}

/// Cell is the fundamental unit of the automaton.
///
/// `alive` is the committed state of the current generation. `alive_next`
/// is the staging slot written while the next generation is computed and
/// only copied into `alive` on commit. Position and color never change.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    position: Position,
    color: Color,
    alive: bool,
    alive_next: bool,
}

impl Cell {
    pub const fn new(position: Position, color: Color, alive: bool) -> Self {
        Self {
            position,
            color,
            alive,
            alive_next: alive,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// Check if the cell is alive in the committed generation
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Value staged for the next generation
    pub const fn alive_next(&self) -> bool {
        self.alive_next
    }

    pub(crate) fn stage(&mut self, alive_next: bool) {
        self.alive_next = alive_next;
    }

    /// Promote the staged value. Returns the new `alive` state.
    pub(crate) fn commit(&mut self) -> bool {
        self.alive = self.alive_next;
        self.alive
    }

    /// Seeding only: sets both the committed and the staged value.
    pub(crate) fn seed(&mut self, alive: bool) {
        self.alive = alive;
        self.alive_next = alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_stage_does_not_touch_alive() {
        let mut cell = Cell::new(Position::new(0, 0), Color::rgba(200, 200, 200, 255), true);
        cell.stage(false);
        assert!(cell.is_alive());
        assert!(!cell.alive_next());
    }

    #[test]
    fn test_commit_promotes_staged_value() {
        let mut cell = Cell::new(Position::new(3, 4), Color::rgba(200, 200, 200, 255), false);
        cell.stage(true);
        assert!(cell.commit());
        assert!(cell.is_alive());
        assert_eq!(cell.position(), Position::new(3, 4));
    }

    #[test]
    fn test_random_light_color_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let color = Color::random_light(&mut rng);
            assert!(color.r >= 128 && color.g >= 128 && color.b >= 128);
            assert_eq!(color.a, 255);
        }
    }
}
