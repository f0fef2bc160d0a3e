use macroquad::color::{BLACK, Color as ScreenColor};
use macroquad::math::vec2;
use macroquad::shapes::draw_triangle;
use macroquad::window::clear_background;

use crate::domain::Color;

use super::{Quad, Renderer};

fn to_screen_color(color: Color) -> ScreenColor {
    ScreenColor::from_rgba(color.r, color.g, color.b, color.a)
}

/// [`Renderer`] backed by macroquad.
///
/// Quads are buffered between `begin_frame` and `flush`, then drawn as two
/// triangles each. Presenting the frame is macroquad's `next_frame`.
pub struct ScreenRenderer {
    color: ScreenColor,
    batch: Vec<(ScreenColor, Quad)>,
    frames: u64,
}

impl ScreenRenderer {
    pub fn new() -> Self {
        Self {
            color: ScreenColor::from_rgba(255, 255, 255, 255),
            batch: Vec::new(),
            frames: 0,
        }
    }

    /// Frames handed to the window so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for ScreenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ScreenRenderer {
    fn begin_frame(&mut self) {
        self.batch.clear();
        clear_background(BLACK);
    }

    fn set_color(&mut self, color: Color) {
        self.color = to_screen_color(color);
    }

    fn put_quad(&mut self, quad: Quad) {
        self.batch.push((self.color, quad));
    }

    fn flush(&mut self) {
        for (color, [a, b, c, d]) in self.batch.drain(..) {
            let (a, b, c, d) = (vec2(a.x, a.y), vec2(b.x, b.y), vec2(c.x, c.y), vec2(d.x, d.y));
            draw_triangle(a, b, c, color);
            draw_triangle(a, c, d, color);
        }
    }

    fn swap_buffers(&mut self) {
        // presented by the caller's `next_frame().await`
        self.frames += 1;
    }
}
