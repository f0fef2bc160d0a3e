//! Drawing side of the simulation.
//!
//! The core only talks to a [`Renderer`]: something that accepts colored
//! quads. [`TileAdapter`] turns the committed grid into those quads and
//! [`ScreenRenderer`] puts them on a macroquad window.

mod screen;
mod tiles;

pub use screen::ScreenRenderer;
pub use tiles::{TileAdapter, TileLayout};

use crate::domain::Color;

/// A 2D point in screen space
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Four corners of a quad, in winding order
pub type Quad = [Vertex; 4];

/// Capability set the simulation needs from a graphics backend.
pub trait Renderer {
    /// Start a new frame
    fn begin_frame(&mut self);

    /// Color used by subsequent quads
    fn set_color(&mut self, color: Color);

    /// Queue one quad in the current color
    fn put_quad(&mut self, quad: Quad);

    /// Submit everything queued since the last flush
    fn flush(&mut self);

    /// Present the finished frame
    fn swap_buffers(&mut self);
}
