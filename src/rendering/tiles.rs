use crate::domain::{Cell, Grid, Position};

use super::{Quad, Renderer, Vertex};

/// Geometry of the tile grid on screen: every cell is a `tile_width` x
/// `tile_height` rectangle, with cell `(0, 0)` at the top-left corner.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TileLayout {
    pub tile_width: f32,
    pub tile_height: f32,
}

impl TileLayout {
    pub const fn new(tile_width: f32, tile_height: f32) -> Self {
        Self { tile_width, tile_height }
    }

    /// Split a `width` x `height` window evenly across `cols` x `rows` tiles
    pub fn fit(width: f32, height: f32, cols: usize, rows: usize) -> Self {
        Self::new(width / cols as f32, height / rows as f32)
    }

    /// Quad covering the cell at `position`
    pub fn quad(&self, position: Position) -> Quad {
        let (w, h) = (self.tile_width, self.tile_height);
        let (x, y) = (position.x as f32, position.y as f32);
        [
            Vertex::new(x * w, y * h),
            Vertex::new(x * w, (y + 1.0) * h),
            Vertex::new((x + 1.0) * w, (y + 1.0) * h),
            Vertex::new((x + 1.0) * w, y * h),
        ]
    }
}

/// Maps committed cell state to draw calls. Live cells become one quad in
/// their own color; dead cells emit nothing. Never writes to the grid.
#[derive(Clone, Debug)]
pub struct TileAdapter {
    layout: TileLayout,
}

impl TileAdapter {
    pub const fn new(layout: TileLayout) -> Self {
        Self { layout }
    }

    /// Draw a single cell. Returns whether a quad was emitted.
    pub fn draw_cell<R: Renderer + ?Sized>(&self, cell: &Cell, renderer: &mut R) -> bool {
        if !cell.is_alive() {
            return false;
        }
        renderer.set_color(cell.color());
        renderer.put_quad(self.layout.quad(cell.position()));
        true
    }

    /// Draw one frame of the grid: begin, one quad per live cell, flush.
    /// Returns the number of quads emitted.
    pub fn draw<R: Renderer + ?Sized>(&self, grid: &Grid, renderer: &mut R) -> usize {
        renderer.begin_frame();
        let drawn = grid
            .cells()
            .filter(|cell| self.draw_cell(cell, renderer))
            .count();
        renderer.flush();
        drawn
    }
}
