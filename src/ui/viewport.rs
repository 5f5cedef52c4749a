//! Mapping between world units and terminal cells.
//!
//! A cell belongs to a world rectangle when the cell's centre lies inside
//! it, so drawing and pointer hit-testing agree on every button edge.
//! The bottom row of the play area is the ground strip and has no world
//! coordinates of its own.

use ratatui::layout::Rect;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub world_width: f64,
    pub world_height: f64,
}

impl Viewport {
    pub fn new(area: Rect, world_width: f64, world_height: f64) -> Self {
        Self {
            area,
            world_width,
            world_height,
        }
    }

    /// Rows that show the world above the ground strip.
    pub fn sky_rows(&self) -> u16 {
        self.area.height.saturating_sub(1)
    }

    fn x_scale(&self) -> f64 {
        self.area.width as f64 / self.world_width
    }

    fn y_scale(&self) -> f64 {
        self.sky_rows() as f64 / self.world_height
    }

    /// Columns covered by `[x, x + width)`, relative to the area.
    pub fn columns(&self, x: f64, width: f64) -> Range<i32> {
        cell_span(x, width, self.x_scale())
    }

    /// Rows covered by `[y, y + height)`, relative to the area.
    pub fn rows(&self, y: f64, height: f64) -> Range<i32> {
        cell_span(y, height, self.y_scale())
    }

    pub fn column_of(&self, x: f64) -> i32 {
        (x * self.x_scale()).floor() as i32
    }

    pub fn row_of(&self, y: f64) -> i32 {
        (y * self.y_scale()).floor() as i32
    }

    /// World x at the centre of a relative column.
    pub fn column_center(&self, col: i32) -> f64 {
        (col as f64 + 0.5) / self.x_scale()
    }

    /// World point under an absolute terminal cell, if it is in the sky.
    pub fn to_world(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let a = self.area;
        if column < a.x || column >= a.x + a.width || row < a.y || row >= a.y + self.sky_rows() {
            return None;
        }
        let col = (column - a.x) as f64;
        let row = (row - a.y) as f64;
        Some(((col + 0.5) / self.x_scale(), (row + 0.5) / self.y_scale()))
    }
}

/// Cells whose centre lies in `[start, start + len)` at `scale` cells per
/// unit. Rectangles too thin to contain a centre still get the cell under
/// their midpoint.
fn cell_span(start: f64, len: f64, scale: f64) -> Range<i32> {
    let lo = (start * scale - 0.5).ceil() as i32;
    let hi = ((start + len) * scale - 0.5).ceil() as i32;
    if hi > lo {
        lo..hi
    } else {
        let mid = ((start + len / 2.0) * scale).floor() as i32;
        mid..mid + 1
    }
}
