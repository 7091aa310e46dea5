//! View transformation between screen and world coordinates.
//!
//! Handles conversion between screen pixels and world coordinates (design
//! space) under pan and zoom. The two mappings are exact inverses:
//!
//! ```text
//! world  = (screen - pan) / zoom
//! screen = world * zoom + pan
//! ```

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the 2D plan view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl View {
    /// Creates a view at 1:1 zoom with no pan.
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, constrained between 0.1 and 50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.1 && zoom < 50.0 {
            self.zoom = zoom;
        }
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, p: &Point) -> Point {
        Point::new((p.x - self.pan_x) / self.zoom, (p.y - self.pan_y) / self.zoom)
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, p: &Point) -> Point {
        Point::new(p.x * self.zoom + self.pan_x, p.y * self.zoom + self.pan_y)
    }

    /// Zooms to a point, maintaining that point's screen position.
    ///
    /// Useful for "zoom to cursor" behavior.
    pub fn zoom_to_point(&mut self, world_point: &Point, new_zoom: f64) {
        if new_zoom <= 0.1 || new_zoom >= 50.0 {
            return;
        }
        // screen = world * zoom + pan  =>  pan = screen - world * zoom
        let screen = self.world_to_screen(world_point);
        self.zoom = new_zoom;
        self.pan_x = screen.x - world_point.x * new_zoom;
        self.pan_y = screen.y - world_point.y * new_zoom;
    }

    /// Zooms in at a specific world point (maintaining cursor position).
    pub fn zoom_in_at(&mut self, world_point: &Point) {
        self.zoom_to_point(world_point, self.zoom * 1.2);
    }

    /// Zooms out at a specific world point (maintaining cursor position).
    pub fn zoom_out_at(&mut self, world_point: &Point) {
        self.zoom_to_point(world_point, self.zoom / 1.2);
    }

    /// Resets to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}
