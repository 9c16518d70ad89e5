//! Pan/zoom state of the canvas and the screen ↔ graph conversions.
//!
//! Node positions are stored in graph space, which is invariant to pan and
//! zoom. Pointer input arrives in screen space:
//!
//! ```text
//! screen = graph * scale + offset
//! graph  = (screen - offset) / scale
//! ```
//!
//! `scale` is always kept inside `[min_scale, max_scale]`, with a strictly
//! positive lower bound, so the division is always defined.

use crate::config::CanvasConfig;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    offset_x: f32,
    offset_y: f32,
    scale: f32,
    min_scale: f32,
    max_scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(0.1, 3.0)
    }
}

impl ViewportTransform {
    /// Identity transform with the given scale bounds.
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0_f32.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.min_scale, config.max_scale)
    }

    /// Replace the whole transform; `scale` is clamped.
    pub fn set(&mut self, offset_x: f32, offset_y: f32, scale: f32) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self.scale = self.clamp_scale(scale);
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scale_bounds(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    /// Zoom level as a rounded percentage, for the zoom indicator.
    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn screen_to_graph(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    pub fn graph_to_screen(&self, graph: Point) -> Point {
        Point::new(
            graph.x * self.scale + self.offset_x,
            graph.y * self.scale + self.offset_y,
        )
    }

    /// Change the scale by `delta_scale`, keeping the graph point under the
    /// screen point `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: Point, delta_scale: f32) {
        if !anchor.is_finite() || !delta_scale.is_finite() {
            log::debug!("ignoring zoom with non-finite input {:?} {}", anchor, delta_scale);
            return;
        }
        let new_scale = self.clamp_scale(self.scale + delta_scale);
        let ratio = new_scale / self.scale;
        self.offset_x = anchor.x - (anchor.x - self.offset_x) * ratio;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) * ratio;
        self.scale = new_scale;
    }

    /// Multiply the scale by `factor` around `anchor`.
    pub fn zoom_by_factor(&mut self, anchor: Point, factor: f32) {
        let delta = self.scale * factor - self.scale;
        self.zoom_at(anchor, delta);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.offset_x += dx;
            self.offset_y += dy;
        }
    }

    /// Back to `offset = (0, 0)`, `scale = 1`.
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.scale = self.clamp_scale(1.0);
    }
}
