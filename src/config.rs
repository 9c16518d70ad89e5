//! Tuning values for the canvas.
//!
//! None of these carry a behavioural contract beyond "small and bounded", so
//! they are plain data with defaults matching the reference canvas. Hosts
//! can override any subset from a TOML document:
//!
//! ```
//! use layer_canvas::CanvasConfig;
//!
//! let config = CanvasConfig::from_toml_str("snap_radius = 40.0\nmax_scale = 4.0").unwrap();
//! assert_eq!(config.snap_radius, 40.0);
//! assert_eq!(config.min_scale, 0.1);
//! ```

use crate::error::Result;
use crate::geometry::Point;
use crate::kind::NodeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Lower zoom bound
    pub min_scale: f32,
    /// Upper zoom bound
    pub max_scale: f32,
    /// Scale change per unit of wheel delta
    pub wheel_sensitivity: f32,
    /// Multiplicative step of the zoom-in/zoom-out controls
    pub zoom_step: f32,
    /// Screen-space distance within which an input handle becomes the snap target
    pub snap_radius: f32,
    /// Horizontal distance between a node edge and its handle anchor
    pub handle_offset_x: f32,
    /// Vertical distance between a node's top edge and its handle anchors
    pub handle_offset_y: f32,
    /// Width assumed for nodes that have not been measured yet
    pub fallback_node_width: f32,
    /// Drop points are shifted left by this much so the cursor lands on the header
    pub drop_anchor_x: f32,
    /// Drop points are shifted up by this much
    pub drop_anchor_y: f32,
    /// Kinds that cannot be dropped onto the canvas
    pub disabled_kinds: Vec<NodeKind>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 3.0,
            wheel_sensitivity: 0.001,
            zoom_step: 1.2,
            snap_radius: 30.0,
            handle_offset_x: 8.0,
            handle_offset_y: 50.0,
            fallback_node_width: 270.0,
            drop_anchor_x: 60.0,
            drop_anchor_y: 50.0,
            disabled_kinds: Vec::new(),
        }
    }
}

impl CanvasConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CanvasConfig = toml::from_str(source)?;
        Ok(config.validated())
    }

    /// Repair values that would break the viewport invariants.
    ///
    /// Scale bounds must be positive and ordered; the zoom step must be
    /// greater than one.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            log::warn!("min_scale {} is not positive, using {}", self.min_scale, defaults.min_scale);
            self.min_scale = defaults.min_scale;
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            log::warn!("max_scale {} is not positive, using {}", self.max_scale, defaults.max_scale);
            self.max_scale = defaults.max_scale;
        }
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            self.zoom_step = defaults.zoom_step;
        }
        self
    }

    pub fn drop_anchor(&self) -> Point {
        Point::new(self.drop_anchor_x, self.drop_anchor_y)
    }

    pub fn is_kind_enabled(&self, kind: NodeKind) -> bool {
        !self.disabled_kinds.contains(&kind)
    }
}
