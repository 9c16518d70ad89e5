//! Graph-space anchor points of node handles.
//!
//! Every node has one input handle just left of its header and one output
//! handle just right of it. The output handle depends on the node's rendered
//! width, which is only known after the first paint; until then a fallback
//! width is used, so the output handle may shift once when the width arrives.

use crate::config::CanvasConfig;
use crate::geometry::Point;
use crate::graph::Node;

/// Which side of a node a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Input,
    Output,
}

/// Anchor computation with fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    /// Horizontal gap between the node edge and the anchor
    pub offset_x: f32,
    /// Vertical distance from the node's top edge to the anchor
    pub offset_y: f32,
    /// Width used while `measured_width` is unknown
    pub fallback_width: f32,
}

impl Default for HandleGeometry {
    fn default() -> Self {
        Self {
            offset_x: 8.0,
            offset_y: 50.0,
            fallback_width: 270.0,
        }
    }
}

impl HandleGeometry {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            offset_x: config.handle_offset_x,
            offset_y: config.handle_offset_y,
            fallback_width: config.fallback_node_width,
        }
    }

    pub fn effective_width(&self, node: &Node) -> f32 {
        node.measured_width.unwrap_or(self.fallback_width)
    }

    pub fn input_anchor(&self, node: &Node) -> Point {
        Point::new(
            node.position.x - self.offset_x,
            node.position.y + self.offset_y,
        )
    }

    pub fn output_anchor(&self, node: &Node) -> Point {
        Point::new(
            node.position.x + self.effective_width(node) + self.offset_x,
            node.position.y + self.offset_y,
        )
    }

    pub fn anchor(&self, node: &Node, kind: HandleKind) -> Point {
        match kind {
            HandleKind::Input => self.input_anchor(node),
            HandleKind::Output => self.output_anchor(node),
        }
    }
}
