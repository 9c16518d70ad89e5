//! Transient interaction state.
//!
//! Nothing here is part of the exported model. Every field returns to
//! "none" when a gesture ends (pointer-up, escape or cancel); only the
//! selection, kept by the controller in a [`Selection`](crate::Selection),
//! survives between gestures.

use crate::geometry::Point;

/// Preview segment of a connection being drawn, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPreview {
    /// Output anchor of the source node
    pub from: Point,
    /// Snap target's input anchor, or the raw pointer
    pub to: Point,
    /// Whether `to` is a snapped input anchor
    pub snapped: bool,
}

/// The gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning {
        /// Screen-space pointer position at pointer-down
        anchor: Point,
        /// Viewport offset at pointer-down
        origin_offset: Point,
    },
    DraggingNode {
        node_id: String,
        /// Graph-space offset from the node origin to the pointer
        grab_offset: Point,
        /// Screen-space pointer position at pointer-down
        press_position: Point,
        /// Set once the pointer moved away from `press_position`
        moved: bool,
    },
    DrawingConnection {
        source_id: String,
        preview: Option<ConnectionPreview>,
        snap_target: Option<String>,
    },
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    /// Short state name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Panning { .. } => "panning",
            InteractionMode::DraggingNode { .. } => "dragging",
            InteractionMode::DrawingConnection { .. } => "connecting",
        }
    }

    /// Whether any field of the gesture refers to `node_id`.
    pub fn references(&self, node_id: &str) -> bool {
        match self {
            InteractionMode::DraggingNode { node_id: id, .. } => id == node_id,
            InteractionMode::DrawingConnection {
                source_id,
                snap_target,
                ..
            } => source_id == node_id || snap_target.as_deref() == Some(node_id),
            _ => false,
        }
    }

    /// Rewrite node references after a rename.
    pub fn rename(&mut self, old_id: &str, new_id: &str) {
        match self {
            InteractionMode::DraggingNode { node_id, .. } if *node_id == old_id => {
                *node_id = new_id.to_string();
            }
            InteractionMode::DrawingConnection {
                source_id,
                snap_target,
                ..
            } => {
                if *source_id == old_id {
                    *source_id = new_id.to_string();
                }
                if snap_target.as_deref() == Some(old_id) {
                    *snap_target = Some(new_id.to_string());
                }
            }
            _ => {}
        }
    }

    pub fn dragged_node(&self) -> Option<&str> {
        match self {
            InteractionMode::DraggingNode { node_id, .. } => Some(node_id.as_str()),
            _ => None,
        }
    }

    pub fn connection_source(&self) -> Option<&str> {
        match self {
            InteractionMode::DrawingConnection { source_id, .. } => Some(source_id.as_str()),
            _ => None,
        }
    }

    pub fn snap_target(&self) -> Option<&str> {
        match self {
            InteractionMode::DrawingConnection { snap_target, .. } => snap_target.as_deref(),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<ConnectionPreview> {
        match self {
            InteractionMode::DrawingConnection { preview, .. } => *preview,
            _ => None,
        }
    }
}
