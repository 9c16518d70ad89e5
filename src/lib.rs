//! # Layer Canvas
//!
//! The interactive core of a visual neural-network builder: layers are dropped
//! onto an infinite pannable and zoomable canvas, wired together by dragging
//! from output handles to input handles, edited inline and finally exported
//! as a plain `{nodes, connections}` snapshot.
//!
//! ## Features
//!
//! - **Viewport** - pan offset and clamped zoom with pointer-anchored zooming
//! - **Graph store** - nodes, toggle-semantics connections, cascading removal and renames
//! - **Handle snapping** - connections snap to the nearest input handle in screen space
//! - **Total operations** - rejected input is logged and ignored, never surfaced
//! - **Slint bridge** - ready-made callbacks and `VecModel` sync
//!
//! ## Quick Start
//!
//! ```
//! use layer_canvas::{HitTarget, InteractionController, NodeKind, Point, PointerEvent};
//!
//! let mut canvas = InteractionController::new();
//! let input = canvas.add_node(NodeKind::Input, Point::new(100.0, 100.0)).unwrap();
//! let output = canvas.add_node(NodeKind::Output, Point::new(400.0, 100.0)).unwrap();
//!
//! // Drag from the input layer's output handle onto the output layer's input handle
//! let from = canvas.viewport().graph_to_screen(Point::new(378.0, 150.0));
//! canvas.pointer_down(PointerEvent::primary(from, HitTarget::OutputHandle(input.clone())));
//! canvas.pointer_move(Point::new(392.0, 150.0));
//! canvas.pointer_up(Point::new(392.0, 150.0), HitTarget::InputHandle(output.clone()));
//!
//! assert!(canvas.graph().has_connection(&input, &output));
//! let json = canvas.export().to_json().unwrap();
//! assert!(json.contains("\"connections\""));
//! ```
//!
//! ## Core Types
//!
//! - [`InteractionController`] - the event state machine and canvas session
//! - [`GraphStore`] - nodes and connections with their invariants
//! - [`ViewportTransform`] - screen/graph coordinate conversion
//! - [`HandleGeometry`] - handle anchor positions
//! - [`GraphExport`] - the export snapshot
//! - [`CanvasTracker`] - Slint callback factories and model sync
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod geometry;
pub mod graph;
pub mod handles;
pub mod ids;
pub mod kind;
pub mod params;
pub mod payload;
pub mod selection;
pub mod state;
pub mod tracking;
pub mod viewport;

pub use config::CanvasConfig;
pub use controller::{
    HitTarget, InteractionController, Key, Modifiers, PointerButton, PointerEvent,
};
pub use error::{CanvasError, Result};
pub use export::{ExportMetadata, ExportedNode, GraphExport};
pub use geometry::Point;
pub use graph::{Connection, ConnectionToggle, GraphStore, Node};
pub use handles::{HandleGeometry, HandleKind};
pub use hit_test::{find_handle_at, nearest_handle_within, screen_anchors, HandleAnchor};
pub use ids::{is_valid_id, IdGenerator, ID_LENGTH};
pub use kind::NodeKind;
pub use params::{coerce_raw, is_shape_like, ParamValue, Parameters};
pub use payload::DropPayload;
pub use selection::Selection;
pub use state::{ConnectionPreview, InteractionMode};
pub use tracking::{key_from_text, CanvasTracker, ConnectionRow, NodeRow};
pub use viewport::ViewportTransform;
