//! Pointer and keyboard state machine for the layer canvas.
//!
//! The [`InteractionController`] owns the canvas session: the graph, the
//! viewport, the transient [`InteractionMode`] and the selection. A
//! presentation layer forwards raw events into it and re-renders from the
//! accessors afterwards.
//!
//! Every operation is total. Rejected input (unknown ids, invalid renames,
//! releasing a connection over empty space) and malformed drop payloads are
//! logged and otherwise ignored, so a gesture always ends in a consistent
//! state.
//!
//! # Example
//!
//! ```
//! use layer_canvas::{HitTarget, InteractionController, NodeKind, Point, PointerEvent};
//!
//! let mut ctrl = InteractionController::new();
//! let id = ctrl.drop_kind(NodeKind::Linear, Point::new(160.0, 150.0)).unwrap();
//!
//! // Drag the node 40px to the right.
//! ctrl.pointer_down(PointerEvent::primary(
//!     Point::new(120.0, 120.0),
//!     HitTarget::NodeBody(id.clone()),
//! ));
//! ctrl.pointer_move(Point::new(160.0, 120.0));
//! ctrl.pointer_up(Point::new(160.0, 120.0), HitTarget::NodeBody(id.clone()));
//!
//! assert_eq!(ctrl.graph().node(&id).unwrap().position, Point::new(140.0, 100.0));
//! ```

use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::export::GraphExport;
use crate::geometry::Point;
use crate::graph::{ConnectionToggle, GraphStore};
use crate::handles::{HandleGeometry, HandleKind};
use crate::hit_test::{find_handle_at, nearest_handle_within, screen_anchors, HandleAnchor};
use crate::kind::NodeKind;
use crate::payload::DropPayload;
use crate::selection::Selection;
use crate::state::{ConnectionPreview, InteractionMode};
use crate::viewport::ViewportTransform;

/// Pointer button of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
    Other,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
        meta: false,
    };
}

/// What the presentation layer found under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HitTarget {
    /// Empty canvas area
    #[default]
    Canvas,
    /// The body of a node, outside any embedded control
    NodeBody(String),
    /// An embedded editable control or label of a node
    Control(String),
    InputHandle(String),
    OutputHandle(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Screen-space pointer position
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub target: HitTarget,
}

impl PointerEvent {
    pub fn new(position: Point, button: PointerButton, target: HitTarget) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::NONE,
            target,
        }
    }

    /// Primary-button press without modifiers.
    pub fn primary(position: Point, target: HitTarget) -> Self {
        Self::new(position, PointerButton::Primary, target)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

/// The canvas session: graph, viewport, interaction state and selection.
#[derive(Debug)]
pub struct InteractionController {
    graph: GraphStore,
    viewport: ViewportTransform,
    handles: HandleGeometry,
    config: CanvasConfig,
    mode: InteractionMode,
    selection: Selection,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Create a controller with default tuning values and an empty graph.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self::with_graph(config, GraphStore::new())
    }

    /// Create a controller around an existing graph.
    pub fn with_graph(config: CanvasConfig, graph: GraphStore) -> Self {
        let config = config.validated();
        Self {
            graph,
            viewport: ViewportTransform::from_config(&config),
            handles: HandleGeometry::from_config(&config),
            config,
            mode: InteractionMode::Idle,
            selection: Selection::new(),
        }
    }

    // === Accessors ===

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn handle_geometry(&self) -> &HandleGeometry {
        &self.handles
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.get()
    }

    /// Live preview segment while a connection is being drawn.
    pub fn preview(&self) -> Option<ConnectionPreview> {
        self.mode.preview()
    }

    pub fn snap_target(&self) -> Option<&str> {
        self.mode.snap_target()
    }

    /// Snapshot of the graph for the export collaborator.
    pub fn export(&self) -> GraphExport {
        self.graph.export()
    }

    // === Pointer events ===

    /// Start a gesture.
    ///
    /// Presses while another gesture is in progress are ignored.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if !self.mode.is_idle() {
            log::debug!("ignoring pointer-down while {}", self.mode.name());
            return;
        }
        if !event.position.is_finite() {
            log::debug!("ignoring pointer-down at {:?}", event.position);
            return;
        }

        let position = event.position;
        match (event.button, event.target) {
            (PointerButton::Middle, HitTarget::Canvas) => self.start_panning(position),
            (PointerButton::Primary, HitTarget::Canvas) if event.modifiers.ctrl => {
                self.start_panning(position)
            }
            (PointerButton::Primary, HitTarget::Canvas) => {
                if !self.selection.is_empty() {
                    log::debug!("canvas press clears selection");
                    self.selection.clear();
                }
            }
            (PointerButton::Primary, HitTarget::NodeBody(node_id)) => {
                self.start_dragging(node_id, position)
            }
            (PointerButton::Primary, HitTarget::OutputHandle(node_id)) => {
                self.start_connection(node_id, position)
            }
            (button, target) => {
                log::debug!("pointer-down {:?} on {:?} is inert", button, target);
            }
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        if !position.is_finite() {
            log::debug!("ignoring pointer-move to {:?}", position);
            return;
        }

        match std::mem::take(&mut self.mode) {
            InteractionMode::Idle => {}
            InteractionMode::Panning {
                anchor,
                origin_offset,
            } => {
                let offset = origin_offset + (position - anchor);
                self.viewport
                    .set(offset.x, offset.y, self.viewport.scale());
                self.mode = InteractionMode::Panning {
                    anchor,
                    origin_offset,
                };
            }
            InteractionMode::DraggingNode {
                node_id,
                grab_offset,
                press_position,
                moved,
            } => {
                let target = self.viewport.screen_to_graph(position) - grab_offset;
                if let Err(err) = self.graph.set_position(&node_id, target) {
                    log::debug!("drag of {} ended: {}", node_id, err);
                    return;
                }
                self.mode = InteractionMode::DraggingNode {
                    node_id,
                    grab_offset,
                    press_position,
                    moved: moved || position != press_position,
                };
            }
            InteractionMode::DrawingConnection { source_id, .. } => {
                match self.connection_preview(&source_id, position) {
                    Some((preview, snap_target)) => {
                        self.mode = InteractionMode::DrawingConnection {
                            source_id,
                            preview: Some(preview),
                            snap_target,
                        };
                    }
                    None => log::debug!("connection source {} is gone", source_id),
                }
            }
        }
    }

    /// Finish the current gesture.
    ///
    /// `target` is what lies under the pointer at release. The controller is
    /// always idle afterwards.
    pub fn pointer_up(&mut self, position: Point, target: HitTarget) {
        match std::mem::take(&mut self.mode) {
            InteractionMode::Idle => {}
            InteractionMode::Panning { .. } => log::debug!("panning -> idle"),
            InteractionMode::DraggingNode { node_id, moved, .. } => {
                if !moved && self.graph.contains(&node_id) {
                    self.selection.select(&node_id);
                }
                log::debug!("dragging -> idle");
            }
            InteractionMode::DrawingConnection { source_id, .. } => {
                self.finish_connection(&source_id, position, &target);
                log::debug!("connecting -> idle");
            }
        }
    }

    /// Abandon the current gesture without touching the graph.
    pub fn cancel(&mut self) {
        if !self.mode.is_idle() {
            log::debug!("{} cancelled", self.mode.name());
            self.mode = InteractionMode::Idle;
        }
    }

    fn start_panning(&mut self, anchor: Point) {
        log::debug!("idle -> panning at ({}, {})", anchor.x, anchor.y);
        self.mode = InteractionMode::Panning {
            anchor,
            origin_offset: self.viewport.offset(),
        };
    }

    fn start_dragging(&mut self, node_id: String, pointer: Point) {
        let Some(node) = self.graph.node(&node_id) else {
            log::debug!("press on unknown node {}", node_id);
            return;
        };
        let grab_offset = self.viewport.screen_to_graph(pointer) - node.position;
        log::debug!("idle -> dragging {}", node_id);
        self.mode = InteractionMode::DraggingNode {
            node_id,
            grab_offset,
            press_position: pointer,
            moved: false,
        };
    }

    fn start_connection(&mut self, source_id: String, pointer: Point) {
        let Some((preview, snap_target)) = self.connection_preview(&source_id, pointer) else {
            log::debug!("press on output handle of unknown node {}", source_id);
            return;
        };
        log::debug!("idle -> connecting from {}", source_id);
        self.mode = InteractionMode::DrawingConnection {
            source_id,
            preview: Some(preview),
            snap_target,
        };
    }

    fn finish_connection(&mut self, source_id: &str, pointer: Point, target: &HitTarget) {
        if !matches!(target, HitTarget::InputHandle(_)) {
            log::debug!("connection from {} released over {:?}", source_id, target);
            return;
        }
        let snap_target = if pointer.is_finite() {
            self.connection_preview(source_id, pointer)
                .and_then(|(_, snap)| snap)
        } else {
            None
        };
        let Some(snap_target) = snap_target else {
            log::debug!("connection from {} released without a snap target", source_id);
            return;
        };
        if let Err(err) = self.graph.toggle_connection(source_id, &snap_target) {
            log::debug!("connection rejected: {}", err);
        }
    }

    /// Preview segment from the output anchor of `source_id` towards the
    /// pointer, and the input handle it snaps to, if any.
    ///
    /// Returns `None` if the source node does not exist.
    fn connection_preview(
        &self,
        source_id: &str,
        pointer: Point,
    ) -> Option<(ConnectionPreview, Option<String>)> {
        let source = self.graph.node(source_id)?;
        let from = self
            .viewport
            .graph_to_screen(self.handles.output_anchor(source));
        let candidates = screen_anchors(
            self.graph.nodes().iter().filter(|n| n.id != source_id),
            HandleKind::Input,
            &self.handles,
            &self.viewport,
        );

        let result = match nearest_handle_within(pointer, candidates, self.config.snap_radius) {
            Some((anchor, _)) => (
                ConnectionPreview {
                    from,
                    to: anchor.position,
                    snapped: true,
                },
                Some(anchor.node_id),
            ),
            None => (
                ConnectionPreview {
                    from,
                    to: pointer,
                    snapped: false,
                },
                None,
            ),
        };
        Some(result)
    }

    // === Keyboard ===

    /// Handle a key press. Returns `true` if the key was consumed.
    ///
    /// Delete and Backspace remove the selected node, but only while no text
    /// input has focus. Escape cancels the current gesture.
    pub fn key_pressed(&mut self, key: Key, text_input_focused: bool) -> bool {
        match key {
            Key::Escape if !self.mode.is_idle() => {
                self.cancel();
                true
            }
            Key::Delete | Key::Backspace if !text_input_focused => self.delete_selected(),
            _ => false,
        }
    }

    // === Viewport ===

    /// Zoom around the pointer by a wheel delta.
    ///
    /// Scrolling up (negative delta) zooms in.
    pub fn wheel(&mut self, pointer: Point, delta_y: f32) {
        let delta_scale = -delta_y * self.config.wheel_sensitivity;
        self.viewport.zoom_at(pointer, delta_scale);
    }

    pub fn zoom_in(&mut self, center: Point) {
        self.viewport.zoom_by_factor(center, self.config.zoom_step);
    }

    pub fn zoom_out(&mut self, center: Point) {
        self.viewport
            .zoom_by_factor(center, 1.0 / self.config.zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    // === Drops ===

    /// Handle a drop from the layer library.
    ///
    /// `raw` is the JSON drag payload and `screen` the screen-space drop
    /// point. Returns the id of the new node.
    pub fn handle_drop(&mut self, raw: &str, screen: Point) -> Option<String> {
        let kind = match DropPayload::parse(raw).and_then(|payload| payload.kind()) {
            Ok(kind) => kind,
            Err(err @ CanvasError::MalformedPayload(_)) => {
                log::warn!("ignoring drop: {}", err);
                return None;
            }
            Err(err) => {
                log::debug!("ignoring drop: {}", err);
                return None;
            }
        };
        self.drop_kind(kind, screen)
    }

    /// Place a node of `kind` where it was dropped.
    ///
    /// The drop point is shifted by the drop anchor so the cursor ends up on
    /// the node header.
    pub fn drop_kind(&mut self, kind: NodeKind, screen: Point) -> Option<String> {
        if !self.config.is_kind_enabled(kind) {
            log::info!("{}", CanvasError::KindUnavailable(kind));
            return None;
        }
        let position = self
            .viewport
            .screen_to_graph(screen - self.config.drop_anchor());
        self.add_node(kind, position)
    }

    /// Add a node at a graph-space position.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Option<String> {
        match self.graph.add_node(kind, position) {
            Ok(node) => Some(node.id.clone()),
            Err(err) => {
                log::debug!("node not added: {}", err);
                None
            }
        }
    }

    // === Editing ===

    /// Rename a node. The selection and any gesture on it follow the rename.
    pub fn rename_node(&mut self, old_id: &str, new_id: &str) -> bool {
        match self.graph.rename_node(old_id, new_id) {
            Ok(stored) => {
                self.selection.rename(old_id, &stored);
                self.mode.rename(old_id, &stored);
                true
            }
            Err(err) => {
                log::debug!("rename of {} rejected: {}", old_id, err);
                false
            }
        }
    }

    pub fn update_parameter(&mut self, node_id: &str, key: &str, raw: &str) -> bool {
        match self.graph.update_parameter(node_id, key, raw) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("parameter edit rejected: {}", err);
                false
            }
        }
    }

    /// Record the rendered width of a node in graph-space units.
    pub fn report_width(&mut self, node_id: &str, width: f32) -> bool {
        match self.graph.set_width(node_id, width) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("width report rejected: {}", err);
                false
            }
        }
    }

    /// Record the rendered width of a node as measured on screen.
    pub fn report_screen_width(&mut self, node_id: &str, screen_width: f32) -> bool {
        self.report_width(node_id, screen_width / self.viewport.scale())
    }

    pub fn toggle_connection(&mut self, from: &str, to: &str) -> Option<ConnectionToggle> {
        match self.graph.toggle_connection(from, to) {
            Ok(toggle) => Some(toggle),
            Err(err) => {
                log::debug!("toggle rejected: {}", err);
                None
            }
        }
    }

    /// Remove a node and its connections.
    ///
    /// A selection or gesture referring to the node is dropped.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        match self.graph.remove_node(node_id) {
            Ok(_) => {
                self.selection.forget(node_id);
                if self.mode.references(node_id) {
                    log::debug!("{} ended by removal of {}", self.mode.name(), node_id);
                    self.mode = InteractionMode::Idle;
                }
                true
            }
            Err(err) => {
                log::debug!("remove rejected: {}", err);
                false
            }
        }
    }

    /// Remove the selected node, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.take() {
            Some(node_id) => self.remove_node(&node_id),
            None => false,
        }
    }

    pub fn select(&mut self, node_id: &str) -> bool {
        if self.graph.contains(node_id) {
            self.selection.select(node_id);
            true
        } else {
            log::debug!("cannot select unknown node {}", node_id);
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // === Hit testing ===

    /// Find the handle under a screen-space position.
    ///
    /// Output handles are checked before input handles. `hit_radius` is in
    /// screen units and inclusive.
    pub fn find_handle_at_screen(&self, pointer: Point, hit_radius: f32) -> Option<HandleAnchor> {
        let nodes = self.graph.nodes();
        let outputs = screen_anchors(nodes, HandleKind::Output, &self.handles, &self.viewport);
        let inputs = screen_anchors(nodes, HandleKind::Input, &self.handles, &self.viewport);
        find_handle_at(pointer, outputs.chain(inputs), hit_radius)
    }

    /// Resolve what lies under a screen-space position, for presentation
    /// layers that only deliver coordinates.
    ///
    /// Handles win over node bodies; a node body spans the node's width and
    /// `body_height` graph units below its position.
    pub fn hit_target_at(&self, pointer: Point, hit_radius: f32, body_height: f32) -> HitTarget {
        if let Some(anchor) = self.find_handle_at_screen(pointer, hit_radius) {
            return match anchor.kind {
                HandleKind::Input => HitTarget::InputHandle(anchor.node_id),
                HandleKind::Output => HitTarget::OutputHandle(anchor.node_id),
            };
        }
        let graph = self.viewport.screen_to_graph(pointer);
        // Last drawn is on top
        self.graph
            .nodes()
            .iter()
            .rev()
            .find(|node| {
                let width = self.handles.effective_width(node);
                graph.x >= node.position.x
                    && graph.x <= node.position.x + width
                    && graph.y >= node.position.y
                    && graph.y <= node.position.y + body_height
            })
            .map(|node| HitTarget::NodeBody(node.id.clone()))
            .unwrap_or(HitTarget::Canvas)
    }
}
