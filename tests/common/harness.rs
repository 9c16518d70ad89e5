//! Test harness driving an [`InteractionController`] with synthetic events.
//!
//! Node ids come from a seeded generator, so a harness built twice produces
//! the same ids.

#![allow(dead_code)]

use super::init_logging;
use layer_canvas::{
    CanvasConfig, GraphStore, HitTarget, IdGenerator, InteractionController, Key, Modifiers,
    Node, NodeKind, Point, PointerButton, PointerEvent,
};

pub const SEED: u64 = 0x5eed;

/// Width reported for every node placed through [`CanvasHarness::add`].
pub const NODE_WIDTH: f32 = 200.0;

pub struct CanvasHarness {
    pub ctrl: InteractionController,
}

impl Default for CanvasHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasHarness {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        init_logging();
        let graph = GraphStore::with_id_generator(IdGenerator::seeded(SEED));
        Self {
            ctrl: InteractionController::with_graph(config, graph),
        }
    }

    /// Harness with an input layer at (100, 100) and an output layer at
    /// (400, 100).
    pub fn with_two_nodes() -> (Self, String, String) {
        let mut harness = Self::new();
        let a = harness.add(NodeKind::Input, 100.0, 100.0);
        let b = harness.add(NodeKind::Output, 400.0, 100.0);
        (harness, a, b)
    }

    /// Add a node at a graph position and report [`NODE_WIDTH`] for it.
    pub fn add(&mut self, kind: NodeKind, x: f32, y: f32) -> String {
        let id = self
            .ctrl
            .add_node(kind, Point::new(x, y))
            .expect("node should be added");
        assert!(self.ctrl.report_width(&id, NODE_WIDTH));
        id
    }

    pub fn node(&self, id: &str) -> &Node {
        self.ctrl.graph().node(id).expect("node should exist")
    }

    pub fn position(&self, id: &str) -> Point {
        self.node(id).position
    }

    // === Coordinates ===

    pub fn to_screen(&self, graph: Point) -> Point {
        self.ctrl.viewport().graph_to_screen(graph)
    }

    /// Screen-space point inside the node body, `(dx, dy)` graph units from
    /// its origin.
    pub fn body_point(&self, id: &str, dx: f32, dy: f32) -> Point {
        self.to_screen(self.position(id) + Point::new(dx, dy))
    }

    pub fn output_handle(&self, id: &str) -> Point {
        let anchor = self.ctrl.handle_geometry().output_anchor(self.node(id));
        self.to_screen(anchor)
    }

    pub fn input_handle(&self, id: &str) -> Point {
        let anchor = self.ctrl.handle_geometry().input_anchor(self.node(id));
        self.to_screen(anchor)
    }

    // === Pointer helpers ===

    pub fn press(&mut self, at: Point, target: HitTarget) {
        self.ctrl.pointer_down(PointerEvent::primary(at, target));
    }

    pub fn press_button(&mut self, at: Point, button: PointerButton, modifiers: Modifiers) {
        self.ctrl.pointer_down(
            PointerEvent::new(at, button, HitTarget::Canvas).with_modifiers(modifiers),
        );
    }

    pub fn move_to(&mut self, at: Point) {
        self.ctrl.pointer_move(at);
    }

    pub fn release(&mut self, at: Point, target: HitTarget) {
        self.ctrl.pointer_up(at, target);
    }

    /// Press on a node body and release at the same spot.
    pub fn click_node(&mut self, id: &str) {
        let at = self.body_point(id, 20.0, 20.0);
        self.press(at, HitTarget::NodeBody(id.to_string()));
        self.release(at, HitTarget::NodeBody(id.to_string()));
    }

    pub fn click_canvas(&mut self, at: Point) {
        self.press(at, HitTarget::Canvas);
        self.release(at, HitTarget::Canvas);
    }

    /// Drag a node by a screen-space delta, grabbing it 20 units inside its
    /// top-left corner.
    pub fn drag_node(&mut self, id: &str, dx: f32, dy: f32) {
        let start = self.body_point(id, 20.0, 20.0);
        let end = start + Point::new(dx, dy);
        self.press(start, HitTarget::NodeBody(id.to_string()));
        self.move_to(start + Point::new(dx / 2.0, dy / 2.0));
        self.move_to(end);
        self.release(end, HitTarget::NodeBody(id.to_string()));
    }

    /// Draw a connection from `from`'s output handle and release exactly on
    /// `to`'s input handle.
    pub fn connect(&mut self, from: &str, to: &str) {
        let start = self.output_handle(from);
        let end = self.input_handle(to);
        self.press(start, HitTarget::OutputHandle(from.to_string()));
        self.move_to(end);
        self.release(end, HitTarget::InputHandle(to.to_string()));
    }

    /// Middle-button pan by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let start = Point::new(10.0, 10.0);
        let end = start + Point::new(dx, dy);
        self.press_button(start, PointerButton::Middle, Modifiers::NONE);
        self.move_to(end);
        self.release(end, HitTarget::Canvas);
    }

    // === Keyboard helpers ===

    pub fn key(&mut self, key: Key) -> bool {
        self.ctrl.key_pressed(key, false)
    }

    pub fn key_while_typing(&mut self, key: Key) -> bool {
        self.ctrl.key_pressed(key, true)
    }
}
