//! Slint wiring for the canvas controller.
//!
//! [`CanvasTracker`] shares one [`InteractionController`] between Slint
//! callbacks and hands out closures whose signatures match what generated
//! Slint components expect (`SharedString` ids, `f32` coordinates).
//!
//! # Example
//!
//! ```ignore
//! use layer_canvas::{CanvasTracker, InteractionController};
//!
//! let tracker = CanvasTracker::new(InteractionController::new());
//!
//! window.on_layer_dropped(tracker.drop_callback());
//! window.on_node_width_changed(tracker.node_width_callback());
//! window.on_node_renamed(tracker.rename_callback());
//! window.on_parameter_edited(tracker.parameter_edited_callback());
//! window.on_wheel(tracker.wheel_callback());
//! window.on_key_pressed(tracker.key_pressed_callback());
//!
//! // After each event, mirror the graph into the models the UI renders
//! tracker.sync_nodes(&nodes_model);
//! tracker.sync_connections(&connections_model);
//! tracker.sync_selection(&selection_model);
//! ```

use crate::controller::{HitTarget, InteractionController, Key, Modifiers, PointerButton, PointerEvent};
use crate::geometry::Point;
use crate::graph::{Connection, Node};
use slint::platform::PointerEventButton;
use slint::{Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

impl From<PointerEventButton> for PointerButton {
    fn from(button: PointerEventButton) -> Self {
        match button {
            PointerEventButton::Left => PointerButton::Primary,
            PointerEventButton::Middle => PointerButton::Middle,
            PointerEventButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Map the text of a Slint key event to a canvas key.
pub fn key_from_text(text: &str) -> Key {
    let is = |key: slint::platform::Key| SharedString::from(key).as_str() == text;
    if is(slint::platform::Key::Delete) {
        Key::Delete
    } else if is(slint::platform::Key::Backspace) {
        Key::Backspace
    } else if is(slint::platform::Key::Escape) {
        Key::Escape
    } else {
        Key::Other
    }
}

/// A row of the node model rendered by the UI.
pub trait NodeRow: Clone + 'static {
    fn id(&self) -> SharedString;
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
    /// Build a row for a node the model does not have yet.
    fn from_node(node: &Node) -> Self;
}

/// A row of the connection model rendered by the UI.
pub trait ConnectionRow: Clone + 'static {
    fn from_id(&self) -> SharedString;
    fn to_id(&self) -> SharedString;
    fn from_connection(connection: &Connection) -> Self;
}

/// Shares an [`InteractionController`] between Slint callbacks.
///
/// Clone this tracker to move it into several callbacks; all clones drive
/// the same controller.
#[derive(Clone)]
pub struct CanvasTracker {
    controller: Rc<RefCell<InteractionController>>,
}

impl Default for CanvasTracker {
    fn default() -> Self {
        Self::new(InteractionController::new())
    }
}

impl CanvasTracker {
    pub fn new(controller: InteractionController) -> Self {
        Self::with_controller(Rc::new(RefCell::new(controller)))
    }

    pub fn with_controller(controller: Rc<RefCell<InteractionController>>) -> Self {
        Self { controller }
    }

    /// Get a clone of the shared controller reference.
    pub fn controller(&self) -> Rc<RefCell<InteractionController>> {
        self.controller.clone()
    }

    // === Callback factories ===

    /// Callback for a node reporting its rendered (screen) width:
    /// `(node_id, width)`.
    pub fn node_width_callback(&self) -> impl Fn(SharedString, f32) + Clone {
        let controller = self.controller.clone();
        move |node_id, width| {
            controller
                .borrow_mut()
                .report_screen_width(node_id.as_str(), width);
        }
    }

    /// Callback for an inline rename: `(old_id, new_id) -> accepted`.
    pub fn rename_callback(&self) -> impl Fn(SharedString, SharedString) -> bool + Clone {
        let controller = self.controller.clone();
        move |old_id, new_id| {
            controller
                .borrow_mut()
                .rename_node(old_id.as_str(), new_id.as_str())
        }
    }

    /// Callback for a parameter edit: `(node_id, key, raw_value)`.
    pub fn parameter_edited_callback(&self) -> impl Fn(SharedString, SharedString, SharedString) + Clone {
        let controller = self.controller.clone();
        move |node_id, key, raw| {
            controller
                .borrow_mut()
                .update_parameter(node_id.as_str(), key.as_str(), raw.as_str());
        }
    }

    /// Callback for a library drop: `(payload, x, y) -> new_id`.
    ///
    /// Returns an empty string when the drop was refused.
    pub fn drop_callback(&self) -> impl Fn(SharedString, f32, f32) -> SharedString + Clone {
        let controller = self.controller.clone();
        move |payload, x, y| {
            controller
                .borrow_mut()
                .handle_drop(payload.as_str(), Point::new(x, y))
                .map(SharedString::from)
                .unwrap_or_default()
        }
    }

    /// Callback for wheel events: `(x, y, delta_y)`.
    pub fn wheel_callback(&self) -> impl Fn(f32, f32, f32) + Clone {
        let controller = self.controller.clone();
        move |x, y, delta_y| {
            controller.borrow_mut().wheel(Point::new(x, y), delta_y);
        }
    }

    /// Callback for key presses: `(text, text_input_focused) -> handled`.
    pub fn key_pressed_callback(&self) -> impl Fn(SharedString, bool) -> bool + Clone {
        let controller = self.controller.clone();
        move |text, text_input_focused| {
            controller
                .borrow_mut()
                .key_pressed(key_from_text(text.as_str()), text_input_focused)
        }
    }

    // === Pointer handlers ===
    //
    // For UIs that deliver bare coordinates. The target under the pointer is
    // resolved from the graph with the given handle radius and body height.

    pub fn pointer_pressed(
        &self,
        x: f32,
        y: f32,
        button: PointerEventButton,
        ctrl: bool,
        hit_radius: f32,
        body_height: f32,
    ) {
        let position = Point::new(x, y);
        let mut controller = self.controller.borrow_mut();
        let target = controller.hit_target_at(position, hit_radius, body_height);
        let modifiers = Modifiers {
            ctrl,
            ..Modifiers::NONE
        };
        controller.pointer_down(
            PointerEvent::new(position, button.into(), target).with_modifiers(modifiers),
        );
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.controller.borrow_mut().pointer_move(Point::new(x, y));
    }

    pub fn pointer_released(&self, x: f32, y: f32, hit_radius: f32, body_height: f32) {
        let position = Point::new(x, y);
        let mut controller = self.controller.borrow_mut();
        let target = controller.hit_target_at(position, hit_radius, body_height);
        controller.pointer_up(position, target);
    }

    /// Release with an explicit target, for UIs with per-element events.
    pub fn pointer_released_on(&self, x: f32, y: f32, target: HitTarget) {
        self.controller
            .borrow_mut()
            .pointer_up(Point::new(x, y), target);
    }

    // === Model sync ===

    /// Mirror node positions into `model`.
    ///
    /// Rows of removed nodes are dropped, new nodes are appended and only
    /// rows whose position changed are written back.
    pub fn sync_nodes<R: NodeRow>(&self, model: &VecModel<R>) {
        let controller = self.controller.borrow();
        let graph = controller.graph();

        let mut row = 0;
        while row < model.row_count() {
            let Some(mut data) = model.row_data(row) else {
                break;
            };
            match graph.node(data.id().as_str()) {
                Some(node) => {
                    if data.x() != node.position.x || data.y() != node.position.y {
                        data.set_x(node.position.x);
                        data.set_y(node.position.y);
                        model.set_row_data(row, data);
                    }
                    row += 1;
                }
                None => {
                    model.remove(row);
                }
            }
        }

        for node in graph.nodes() {
            let present = model.iter().any(|data| data.id().as_str() == node.id.as_str());
            if !present {
                model.push(R::from_node(node));
            }
        }
    }

    /// Mirror the connection set into `model`, rebuilding it if it differs.
    pub fn sync_connections<R: ConnectionRow>(&self, model: &VecModel<R>) {
        let controller = self.controller.borrow();
        let connections = controller.graph().connections();

        let in_sync = model.row_count() == connections.len()
            && model.iter().zip(connections).all(|(data, connection)| {
                data.from_id().as_str() == connection.from.as_str()
                    && data.to_id().as_str() == connection.to.as_str()
            });
        if in_sync {
            return;
        }
        model.set_vec(connections.iter().map(R::from_connection).collect::<Vec<_>>());
    }

    pub fn sync_selection(&self, model: &VecModel<SharedString>) {
        self.controller.borrow().selection().sync_to_model(model);
    }
}
