//! Node and connection storage.
//!
//! [`GraphStore`] owns every [`Node`] and [`Connection`] on the canvas and is
//! the only place they are mutated. It guarantees:
//!
//! - node ids are unique among live nodes;
//! - every connection references two live, distinct nodes;
//! - at most one connection exists per ordered `(from, to)` pair.
//!
//! Mutators return `Err` instead of mutating when an operation would break
//! one of these; an `Err` always means nothing changed.

use crate::error::{CanvasError, Result};
use crate::geometry::Point;
use crate::ids::{is_valid_id, IdGenerator};
use crate::kind::NodeKind;
use crate::params::{coerce_raw, ParamValue, Parameters};
use serde::{Deserialize, Serialize};

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub parameters: Parameters,
    /// Graph-space top-left corner
    pub position: Point,
    /// Rendered width in graph-space units, once the presentation reported it
    pub measured_width: Option<f32>,
}

/// A directed edge from the output handle of `from` to the input handle of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

/// What [`GraphStore::toggle_connection`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionToggle {
    Added,
    Removed,
}

#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    ids: IdGenerator,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::new())
    }

    /// Store drawing node ids from `ids`; pass a seeded generator for
    /// reproducible ids.
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            ids,
        }
    }

    // === Queries ===

    /// Nodes in insertion order (also the paint order).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn has_connection(&self, from: &str, to: &str) -> bool {
        self.connections.iter().any(|c| c.from == from && c.to == to)
    }

    /// Connections with `node_id` at either end.
    pub fn connections_touching<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.touches(node_id))
    }

    /// Whether `new_id` could be given to the node called `excluding`.
    pub fn is_valid_id(&self, new_id: &str, excluding: &str) -> bool {
        is_valid_id(new_id, excluding, self.node_ids())
    }

    // === Mutations ===

    /// Place a new node of `kind` at a graph-space position.
    ///
    /// The node gets a fresh unique id and the kind's default parameters.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Result<&Node> {
        if !position.is_finite() {
            return Err(CanvasError::InvalidGeometry(format!(
                "node position {:?}",
                position
            )));
        }
        let nodes = &self.nodes;
        let id = self
            .ids
            .generate_unique(|candidate| nodes.iter().any(|n| n.id == candidate));
        log::info!("adding {} node {} at ({}, {})", kind, id, position.x, position.y);
        self.nodes.push(Node {
            id,
            kind,
            parameters: kind.default_parameters(),
            position,
            measured_width: None,
        });
        let index = self.nodes.len() - 1;
        Ok(&self.nodes[index])
    }

    /// Like [`add_node`](Self::add_node) with the kind given as a tag.
    pub fn add_node_by_tag(&mut self, tag: &str, position: Point) -> Result<&Node> {
        let kind: NodeKind = tag.parse()?;
        self.add_node(kind, position)
    }

    /// Remove a node and every connection touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))?;
        let node = self.nodes.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        log::info!(
            "removed node {} and {} connection(s)",
            id,
            before - self.connections.len()
        );
        Ok(node)
    }

    /// Rename a node, rewriting every connection endpoint that referenced it.
    ///
    /// `new_id` is trimmed. Returns the id actually stored.
    pub fn rename_node(&mut self, old_id: &str, new_id: &str) -> Result<String> {
        let new_id = new_id.trim();
        if new_id.is_empty() {
            return Err(CanvasError::EmptyId);
        }
        if !self.contains(old_id) {
            return Err(CanvasError::NodeNotFound(old_id.to_string()));
        }
        if !self.is_valid_id(new_id, old_id) {
            return Err(CanvasError::DuplicateId(new_id.to_string()));
        }
        if new_id == old_id {
            return Ok(new_id.to_string());
        }

        self.node_mut(old_id)?.id = new_id.to_string();
        for connection in &mut self.connections {
            if connection.from == old_id {
                connection.from = new_id.to_string();
            }
            if connection.to == old_id {
                connection.to = new_id.to_string();
            }
        }
        log::info!("renamed node {} to {}", old_id, new_id);
        Ok(new_id.to_string())
    }

    /// Store a raw edit for parameter `key`, coerced by the rules in
    /// [`crate::params`].
    pub fn update_parameter(&mut self, id: &str, key: &str, raw: &str) -> Result<&ParamValue> {
        let node = self.node_mut(id)?;
        let value = coerce_raw(key, raw, node.parameters.get(key));
        log::debug!("node {} parameter {} = {:?}", id, key, value);
        node.parameters.insert(key.to_string(), value);
        Ok(&node.parameters[key])
    }

    /// Store an already-typed parameter value.
    pub fn set_parameter(&mut self, id: &str, key: &str, value: ParamValue) -> Result<()> {
        self.node_mut(id)?.parameters.insert(key.to_string(), value);
        Ok(())
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> Result<()> {
        if !position.is_finite() {
            return Err(CanvasError::InvalidGeometry(format!(
                "node position {:?}",
                position
            )));
        }
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Record the rendered width of a node, in graph-space units.
    pub fn set_width(&mut self, id: &str, width: f32) -> Result<()> {
        if !(width.is_finite() && width >= 0.0) {
            return Err(CanvasError::InvalidGeometry(format!("node width {}", width)));
        }
        let node = self.node_mut(id)?;
        if node.measured_width != Some(width) {
            node.measured_width = Some(width);
        }
        Ok(())
    }

    /// Add the edge `from → to` if absent, remove it if present.
    pub fn toggle_connection(&mut self, from: &str, to: &str) -> Result<ConnectionToggle> {
        if from == to {
            return Err(CanvasError::SelfLoop(from.to_string()));
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(CanvasError::NodeNotFound(id.to_string()));
            }
        }

        if let Some(index) = self
            .connections
            .iter()
            .position(|c| c.from == from && c.to == to)
        {
            self.connections.remove(index);
            log::info!("disconnected {} -> {}", from, to);
            Ok(ConnectionToggle::Removed)
        } else {
            self.connections.push(Connection::new(from, to));
            log::info!("connected {} -> {}", from, to);
            Ok(ConnectionToggle::Added)
        }
    }

    /// Remove every node and connection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }
}
