//! Snapshot of the graph handed to the model-export collaborator.
//!
//! The snapshot carries ids, kinds, parameters, positions and edge pairs,
//! and nothing from the interaction state. It serializes to
//!
//! ```json
//! {
//!   "nodes": [{ "id": "...", "kind": "InputLayer", "parameters": {...}, "position": {"x": 0, "y": 0} }],
//!   "connections": [{ "from": "...", "to": "..." }]
//! }
//! ```

use crate::geometry::Point;
use crate::graph::{Connection, GraphStore, Node};
use crate::kind::NodeKind;
use crate::params::Parameters;
use serde::{Deserialize, Serialize};

/// Exported form of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNode {
    pub id: String,
    pub kind: NodeKind,
    pub parameters: Parameters,
    pub position: Point,
}

impl From<&Node> for ExportedNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            parameters: node.parameters.clone(),
            position: node.position,
        }
    }
}

/// Tool information attached to exported documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub tool: String,
    pub version: String,
}

impl Default for ExportMetadata {
    fn default() -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportedNode>,
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,
}

impl GraphExport {
    pub fn with_metadata(mut self) -> Self {
        self.metadata = Some(ExportMetadata::default());
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GraphStore {
    /// Snapshot of the current graph for the export collaborator.
    pub fn export(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes().iter().map(ExportedNode::from).collect(),
            connections: self.connections().to_vec(),
            metadata: None,
        }
    }
}
