use crate::kind::NodeKind;
use thiserror::Error;

/// Reasons a canvas operation was refused.
///
/// Every variant means the operation left the graph and viewport untouched.
/// The interaction controller logs these and carries on; only direct users
/// of [`GraphStore`](crate::GraphStore) ever see them.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The tag does not name any node kind
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),
    /// The kind exists but drops of it are disabled
    #[error("{} is not available yet", .0.display_name())]
    KindUnavailable(NodeKind),
    /// No live node has this id
    #[error("node `{0}` not found")]
    NodeNotFound(String),
    /// A rename target was empty after trimming
    #[error("node id must not be empty")]
    EmptyId,
    /// A rename target is already used by another node
    #[error("node id `{0}` is already in use")]
    DuplicateId(String),
    /// A coordinate or width was NaN, infinite or negative where not allowed
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Attempted connection from a node to itself
    #[error("cannot connect node `{0}` to itself")]
    SelfLoop(String),
    /// A drop payload could not be parsed
    #[error("malformed drop payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    /// A configuration document could not be parsed
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
