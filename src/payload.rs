//! Parsing of drag-and-drop payloads from the layer library.
//!
//! The library serializes a JSON object such as
//! `{"type": "LinearLayer", "id": "x7Gk2pQa"}` into the drag data. Only the
//! kind tag matters to the canvas; the library's throwaway id and any other
//! fields are ignored.

use crate::error::Result;
use crate::kind::NodeKind;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DropPayload {
    /// Kind tag, long or short form
    #[serde(rename = "type", alias = "kind")]
    pub kind_tag: String,
}

impl DropPayload {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn kind(&self) -> Result<NodeKind> {
        self.kind_tag.parse()
    }
}
