//! The closed set of node kinds and their default parameters.

use crate::error::CanvasError;
use crate::params::{ParamValue, Parameters};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag identifying what a node represents.
///
/// The canvas treats the kind as opaque apart from seeding a new node's
/// parameters. Serialized with the long tag (`"InputLayer"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "InputLayer")]
    Input,
    #[serde(rename = "OutputLayer")]
    Output,
    #[serde(rename = "LinearLayer")]
    Linear,
    #[serde(rename = "Conv2DLayer")]
    Conv2d,
    #[serde(rename = "MaxPoolLayer")]
    MaxPool,
    #[serde(rename = "FlattenLayer")]
    Flatten,
    #[serde(rename = "ConcatLayer")]
    Concat,
}

impl NodeKind {
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Input,
        NodeKind::Conv2d,
        NodeKind::MaxPool,
        NodeKind::Flatten,
        NodeKind::Linear,
        NodeKind::Output,
        NodeKind::Concat,
    ];

    /// Long tag used in drop payloads and exports.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Input => "InputLayer",
            NodeKind::Output => "OutputLayer",
            NodeKind::Linear => "LinearLayer",
            NodeKind::Conv2d => "Conv2DLayer",
            NodeKind::MaxPool => "MaxPoolLayer",
            NodeKind::Flatten => "FlattenLayer",
            NodeKind::Concat => "ConcatLayer",
        }
    }

    /// Short lowercase name.
    pub fn short_name(self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Linear => "linear",
            NodeKind::Conv2d => "conv2d",
            NodeKind::MaxPool => "max-pool",
            NodeKind::Flatten => "flatten",
            NodeKind::Concat => "concat",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Input => "Input Layer",
            NodeKind::Output => "Output Layer",
            NodeKind::Linear => "Linear Layer",
            NodeKind::Conv2d => "Conv2D Layer",
            NodeKind::MaxPool => "MaxPool Layer",
            NodeKind::Flatten => "Flatten Layer",
            NodeKind::Concat => "Concat Layer",
        }
    }

    /// Parameters a freshly dropped node of this kind starts with.
    pub fn default_parameters(self) -> Parameters {
        let entries: Vec<(&str, ParamValue)> = match self {
            NodeKind::Input => vec![("inputShape", ParamValue::Sequence(vec![16.0]))],
            NodeKind::Conv2d => vec![
                ("filterSize", ParamValue::Number(3.0)),
                ("numFilters", ParamValue::Number(32.0)),
                ("activationFunction", "relu".into()),
            ],
            NodeKind::Output => vec![
                ("outputShape", ParamValue::Sequence(vec![10.0])),
                ("activationFunction", "softmax".into()),
            ],
            NodeKind::Concat => vec![("layers", ParamValue::Sequence(Vec::new()))],
            NodeKind::Linear => vec![
                ("outputSize", ParamValue::Number(64.0)),
                ("bias", ParamValue::Flag(true)),
                ("activation", "relu".into()),
            ],
            NodeKind::Flatten => vec![
                ("startDim", ParamValue::Number(1.0)),
                ("endDim", ParamValue::Number(-1.0)),
            ],
            NodeKind::MaxPool => vec![
                ("poolSize", ParamValue::Number(2.0)),
                ("stride", ParamValue::Number(2.0)),
                ("padding", "valid".into()),
            ],
        };
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeKind {
    type Err = CanvasError;

    /// Accepts either the long tag or the short name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s || kind.short_name() == s)
            .ok_or_else(|| CanvasError::UnknownKind(s.to_string()))
    }
}
