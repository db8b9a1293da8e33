//! Layout tree types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::LayoutError;

/// An untyped layout document as produced by the model.
///
/// The pipeline keeps layouts in this form so that fields it does not
/// read survive refinement untouched.
pub type Layout = Map<String, Value>;

/// Typed view of one layout element.
///
/// Only the fields the design-tool conversion reads are named; anything
/// else the model produced is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primitive kind, e.g. `FRAME`, `TEXT`, `RECTANGLE`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Hex colour string such as `#F5F5F5`.
    #[serde(rename = "backgroundColor", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Rendering order follows list order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<LayoutNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutNode {
    /// Reads a typed node tree out of an untyped layout.
    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        serde_json::from_value(Value::Object(layout.clone()))
            .map_err(|e| LayoutError::InvalidLayout(e.to_string()))
    }

    /// Children in rendering order (empty if none were declared).
    pub fn children(&self) -> &[LayoutNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(LayoutNode::node_count).sum::<usize>()
    }
}
