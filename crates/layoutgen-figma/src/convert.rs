//! Layout tree to Figma node conversion.

use layoutgen_core::{LayoutError, LayoutNode};
use serde::{Deserialize, Serialize};

const DEFAULT_NAME: &str = "Unnamed";
const DEFAULT_TYPE: &str = "FRAME";
const DEFAULT_SIZE: f64 = 100.0;
const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// RGB colour with channels normalised to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A fill. Conversion only produces `SOLID` fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub color: Rgb,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self {
            paint_type: "SOLID".to_string(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Styles {
    pub fills: Vec<Paint>,
}

/// A node in Figma's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigmaNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub size: Size,
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FigmaNode>>,
}

/// Parses a `#RRGGBB` colour into normalised channels.
///
/// The leading `#` is optional.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, LayoutError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LayoutError::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f64, LayoutError> {
        u8::from_str_radix(&digits[range], 16)
            .map(|byte| f64::from(byte) / 255.0)
            .map_err(|_| LayoutError::InvalidColor(hex.to_string()))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Converts a layout tree into Figma nodes, children in order.
///
/// Missing fields fall back to: name `Unnamed`, type `FRAME`, position
/// (0, 0), size 100×100, background `#FFFFFF`.
pub fn convert_layout(node: &LayoutNode) -> Result<FigmaNode, LayoutError> {
    let color = hex_to_rgb(node.background_color.as_deref().unwrap_or(DEFAULT_BACKGROUND))?;

    let children = match &node.children {
        Some(children) => Some(
            children
                .iter()
                .map(convert_layout)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(FigmaNode {
        name: node.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string()),
        node_type: node.node_type.clone().unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        position: Position {
            x: node.x.unwrap_or(0.0),
            y: node.y.unwrap_or(0.0),
        },
        size: Size {
            width: node.width.unwrap_or(DEFAULT_SIZE),
            height: node.height.unwrap_or(DEFAULT_SIZE),
        },
        styles: Styles {
            fills: vec![Paint::solid(color)],
        },
        children,
    })
}
