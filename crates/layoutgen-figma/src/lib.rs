//! Figma integration for layoutgen.
//!
//! - [`DesignExporter`] — The export seam the pipeline depends on
//! - [`FigmaClient`] — Figma REST client gated on an access token
//! - [`FigmaNode`] — Figma-shaped node tree produced from a layout
//! - [`convert_layout`] / [`hex_to_rgb`] — Layout and colour conversion
//!
//! Frame creation never reaches the network: in debug mode the converted
//! tree is returned for inspection, otherwise the call reports
//! [`LayoutError::Unsupported`]. Only [`FigmaClient::get_file`] talks to
//! the Figma API.

mod client;
mod convert;

pub use client::{FigmaClient, FRAME_EXPORT_UNSUPPORTED};
pub use convert::{convert_layout, hex_to_rgb, FigmaNode, Paint, Position, Rgb, Size, Styles};

use async_trait::async_trait;
use layoutgen_core::{Layout, LayoutError};

/// Destination for finished layouts.
#[async_trait]
pub trait DesignExporter: Send + Sync {
    /// Whether export should be attempted at all.
    fn is_enabled(&self) -> bool;

    /// Creates a named frame from a layout tree.
    async fn create_frame(&self, name: &str, layout: &Layout) -> Result<FigmaNode, LayoutError>;
}
