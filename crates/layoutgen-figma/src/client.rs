//! Figma REST client.

use async_trait::async_trait;
use layoutgen_config::{FigmaSettings, Settings};
use layoutgen_core::{Layout, LayoutError, LayoutNode};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::convert::{convert_layout, FigmaNode};
use crate::DesignExporter;

/// Reported when frame creation is requested outside debug mode.
pub const FRAME_EXPORT_UNSUPPORTED: &str =
    "Full Figma integration requires a plugin implementation";

/// Client for the Figma REST API.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct FigmaClient {
    client: Client,
    access_token: Option<String>,
    file_key: Option<String>,
    api_base: String,
    debug: bool,
}

impl FigmaClient {
    /// Creates a client from Figma settings and the process debug flag.
    pub fn new(settings: &FigmaSettings, debug: bool) -> Self {
        Self {
            client: Client::new(),
            access_token: settings.access_token.clone(),
            file_key: settings.file_key.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            debug,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.figma, settings.debug)
    }

    /// True only when an access token is configured.
    pub fn is_enabled(&self) -> bool {
        self.access_token.is_some()
    }

    fn token(&self) -> Result<&str, LayoutError> {
        self.access_token.as_deref().ok_or(LayoutError::ExportDisabled)
    }

    fn file_key(&self) -> Result<&str, LayoutError> {
        self.file_key
            .as_deref()
            .ok_or_else(|| LayoutError::DesignTool("FIGMA_FILE_KEY is not set".into()))
    }

    fn file_url(&self) -> Result<String, LayoutError> {
        Ok(format!("{}/files/{}", self.api_base, self.file_key()?))
    }

    /// Fetches the configured Figma file document.
    pub async fn get_file(&self) -> Result<Value, LayoutError> {
        let token = self.token()?;
        let url = self.file_url()?;

        let response = self
            .client
            .get(&url)
            .header("X-Figma-Token", token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| LayoutError::DesignTool(e.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            debug!("Figma response body: {}", body);
            return Err(LayoutError::DesignTool(format!(
                "Error accessing Figma file: {}",
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LayoutError::DesignTool(e.to_string()))
    }

    /// Converts a layout into a Figma frame.
    ///
    /// Disabled: [`LayoutError::ExportDisabled`]. Debug mode: the converted
    /// tree. Otherwise: [`LayoutError::Unsupported`]. No request is sent in
    /// any case.
    pub fn create_frame(&self, name: &str, layout: &Layout) -> Result<FigmaNode, LayoutError> {
        self.token()?;

        let tree = LayoutNode::from_layout(layout)?;
        let nodes = convert_layout(&tree)?;

        if !self.debug {
            return Err(LayoutError::Unsupported(FRAME_EXPORT_UNSUPPORTED));
        }

        let target = format!("{}/nodes", self.file_url().unwrap_or_else(|_| self.api_base.clone()));
        info!(
            "Would create Figma frame '{}' ({} nodes) at {} with data: {}",
            name,
            tree.node_count(),
            target,
            serde_json::to_string_pretty(&nodes).unwrap_or_default()
        );
        Ok(nodes)
    }
}

#[async_trait]
impl DesignExporter for FigmaClient {
    fn is_enabled(&self) -> bool {
        FigmaClient::is_enabled(self)
    }

    async fn create_frame(&self, name: &str, layout: &Layout) -> Result<FigmaNode, LayoutError> {
        FigmaClient::create_frame(self, name, layout)
    }
}
