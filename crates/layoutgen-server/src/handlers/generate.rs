//! Layout generation handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::dto::{GenerateRequest, GenerateResponse};
use crate::error::AppError;
use crate::ServerState;

/// Runs the pipeline for one prompt.
///
/// Stage faults come back inside the response body. Only a fault outside
/// the stages, such as a panic in the pipeline task, becomes a 500.
pub async fn generate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    info!(
        "Generate request: {}...",
        req.prompt.get(..50).unwrap_or(&req.prompt)
    );
    if let Some(options) = &req.options {
        info!("Request options: {}", serde_json::Value::Object(options.clone()));
    }

    let summary = tokio::spawn(async move { state.engine.generate(&req.prompt).await })
        .await
        .map_err(|e| {
            error!("Pipeline task failed: {}", e);
            AppError::Generation(e.to_string())
        })?;

    Ok(Json(GenerateResponse::from(summary)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use layoutgen_core::{Layout, LayoutError, Status};
    use layoutgen_engine::PipelineEngine;
    use layoutgen_figma::{DesignExporter, FigmaNode};
    use layoutgen_llm::{LlmResponse, TextGenerator};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{router, ServerState};

    /// Answers every stage with the same object.
    struct EchoLayout;

    #[async_trait]
    impl TextGenerator for EchoLayout {
        async fn complete(&self, _system_prompt: &str, _user_input: &str) -> Result<LlmResponse, LayoutError> {
            Ok(LlmResponse::text(r#"{"name": "Login", "type": "FRAME", "width": 400, "height": 300}"#))
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct Exploding;

    #[async_trait]
    impl TextGenerator for Exploding {
        async fn complete(&self, _system_prompt: &str, _user_input: &str) -> Result<LlmResponse, LayoutError> {
            panic!("model backend exploded");
        }

        fn model(&self) -> &str {
            "exploding"
        }
    }

    struct Disabled;

    #[async_trait]
    impl DesignExporter for Disabled {
        fn is_enabled(&self) -> bool {
            false
        }

        async fn create_frame(&self, _name: &str, _layout: &Layout) -> Result<FigmaNode, LayoutError> {
            Err(LayoutError::ExportDisabled)
        }
    }

    fn app(llm: Arc<dyn TextGenerator>) -> axum::Router {
        let engine = PipelineEngine::new(llm, Arc::new(Disabled));
        router(Arc::new(ServerState::new(engine)))
    }

    async fn post_json(app: axum::Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_generate_returns_layout() {
        let (status, body) = post_json(
            app(Arc::new(EchoLayout)),
            json!({ "prompt": "a simple login form", "options": { "theme": "dark" } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], Status::Completed.as_str());
        assert_eq!(body["layout"]["name"], "Login");
        assert_eq!(body["errors"], json!([]));
        assert_eq!(body["figma_url"], Value::Null);
    }

    #[tokio::test]
    async fn test_generate_panic_becomes_500() {
        let (status, body) = post_json(app(Arc::new(Exploding)), json!({ "prompt": "anything" })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error generating UI layout: "));
    }

    #[tokio::test]
    async fn test_generate_requires_prompt() {
        let (status, _) = post_json(app(Arc::new(EchoLayout)), json!({ "options": {} })).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Arc::new(EchoLayout)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
