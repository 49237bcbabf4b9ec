//! HTTP API server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::core::client::BatchClient;
use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::models::Record;
use crate::core::pipeline::TranslationPipeline;
use crate::core::source::fetch_records;
use crate::utils::backup::write_backup;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TranslationPipeline>,
}

impl AppState {
    /// Create application state around a pipeline
    pub fn new(pipeline: TranslationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, "ok" when serving
    status: String,
    /// Service name
    service: String,
    /// Crate version
    version: String,
}

/// Translation request body
#[derive(Deserialize, ToSchema)]
pub struct TranslateRequest {
    /// Dataset URL to fetch records from
    pub url: Option<String>,
}

/// Query-string fallback for the dataset URL
#[derive(Deserialize)]
pub struct TranslateQuery {
    url: Option<String>,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(health_check, translate),
    components(schemas(HealthResponse, TranslateRequest, ErrorResponse, Record))
)]
pub struct ApiDoc;

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error(e: TranslationError) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Translation request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Health check handler
#[utoipa::path(get, path = "/", responses((status = 200, body = HealthResponse)))]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translate a remote dataset and return the translated records
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, body = Vec<Record>),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
async fn translate(
    State(state): State<AppState>,
    Query(query): Query<TranslateQuery>,
    payload: Option<Json<TranslateRequest>>,
) -> Result<Json<Vec<Record>>, (StatusCode, Json<ErrorResponse>)> {
    let url = payload
        .and_then(|Json(body)| body.url)
        .or(query.url)
        .ok_or_else(|| bad_request("Missing dataset url"))?;

    let records = fetch_records(&url).await.map_err(internal_error)?;
    let translated = state
        .pipeline
        .translate(records)
        .await
        .map_err(internal_error)?;

    write_backup(&state.pipeline.config().backup_dir, &translated)
        .await
        .map_err(internal_error)?;

    Ok(Json(translated))
}

/// Serve the generated OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}

/// Run the HTTP server with configuration from the environment
pub async fn run_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = TranslatorConfig::load()?;
    run_server_with_config(host, port, config).await
}

/// Run the HTTP server with an explicit configuration
pub async fn run_server_with_config(
    host: String,
    port: u16,
    config: TranslatorConfig,
) -> anyhow::Result<()> {
    let client = BatchClient::new(config)?;
    let state = AppState::new(TranslationPipeline::new(client));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post as axum_post;
    use serde_json::json;

    async fn spawn_router(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn test_state(api_endpoint: String, backup_dir: std::path::PathBuf) -> AppState {
        let config = TranslatorConfig {
            api_endpoint,
            backup_dir,
            ..Default::default()
        };
        AppState::new(TranslationPipeline::new(BatchClient::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            "http://127.0.0.1:9/translate/batch".to_string(),
            dir.path().to_path_buf(),
        );
        let addr = spawn_router(build_router(state)).await;

        let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_translate_requires_a_url() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            "http://127.0.0.1:9/translate/batch".to_string(),
            dir.path().to_path_buf(),
        );
        let addr = spawn_router(build_router(state)).await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/translate", addr))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_translate_end_to_end() {
        // Upstream stub: serves the dataset and echoes translations back
        let upstream = Router::new()
            .route(
                "/dataset",
                get(|| async {
                    Json(json!([
                        { "title": "Hello", "content": "<div><p>Hi</p></div>" }
                    ]))
                }),
            )
            .route(
                "/translate/batch",
                axum_post(|Json(payload): Json<serde_json::Value>| async move {
                    Json(json!({ "translated_texts": payload["texts"] }))
                }),
            );
        let upstream_addr = spawn_router(upstream).await;

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            format!("http://{}/translate/batch", upstream_addr),
            dir.path().to_path_buf(),
        );
        let addr = spawn_router(build_router(state)).await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/translate", addr))
            .json(&json!({ "url": format!("http://{}/dataset", upstream_addr) }))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let records: Vec<Record> = response.json().await.unwrap();
        assert_eq!(records[0].title, "Hello");
        assert_eq!(records[0].content.as_deref(), Some("<DIV><p>Hi</p></DIV>"));

        // A backup artifact is written next to the rolling latest copy
        assert!(dir.path().join(crate::utils::backup::LATEST_BACKUP_NAME).exists());
    }
}
