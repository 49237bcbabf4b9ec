//! Source record provider: where the translatable records come from

use std::path::Path;
use tracing::info;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Record;

/// Fetch the record list from a remote dataset URL
pub async fn fetch_records(url: &str) -> Result<Vec<Record>> {
    info!("Fetching records from: {}", url);

    let response = reqwest::get(url)
        .await
        .map_err(|e| TranslationError::Fetch {
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TranslationError::Fetch {
            message: format!("HTTP {}", status.as_u16()),
        });
    }

    let records: Vec<Record> = response
        .json()
        .await
        .map_err(|e| TranslationError::Fetch {
            message: format!("undecodable record list: {}", e),
        })?;

    info!("Fetched {} records", records.len());
    Ok(records)
}

/// Read the record list from a local JSON file
pub async fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TranslationError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let records: Vec<Record> = serde_json::from_str(&content)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;

    async fn spawn_server(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_fetch_records_decodes_record_list() {
        let addr = spawn_server(Router::new().route(
            "/dataset",
            get(|| async {
                Json(json!([
                    { "title": "One", "content": "<div>x</div>" },
                    { "title": "Two" }
                ]))
            }),
        ))
        .await;

        let records = fetch_records(&format!("http://{}/dataset", addr))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "One");
        assert!(records[1].content.is_none());
    }

    #[tokio::test]
    async fn test_fetch_records_fails_on_error_status() {
        let addr = spawn_server(Router::new().route(
            "/dataset",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        ))
        .await;

        let result = fetch_records(&format!("http://{}/dataset", addr)).await;

        assert!(matches!(result, Err(TranslationError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_read_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"title": "Local", "content": "<div>x</div>"}]"#).unwrap();

        let records = read_records(&path).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Local");
    }

    #[tokio::test]
    async fn test_read_records_missing_file_is_a_file_error() {
        let result = read_records(Path::new("/nonexistent/records.json")).await;
        assert!(matches!(result, Err(TranslationError::File { .. })));
    }
}
