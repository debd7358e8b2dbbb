//! HTTP server for the refund audit log.
//!
//! # API Endpoints
//!
//! | Method | Path                   | Description                              |
//! |--------|------------------------|------------------------------------------|
//! | GET    | `/health`              | Health check                             |
//! | POST   | `/upload`              | Upload a report, replace the item set    |
//! | GET    | `/items`               | Current item set                         |
//! | POST   | `/update-data`         | Replace the item set with edited rows    |
//! | POST   | `/export`              | Export to Excel or Google Sheets         |
//! | GET    | `/export-history`      | Completed exports, newest first          |
//! | GET    | `/download/{filename}` | Download an exported workbook            |
//! | GET    | `/api/logs`            | SSE stream for real-time logs            |

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, DefaultBodyLimit, FromRequest, Multipart, Path, Request, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Form, Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::logs::{log_error, log_info, log_success, log_warning, LOG_BROADCASTER};
use super::state::AppState;
use super::types::{is_safe_filename, ApiResponse, ExportForm, ExportResponse};
use crate::config::ServerConfig;
use crate::error::{ExportError, ExtractError, ServerError, ServerResult};
use crate::extract::{extract_document, Strategy};
use crate::models::{ExportRecord, ExportType, LineItem};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

type ApiError = (StatusCode, Json<ApiResponse>);

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let static_dir = config.static_dir.clone();
    let state = AppState::new(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Refund audit log server running on http://localhost:{}", port);
    println!("   POST /upload               - Upload a .txt or .pdf report");
    println!("   GET  /items                - Current items");
    println!("   POST /update-data          - Save edited items");
    println!("   POST /export               - Export (excel | google)");
    println!("   GET  /export-history       - Past exports");
    println!("   GET  /download/{{filename}}  - Download a workbook");
    println!("   GET  /api/logs             - SSE log stream");
    println!("   GET  /health               - Health check");
    println!();
    println!("📁 Exports: {}", state.exporter.export_dir().display());
    if let Some(dir) = &static_dir {
        println!("🌐 Frontend: {}", dir.display());
    }
    if state.config.google_token.is_none() {
        println!("⚠️  GOOGLE_ACCESS_TOKEN not set, Google Sheets export disabled");
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes, CORS and upload limit over the given state.
pub fn build_router(state: AppState) -> Router {
    // Permissive CORS so the trunk dev server can call the API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let max_upload = state.config.max_upload_bytes;
    let static_dir = state.config.static_dir.clone();

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/items", get(list_items))
        .route("/update-data", post(update_data))
        .route("/export", post(export_data))
        .route("/export-history", get(export_history))
        .route("/download/{filename}", get(download))
        .route("/api/logs", get(sse_logs));

    router = match static_dir {
        Some(dir) => {
            // Unknown paths fall back to index.html for client-side routes
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.route("/", get(health)),
    };

    router
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Errors
// =============================================================================

fn status_of(err: &ServerError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn api_error(err: ServerError) -> ApiError {
    log_error(err.to_string());
    (status_of(&err), Json(ApiResponse::failure(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "auditlog",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /upload",
            "items": "GET /items",
            "update": "POST /update-data",
            "export": "POST /export",
            "history": "GET /export-history",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip what they missed
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload endpoint: multipart with one `file` field
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<ApiResponse>, ApiError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        log_error(format!("Multipart error: {}", e));
        (e.status(), Json(ApiResponse::failure(e.body_text())))
    })? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                log_error(format!("Read error: {}", e));
                (e.status(), Json(ApiResponse::failure(e.body_text())))
            })?;
            upload = Some((file_name, bytes));
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| api_error(ExtractError::NoFile.into()))?;
    let count = process_upload(&state, &file_name, bytes.to_vec()).await.map_err(api_error)?;

    Ok(Json(ApiResponse::ok(
        format!("Extracted {} items from {}", count, file_name),
        count,
    )))
}

/// Extract the document and replace the item set with its items.
///
/// A failed extraction leaves the current items untouched.
pub async fn process_upload(state: &AppState, file_name: &str, bytes: Vec<u8>) -> ServerResult<usize> {
    log_info(format!("Processing upload {} ({} bytes)", file_name, bytes.len()));

    let name = file_name.to_string();
    let extraction = tokio::task::spawn_blocking(move || extract_document(&name, &bytes))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    if let Some(encoding) = &extraction.encoding {
        log_info(format!("Decoded text as {}", encoding));
    }
    let parser = match extraction.strategy {
        Strategy::As400 => "AS400 report",
        Strategy::LineScan => "line scan",
    };
    log_success(format!("Extracted {} items ({})", extraction.items.len(), parser));

    Ok(state.replace_items(extraction.items).await)
}

/// Current item set
async fn list_items(State(state): State<AppState>) -> Json<Vec<LineItem>> {
    Json(state.items().await)
}

/// Full replace of the item set with the edited rows
async fn update_data(
    State(state): State<AppState>,
    payload: Result<Json<Vec<LineItem>>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(items) = payload.map_err(|e| {
        log_error(format!("Rejected update: {}", e.body_text()));
        (e.status(), Json(ApiResponse::failure(format!("Error: {}", e.body_text()))))
    })?;

    let count = state.replace_items(items).await;
    log_success(format!("Saved {} items", count));

    Ok(Json(ApiResponse::ok("Data updated successfully", count)))
}

/// Export endpoint: form-encoded or multipart `export_type`
async fn export_data(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ExportResponse>, (StatusCode, Json<ExportResponse>)> {
    let into_response = |err: ServerError| {
        log_error(err.to_string());
        (status_of(&err), Json(ExportResponse::failure(err.to_string())))
    };

    let export_type = read_export_type(request).await.map_err(into_response)?;
    let record = run_export(&state, &export_type).await.map_err(into_response)?;

    Ok(Json(ExportResponse::from(&record)))
}

/// The `export_type` field of an export request, `excel` when absent.
pub async fn read_export_type(request: Request) -> ServerResult<String> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(form) = Form::<ExportForm>::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?;
        return Ok(form.export_type);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ServerError::BadRequest(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.body_text()))?
    {
        if field.name() == Some("export_type") {
            return field.text().await.map_err(|e| ServerError::BadRequest(e.body_text()));
        }
    }
    Ok(ExportType::Excel.as_str().to_string())
}

/// Export the current items and record the export.
pub async fn run_export(state: &AppState, raw_type: &str) -> ServerResult<ExportRecord> {
    let export_type = ExportType::parse(raw_type).ok_or_else(|| ExportError::InvalidType(raw_type.to_string()))?;

    let items = state.items().await;
    let record = state.exporter.export(export_type, items).await?;

    // The export itself succeeded; a history write failure only loses the record
    if let Err(e) = state.record_export(record.clone()).await {
        log_warning(format!("Export not recorded in history: {}", e));
    }
    Ok(record)
}

/// Export history, newest first
async fn export_history(State(state): State<AppState>) -> Json<Vec<ExportRecord>> {
    Json(state.history().await)
}

/// Download an exported file as an attachment
async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> Result<Response, ApiError> {
    let not_found = || (StatusCode::NOT_FOUND, Json(ApiResponse::failure("File not found")));

    if !is_safe_filename(&filename) {
        log_warning(format!("Refused download of {:?}", filename));
        return Err(not_found());
    }

    let path = state.exporter.export_dir().join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|_| not_found())?;

    let content_type = if filename.ends_with(".xlsx") {
        XLSX_MIME
    } else {
        "application/octet-stream"
    };
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::tests::test_config;
    use crate::extract::as400::tests::sample_line;
    use axum::body::Body;
    use tempfile::tempdir;

    fn report() -> String {
        format!(
            "REFUND AUDIT LOG    04/12/25\n{}\n{}\n",
            sample_line("1234567", "1-", "12.99-"),
            sample_line("7654321", "2", "5.00")
        )
    }

    fn form_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/export")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_data_replaces_items() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        state.replace_items(vec![LineItem::new("1"), LineItem::new("2")]).await;

        let items = vec![LineItem::new("3")];
        let Json(response) = update_data(State(state.clone()), Ok(Json(items))).await.unwrap();

        assert!(response.success);
        assert_eq!(response.item_count, Some(1));
        let stored = state.items().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].item_number, "3");
    }

    #[tokio::test]
    async fn test_export_without_items() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));

        let err = run_export(&state, "excel").await.unwrap_err();
        assert_eq!(err.to_string(), "No data to export.");
        assert_eq!(status_of(&err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_invalid_type() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        state.replace_items(vec![LineItem::new("1")]).await;

        let err = run_export(&state, "csv").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid export type");
    }

    #[tokio::test]
    async fn test_excel_export_recorded_and_downloadable() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        state.replace_items(vec![LineItem::new("1234567")]).await;

        let record = run_export(&state, "excel").await.unwrap();
        let history = state.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, record.id);

        let response = download(State(state.clone()), Path(record.filename.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_MIME);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment"));
    }

    #[tokio::test]
    async fn test_google_export_without_token() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        state.replace_items(vec![LineItem::new("1")]).await;

        let err = run_export(&state, "google").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Google Sheets credentials not found. Please check your configuration."
        );
        assert!(state.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_download_rejects_traversal() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));

        for name in ["../history/x.json", "..", "a\\b.xlsx", "missing.xlsx"] {
            let (status, _) = download(State(state.clone()), Path(name.to_string()))
                .await
                .unwrap_err();
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_process_upload_replaces_items() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));

        let count = process_upload(&state, "audit.txt", report().into_bytes()).await.unwrap();
        assert_eq!(count, 2);
        let items = state.items().await;
        assert_eq!(items[0].item_number, "1234567");
        assert_eq!(items[0].quantity, -1);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_items() {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        state.replace_items(vec![LineItem::new("1")]).await;

        let err = process_upload(&state, "scan.png", vec![1, 2, 3]).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(state.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_export_type_from_form() {
        let export_type = read_export_type(form_request("export_type=google")).await.unwrap();
        assert_eq!(export_type, "google");

        let export_type = read_export_type(form_request("")).await.unwrap();
        assert_eq!(export_type, "excel");
    }

    #[tokio::test]
    async fn test_read_export_type_from_multipart() {
        let body = "--XBOUNDARY\r\n\
Content-Disposition: form-data; name=\"export_type\"\r\n\r\n\
google\r\n\
--XBOUNDARY--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/export")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();

        assert_eq!(read_export_type(request).await.unwrap(), "google");
    }
}
