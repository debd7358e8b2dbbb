//! HTTP client for the audit log backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::config::{BACKEND_URL, UPLOAD_ERROR_FALLBACK};
use crate::state::UploadOutcome;
use crate::types::{ApiResponse, AppError, AppResult, ExportRecord, ExportResponse, ExportType, LineItem};

fn endpoint(path: &str) -> String {
    format!("{}{}", BACKEND_URL, path)
}

/// The `message` string of an error body, else the fallback.
pub fn failure_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> AppResult<T> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Server(failure_message(&body, fallback)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Server(format!("Failed to parse response: {}", e)))
}

/// Upload one report as multipart field `file`.
pub async fn upload_file(file: &File) -> UploadOutcome {
    match post_upload(file).await {
        Ok(response) if response.success => UploadOutcome::Success,
        Ok(response) => UploadOutcome::Failure {
            message: response.message.unwrap_or_else(|| UPLOAD_ERROR_FALLBACK.to_string()),
        },
        Err(e) => {
            log::error!("❌ Upload failed: {}", e);
            UploadOutcome::Failure {
                message: e.user_message(UPLOAD_ERROR_FALLBACK),
            }
        }
    }
}

async fn post_upload(file: &File) -> AppResult<ApiResponse> {
    let form_data = FormData::new().map_err(|e| AppError::Upload(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| AppError::Upload(format!("Failed to append file: {:?}", e)))?;

    let response = Request::post(&endpoint("/upload"))
        .body(form_data)
        .map_err(|e| AppError::Upload(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response, UPLOAD_ERROR_FALLBACK).await
}

/// Replace the server's item set with `items`.
pub async fn update_data(items: &[LineItem], fallback: &str) -> AppResult<ApiResponse> {
    let response = Request::post(&endpoint("/update-data"))
        .json(items)
        .map_err(|e| AppError::Server(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    let body: ApiResponse = read_json(response, fallback).await?;
    if !body.success {
        return Err(AppError::Server(body.message.unwrap_or_else(|| fallback.to_string())));
    }
    Ok(body)
}

/// Request an export; `success: false` bodies are returned, not raised.
pub async fn export(export_type: ExportType, fallback: &str) -> AppResult<ExportResponse> {
    let form_data = FormData::new().map_err(|e| AppError::Export(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_str("export_type", export_type.as_str())
        .map_err(|e| AppError::Export(format!("Failed to append field: {:?}", e)))?;

    let response = Request::post(&endpoint("/export"))
        .body(form_data)
        .map_err(|e| AppError::Export(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response, fallback).await
}

/// Items currently stored on the server.
pub async fn fetch_items() -> AppResult<Vec<LineItem>> {
    let response = Request::get(&endpoint("/items"))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response, "Could not load items").await
}

/// Export history, newest first.
pub async fn fetch_history() -> AppResult<Vec<ExportRecord>> {
    let response = Request::get(&endpoint("/export-history"))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response, "Could not load export history").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_from_body() {
        let body = r#"{"success":false,"message":"File type not allowed. Please upload a .txt or .pdf file."}"#;
        assert_eq!(
            failure_message(body, "Error processing file"),
            "File type not allowed. Please upload a .txt or .pdf file."
        );
    }

    #[test]
    fn test_failure_message_fallbacks() {
        assert_eq!(failure_message(r#"{"success":false,"message":{"code":3}}"#, "fallback"), "fallback");
        assert_eq!(failure_message(r#"{"success":false}"#, "fallback"), "fallback");
        assert_eq!(failure_message("Payload Too Large", "fallback"), "fallback");
        assert_eq!(failure_message(r#"{"message":""}"#, "fallback"), "fallback");
    }

    #[test]
    fn test_export_response_decodes() {
        let body = r#"{"success":true,"download_url":"/download/refund_audit_log_20250514_103000.xlsx"}"#;
        let response: ExportResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        assert!(response.spreadsheet_url.is_none());
    }
}
