// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cell analysis endpoint handler

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use tracing::{debug, warn};

use super::request::read_file_field;
use crate::analysis::{analyze_image, AnalysisResponse};
use crate::api::errors::ApiError;
use crate::api::server::AppState;

/// POST /analyze - Count, size and measure cells in an uploaded image
///
/// # Request
/// Multipart form with a required `file` field holding the image bytes.
///
/// # Response
/// - `width`, `height`: Decoded image dimensions
/// - `cell_count`, `confluence`, `avg_size`, `size_distribution`: Aggregates
/// - `detections`: Per-cell boxes in detector order
/// - `original_image`, `processed_image`: Base64 JPEG of the upload
///
/// # Errors
/// Every failure is answered with `{"error": "<message>"}`:
/// - 400 Bad Request: Missing `file` field, malformed multipart, undecodable image
/// - 503 Service Unavailable: Detection model not loaded
/// - 500 Internal Server Error: Inference or re-encoding failed
///
/// With legacy error status enabled all failures are answered with 200.
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let legacy_status = state.config.legacy_error_status;

    match run_analysis(&state, multipart).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            warn!(kind = e.kind(), "Analysis request failed: {}", e);
            e.into_response_with(legacy_status)
        }
    }
}

async fn run_analysis(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisResponse, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::InvalidMultipart(e.body_text()))?;
    let bytes = read_file_field(multipart).await?;

    debug!("Analyzing upload of {} bytes", bytes.len());

    let manager = state.model_manager.clone();
    let max_upload_bytes = state.config.max_upload_bytes;

    let response = tokio::task::spawn_blocking(move || {
        analyze_image(&manager, &bytes, max_upload_bytes)
    })
    .await
    .map_err(|e| ApiError::InternalError(e.to_string()))??;

    Ok(response)
}

