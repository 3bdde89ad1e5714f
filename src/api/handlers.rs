// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::Serialize;

use super::server::AppState;
use crate::vision::DetectionModelInfo;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when a detection model is loaded, "degraded" otherwise
    pub status: String,
    pub model: DetectionModelInfo,
    pub version: String,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.model_manager.model_info();
    let status = if model.available { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        model,
        version: crate::version::VERSION_NUMBER.to_string(),
    })
}
