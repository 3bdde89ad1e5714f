// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::AnalysisError;

/// Uniform error payload: `{"error": "<message>"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    MissingFile,
    InvalidMultipart(String),
    Analysis(AnalysisError),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }

    /// Machine-readable failure class, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "missing_file",
            ApiError::InvalidMultipart(_) => "invalid_multipart",
            ApiError::Analysis(e) => e.kind(),
            ApiError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingFile | ApiError::InvalidMultipart(_) => 400,
            ApiError::Analysis(e) => match e {
                AnalysisError::Decode(_) => 400,
                AnalysisError::ModelUnavailable => 503,
                AnalysisError::Inference(_) | AnalysisError::Encode(_) => 500,
            },
            ApiError::InternalError(_) => 500,
        }
    }

    /// Render the error, answering 200 for every failure when
    /// `legacy_status` is set
    pub fn into_response_with(self, legacy_status: bool) -> Response {
        let status = if legacy_status {
            StatusCode::OK
        } else {
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self.to_response())).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFile => write!(f, "Missing required form field 'file'"),
            ApiError::InvalidMultipart(msg) => write!(f, "Invalid multipart body: {}", msg),
            ApiError::Analysis(e) => write!(f, "{}", e),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
