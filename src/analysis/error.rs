// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors raised by the analysis pipeline, one variant per stage

use thiserror::Error;

use crate::vision::ImageError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No detection model was loaded at startup
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The upload could not be decoded as an image
    #[error(transparent)]
    Decode(ImageError),

    /// The detector failed on a valid image
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The image could not be re-encoded for the response
    #[error(transparent)]
    Encode(ImageError),
}

impl AnalysisError {
    /// Stable machine-readable identifier of the failing stage
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::ModelUnavailable => "model_unavailable",
            AnalysisError::Decode(_) => "decode_error",
            AnalysisError::Inference(_) => "inference_error",
            AnalysisError::Encode(_) => "encode_error",
        }
    }
}
