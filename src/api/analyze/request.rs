// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction

use axum::body::Bytes;
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;

/// Name of the multipart form field carrying the image
pub const FILE_FIELD: &str = "file";

/// Read the bytes of the `file` field, skipping any other fields
pub async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?;

        debug!(
            "Received upload {:?}: {} bytes",
            file_name.as_deref().unwrap_or("<unnamed>"),
            data.len()
        );

        return Ok(data);
    }

    Err(ApiError::MissingFile)
}
