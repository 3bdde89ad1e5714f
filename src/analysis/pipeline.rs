// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end analysis of one uploaded image

use std::time::Instant;
use tracing::{debug, info};

use super::aggregator::aggregate;
use super::error::AnalysisError;
use super::types::AnalysisResponse;
use crate::vision::{decode_image_bytes, encode_jpeg_base64, to_rgb, DetectionModelManager};

/// Decode, detect, aggregate and assemble the response for one upload
///
/// CPU bound; call from a blocking context.
pub fn analyze_image(
    manager: &DetectionModelManager,
    bytes: &[u8],
    max_upload_bytes: usize,
) -> Result<AnalysisResponse, AnalysisError> {
    let start = Instant::now();

    let detector = manager.detector().ok_or(AnalysisError::ModelUnavailable)?;

    let (image, info) =
        decode_image_bytes(bytes, max_upload_bytes).map_err(AnalysisError::Decode)?;
    let rgb = to_rgb(&image);
    let (width, height) = rgb.dimensions();

    debug!(
        "Decoded image: {}x{} {:?}, {} bytes",
        width, height, info.format, info.size_bytes
    );

    let raw = detector
        .detect(&rgb)
        .map_err(|e| AnalysisError::Inference(format!("{:#}", e)))?;

    let analysis = aggregate(width, height, &raw);

    let encoded = encode_jpeg_base64(&rgb).map_err(AnalysisError::Encode)?;

    info!(
        "Analysis complete: {}x{}, {} cells, {:.2}% confluence, {}ms",
        width,
        height,
        analysis.summary.cell_count,
        analysis.summary.confluence,
        start.elapsed().as_millis()
    );

    Ok(AnalysisResponse {
        width,
        height,
        summary: analysis.summary,
        detections: analysis.detections,
        processed_image: encoded.clone(),
        original_image: encoded,
    })
}
