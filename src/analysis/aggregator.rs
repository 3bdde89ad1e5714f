// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Post-detection aggregation: per-cell geometry, size classes and
//! image-level statistics

use super::types::{
    AnalysisSummary, BoundingBox, CellAnalysis, DetectionResult, SizeDistribution, SizeLabel,
};
use crate::vision::RawDetection;

/// Round to 2 decimal places, sending exact ties to the even neighbour
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Aggregate raw detections for an image of `width` x `height` pixels
///
/// Confluence is the summed box area over the image area. Overlapping boxes
/// are counted twice, so the value is not capped at 100.
pub fn aggregate(width: u32, height: u32, detections: &[RawDetection]) -> CellAnalysis {
    let mut size_distribution = SizeDistribution::default();
    let mut total_area = 0.0;

    let results: Vec<DetectionResult> = detections
        .iter()
        .map(|d| {
            let bbox =
                BoundingBox::from_corners(d.x1 as f64, d.y1 as f64, d.x2 as f64, d.y2 as f64);
            let area = bbox.area();
            let diameter = bbox.diameter();
            let size = SizeLabel::from_diameter(diameter);

            total_area += area;
            size_distribution.record(size);

            DetectionResult {
                x: bbox.x,
                y: bbox.y,
                w: bbox.w,
                h: bbox.h,
                area: round2(area),
                diameter: round2(diameter),
                size,
            }
        })
        .collect();

    let cell_count = results.len();
    let avg_size = if cell_count == 0 {
        0.0
    } else {
        round2(total_area / cell_count as f64)
    };

    let image_area = width as f64 * height as f64;
    let confluence = if image_area > 0.0 {
        round2(total_area / image_area * 100.0)
    } else {
        0.0
    };

    CellAnalysis {
        summary: AnalysisSummary {
            cell_count,
            confluence,
            avg_size,
            size_distribution,
        },
        detections: results,
    }
}
