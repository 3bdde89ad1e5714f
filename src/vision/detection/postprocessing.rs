// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOv8 output decoding and non-maximum suppression

use anyhow::Result;
use ndarray::{ArrayViewD, Axis};
use std::cmp::Ordering;

use super::detector::RawDetection;
use super::preprocessing::LetterboxInfo;

/// Thresholds applied to raw YOLO candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NmsParams {
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

/// Decode a YOLOv8 output tensor of shape [1, 4 + nc, N]
///
/// Each of the N columns holds `cx, cy, w, h` in letterboxed pixel space
/// followed by one score per class. Returns detections in original image
/// space, ordered by confidence descending.
pub fn decode_yolo_output(
    output: ArrayViewD<f32>,
    letterbox: &LetterboxInfo,
    params: &NmsParams,
) -> Result<Vec<RawDetection>> {
    let shape = output.shape();
    if shape.len() != 3 || shape[0] != 1 || shape[1] < 5 {
        anyhow::bail!("Unexpected YOLO output shape: {:?}, expected [1, 4+nc, N]", shape);
    }

    let predictions = output.index_axis(Axis(0), 0);
    let num_classes = shape[1] - 4;

    let mut candidates = Vec::new();
    for column in predictions.axis_iter(Axis(1)) {
        let (class_id, confidence) = (0..num_classes)
            .map(|c| (c, column[4 + c]))
            .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });

        if confidence < params.confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (column[0], column[1], column[2], column[3]);
        candidates.push(RawDetection {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
            confidence,
            class_id,
        });
    }

    let kept = non_max_suppression(candidates, params.iou_threshold, params.max_detections);

    Ok(kept
        .into_iter()
        .map(|d| {
            let (x1, y1) = letterbox.map_to_original(d.x1, d.y1);
            let (x2, y2) = letterbox.map_to_original(d.x2, d.y2);
            RawDetection { x1, y1, x2, y2, ..d }
        })
        .collect())
}

/// Greedy per-class non-maximum suppression
///
/// Output is sorted by confidence descending and truncated to `max_detections`.
pub fn non_max_suppression(
    mut candidates: Vec<RawDetection>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<RawDetection> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<RawDetection> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept
            .iter()
            .any(|k| k.class_id == candidate.class_id && iou(k, &candidate) > iou_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }

    kept
}

/// Intersection over union of two corner-format boxes
pub fn iou(a: &RawDetection, b: &RawDetection) -> f32 {
    let ix = (a.x2.min(b.x2) - a.x1.max(b.x1)).max(0.0);
    let iy = (a.y2.min(b.y2) - a.y1.max(b.y1)).max(0.0);
    let intersection = ix * iy;

    let area_a = (a.x2 - a.x1).max(0.0) * (a.y2 - a.y1).max(0.0);
    let area_b = (b.x2 - b.x1).max(0.0) * (b.y2 - b.y1).max(0.0);
    let union = area_a + area_b - intersection;

    if union <= 0.0 {
        0.0
    } else {
        intersection / union
    }
}
