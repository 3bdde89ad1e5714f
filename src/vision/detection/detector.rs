// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector capability used by the analysis pipeline

use anyhow::Result;
use image::RgbImage;

/// One detected object in original image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDetection {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
    /// Detection confidence score (0.0-1.0)
    pub confidence: f32,
    /// Index of the highest scoring class
    pub class_id: usize,
}

impl RawDetection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence: 1.0,
            class_id: 0,
        }
    }
}

/// Anything that can locate cells in an RGB image
///
/// Implementations must be safe to call from several requests at once,
/// either by being stateless per call or by serializing internally.
#[cfg_attr(test, mockall::automock)]
pub trait CellDetector: Send + Sync {
    /// Short model identifier for logs and health reporting
    fn name(&self) -> String;

    /// Run detection, returning boxes in the detector's native order
    fn detect(&self, image: &RgbImage) -> Result<Vec<RawDetection>>;
}
