// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analysis result types

use serde::{Deserialize, Serialize};

/// Diameter below which a cell is `Small`
pub const SMALL_MAX_DIAMETER: f64 = 50.0;

/// Diameter above which a cell is `Large`
pub const MEDIUM_MAX_DIAMETER: f64 = 150.0;

/// Axis-aligned box in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    /// Build from corner coordinates
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1,
            y: y1,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Longer side, used as a proxy for cell diameter
    pub fn diameter(&self) -> f64 {
        self.w.max(self.h)
    }
}

/// Size category of a detected cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeLabel {
    Small,
    Medium,
    Large,
}

impl SizeLabel {
    /// Classify a diameter; both 50 and 150 fall into `Medium`
    pub fn from_diameter(diameter: f64) -> Self {
        if diameter < SMALL_MAX_DIAMETER {
            SizeLabel::Small
        } else if diameter <= MEDIUM_MAX_DIAMETER {
            SizeLabel::Medium
        } else {
            SizeLabel::Large
        }
    }
}

/// Per-cell record returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Box area, rounded to 2 decimals
    pub area: f64,
    /// Longer box side, rounded to 2 decimals
    pub diameter: f64,
    pub size: SizeLabel,
}

/// Count of cells per size label; all three keys are always serialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDistribution {
    #[serde(rename = "Small")]
    pub small: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Large")]
    pub large: usize,
}

impl SizeDistribution {
    pub fn record(&mut self, label: SizeLabel) {
        match label {
            SizeLabel::Small => self.small += 1,
            SizeLabel::Medium => self.medium += 1,
            SizeLabel::Large => self.large += 1,
        }
    }

    pub fn get(&self, label: SizeLabel) -> usize {
        match label {
            SizeLabel::Small => self.small,
            SizeLabel::Medium => self.medium,
            SizeLabel::Large => self.large,
        }
    }

    pub fn total(&self) -> usize {
        self.small + self.medium + self.large
    }
}

/// Aggregate statistics over all detections of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub cell_count: usize,
    /// Summed detection area over image area, in percent; may exceed 100
    pub confluence: f64,
    /// Mean detection area, 0 when nothing was detected
    pub avg_size: f64,
    pub size_distribution: SizeDistribution,
}

/// Summary plus the per-cell records in detector order
#[derive(Debug, Clone, PartialEq)]
pub struct CellAnalysis {
    pub summary: AnalysisSummary,
    pub detections: Vec<DetectionResult>,
}

/// Full payload of a successful `/analyze` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub detections: Vec<DetectionResult>,
    /// Base64 JPEG of the uploaded image
    pub original_image: String,
    /// Base64 JPEG for display; currently the original image without overlay
    pub processed_image: String,
}
