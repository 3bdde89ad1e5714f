// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection model manager
//!
//! Loads the cell detector once at startup and hands out read-only
//! references to request handlers for the life of the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::vision::detection::{CellDetector, YoloDetector, YoloParams};

/// Configuration for loading the detection model
#[derive(Debug, Clone)]
pub struct DetectionModelConfig {
    /// Custom trained weights, preferred when present
    pub model_path: PathBuf,
    /// Generic weights substituted when the custom file is absent
    pub fallback_model_path: PathBuf,
    /// Detector parameters
    pub params: YoloParams,
}

impl Default for DetectionModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/yolo_v8_final_best.onnx"),
            fallback_model_path: PathBuf::from("./models/yolov8n.onnx"),
            params: YoloParams::default(),
        }
    }
}

impl DetectionModelConfig {
    /// Pick the weights file to load: custom weights if present, else fallback
    pub fn resolve_model_path(&self) -> &Path {
        if self.model_path.exists() {
            &self.model_path
        } else {
            &self.fallback_model_path
        }
    }
}

/// Information about the loaded detection model
#[derive(Debug, Clone, serde::Serialize)]
pub struct DetectionModelInfo {
    /// Model name
    pub name: String,
    /// Whether the model is available
    pub available: bool,
}

/// Holder of the process-wide detection model
///
/// A failed load leaves the manager without a detector; the process keeps
/// serving and every analysis reports the model as unavailable.
pub struct DetectionModelManager {
    detector: Option<Arc<dyn CellDetector>>,
}

impl DetectionModelManager {
    /// Load the detector described by `config`
    pub fn new(config: DetectionModelConfig) -> Self {
        if !config.model_path.exists() {
            tracing::warn!(
                "⚠️ Model not found at {}, using {} instead",
                config.model_path.display(),
                config.fallback_model_path.display()
            );
        }

        let path = config.resolve_model_path();
        let detector = match YoloDetector::new(path, config.params.clone()) {
            Ok(detector) => {
                tracing::info!("✅ Detection model loaded from {}", path.display());
                Some(Arc::new(detector) as Arc<dyn CellDetector>)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Failed to load detection model from {}: {:#}",
                    path.display(),
                    e
                );
                None
            }
        };

        Self { detector }
    }

    /// Wrap an already constructed detector
    pub fn with_detector(detector: Arc<dyn CellDetector>) -> Self {
        Self {
            detector: Some(detector),
        }
    }

    /// A manager with no detector loaded
    pub fn unavailable() -> Self {
        Self { detector: None }
    }

    /// Get the detector if available
    pub fn detector(&self) -> Option<Arc<dyn CellDetector>> {
        self.detector.clone()
    }

    /// Check if a detector is loaded
    pub fn is_available(&self) -> bool {
        self.detector.is_some()
    }

    pub fn model_info(&self) -> DetectionModelInfo {
        DetectionModelInfo {
            name: self
                .detector
                .as_ref()
                .map(|d| d.name())
                .unwrap_or_else(|| "none".to_string()),
            available: self.detector.is_some(),
        }
    }
}
