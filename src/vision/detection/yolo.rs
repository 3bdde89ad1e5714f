// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOv8 cell detection model
//!
//! Runs a YOLOv8 detector exported to ONNX on CPU and returns cell
//! bounding boxes in original image coordinates.

use anyhow::{Context, Result};
use image::RgbImage;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::detector::{CellDetector, RawDetection};
use super::postprocessing::{decode_yolo_output, NmsParams};
use super::preprocessing::{preprocess_for_detection, YOLO_INPUT_SIZE};

/// Tunable detector parameters
#[derive(Debug, Clone, PartialEq)]
pub struct YoloParams {
    /// Square model input size
    pub input_size: u32,
    /// Minimum class score for a candidate to be kept
    pub confidence_threshold: f32,
    /// IoU above which overlapping same-class boxes are suppressed
    pub iou_threshold: f32,
    /// Maximum number of boxes returned per image
    pub max_detections: usize,
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: YOLO_INPUT_SIZE,
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
        }
    }
}

impl YoloParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.input_size == 0 || self.input_size % 32 != 0 {
            return Err(format!(
                "input_size must be a positive multiple of 32, got {}",
                self.input_size
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err("confidence_threshold must be within [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err("iou_threshold must be within [0, 1]".to_string());
        }
        if self.max_detections == 0 {
            return Err("max_detections must be greater than 0".to_string());
        }
        Ok(())
    }

    fn nms(&self) -> NmsParams {
        NmsParams {
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            max_detections: self.max_detections,
        }
    }
}

/// YOLOv8 detector backed by ONNX Runtime
///
/// The session is shared behind a mutex, so concurrent requests serialize
/// on inference while everything else runs in parallel.
#[derive(Clone)]
pub struct YoloDetector {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Model output name
    output_name: String,
    /// Model name derived from the weights file
    name: String,
    params: YoloParams,
}

impl std::fmt::Debug for YoloDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloDetector")
            .field("name", &self.name)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl YoloDetector {
    /// Load the detector from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub fn new<P: AsRef<Path>>(model_path: P, params: YoloParams) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Detection model not found: {}", model_path.display());
        }

        info!("Loading detection model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load detection model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "images".to_string());

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .unwrap_or_else(|| "output0".to_string());

        debug!(
            "Detection model loaded - input: {}, output: {}",
            input_name, output_name
        );

        let name = model_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "yolov8".to_string());

        info!("✅ Detection model {} loaded successfully (CPU-only)", name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            output_name,
            name,
            params,
        })
    }
}

impl CellDetector for YoloDetector {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn detect(&self, image: &RgbImage) -> Result<Vec<RawDetection>> {
        let (input, letterbox) = preprocess_for_detection(image, self.params.input_size);

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Detection session lock poisoned"))?;

        let input_value = Value::from_array(input).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Detection inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        debug!("Detection output shape: {:?}", output_tensor.shape());

        let detections = decode_yolo_output(output_tensor.view(), &letterbox, &self.params.nms())?;

        debug!("Detected {} cells", detections.len());

        Ok(detections)
    }
}
