// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::api::ApiConfig;
use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::{DetectionModelConfig, YoloParams};

/// Cell Analysis Node
#[derive(Parser, Debug, Clone)]
#[command(name = "cell-analysis-node")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "HTTP service counting and sizing cells in culture images", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Custom trained detection weights (ONNX)
    #[arg(long, env = "MODEL_PATH", default_value = "models/yolo_v8_final_best.onnx")]
    pub model_path: PathBuf,

    /// Generic weights used when the custom weights are absent
    #[arg(long, env = "FALLBACK_MODEL_PATH", default_value = "models/yolov8n.onnx")]
    pub fallback_model_path: PathBuf,

    /// Minimum class score for a detection
    #[arg(long, env = "CONFIDENCE_THRESHOLD", default_value_t = 0.25)]
    pub confidence_threshold: f32,

    /// IoU threshold for non-maximum suppression
    #[arg(long, env = "IOU_THRESHOLD", default_value_t = 0.7)]
    pub iou_threshold: f32,

    /// Maximum detections per image
    #[arg(long, env = "MAX_DETECTIONS", default_value_t = 300)]
    pub max_detections: usize,

    /// Largest accepted upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = MAX_IMAGE_SIZE)]
    pub max_upload_bytes: usize,

    /// Answer failed analyses with 200 instead of an error status
    #[arg(long, env = "LEGACY_ERROR_STATUS")]
    pub legacy_error_status: bool,
}

impl Cli {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            listen_addr: format!("{}:{}", self.host, self.port),
            max_upload_bytes: self.max_upload_bytes,
            legacy_error_status: self.legacy_error_status,
        }
    }

    pub fn model_config(&self) -> DetectionModelConfig {
        DetectionModelConfig {
            model_path: self.model_path.clone(),
            fallback_model_path: self.fallback_model_path.clone(),
            params: YoloParams {
                confidence_threshold: self.confidence_threshold,
                iou_threshold: self.iou_threshold,
                max_detections: self.max_detections,
                ..YoloParams::default()
            },
        }
    }

    /// Validate both derived configurations
    pub fn validate(&self) -> Result<(), String> {
        self.api_config().validate()?;
        self.model_config().params.validate()
    }
}
