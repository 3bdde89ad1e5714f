// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for CPU-based image analysis
//!
//! This module provides:
//! - Image decoding and JPEG/base64 re-encoding
//! - Cell detection via a YOLOv8 ONNX model
//! - The process-wide detection model manager

pub mod detection;
pub mod image_utils;
pub mod model_manager;

pub use detection::{CellDetector, RawDetection, YoloDetector, YoloParams};
pub use image_utils::{
    decode_image_bytes, detect_format, encode_jpeg_base64, to_rgb, ImageError, ImageInfo,
};
pub use model_manager::{DetectionModelConfig, DetectionModelInfo, DetectionModelManager};
