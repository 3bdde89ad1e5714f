// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cell detection
//!
//! Components:
//! - `detector` - The `CellDetector` capability and its raw output type
//! - `preprocessing` - Letterboxing and tensor conversion
//! - `postprocessing` - YOLO output decoding and non-maximum suppression
//! - `yolo` - ONNX Runtime backed YOLOv8 detector

pub mod detector;
pub mod postprocessing;
pub mod preprocessing;
pub mod yolo;

pub use detector::{CellDetector, RawDetection};
pub use yolo::{YoloDetector, YoloParams};
