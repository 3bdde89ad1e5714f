// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Detection model manager tests
//!
//! Covers weight selection (custom weights preferred, fallback otherwise)
//! and the unavailable state left behind by a failed load.

use std::io::Write;
use std::path::PathBuf;

use cell_analysis_node::vision::{DetectionModelConfig, DetectionModelManager, YoloParams};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> DetectionModelConfig {
    DetectionModelConfig {
        model_path: dir.path().join("custom.onnx"),
        fallback_model_path: dir.path().join("generic.onnx"),
        params: YoloParams::default(),
    }
}

#[test]
fn test_custom_weights_preferred_when_present() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.model_path, b"weights").unwrap();
    std::fs::write(&config.fallback_model_path, b"weights").unwrap();

    assert_eq!(config.resolve_model_path(), config.model_path.as_path());
}

#[test]
fn test_fallback_used_when_custom_missing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    assert_eq!(config.resolve_model_path(), config.fallback_model_path.as_path());
}

#[test]
fn test_missing_weights_leave_manager_unavailable() {
    let config = DetectionModelConfig {
        model_path: PathBuf::from("/nonexistent/custom.onnx"),
        fallback_model_path: PathBuf::from("/nonexistent/generic.onnx"),
        params: YoloParams::default(),
    };

    let manager = DetectionModelManager::new(config);
    assert!(!manager.is_available());
    assert!(manager.detector().is_none());

    let info = manager.model_info();
    assert_eq!(info.name, "none");
    assert!(!info.available);
}

#[test]
fn test_corrupt_weights_leave_manager_unavailable() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let mut file = std::fs::File::create(&config.model_path).unwrap();
    file.write_all(b"definitely not an onnx graph").unwrap();

    let manager = DetectionModelManager::new(config);
    assert!(!manager.is_available());
}
