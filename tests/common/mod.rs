// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for integration tests
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use cell_analysis_node::{
    api::{create_router, ApiConfig, AppState},
    vision::{CellDetector, DetectionModelManager, RawDetection},
};
use image::{ImageFormat, Rgb, RgbImage};

pub const BOUNDARY: &str = "cell-analysis-test-boundary";

mockall::mock! {
    pub Detector {}

    impl CellDetector for Detector {
        fn name(&self) -> String;
        fn detect(&self, image: &RgbImage) -> anyhow::Result<Vec<RawDetection>>;
    }
}

/// Detector that always reports the given boxes
pub fn detector_returning(detections: Vec<RawDetection>) -> MockDetector {
    let mut detector = MockDetector::new();
    detector
        .expect_name()
        .return_const("yolo-test".to_string());
    detector
        .expect_detect()
        .returning(move |_| Ok(detections.clone()));
    detector
}

pub fn manager_with(detector: MockDetector) -> DetectionModelManager {
    DetectionModelManager::with_detector(Arc::new(detector))
}

pub fn router_with(manager: DetectionModelManager) -> axum::Router {
    create_router(AppState::new_for_test(manager))
}

pub fn router_with_config(manager: DetectionModelManager, config: ApiConfig) -> axum::Router {
    create_router(AppState::new(config, Arc::new(manager)))
}

/// Solid grey PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([128, 128, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Build a multipart body containing one field per `(name, content)` pair
pub fn multipart_body(fields: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}.bin\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(fields: &[(&str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
