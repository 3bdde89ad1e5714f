// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! analyze_image tests against a mocked detector

use cell_analysis_node::analysis::{analyze_image, AnalysisError};
use cell_analysis_node::vision::{DetectionModelManager, ImageError, RawDetection};

use crate::common::{detector_returning, manager_with, png_bytes, MockDetector};

const LIMIT: usize = 10 * 1024 * 1024;

#[test]
fn test_grayscale_upload_is_analyzed_as_rgb() {
    let gray = image::GrayImage::from_pixel(50, 40, image::Luma([200]));
    let mut png = std::io::Cursor::new(Vec::new());
    gray.write_to(&mut png, image::ImageFormat::Png).unwrap();

    let mut detector = MockDetector::new();
    detector.expect_name().return_const("yolo-test".to_string());
    detector
        .expect_detect()
        .withf(|img| img.get_pixel(0, 0).0 == [200, 200, 200])
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let response = analyze_image(&manager_with(detector), png.get_ref(), LIMIT).unwrap();
    assert_eq!((response.width, response.height), (50, 40));
}

#[test]
fn test_response_carries_aggregates() {
    let manager = manager_with(detector_returning(vec![
        RawDetection::new(0.0, 0.0, 40.0, 30.0),
        RawDetection::new(10.0, 10.0, 70.0, 50.0),
    ]));

    let response = analyze_image(&manager, &png_bytes(200, 200), LIMIT).unwrap();

    assert_eq!(response.summary.cell_count, 2);
    assert_eq!(response.summary.avg_size, 1800.0);
    assert_eq!(response.summary.confluence, 9.0);
    assert_eq!(response.detections.len(), 2);
    assert_eq!(response.original_image, response.processed_image);
    assert!(!response.original_image.is_empty());
}

#[test]
fn test_model_checked_before_decode() {
    let err = analyze_image(&DetectionModelManager::unavailable(), b"garbage", LIMIT).unwrap_err();
    assert!(matches!(err, AnalysisError::ModelUnavailable));
}

#[test]
fn test_oversized_upload_is_decode_error() {
    let manager = manager_with(detector_returning(Vec::new()));
    let png = png_bytes(64, 64);

    let err = analyze_image(&manager, &png, 16).unwrap_err();
    assert!(matches!(err, AnalysisError::Decode(ImageError::TooLarge(_, 16))));
}
