// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health endpoint tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cell_analysis_node::vision::DetectionModelManager;
use tower::ServiceExt;

use crate::common::{body_json, detector_returning, manager_with, router_with};

fn health_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_with_model() {
    let router = router_with(manager_with(detector_returning(Vec::new())));

    let response = router.oneshot(health_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"]["name"], "yolo-test");
    assert_eq!(json["model"]["available"], true);
    assert_eq!(json["version"], cell_analysis_node::version::VERSION_NUMBER);
}

#[tokio::test]
async fn test_health_without_model() {
    let router = router_with(DetectionModelManager::unavailable());

    let response = router.oneshot(health_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["model"]["available"], false);
}
