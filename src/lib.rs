// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analysis;
pub mod api;
pub mod cli;
pub mod version;
pub mod vision;

pub use analysis::{
    aggregate, analyze_image, AnalysisError, AnalysisResponse, AnalysisSummary, DetectionResult,
    SizeDistribution, SizeLabel,
};
pub use api::{create_router, ApiConfig, ApiServer, AppState};
pub use vision::{CellDetector, DetectionModelConfig, DetectionModelManager, RawDetection};
