// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cell culture analysis
//!
//! Turns detector output into per-cell records and image-level statistics
//! (cell count, confluence, average size, size distribution).

pub mod aggregator;
pub mod error;
pub mod pipeline;
pub mod types;

pub use aggregator::{aggregate, round2};
pub use error::AnalysisError;
pub use pipeline::analyze_image;
pub use types::{
    AnalysisResponse, AnalysisSummary, BoundingBox, CellAnalysis, DetectionResult,
    SizeDistribution, SizeLabel,
};
