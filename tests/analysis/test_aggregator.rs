// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Aggregation property tests
//!
//! Checks the invariants that must hold for any detector output:
//! histogram totals, confluence and average size formulas, and
//! classification consistency.

use cell_analysis_node::analysis::{aggregate, round2, SizeLabel};
use cell_analysis_node::vision::RawDetection;

/// Deterministic spread of box sizes from tiny to larger than the image
fn sample_detections(count: usize) -> Vec<RawDetection> {
    (0..count)
        .map(|i| {
            let w = 3.0 + (i * 37 % 211) as f32;
            let h = 2.0 + (i * 53 % 173) as f32;
            let x = (i * 11 % 97) as f32;
            let y = (i * 7 % 89) as f32;
            RawDetection::new(x, y, x + w, y + h)
        })
        .collect()
}

#[test]
fn test_histogram_total_equals_cell_count() {
    for count in [0, 1, 7, 64, 300] {
        let analysis = aggregate(512, 384, &sample_detections(count));
        assert_eq!(analysis.summary.cell_count, count);
        assert_eq!(analysis.summary.size_distribution.total(), count);
        assert_eq!(analysis.detections.len(), count);
    }
}

#[test]
fn test_confluence_formula() {
    let detections = sample_detections(40);
    let (width, height) = (640u32, 480u32);
    let analysis = aggregate(width, height, &detections);

    let total_area: f64 = detections
        .iter()
        .map(|d| (d.x2 - d.x1) as f64 * (d.y2 - d.y1) as f64)
        .sum();
    let expected = round2(total_area / (width as f64 * height as f64) * 100.0);

    assert!((analysis.summary.confluence - expected).abs() < 1e-9);
}

#[test]
fn test_avg_size_formula() {
    let detections = sample_detections(25);
    let analysis = aggregate(1000, 1000, &detections);

    let total_area: f64 = detections
        .iter()
        .map(|d| (d.x2 - d.x1) as f64 * (d.y2 - d.y1) as f64)
        .sum();
    let expected = round2(total_area / detections.len() as f64);

    assert!((analysis.summary.avg_size - expected).abs() < 1e-9);
}

#[test]
fn test_labels_match_diameters() {
    let analysis = aggregate(800, 800, &sample_detections(120));

    for d in &analysis.detections {
        assert_eq!(d.diameter, round2(d.w.max(d.h)));
        assert_eq!(d.size, SizeLabel::from_diameter(d.w.max(d.h)));
        assert!(d.area >= 0.0);
    }
}

#[test]
fn test_histogram_matches_per_cell_labels() {
    let analysis = aggregate(800, 800, &sample_detections(90));
    let dist = &analysis.summary.size_distribution;

    for label in [SizeLabel::Small, SizeLabel::Medium, SizeLabel::Large] {
        let counted = analysis.detections.iter().filter(|d| d.size == label).count();
        assert_eq!(dist.get(label), counted);
    }
}

#[test]
fn test_confluence_ties_round_half_to_even() {
    // On a 40x20 image each 1x1 box adds exactly 0.125%
    let unit = |i: usize| RawDetection::new(i as f32, 0.0, i as f32 + 1.0, 1.0);
    let cases = [(1, 0.12), (3, 0.38), (5, 0.62)];

    for (count, expected) in cases {
        let detections: Vec<_> = (0..count).map(unit).collect();
        let analysis = aggregate(40, 20, &detections);
        assert_eq!(analysis.summary.confluence, expected, "{count} unit boxes");
    }
}
