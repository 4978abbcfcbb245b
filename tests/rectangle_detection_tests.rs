//! End-to-end rectangle detection on synthetic scenes
//!
//! These tests paint shapes onto black canvases and check that the
//! rectangle path finds exactly the rectangles, with the right parameters,
//! and nothing else.

mod common;

use common::*;
use rust_shapes::{RectangleConfig, RectangleDetector, detect_rectangles, detect_rectangles_with_telemetry};
use std::f64::consts::FRAC_PI_2;

fn config(min_area: f64, max_area: f64) -> RectangleConfig {
    RectangleConfig::default()
        .with_min_area(min_area)
        .with_max_area(max_area)
}

#[test]
fn test_single_axis_aligned_rectangle() {
    init_logging();
    let mut img = canvas(100, 100);
    fill_rect(&mut img, 30, 20, 70, 60);

    let rects = detect_rectangles(&to_raster(&img), &config(200.0, 8000.0));
    assert_eq!(rects.len(), 1, "got {:?}", rects);

    let r = rects[0];
    assert!((r.center.x - 50).abs() <= 3 && (r.center.y - 40).abs() <= 3, "{:?}", r);
    assert!((r.width - 40).abs() <= 3 && (r.height - 40).abs() <= 3, "{:?}", r);
    assert!(r.angle.abs() < 0.05, "angle {}", r.angle);
}

#[test]
fn test_rotation_coverage() {
    init_logging();
    let cfg = config(200.0, 15000.0).with_approx_epsilon(0.015);

    let detected: Vec<bool> = (0..=36)
        .map(|step| {
            let mut img = canvas(300, 300);
            fill_rotated_rect(&mut img, 150.0, 150.0, 80.0, 50.0, step as f64 * 5.0);
            !detect_rectangles(&to_raster(&img), &cfg).is_empty()
        })
        .collect();

    let hits = detected.iter().filter(|&&d| d).count();
    println!("rotation coverage: {}/37", hits);
    assert!(hits * 10 >= 37 * 7, "only {}/37 angles detected", hits);
    assert!(detected[0], "0 degrees must be detected");
    assert!(detected[18], "90 degrees must be detected");
}

#[test]
fn test_rotated_rectangle_parameters() {
    let cfg = config(200.0, 15000.0);
    for (degrees, expected_angle) in [(0.0, 0.0), (90.0, FRAC_PI_2)] {
        let mut img = canvas(300, 300);
        fill_rotated_rect(&mut img, 150.0, 150.0, 80.0, 50.0, degrees);
        let rects = detect_rectangles(&to_raster(&img), &cfg);
        assert_eq!(rects.len(), 1, "at {} degrees: {:?}", degrees, rects);

        let r = rects[0];
        assert!((r.width - 80).abs() <= 3 && (r.height - 50).abs() <= 3, "{:?}", r);
        assert!((r.center.x - 150).abs() <= 3 && (r.center.y - 150).abs() <= 3, "{:?}", r);
        assert!((r.angle - expected_angle).abs() < 0.05, "{:?}", r);
    }
}

#[test]
fn test_circles_are_not_rectangles() {
    let mut img = canvas(300, 300);
    fill_disk(&mut img, 75.0, 75.0, 30.0);
    fill_disk(&mut img, 220.0, 80.0, 40.0);
    fill_disk(&mut img, 150.0, 220.0, 25.0);

    let rects = detect_rectangles(&to_raster(&img), &config(200.0, 15000.0));
    assert!(rects.is_empty(), "circles detected as {:?}", rects);
}

#[test]
fn test_triangles_are_not_rectangles() {
    let mut img = canvas(300, 300);
    fill_triangle(&mut img, [(100.0, 200.0), (150.0, 200.0), (125.0, 150.0)]);
    fill_triangle(&mut img, [(30.0, 30.0), (130.0, 40.0), (60.0, 120.0)]);
    fill_triangle(&mut img, [(200.0, 40.0), (280.0, 40.0), (240.0, 110.0)]);

    let rects = detect_rectangles(&to_raster(&img), &config(200.0, 15000.0));
    assert!(rects.is_empty(), "triangles detected as {:?}", rects);
}

#[test]
fn test_ellipse_is_not_a_rectangle() {
    let mut img = canvas(300, 300);
    fill_ellipse(&mut img, 150.0, 150.0, 40.0, 25.0);

    let rects = detect_rectangles(&to_raster(&img), &config(200.0, 15000.0));
    assert!(rects.is_empty(), "ellipse detected as {:?}", rects);
}

#[test]
fn test_rectangle_among_other_shapes() {
    let mut img = canvas(300, 300);
    fill_rect(&mut img, 20, 20, 100, 70);
    fill_disk(&mut img, 220.0, 80.0, 35.0);
    fill_triangle(&mut img, [(60.0, 250.0), (140.0, 250.0), (100.0, 180.0)]);

    let rects = detect_rectangles(&to_raster(&img), &config(200.0, 15000.0));
    assert_eq!(rects.len(), 1, "got {:?}", rects);
    assert!((rects[0].center.x - 60).abs() <= 3 && (rects[0].center.y - 45).abs() <= 3);
}

#[test]
fn test_area_filtering() {
    let mut img = canvas(100, 100);
    fill_rect(&mut img, 20, 30, 80, 60); // 60x30, area 1800
    let raster = to_raster(&img);

    assert_eq!(detect_rectangles(&raster, &RectangleConfig::default()).len(), 1);
    assert!(detect_rectangles(&raster, &config(2500.0, 10000.0)).is_empty());
    assert!(detect_rectangles(&raster, &config(200.0, 1000.0)).is_empty());
}

#[test]
fn test_variants_are_fused() {
    let mut img = canvas(100, 100);
    fill_rect(&mut img, 30, 20, 70, 60);

    let (rects, tel) = detect_rectangles_with_telemetry(&to_raster(&img), &config(200.0, 8000.0));
    assert_eq!(rects.len(), 1);
    assert_eq!(tel.variants_run, 3);
    assert_eq!(tel.candidates_before_dedup, 3);
    assert_eq!(tel.candidates_after_dedup, 1);
}

#[test]
fn test_many_rectangles_parallel_matches_sequential() {
    let mut img = canvas(200, 200);
    for j in 0..4 {
        for i in 0..4 {
            let (x, y) = (10 + 45 * i, 10 + 45 * j);
            fill_rect(&mut img, x, y, x + 24, y + 14);
        }
    }
    let raster = to_raster(&img);

    let parallel = detect_rectangles(&raster, &config(100.0, 1000.0));
    let sequential = detect_rectangles(&raster, &config(100.0, 1000.0).with_parallel_threshold(usize::MAX));
    assert_eq!(parallel.len(), 16);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_idempotent() {
    let mut img = canvas(300, 300);
    fill_rect(&mut img, 20, 20, 100, 70);
    fill_rotated_rect(&mut img, 200.0, 200.0, 70.0, 40.0, 30.0);
    let raster = to_raster(&img);
    let detector = RectangleDetector::with_config(config(200.0, 15000.0));

    let first = detector.detect(&raster);
    let second = detector.detect(&raster);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_blank_and_degenerate_inputs() {
    assert!(detect_rectangles(&to_raster(&canvas(64, 64)), &RectangleConfig::default()).is_empty());
    assert!(detect_rectangles(&to_raster(&canvas(0, 0)), &RectangleConfig::default()).is_empty());

    // A thin line has no area worth keeping
    let mut img = canvas(100, 100);
    fill_rect(&mut img, 10, 50, 90, 51);
    assert!(detect_rectangles(&to_raster(&img), &config(10.0, 10000.0)).is_empty());
}
