//! End-to-end circular blob detection on synthetic scenes

mod common;

use common::*;
use rust_shapes::{CircleConfig, CircleDetector, detect_circles, detect_circles_with_telemetry};

fn permissive() -> CircleConfig {
    CircleConfig::default()
        .with_min_radius(5)
        .with_max_radius(150)
        .with_circularity_threshold(0.6)
        .with_confidence_threshold(0.4)
}

#[test]
fn test_perfect_disk_is_recovered() {
    init_logging();
    let mut img = canvas(200, 200);
    fill_disk(&mut img, 100.0, 100.0, 30.0);

    let circles = detect_circles(&to_raster(&img), &permissive());
    assert_eq!(circles.len(), 1, "got {:?}", circles);

    let c = circles[0];
    assert!((c.center.x - 100).abs() <= 2 && (c.center.y - 100).abs() <= 2, "{:?}", c);
    assert!((c.radius - 30).abs() <= 2, "{:?}", c);
    assert!(c.confidence > 0.9, "{:?}", c);
}

#[test]
fn test_default_config_finds_disk() {
    let mut img = canvas(200, 200);
    fill_disk(&mut img, 80.0, 120.0, 45.0);

    let circles = CircleDetector::new().detect(&to_raster(&img));
    assert_eq!(circles.len(), 1);
    assert!((circles[0].radius - 45).abs() <= 2);
}

#[test]
fn test_multiple_disks_sorted_by_radius() {
    let mut img = canvas(260, 200);
    fill_disk(&mut img, 60.0, 60.0, 18.0);
    fill_disk(&mut img, 180.0, 110.0, 40.0);
    fill_disk(&mut img, 60.0, 150.0, 25.0);

    let circles = detect_circles(&to_raster(&img), &permissive());
    assert_eq!(circles.len(), 3, "got {:?}", circles);
    let radii: Vec<i32> = circles.iter().map(|c| c.radius).collect();
    assert!(radii.windows(2).all(|w| w[0] >= w[1]), "{:?}", radii);
    assert!((circles[0].center.x - 180).abs() <= 2 && (circles[0].center.y - 110).abs() <= 2);
}

#[test]
fn test_radius_range_filters() {
    let mut img = canvas(200, 200);
    fill_disk(&mut img, 100.0, 100.0, 30.0);
    let raster = to_raster(&img);

    assert!(detect_circles(&raster, &permissive().with_min_radius(40)).is_empty());
    assert!(detect_circles(&raster, &permissive().with_max_radius(20)).is_empty());
}

#[test]
fn test_variants_are_fused() {
    let mut img = canvas(200, 200);
    fill_disk(&mut img, 100.0, 100.0, 30.0);

    let (circles, tel) = detect_circles_with_telemetry(&to_raster(&img), &permissive());
    assert_eq!(circles.len(), 1);
    assert_eq!(tel.variants_run, 2);
    assert_eq!(tel.candidates_before_dedup, 2);
    assert_eq!(tel.candidates_after_dedup, 1);
}

#[test]
fn test_many_disks_parallel_matches_sequential() {
    let mut img = canvas(300, 300);
    for j in 0..4 {
        for i in 0..4 {
            fill_disk(&mut img, 40.0 + 70.0 * i as f64, 40.0 + 70.0 * j as f64, 15.0 + (i + j) as f64);
        }
    }
    let raster = to_raster(&img);

    let parallel = detect_circles(&raster, &permissive());
    let sequential = detect_circles(&raster, &permissive().with_parallel_threshold(usize::MAX));
    assert_eq!(parallel.len(), 16);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_idempotent_and_empty() {
    let mut img = canvas(200, 200);
    fill_disk(&mut img, 70.0, 70.0, 25.0);
    let raster = to_raster(&img);
    assert_eq!(detect_circles(&raster, &permissive()), detect_circles(&raster, &permissive()));

    assert!(detect_circles(&to_raster(&canvas(50, 50)), &permissive()).is_empty());
}
