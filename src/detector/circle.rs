//! Circular blob fitting.
//!
//! Blobs are scored for circularity, fitted with the Kasa algebraic least
//! squares circle, validated against the radius range and an inlier count,
//! and finally given a confidence from the mean radial error.

use crate::config::CircleConfig;
use crate::detector::regions::Blob;
use crate::models::{CircleCandidate, Point, PointF};
use crate::utils::geometry::mean_point;
use std::f64::consts::PI;

/// Determinants below this (relative to the diagonal) fall back to the centroid
const SINGULAR_EPSILON: f64 = 1e-9;
/// Inlier band is max(MIN_INLIER_BAND, INLIER_BAND_FRACTION * radius)
const MIN_INLIER_BAND: f64 = 3.0;
const INLIER_BAND_FRACTION: f64 = 0.15;

/// Fitted center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    /// Rounded center
    pub center: Point,
    /// Rounded mean distance from the center to the points
    pub radius: i32,
}

/// 4*PI*area / perimeter^2 with the perimeter of a disk of equal area.
///
/// The estimate makes the score 1.0 for every positive area, so it only
/// screens out empty blobs.
pub fn circularity(area: f64) -> f64 {
    if area <= 0.0 {
        return 0.0;
    }
    let perimeter = 2.0 * PI * (area / PI).sqrt();
    4.0 * PI * area / (perimeter * perimeter)
}

/// Kasa fit: solve the 2x2 normal equations for the center by Cramer's
/// rule. Coordinates are shifted to their mean first. `None` when the
/// system is near-singular (collinear or too few points).
pub fn kasa_fit(points: &[Point]) -> Option<PointF> {
    if points.len() < 3 {
        return None;
    }
    let mean = mean_point(points)?;
    let n = points.len() as f64;

    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut sxxx, mut syyy, mut sxyy, mut sxxy) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let x = p.x as f64 - mean.x;
        let y = p.y as f64 - mean.y;
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
        sxxx += x * x * x;
        syyy += y * y * y;
        sxyy += x * y * y;
        sxxy += x * x * y;
    }

    let a = 2.0 * (n * sxx - sx * sx);
    let b = 2.0 * (n * sxy - sx * sy);
    let c = 2.0 * (n * syy - sy * sy);
    let d = n * (sxxx + sxyy) - sx * (sxx + syy);
    let e = n * (syyy + sxxy) - sy * (sxx + syy);

    let det = a * c - b * b;
    if det.abs() <= SINGULAR_EPSILON * (a.abs() * c.abs()).max(1.0) {
        return None;
    }

    let cx = (d * c - e * b) / det;
    let cy = (a * e - b * d) / det;
    Some(PointF::new(cx + mean.x, cy + mean.y))
}

/// Mean distance from `center` to the points
pub fn mean_radius(points: &[Point], center: Point) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.distance(&center)).sum::<f64>() / points.len() as f64
}

/// Kasa fit, falling back to the centroid when the system is singular
pub fn fit_circle(points: &[Point]) -> Option<CircleFit> {
    let center = match kasa_fit(points) {
        Some(c) => c,
        None => {
            log::trace!("circle: singular Kasa system, using centroid");
            mean_point(points)?
        }
    }
    .round();
    let radius = mean_radius(points, center).round() as i32;
    Some(CircleFit { center, radius })
}

/// Radius within range and enough points near the fitted circle
pub fn validate_fit(points: &[Point], fit: &CircleFit, config: &CircleConfig) -> bool {
    if fit.radius < config.min_radius || fit.radius > config.max_radius || points.is_empty() {
        return false;
    }
    let r = fit.radius as f64;
    let band = MIN_INLIER_BAND.max(INLIER_BAND_FRACTION * r);
    let inliers = points
        .iter()
        .filter(|p| (p.distance(&fit.center) - r).abs() <= band)
        .count();
    inliers as f64 >= config.min_inlier_fraction * points.len() as f64
}

/// max(0, 1 - mean |d - r| / r)
pub fn confidence(points: &[Point], fit: &CircleFit) -> f64 {
    if points.is_empty() || fit.radius <= 0 {
        return 0.0;
    }
    let r = fit.radius as f64;
    let mean_error = points
        .iter()
        .map(|p| (p.distance(&fit.center) - r).abs())
        .sum::<f64>()
        / points.len() as f64;
    (1.0 - mean_error / r).max(0.0)
}

/// Full circle path for one blob
pub fn detect_in_blob(blob: &Blob, config: &CircleConfig) -> Option<CircleCandidate> {
    if blob.boundary.len() < config.min_boundary_points {
        return None;
    }
    if circularity(blob.area as f64) < config.circularity_threshold {
        return None;
    }

    let fit = fit_circle(&blob.boundary)?;
    if !validate_fit(&blob.boundary, &fit, config) {
        log::trace!("circle: fit at {:?} r={} failed validation", fit.center, fit.radius);
        return None;
    }

    let confidence = confidence(&blob.boundary, &fit);
    if confidence < config.confidence_threshold {
        return None;
    }

    Some(CircleCandidate {
        center: fit.center,
        radius: fit.radius,
        confidence,
    })
}
