//! Moment-based canonical-frame corners.
//!
//! Central moments of the contour points give an orientation and a set of
//! shape descriptors. When the descriptors look like a rectangle outline,
//! the contour is rotated into its principal frame, boxed, and the box
//! corners are rotated back. Nothing here depends on the input rotation.

use super::SimplifyParams;
use crate::models::{Point, PointF};
use crate::utils::geometry::mean_point;

/// Outline points of an ideal rectangle give 2/3, an ellipse gives 1/2
const MIN_SECOND_MOMENT_RATIO: f64 = 0.56;
const MAX_ASPECT_RATIO: f64 = 8.0;
/// 1 - minor/major eigenvalue. Disks and squares fall below this.
const MIN_ELLIPTICITY: f64 = 0.08;
/// Half-pixel margin per side for the pixel-center discretization
const BOX_MARGIN: f64 = 0.5;
const VARIANCE_EPSILON: f64 = 1e-9;

/// Central moments of a point set, normalized by the point count
#[derive(Debug, Clone, Copy)]
pub struct ShapeMoments {
    /// Mean of the points
    pub centroid: PointF,
    /// Second-order moments
    pub m20: f64,
    pub m02: f64,
    pub m11: f64,
    /// Third-order moments
    pub m30: f64,
    pub m03: f64,
    pub m21: f64,
    pub m12: f64,
}

impl ShapeMoments {
    /// Moments of `points`, or `None` for fewer than 3 points or zero spread
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let centroid = mean_point(points)?;
        let n = points.len() as f64;

        let mut m = Self {
            centroid,
            m20: 0.0,
            m02: 0.0,
            m11: 0.0,
            m30: 0.0,
            m03: 0.0,
            m21: 0.0,
            m12: 0.0,
        };
        for p in points {
            let dx = p.x as f64 - centroid.x;
            let dy = p.y as f64 - centroid.y;
            m.m20 += dx * dx;
            m.m02 += dy * dy;
            m.m11 += dx * dy;
            m.m30 += dx * dx * dx;
            m.m03 += dy * dy * dy;
            m.m21 += dx * dx * dy;
            m.m12 += dx * dy * dy;
        }
        for v in [
            &mut m.m20, &mut m.m02, &mut m.m11, &mut m.m30, &mut m.m03, &mut m.m21, &mut m.m12,
        ] {
            *v /= n;
        }

        (m.m20 + m.m02 > VARIANCE_EPSILON).then_some(m)
    }

    /// Principal axis angle in radians
    pub fn orientation(&self) -> f64 {
        0.5 * (2.0 * self.m11).atan2(self.m20 - self.m02)
    }

    /// Covariance eigenvalues, larger first
    pub fn eigenvalues(&self) -> (f64, f64) {
        let mean = (self.m20 + self.m02) / 2.0;
        let spread = (((self.m20 - self.m02) / 2.0).powi(2) + self.m11 * self.m11).sqrt();
        (mean + spread, (mean - spread).max(0.0))
    }

    /// sqrt(major / minor), infinite for a line
    pub fn aspect_ratio(&self) -> f64 {
        let (major, minor) = self.eigenvalues();
        if minor < VARIANCE_EPSILON {
            return f64::INFINITY;
        }
        (major / minor).sqrt()
    }

    /// 1 - minor / major: 0 for isotropic point sets
    pub fn ellipticity(&self) -> f64 {
        let (major, minor) = self.eigenvalues();
        if major < VARIANCE_EPSILON {
            return 0.0;
        }
        1.0 - minor / major
    }

    /// Rotation-invariant third-order asymmetry, scale-normalized.
    /// Zero for centro-symmetric shapes such as rectangles and ellipses.
    pub fn skewness(&self) -> f64 {
        let scale = (self.m20 + self.m02).powf(1.5);
        if scale < VARIANCE_EPSILON {
            return 0.0;
        }
        let i1 = ((self.m30 - 3.0 * self.m12).powi(2) + (3.0 * self.m21 - self.m03).powi(2)).sqrt();
        let i2 = ((self.m30 + self.m12).powi(2) + (self.m21 + self.m03).powi(2)).sqrt();
        i1.max(i2) / scale
    }
}

/// Corners of the principal-frame bounding box, when the contour passes the
/// rectangle plausibility test
pub fn corners(contour: &[Point], params: &SimplifyParams) -> Option<Vec<Point>> {
    let moments = ShapeMoments::from_points(contour)?;

    if moments.ellipticity() < MIN_ELLIPTICITY
        || moments.aspect_ratio() > MAX_ASPECT_RATIO
        || moments.skewness() > params.max_skewness
    {
        return None;
    }

    let theta = moments.orientation();
    let (sin, cos) = theta.sin_cos();
    let c = moments.centroid;

    let canonical: Vec<(f64, f64)> = contour
        .iter()
        .map(|p| {
            let dx = p.x as f64 - c.x;
            let dy = p.y as f64 - c.y;
            (dx * cos + dy * sin, -dx * sin + dy * cos)
        })
        .collect();

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &canonical {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let half_w = (max_x - min_x) / 2.0;
    let half_h = (max_y - min_y) / 2.0;
    if half_w < VARIANCE_EPSILON || half_h < VARIANCE_EPSILON {
        return None;
    }

    let mid_x = (max_x + min_x) / 2.0;
    let mid_y = (max_y + min_y) / 2.0;
    let ratio = canonical
        .iter()
        .map(|&(x, y)| ((x - mid_x) / half_w).powi(2) + ((y - mid_y) / half_h).powi(2))
        .sum::<f64>()
        / (2.0 * canonical.len() as f64);
    if ratio < MIN_SECOND_MOMENT_RATIO {
        log::trace!("moments: second-moment ratio {:.3} too low", ratio);
        return None;
    }

    let box_corners = [
        (min_x - BOX_MARGIN, min_y - BOX_MARGIN),
        (max_x + BOX_MARGIN, min_y - BOX_MARGIN),
        (max_x + BOX_MARGIN, max_y + BOX_MARGIN),
        (min_x - BOX_MARGIN, max_y + BOX_MARGIN),
    ];
    Some(
        box_corners
            .iter()
            .map(|&(x, y)| PointF::new(c.x + x * cos - y * sin, c.y + x * sin + y * cos).round())
            .collect(),
    )
}
