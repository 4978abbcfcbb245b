//! Line-pair intersection corners.
//!
//! Straight stretches of the contour are found by fitting lines to
//! overlapping windows. Four of them that close a loop of near-right angles
//! are intersected pairwise to give the corners.

use super::SimplifyParams;
use crate::models::{Point, PointF};
use crate::utils::geometry::mean_point;

/// |cos| below which two lines count as perpendicular
const PERPENDICULAR_COS: f64 = 0.15;
/// |cos| above which two lines count as parallel
const PARALLEL_COS: f64 = 0.95;
/// Fit residual (RMS, pixels) above which a window is not a straight stretch
const MAX_RESIDUAL: f64 = 1.0;
/// Opposite sides must be at least this far apart (pixels)
const MIN_SEPARATION: f64 = 3.0;
/// Outward shift for lines through boundary pixel centers
const EDGE_OFFSET: f64 = 0.5;
const MAX_SEGMENTS: usize = 32;
const DIRECTION_EPSILON: f64 = 1e-9;

/// Total-least-squares line through a window of contour points
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    /// Point on the line (window centroid)
    pub origin: PointF,
    /// Unit direction
    pub direction: PointF,
    /// Extent of the window projected on the line
    pub length: f64,
    /// RMS distance of the window points from the line
    pub residual: f64,
}

impl LineSegment {
    fn normal(&self) -> PointF {
        PointF::new(-self.direction.y, self.direction.x)
    }

    fn cos_to(&self, other: &LineSegment) -> f64 {
        (self.direction.x * other.direction.x + self.direction.y * other.direction.y).abs()
    }

    fn is_perpendicular(&self, other: &LineSegment) -> bool {
        self.cos_to(other) < PERPENDICULAR_COS
    }

    fn is_parallel(&self, other: &LineSegment) -> bool {
        self.cos_to(other) > PARALLEL_COS
    }

    /// Distance of `other`'s origin from this line
    fn separation(&self, other: &LineSegment) -> f64 {
        let n = self.normal();
        ((other.origin.x - self.origin.x) * n.x + (other.origin.y - self.origin.y) * n.y).abs()
    }

    /// Same line moved `offset` pixels away from `center`
    fn pushed_away_from(&self, center: PointF, offset: f64) -> LineSegment {
        let mut n = self.normal();
        let side = (self.origin.x - center.x) * n.x + (self.origin.y - center.y) * n.y;
        if side < 0.0 {
            n = PointF::new(-n.x, -n.y);
        }
        LineSegment {
            origin: PointF::new(self.origin.x + n.x * offset, self.origin.y + n.y * offset),
            ..*self
        }
    }

    /// Intersection with another line, `None` when nearly parallel
    pub fn intersect(&self, other: &LineSegment) -> Option<PointF> {
        let d1 = self.direction;
        let d2 = other.direction;
        let denom = d1.x * d2.y - d1.y * d2.x;
        if denom.abs() < DIRECTION_EPSILON {
            return None;
        }
        let (qx, qy) = (other.origin.x - self.origin.x, other.origin.y - self.origin.y);
        let t = (qx * d2.y - qy * d2.x) / denom;
        Some(PointF::new(self.origin.x + t * d1.x, self.origin.y + t * d1.y))
    }
}

/// Principal-axis line fit, `None` for fewer than 2 distinct points
pub fn fit_line(points: &[Point]) -> Option<LineSegment> {
    let origin = mean_point(points)?;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.x as f64 - origin.x;
        let dy = p.y as f64 - origin.y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx + syy < DIRECTION_EPSILON {
        return None;
    }

    let theta = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    let direction = PointF::new(theta.cos(), theta.sin());
    let normal = PointF::new(-direction.y, direction.x);

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut sq = 0.0;
    for p in points {
        let dx = p.x as f64 - origin.x;
        let dy = p.y as f64 - origin.y;
        let along = dx * direction.x + dy * direction.y;
        let across = dx * normal.x + dy * normal.y;
        lo = lo.min(along);
        hi = hi.max(along);
        sq += across * across;
    }

    Some(LineSegment {
        origin,
        direction,
        length: hi - lo,
        residual: (sq / points.len() as f64).sqrt(),
    })
}

/// Straight stretches of the contour, best fits first
pub fn detect_segments(contour: &[Point]) -> Vec<LineSegment> {
    let n = contour.len();
    if n < 8 {
        return Vec::new();
    }
    let window = (n / 12).clamp(6, 40).min(n);
    let step = (window / 2).max(1);
    let min_length = window as f64 * 0.5;

    let mut buffer = Vec::with_capacity(window);
    let mut segments: Vec<LineSegment> = (0..n)
        .step_by(step)
        .filter_map(|start| {
            buffer.clear();
            buffer.extend((0..window).map(|k| contour[(start + k) % n]));
            fit_line(&buffer)
        })
        .filter(|seg| seg.residual <= MAX_RESIDUAL && seg.length >= min_length)
        .collect();

    segments.sort_by(|a, b| {
        a.residual
            .total_cmp(&b.residual)
            .then_with(|| b.length.total_cmp(&a.length))
    });
    segments.truncate(MAX_SEGMENTS);
    segments
}

/// Four corners from the first closed loop of perpendicular lines
pub fn corners(contour: &[Point], _params: &SimplifyParams) -> Option<Vec<Point>> {
    let segments = detect_segments(contour);
    if segments.len() < 4 {
        return None;
    }
    let center = mean_point(contour)?;

    for l1 in &segments {
        for l2 in segments.iter().filter(|l| l1.is_perpendicular(l)) {
            for l3 in segments
                .iter()
                .filter(|l| l2.is_perpendicular(l) && l1.is_parallel(l))
                .filter(|l| l1.separation(l) >= MIN_SEPARATION)
            {
                let closing = segments.iter().find(|l| {
                    l3.is_perpendicular(l)
                        && l1.is_perpendicular(l)
                        && l2.is_parallel(l)
                        && l2.separation(l) >= MIN_SEPARATION
                });
                if let Some(l4) = closing {
                    let lines = [l1, l2, l3, l4].map(|l| l.pushed_away_from(center, EDGE_OFFSET));
                    let mut quad = Vec::with_capacity(4);
                    for i in 0..4 {
                        quad.push(lines[i].intersect(&lines[(i + 1) % 4])?.round());
                    }
                    return Some(quad);
                }
            }
        }
    }

    None
}
