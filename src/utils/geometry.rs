/// Polygon and point-set geometry shared by the simplifier and classifiers
use crate::models::{Point, PointF};

/// Areas below this are treated as degenerate
pub const AREA_EPSILON: f64 = 1e-6;

/// Cross product of (a - o) x (b - o), exact
pub fn cross(o: Point, a: Point, b: Point) -> i64 {
    let (ax, ay) = ((a.x - o.x) as i64, (a.y - o.y) as i64);
    let (bx, by) = ((b.x - o.x) as i64, (b.y - o.y) as i64);
    ax * by - ay * bx
}

/// Signed shoelace area of a closed polygon
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice as f64 / 2.0
}

/// Unsigned shoelace area of a closed polygon
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Perimeter of a closed polygon
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.distance(b))
        .sum()
}

/// Arithmetic mean of a point set
pub fn mean_point(points: &[Point]) -> Option<PointF> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points
        .iter()
        .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
    let n = points.len() as f64;
    Some(PointF::new(sx as f64 / n, sy as f64 / n))
}

/// Area-weighted (shoelace) centroid of a closed polygon.
/// Falls back to the point mean when the area is degenerate.
pub fn area_centroid(points: &[Point]) -> Option<PointF> {
    let area = signed_area(points);
    if area.abs() < AREA_EPSILON {
        return mean_point(points);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        let f = (a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64) as f64;
        cx += (a.x + b.x) as f64 * f;
        cy += (a.y + b.y) as f64 * f;
    }
    Some(PointF::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Axis-aligned bounding box as (min, max) corners
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let init = (*first, *first);
    Some(points.iter().fold(init, |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Monotone-chain convex hull. Collinear points are dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable_by_key(|p| (p.x, p.y));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(sorted.len() * 2);
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Interior angle at `cur` in radians, from the clamped dot product.
/// `None` when an adjacent edge has zero length.
pub fn corner_angle(prev: Point, cur: Point, next: Point) -> Option<f64> {
    let (ax, ay) = ((prev.x - cur.x) as f64, (prev.y - cur.y) as f64);
    let (bx, by) = ((next.x - cur.x) as f64, (next.y - cur.y) as f64);
    let norm = (ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt();
    if norm < AREA_EPSILON {
        return None;
    }
    Some(((ax * bx + ay * by) / norm).clamp(-1.0, 1.0).acos())
}

/// Corner sharpness proxy cross^2 / (dot^2 + cross^2), i.e. sin^2 of the
/// turn. Orders corners like the true angle without trigonometry.
pub fn corner_strength(prev: Point, cur: Point, next: Point) -> f64 {
    let (ax, ay) = ((cur.x - prev.x) as f64, (cur.y - prev.y) as f64);
    let (bx, by) = ((next.x - cur.x) as f64, (next.y - cur.y) as f64);
    let c = ax * by - ay * bx;
    let d = ax * bx + ay * by;
    let denom = c * c + d * d;
    if denom < AREA_EPSILON {
        return 0.0;
    }
    c * c / denom
}

/// Squared distance from `p` to the infinite line through `a` and `b`.
/// Degenerates to point distance when `a == b`.
pub fn point_line_distance_squared(p: Point, a: Point, b: Point) -> f64 {
    let len_sq = a.distance_squared(&b) as f64;
    if len_sq < AREA_EPSILON {
        return p.distance_squared(&a) as f64;
    }
    let c = cross(a, b, p) as f64;
    c * c / len_sq
}

/// Drop points closer than `min_distance_squared` to one already kept
pub fn remove_near_duplicates(points: &[Point], min_distance_squared: f64) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if kept
            .iter()
            .all(|k| (k.distance_squared(&p) as f64) >= min_distance_squared)
        {
            kept.push(p);
        }
    }
    kept
}
