//! Curvature-peak corners
use super::SimplifyParams;
use crate::models::Point;

/// |sin| of the turn below which a point is not a corner
const MIN_PEAK: f64 = 0.5;
const MAX_PEAKS: usize = 8;

/// Normalized cross product of the chords `i-k -> i` and `i -> i+k`,
/// i.e. the sine of the turn at `i`. Zero for a degenerate chord.
pub fn curvature_at(contour: &[Point], index: usize, k: usize) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let k = k % n;
    let prev = contour[(index + n - k) % n];
    let cur = contour[index % n];
    let next = contour[(index + k) % n];

    let (ax, ay) = ((cur.x - prev.x) as f64, (cur.y - prev.y) as f64);
    let (bx, by) = ((next.x - cur.x) as f64, (next.y - cur.y) as f64);
    let norm = (ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt();
    if norm < 1e-9 {
        return 0.0;
    }
    (ax * by - ay * bx) / norm
}

/// Shortest index distance between `a` and `b` around a loop of length `n`
fn wrap_distance(a: usize, b: usize, n: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(n - d)
}

/// Up to 8 well-separated curvature maxima, in contour order
pub fn corners(contour: &[Point], _params: &SimplifyParams) -> Option<Vec<Point>> {
    let n = contour.len();
    if n < 12 {
        return None;
    }
    let k = (n / 20).clamp(2, 10);
    let min_separation = (n / 8).max(k);

    let magnitude: Vec<f64> = (0..n).map(|i| curvature_at(contour, i, k).abs()).collect();

    let mut peaks: Vec<usize> = (0..n)
        .filter(|&i| {
            let m = magnitude[i];
            m >= MIN_PEAK && m >= magnitude[(i + n - 1) % n] && m > magnitude[(i + 1) % n]
        })
        .collect();
    peaks.sort_by(|&a, &b| magnitude[b].total_cmp(&magnitude[a]).then(a.cmp(&b)));

    let mut accepted: Vec<usize> = Vec::with_capacity(MAX_PEAKS);
    for i in peaks {
        if accepted.len() == MAX_PEAKS {
            break;
        }
        if accepted
            .iter()
            .all(|&j| wrap_distance(i, j, n) >= min_separation)
        {
            accepted.push(i);
        }
    }

    if accepted.len() < 4 {
        return None;
    }
    accepted.sort_unstable();
    Some(accepted.into_iter().map(|i| contour[i]).collect())
}
