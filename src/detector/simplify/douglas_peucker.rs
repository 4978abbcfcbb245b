//! Multi-tolerance Douglas-Peucker
use super::SimplifyParams;
use crate::models::Point;
use crate::utils::geometry::{perimeter, point_line_distance_squared};

/// Tolerance multipliers tried in order
const MULTIPLIERS: [f64; 6] = [1.0, 1.5, 2.0, 3.0, 4.0, 6.0];
/// Smallest tolerance in pixels
const MIN_TOLERANCE: f64 = 3.0;
const MAX_VERTICES: usize = 12;

/// Douglas-Peucker on an open polyline. Both endpoints are always kept.
/// A point survives when it deviates from the chord of its span by more
/// than `tolerance`.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let tolerance_sq = tolerance * tolerance;
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let (split, max_sq) = ((start + 1)..end)
            .map(|i| (i, point_line_distance_squared(points[i], a, b)))
            .fold((start, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if max_sq > tolerance_sq {
            keep[split] = true;
            stack.push((split, end));
            stack.push((start, split));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Douglas-Peucker on a closed contour: the loop is split at the point
/// farthest from the start and each half is simplified on its own
pub fn simplify_closed(contour: &[Point], tolerance: f64) -> Vec<Point> {
    let n = contour.len();
    if n < 4 {
        return contour.to_vec();
    }
    let start = contour[0];
    let far = (1..n)
        .max_by_key(|&i| (contour[i].distance_squared(&start), std::cmp::Reverse(i)))
        .unwrap_or(n / 2);

    let mut result = simplify(&contour[..=far], tolerance);
    let mut tail: Vec<Point> = contour[far..].to_vec();
    tail.push(start);
    let second = simplify(&tail, tolerance);
    // Drop the shared split point and the repeated start
    result.extend_from_slice(&second[1..second.len() - 1]);
    result
}

/// Tries growing tolerances, preferring exactly 4 vertices, then 5..=12
pub fn simplify_multi(contour: &[Point], params: &SimplifyParams) -> Option<Vec<Point>> {
    if contour.len() < 4 {
        return None;
    }
    let base = params.epsilon * perimeter(contour);

    let mut fallback = None;
    for multiplier in MULTIPLIERS {
        let tolerance = (base * multiplier).max(MIN_TOLERANCE);
        let approx = simplify_closed(contour, tolerance);
        if approx.len() == 4 {
            return Some(approx);
        }
        if fallback.is_none() && (5..=MAX_VERTICES).contains(&approx.len()) {
            fallback = Some(approx);
        }
    }
    fallback
}
