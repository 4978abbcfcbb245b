/// Ordering of unordered boundary points into a closed contour
use crate::models::Point;
use std::cmp::Ordering;
use std::ops::Deref;

/// Ordered closed point sequence. Indices wrap modulo the length and the
/// first point is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Wrap points that are already in traversal order
    pub fn from_ordered(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Point at `index`, wrapping in both directions
    pub fn wrapping(&self, index: isize) -> Point {
        let n = self.points.len() as isize;
        self.points[index.rem_euclid(n) as usize]
    }

    /// Unwrap into the point vector
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl Deref for Contour {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

/// Order boundary points around their centroid.
///
/// Points are bucketed into quadrants relative to the mean, then sorted
/// within a quadrant by the sign of the cross product. All arithmetic is
/// exact: offsets are scaled by the point count so the centroid stays
/// integral, which keeps the comparator a strict total order.
pub fn order_boundary(mut points: Vec<Point>) -> Contour {
    if points.len() < 3 {
        return Contour::from_ordered(points);
    }

    let n = points.len() as i128;
    let (sx, sy) = points
        .iter()
        .fold((0i128, 0i128), |(sx, sy), p| (sx + p.x as i128, sy + p.y as i128));

    points.sort_by(|a, b| compare_around(*a, *b, n, sx, sy));
    Contour::from_ordered(points)
}

/// Reorder a short vertex list (e.g. 4 corners) into traversal order
pub fn order_vertices(points: &[Point]) -> Vec<Point> {
    order_boundary(points.to_vec()).into_points()
}

fn quadrant(dx: i128, dy: i128) -> u8 {
    match (dx >= 0, dy >= 0) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

fn compare_around(a: Point, b: Point, n: i128, sx: i128, sy: i128) -> Ordering {
    let (dxa, dya) = (a.x as i128 * n - sx, a.y as i128 * n - sy);
    let (dxb, dyb) = (b.x as i128 * n - sx, b.y as i128 * n - sy);

    quadrant(dxa, dya)
        .cmp(&quadrant(dxb, dyb))
        .then_with(|| (dxb * dya).cmp(&(dxa * dyb)))
        .then_with(|| (dxa * dxa + dya * dya).cmp(&(dxb * dxb + dyb * dyb)))
        .then_with(|| (a.y, a.x).cmp(&(b.y, b.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geometry::polygon_area;

    #[test]
    fn test_orders_square_ring() {
        let mut ring = Vec::new();
        for i in 0..10 {
            ring.push(Point::new(i, 0));
            ring.push(Point::new(i, 9));
        }
        for i in 1..9 {
            ring.push(Point::new(0, i));
            ring.push(Point::new(9, i));
        }
        let contour = order_boundary(ring);
        assert_eq!(contour.len(), 36);
        // A correct traversal has unit steps everywhere
        for i in 0..contour.len() as isize {
            let d = contour.wrapping(i).distance_squared(&contour.wrapping(i + 1));
            assert!(d <= 2, "jump of {} at {}", d, i);
        }
        assert_eq!(polygon_area(&contour), 81.0);
    }

    #[test]
    fn test_quadrant_sequence() {
        let pts = vec![
            Point::new(-1, -1),
            Point::new(1, -1),
            Point::new(1, 1),
            Point::new(-1, 1),
        ];
        let ordered = order_boundary(pts).into_points();
        assert_eq!(
            ordered,
            vec![
                Point::new(1, 1),
                Point::new(-1, 1),
                Point::new(-1, -1),
                Point::new(1, -1)
            ]
        );
    }

    #[test]
    fn test_sort_is_deterministic_with_center_point() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(-2, 0),
            Point::new(0, 2),
            Point::new(0, -2),
        ];
        let mut reversed = pts.clone();
        reversed.reverse();
        assert_eq!(order_boundary(pts), order_boundary(reversed));
    }

    #[test]
    fn test_short_input_unchanged() {
        let pts = vec![Point::new(3, 3), Point::new(1, 1)];
        assert_eq!(order_boundary(pts.clone()).into_points(), pts);
    }

    #[test]
    fn test_wrapping_index() {
        let c = Contour::from_ordered(vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(c.wrapping(-1), Point::new(2, 0));
        assert_eq!(c.wrapping(4), Point::new(1, 0));
    }
}
