//! Fan-out over contours and deduplication of fused candidates
use crate::models::{CircleCandidate, Point, RectangleCandidate};
use rayon::prelude::*;

/// Pairs whose size ratio is at or below this are never merged
pub const MIN_SIZE_RATIO: f64 = 0.5;

/// What the deduplicator needs to know about a candidate
pub trait Candidate {
    /// Center used for proximity
    fn center(&self) -> Point;
    /// Priority and size-ratio metric (area for rectangles, radius for circles)
    fn size(&self) -> f64;
    /// Linear extent the distance threshold scales with
    fn extent(&self) -> f64;
}

impl Candidate for RectangleCandidate {
    fn center(&self) -> Point {
        self.center
    }

    fn size(&self) -> f64 {
        self.area()
    }

    fn extent(&self) -> f64 {
        (self.width + self.height) as f64 / 2.0
    }
}

impl Candidate for CircleCandidate {
    fn center(&self) -> Point {
        self.center
    }

    fn size(&self) -> f64 {
        self.radius as f64
    }

    fn extent(&self) -> f64 {
        2.0 * self.radius as f64
    }
}

/// Largest-first proximity dedup.
///
/// Candidates are stably sorted by size, descending. A later candidate is
/// dropped when its center lies within `distance_fraction` of the pair's
/// mean extent from a kept one and their sizes are comparable.
pub fn dedup<C: Candidate>(mut candidates: Vec<C>, distance_fraction: f64) -> Vec<C> {
    candidates.sort_by(|a, b| b.size().total_cmp(&a.size()));

    let mut removed = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        if removed[i] {
            continue;
        }
        for j in (i + 1)..candidates.len() {
            if removed[j] {
                continue;
            }
            let (a, b) = (&candidates[i], &candidates[j]);
            let limit = distance_fraction * (a.extent() + b.extent()) / 2.0;
            let (small, large) = (a.size().min(b.size()), a.size().max(b.size()));
            let similar = large > 0.0 && small / large > MIN_SIZE_RATIO;
            if similar && a.center().distance(&b.center()) < limit {
                removed[j] = true;
            }
        }
    }

    candidates
        .into_iter()
        .zip(removed)
        .filter_map(|(c, gone)| (!gone).then_some(c))
        .collect()
}

/// Map `f` over `items`, in parallel above `parallel_threshold` items.
///
/// Workers write into pre-sized index slots; a sequential pass then
/// compacts accepted results in input order.
pub fn map_indexed<T, R, F>(items: &[T], parallel_threshold: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Option<R> + Sync + Send,
{
    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);

    if items.len() > parallel_threshold {
        slots
            .par_iter_mut()
            .zip(items.par_iter())
            .for_each(|(slot, item)| *slot = f(item));
    } else {
        for (slot, item) in slots.iter_mut().zip(items) {
            *slot = f(item);
        }
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> RectangleCandidate {
        RectangleCandidate {
            center: Point::new(x, y),
            width: w,
            height: h,
            angle: 0.0,
        }
    }

    fn circle(x: i32, y: i32, r: i32) -> CircleCandidate {
        CircleCandidate {
            center: Point::new(x, y),
            radius: r,
            confidence: 1.0,
        }
    }

    #[test]
    fn test_close_similar_rectangles_collapse() {
        // Centers 8px apart, average size 40: within 25%
        let kept = dedup(vec![rect(50, 40, 40, 40), rect(58, 40, 41, 39)], 0.5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_largest_survives() {
        let kept = dedup(vec![rect(50, 40, 38, 38), rect(51, 40, 42, 42)], 0.5);
        assert_eq!(kept, vec![rect(51, 40, 42, 42)]);
    }

    #[test]
    fn test_distant_or_dissimilar_kept() {
        let far = dedup(vec![rect(50, 40, 40, 40), rect(150, 40, 40, 40)], 0.5);
        assert_eq!(far.len(), 2);

        // Nested: same center, very different size
        let nested = dedup(vec![rect(50, 50, 80, 80), rect(50, 50, 20, 20)], 0.5);
        assert_eq!(nested.len(), 2);
    }

    #[test]
    fn test_circle_dedup_uses_radius_sum() {
        // 0.7 * (20 + 20) = 28
        assert_eq!(dedup(vec![circle(0, 0, 20), circle(27, 0, 20)], 0.7).len(), 1);
        assert_eq!(dedup(vec![circle(0, 0, 20), circle(29, 0, 20)], 0.7).len(), 2);
    }

    #[test]
    fn test_map_indexed_preserves_order() {
        let items: Vec<i32> = (0..100).collect();
        let odd = |x: &i32| (x % 2 == 1).then_some(x * 10);
        let sequential = map_indexed(&items, usize::MAX, odd);
        let parallel = map_indexed(&items, 0, odd);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 50);
        assert_eq!(sequential[0], 10);
        assert_eq!(sequential[49], 990);
    }
}
