//! Connected foreground regions via scanline flood fill
//!
//! Seeds are taken in row-major order, so the region order is deterministic
//! for a given mask.

use crate::models::{BinaryMask, Point};

/// One horizontal run of foreground pixels, inclusive on both ends
#[derive(Debug, Clone, Copy)]
struct RowSpan {
    y: usize,
    x_start: usize,
    x_end: usize,
}

/// Unordered pixels of one 4-connected foreground component
#[derive(Debug, Clone, Default)]
pub struct Region {
    pixels: Vec<Point>,
}

impl Region {
    /// Pixel count
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the region holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Member pixels in fill order
    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    /// Pixels with at least one 8-neighbour that is background or outside
    /// the mask
    pub fn boundary(&self, mask: &BinaryMask) -> Vec<Point> {
        self.pixels
            .iter()
            .copied()
            .filter(|p| is_boundary(mask, *p))
            .collect()
    }
}

/// A region reduced to what the classifiers consume
#[derive(Debug, Clone, Default)]
pub struct Blob {
    /// Pixel count of the source region
    pub area: usize,
    /// Unordered boundary subset
    pub boundary: Vec<Point>,
}

fn is_boundary(mask: &BinaryMask, p: Point) -> bool {
    let (x, y) = (p.x as i64, p.y as i64);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx != 0 || dy != 0) && !mask.get_signed(x + dx, y + dy) {
                return true;
            }
        }
    }
    false
}

/// All foreground regions with at least `min_pixels` pixels
pub fn extract_regions(mask: &BinaryMask, min_pixels: usize) -> Vec<Region> {
    let mut visited = BinaryMask::new(mask.width(), mask.height());
    let mut regions = Vec::new();

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !mask.get(x, y) || visited.get(x, y) {
                continue;
            }
            let region = fill_region(mask, &mut visited, x, y);
            if region.len() >= min_pixels {
                regions.push(region);
            }
        }
    }

    regions
}

/// Regions of at least `min_pixels` whose boundary has at least
/// `min_boundary` points
pub fn extract_blobs(mask: &BinaryMask, min_pixels: usize, min_boundary: usize) -> Vec<Blob> {
    extract_regions(mask, min_pixels)
        .into_iter()
        .filter_map(|region| {
            let boundary = region.boundary(mask);
            (boundary.len() >= min_boundary).then_some(Blob {
                area: region.len(),
                boundary,
            })
        })
        .collect()
}

/// Flood fill from a seed using an explicit work list of row spans
fn fill_region(mask: &BinaryMask, visited: &mut BinaryMask, seed_x: usize, seed_y: usize) -> Region {
    let mut pixels = Vec::new();
    let mut stack = vec![claim_run(mask, visited, seed_x, seed_y)];

    while let Some(span) = stack.pop() {
        pixels.extend((span.x_start..=span.x_end).map(|x| Point::new(x as i32, span.y as i32)));

        let above = span.y.checked_sub(1);
        let below = Some(span.y + 1).filter(|&y| y < mask.height());
        for ny in [above, below].into_iter().flatten() {
            let mut x = span.x_start;
            while x <= span.x_end {
                if mask.get(x, ny) && !visited.get(x, ny) {
                    let run = claim_run(mask, visited, x, ny);
                    x = run.x_end + 1;
                    stack.push(run);
                } else {
                    x += 1;
                }
            }
        }
    }

    Region { pixels }
}

/// Extend an unvisited foreground pixel to its maximal run and mark it visited
fn claim_run(mask: &BinaryMask, visited: &mut BinaryMask, x: usize, y: usize) -> RowSpan {
    let mut x_start = x;
    while x_start > 0 && mask.get(x_start - 1, y) && !visited.get(x_start - 1, y) {
        x_start -= 1;
    }
    let mut x_end = x;
    while x_end + 1 < mask.width() && mask.get(x_end + 1, y) && !visited.get(x_end + 1, y) {
        x_end += 1;
    }
    for vx in x_start..=x_end {
        visited.set(vx, y, true);
    }
    RowSpan { y, x_start, x_end }
}
