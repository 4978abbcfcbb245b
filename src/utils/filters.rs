//! Raster filters used by the preprocessing variants.
//!
//! Every filter returns a new raster. Rows are processed on the rayon pool
//! once the raster reaches [`PARALLEL_MIN_PIXELS`]; smaller rasters are
//! filtered sequentially.

use crate::models::Raster;
use rayon::prelude::*;

/// Pixel count at which filters switch to row-parallel processing
pub const PARALLEL_MIN_PIXELS: usize = 256 * 256;

/// Fill every output row with `row_fn(y, row)`, in parallel for large rasters
fn map_rows<F>(width: usize, height: usize, row_fn: F) -> Raster
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    if width == 0 || height == 0 {
        return Raster::new(width, height);
    }

    let mut out = vec![0u8; width * height];
    if width * height >= PARALLEL_MIN_PIXELS {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| row_fn(y, row));
    } else {
        out.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| row_fn(y, row));
    }

    Raster::from_vec(width, height, out).unwrap_or_else(|| Raster::new(width, height))
}

/// Normalized 1-D Gaussian kernel of size 2*ceil(3*sigma)+1
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (3.0 * sigma).ceil().max(0.0) as i64;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Separable Gaussian blur with clamped edges
pub fn gaussian_blur(src: &Raster, sigma: f64) -> Raster {
    if sigma <= 0.0 || src.is_empty() {
        return src.clone();
    }

    let (width, height) = (src.width(), src.height());
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;

    let horizontal = map_rows(width, height, |y, row| {
        let line = src.row(y);
        for (x, out) in row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x as i64 + k as i64 - radius).clamp(0, width as i64 - 1) as usize;
                acc += weight * line[sx] as f64;
            }
            *out = acc.round().clamp(0.0, 255.0) as u8;
        }
    });

    map_rows(width, height, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y as i64 + k as i64 - radius).clamp(0, height as i64 - 1) as usize;
                acc += weight * horizontal.get(x, sy) as f64;
            }
            *out = acc.round().clamp(0.0, 255.0) as u8;
        }
    })
}

/// 3x3 sharpen: 5*center minus the 4-neighbours, saturated to 0..=255.
/// Out-of-bounds neighbours repeat the edge pixel.
pub fn sharpen(src: &Raster) -> Raster {
    let (width, height) = (src.width(), src.height());
    let at = |x: i64, y: i64| -> i32 {
        let cx = x.clamp(0, width as i64 - 1) as usize;
        let cy = y.clamp(0, height as i64 - 1) as usize;
        src.get(cx, cy) as i32
    };

    map_rows(width, height, |y, row| {
        let y = y as i64;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as i64;
            let value = 5 * at(x, y) - at(x - 1, y) - at(x + 1, y) - at(x, y - 1) - at(x, y + 1);
            *out = value.clamp(0, 255) as u8;
        }
    })
}

/// 3x3 max filter over in-bounds neighbours
pub fn dilate(src: &Raster) -> Raster {
    neighbourhood_filter(src, |window| window.max().unwrap_or(0))
}

/// 3x3 min filter over in-bounds neighbours
pub fn erode(src: &Raster) -> Raster {
    neighbourhood_filter(src, |window| window.min().unwrap_or(0))
}

/// Dilate then erode: fills 1-pixel gaps and notches
pub fn close(src: &Raster) -> Raster {
    erode(&dilate(src))
}

/// Erode then dilate: removes 1-pixel specks and spurs
pub fn open(src: &Raster) -> Raster {
    dilate(&erode(src))
}

fn neighbourhood_filter<F>(src: &Raster, reduce: F) -> Raster
where
    F: Fn(&mut dyn Iterator<Item = u8>) -> u8 + Sync + Send,
{
    let (width, height) = (src.width(), src.height());
    map_rows(width, height, |y, row| {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        for (x, out) in row.iter_mut().enumerate() {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(width - 1);
            let mut window = (y0..=y1).flat_map(|ny| src.row(ny)[x0..=x1].iter().copied());
            *out = reduce(&mut window);
        }
    })
}
