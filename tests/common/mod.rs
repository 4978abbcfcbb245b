//! Synthetic scene painters shared by the integration tests.
//!
//! Scenes are painted white-on-black into an `image::GrayImage` and
//! converted to a `Raster` the way a caller with a decoded image would.

#![allow(dead_code)]

use image::{GrayImage, Luma};
use rust_shapes::Raster;

const WHITE: Luma<u8> = Luma([255]);

/// Black canvas
pub fn canvas(width: u32, height: u32) -> GrayImage {
    GrayImage::new(width, height)
}

fn paint(img: &mut GrayImage, inside: impl Fn(f64, f64) -> bool) {
    let (w, h) = img.dimensions();
    for y in 0..h {
        for x in 0..w {
            if inside(x as f64, y as f64) {
                img.put_pixel(x, y, WHITE);
            }
        }
    }
}

/// Axis-aligned rectangle covering x0..x1, y0..y1 (exclusive ends)
pub fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, WHITE);
        }
    }
}

/// Rectangle of `width` x `height` centered at (cx, cy), rotated by
/// `degrees`, sampled at pixel centers
pub fn fill_rotated_rect(img: &mut GrayImage, cx: f64, cy: f64, width: f64, height: f64, degrees: f64) {
    // Snap so that 90 and 180 degrees produce exact axis-aligned edges
    let snap = |v: f64| if v.abs() < 1e-12 { 0.0 } else { v };
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (snap(sin), snap(cos));
    paint(img, |x, y| {
        let (dx, dy) = (x - cx, y - cy);
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        u >= -width / 2.0 && u < width / 2.0 && v >= -height / 2.0 && v < height / 2.0
    });
}

/// Filled disk
pub fn fill_disk(img: &mut GrayImage, cx: f64, cy: f64, radius: f64) {
    paint(img, |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius);
}

/// Filled axis-aligned ellipse with semi-axes `a` (x) and `b` (y)
pub fn fill_ellipse(img: &mut GrayImage, cx: f64, cy: f64, a: f64, b: f64) {
    paint(img, |x, y| ((x - cx) / a).powi(2) + ((y - cy) / b).powi(2) <= 1.0);
}

/// Filled triangle
pub fn fill_triangle(img: &mut GrayImage, p: [(f64, f64); 3]) {
    let edge = |a: (f64, f64), b: (f64, f64), x: f64, y: f64| {
        (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0)
    };
    paint(img, |x, y| {
        let d0 = edge(p[0], p[1], x, y);
        let d1 = edge(p[1], p[2], x, y);
        let d2 = edge(p[2], p[0], x, y);
        (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0) || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
    });
}

/// Convert a painted canvas to a raster
pub fn to_raster(img: &GrayImage) -> Raster {
    Raster::from(img)
}

/// Opt-in log output (`RUST_LOG=rust_shapes=trace cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
