//! Raster and geometry helpers shared by the detectors
//!
//! - Binarization (global threshold and Otsu)
//! - Filters (Gaussian blur, sharpen, 3x3 morphology)
//! - Geometry (shoelace area and centroid, convex hull, corner measures)

pub mod binarization;
pub mod filters;
pub mod geometry;
