//! Shape detection stages
//!
//! - Region extraction (scanline flood fill, boundary subset)
//! - Boundary ordering into closed contours
//! - Polygon simplification (competing corner strategies)
//! - Rectangle and circle classification
//! - Candidate fusion across preprocessing variants

/// Circular blob fitting and validation
pub mod circle;
/// Boundary ordering around the centroid
pub mod contour;
/// Parallel fan-out and candidate deduplication
pub mod fusion;
/// Rectangle gates and parameter fitting
pub mod rectangle;
/// Connected foreground regions
pub mod regions;
/// Contour to vertex-list strategies
pub mod simplify;
