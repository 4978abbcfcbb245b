//! rust_shapes - rectangle and circular blob detection
//!
//! Finds rectangles at any rotation and circular blobs in 8-bit rasters and
//! returns their parameters (center, extents, orientation, confidence).
//! Detection is a pure function of the raster and an immutable config, so
//! it is safe to call repeatedly and from several threads.
//!
//! ```no_run
//! use rust_shapes::{Raster, RectangleConfig, detect_rectangles};
//!
//! let raster = Raster::new(100, 100);
//! let config = RectangleConfig::default().with_min_area(200.0);
//! for rect in detect_rectangles(&raster, &config) {
//!     println!("{:?} {}x{} @ {:.2}", rect.center, rect.width, rect.height, rect.angle);
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection parameters for both paths
pub mod config;
/// Detection stages (regions, contours, simplification, classification, fusion)
pub mod detector;
/// Core data structures (Raster, BinaryMask, Point, candidates)
pub mod models;
/// Multi-variant driver and telemetry
pub mod pipeline;
/// Utility functions (binarization, filters, geometry)
pub mod utils;

pub use config::{CircleConfig, Preprocess, RectangleConfig, RectangleThresholds};
pub use models::{BinaryMask, CircleCandidate, Point, PointF, Raster, RectangleCandidate};
pub use pipeline::DetectionTelemetry;

/// Detect rectangles in a grayscale raster
///
/// # Arguments
/// * `raster` - 8-bit intensities; bright pixels (> 127) are foreground
/// * `config` - Area range, simplification epsilon and variants
///
/// # Returns
/// Deduplicated candidates, largest first. Empty when nothing qualifies.
pub fn detect_rectangles(raster: &Raster, config: &RectangleConfig) -> Vec<RectangleCandidate> {
    pipeline::rectangles_with_telemetry(raster, config).0
}

/// Like [`detect_rectangles`] but also returns stage-level counters
pub fn detect_rectangles_with_telemetry(
    raster: &Raster,
    config: &RectangleConfig,
) -> (Vec<RectangleCandidate>, DetectionTelemetry) {
    pipeline::rectangles_with_telemetry(raster, config)
}

/// Detect circular blobs in a grayscale raster
///
/// # Arguments
/// * `raster` - 8-bit intensities; bright pixels (> 127) are foreground
/// * `config` - Radius range, circularity and confidence thresholds
///
/// # Returns
/// Deduplicated candidates, largest radius first.
pub fn detect_circles(raster: &Raster, config: &CircleConfig) -> Vec<CircleCandidate> {
    pipeline::circles_with_telemetry(raster, config).0
}

/// Like [`detect_circles`] but also returns stage-level counters
pub fn detect_circles_with_telemetry(
    raster: &Raster,
    config: &CircleConfig,
) -> (Vec<CircleCandidate>, DetectionTelemetry) {
    pipeline::circles_with_telemetry(raster, config)
}

/// Rectangle detector holding an immutable configuration
#[derive(Debug, Clone, Default)]
pub struct RectangleDetector {
    config: RectangleConfig,
}

impl RectangleDetector {
    /// Create a detector with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom configuration
    pub fn with_config(config: RectangleConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &RectangleConfig {
        &self.config
    }

    /// Detect rectangles in a raster
    pub fn detect(&self, raster: &Raster) -> Vec<RectangleCandidate> {
        detect_rectangles(raster, &self.config)
    }
}

/// Circle detector holding an immutable configuration
#[derive(Debug, Clone, Default)]
pub struct CircleDetector {
    config: CircleConfig,
}

impl CircleDetector {
    /// Create a detector with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom configuration
    pub fn with_config(config: CircleConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &CircleConfig {
        &self.config
    }

    /// Detect circular blobs in a raster
    pub fn detect(&self, raster: &Raster) -> Vec<CircleCandidate> {
        detect_circles(raster, &self.config)
    }
}
