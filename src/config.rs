//! Detection parameters for the rectangle and circle paths.
//!
//! Both configs are immutable values handed to a stateless detection call.
//! The `with_*` builders consume and return the config, so the last value set
//! before the call wins. Nothing is validated; callers supply coherent ranges.
//!
//! All structs deserialize with `#[serde(default)]`, so a partial JSON/TOML
//! document only needs the fields it overrides.

use serde::{Deserialize, Serialize};

/// Preprocessing applied to the input raster before region extraction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preprocess {
    /// Global threshold at 127
    Threshold,
    /// 3x3 sharpen, then threshold
    EdgeEnhanced,
    /// Threshold, then 3x3 close followed by 3x3 open
    Morphological,
    /// Separable Gaussian blur, then threshold
    Blurred {
        /// Standard deviation of the kernel in pixels
        sigma: f64,
    },
    /// Otsu histogram threshold
    Otsu,
}

/// Tunable gates used by the rectangle classifier and deduplicator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleThresholds {
    /// Allowed distance of |cos| between opposite sides from 1
    pub parallel_tolerance: f64,
    /// Reject when raw contour area / polygon area exceeds this
    pub max_area_ratio: f64,
    /// Reject when perimeter^2 / (4*PI*area) of the contour hull is below this
    pub min_circularity_index: f64,
    /// Per-corner tolerance around PI/2, radians
    pub corner_angle_tolerance: f64,
    /// Corners that must fall within `corner_angle_tolerance`
    pub min_right_angles: usize,
    /// Cap on the mean deviation from PI/2, radians
    pub max_mean_angle_deviation: f64,
    /// Polygon area / bounding-box area floor
    pub min_rectangularity: f64,
    /// Cap on third-order moment skewness of the raw contour
    pub max_skewness: f64,
    /// Dedup radius as a fraction of the mean (w+h)/2 of a pair
    pub dedup_distance_fraction: f64,
}

impl Default for RectangleThresholds {
    fn default() -> Self {
        Self {
            parallel_tolerance: 0.35,
            max_area_ratio: 1.3,
            min_circularity_index: 1.2,
            corner_angle_tolerance: 1.0,
            min_right_angles: 2,
            max_mean_angle_deviation: 0.5,
            min_rectangularity: 0.2,
            max_skewness: 0.15,
            dedup_distance_fraction: 0.5,
        }
    }
}

/// Parameters for [`crate::detect_rectangles`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleConfig {
    /// Smallest accepted polygon area (square pixels)
    pub min_area: f64,
    /// Largest accepted polygon area (square pixels)
    pub max_area: f64,
    /// Douglas-Peucker tolerance as a fraction of contour perimeter
    pub approx_epsilon: f64,
    /// Preprocessing variants whose candidates are fused
    pub preprocess: Vec<Preprocess>,
    /// Regions with fewer pixels are ignored
    pub min_region_pixels: usize,
    /// Boundaries with fewer points are ignored
    pub min_boundary_points: usize,
    /// Contour count above which contours are processed in parallel
    pub parallel_threshold: usize,
    /// Classifier gates
    pub thresholds: RectangleThresholds,
}

impl Default for RectangleConfig {
    fn default() -> Self {
        Self {
            min_area: 500.0,
            max_area: 10000.0,
            approx_epsilon: 0.05,
            preprocess: vec![
                Preprocess::Threshold,
                Preprocess::EdgeEnhanced,
                Preprocess::Morphological,
            ],
            min_region_pixels: 50,
            min_boundary_points: 8,
            parallel_threshold: 10,
            thresholds: RectangleThresholds::default(),
        }
    }
}

impl RectangleConfig {
    /// Set the minimum area
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Set the maximum area
    pub fn with_max_area(mut self, max_area: f64) -> Self {
        self.max_area = max_area;
        self
    }

    /// Set the Douglas-Peucker epsilon (fraction of perimeter)
    pub fn with_approx_epsilon(mut self, approx_epsilon: f64) -> Self {
        self.approx_epsilon = approx_epsilon;
        self
    }

    /// Replace the preprocessing variants
    pub fn with_preprocess(mut self, preprocess: Vec<Preprocess>) -> Self {
        self.preprocess = preprocess;
        self
    }

    /// Replace the classifier gates
    pub fn with_thresholds(mut self, thresholds: RectangleThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the contour count that switches to parallel processing
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

/// Parameters for [`crate::detect_circles`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    /// Smallest accepted radius
    pub min_radius: i32,
    /// Largest accepted radius
    pub max_radius: i32,
    /// Minimum circularity, 1.0 for a perfect disk
    pub circularity_threshold: f64,
    /// Minimum fit confidence
    pub confidence_threshold: f64,
    /// Preprocessing variants whose candidates are fused
    pub preprocess: Vec<Preprocess>,
    /// Regions with fewer pixels are ignored
    pub min_region_pixels: usize,
    /// Boundaries with fewer points are ignored
    pub min_boundary_points: usize,
    /// Fraction of boundary points that must sit near the fitted radius
    pub min_inlier_fraction: f64,
    /// Dedup radius as a fraction of the mean diameter of a pair
    pub dedup_distance_fraction: f64,
    /// Contour count above which blobs are processed in parallel
    pub parallel_threshold: usize,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            min_radius: 10,
            max_radius: 100,
            circularity_threshold: 0.8,
            confidence_threshold: 0.7,
            preprocess: vec![Preprocess::Blurred { sigma: 1.0 }, Preprocess::Morphological],
            min_region_pixels: 20,
            min_boundary_points: 8,
            min_inlier_fraction: 0.7,
            dedup_distance_fraction: 0.7,
            parallel_threshold: 10,
        }
    }
}

impl CircleConfig {
    /// Set the minimum radius
    pub fn with_min_radius(mut self, min_radius: i32) -> Self {
        self.min_radius = min_radius;
        self
    }

    /// Set the maximum radius
    pub fn with_max_radius(mut self, max_radius: i32) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Set the circularity threshold
    pub fn with_circularity_threshold(mut self, circularity_threshold: f64) -> Self {
        self.circularity_threshold = circularity_threshold;
        self
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, confidence_threshold: f64) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    /// Replace the preprocessing variants
    pub fn with_preprocess(mut self, preprocess: Vec<Preprocess>) -> Self {
        self.preprocess = preprocess;
        self
    }

    /// Set the contour count that switches to parallel processing
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_defaults() {
        let config = RectangleConfig::default();
        assert_eq!(config.min_area, 500.0);
        assert_eq!(config.max_area, 10000.0);
        assert_eq!(config.approx_epsilon, 0.05);
        assert_eq!(config.preprocess.len(), 3);
    }

    #[test]
    fn test_last_setter_wins() {
        let config = RectangleConfig::default()
            .with_min_area(100.0)
            .with_min_area(200.0)
            .with_max_area(8000.0);
        assert_eq!(config.min_area, 200.0);
        assert_eq!(config.max_area, 8000.0);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: CircleConfig =
            serde_json::from_str(r#"{"min_radius": 5, "preprocess": [{"blurred": {"sigma": 2.0}}]}"#)
                .unwrap();
        assert_eq!(config.min_radius, 5);
        assert_eq!(config.max_radius, 100);
        assert_eq!(config.preprocess, vec![Preprocess::Blurred { sigma: 2.0 }]);

        let rect: RectangleConfig =
            serde_json::from_str(r#"{"thresholds": {"min_rectangularity": 0.25}}"#).unwrap();
        assert_eq!(rect.thresholds.min_rectangularity, 0.25);
        assert_eq!(rect.thresholds.parallel_tolerance, 0.35);
    }
}
