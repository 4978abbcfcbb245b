use super::point::{Point, PointF};
use serde::{Deserialize, Serialize};

/// A detected rectangle at arbitrary rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleCandidate {
    /// Center of the rectangle
    pub center: Point,
    /// Length of the longer side pair
    pub width: i32,
    /// Length of the shorter side pair
    pub height: i32,
    /// Direction of the width side in radians, in (-PI, PI]
    pub angle: f64,
}

impl RectangleCandidate {
    /// Area in square pixels
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Corner points regenerated from center, extents and angle,
    /// in traversal order
    pub fn corners(&self) -> [PointF; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let hw = self.width as f64 / 2.0;
        let hh = self.height as f64 / 2.0;
        let cx = self.center.x as f64;
        let cy = self.center.y as f64;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
            PointF::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
        })
    }
}

/// A detected circular blob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCandidate {
    /// Fitted center
    pub center: Point,
    /// Fitted radius
    pub radius: i32,
    /// Fit quality in [0, 1]
    pub confidence: f64,
}

impl CircleCandidate {
    /// Area of the fitted disk
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * (self.radius as f64).powi(2)
    }
}
