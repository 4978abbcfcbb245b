pub mod mask;
pub mod point;
pub mod raster;
pub mod shapes;

pub use mask::BinaryMask;
pub use point::{Point, PointF};
pub use raster::Raster;
pub use shapes::{CircleCandidate, RectangleCandidate};
