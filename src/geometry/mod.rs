pub mod curve;
pub mod half_plane;

pub use curve::{Arc2d, Curve, Curve2d, CurveDomain, Line2d};
pub use half_plane::HalfPlane;
