pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, WallJointError};
pub use operations::joint::{DdBuilder, GeometryInfo, JointKind, JointSet};
pub use topology::WallGraph;
