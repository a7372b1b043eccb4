mod arm;
mod assembly;
mod builder;
mod constructions;
mod convexity;
pub mod curve_util;
mod joint_point;
mod joint_type;
mod resolver;

pub use assembly::{gen_joint_path, gen_wall_geometry_path, make_geometry_info, GeometryInfo};
pub use builder::{
    DdBuilder, DEFAULT_ANGTOL, DEFAULT_JOINT_PATH_LENGTH, DEFAULT_LENGTHTOL, DEFAULT_LIMIT_RATIO,
    DEFAULT_SEARCH_RADIUS,
};
pub use convexity::{get_endpoint_der_upright, is_convex};
pub use curve_util::{
    curve_inter, curve_inter2, point_inside_offset_region, points_sort_by_curve, reg_check,
    OffsetRegionHit,
};
pub use joint_point::{get_move_point, JointGenerationResult};
pub use joint_type::{AngleType, JointKind, JointSet, PositionType};
pub use resolver::{validity_check, ArmPair, JointResolution};
