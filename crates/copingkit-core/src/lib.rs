//! # copingkit Core
//!
//! Core types, geometry primitives, and error handling for copingkit.
//! Provides the fundamental abstractions the coping layout engine is built
//! on: millimeter points and polygons, corner detection, ray casting against
//! boundaries, paver sizes, unit conversion and the engine's tunable
//! parameters.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod params;
pub mod sizes;
pub mod units;

pub use constants::{
    min_center_cut_mm, BOUNDARY_SAFETY_MARGIN_MM, CORNER_ANGLE_THRESHOLD_DEG, GROUT_WIDTH_MM,
    MIN_BOUNDARY_CUT_ROW_MM,
};

pub use error::{Error, GeometryError, LayoutError, Result, SelectionError};

pub use geometry::{
    bounding_box, corner_rotation, distance, find_corners, label_corners, point_in_polygon,
    polygon_area, polygon_perimeter, ray_polygon_distance, Bounds, CornerDetection, CornerLabel,
    Point,
};

pub use params::CopingParams;

pub use sizes::{PaverConfig, PaverOption, PaverSize};

pub use units::MeasurementSystem;
