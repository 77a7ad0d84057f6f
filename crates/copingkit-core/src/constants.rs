//! Fixed layout constants shared across the engine.
//!
//! All lengths are millimeters.

/// Grout joint between neighbouring pavers.
pub const GROUT_WIDTH_MM: f64 = 5.0;

/// Thinnest continuous cut row emitted against a boundary.
pub const MIN_BOUNDARY_CUT_ROW_MM: f64 = 100.0;

/// Clearance kept between a clamped extension and the boundary it hit.
pub const BOUNDARY_SAFETY_MARGIN_MM: f64 = 2.0;

/// Floor of the minimum acceptable center stripe cut.
pub const MIN_CENTER_CUT_FLOOR_MM: f64 = 200.0;

/// Turning angle above which an outline vertex counts as a corner.
pub const CORNER_ANGLE_THRESHOLD_DEG: f64 = 45.0;

/// Nudge used in place of a vanishing denominator during ray casting.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Minimum acceptable stripe cut for a paver of the given along-edge length.
///
/// `max(200, floor(along_edge / 2))`
pub fn min_center_cut_mm(along_edge_length: f64) -> f64 {
    MIN_CENTER_CUT_FLOOR_MM.max((along_edge_length / 2.0).floor())
}
