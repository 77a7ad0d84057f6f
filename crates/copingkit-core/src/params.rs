//! Engine tunables.
//!
//! The defaults mirror [`crate::constants`]; hosts override them through the
//! settings crate.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOUNDARY_SAFETY_MARGIN_MM, CORNER_ANGLE_THRESHOLD_DEG, GROUT_WIDTH_MM,
    MIN_BOUNDARY_CUT_ROW_MM, MIN_CENTER_CUT_FLOOR_MM,
};
use crate::error::{Error, LayoutError, Result};

/// Parameters shared by the layout generator, row builder and boundary clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopingParams {
    /// Grout joint between pavers (mm)
    #[serde(default = "default_grout_width")]
    pub grout_width_mm: f64,
    /// Thinnest cut row emitted against a boundary (mm)
    #[serde(default = "default_min_cut_row")]
    pub min_boundary_cut_row_mm: f64,
    /// Clearance kept from a boundary when clamping a drag (mm)
    #[serde(default = "default_safety_margin")]
    pub boundary_safety_margin_mm: f64,
    /// Floor of the minimum center stripe cut (mm)
    #[serde(default = "default_min_center_cut_floor")]
    pub min_center_cut_floor_mm: f64,
    /// Turning angle that marks an outline vertex as a corner (degrees)
    #[serde(default = "default_corner_angle")]
    pub corner_angle_threshold_deg: f64,
}

fn default_grout_width() -> f64 {
    GROUT_WIDTH_MM
}
fn default_min_cut_row() -> f64 {
    MIN_BOUNDARY_CUT_ROW_MM
}
fn default_safety_margin() -> f64 {
    BOUNDARY_SAFETY_MARGIN_MM
}
fn default_min_center_cut_floor() -> f64 {
    MIN_CENTER_CUT_FLOOR_MM
}
fn default_corner_angle() -> f64 {
    CORNER_ANGLE_THRESHOLD_DEG
}

impl Default for CopingParams {
    fn default() -> Self {
        Self {
            grout_width_mm: default_grout_width(),
            min_boundary_cut_row_mm: default_min_cut_row(),
            boundary_safety_margin_mm: default_safety_margin(),
            min_center_cut_floor_mm: default_min_center_cut_floor(),
            corner_angle_threshold_deg: default_corner_angle(),
        }
    }
}

impl CopingParams {
    /// Minimum acceptable stripe cut for pavers of the given along-edge length.
    pub fn min_center_cut(&self, along_edge_length: f64) -> f64 {
        self.min_center_cut_floor_mm
            .max((along_edge_length / 2.0).floor())
    }

    /// Validate parameter ranges
    ///
    /// Every length must be finite and non-negative; the corner angle must
    /// lie strictly between 0 and 180 degrees.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("grout_width_mm", self.grout_width_mm),
            ("min_boundary_cut_row_mm", self.min_boundary_cut_row_mm),
            ("boundary_safety_margin_mm", self.boundary_safety_margin_mm),
            ("min_center_cut_floor_mm", self.min_center_cut_floor_mm),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, value, "must be a finite value >= 0"));
            }
        }

        let angle = self.corner_angle_threshold_deg;
        if !(angle > 0.0 && angle < 180.0) {
            return Err(invalid(
                "corner_angle_threshold_deg",
                angle,
                "must be between 0 and 180",
            ));
        }

        Ok(())
    }
}

fn invalid(name: &str, value: f64, expected: &str) -> Error {
    LayoutError::InvalidParameter {
        name: name.to_string(),
        value,
        expected: expected.to_string(),
    }
    .into()
}
