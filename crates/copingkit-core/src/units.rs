//! Unit conversion utilities
//!
//! Geometry is millimeters throughout the engine. Areas and perimeters are
//! reported in square meters and meters at the boundary, and formatted in
//! feet for hosts configured for imperial display.

use serde::{Deserialize, Serialize};

const MM2_PER_M2: f64 = 1_000_000.0;
const M_PER_FT: f64 = 0.3048;
const M2_PER_FT2: f64 = 0.092_903_04;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (m, m²)
    #[default]
    Metric,
    /// Imperial system (ft, ft²)
    Imperial,
}

/// Millimeters to meters
pub fn mm_to_m(value_mm: f64) -> f64 {
    value_mm / 1000.0
}

/// Square millimeters to square meters
pub fn mm2_to_m2(value_mm2: f64) -> f64 {
    value_mm2 / MM2_PER_M2
}

/// Format a length for display
///
/// * `value_m` - Length in meters
/// * `system` - Target measurement system
pub fn format_length(value_m: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} m", value_m),
        MeasurementSystem::Imperial => format!("{:.2} ft", value_m / M_PER_FT),
    }
}

/// Format an area for display
///
/// * `value_m2` - Area in square meters
/// * `system` - Target measurement system
pub fn format_area(value_m2: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} m²", value_m2),
        MeasurementSystem::Imperial => format!("{:.2} ft²", value_m2 / M2_PER_FT2),
    }
}
