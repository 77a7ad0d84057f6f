//! Boundary clamp and validator.
//!
//! While dragging, the requested distance is clamped to the nearest boundary
//! hit minus a safety margin. On commit every generated paver is tested
//! against each boundary and dropped (never resized) when it leaves the
//! permitted region.

use serde::{Deserialize, Serialize};

use copingkit_core::geometry::{point_in_polygon, polygons_cross, validate_polygon};
use copingkit_core::{ray_polygon_distance, CopingParams, GeometryError, Point};

use crate::paver::{Edge, Paver};

/// How a boundary constrains pavers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Property line or enclosure; pavers must stay inside
    #[default]
    Containing,
    /// House or fence footprint; pavers must stay outside
    Obstacle,
}

/// A read-only closed polygon limiting extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    #[serde(default)]
    pub kind: BoundaryKind,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BoundaryPolygon {
    pub fn containing(points: Vec<Point>) -> Self {
        Self {
            kind: BoundaryKind::Containing,
            points,
            label: None,
        }
    }

    pub fn obstacle(points: Vec<Point>) -> Self {
        Self {
            kind: BoundaryKind::Obstacle,
            points,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_polygon(&self.points)
    }

    /// Whether `paver` lies in the region this boundary permits.
    ///
    /// Containing: all four corners inside and no edge crossing.
    /// Obstacle: no corner inside, no obstacle vertex inside the paver, and
    /// no edge crossing.
    pub fn permits(&self, paver: &Paver) -> bool {
        let footprint = paver.footprint();
        match self.kind {
            BoundaryKind::Containing => {
                footprint
                    .iter()
                    .all(|p| point_in_polygon(*p, &self.points))
                    && !polygons_cross(&footprint, &self.points)
            }
            BoundaryKind::Obstacle => {
                !footprint
                    .iter()
                    .any(|p| point_in_polygon(*p, &self.points))
                    && !self
                        .points
                        .iter()
                        .any(|v| point_in_polygon(*v, &footprint))
                    && !polygons_cross(&footprint, &self.points)
            }
        }
    }
}

/// Outcome of clamping a drag distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampResult {
    pub requested: f64,
    pub clamped: f64,
    /// Nearest boundary hit, infinite when nothing is in the way
    pub max_distance: f64,
    pub boundary_reached: bool,
}

/// Outcome of the commit-time filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryFilterResult {
    pub kept: Vec<Paver>,
    pub dropped_ids: Vec<String>,
    pub truncated: bool,
}

/// Sample points on the far side of `paver` along `(dx, dy)`: the outer
/// corners and, when the outer side is an edge, its midpoint.
fn outer_edge_samples(paver: &Paver, dx: f64, dy: f64) -> Vec<Point> {
    let footprint = paver.footprint();
    let (_, far) = paver.extent_along(dx, dy);
    let mut samples: Vec<Point> = footprint
        .iter()
        .filter(|p| p.x * dx + p.y * dy >= far - 1e-6)
        .copied()
        .collect();
    if let &[a, b] = samples.as_slice() {
        samples.push(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0));
    }
    samples
}

/// Distance the row can travel along `direction` before touching any
/// boundary. Infinite when no boundary is hit.
pub fn max_extension_distance(
    row: &[Paver],
    direction: Edge,
    boundaries: &[BoundaryPolygon],
) -> f64 {
    let (dx, dy) = direction.direction_vector();
    let mut nearest = f64::INFINITY;
    for paver in row {
        for origin in outer_edge_samples(paver, dx, dy) {
            for boundary in boundaries {
                match ray_polygon_distance(origin, (dx, dy), &boundary.points) {
                    Ok(Some(d)) => nearest = nearest.min(d),
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Skipping boundary ray: {}", e),
                }
            }
        }
    }
    nearest
}

/// Clamps `requested` to the nearest boundary hit minus the safety margin,
/// never below zero.
pub fn clamp_drag_distance(
    requested: f64,
    row: &[Paver],
    direction: Edge,
    boundaries: &[BoundaryPolygon],
    params: &CopingParams,
) -> ClampResult {
    let requested = if requested.is_finite() {
        requested.max(0.0)
    } else {
        0.0
    };
    let max_distance = max_extension_distance(row, direction, boundaries);
    let clamped = requested
        .min(max_distance - params.boundary_safety_margin_mm)
        .max(0.0);
    ClampResult {
        requested,
        clamped,
        max_distance,
        boundary_reached: clamped < requested,
    }
}

/// Keeps the pavers every boundary permits and reports the rest.
pub fn filter_pavers(pavers: Vec<Paver>, boundaries: &[BoundaryPolygon]) -> BoundaryFilterResult {
    let mut result = BoundaryFilterResult::default();
    for paver in pavers {
        if boundaries.iter().all(|b| b.permits(&paver)) {
            result.kept.push(paver);
        } else {
            result.dropped_ids.push(paver.id);
        }
    }
    result.truncated = !result.dropped_ids.is_empty();
    if result.truncated {
        tracing::warn!(
            "Dropped {} pavers outside the permitted boundary",
            result.dropped_ids.len()
        );
    }
    result
}
