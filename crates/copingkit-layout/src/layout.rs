//! Corner-first coping layout generator.
//!
//! A corner paver goes down at each of the four detected corners first. Full
//! pavers are then walked inward from both ends of every side, and the gap
//! left in the middle is split into two equal stripe cuts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use copingkit_core::geometry::{
    find_corners_with_threshold, label_corners, normalize_polygon, polygon_perimeter,
    polygon_signed_area, validate_polygon,
};
use copingkit_core::units::{format_area, format_length, mm2_to_m2, mm_to_m};
use copingkit_core::{
    corner_rotation, CopingParams, Error, LayoutError, MeasurementSystem, PaverConfig,
    PaverOption, PaverSize, Point, Result,
};

use crate::paver::{normalize_rotation, Edge, Paver, PaverCategory};

/// Validation outcome attached to every generated layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Default for LayoutValidation {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl LayoutValidation {
    pub fn error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Counts and areas derived from a paver list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    pub total_pavers: usize,
    pub corner_pavers: usize,
    pub full_pavers: usize,
    pub stripe_pavers: usize,
    /// Non-corner pavers per compass edge
    pub per_side_counts: BTreeMap<Edge, usize>,
    pub total_area_m2: f64,
    pub perimeter_m: f64,
}

impl Measurements {
    /// Measures `pavers` against an outline perimeter given in millimeters.
    pub fn from_pavers(pavers: &[Paver], perimeter_mm: f64) -> Self {
        let mut m = Measurements {
            total_pavers: pavers.len(),
            perimeter_m: mm_to_m(perimeter_mm),
            ..Default::default()
        };
        let mut area_mm2 = 0.0;
        for paver in pavers {
            match paver.category {
                PaverCategory::Corner => m.corner_pavers += 1,
                PaverCategory::Full => m.full_pavers += 1,
                PaverCategory::Stripe => m.stripe_pavers += 1,
            }
            if !paver.is_corner {
                *m.per_side_counts.entry(paver.edge.compass()).or_insert(0) += 1;
            }
            area_mm2 += paver.area_mm2();
        }
        m.total_area_m2 = mm2_to_m2(area_mm2);
        m
    }

    /// One-line material summary in the host's display units.
    pub fn summary(&self, system: MeasurementSystem) -> String {
        format!(
            "{} pavers ({} corner, {} full, {} stripe), {} of coping, {} perimeter",
            self.total_pavers,
            self.corner_pavers,
            self.full_pavers,
            self.stripe_pavers,
            format_area(self.total_area_m2, system),
            format_length(self.perimeter_m, system),
        )
    }
}

/// Generated coping ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopingLayout {
    pub corner_pavers: Vec<Paver>,
    pub full_pavers: Vec<Paver>,
    pub stripe_pavers: Vec<Paver>,
    pub measurements: Measurements,
    pub validation: LayoutValidation,
    /// Outline after normalization, interior on the left of each edge
    pub outline: Vec<Point>,
}

impl CopingLayout {
    /// Empty layout carrying a single validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut validation = LayoutValidation::default();
        validation.error(message);
        Self {
            corner_pavers: Vec::new(),
            full_pavers: Vec::new(),
            stripe_pavers: Vec::new(),
            measurements: Measurements::default(),
            validation,
            outline: Vec::new(),
        }
    }

    /// Corner, full and stripe pavers in that order.
    pub fn all_pavers(&self) -> Vec<Paver> {
        self.corner_pavers
            .iter()
            .chain(&self.full_pavers)
            .chain(&self.stripe_pavers)
            .cloned()
            .collect()
    }

    pub fn total_pavers(&self) -> usize {
        self.corner_pavers.len() + self.full_pavers.len() + self.stripe_pavers.len()
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    pub fn find(&self, id: &str) -> Option<&Paver> {
        self.corner_pavers
            .iter()
            .chain(&self.full_pavers)
            .chain(&self.stripe_pavers)
            .find(|p| p.id == id)
    }
}

/// Generates a layout with the default engine parameters.
pub fn generate_layout(outline: &[Point], config: &PaverConfig) -> CopingLayout {
    generate_layout_with_params(outline, config, &CopingParams::default())
}

/// Generates a layout from a named preset. `none` disables coping.
pub fn generate_from_option(
    outline: &[Point],
    option: PaverOption,
    params: &CopingParams,
) -> Result<CopingLayout> {
    let config = option
        .paver_config()
        .ok_or(Error::Layout(LayoutError::CopingDisabled))?;
    Ok(generate_layout_with_params(outline, &config, params))
}

pub fn generate_layout_with_params(
    outline: &[Point],
    config: &PaverConfig,
    params: &CopingParams,
) -> CopingLayout {
    if let Err(e) = config.validate() {
        tracing::warn!("Refusing layout: {}", e);
        return CopingLayout::invalid(e.to_string());
    }

    let mut outline = normalize_polygon(outline);
    if let Err(e) = validate_polygon(&outline) {
        tracing::warn!("Refusing layout: {}", e);
        return CopingLayout::invalid(format!("Invalid outline: {}", e));
    }
    let signed_area = polygon_signed_area(&outline);
    if signed_area.abs() < f64::EPSILON {
        return CopingLayout::invalid("Invalid outline: polygon has zero area");
    }
    if signed_area < 0.0 {
        outline.reverse();
    }

    let detection = match find_corners_with_threshold(&outline, params.corner_angle_threshold_deg)
    {
        Ok(d) => d,
        Err(e) => return CopingLayout::invalid(format!("Invalid outline: {}", e)),
    };

    let mut validation = LayoutValidation::default();
    if detection.fallback {
        tracing::warn!(
            "Corner detection fell back to the first 4 outline points ({} vertices)",
            outline.len()
        );
        validation.warn(format!(
            "Could not detect exactly 4 corners on a {}-vertex outline; using the first 4 points",
            outline.len()
        ));
    }

    let corners = detection.corners;
    let labels = label_corners(&corners);
    let edges = side_edges(&corners, &mut validation);

    let corner_pavers: Vec<Paver> = (0..4)
        .map(|i| Paver {
            id: format!("corner-{}", labels[i].tag()),
            position: corners[i],
            size: config.corner_size,
            rotation: corner_rotation(labels[i]),
            category: PaverCategory::Corner,
            edge: edges[i],
            row_index: 0,
            column_index: 0,
            is_corner: true,
            extension_direction: None,
            is_partial: false,
            nominal_size: config.corner_size,
            extension_root: None,
        })
        .collect();

    let mut full_pavers = Vec::new();
    let mut stripe_pavers = Vec::new();
    for i in 0..4 {
        let (start, end) = (corners[i], corners[(i + 1) % 4]);
        let side = SideWalk {
            start,
            end,
            edge: edges[i],
            start_clearance: corner_clearance(&corner_pavers[i], start, end, config),
            end_clearance: corner_clearance(&corner_pavers[(i + 1) % 4], end, start, config),
            config,
            params,
        };
        side.place(&mut full_pavers, &mut stripe_pavers, &mut validation);
    }

    let mut pavers = corner_pavers.clone();
    pavers.extend(full_pavers.iter().cloned());
    pavers.extend(stripe_pavers.iter().cloned());
    let measurements = Measurements::from_pavers(&pavers, polygon_perimeter(&outline));

    tracing::debug!(
        "Generated coping layout: {} corner, {} full, {} stripe pavers",
        corner_pavers.len(),
        full_pavers.len(),
        stripe_pavers.len()
    );

    CopingLayout {
        corner_pavers,
        full_pavers,
        stripe_pavers,
        measurements,
        validation,
        outline,
    }
}

/// Compass label for each side `corner[i] -> corner[i + 1]`.
fn side_edges(corners: &[Point; 4], validation: &mut LayoutValidation) -> [Edge; 4] {
    let edges: [Edge; 4] = std::array::from_fn(|i| {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        // Interior is on the left, so the outward normal is the right-hand one.
        Edge::from_outward_normal(b.y - a.y, -(b.x - a.x))
    });

    let distinct = Edge::COMPASS
        .iter()
        .all(|e| edges.iter().filter(|x| *x == e).count() == 1);
    if distinct {
        edges
    } else {
        tracing::warn!("Side orientations are ambiguous: {:?}", edges);
        validation.warn("Could not label sides by orientation; using north, east, south, west");
        Edge::COMPASS
    }
}

/// Distance from `from` toward `toward` that the walk must keep clear: the
/// corner paver's footprint along the side, and at least the depth of the
/// neighbouring side's band.
fn corner_clearance(corner: &Paver, from: Point, toward: Point, config: &PaverConfig) -> f64 {
    let band_depth = config.full_size.height;
    let length = from.distance_to(&toward);
    if length <= f64::EPSILON {
        return band_depth;
    }
    let (ux, uy) = ((toward.x - from.x) / length, (toward.y - from.y) / length);
    let (_, far) = corner.extent_along(ux, uy);
    let extent = far - (from.x * ux + from.y * uy);
    extent.max(band_depth)
}

/// One side of the ring, walked from both corners toward the middle.
struct SideWalk<'a> {
    start: Point,
    end: Point,
    edge: Edge,
    /// Along-side span reserved for the corner junction at `start`
    start_clearance: f64,
    /// Same, measured back from `end`
    end_clearance: f64,
    config: &'a PaverConfig,
    params: &'a CopingParams,
}

impl SideWalk<'_> {
    fn place(
        &self,
        full_pavers: &mut Vec<Paver>,
        stripe_pavers: &mut Vec<Paver>,
        validation: &mut LayoutValidation,
    ) {
        let length = self.start.distance_to(&self.end);
        if length <= f64::EPSILON {
            validation.warn(format!("The {} side has zero length", self.edge));
            return;
        }

        let grout = self.params.grout_width_mm;
        let full_width = self.config.full_size.width;
        let step = full_width + grout;
        let half = length / 2.0;

        let mut from_start = Vec::new();
        let mut dist_start = self.start_clearance + grout;
        while dist_start + full_width + grout < half {
            from_start.push(dist_start);
            dist_start += step;
        }

        let mut from_end = Vec::new();
        let mut dist_end = self.end_clearance + grout;
        while dist_end + full_width + grout < half {
            from_end.push(length - dist_end - full_width);
            dist_end += step;
        }

        let gap = length - dist_start - dist_end;
        let mut stripe_width = (gap - grout) / 2.0;
        if stripe_width <= 0.0 {
            stripe_width = 0.0;
            validation.warn(format!(
                "The {} side is too short for a center stripe",
                self.edge
            ));
        } else if stripe_width < self.params.min_center_cut(full_width) {
            validation.warn(format!(
                "Stripe cut on the {} side is {:.1} mm, below the {:.0} mm minimum",
                self.edge,
                stripe_width,
                self.params.min_center_cut(full_width)
            ));
        }

        // Column order follows the edge: start walk, stripes, end walk.
        let mut column = 1;
        for (k, s) in from_start.iter().enumerate() {
            full_pavers.push(self.paver(
                format!("full-{}-s{}", self.edge, k),
                *s,
                full_width,
                PaverCategory::Full,
                column,
            ));
            column += 1;
        }
        if stripe_width > 0.0 {
            let offsets = [dist_start, dist_start + stripe_width + grout];
            for (suffix, s) in ["a", "b"].iter().zip(offsets) {
                stripe_pavers.push(self.paver(
                    format!("stripe-{}-{}", self.edge, suffix),
                    s,
                    stripe_width,
                    PaverCategory::Stripe,
                    column,
                ));
                column += 1;
            }
        }
        for (k, s) in from_end.iter().enumerate().rev() {
            full_pavers.push(self.paver(
                format!("full-{}-e{}", self.edge, k),
                *s,
                full_width,
                PaverCategory::Full,
                column,
            ));
            column += 1;
        }

        tracing::debug!(
            "{} side: length {:.1} mm, {} + {} full pavers, stripe {:.1} mm",
            self.edge,
            length,
            from_start.len(),
            from_end.len(),
            stripe_width
        );
    }

    /// Paver covering `[along, along + width]` of this side in row 0.
    fn paver(
        &self,
        id: String,
        along: f64,
        width: f64,
        category: PaverCategory,
        column_index: u32,
    ) -> Paver {
        let length = self.start.distance_to(&self.end);
        let ux = (self.end.x - self.start.x) / length;
        let uy = (self.end.y - self.start.y) / length;
        let theta = uy.atan2(ux).to_degrees();
        let depth = self.config.full_size.height;

        let (size, rotation, offset) = if self.edge.is_side() {
            (PaverSize::new(width, depth), theta, along)
        } else {
            (PaverSize::new(depth, width), theta + 90.0, along + width)
        };

        Paver {
            id,
            position: self.start.offset(ux, uy, offset),
            size,
            rotation: normalize_rotation(rotation),
            category,
            edge: self.edge,
            row_index: 0,
            column_index,
            is_corner: false,
            extension_direction: None,
            is_partial: false,
            nominal_size: self.config.full_size,
            extension_root: None,
        }
    }
}
