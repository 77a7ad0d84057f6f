//! Extension row builder.
//!
//! Turns a drag distance over a selected row into additional rows stacked
//! outward (or inward) from it, finishing with one continuous cut row when a
//! boundary stops further full rows.

use serde::{Deserialize, Serialize};

use copingkit_core::CopingParams;

use crate::paver::{Edge, Paver, PaverCategory};
use crate::selection_manager::CornerDirectionOverrides;

/// Which way rows grow from the selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionSense {
    /// Away from the pool
    #[default]
    Outward,
    /// Toward the pool interior
    Inward,
}

/// Row counts derived from a drag distance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RowPlan {
    pub full_rows: u32,
    /// Depth of the trailing continuous cut row, if any
    pub cut_row_depth: Option<f64>,
}

impl RowPlan {
    pub fn is_empty(&self) -> bool {
        self.full_rows == 0 && self.cut_row_depth.is_none()
    }

    pub fn row_count(&self) -> u32 {
        self.full_rows + u32::from(self.cut_row_depth.is_some())
    }
}

/// Rows and pavers produced for one extension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionResult {
    pub direction: Option<Edge>,
    pub full_rows_to_add: u32,
    pub cut_row_depth: Option<f64>,
    pub new_pavers: Vec<Paver>,
}

/// A selection can be extended when it holds one paver, or when every
/// paver sits in the same row of one edge. Corners count as part of both
/// edges they join.
pub fn can_extend(selection: &[Paver]) -> bool {
    match selection {
        [] => false,
        [_] => true,
        [first, rest @ ..] => {
            shared_edge(selection).is_some()
                && rest.iter().all(|p| p.row_index == first.row_index)
        }
    }
}

/// Edge every paver in `selection` lies on, if there is one.
pub fn shared_edge(selection: &[Paver]) -> Option<Edge> {
    let first = selection.first()?;
    let mut candidates = vec![first.edge.compass()];
    if first.is_corner {
        candidates.push(first.edge.compass().preceding());
    }
    candidates
        .into_iter()
        .find(|edge| selection.iter().all(|p| p.on_edge(*edge)))
}

/// Direction rows grow from `paver`: its own extension direction, then a
/// recorded corner override, then its edge.
pub fn extension_direction(paver: &Paver, overrides: &CornerDirectionOverrides) -> Edge {
    paver
        .extension_direction
        .or_else(|| overrides.get(&paver.id))
        .unwrap_or(paver.edge)
}

/// Outward direction of a whole selection.
///
/// A lone paver decides for itself. In a row the edge pavers decide, so a
/// corner grouped with either of its sides follows that side.
pub fn selection_direction(
    selection: &[Paver],
    overrides: &CornerDirectionOverrides,
) -> Option<Edge> {
    match selection {
        [] => None,
        [only] => Some(extension_direction(only, overrides)),
        _ => match selection.iter().find(|p| !p.is_corner) {
            Some(paver) => Some(extension_direction(paver, overrides)),
            None => shared_edge(selection),
        },
    }
}

/// Edge rows actually grow toward: `outward` itself, or its opposite when
/// extending inward.
pub fn growth_direction(outward: Edge, sense: ExtensionSense) -> Edge {
    match sense {
        ExtensionSense::Outward => outward,
        ExtensionSense::Inward => outward.opposite(),
    }
}

/// Depth of one row of the selection: paver height on side edges, width on
/// end edges. `None` for an empty selection.
pub fn row_depth(selection: &[Paver]) -> Option<f64> {
    row_reference(selection).map(Paver::depth)
}

/// Row depth measured along the direction rows will grow in. Equals
/// [`row_depth`] for edge pavers; corners are measured geometrically.
pub fn row_depth_along(selection: &[Paver], direction: Edge) -> Option<f64> {
    let (dx, dy) = direction.direction_vector();
    row_reference(selection).map(|p| p.depth_along(dx, dy))
}

fn row_reference(selection: &[Paver]) -> Option<&Paver> {
    selection
        .iter()
        .find(|p| !p.is_corner)
        .or_else(|| selection.first())
}

/// Splits a drag distance into full rows and an optional cut row.
///
/// Without a boundary the remainder past the last full row is ignored. With
/// one, the remainder becomes a cut row of `remaining - grout` when that is
/// at least `min_boundary_cut_row_mm`; a remainder thinner than the grout
/// instead borrows the last full row.
pub fn rows_from_drag_distance(
    drag_distance: f64,
    row_depth: f64,
    boundary_reached: bool,
    params: &CopingParams,
) -> RowPlan {
    if !row_depth.is_finite() || row_depth <= 0.0 {
        tracing::warn!("Aborting extension: invalid row depth {}", row_depth);
        return RowPlan::default();
    }
    if !drag_distance.is_finite() || drag_distance <= 0.0 {
        return RowPlan::default();
    }

    let mut full_rows = (drag_distance / row_depth).floor() as u32;
    let mut cut_row_depth = None;

    if boundary_reached {
        let grout = params.grout_width_mm;
        let min_cut = params.min_boundary_cut_row_mm;
        let remaining = drag_distance - f64::from(full_rows) * row_depth;
        let cut = remaining - grout;
        if cut >= min_cut {
            cut_row_depth = Some(cut);
        } else if full_rows > 0 {
            let borrowed = remaining + row_depth - grout;
            if borrowed < row_depth && borrowed >= min_cut {
                full_rows -= 1;
                cut_row_depth = Some(borrowed);
            } else {
                tracing::debug!("Discarding {:.1} mm remainder at boundary", remaining);
            }
        }
    }

    RowPlan {
        full_rows,
        cut_row_depth,
    }
}

/// Places the planned rows past `base` along `direction`.
///
/// Full row `k` occupies `[(k - 1) * depth, k * depth]` beyond the base row's
/// far edge; the cut row starts one grout gap after the last full row. Every
/// source is brought to the row depth first, so a corner of another size
/// stays flush with its row.
pub fn build_row_pavers(
    base: &[Paver],
    direction: Edge,
    sense: ExtensionSense,
    plan: &RowPlan,
    params: &CopingParams,
) -> Vec<Paver> {
    let (dx, dy) = direction.direction_vector();
    let Some(depth) = row_depth_along(base, direction) else {
        return Vec::new();
    };
    let mut pavers = Vec::with_capacity(base.len() * plan.row_count() as usize);

    for source in base {
        let (_, far) = source.extent_along(dx, dy);
        let aligned = if (source.depth_along(dx, dy) - depth).abs() > 1e-9 {
            source.with_depth_along(dx, dy, depth)
        } else {
            source.clone()
        };
        let (near, _) = aligned.extent_along(dx, dy);

        for k in 1..=plan.full_rows {
            let shift = far + f64::from(k - 1) * depth - near;
            let paver = aligned.translated(dx * shift, dy * shift);
            pavers.push(extension_paver(paver, source, direction, sense, k, false));
        }

        if let Some(cut) = plan.cut_row_depth {
            let k = plan.full_rows + 1;
            let start = far + f64::from(plan.full_rows) * depth + params.grout_width_mm;
            let resized = source.with_depth_along(dx, dy, cut);
            let (lo, _) = resized.extent_along(dx, dy);
            let shift = start - lo;
            let paver = resized.translated(dx * shift, dy * shift);
            pavers.push(extension_paver(paver, source, direction, sense, k, true));
        }
    }
    pavers
}

fn extension_paver(
    mut paver: Paver,
    source: &Paver,
    direction: Edge,
    sense: ExtensionSense,
    rows_out: u32,
    is_partial: bool,
) -> Paver {
    let row_index = source.row_index + rows_out;
    let root = source.extension_root.clone().unwrap_or_else(|| {
        if source.is_corner {
            format!("{}-{}", source.id, direction.compass())
        } else {
            source.id.clone()
        }
    });
    paver.id = match sense {
        ExtensionSense::Outward => format!("ext-{}-row{}", root, row_index),
        ExtensionSense::Inward => format!("ext-{}-in-row{}", root, row_index),
    };
    paver.extension_root = Some(root);
    paver.row_index = row_index;
    paver.extension_direction = Some(direction);
    paver.is_partial = is_partial;
    if source.is_corner {
        paver.is_corner = false;
        paver.category = PaverCategory::Full;
        paver.edge = direction;
    }
    paver
}

/// Plans and places an extension of `selection` by `drag_distance`.
///
/// The direction comes from [`selection_direction`]; inward extension uses
/// the opposite edge.
pub fn extend_selection(
    selection: &[Paver],
    overrides: &CornerDirectionOverrides,
    sense: ExtensionSense,
    drag_distance: f64,
    boundary_reached: bool,
    params: &CopingParams,
) -> ExtensionResult {
    let Some(outward) = selection_direction(selection, overrides) else {
        return ExtensionResult::default();
    };
    let direction = growth_direction(outward, sense);
    let depth = row_depth_along(selection, direction).unwrap_or(0.0);
    let plan = rows_from_drag_distance(drag_distance, depth, boundary_reached, params);
    let new_pavers = build_row_pavers(selection, direction, sense, &plan, params);

    tracing::debug!(
        "Extension {} by {:.1} mm: {} full rows, cut {:?}, {} pavers",
        direction,
        drag_distance,
        plan.full_rows,
        plan.cut_row_depth,
        new_pavers.len()
    );

    ExtensionResult {
        direction: Some(direction),
        full_rows_to_add: plan.full_rows,
        cut_row_depth: plan.cut_row_depth,
        new_pavers,
    }
}
