//! Drag-to-extend gesture.
//!
//! Drag-move recomputes a preview from scratch on every call, drag-end
//! commits it atomically and cancel throws it away. The committed paver list
//! is only ever replaced, never edited in place.

use std::collections::HashSet;

use copingkit_core::{CopingParams, Result};

use crate::boundary::{clamp_drag_distance, filter_pavers, BoundaryPolygon, ClampResult};
use crate::extension::{extend_selection, growth_direction, ExtensionSense};
use crate::paver::{Edge, Paver};
use crate::selection_manager::SelectionState;

/// What a drag-move would add if committed now.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionPreview {
    pub direction: Edge,
    pub sense: ExtensionSense,
    pub clamp: ClampResult,
    pub full_rows: u32,
    pub cut_row_depth: Option<f64>,
    pub pavers: Vec<Paver>,
}

/// Outcome of a drag-end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommitResult {
    /// New committed paver list
    pub pavers: Vec<Paver>,
    pub added_ids: Vec<String>,
    /// Preview pavers rejected by a boundary
    pub dropped_ids: Vec<String>,
    pub truncated: bool,
}

/// Recomputes the extension preview for a drag of `drag_distance`.
///
/// Calling this repeatedly with the same input yields the same state; the
/// previous preview is replaced, never accumulated into.
pub fn preview_extension(
    state: SelectionState,
    committed: &[Paver],
    drag_distance: f64,
    sense: ExtensionSense,
    boundaries: &[BoundaryPolygon],
    params: &CopingParams,
) -> Result<(SelectionState, ExtensionPreview)> {
    let resolved = state.resolve_extension(committed)?;
    let direction = growth_direction(resolved.direction, sense);
    let clamp = clamp_drag_distance(drag_distance, &resolved.pavers, direction, boundaries, params);

    let extension = extend_selection(
        &resolved.pavers,
        state.corner_direction_overrides(),
        sense,
        clamp.clamped,
        clamp.boundary_reached,
        params,
    );

    let preview = ExtensionPreview {
        direction,
        sense,
        clamp,
        full_rows: extension.full_rows_to_add,
        cut_row_depth: extension.cut_row_depth,
        pavers: extension.new_pavers,
    };
    let state = state.with_preview(preview.pavers.clone());
    Ok((state, preview))
}

/// Commits the current preview.
///
/// Preview pavers outside the boundaries are dropped. The rest replace any
/// committed paver with the same id and are appended otherwise. The
/// selection itself is kept so the host can keep dragging the same row.
pub fn commit_extension(
    state: SelectionState,
    committed: &[Paver],
    boundaries: &[BoundaryPolygon],
) -> (SelectionState, CommitResult) {
    let preview = state.extension_pavers().to_vec();
    let state = state.discard_preview();
    if preview.is_empty() {
        return (
            state,
            CommitResult {
                pavers: committed.to_vec(),
                ..Default::default()
            },
        );
    }

    let filtered = filter_pavers(preview, boundaries);
    let mut seen: HashSet<&str> = HashSet::new();
    let kept: Vec<&Paver> = filtered
        .kept
        .iter()
        .filter(|p| seen.insert(p.id.as_str()))
        .collect();

    let mut pavers: Vec<Paver> = committed
        .iter()
        .filter(|p| !seen.contains(p.id.as_str()))
        .cloned()
        .collect();
    pavers.extend(kept.iter().map(|p| (*p).clone()));

    let added_ids: Vec<String> = kept.iter().map(|p| p.id.clone()).collect();
    tracing::info!(
        "Committed extension: {} pavers added, {} dropped",
        added_ids.len(),
        filtered.dropped_ids.len()
    );

    (
        state,
        CommitResult {
            pavers,
            added_ids,
            dropped_ids: filtered.dropped_ids,
            truncated: filtered.truncated,
        },
    )
}

/// Discards the preview without touching the committed list.
pub fn cancel_extension(state: SelectionState) -> SelectionState {
    state.discard_preview()
}
