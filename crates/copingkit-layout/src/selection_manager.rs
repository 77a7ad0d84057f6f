use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use copingkit_core::SelectionError;

use crate::extension::{can_extend, selection_direction};
use crate::paver::{Edge, Paver};

/// Explicit extension directions chosen for corner pavers, keyed by paver id.
///
/// Ordered so iteration and debug output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerDirectionOverrides(BTreeMap<String, Edge>);

impl CornerDirectionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, paver_id: &str) -> Option<Edge> {
        self.0.get(paver_id).copied()
    }

    /// Records `direction` for `paver_id`, replacing any earlier choice.
    pub fn insert(&mut self, paver_id: impl Into<String>, direction: Edge) {
        self.0.insert(paver_id.into(), direction);
    }

    pub fn remove(&mut self, paver_id: &str) -> Option<Edge> {
        self.0.remove(paver_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Edge)> {
        self.0.iter().map(|(id, edge)| (id.as_str(), *edge))
    }
}

/// Selection after [`SelectionState::resolve_extension`] has accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    /// Selected pavers in collection order
    pub pavers: Vec<Paver>,
    /// Outward direction rows grow in
    pub direction: Edge,
}

/// Caller-owned paver selection.
///
/// `SelectionState` tracks:
/// - The ids of the selected pavers
/// - The extension preview shown while a drag is in progress
/// - Directions chosen for corner pavers
///
/// # Selection Model
///
/// - **Single select**: Clicking a paver replaces the selection with it
/// - **Multi-select**: Holding Shift toggles membership without touching the rest
/// - **Group select**: A whole row or edge can be selected at once
///
/// # Design
///
/// The state is an immutable value. Every transform consumes the state and
/// returns the next one, so a host can keep earlier states for undo. It is
/// created empty when a layout loads and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selected_ids: BTreeSet<String>,
    extension_pavers: Vec<Paver>,
    corner_direction_overrides: CornerDirectionOverrides,
}

impl SelectionState {
    /// Creates an empty `SelectionState`.
    ///
    /// # Examples
    ///
    /// ```
    /// use copingkit_layout::selection_manager::SelectionState;
    ///
    /// let state = SelectionState::new();
    /// assert!(state.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected paver ids.
    pub fn selected_ids(&self) -> &BTreeSet<String> {
        &self.selected_ids
    }

    pub fn is_selected(&self, paver_id: &str) -> bool {
        self.selected_ids.contains(paver_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Returns the uncommitted extension preview.
    pub fn extension_pavers(&self) -> &[Paver] {
        &self.extension_pavers
    }

    pub fn has_preview(&self) -> bool {
        !self.extension_pavers.is_empty()
    }

    pub fn corner_direction_overrides(&self) -> &CornerDirectionOverrides {
        &self.corner_direction_overrides
    }

    /// Toggles a paver in or out of the selection.
    ///
    /// # Arguments
    ///
    /// * `paver_id` - The paver that was clicked
    /// * `multi` - If `true`, enables multi-select mode (Shift+click behavior)
    ///
    /// # Multi-select Behavior
    ///
    /// - If `multi` is `false`: The selection becomes exactly `{paver_id}`
    /// - If `multi` is `true`: Membership of `paver_id` is flipped
    pub fn toggle_selection(self, paver_id: &str, multi: bool) -> Self {
        Self {
            selected_ids: toggle_selection(paver_id, &self.selected_ids, multi),
            ..self
        }
    }

    /// Selects every paver in one row of one edge, including the corners at
    /// both of its ends.
    ///
    /// # Arguments
    ///
    /// * `pavers` - The committed paver collection
    /// * `edge` - Edge to select from; pool and compass names are equivalent
    /// * `row_index` - Row to select, 0 being the row at the waterline
    pub fn select_row(self, pavers: &[Paver], edge: Edge, row_index: u32) -> Self {
        let selected_ids = pavers
            .iter()
            .filter(|p| p.on_edge(edge) && p.row_index == row_index)
            .map(|p| p.id.clone())
            .collect();
        Self {
            selected_ids,
            ..self
        }
    }

    /// Selects every paver on one edge, all rows included.
    pub fn select_edge(self, pavers: &[Paver], edge: Edge) -> Self {
        let selected_ids = pavers
            .iter()
            .filter(|p| p.on_edge(edge))
            .map(|p| p.id.clone())
            .collect();
        Self {
            selected_ids,
            ..self
        }
    }

    /// Selects every paver in the collection.
    pub fn select_all(self, pavers: &[Paver]) -> Self {
        Self {
            selected_ids: pavers.iter().map(|p| p.id.clone()).collect(),
            ..self
        }
    }

    /// Deselects everything, dropping the preview and corner directions.
    pub fn clear(self) -> Self {
        Self::default()
    }

    /// Records the direction a corner paver should extend in.
    ///
    /// The controller never guesses a corner direction; hosts call this
    /// after [`SelectionError::CornerDirectionRequired`].
    pub fn with_corner_direction(mut self, paver_id: &str, direction: Edge) -> Self {
        self.corner_direction_overrides.insert(paver_id, direction);
        self
    }

    /// Replaces the extension preview.
    pub fn with_preview(self, pavers: Vec<Paver>) -> Self {
        Self {
            extension_pavers: pavers,
            ..self
        }
    }

    pub fn discard_preview(self) -> Self {
        self.with_preview(Vec::new())
    }

    /// Looks up the selected pavers in `pavers`.
    ///
    /// # Returns
    ///
    /// The selected pavers in collection order, or
    /// [`SelectionError::PaverNotFound`] for the first id with no paver.
    pub fn selected_pavers(&self, pavers: &[Paver]) -> Result<Vec<Paver>, SelectionError> {
        if let Some(missing) = self
            .selected_ids
            .iter()
            .find(|id| !pavers.iter().any(|p| &p.id == *id))
        {
            return Err(SelectionError::PaverNotFound {
                paver_id: missing.clone(),
            });
        }
        Ok(pavers
            .iter()
            .filter(|p| self.selected_ids.contains(&p.id))
            .cloned()
            .collect())
    }

    /// Checks that the selection can be extended and picks its direction.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::EmptySelection`] when nothing is selected
    /// - [`SelectionError::PaverNotFound`] when a selected id is stale
    /// - [`SelectionError::NotExtendable`] when pavers span edges or rows
    /// - [`SelectionError::CornerDirectionRequired`] when a lone corner paver
    ///   has no recorded direction
    pub fn resolve_extension(&self, pavers: &[Paver]) -> Result<ResolvedSelection, SelectionError> {
        if self.selected_ids.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        let selected = self.selected_pavers(pavers)?;
        if !can_extend(&selected) {
            return Err(SelectionError::NotExtendable);
        }

        let first = &selected[0];
        if selected.len() == 1
            && first.is_corner
            && first.extension_direction.is_none()
            && self.corner_direction_overrides.get(&first.id).is_none()
        {
            return Err(SelectionError::CornerDirectionRequired {
                paver_id: first.id.clone(),
            });
        }

        let direction = selection_direction(&selected, &self.corner_direction_overrides)
            .ok_or(SelectionError::EmptySelection)?;
        Ok(ResolvedSelection {
            pavers: selected,
            direction,
        })
    }
}

/// Next selection after a click on `paver_id`.
///
/// With `multi` the membership of `paver_id` flips; otherwise the result is
/// exactly `{paver_id}`.
pub fn toggle_selection(
    paver_id: &str,
    current: &BTreeSet<String>,
    multi: bool,
) -> BTreeSet<String> {
    if !multi {
        return BTreeSet::from([paver_id.to_string()]);
    }
    let mut next = current.clone();
    if !next.remove(paver_id) {
        next.insert(paver_id.to_string());
    }
    next
}
