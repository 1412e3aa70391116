use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::series::SeriesDatum;

/// Semantic purpose of a selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionRole {
    /// Hover-driven information selection.
    Info,
    /// Click/tap-driven action selection.
    Action,
}

impl SelectionRole {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SelectionRole::Info => "info",
            SelectionRole::Action => "action",
        }
    }
}

/// Named, lockable set of selected data points and wholly-selected series.
///
/// One model exists per role per chart and persists across data updates.
/// While locked, `update_selection` is rejected; `clear` is always permitted,
/// so callers needing lock-respecting clears must check `locked` themselves.
///
/// The model itself never notifies. Change propagation is owned by the chart
/// dispatch loop, which guarantees listeners run in registration order, at
/// most once per external trigger.
#[derive(Default, Clone)]
pub struct SelectionModel {
    selected_data: IndexMap<String, IndexSet<usize>>,
    selected_series: IndexSet<String>,
    locked: bool,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selected-datum and selected-series sets.
    ///
    /// Returns whether the resulting state differs from before. While locked
    /// this is a no-op returning `false`.
    pub fn update_selection(&mut self, data: &[SeriesDatum], series_ids: &[String]) -> bool {
        if self.locked {
            return false;
        }

        let mut new_data: IndexMap<String, IndexSet<usize>> = IndexMap::new();
        for datum in data {
            new_data
                .entry(datum.series_id.clone())
                .or_default()
                .insert(datum.index);
        }
        let new_series: IndexSet<String> = series_ids.iter().cloned().collect();

        if new_data == self.selected_data && new_series == self.selected_series {
            return false;
        }

        self.selected_data = new_data;
        self.selected_series = new_series;
        true
    }

    #[must_use]
    pub fn is_datum_selected(&self, series_id: &str, index: usize) -> bool {
        self.selected_data
            .get(series_id)
            .is_some_and(|indices| indices.contains(&index))
    }

    #[must_use]
    pub fn is_series_selected(&self, series_id: &str) -> bool {
        self.selected_series.contains(series_id)
    }

    /// Selected datum indices for one series, in selection order.
    #[must_use]
    pub fn selected_indices(&self, series_id: &str) -> IndexSet<usize> {
        self.selected_data.get(series_id).cloned().unwrap_or_default()
    }

    /// All selected data points, in selection order.
    #[must_use]
    pub fn selected_data(&self) -> Vec<SeriesDatum> {
        self.selected_data
            .iter()
            .flat_map(|(series_id, indices)| {
                indices
                    .iter()
                    .map(move |index| SeriesDatum::new(series_id.clone(), *index))
            })
            .collect()
    }

    #[must_use]
    pub fn first_selected_datum(&self) -> Option<SeriesDatum> {
        let (series_id, indices) = self.selected_data.first()?;
        let index = indices.first()?;
        Some(SeriesDatum::new(series_id.clone(), *index))
    }

    #[must_use]
    pub fn selected_series(&self) -> &IndexSet<String> {
        &self.selected_series
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_data.is_empty() && self.selected_series.is_empty()
    }

    /// Empties both sets. Always permitted, even when locked.
    ///
    /// Returns whether anything was cleared.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.selected_data.clear();
        self.selected_series.clear();
        changed
    }

    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Toggles gatekeeping only; the selection itself is untouched.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Drops selected entries whose series no longer exist (or whose index is
    /// out of bounds for the replacement series). Runs regardless of `locked`
    /// since it is lifecycle cleanup, not an interaction.
    ///
    /// Returns whether anything was dropped.
    pub(crate) fn prune_missing(&mut self, series_lens: &IndexMap<String, usize>) -> bool {
        let before_data: usize = self.selected_data.values().map(IndexSet::len).sum();
        let before_series = self.selected_series.len();

        self.selected_data.retain(|series_id, indices| {
            match series_lens.get(series_id) {
                Some(len) => {
                    indices.retain(|index| index < len);
                    !indices.is_empty()
                }
                None => false,
            }
        });
        self.selected_series
            .retain(|series_id| series_lens.contains_key(series_id));

        let after_data: usize = self.selected_data.values().map(IndexSet::len).sum();
        before_data != after_data || before_series != self.selected_series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(series_id: &str, index: usize) -> SeriesDatum {
        SeriesDatum::new(series_id, index)
    }

    #[test]
    fn update_reports_change_only_when_state_differs() {
        let mut model = SelectionModel::new();
        assert!(model.update_selection(&[datum("a", 0)], &[]));
        assert!(!model.update_selection(&[datum("a", 0)], &[]));
        assert!(model.update_selection(&[datum("a", 1)], &[]));
    }

    #[test]
    fn locked_model_rejects_updates() {
        let mut model = SelectionModel::new();
        assert!(model.update_selection(&[datum("a", 0)], &[]));
        model.set_locked(true);
        assert!(!model.update_selection(&[datum("b", 1)], &[]));
        assert!(model.is_datum_selected("a", 0));
        assert!(!model.is_datum_selected("b", 1));
    }

    #[test]
    fn clear_is_permitted_while_locked() {
        let mut model = SelectionModel::new();
        assert!(model.update_selection(&[datum("a", 0)], &["a".to_owned()]));
        model.set_locked(true);
        assert!(model.clear());
        assert!(model.is_empty());
        assert!(model.locked());
    }

    #[test]
    fn prune_drops_missing_series_and_out_of_bounds_indices() {
        let mut model = SelectionModel::new();
        assert!(model.update_selection(
            &[datum("a", 0), datum("a", 5), datum("gone", 0)],
            &["a".to_owned(), "gone".to_owned()],
        ));

        let mut lens = IndexMap::new();
        lens.insert("a".to_owned(), 3);
        assert!(model.prune_missing(&lens));

        assert!(model.is_datum_selected("a", 0));
        assert!(!model.is_datum_selected("a", 5));
        assert!(!model.is_series_selected("gone"));
        assert!(!model.prune_missing(&lens));
    }

    #[test]
    fn first_selected_datum_follows_selection_order() {
        let mut model = SelectionModel::new();
        assert!(model.update_selection(&[datum("b", 2), datum("a", 0)], &[]));
        assert_eq!(model.first_selected_datum(), Some(datum("b", 2)));
    }
}
