//! Selection and focus model.
//!
//! [`SelectionModel`] tracks which rows are selected and which row has focus.
//! It works purely on [`RowId`]s; containers translate positions to ids and
//! apply range checks before calling in.
//!
//! # Example
//!
//! ```ignore
//! use grove::selection::{SelectionModel, SelectionMode};
//!
//! let mut selection = SelectionModel::new(SelectionMode::Multi);
//! selection.selection_changed.connect(|(selected, deselected)| {
//!     println!("Selection changed: +{} -{}", selected.len(), deselected.len());
//! });
//! selection.select(&[row_a, row_b]);
//! ```

use std::collections::HashSet;

use grove_core::Signal;
use grove_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::id::RowId;

/// Whether a container allows one or many selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one row is selected (default).
    #[default]
    Single,
    /// Any number of rows can be selected.
    Multi,
}

/// Rows added to and removed from the selection by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub selected: Vec<RowId>,
    pub deselected: Vec<RowId>,
}

impl SelectionDelta {
    fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.deselected.is_empty()
    }
}

/// Manages selection state for a container.
///
/// # Signals
///
/// - `selection_changed`: Emitted when selection changes, with (selected, deselected) rows
/// - `focus_changed`: Emitted when focus moves, with (new, old) rows
pub struct SelectionModel {
    mode: SelectionMode,

    /// The focused row, distinct from the selection.
    focus: Option<RowId>,

    /// Set of selected rows for O(1) lookup.
    selected_ids: HashSet<RowId>,

    /// Selected rows in selection order.
    selected: Vec<RowId>,

    /// Emitted when selection changes. Args: (selected, deselected)
    pub selection_changed: Signal<(Vec<RowId>, Vec<RowId>)>,

    /// Emitted when focus changes. Args: (new, old)
    pub focus_changed: Signal<(Option<RowId>, Option<RowId>)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("mode", &self.mode)
            .field("focus", &self.focus)
            .field("selected", &self.selected)
            .finish()
    }
}

impl SelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            focus: None,
            selected_ids: HashSet::new(),
            selected: Vec::new(),
            selection_changed: Signal::new(),
            focus_changed: Signal::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_selected(&self, row: RowId) -> bool {
        self.selected_ids.contains(&row)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected rows in selection order.
    pub fn selected(&self) -> &[RowId] {
        &self.selected
    }

    pub fn focus(&self) -> Option<RowId> {
        self.focus
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add rows to the selection.
    ///
    /// A single-select model ignores requests naming more than one row, and
    /// replaces its selection when given exactly one.
    pub fn select(&mut self, rows: &[RowId]) -> Option<SelectionDelta> {
        let rows = dedup(rows);
        if rows.is_empty() || self.rejects(&rows) {
            return None;
        }

        let mut delta = SelectionDelta::default();
        if self.mode == SelectionMode::Single {
            let row = rows[0];
            if self.is_selected(row) && self.selected.len() == 1 {
                return None;
            }
            delta.deselected = self.take_all();
            delta.deselected.retain(|&r| r != row);
            self.insert(row);
            delta.selected.push(row);
        } else {
            for row in rows {
                if self.insert(row) {
                    delta.selected.push(row);
                }
            }
        }
        self.finish(delta)
    }

    /// Remove rows from the selection.
    pub fn deselect(&mut self, rows: &[RowId]) -> Option<SelectionDelta> {
        let mut delta = SelectionDelta::default();
        for row in dedup(rows) {
            if self.selected_ids.remove(&row) {
                delta.deselected.push(row);
            }
        }
        if !delta.deselected.is_empty() {
            self.selected.retain(|row| self.selected_ids.contains(row));
        }
        self.finish(delta)
    }

    /// Deselect everything.
    pub fn clear(&mut self) -> Option<SelectionDelta> {
        let delta = SelectionDelta {
            selected: Vec::new(),
            deselected: self.take_all(),
        };
        self.finish(delta)
    }

    /// Replace the selection with `rows`.
    ///
    /// A single-select model leaves its selection untouched when given more
    /// than one row.
    pub fn set_selection(&mut self, rows: &[RowId]) -> Option<SelectionDelta> {
        let rows = dedup(rows);
        if self.rejects(&rows) {
            return None;
        }

        let wanted: HashSet<RowId> = rows.iter().copied().collect();
        let mut delta = SelectionDelta::default();
        for &row in &self.selected {
            if !wanted.contains(&row) {
                delta.deselected.push(row);
            }
        }
        for &row in &rows {
            if !self.selected_ids.contains(&row) {
                delta.selected.push(row);
            }
        }
        if delta.is_empty() {
            return None;
        }

        self.selected = rows;
        self.selected_ids = wanted;
        self.finish(delta)
    }

    /// Drop rows that are going away from the selection and focus.
    pub fn purge(&mut self, rows: &[RowId]) -> Option<SelectionDelta> {
        if let Some(focus) = self.focus
            && rows.contains(&focus)
        {
            self.set_focus(None);
        }
        self.deselect(rows)
    }

    /// Move focus. Returns `true` if it changed.
    pub fn set_focus(&mut self, row: Option<RowId>) -> bool {
        let old = std::mem::replace(&mut self.focus, row);
        if old == row {
            return false;
        }
        tracing::trace!(target: targets::SELECTION, ?row, ?old, "focus changed");
        self.focus_changed.emit((row, old));
        true
    }

    fn rejects(&self, rows: &[RowId]) -> bool {
        let rejected = self.mode == SelectionMode::Single && rows.len() > 1;
        if rejected {
            tracing::debug!(
                target: targets::SELECTION,
                count = rows.len(),
                "single-select container ignored multi-row request"
            );
        }
        rejected
    }

    fn insert(&mut self, row: RowId) -> bool {
        if self.selected_ids.insert(row) {
            self.selected.push(row);
            true
        } else {
            false
        }
    }

    fn take_all(&mut self) -> Vec<RowId> {
        self.selected_ids.clear();
        std::mem::take(&mut self.selected)
    }

    fn finish(&self, delta: SelectionDelta) -> Option<SelectionDelta> {
        if delta.is_empty() {
            return None;
        }
        tracing::trace!(
            target: targets::SELECTION,
            selected = delta.selected.len(),
            deselected = delta.deselected.len(),
            "selection changed"
        );
        self.selection_changed
            .emit((delta.selected.clone(), delta.deselected.clone()));
        Some(delta)
    }
}

fn dedup(rows: &[RowId]) -> Vec<RowId> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter().copied().filter(|row| seen.insert(*row)).collect()
}
