//! Flat list of rows with optional columns.
//!
//! [`Table`] maps positions to rows. In a virtual table a position starts as
//! an empty placeholder; the row behind it is materialized the first time it
//! is needed and populated through the data provider the first time its
//! content is read.
//!
//! # Example
//!
//! ```
//! use grove::{ContainerStyle, ItemContainer, Table};
//!
//! let mut table = Table::builder()
//!     .style(ContainerStyle::multi().with_virtual())
//!     .data_provider(|table: &mut Table, row, index| {
//!         table.set_text(row, 0, format!("row {index}")).ok();
//!     })
//!     .build();
//!
//! table.set_item_count(10_000).unwrap();
//! let row = table.item(42).unwrap();
//! assert_eq!(table.text(row, 0).unwrap(), "row 42");
//! ```

use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use grove_core::PerfSpan;
use grove_core::logging::targets;

use crate::container::sealed::Sealed;
use crate::container::{ContainerBuilder, ContainerCore, ItemContainer};
use crate::error::{ItemError, Result};
use crate::event::ItemEvent;
use crate::id::RowId;
use crate::population;
use crate::style::ContainerStyle;

/// Builder for [`Table`].
pub type TableBuilder = ContainerBuilder<Table>;

impl ContainerBuilder<Table> {
    pub fn build(self) -> Table {
        Table {
            core: self.into_core(),
            order: Vec::new(),
            last_index: AtomicUsize::new(0),
        }
    }
}

/// A flat, optionally virtual, list of rows.
#[derive(Debug)]
pub struct Table {
    core: ContainerCore<Table>,
    /// Row at each position; `None` marks a placeholder not materialized yet.
    order: Vec<Option<RowId>>,
    /// Position found by the last lookup; in-order access hits it or its
    /// neighbor.
    last_index: AtomicUsize,
}

impl Sealed for Table {
    fn core(&self) -> &ContainerCore<Self> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContainerCore<Self> {
        &mut self.core
    }

    fn sibling_index(&self, row: RowId, hint: Option<usize>) -> Option<usize> {
        let last = self.last_index.load(Ordering::Relaxed);
        let index = hint
            .into_iter()
            .chain([last, last + 1, last.wrapping_sub(1)])
            .find(|&index| self.order.get(index) == Some(&Some(row)))
            .or_else(|| {
                if last < self.order.len() / 2 {
                    position_in(&self.order, row)
                } else {
                    self.order.iter().rposition(|slot| *slot == Some(row))
                }
            })?;
        self.last_index.store(index, Ordering::Relaxed);
        Some(index)
    }

    fn clear_positions(&mut self) {
        self.order.clear();
    }
}

impl ItemContainer for Table {}

fn position_in(order: &[Option<RowId>], row: RowId) -> Option<usize> {
    order.iter().position(|slot| *slot == Some(row))
}

impl Table {
    /// Create a table with the given style.
    pub fn new(style: ContainerStyle) -> Self {
        Self::builder().style(style).build()
    }

    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    // =========================================================================
    // Rows
    // =========================================================================

    pub fn item_count(&self) -> Result<usize> {
        self.check_widget()?;
        Ok(self.order.len())
    }

    /// Grow or shrink the table to `count` rows.
    ///
    /// Growing a virtual table adds placeholders; growing a regular table
    /// creates rows in one batch. Shrinking disposes the rows past `count`
    /// and fails without changing anything if one of them is populating.
    pub fn set_item_count(&mut self, count: usize) -> Result<()> {
        self.check_widget()?;
        let old = self.order.len();
        if count == old {
            return Ok(());
        }
        let _span = PerfSpan::new("table_set_item_count");

        if count < old {
            let ids: Vec<RowId> = self.order[count..].iter().flatten().copied().collect();
            self.core
                .ensure_removable(&ids, |row| position_in(&self.order, row).unwrap_or(count))?;
            self.core.release_rows(&ids);
            self.order.truncate(count);
            if count == 0 {
                self.core.reset_custom_draw();
            }
            let removed: Vec<usize> = (count..old).collect();
            self.core.backend.rows_removed(None, &removed);
        } else {
            if self.core.style.virtual_items {
                self.order.resize(count, None);
            } else {
                self.core.begin_batch();
                self.order.reserve(count - old);
                for _ in old..count {
                    let id = self.core.new_row(None);
                    self.order.push(Some(id));
                }
                self.core.end_batch();
            }
            self.core.backend.rows_inserted(None, old, count - old);
        }

        tracing::debug!(target: targets::ITEMS, old, new = count, "table item count changed");
        self.core.emit(ItemEvent::ItemCountChanged {
            parent: None,
            old,
            new: count,
        });
        Ok(())
    }

    /// Insert a new row at `index`.
    pub fn insert_item(&mut self, index: usize) -> Result<RowId> {
        self.check_widget()?;
        if index > self.order.len() {
            return Err(ItemError::range(index, self.order.len()));
        }
        let id = self.core.new_row(None);
        self.order.insert(index, Some(id));
        self.core.backend.rows_inserted(None, index, 1);
        self.core.emit(ItemEvent::RowsInserted {
            parent: None,
            first: index,
            count: 1,
        });
        Ok(id)
    }

    /// Append a new row.
    pub fn add_item(&mut self) -> Result<RowId> {
        let count = self.item_count()?;
        self.insert_item(count)
    }

    /// The row at `index`, materialized but not populated.
    ///
    /// This is how a backend binds a position to a row before asking for
    /// its cells.
    pub fn get_or_create(&mut self, index: usize) -> Result<RowId> {
        self.check_widget()?;
        if index >= self.order.len() {
            return Err(ItemError::range(index, self.order.len()));
        }
        Ok(self.materialize(index))
    }

    /// The row at `index`, materialized and populated.
    pub fn item(&mut self, index: usize) -> Result<RowId> {
        let id = self.get_or_create(index)?;
        population::check_data_at(self, id, Some(index)).into_result()
    }

    /// Every row, materialized and populated, in position order.
    pub fn items(&mut self) -> Result<Vec<RowId>> {
        self.check_widget()?;
        let mut rows = Vec::with_capacity(self.order.len());
        let mut index = 0;
        while index < self.order.len() {
            rows.push(self.item(index)?);
            index += 1;
        }
        Ok(rows)
    }

    /// Position of `row`, or `None` if it is not in this table.
    pub fn index_of(&self, row: RowId) -> Result<Option<usize>> {
        self.check_widget()?;
        Ok(self.sibling_index(row, None))
    }

    fn materialize(&mut self, index: usize) -> RowId {
        if let Some(id) = self.order[index] {
            return id;
        }
        let id = self.core.new_row(None);
        self.order[index] = Some(id);
        tracing::trace!(target: targets::ITEMS, %id, index, "materialized row");
        id
    }

    // =========================================================================
    // Removal
    // =========================================================================

    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        if index >= self.order.len() {
            return Err(ItemError::range(index, self.order.len()));
        }
        self.remove_positions(vec![index])
    }

    /// Remove the rows in `range`. An empty range is a no-op.
    pub fn remove_range(&mut self, range: Range<usize>) -> Result<()> {
        self.check_widget()?;
        if range.is_empty() {
            return Ok(());
        }
        self.check_range(&range)?;
        self.remove_positions(range.collect())
    }

    /// Remove the rows at `indices`, in any order, duplicates allowed.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<()> {
        self.check_widget()?;
        if indices.is_empty() {
            return Ok(());
        }
        let positions = self.sorted_positions(indices)?;
        self.remove_positions(positions)
    }

    /// Remove every row.
    pub fn remove_all(&mut self) -> Result<()> {
        self.check_widget()?;
        let count = self.order.len();
        if count == 0 {
            return Ok(());
        }
        let ids: Vec<RowId> = self.order.iter().flatten().copied().collect();
        self.core
            .ensure_removable(&ids, |row| position_in(&self.order, row).unwrap_or(0))?;
        let _span = PerfSpan::new("table_remove_all");

        self.core.release_rows(&ids);
        self.order.clear();
        self.core.rows.reset();
        self.core.reset_custom_draw();
        let removed: Vec<usize> = (0..count).collect();
        self.core.backend.rows_removed(None, &removed);
        tracing::debug!(target: targets::ITEMS, count, "removed all rows");
        self.core.emit(ItemEvent::AllRowsRemoved { count });
        Ok(())
    }

    /// `positions` must be ascending, unique and in range.
    fn remove_positions(&mut self, positions: Vec<usize>) -> Result<()> {
        let ids: Vec<RowId> = positions.iter().filter_map(|&p| self.order[p]).collect();
        let first = positions[0];
        self.core
            .ensure_removable(&ids, |row| position_in(&self.order, row).unwrap_or(first))?;

        self.core.release_rows(&ids);
        let doomed: HashSet<usize> = positions.iter().copied().collect();
        let mut position = 0;
        self.order.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        if self.order.is_empty() {
            self.core.reset_custom_draw();
        }

        self.core.backend.rows_removed(None, &positions);
        tracing::debug!(target: targets::ITEMS, count = positions.len(), "removed rows");
        self.core.emit(ItemEvent::RowsRemoved {
            parent: None,
            indices: positions,
        });
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.end > self.order.len() {
            return Err(ItemError::range(range.end - 1, self.order.len()));
        }
        Ok(())
    }

    fn sorted_positions(&self, indices: &[usize]) -> Result<Vec<usize>> {
        let mut positions = indices.to_vec();
        positions.sort_unstable();
        positions.dedup();
        if let Some(&last) = positions.last()
            && last >= self.order.len()
        {
            return Err(ItemError::range(last, self.order.len()));
        }
        Ok(positions)
    }

    // =========================================================================
    // Clearing
    // =========================================================================

    /// Reset the row at `index` to uncached so it is populated again.
    ///
    /// Placeholders and the row currently being populated are left alone.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        if index >= self.order.len() {
            return Err(ItemError::range(index, self.order.len()));
        }
        self.clear_positions_in(std::iter::once(index));
        Ok(())
    }

    pub fn clear_range(&mut self, range: Range<usize>) -> Result<()> {
        self.check_widget()?;
        if range.is_empty() {
            return Ok(());
        }
        self.check_range(&range)?;
        self.clear_positions_in(range);
        Ok(())
    }

    pub fn clear_indices(&mut self, indices: &[usize]) -> Result<()> {
        self.check_widget()?;
        let positions = self.sorted_positions(indices)?;
        self.clear_positions_in(positions);
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.check_widget()?;
        self.clear_positions_in(0..self.order.len());
        Ok(())
    }

    fn clear_positions_in(&mut self, positions: impl IntoIterator<Item = usize>) {
        let mut cleared = Vec::new();
        for position in positions {
            if let Some(id) = self.order[position]
                && self.core.clear_row(id)
            {
                cleared.push(position);
            }
        }
        if !cleared.is_empty() {
            tracing::trace!(target: targets::ITEMS, count = cleared.len(), "cleared rows");
            self.core.emit(ItemEvent::RowsCleared {
                parent: None,
                indices: cleared,
                recursive: false,
            });
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the row at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        if index >= self.order.len() {
            return Ok(());
        }
        let id = self.materialize(index);
        self.core.change_selection(|selection| selection.select(&[id]));
        Ok(())
    }

    /// Select the rows in `range`, clamped to the table.
    ///
    /// Ignored by single-select tables when `range` covers more than one row.
    pub fn select_range(&mut self, range: Range<usize>) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() && range.len() > 1 {
            return Ok(());
        }
        let ids = self.materialize_in_range(range);
        if !ids.is_empty() {
            self.core.change_selection(|selection| selection.select(&ids));
        }
        Ok(())
    }

    /// Select the rows at `indices`, skipping out-of-range ones.
    ///
    /// Ignored by single-select tables when more than one index is given.
    pub fn select_indices(&mut self, indices: &[usize]) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() && indices.len() > 1 {
            return Ok(());
        }
        let ids = self.materialize_indices(indices);
        if !ids.is_empty() {
            self.core.change_selection(|selection| selection.select(&ids));
        }
        Ok(())
    }

    /// Select every row. A no-op for single-select tables.
    pub fn select_all(&mut self) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() {
            return Ok(());
        }
        let ids = self.materialize_in_range(0..self.order.len());
        self.core.change_selection(|selection| selection.select(&ids));
        Ok(())
    }

    pub fn deselect(&mut self, index: usize) -> Result<()> {
        self.deselect_indices(&[index])
    }

    pub fn deselect_range(&mut self, range: Range<usize>) -> Result<()> {
        self.check_widget()?;
        let end = range.end.min(self.order.len());
        let ids: Vec<RowId> = self
            .order
            .get(range.start.min(end)..end)
            .unwrap_or_default()
            .iter()
            .flatten()
            .copied()
            .collect();
        self.core.change_selection(|selection| selection.deselect(&ids));
        Ok(())
    }

    /// Deselect the rows at `indices`, skipping out-of-range ones.
    pub fn deselect_indices(&mut self, indices: &[usize]) -> Result<()> {
        self.check_widget()?;
        let ids: Vec<RowId> = indices
            .iter()
            .filter_map(|&index| self.order.get(index).copied().flatten())
            .collect();
        self.core.change_selection(|selection| selection.deselect(&ids));
        Ok(())
    }

    /// Make the row at `index` the only selected row.
    ///
    /// An out-of-range index leaves nothing selected.
    pub fn set_selection(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        let ids = self.materialize_indices(&[index]);
        self.core
            .change_selection(|selection| selection.set_selection(&ids));
        Ok(())
    }

    /// Replace the selection with the rows in `range`, clamped to the table.
    ///
    /// Single-select tables leave their selection untouched when `range`
    /// covers more than one row.
    pub fn set_selection_range(&mut self, range: Range<usize>) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() && range.len() > 1 {
            return Ok(());
        }
        let ids = self.materialize_in_range(range);
        self.core
            .change_selection(|selection| selection.set_selection(&ids));
        Ok(())
    }

    /// Replace the selection with the rows at `indices`.
    ///
    /// Out-of-range indices are skipped. Single-select tables leave their
    /// selection untouched when more than one index is given.
    pub fn set_selection_indices(&mut self, indices: &[usize]) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() && indices.len() > 1 {
            return Ok(());
        }
        let ids = self.materialize_indices(indices);
        self.core
            .change_selection(|selection| selection.set_selection(&ids));
        Ok(())
    }

    /// Replace the selection with `rows`.
    ///
    /// Fails with [`ItemError::InvalidArgument`] if a row is not in this
    /// table, leaving the selection untouched.
    pub fn set_selection_rows(&mut self, rows: &[RowId]) -> Result<()> {
        self.check_widget()?;
        if let Some(row) = rows.iter().find(|&&row| position_in(&self.order, row).is_none()) {
            return Err(ItemError::invalid(format!("row {row} is not in this table")));
        }
        self.core
            .change_selection(|selection| selection.set_selection(rows));
        Ok(())
    }

    pub fn is_selected(&self, index: usize) -> Result<bool> {
        self.check_widget()?;
        Ok(self
            .order
            .get(index)
            .copied()
            .flatten()
            .is_some_and(|id| self.core.selection.is_selected(id)))
    }

    /// Selected rows in position order.
    pub fn selection(&self) -> Result<Vec<RowId>> {
        self.check_widget()?;
        Ok(self
            .order
            .iter()
            .flatten()
            .copied()
            .filter(|&id| self.core.selection.is_selected(id))
            .collect())
    }

    /// Positions of the selected rows, ascending.
    pub fn selection_indices(&self) -> Result<Vec<usize>> {
        self.check_widget()?;
        Ok(self
            .order
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some_and(|id| self.core.selection.is_selected(id)))
            .map(|(index, _)| index)
            .collect())
    }

    /// The focused row's position if it is selected, else the first selected
    /// position.
    pub fn selection_index(&self) -> Result<Option<usize>> {
        self.check_widget()?;
        let selection = &self.core.selection;
        if let Some(focus) = selection.focus()
            && selection.is_selected(focus)
        {
            return Ok(self.sibling_index(focus, None));
        }
        Ok(self.selection_indices()?.first().copied())
    }

    pub fn focus_index(&self) -> Result<Option<usize>> {
        self.check_widget()?;
        Ok(self
            .core
            .selection
            .focus()
            .and_then(|focus| self.sibling_index(focus, None)))
    }

    /// Focus and select the row at `index`. Out-of-range indices are ignored.
    pub fn select_focus_index(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        if index >= self.order.len() {
            return Ok(());
        }
        let id = self.materialize(index);
        self.core.focus_to(Some(id));
        self.core.change_selection(|selection| selection.select(&[id]));
        Ok(())
    }

    fn materialize_in_range(&mut self, range: Range<usize>) -> Vec<RowId> {
        let end = range.end.min(self.order.len());
        (range.start.min(end)..end)
            .map(|index| self.materialize(index))
            .collect()
    }

    fn materialize_indices(&mut self, indices: &[usize]) -> Vec<RowId> {
        let len = self.order.len();
        indices
            .iter()
            .filter(|&&index| index < len)
            .map(|&index| self.materialize(index))
            .collect()
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Position of the row scrolled to the top.
    pub fn top_index(&self) -> Result<usize> {
        self.check_widget()?;
        Ok(self
            .core
            .top_row
            .and_then(|row| self.sibling_index(row, None))
            .unwrap_or(0))
    }

    /// Scroll `index` to the top. Out-of-range indices are ignored.
    pub fn set_top_index(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        if index < self.order.len() {
            let id = self.materialize(index);
            self.core.top_row = Some(id);
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(Table: Send, Sync);
