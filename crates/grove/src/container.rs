//! State and operations shared by tables and trees.
//!
//! Both [`Table`](crate::Table) and [`Tree`](crate::Tree) embed a
//! [`ContainerCore`] and implement [`ItemContainer`], which provides the
//! row content, column, custom-draw and redraw operations on top of it.
//! Only positional operations (item counts, insertion, removal, selection
//! by index) differ between the two and live on the concrete types.
//!
//! Every public entry point first verifies it runs on the thread that
//! created the container (panicking otherwise) and that the container has
//! not been disposed (returning [`ItemError::DisposedAccess`] otherwise).

use std::sync::Arc;

use grove_core::logging::targets;
use grove_core::{ConnectionId, PerfSpan, Signal, ThreadAffinity};
use serde::{Deserialize, Serialize};

use crate::backend::{CellContent, NullBackend, RenderBackend};
use crate::column::{Column, ColumnModel, ColumnSpec};
use crate::custom_draw::{CustomDraw, DrawEvent, DrawHook, RenderMode};
use crate::error::{ItemError, Result};
use crate::event::ItemEvent;
use crate::graphics::{Color, Font};
use crate::id::{IdAllocator, RowId};
use crate::population::{self, DataProvider, Population};
use crate::row::{CellData, RowData, display_text};
use crate::selection::{SelectionDelta, SelectionModel};
use crate::style::ContainerStyle;

/// Sort indicator shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Up,
    Down,
}

/// State owned by every container.
pub struct ContainerCore<C> {
    pub(crate) style: ContainerStyle,
    pub(crate) rows: IdAllocator<RowData>,
    pub(crate) columns: ColumnModel,
    pub(crate) selection: SelectionModel,
    pub(crate) draw: CustomDraw,
    pub(crate) provider: Option<DataProvider<C>>,
    pub(crate) backend: Box<dyn RenderBackend>,
    pub(crate) affinity: ThreadAffinity,
    pub(crate) redraw_depth: usize,
    pub(crate) disposed: bool,
    pub(crate) top_row: Option<RowId>,
    pub(crate) sort_column: Option<usize>,
    pub(crate) sort_direction: SortDirection,
    pub(crate) header_visible: bool,
    pub(crate) lines_visible: bool,
    pub(crate) changed: Signal<ItemEvent>,
}

impl<C> std::fmt::Debug for ContainerCore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerCore")
            .field("style", &self.style)
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.count())
            .field("selection", &self.selection)
            .field("owner_draw", &self.draw.is_owner_draw())
            .field("redraw_depth", &self.redraw_depth)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<C> ContainerCore<C> {
    pub(crate) fn new(style: ContainerStyle, backend: Box<dyn RenderBackend>) -> Self {
        Self {
            style,
            rows: IdAllocator::new(style.growth),
            columns: ColumnModel::new(),
            selection: SelectionModel::new(style.selection),
            draw: CustomDraw::new(),
            provider: None,
            backend,
            affinity: ThreadAffinity::current(),
            redraw_depth: 0,
            disposed: false,
            top_row: None,
            sort_column: None,
            sort_direction: SortDirection::None,
            header_visible: false,
            lines_visible: false,
            changed: Signal::new(),
        }
    }

    /// Thread and disposal check run by every public entry point.
    pub(crate) fn check(&self) -> Result<()> {
        self.affinity
            .assert_same_thread_with_msg("item container accessed from wrong thread");
        if self.disposed {
            return Err(ItemError::DisposedAccess);
        }
        Ok(())
    }

    pub(crate) fn batched(&self) -> bool {
        self.redraw_depth > 0
    }

    pub(crate) fn new_row(&mut self, parent: Option<RowId>) -> RowId {
        let cells = self.columns.cell_count();
        let batched = self.batched();
        self.rows
            .allocate_with(|id| RowData::new(id, cells, parent), batched)
    }

    pub(crate) fn row(&self, row: RowId) -> Result<&RowData> {
        self.rows.get(row).ok_or(ItemError::DisposedAccess)
    }

    pub(crate) fn row_mut(&mut self, row: RowId) -> Result<&mut RowData> {
        self.rows.get_mut(row).ok_or(ItemError::DisposedAccess)
    }

    /// Purge rows from selection, focus and scroll state, then free their ids.
    pub(crate) fn release_rows(&mut self, rows: &[RowId]) {
        if rows.is_empty() {
            return;
        }
        let _ = self.selection.purge(rows);
        if self.top_row.is_some_and(|top| rows.contains(&top)) {
            self.top_row = None;
        }
        for &row in rows {
            self.rows.release(row);
        }
        tracing::trace!(target: targets::ITEMS, count = rows.len(), "released rows");
    }

    /// Fail if any of `rows` is being populated.
    ///
    /// `index_of` reports the position used in the error.
    pub(crate) fn ensure_removable(
        &self,
        rows: &[RowId],
        index_of: impl Fn(RowId) -> usize,
    ) -> Result<()> {
        match rows
            .iter()
            .find(|&&row| self.rows.get(row).is_some_and(RowData::is_setting_data))
        {
            Some(&row) => {
                let index = index_of(row);
                tracing::warn!(target: targets::ITEMS, %row, index, "refused to remove row during population");
                Err(ItemError::IllegalRemovalDuringPopulation { index })
            }
            None => Ok(()),
        }
    }

    /// Clear a row unless it is populating. Returns `true` if it was reset.
    pub(crate) fn clear_row(&mut self, row: RowId) -> bool {
        let cleared = self.rows.get_mut(row).is_some_and(RowData::clear);
        if cleared {
            self.backend.row_changed(row);
        }
        cleared
    }

    pub(crate) fn update_row(&mut self, row: RowId, update: impl FnOnce(&mut RowData)) -> Result<()> {
        let data = self.rows.get_mut(row).ok_or(ItemError::DisposedAccess)?;
        update(data);
        data.mark_cached();
        self.backend.row_changed(row);
        Ok(())
    }

    /// Update one cell; out-of-range columns are ignored.
    pub(crate) fn update_cell(
        &mut self,
        row: RowId,
        column: usize,
        custom_draw: bool,
        update: impl FnOnce(&mut CellData),
    ) -> Result<()> {
        let data = self.rows.get_mut(row).ok_or(ItemError::DisposedAccess)?;
        let Some(cell) = data.cells.get_mut(column) else {
            return Ok(());
        };
        update(cell);
        data.mark_cached();
        if custom_draw && self.columns.mark_custom_draw(column) {
            tracing::trace!(target: targets::COLUMNS, column, "column switched to custom drawing");
        }
        self.backend.row_changed(row);
        Ok(())
    }

    /// Update check or grayed state; a no-op without the `check` style.
    pub(crate) fn update_check(&mut self, row: RowId, update: impl FnOnce(&mut RowData)) -> Result<()> {
        let data = self.rows.get_mut(row).ok_or(ItemError::DisposedAccess)?;
        if !self.style.check {
            return Ok(());
        }
        let before = (data.checked, data.grayed);
        update(data);
        data.mark_cached();
        let (checked, grayed) = (data.checked, data.grayed);
        if before != (checked, grayed) {
            self.backend.row_changed(row);
            self.emit(ItemEvent::CheckChanged { row, checked, grayed });
        }
        Ok(())
    }

    pub(crate) fn emit(&self, event: ItemEvent) {
        self.changed.emit(event);
    }

    /// Announce a selection change, if there was one.
    pub(crate) fn selection_changed(&self, delta: Option<SelectionDelta>) {
        if let Some(delta) = delta {
            self.emit(ItemEvent::SelectionChanged {
                selected: delta.selected,
                deselected: delta.deselected,
            });
        }
    }

    /// Apply a selection operation with a column guaranteed visible, then
    /// announce the result.
    pub(crate) fn change_selection(
        &mut self,
        op: impl FnOnce(&mut SelectionModel) -> Option<SelectionDelta>,
    ) {
        let shown = self.show_first_column();
        let delta = op(&mut self.selection);
        self.hide_first_column(shown);
        self.selection_changed(delta);
    }

    pub(crate) fn focus_to(&mut self, row: Option<RowId>) {
        let old = self.selection.focus();
        if self.selection.set_focus(row) {
            self.emit(ItemEvent::FocusChanged { new: row, old });
        }
    }

    /// Show a column for the duration of a selection change if all are hidden.
    pub(crate) fn show_first_column(&mut self) -> bool {
        let shown = self.columns.show_first_column();
        if shown {
            self.backend.column_visibility_changed(0, true);
        }
        shown
    }

    pub(crate) fn hide_first_column(&mut self, shown: bool) {
        if shown {
            self.columns.hide_first_column(true);
            self.backend.column_visibility_changed(0, false);
        }
    }

    /// Forget per-column custom drawing once a non-virtual container is empty.
    pub(crate) fn reset_custom_draw(&mut self) {
        if self.style.virtual_items || self.draw.is_owner_draw() {
            return;
        }
        self.columns.reset_custom_draw();
    }

    pub(crate) fn begin_batch(&mut self) {
        self.redraw_depth += 1;
    }

    pub(crate) fn end_batch(&mut self) {
        if self.redraw_depth == 0 {
            return;
        }
        self.redraw_depth -= 1;
        if self.redraw_depth == 0 {
            let _span = PerfSpan::new("compact_ids");
            self.rows.compact();
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.provider = None;
        self.top_row = None;
        let _ = self.selection.clear();
        let _ = self.selection.set_focus(None);
        self.rows.reset();
        self.emit(ItemEvent::Disposed);
    }
}

pub(crate) mod sealed {
    use super::ContainerCore;
    use crate::id::RowId;

    pub trait Sealed: Sized {
        fn core(&self) -> &ContainerCore<Self>;

        fn core_mut(&mut self) -> &mut ContainerCore<Self>;

        /// Position of `row` among its siblings. `hint` is tried first.
        fn sibling_index(&self, row: RowId, hint: Option<usize>) -> Option<usize>;

        /// Drop every positional reference to rows.
        fn clear_positions(&mut self);
    }
}

/// Operations common to every item container.
///
/// Getters that read row content run the data provider first for rows that
/// have not been populated, which is why they take `&mut self`.
pub trait ItemContainer: sealed::Sealed {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Verify the calling thread and that the container is alive.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the creating one.
    fn check_widget(&self) -> Result<()> {
        self.core().check()
    }

    fn is_disposed(&self) -> bool {
        self.core().disposed
    }

    /// Dispose the container and every row in it.
    ///
    /// Later calls fail with [`ItemError::DisposedAccess`]. Disposing twice
    /// is a no-op.
    fn dispose(&mut self) {
        if self.check_widget().is_err() {
            return;
        }
        grove_core::grove_debug!(rows = self.core().rows.len(), "disposing container");
        self.clear_positions();
        self.core_mut().dispose();
    }

    fn style(&self) -> &ContainerStyle {
        &self.core().style
    }

    /// Signal carrying one [`ItemEvent`] per logical mutation.
    fn changed(&self) -> &Signal<ItemEvent> {
        &self.core().changed
    }

    /// The selection model, for connecting to its signals.
    fn selection_model(&self) -> &SelectionModel {
        &self.core().selection
    }

    fn set_backend(&mut self, backend: Box<dyn RenderBackend>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().backend = backend;
        Ok(())
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Install or remove the data provider for virtual rows.
    fn set_data_provider(&mut self, provider: Option<DataProvider<Self>>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().provider = provider;
        Ok(())
    }

    /// Install a closure as the data provider.
    fn on_populate<F>(&mut self, provider: F) -> Result<()>
    where
        F: Fn(&mut Self, RowId, usize) + Send + Sync + 'static,
    {
        self.set_data_provider(Some(Arc::new(provider)))
    }

    /// Make sure `row` has content, running the provider if needed.
    fn check_data(&mut self, row: RowId) -> Result<Population> {
        self.check_widget()?;
        Ok(population::check_data(self, row))
    }

    /// Borrow a row without running the data provider.
    fn row(&self, row: RowId) -> Result<&RowData> {
        self.check_widget()?;
        self.core().row(row)
    }

    /// Borrow a row after populating it.
    fn populated_row(&mut self, row: RowId) -> Result<&RowData> {
        self.check_data(row)?.into_result()?;
        self.core().row(row)
    }

    /// Returns `true` if `row` has content, without populating it.
    fn is_cached(&self, row: RowId) -> Result<bool> {
        Ok(self.row(row)?.is_cached())
    }

    // =========================================================================
    // Row Content
    // =========================================================================

    /// Text of the cell at column `column`, empty if out of range.
    fn text(&mut self, row: RowId, column: usize) -> Result<String> {
        Ok(self.populated_row(row)?.text(column).to_string())
    }

    /// Set the text of one cell. Out-of-range columns are ignored.
    fn set_text(&mut self, row: RowId, column: usize, text: impl Into<String>) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        let data = core.rows.get_mut(row).ok_or(ItemError::DisposedAccess)?;
        if let Some(cell) = data.cells.get_mut(column) {
            cell.text = text.into();
            data.mark_cached();
            core.backend.row_changed(row);
        }
        Ok(())
    }

    /// Set the text of consecutive cells starting at column 0.
    fn set_texts<S: AsRef<str>>(&mut self, row: RowId, texts: &[S]) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        let data = core.rows.get_mut(row).ok_or(ItemError::DisposedAccess)?;
        for (cell, text) in data.cells.iter_mut().zip(texts) {
            cell.text = text.as_ref().to_string();
        }
        data.mark_cached();
        core.backend.row_changed(row);
        Ok(())
    }

    fn font(&mut self, row: RowId) -> Result<Option<Font>> {
        Ok(self.populated_row(row)?.font().cloned())
    }

    fn set_font(&mut self, row: RowId, font: Option<Font>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_row(row, |data| data.font = font)
    }

    fn foreground(&mut self, row: RowId) -> Result<Option<Color>> {
        Ok(self.populated_row(row)?.foreground())
    }

    fn set_foreground(&mut self, row: RowId, color: Option<Color>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_row(row, |data| data.foreground = color)
    }

    fn background(&mut self, row: RowId) -> Result<Option<Color>> {
        Ok(self.populated_row(row)?.background())
    }

    fn set_background(&mut self, row: RowId, color: Option<Color>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_row(row, |data| data.background = color)
    }

    /// Font set on one cell, without inheritance.
    fn cell_font(&mut self, row: RowId, column: usize) -> Result<Option<Font>> {
        let data = self.populated_row(row)?;
        Ok(data.cell(column).and_then(|cell| cell.font.clone()))
    }

    /// Set a per-cell font. Setting one flags the column for custom drawing.
    fn set_cell_font(&mut self, row: RowId, column: usize, font: Option<Font>) -> Result<()> {
        let custom = font.is_some();
        self.check_widget()?;
        self.core_mut().update_cell(row, column, custom, |cell| cell.font = font)
    }

    fn cell_foreground(&mut self, row: RowId, column: usize) -> Result<Option<Color>> {
        let data = self.populated_row(row)?;
        Ok(data.cell(column).and_then(|cell| cell.foreground))
    }

    fn set_cell_foreground(&mut self, row: RowId, column: usize, color: Option<Color>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_cell(row, column, color.is_some(), |cell| cell.foreground = color)
    }

    fn cell_background(&mut self, row: RowId, column: usize) -> Result<Option<Color>> {
        let data = self.populated_row(row)?;
        Ok(data.cell(column).and_then(|cell| cell.background))
    }

    fn set_cell_background(&mut self, row: RowId, column: usize, color: Option<Color>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_cell(row, column, color.is_some(), |cell| cell.background = color)
    }

    /// Check state; always `false` without the `check` style.
    fn checked(&mut self, row: RowId) -> Result<bool> {
        let check = self.core().style.check;
        let data = self.populated_row(row)?;
        Ok(check && data.checked())
    }

    /// Set the check state. Ignored without the `check` style.
    fn set_checked(&mut self, row: RowId, checked: bool) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_check(row, |data| data.checked = checked)
    }

    /// Grayed state; always `false` without the `check` style.
    fn grayed(&mut self, row: RowId) -> Result<bool> {
        let check = self.core().style.check;
        let data = self.populated_row(row)?;
        Ok(check && data.grayed())
    }

    /// Set the grayed state. Ignored without the `check` style.
    fn set_grayed(&mut self, row: RowId, grayed: bool) -> Result<()> {
        self.check_widget()?;
        self.core_mut().update_check(row, |data| data.grayed = grayed)
    }

    // =========================================================================
    // Backend Queries
    // =========================================================================

    /// Answer a backend query for one cell.
    ///
    /// `model_index` is the first backend slot of a column. Returns `None`
    /// when it maps to no column. Virtual rows are populated on demand.
    fn cell_data(&mut self, model_index: usize, row: RowId) -> Result<Option<CellContent>> {
        self.check_widget()?;
        if self.core().columns.position_of_model_index(model_index).is_none() {
            return Ok(None);
        }
        self.check_data(row)?.into_result()?;

        // The provider may have changed columns or drawing.
        let core = self.core();
        let Some(column) = core.columns.position_of_model_index(model_index) else {
            return Ok(None);
        };
        let render_mode = core.draw.render_mode(core.columns.custom_draw(column));
        let check = core.style.check;
        let data = core.row(row)?;
        Ok(Some(CellContent {
            row,
            column,
            text: display_text(data.text(column)),
            font: data.effective_font(column).cloned(),
            foreground: data.effective_foreground(column),
            background: data.effective_background(column),
            checked: check && data.checked(),
            grayed: check && data.grayed(),
            render_mode,
        }))
    }

    // =========================================================================
    // Columns
    // =========================================================================

    fn column_model(&self) -> &ColumnModel {
        &self.core().columns
    }

    fn column_count(&self) -> Result<usize> {
        self.check_widget()?;
        Ok(self.core().columns.count())
    }

    fn column(&self, index: usize) -> Result<Column> {
        self.check_widget()?;
        let columns = &self.core().columns;
        columns
            .column(index)
            .cloned()
            .ok_or_else(|| ItemError::range(index, columns.count()))
    }

    /// Every column in creation order.
    fn columns(&self) -> Result<Vec<Column>> {
        self.check_widget()?;
        Ok(self.core().columns.columns().to_vec())
    }

    /// Creation index of `column`, matched by model index.
    fn index_of_column(&self, column: &Column) -> Result<Option<usize>> {
        self.check_widget()?;
        Ok(self
            .core()
            .columns
            .columns()
            .iter()
            .position(|candidate| candidate.model_index() == column.model_index()))
    }

    fn column_by_model_index(&self, model_index: usize) -> Result<Option<Column>> {
        self.check_widget()?;
        Ok(self
            .core()
            .columns
            .columns()
            .iter()
            .find(|column| column.model_index() == model_index)
            .cloned())
    }

    /// Create a column at creation index `index`, returning its model index.
    fn create_column(&mut self, index: usize, spec: ColumnSpec) -> Result<usize> {
        self.check_widget()?;
        let core = self.core_mut();
        let was_empty = core.columns.is_empty();
        let model_index = core.columns.create(index, spec)?;
        if let Some(sort) = core.sort_column
            && sort >= index
        {
            core.sort_column = Some(sort + 1);
        }
        if !was_empty {
            for (_, data) in core.rows.iter_mut() {
                data.insert_cell(index);
            }
        }
        tracing::debug!(target: targets::COLUMNS, index, model_index, "created column");
        core.backend.column_created(index, model_index);
        core.emit(ItemEvent::ColumnCreated { index, model_index });
        Ok(model_index)
    }

    /// Append a column.
    fn add_column(&mut self, spec: ColumnSpec) -> Result<usize> {
        let count = self.column_count()?;
        self.create_column(count, spec)
    }

    /// Destroy the column at creation index `index`.
    ///
    /// Destroying the only column keeps each row's text, now shown in the
    /// implicit column.
    fn destroy_column(&mut self, index: usize) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        let column = core.columns.destroy(index)?;
        if !core.columns.is_empty() {
            for (_, data) in core.rows.iter_mut() {
                data.remove_cell(index);
            }
        }
        core.sort_column = match core.sort_column {
            Some(sort) if sort == index => None,
            Some(sort) if sort > index => Some(sort - 1),
            sort => sort,
        };
        let model_index = column.model_index();
        tracing::debug!(target: targets::COLUMNS, index, model_index, "destroyed column");
        core.backend.column_destroyed(index, model_index);
        core.emit(ItemEvent::ColumnDestroyed { index, model_index });
        Ok(())
    }

    /// Creation indices in visual order.
    fn column_order(&self) -> Result<Vec<usize>> {
        self.check_widget()?;
        Ok(self.core().columns.order().to_vec())
    }

    /// Set the visual column order; must be a permutation of `0..count`.
    fn set_column_order(&mut self, order: &[usize]) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        if core.columns.set_order(order)? {
            core.backend.column_order_changed(order);
            core.emit(ItemEvent::ColumnOrderChanged {
                order: order.to_vec(),
            });
        }
        Ok(())
    }

    fn set_column_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        if core.columns.set_visible(index, visible)? {
            core.backend.column_visibility_changed(index, visible);
            core.emit(ItemEvent::ColumnVisibilityChanged { index, visible });
        }
        Ok(())
    }

    fn set_column_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_widget()?;
        self.core_mut().columns.set_text(index, text)
    }

    fn set_column_width(&mut self, index: usize, width: u32) -> Result<()> {
        self.check_widget()?;
        self.core_mut().columns.set_width(index, width)
    }

    // =========================================================================
    // Custom Drawing
    // =========================================================================

    /// Register a draw hook. The first hook switches owner drawing on for good.
    fn connect_draw_hook<F>(&mut self, hook: DrawHook, slot: F) -> Result<ConnectionId>
    where
        F: Fn(&DrawEvent) + Send + Sync + 'static,
    {
        self.check_widget()?;
        let core = self.core_mut();
        let (id, enabled) = core.draw.connect(hook, slot);
        if enabled {
            tracing::debug!(target: targets::COLUMNS, ?hook, "owner drawing enabled");
            core.backend.renderers_recreated();
            core.emit(ItemEvent::OwnerDrawEnabled);
        }
        Ok(id)
    }

    fn disconnect_draw_hook(&mut self, hook: DrawHook, id: ConnectionId) -> Result<bool> {
        self.check_widget()?;
        Ok(self.core().draw.disconnect(hook, id))
    }

    fn is_owner_draw(&self) -> bool {
        self.core().draw.is_owner_draw()
    }

    /// How cells of column `column` are rendered.
    fn render_mode(&self, column: usize) -> Result<RenderMode> {
        self.check_widget()?;
        let core = self.core();
        Ok(core.draw.render_mode(core.columns.custom_draw(column)))
    }

    /// Run the registered hooks of one kind for a cell.
    fn draw_cell(&self, hook: DrawHook, row: RowId, column: usize) -> Result<()> {
        self.check_widget()?;
        let core = self.core();
        core.row(row)?;
        core.draw.dispatch(DrawEvent { hook, row, column });
        Ok(())
    }

    // =========================================================================
    // Redraw Batching
    // =========================================================================

    /// Suppress (`false`) or re-enable (`true`) redraw. Calls nest.
    ///
    /// While suppressed the identity array grows geometrically; re-enabling
    /// the outermost level compacts it.
    fn set_redraw(&mut self, redraw: bool) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        if redraw {
            core.end_batch();
        } else {
            core.begin_batch();
        }
        Ok(())
    }

    fn redraw(&self) -> bool {
        self.core().redraw_depth == 0
    }

    /// Length of the identity array.
    fn id_capacity(&self) -> usize {
        self.core().rows.capacity()
    }

    /// Number of times the identity array has grown.
    fn id_growth_count(&self) -> usize {
        self.core().rows.growth_count()
    }

    // =========================================================================
    // Header
    // =========================================================================

    fn sort_column(&self) -> Result<Option<usize>> {
        self.check_widget()?;
        Ok(self.core().sort_column)
    }

    fn set_sort_column(&mut self, column: Option<usize>) -> Result<()> {
        self.check_widget()?;
        let core = self.core_mut();
        if let Some(index) = column
            && index >= core.columns.count()
        {
            return Err(ItemError::range(index, core.columns.count()));
        }
        core.sort_column = column;
        Ok(())
    }

    fn sort_direction(&self) -> Result<SortDirection> {
        self.check_widget()?;
        Ok(self.core().sort_direction)
    }

    fn set_sort_direction(&mut self, direction: SortDirection) -> Result<()> {
        self.check_widget()?;
        self.core_mut().sort_direction = direction;
        Ok(())
    }

    fn header_visible(&self) -> Result<bool> {
        self.check_widget()?;
        Ok(self.core().header_visible)
    }

    fn set_header_visible(&mut self, visible: bool) -> Result<()> {
        self.check_widget()?;
        self.core_mut().header_visible = visible;
        Ok(())
    }

    fn lines_visible(&self) -> Result<bool> {
        self.check_widget()?;
        Ok(self.core().lines_visible)
    }

    fn set_lines_visible(&mut self, visible: bool) -> Result<()> {
        self.check_widget()?;
        self.core_mut().lines_visible = visible;
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn selection_count(&self) -> Result<usize> {
        self.check_widget()?;
        Ok(self.core().selection.selected_count())
    }

    fn deselect_all(&mut self) -> Result<()> {
        self.check_widget()?;
        self.core_mut().change_selection(SelectionModel::clear);
        Ok(())
    }
}

/// Builder shared by tables and trees.
pub struct ContainerBuilder<C> {
    pub(crate) style: ContainerStyle,
    pub(crate) backend: Box<dyn RenderBackend>,
    pub(crate) provider: Option<DataProvider<C>>,
}

impl<C> Default for ContainerBuilder<C> {
    fn default() -> Self {
        Self {
            style: ContainerStyle::default(),
            backend: Box::new(NullBackend),
            provider: None,
        }
    }
}

impl<C> ContainerBuilder<C> {
    pub fn style(mut self, style: ContainerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn backend(mut self, backend: impl RenderBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    pub fn data_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&mut C, RowId, usize) + Send + Sync + 'static,
    {
        self.provider = Some(Arc::new(provider));
        self
    }

    pub(crate) fn into_core(self) -> ContainerCore<C> {
        let mut core = ContainerCore::new(self.style, self.backend);
        core.provider = self.provider;
        core
    }
}
