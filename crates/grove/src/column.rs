//! Column model.
//!
//! Columns are kept in creation order; the visual order is a separate
//! permutation. Each column owns a block of [`CELL_TYPES`] slots in the
//! backend's flat cell model, starting at its `model_index`. A container with
//! no columns still renders one implicit column at [`FIRST_COLUMN`].
//!
//! Model indices are never renumbered: destroying a column leaves the
//! survivors' indices untouched, and new columns always take a fresh block.

use serde::{Deserialize, Serialize};

use crate::error::{ItemError, Result};

/// Backend slot for the check state of a row.
pub const CHECKED_COLUMN: usize = 0;
/// Backend slot for the grayed state of a row.
pub const GRAYED_COLUMN: usize = 1;
/// Backend slot for the row foreground.
pub const FOREGROUND_COLUMN: usize = 2;
/// Backend slot for the row background.
pub const BACKGROUND_COLUMN: usize = 3;
/// Backend slot for the row font.
pub const FONT_COLUMN: usize = 4;
/// Model index of the first (or implicit) column.
pub const FIRST_COLUMN: usize = FONT_COLUMN + 1;
/// Slots reserved per column: text, image, foreground, background, font, custom draw.
pub const CELL_TYPES: usize = 6;

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Header properties used to create a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub text: String,
    pub width: u32,
    pub alignment: Alignment,
    pub resizable: bool,
    pub moveable: bool,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: 0,
            alignment: Alignment::Leading,
            resizable: true,
            moveable: false,
        }
    }
}

impl ColumnSpec {
    /// A column with header text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_moveable(mut self, moveable: bool) -> Self {
        self.moveable = moveable;
        self
    }
}

/// A live column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    spec: ColumnSpec,
    model_index: usize,
    custom_draw: bool,
    visible: bool,
}

impl Column {
    pub fn text(&self) -> &str {
        &self.spec.text
    }

    pub fn width(&self) -> u32 {
        self.spec.width
    }

    pub fn alignment(&self) -> Alignment {
        self.spec.alignment
    }

    pub fn is_resizable(&self) -> bool {
        self.spec.resizable
    }

    pub fn is_moveable(&self) -> bool {
        self.spec.moveable
    }

    /// First backend slot of this column.
    pub fn model_index(&self) -> usize {
        self.model_index
    }

    /// Whether cells in this column need custom rendering.
    pub fn custom_draw(&self) -> bool {
        self.custom_draw
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Columns of one container.
#[derive(Debug, Clone)]
pub struct ColumnModel {
    columns: Vec<Column>,
    order: Vec<usize>,
    first_custom_draw: bool,
    next_model_index: usize,
}

impl Default for ColumnModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnModel {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            order: Vec::new(),
            first_custom_draw: false,
            next_model_index: FIRST_COLUMN + CELL_TYPES,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Creation indices in visual order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Custom-draw flag of the implicit column.
    pub fn first_custom_draw(&self) -> bool {
        self.first_custom_draw
    }

    /// Number of cell slots each row needs.
    pub fn cell_count(&self) -> usize {
        self.columns.len().max(1)
    }

    /// Resolve a backend model index to a column position.
    ///
    /// Without columns only [`FIRST_COLUMN`] resolves, to position 0.
    pub fn position_of_model_index(&self, model_index: usize) -> Option<usize> {
        if self.columns.is_empty() {
            return (model_index == FIRST_COLUMN).then_some(0);
        }
        self.columns
            .iter()
            .position(|column| column.model_index == model_index)
    }

    /// Custom-draw flag for the column at `position`.
    pub fn custom_draw(&self, position: usize) -> bool {
        if self.columns.is_empty() {
            return position == 0 && self.first_custom_draw;
        }
        self.columns
            .get(position)
            .is_some_and(|column| column.custom_draw)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert a column at creation index `index`, returning its model index.
    ///
    /// The first column of a column-less model takes over the implicit
    /// mapping and its custom-draw flag.
    pub fn create(&mut self, index: usize, spec: ColumnSpec) -> Result<usize> {
        if index > self.columns.len() {
            return Err(ItemError::range(index, self.columns.len()));
        }

        let (model_index, custom_draw) = if self.columns.is_empty() {
            let inherited = std::mem::take(&mut self.first_custom_draw);
            (FIRST_COLUMN, inherited)
        } else {
            let model_index = self.next_model_index;
            self.next_model_index += CELL_TYPES;
            (model_index, false)
        };

        self.columns.insert(
            index,
            Column {
                spec,
                model_index,
                custom_draw,
                visible: true,
            },
        );

        for entry in &mut self.order {
            if *entry >= index {
                *entry += 1;
            }
        }
        let visual = index.min(self.order.len());
        self.order.insert(visual, index);

        Ok(model_index)
    }

    /// Remove the column at creation index `index`.
    ///
    /// Removing the last column hands its custom-draw flag back to the
    /// implicit column.
    pub fn destroy(&mut self, index: usize) -> Result<Column> {
        if index >= self.columns.len() {
            return Err(ItemError::range(index, self.columns.len()));
        }

        let column = self.columns.remove(index);
        self.order.retain(|&entry| entry != index);
        for entry in &mut self.order {
            if *entry > index {
                *entry -= 1;
            }
        }

        if self.columns.is_empty() {
            self.first_custom_draw = column.custom_draw;
        }
        Ok(column)
    }

    /// Replace the visual order.
    ///
    /// `order` must be a permutation of `0..count`. Nothing is applied unless
    /// the whole permutation is valid. Returns `true` if the order changed.
    pub fn set_order(&mut self, order: &[usize]) -> Result<bool> {
        let count = self.columns.len();
        if count == 0 {
            if order.is_empty() {
                return Ok(false);
            }
            return Err(ItemError::invalid("column order given for a container without columns"));
        }
        if order.len() != count {
            return Err(ItemError::invalid(format!(
                "column order has {} entries, expected {count}",
                order.len()
            )));
        }

        let mut seen = vec![false; count];
        for &entry in order {
            if entry >= count {
                return Err(ItemError::range(entry, count));
            }
            if std::mem::replace(&mut seen[entry], true) {
                return Err(ItemError::invalid(format!("column {entry} appears twice in order")));
            }
        }

        if self.order == order {
            return Ok(false);
        }
        self.order = order.to_vec();
        Ok(true)
    }

    /// Flag the column at `position` (or the implicit column) for custom drawing.
    ///
    /// Returns `true` if the flag was newly set.
    pub fn mark_custom_draw(&mut self, position: usize) -> bool {
        let flag = if self.columns.is_empty() {
            &mut self.first_custom_draw
        } else {
            match self.columns.get_mut(position) {
                Some(column) => &mut column.custom_draw,
                None => return false,
            }
        };
        !std::mem::replace(flag, true)
    }

    /// Clear every custom-draw flag.
    pub fn reset_custom_draw(&mut self) {
        self.first_custom_draw = false;
        for column in &mut self.columns {
            column.custom_draw = false;
        }
    }

    /// Show or hide a column. Returns `true` if visibility changed.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<bool> {
        let count = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or_else(|| ItemError::range(index, count))?;
        Ok(std::mem::replace(&mut column.visible, visible) != visible)
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let count = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or_else(|| ItemError::range(index, count))?;
        column.spec.text = text.into();
        Ok(())
    }

    pub fn set_width(&mut self, index: usize, width: u32) -> Result<()> {
        let count = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or_else(|| ItemError::range(index, count))?;
        column.spec.width = width;
        Ok(())
    }

    /// Make the first column visible if every column is hidden.
    ///
    /// Returns `true` if a column was shown and must be hidden again with
    /// [`hide_first_column`](Self::hide_first_column).
    pub fn show_first_column(&mut self) -> bool {
        if self.columns.is_empty() || self.columns.iter().any(|column| column.visible) {
            return false;
        }
        self.columns[0].visible = true;
        true
    }

    /// Undo [`show_first_column`](Self::show_first_column).
    pub fn hide_first_column(&mut self, shown: bool) {
        if shown && let Some(column) = self.columns.first_mut() {
            column.visible = false;
        }
    }
}
