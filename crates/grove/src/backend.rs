//! Interface to the rendering backend.
//!
//! The backend keeps its own structures (native column headers, row
//! iterators) in sync through the notifications of [`RenderBackend`], and
//! asks the container for cell content through `cell_data` on
//! [`ItemContainer`](crate::container::ItemContainer). Notifications are
//! one-way; the backend cannot veto a change.

use crate::custom_draw::RenderMode;
use crate::graphics::{Color, Font};
use crate::id::RowId;

/// Receiver of structural notifications.
///
/// Every method has an empty default so backends only implement what they
/// track.
#[allow(unused_variables)]
pub trait RenderBackend: Send + Sync {
    fn column_created(&mut self, index: usize, model_index: usize) {}

    fn column_destroyed(&mut self, index: usize, model_index: usize) {}

    /// `order` lists creation indices in visual order.
    fn column_order_changed(&mut self, order: &[usize]) {}

    fn column_visibility_changed(&mut self, index: usize, visible: bool) {}

    /// Owner drawing was switched on; renderers must be recreated.
    fn renderers_recreated(&mut self) {}

    fn rows_inserted(&mut self, parent: Option<RowId>, first: usize, count: usize) {}

    /// `indices` are sibling positions before removal, ascending.
    fn rows_removed(&mut self, parent: Option<RowId>, indices: &[usize]) {}

    /// Content of `row` changed and should be redrawn.
    fn row_changed(&mut self, row: RowId) {}
}

/// Backend that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl RenderBackend for NullBackend {}

/// Renderable content of one cell, as answered to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CellContent {
    pub row: RowId,
    /// Creation index of the column.
    pub column: usize,
    /// Text, truncated for display.
    pub text: String,
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub checked: bool,
    pub grayed: bool,
    pub render_mode: RenderMode,
}
