//! Row storage.
//!
//! A [`RowData`] holds everything the container knows about one row: its
//! population state, per-column cell content, row-level defaults and, for
//! tree rows, its position in the hierarchy. Rows refer to their parent and
//! children only by [`RowId`]; the container owns all of them.

use crate::graphics::{Color, Font};
use crate::id::RowId;

/// Longest text handed to the rendering backend, in characters.
pub const TEXT_LIMIT: usize = 8192;

const ELLIPSIS: &str = "...";

/// Lazy population state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulationState {
    /// Content has not been supplied yet, or was cleared.
    #[default]
    Uncached,
    /// The data provider is running for this row.
    Populating,
    /// Content reflects application-set values or the last provider run.
    Cached,
}

/// Content of a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub text: String,
    /// `None` inherits the row font.
    pub font: Option<Font>,
    /// `None` inherits the row foreground.
    pub foreground: Option<Color>,
    /// `None` inherits the row background.
    pub background: Option<Color>,
}

/// A row of a table or a node of a tree.
#[derive(Debug, Clone)]
pub struct RowData {
    id: RowId,
    pub(crate) state: PopulationState,
    pub(crate) cells: Vec<CellData>,
    pub(crate) font: Option<Font>,
    pub(crate) foreground: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) checked: bool,
    pub(crate) grayed: bool,
    pub(crate) parent: Option<RowId>,
    pub(crate) children: Vec<Option<RowId>>,
    pub(crate) expanded: bool,
}

impl RowData {
    pub(crate) fn new(id: RowId, column_count: usize, parent: Option<RowId>) -> Self {
        Self {
            id,
            state: PopulationState::Uncached,
            cells: vec![CellData::default(); column_count.max(1)],
            font: None,
            foreground: None,
            background: None,
            checked: false,
            grayed: false,
            parent,
            children: Vec::new(),
            expanded: false,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn state(&self) -> PopulationState {
        self.state
    }

    /// Returns `true` once content has been supplied and not cleared since.
    ///
    /// A row whose provider is still running counts as cached.
    pub fn is_cached(&self) -> bool {
        self.state != PopulationState::Uncached
    }

    /// Returns `true` while the data provider is running for this row.
    pub fn is_setting_data(&self) -> bool {
        self.state == PopulationState::Populating
    }

    pub fn cells(&self) -> &[CellData] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&CellData> {
        self.cells.get(column)
    }

    /// Text of the cell at `column`, empty if out of range.
    pub fn text(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", |cell| cell.text.as_str())
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn grayed(&self) -> bool {
        self.grayed
    }

    pub fn parent(&self) -> Option<RowId> {
        self.parent
    }

    /// Child slots; `None` marks a child not materialized yet.
    pub fn children(&self) -> &[Option<RowId>] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Font used for `column` after inheritance.
    pub fn effective_font(&self, column: usize) -> Option<&Font> {
        self.cells
            .get(column)
            .and_then(|cell| cell.font.as_ref())
            .or(self.font.as_ref())
    }

    /// Foreground used for `column` after inheritance.
    pub fn effective_foreground(&self, column: usize) -> Option<Color> {
        self.cells
            .get(column)
            .and_then(|cell| cell.foreground)
            .or(self.foreground)
    }

    /// Background used for `column` after inheritance.
    pub fn effective_background(&self, column: usize) -> Option<Color> {
        self.cells
            .get(column)
            .and_then(|cell| cell.background)
            .or(self.background)
    }

    /// Reset all content to defaults and mark the row uncached.
    ///
    /// Does nothing while the row is being populated. Hierarchy links are
    /// kept. Returns `true` if the row was reset.
    pub(crate) fn clear(&mut self) -> bool {
        if self.is_setting_data() {
            return false;
        }
        for cell in &mut self.cells {
            *cell = CellData::default();
        }
        self.font = None;
        self.foreground = None;
        self.background = None;
        self.checked = false;
        self.grayed = false;
        self.state = PopulationState::Uncached;
        true
    }

    /// Record that application code supplied content.
    pub(crate) fn mark_cached(&mut self) {
        if self.state == PopulationState::Uncached {
            self.state = PopulationState::Cached;
        }
    }

    pub(crate) fn insert_cell(&mut self, index: usize) {
        let index = index.min(self.cells.len());
        self.cells.insert(index, CellData::default());
    }

    pub(crate) fn remove_cell(&mut self, index: usize) {
        if index < self.cells.len() && self.cells.len() > 1 {
            self.cells.remove(index);
        }
    }
}

/// Truncate `text` to [`TEXT_LIMIT`] characters, ending in an ellipsis.
pub fn display_text(text: &str) -> String {
    match text.char_indices().nth(TEXT_LIMIT) {
        None => text.to_string(),
        Some(_) => {
            let keep = TEXT_LIMIT - ELLIPSIS.len();
            let end = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
            let mut shown = String::with_capacity(end + ELLIPSIS.len());
            shown.push_str(&text[..end]);
            shown.push_str(ELLIPSIS);
            shown
        }
    }
}
