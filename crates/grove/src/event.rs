//! Change notifications emitted by containers.

use crate::id::RowId;

/// One logical mutation of a container.
///
/// Events go out through the container's `changed` signal after the mutation
/// has been applied, and only when something actually changed. Structural,
/// selection, focus, check, expansion and column layout changes emit one
/// event each; an operation that moves focus and selects emits
/// [`FocusChanged`](Self::FocusChanged) then
/// [`SelectionChanged`](Self::SelectionChanged). Cell content, fonts,
/// colors, column captions and widths, and header state only reach the
/// backend through [`RenderBackend::row_changed`](crate::RenderBackend::row_changed)
/// or not at all. `parent` is `None` for top-level rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    RowsInserted {
        parent: Option<RowId>,
        first: usize,
        count: usize,
    },
    /// Sibling positions as they were before removal, ascending.
    RowsRemoved {
        parent: Option<RowId>,
        indices: Vec<usize>,
    },
    AllRowsRemoved {
        count: usize,
    },
    /// Sibling positions whose rows went back to uncached, ascending.
    RowsCleared {
        parent: Option<RowId>,
        indices: Vec<usize>,
        recursive: bool,
    },
    ItemCountChanged {
        parent: Option<RowId>,
        old: usize,
        new: usize,
    },
    SelectionChanged {
        selected: Vec<RowId>,
        deselected: Vec<RowId>,
    },
    FocusChanged {
        new: Option<RowId>,
        old: Option<RowId>,
    },
    CheckChanged {
        row: RowId,
        checked: bool,
        grayed: bool,
    },
    ExpandChanged {
        row: RowId,
        expanded: bool,
    },
    ColumnCreated {
        index: usize,
        model_index: usize,
    },
    ColumnDestroyed {
        index: usize,
        model_index: usize,
    },
    ColumnOrderChanged {
        order: Vec<usize>,
    },
    ColumnVisibilityChanged {
        index: usize,
        visible: bool,
    },
    OwnerDrawEnabled,
    Disposed,
}

impl ItemEvent {
    /// Returns `true` for events that change which rows exist.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::RowsInserted { .. }
                | Self::RowsRemoved { .. }
                | Self::AllRowsRemoved { .. }
                | Self::ItemCountChanged { .. }
        )
    }
}
