//! Hierarchical container of rows.
//!
//! A [`Tree`] keeps its top-level rows in a position list, and every row
//! keeps the position list of its children. A position holding `None` is a
//! placeholder of a virtual tree. Rows are addressed by `(parent, index)`
//! for structural operations and by [`RowId`] for everything else.
//!
//! ```
//! use grove::{ContainerStyle, ItemContainer, Tree};
//!
//! let mut tree = Tree::new(ContainerStyle::single());
//! let root = tree.add_item(None).unwrap();
//! let child = tree.add_item(Some(root)).unwrap();
//!
//! assert_eq!(tree.parent_item(child).unwrap(), Some(root));
//! assert_eq!(tree.item_count(Some(root)).unwrap(), 1);
//! ```

use grove_core::PerfSpan;
use grove_core::logging::targets;

use crate::container::sealed::Sealed;
use crate::container::{ContainerBuilder, ContainerCore, ItemContainer};
use crate::debug::RowTreeDebug;
use crate::error::{ItemError, Result};
use crate::event::ItemEvent;
use crate::id::RowId;
use crate::population;
use crate::style::ContainerStyle;

/// Builder for [`Tree`].
pub type TreeBuilder = ContainerBuilder<Tree>;

impl ContainerBuilder<Tree> {
    pub fn build(self) -> Tree {
        Tree {
            core: self.into_core(),
            roots: Vec::new(),
        }
    }
}

/// A hierarchy of optionally virtual rows.
#[derive(Debug)]
pub struct Tree {
    core: ContainerCore<Tree>,
    roots: Vec<Option<RowId>>,
}

impl Sealed for Tree {
    fn core(&self) -> &ContainerCore<Self> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContainerCore<Self> {
        &mut self.core
    }

    fn sibling_index(&self, row: RowId, hint: Option<usize>) -> Option<usize> {
        let parent = self.core.rows.get(row)?.parent;
        let siblings = self.siblings(parent).ok()?;
        if let Some(index) = hint
            && siblings.get(index) == Some(&Some(row))
        {
            return Some(index);
        }
        siblings.iter().position(|slot| *slot == Some(row))
    }

    fn clear_positions(&mut self) {
        self.roots.clear();
    }
}

impl ItemContainer for Tree {}

impl Tree {
    /// Create a tree with the given style.
    pub fn new(style: ContainerStyle) -> Self {
        Self::builder().style(style).build()
    }

    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    // ===== Position lists =====

    /// Children of `parent`, or the top-level rows for `None`.
    fn siblings(&self, parent: Option<RowId>) -> Result<&Vec<Option<RowId>>> {
        match parent {
            None => Ok(&self.roots),
            Some(parent) => Ok(&self.core.row(parent)?.children),
        }
    }

    fn siblings_mut(&mut self, parent: Option<RowId>) -> Result<&mut Vec<Option<RowId>>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(parent) => Ok(&mut self.core.row_mut(parent)?.children),
        }
    }

    /// Slot at `index` under `parent`, range-checked.
    fn slot(&self, parent: Option<RowId>, index: usize) -> Result<Option<RowId>> {
        let siblings = self.siblings(parent)?;
        siblings
            .get(index)
            .copied()
            .ok_or_else(|| ItemError::range(index, siblings.len()))
    }

    /// `root` and all its materialized descendants, depth first.
    fn subtree(&self, root: RowId) -> Vec<RowId> {
        let mut rows = Vec::new();
        let mut stack = vec![root];
        while let Some(row) = stack.pop() {
            rows.push(row);
            if let Some(data) = self.core.rows.get(row) {
                stack.extend(data.children.iter().rev().flatten().copied());
            }
        }
        rows
    }

    /// Every materialized row, depth first.
    fn walk(&self) -> Vec<RowId> {
        self.roots
            .iter()
            .flatten()
            .flat_map(|&root| self.subtree(root))
            .collect()
    }

    pub(crate) fn roots(&self) -> &[Option<RowId>] {
        &self.roots
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Number of children of `parent`, or of top-level rows for `None`.
    pub fn item_count(&self, parent: Option<RowId>) -> Result<usize> {
        self.check_widget()?;
        Ok(self.siblings(parent)?.len())
    }

    /// Grow or shrink the children of `parent` to `count`.
    ///
    /// Shrinking disposes the trailing rows with their descendants and fails
    /// without changing anything if one of them is populating.
    pub fn set_item_count(&mut self, parent: Option<RowId>, count: usize) -> Result<()> {
        self.check_widget()?;
        let old = self.siblings(parent)?.len();
        if count == old {
            return Ok(());
        }
        let _span = PerfSpan::new("tree_set_item_count");

        if count < old {
            let doomed: Vec<RowId> = self.siblings(parent)?[count..]
                .iter()
                .flatten()
                .flat_map(|&row| self.subtree(row))
                .collect();
            self.core
                .ensure_removable(&doomed, |row| self.sibling_index(row, None).unwrap_or(count))?;
            self.core.release_rows(&doomed);
            self.siblings_mut(parent)?.truncate(count);
            if self.core.rows.is_empty() {
                self.core.reset_custom_draw();
            }
            let removed: Vec<usize> = (count..old).collect();
            self.core.backend.rows_removed(parent, &removed);
        } else {
            if self.core.style.virtual_items {
                self.siblings_mut(parent)?.resize(count, None);
            } else {
                self.core.begin_batch();
                let mut created = Vec::with_capacity(count - old);
                for _ in old..count {
                    created.push(Some(self.core.new_row(parent)));
                }
                self.core.end_batch();
                self.siblings_mut(parent)?.extend(created);
            }
            self.core.backend.rows_inserted(parent, old, count - old);
        }

        tracing::debug!(target: targets::ITEMS, ?parent, old, new = count, "tree item count changed");
        self.core.emit(ItemEvent::ItemCountChanged {
            parent,
            old,
            new: count,
        });
        Ok(())
    }

    /// Insert a new row at `index` under `parent`.
    pub fn insert_item(&mut self, parent: Option<RowId>, index: usize) -> Result<RowId> {
        self.check_widget()?;
        let len = self.siblings(parent)?.len();
        if index > len {
            return Err(ItemError::range(index, len));
        }
        let id = self.core.new_row(parent);
        self.siblings_mut(parent)?.insert(index, Some(id));
        self.core.backend.rows_inserted(parent, index, 1);
        self.core.emit(ItemEvent::RowsInserted {
            parent,
            first: index,
            count: 1,
        });
        Ok(id)
    }

    /// Append a new row under `parent`.
    pub fn add_item(&mut self, parent: Option<RowId>) -> Result<RowId> {
        let count = self.item_count(parent)?;
        self.insert_item(parent, count)
    }

    /// Row bound to position `index` under `parent`, created if it is a
    /// placeholder. Does not populate it.
    pub fn get_or_create(&mut self, parent: Option<RowId>, index: usize) -> Result<RowId> {
        self.check_widget()?;
        if let Some(id) = self.slot(parent, index)? {
            return Ok(id);
        }
        let id = self.core.new_row(parent);
        self.siblings_mut(parent)?[index] = Some(id);
        tracing::trace!(target: targets::ITEMS, %id, ?parent, index, "materialized tree row");
        Ok(id)
    }

    /// Row at `index` under `parent`, materialized and populated.
    pub fn item(&mut self, parent: Option<RowId>, index: usize) -> Result<RowId> {
        let id = self.get_or_create(parent, index)?;
        population::check_data_at(self, id, Some(index)).into_result()
    }

    /// Children of `parent`, materialized and populated.
    pub fn items(&mut self, parent: Option<RowId>) -> Result<Vec<RowId>> {
        let count = self.item_count(parent)?;
        (0..count).map(|index| self.item(parent, index)).collect()
    }

    pub fn parent_item(&self, row: RowId) -> Result<Option<RowId>> {
        Ok(self.row(row)?.parent())
    }

    /// Position of `row` among its siblings.
    pub fn index_of(&self, row: RowId) -> Result<Option<usize>> {
        self.check_widget()?;
        Ok(self.sibling_index(row, None))
    }

    /// Remove `row` together with its descendants.
    pub fn remove_row(&mut self, row: RowId) -> Result<()> {
        self.check_widget()?;
        let parent = self.core.row(row)?.parent;
        let index = self.sibling_index(row, None).ok_or(ItemError::DisposedAccess)?;
        let doomed = self.subtree(row);
        self.core
            .ensure_removable(&doomed, |r| self.sibling_index(r, None).unwrap_or(index))?;

        self.core.release_rows(&doomed);
        self.siblings_mut(parent)?.remove(index);
        if self.core.rows.is_empty() {
            self.core.reset_custom_draw();
        }

        self.core.backend.rows_removed(parent, &[index]);
        tracing::debug!(target: targets::ITEMS, %row, rows = doomed.len(), "removed subtree");
        self.core.emit(ItemEvent::RowsRemoved {
            parent,
            indices: vec![index],
        });
        Ok(())
    }

    /// Remove every row.
    pub fn remove_all(&mut self) -> Result<()> {
        self.check_widget()?;
        if self.roots.is_empty() {
            return Ok(());
        }
        let doomed = self.walk();
        self.core
            .ensure_removable(&doomed, |row| self.sibling_index(row, None).unwrap_or(0))?;
        let _span = PerfSpan::new("tree_remove_all");

        let count = self.roots.len();
        self.core.release_rows(&doomed);
        self.roots.clear();
        self.core.rows.reset();
        self.core.reset_custom_draw();
        let removed: Vec<usize> = (0..count).collect();
        self.core.backend.rows_removed(None, &removed);
        tracing::debug!(target: targets::ITEMS, count, "removed all tree rows");
        self.core.emit(ItemEvent::AllRowsRemoved { count });
        Ok(())
    }

    // =========================================================================
    // Clearing
    // =========================================================================

    /// Reset the row at `index` under `parent` to uncached, and with `all`
    /// its descendants too.
    pub fn clear(&mut self, parent: Option<RowId>, index: usize, all: bool) -> Result<()> {
        self.check_widget()?;
        if let Some(row) = self.slot(parent, index)?
            && self.clear_subtree(row, all)
        {
            self.core.emit(ItemEvent::RowsCleared {
                parent,
                indices: vec![index],
                recursive: all,
            });
        }
        Ok(())
    }

    /// Reset every child of `parent`, and with `all` their descendants too.
    pub fn clear_all(&mut self, parent: Option<RowId>, all: bool) -> Result<()> {
        self.check_widget()?;
        let slots = self.siblings(parent)?.clone();
        let cleared: Vec<usize> = slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| Some((index, slot?)))
            .filter(|&(_, row)| self.clear_subtree(row, all))
            .map(|(index, _)| index)
            .collect();
        if !cleared.is_empty() {
            self.core.emit(ItemEvent::RowsCleared {
                parent,
                indices: cleared,
                recursive: all,
            });
        }
        Ok(())
    }

    fn clear_subtree(&mut self, row: RowId, all: bool) -> bool {
        let rows = if all { self.subtree(row) } else { vec![row] };
        rows.into_iter()
            .fold(false, |cleared, row| self.core.clear_row(row) | cleared)
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    pub fn is_expanded(&self, row: RowId) -> Result<bool> {
        Ok(self.row(row)?.is_expanded())
    }

    pub fn set_expanded(&mut self, row: RowId, expanded: bool) -> Result<()> {
        self.check_widget()?;
        let data = self.core.row_mut(row)?;
        if data.expanded != expanded {
            data.expanded = expanded;
            self.core.backend.row_changed(row);
            self.core.emit(ItemEvent::ExpandChanged { row, expanded });
        }
        Ok(())
    }

    /// Expand every materialized row that has children.
    pub fn expand_all(&mut self) -> Result<()> {
        self.set_all_expanded(true)
    }

    pub fn collapse_all(&mut self) -> Result<()> {
        self.set_all_expanded(false)
    }

    fn set_all_expanded(&mut self, expanded: bool) -> Result<()> {
        self.check_widget()?;
        let changed: Vec<RowId> = self
            .core
            .rows
            .iter_mut()
            .filter(|(_, data)| !data.children.is_empty() && data.expanded != expanded)
            .map(|(id, data)| {
                data.expanded = expanded;
                id
            })
            .collect();
        for row in changed {
            self.core.backend.row_changed(row);
            self.core.emit(ItemEvent::ExpandChanged { row, expanded });
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn ensure_live(&self, row: RowId) -> Result<()> {
        if self.core.rows.contains(row) {
            Ok(())
        } else {
            Err(ItemError::invalid(format!("row {row} is not in this tree")))
        }
    }

    /// Add `row` to the selection.
    pub fn select(&mut self, row: RowId) -> Result<()> {
        self.check_widget()?;
        self.ensure_live(row)?;
        self.core.change_selection(|selection| selection.select(&[row]));
        Ok(())
    }

    /// Remove `row` from the selection. Unknown rows are ignored.
    pub fn deselect(&mut self, row: RowId) -> Result<()> {
        self.check_widget()?;
        self.core.change_selection(|selection| selection.deselect(&[row]));
        Ok(())
    }

    /// Select every row, materializing placeholders. A no-op for
    /// single-select trees.
    pub fn select_all(&mut self) -> Result<()> {
        self.check_widget()?;
        if self.core.style.is_single() {
            return Ok(());
        }
        let rows = self.materialize_all()?;
        self.core.change_selection(|selection| selection.select(&rows));
        Ok(())
    }

    fn materialize_all(&mut self) -> Result<Vec<RowId>> {
        let mut rows = Vec::new();
        let mut pending = vec![None];
        while let Some(parent) = pending.pop() {
            for index in 0..self.siblings(parent)?.len() {
                let row = self.get_or_create(parent, index)?;
                rows.push(row);
                pending.push(Some(row));
            }
        }
        Ok(rows)
    }

    /// Replace the selection with `rows`.
    ///
    /// Fails with [`ItemError::InvalidArgument`] if a row is not in this
    /// tree. Single-select trees keep their selection when given more than
    /// one row.
    pub fn set_selection(&mut self, rows: &[RowId]) -> Result<()> {
        self.check_widget()?;
        for &row in rows {
            self.ensure_live(row)?;
        }
        self.core
            .change_selection(|selection| selection.set_selection(rows));
        Ok(())
    }

    /// Selected rows in display order.
    pub fn selection(&self) -> Result<Vec<RowId>> {
        self.check_widget()?;
        Ok(self
            .walk()
            .into_iter()
            .filter(|&row| self.core.selection.is_selected(row))
            .collect())
    }

    pub fn is_selected(&self, row: RowId) -> Result<bool> {
        self.check_widget()?;
        Ok(self.core.selection.is_selected(row))
    }

    pub fn focus_item(&self) -> Result<Option<RowId>> {
        self.check_widget()?;
        Ok(self.core.selection.focus())
    }

    /// Move focus to `row` without changing the selection.
    pub fn set_focus_item(&mut self, row: RowId) -> Result<()> {
        self.check_widget()?;
        self.ensure_live(row)?;
        self.core.focus_to(Some(row));
        Ok(())
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Row scrolled to the top, defaulting to the first top-level row.
    pub fn top_item(&self) -> Result<Option<RowId>> {
        self.check_widget()?;
        Ok(self
            .core
            .top_row
            .or_else(|| self.roots.first().copied().flatten()))
    }

    pub fn set_top_item(&mut self, row: RowId) -> Result<()> {
        self.check_widget()?;
        self.ensure_live(row)?;
        self.core.top_row = Some(row);
        Ok(())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Printable outline of the materialized rows.
    pub fn debug_tree(&self) -> RowTreeDebug<'_> {
        RowTreeDebug::new(self)
    }
}

static_assertions::assert_impl_all!(Tree: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::PopulationState;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> (Tree, RowId, RowId, RowId) {
        let mut tree = Tree::new(ContainerStyle::multi());
        let a = tree.add_item(None).unwrap();
        let b = tree.add_item(Some(a)).unwrap();
        let c = tree.add_item(Some(b)).unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn test_virtual_tree_populates_on_demand() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let mut tree = Tree::builder()
            .style(ContainerStyle::single().with_virtual())
            .data_provider(move |tree: &mut Tree, row, index| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
                tree.set_text(row, 0, format!("node {index}")).unwrap();
            })
            .build();

        tree.set_item_count(None, 3).unwrap();
        let row = tree.item(None, 1).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(tree.text(row, 0).unwrap(), "node 1");

        tree.clear(None, 1, false).unwrap();
        assert_eq!(tree.row(row).unwrap().state(), PopulationState::Uncached);
        assert_eq!(tree.text(row, 0).unwrap(), "node 1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut tree = Tree::new(ContainerStyle::single().with_virtual());
        tree.set_item_count(None, 2).unwrap();

        let first = tree.get_or_create(None, 0).unwrap();
        assert_eq!(tree.get_or_create(None, 0).unwrap(), first);
        assert!(!tree.is_cached(first).unwrap());
        assert_eq!(tree.get_or_create(None, 2), Err(ItemError::range(2, 2)));
    }

    #[test]
    fn test_nested_counts_and_parents() {
        let (mut tree, a, b, c) = sample();
        assert_eq!(tree.item_count(None).unwrap(), 1);
        assert_eq!(tree.item_count(Some(a)).unwrap(), 1);
        assert_eq!(tree.parent_item(c).unwrap(), Some(b));
        assert_eq!(tree.parent_item(a).unwrap(), None);

        let d = tree.insert_item(Some(a), 0).unwrap();
        assert_eq!(tree.index_of(d).unwrap(), Some(0));
        assert_eq!(tree.index_of(b).unwrap(), Some(1));
        assert_eq!(tree.items(Some(a)).unwrap(), vec![d, b]);
    }

    #[test]
    fn test_provider_receives_sibling_index() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let mut tree = Tree::builder()
            .style(ContainerStyle::single().with_virtual())
            .data_provider(move |tree: &mut Tree, row, index| {
                let parent = tree.parent_item(row).unwrap();
                seen_clone.lock().push((parent, index));
            })
            .build();
        tree.set_item_count(None, 2).unwrap();
        let root = tree.item(None, 1).unwrap();
        tree.set_item_count(Some(root), 4).unwrap();
        tree.item(Some(root), 3).unwrap();

        assert_eq!(*seen.lock(), vec![(None, 1), (Some(root), 3)]);
    }

    #[test]
    fn test_remove_row_cascades() {
        let (mut tree, a, b, c) = sample();
        tree.select(c).unwrap();
        tree.remove_row(b).unwrap();

        assert!(tree.row(b).is_err());
        assert!(tree.row(c).is_err());
        assert_eq!(tree.item_count(Some(a)).unwrap(), 0);
        assert_eq!(tree.selection().unwrap(), Vec::<RowId>::new());
    }

    #[test]
    fn test_remove_ancestor_during_population_is_rejected() {
        let result = Arc::new(Mutex::new(None));
        let result_clone = result.clone();
        let mut tree = Tree::builder()
            .style(ContainerStyle::single().with_virtual())
            .data_provider(move |tree: &mut Tree, row, _index| {
                if let Some(parent) = tree.parent_item(row).unwrap() {
                    *result_clone.lock() = Some(tree.remove_row(parent));
                }
            })
            .build();
        tree.set_item_count(None, 1).unwrap();
        let root = tree.get_or_create(None, 0).unwrap();
        tree.set_item_count(Some(root), 3).unwrap();

        tree.item(Some(root), 2).unwrap();
        assert_eq!(
            *result.lock(),
            Some(Err(ItemError::IllegalRemovalDuringPopulation { index: 2 }))
        );
        assert_eq!(tree.item_count(Some(root)).unwrap(), 3);
    }

    #[test]
    fn test_shrink_releases_descendants() {
        let (mut tree, a, b, c) = sample();
        tree.set_item_count(Some(a), 0).unwrap();
        assert!(tree.row(b).is_err());
        assert!(tree.row(c).is_err());

        tree.set_item_count(None, 0).unwrap();
        assert_eq!(tree.item_count(None).unwrap(), 0);
        assert!(tree.row(a).is_err());
    }

    #[test]
    fn test_recursive_clear() {
        let (mut tree, a, b, c) = sample();
        for row in [a, b, c] {
            tree.set_text(row, 0, "text").unwrap();
        }

        tree.clear(None, 0, false).unwrap();
        assert!(!tree.is_cached(a).unwrap());
        assert!(tree.is_cached(c).unwrap());
        assert_eq!(tree.parent_item(b).unwrap(), Some(a));

        tree.clear_all(None, true).unwrap();
        assert_eq!(tree.text(c, 0).unwrap(), "");
        assert_eq!(tree.items(Some(b)).unwrap(), vec![c]);
    }

    #[test]
    fn test_expand_collapse() {
        let (mut tree, a, b, c) = sample();
        let events = Arc::new(AtomicUsize::new(0));
        let events_clone = events.clone();
        tree.changed().connect(move |event| {
            if matches!(event, ItemEvent::ExpandChanged { .. }) {
                events_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        tree.set_expanded(a, true).unwrap();
        tree.set_expanded(a, true).unwrap();
        assert!(tree.is_expanded(a).unwrap());
        assert_eq!(events.load(Ordering::SeqCst), 1);

        tree.expand_all().unwrap();
        assert!(tree.is_expanded(b).unwrap());
        assert!(!tree.is_expanded(c).unwrap());
        assert_eq!(events.load(Ordering::SeqCst), 2);

        tree.collapse_all().unwrap();
        assert!(!tree.is_expanded(a).unwrap());
        assert_eq!(events.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_selection_by_id() {
        let (mut tree, a, b, c) = sample();
        tree.select(c).unwrap();
        tree.select(a).unwrap();
        assert_eq!(tree.selection().unwrap(), vec![a, c]);

        tree.deselect(c).unwrap();
        assert!(!tree.is_selected(c).unwrap());

        tree.set_selection(&[b, c]).unwrap();
        assert_eq!(tree.selection().unwrap(), vec![b, c]);

        tree.remove_row(c).unwrap();
        assert!(matches!(tree.select(c), Err(ItemError::InvalidArgument(_))));
        assert!(matches!(
            tree.set_selection(&[a, c]),
            Err(ItemError::InvalidArgument(_))
        ));
        assert_eq!(tree.selection().unwrap(), vec![b]);
    }

    #[test]
    fn test_single_select_tree() {
        let mut tree = Tree::new(ContainerStyle::single());
        let a = tree.add_item(None).unwrap();
        let b = tree.add_item(None).unwrap();

        tree.select(a).unwrap();
        tree.set_selection(&[a, b]).unwrap();
        tree.select_all().unwrap();
        assert_eq!(tree.selection().unwrap(), vec![a]);

        tree.select(b).unwrap();
        assert_eq!(tree.selection().unwrap(), vec![b]);
    }

    #[test]
    fn test_select_all_materializes() {
        let mut tree = Tree::new(ContainerStyle::multi().with_virtual());
        tree.set_item_count(None, 3).unwrap();
        let root = tree.get_or_create(None, 0).unwrap();
        tree.set_item_count(Some(root), 2).unwrap();

        tree.select_all().unwrap();
        assert_eq!(tree.selection_count().unwrap(), 5);
        assert_eq!(tree.selection().unwrap().len(), 5);
        assert!(!tree.is_cached(root).unwrap());
    }

    #[test]
    fn test_focus_and_top_item() {
        let (mut tree, a, b, _c) = sample();
        assert_eq!(tree.top_item().unwrap(), Some(a));

        tree.set_focus_item(b).unwrap();
        assert_eq!(tree.focus_item().unwrap(), Some(b));
        assert_eq!(tree.selection_count().unwrap(), 0);

        tree.set_top_item(b).unwrap();
        assert_eq!(tree.top_item().unwrap(), Some(b));

        tree.remove_row(b).unwrap();
        assert_eq!(tree.focus_item().unwrap(), None);
        assert_eq!(tree.top_item().unwrap(), Some(a));
    }

    #[test]
    fn test_remove_all_then_reuse() {
        let (mut tree, a, _b, _c) = sample();
        tree.remove_all().unwrap();
        assert_eq!(tree.item_count(None).unwrap(), 0);
        assert_eq!(tree.top_item().unwrap(), None);

        let fresh = tree.add_item(None).unwrap();
        assert_eq!(fresh, a);
    }

    #[test]
    fn test_dispose_clears_everything() {
        let (mut tree, a, _b, _c) = sample();
        tree.dispose();
        assert!(tree.is_disposed());
        assert_eq!(tree.item_count(None), Err(ItemError::DisposedAccess));
        assert_eq!(tree.text(a, 0), Err(ItemError::DisposedAccess));
    }
}
