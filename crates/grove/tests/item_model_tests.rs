//! Tests for the shared item model of tables and trees.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use grove::{
    CellContent, Color, ColumnSpec, ContainerStyle, DrawHook, Font, GrowthPolicy, IdAllocator,
    ItemContainer, ItemError, ItemEvent, RenderBackend, RenderMode, RowId, Table, Tree,
};

/// Backend recording every notification as a short string.
#[derive(Clone, Default)]
struct RecordingBackend {
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingBackend {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.lock())
    }
}

impl RenderBackend for RecordingBackend {
    fn column_created(&mut self, index: usize, model_index: usize) {
        self.log.lock().push(format!("column_created {index} {model_index}"));
    }

    fn column_destroyed(&mut self, index: usize, model_index: usize) {
        self.log.lock().push(format!("column_destroyed {index} {model_index}"));
    }

    fn column_order_changed(&mut self, order: &[usize]) {
        self.log.lock().push(format!("column_order_changed {order:?}"));
    }

    fn renderers_recreated(&mut self) {
        self.log.lock().push("renderers_recreated".into());
    }

    fn rows_inserted(&mut self, _parent: Option<RowId>, first: usize, count: usize) {
        self.log.lock().push(format!("rows_inserted {first} {count}"));
    }

    fn rows_removed(&mut self, _parent: Option<RowId>, indices: &[usize]) {
        self.log.lock().push(format!("rows_removed {indices:?}"));
    }
}

fn collect_events<C: ItemContainer>(container: &C) -> Arc<Mutex<Vec<ItemEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    container.changed().connect(move |event| {
        events_clone.lock().push(event.clone());
    });
    events
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_live_ids_are_unique() {
    let mut table = Table::new(ContainerStyle::multi());
    table.set_item_count(50).unwrap();
    table.remove_indices(&[3, 10, 20, 49]).unwrap();
    for _ in 0..10 {
        table.add_item().unwrap();
    }

    let mut ids = table.items().unwrap();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
    assert_eq!(count, 56);
}

#[test]
fn test_released_id_is_reused_without_stale_data() {
    let mut table = Table::new(ContainerStyle::single().with_check());
    table.set_item_count(3).unwrap();
    let doomed = table.item(1).unwrap();
    table.set_text(doomed, 0, "old").unwrap();
    table.set_checked(doomed, true).unwrap();

    table.remove(1).unwrap();
    let mut reused = None;
    for _ in 0..8 {
        let row = table.add_item().unwrap();
        if row == doomed {
            reused = Some(row);
        }
    }

    let reused = reused.expect("released id handed out again");
    assert_eq!(table.text(reused, 0).unwrap(), "");
    assert!(!table.checked(reused).unwrap());
}

#[test]
fn test_growth_policy_bounds() {
    let mut batched = IdAllocator::new(GrowthPolicy::default());
    let mut unbatched = IdAllocator::new(GrowthPolicy::default());
    for i in 0..10_000 {
        batched.allocate(i, true);
        unbatched.allocate(i, false);
    }

    assert!(batched.growth_count() <= 25);
    assert!(unbatched.growth_count() >= 10_000 / 4 - 1);
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_each_row_populated_once_per_clear() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let mut table = Table::builder()
        .style(ContainerStyle::single().with_virtual())
        .data_provider(move |table: &mut Table, row, index| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            table.set_text(row, 0, format!("{index}")).unwrap();
        })
        .build();
    table.set_item_count(20).unwrap();

    for _ in 0..3 {
        for index in 0..20 {
            table.item(index).unwrap();
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 20);

    table.clear_range(5..10).unwrap();
    table.items().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 25);
}

#[test]
fn test_set_item_count_round_trip_and_clear() {
    let mut table = Table::new(ContainerStyle::single());
    table.set_item_count(5).unwrap();
    assert_eq!(table.item_count().unwrap(), 5);

    let row = table.item(4).unwrap();
    table.set_text(row, 0, "filled").unwrap();
    table.clear(4).unwrap();
    assert_eq!(table.text(row, 0).unwrap(), "");
}

#[test]
fn test_removal_during_population_keeps_count() {
    let refused = Arc::new(Mutex::new(Vec::new()));
    let refused_clone = refused.clone();
    let mut table = Table::builder()
        .style(ContainerStyle::multi().with_virtual())
        .data_provider(move |table: &mut Table, _row, index| {
            refused_clone.lock().push(table.remove(index));
            refused_clone.lock().push(table.remove_all());
        })
        .build();
    table.set_item_count(4).unwrap();

    table.item(2).unwrap();
    assert_eq!(
        *refused.lock(),
        vec![
            Err(ItemError::IllegalRemovalDuringPopulation { index: 2 }),
            Err(ItemError::IllegalRemovalDuringPopulation { index: 2 }),
        ]
    );
    assert_eq!(table.item_count().unwrap(), 4);
}

#[test]
fn test_provider_may_read_other_rows() {
    let mut table = Table::builder()
        .style(ContainerStyle::single().with_virtual())
        .data_provider(|table: &mut Table, row, index| {
            let text = if index == 0 {
                "first".to_string()
            } else {
                let previous = table.item(index - 1).unwrap();
                format!("after {}", table.text(previous, 0).unwrap())
            };
            table.set_text(row, 0, text).unwrap();
        })
        .build();
    table.set_item_count(3).unwrap();

    let last = table.item(2).unwrap();
    assert_eq!(table.text(last, 0).unwrap(), "after after first");
}

#[test]
fn test_provider_disposing_container() {
    let mut tree = Tree::builder()
        .style(ContainerStyle::single().with_virtual())
        .data_provider(|tree: &mut Tree, _row, _index| tree.dispose())
        .build();
    tree.set_item_count(None, 1).unwrap();
    let row = tree.get_or_create(None, 0).unwrap();

    assert_eq!(tree.text(row, 0), Err(ItemError::DisposedAccess));
    assert!(tree.is_disposed());
}

#[test]
fn test_virtual_tree_scenario() {
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
    assert_eq!(tree.text(row, 0).unwrap(), "node 1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tree.clear(None, 1, false).unwrap();
    assert!(!tree.is_cached(row).unwrap());
    assert_eq!(tree.text(row, 0).unwrap(), "node 1");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_single_select_ignores_multi_set_selection() {
    let mut table = Table::new(ContainerStyle::single());
    table.set_item_count(4).unwrap();
    table.set_selection(0).unwrap();

    table.set_selection_indices(&[1, 2]).unwrap();
    assert_eq!(table.selection_indices().unwrap(), vec![0]);

    let mut tree = Tree::new(ContainerStyle::single());
    let a = tree.add_item(None).unwrap();
    let b = tree.add_item(None).unwrap();
    tree.set_selection(&[a]).unwrap();
    tree.set_selection(&[a, b]).unwrap();
    assert_eq!(tree.selection().unwrap(), vec![a]);
}

#[test]
fn test_selection_events() {
    let mut table = Table::new(ContainerStyle::multi());
    table.set_item_count(3).unwrap();
    let rows = table.items().unwrap();
    let events = collect_events(&table);

    table.select_indices(&[0, 2]).unwrap();
    table.select(0).unwrap();
    table.deselect_all().unwrap();

    let events = events.lock();
    assert_eq!(
        *events,
        vec![
            ItemEvent::SelectionChanged {
                selected: vec![rows[0], rows[2]],
                deselected: vec![],
            },
            ItemEvent::SelectionChanged {
                selected: vec![],
                deselected: vec![rows[0], rows[2]],
            },
        ]
    );
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_destroying_only_column_keeps_text() {
    let mut table = Table::new(ContainerStyle::single());
    table.add_column(ColumnSpec::new("Name")).unwrap();
    let row = table.add_item().unwrap();
    table.set_text(row, 0, "kept").unwrap();

    table.destroy_column(0).unwrap();
    assert_eq!(table.column_count().unwrap(), 0);
    assert_eq!(table.text(row, 0).unwrap(), "kept");
}

#[test]
fn test_first_column_preserves_existing_text() {
    let mut table = Table::new(ContainerStyle::single());
    let row = table.add_item().unwrap();
    table.set_text(row, 0, "before columns").unwrap();

    table.add_column(ColumnSpec::new("A")).unwrap();
    table.add_column(ColumnSpec::new("B")).unwrap();
    assert_eq!(table.text(row, 0).unwrap(), "before columns");
    assert_eq!(table.text(row, 1).unwrap(), "");

    table.create_column(0, ColumnSpec::new("Z")).unwrap();
    assert_eq!(table.text(row, 0).unwrap(), "");
    assert_eq!(table.text(row, 1).unwrap(), "before columns");
}

#[test]
fn test_column_order_validation() {
    let mut table = Table::new(ContainerStyle::single());
    table.set_column_order(&[]).unwrap();
    for name in ["A", "B", "C"] {
        table.add_column(ColumnSpec::new(name)).unwrap();
    }

    table.set_column_order(&[2, 0, 1]).unwrap();
    assert_eq!(table.column_order().unwrap(), vec![2, 0, 1]);

    assert!(matches!(
        table.set_column_order(&[0, 1]),
        Err(ItemError::InvalidArgument(_))
    ));
    assert!(matches!(
        table.set_column_order(&[0, 0, 1]),
        Err(ItemError::InvalidArgument(_))
    ));
    assert!(matches!(
        table.set_column_order(&[0, 1, 7]),
        Err(ItemError::InvalidRange { .. })
    ));
    assert_eq!(table.column_order().unwrap(), vec![2, 0, 1]);
}

#[test]
fn test_column_lookup() {
    let mut table = Table::new(ContainerStyle::single());
    let first = table.add_column(ColumnSpec::new("A")).unwrap();
    let second = table.add_column(ColumnSpec::new("B")).unwrap();
    assert_ne!(first, second);

    let column = table.column_by_model_index(second).unwrap().unwrap();
    assert_eq!(column.text(), "B");
    assert_eq!(table.index_of_column(&column).unwrap(), Some(1));
    assert_eq!(table.columns().unwrap().len(), 2);
    assert_eq!(table.column_by_model_index(999).unwrap(), None);
}

#[test]
fn test_sort_column_follows_column_changes() {
    let mut table = Table::new(ContainerStyle::single());
    for name in ["A", "B", "C"] {
        table.add_column(ColumnSpec::new(name)).unwrap();
    }
    table.set_sort_column(Some(2)).unwrap();
    table.destroy_column(0).unwrap();
    assert_eq!(table.sort_column().unwrap(), Some(1));
    assert_eq!(table.column(1).unwrap().text(), "C");

    table.destroy_column(1).unwrap();
    assert_eq!(table.sort_column().unwrap(), None);

    let mut table = Table::new(ContainerStyle::single());
    table.add_column(ColumnSpec::new("A")).unwrap();
    table.add_column(ColumnSpec::new("B")).unwrap();
    table.set_sort_column(Some(1)).unwrap();
    table.create_column(0, ColumnSpec::new("Z")).unwrap();
    assert_eq!(table.sort_column().unwrap(), Some(2));
    assert_eq!(table.column(2).unwrap().text(), "B");

    table.create_column(3, ColumnSpec::new("Y")).unwrap();
    assert_eq!(table.sort_column().unwrap(), Some(2));
}

#[test]
fn test_backend_notifications() {
    let backend = RecordingBackend::default();
    let mut table = Table::builder().backend(backend.clone()).build();

    table.add_column(ColumnSpec::new("A")).unwrap();
    table.add_column(ColumnSpec::new("B")).unwrap();
    table.set_column_order(&[1, 0]).unwrap();
    table.set_item_count(3).unwrap();
    table.remove_indices(&[0, 2]).unwrap();
    table.destroy_column(1).unwrap();

    let log = backend.take();
    assert_eq!(log[0], "column_created 0 5");
    assert!(log[1].starts_with("column_created 1 "));
    assert_eq!(log[2], "column_order_changed [1, 0]");
    assert_eq!(log[3], "rows_inserted 0 3");
    assert_eq!(log[4], "rows_removed [0, 2]");
    assert!(log[5].starts_with("column_destroyed 1 "));
}

// ============================================================================
// Cell Queries and Custom Draw
// ============================================================================

#[test]
fn test_cell_data_populates_on_demand() {
    let mut table = Table::builder()
        .style(ContainerStyle::single().with_virtual().with_check())
        .data_provider(|table: &mut Table, row, index| {
            table.set_text(row, 0, "x".repeat(10_000)).unwrap();
            table.set_checked(row, index % 2 == 0).unwrap();
        })
        .build();
    table.set_item_count(2).unwrap();
    let row = table.get_or_create(0).unwrap();
    assert!(!table.is_cached(row).unwrap());

    let content: CellContent = table.cell_data(5, row).unwrap().unwrap();
    assert_eq!(content.column, 0);
    assert_eq!(content.text.chars().count(), grove::TEXT_LIMIT);
    assert!(content.text.ends_with("..."));
    assert!(content.checked);
    assert_eq!(content.render_mode, RenderMode::Default);

    assert_eq!(table.text(row, 0).unwrap().len(), 10_000);
    assert_eq!(table.cell_data(6, row).unwrap(), None);
}

#[test]
fn test_cell_data_reflects_changes_made_by_provider() {
    let mut table = Table::builder()
        .style(ContainerStyle::single().with_virtual())
        .data_provider(|table: &mut Table, row, index| {
            if table.column_count().unwrap() == 2 {
                table.destroy_column(0).unwrap();
            }
            table.connect_draw_hook(DrawHook::Paint, |_| {}).unwrap();
            table.set_text(row, 0, format!("row {index}")).unwrap();
        })
        .build();
    table.add_column(ColumnSpec::new("A")).unwrap();
    table.add_column(ColumnSpec::new("B")).unwrap();
    let model_index = table.column(1).unwrap().model_index();
    table.set_item_count(1).unwrap();
    let row = table.get_or_create(0).unwrap();

    let content = table.cell_data(model_index, row).unwrap().unwrap();
    assert_eq!(content.column, 0);
    assert_eq!(content.text, "row 0");
    assert_eq!(content.render_mode, RenderMode::Owner);
}

#[test]
fn test_cell_overrides_switch_column_to_custom_draw() {
    let mut table = Table::new(ContainerStyle::single());
    table.add_column(ColumnSpec::new("A")).unwrap();
    table.add_column(ColumnSpec::new("B")).unwrap();
    let row = table.add_item().unwrap();

    table.set_cell_font(row, 1, Some(Font::new("Mono", 9.0).unwrap())).unwrap();
    assert_eq!(table.render_mode(0).unwrap(), RenderMode::Default);
    assert_eq!(table.render_mode(1).unwrap(), RenderMode::Custom);

    table.set_background(row, Some(Color::BLUE)).unwrap();
    assert_eq!(table.render_mode(0).unwrap(), RenderMode::Default);
}

#[test]
fn test_owner_draw_hooks() {
    let backend = RecordingBackend::default();
    let mut table = Table::builder().backend(backend.clone()).build();
    let row = table.add_item().unwrap();
    let events = collect_events(&table);
    let painted = Arc::new(AtomicUsize::new(0));
    let painted_clone = painted.clone();

    let id = table
        .connect_draw_hook(DrawHook::Paint, move |event| {
            assert_eq!(event.column, 0);
            painted_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    table.connect_draw_hook(DrawHook::Measure, |_| {}).unwrap();
    table.draw_cell(DrawHook::Paint, row, 0).unwrap();
    assert_eq!(painted.load(Ordering::SeqCst), 1);

    assert!(table.disconnect_draw_hook(DrawHook::Paint, id).unwrap());
    assert!(table.is_owner_draw());
    assert_eq!(table.render_mode(0).unwrap(), RenderMode::Owner);

    let recreated = backend
        .take()
        .into_iter()
        .filter(|entry| entry == "renderers_recreated")
        .count();
    assert_eq!(recreated, 1);
    assert_eq!(*events.lock(), vec![ItemEvent::OwnerDrawEnabled]);
}

// ============================================================================
// Threading and Disposal
// ============================================================================

#[test]
fn test_wrong_thread_panics() {
    let table = Table::new(ContainerStyle::single());
    let result = std::thread::spawn(move || table.item_count()).join();
    assert!(result.is_err());
}

#[test]
fn test_disposed_container_rejects_calls() {
    let mut table = Table::new(ContainerStyle::single());
    let row = table.add_item().unwrap();
    let events = collect_events(&table);

    table.dispose();
    table.dispose();
    assert_eq!(table.add_item(), Err(ItemError::DisposedAccess));
    assert_eq!(table.text(row, 0), Err(ItemError::DisposedAccess));
    assert_eq!(*events.lock(), vec![ItemEvent::Disposed]);
}
