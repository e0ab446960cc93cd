//! Virtual table with a million rows, populated on demand.
//!
//! Shows lazy population, clearing, selection and the backend query path.
//! Set `RUST_LOG=grove=trace` to watch rows being materialized.
//!
//! Run with: cargo run -p grove --example virtual_table

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use grove::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Virtual table example");
    println!("=====================");
    println!();

    let populated = Arc::new(AtomicUsize::new(0));
    let counter = populated.clone();

    let mut table = Table::builder()
        .style(ContainerStyle::multi().with_virtual().with_check())
        .data_provider(move |table: &mut Table, row, index| {
            counter.fetch_add(1, Ordering::Relaxed);
            table
                .set_texts(row, &[format!("Item {index}"), format!("{:#06x}", index * 7)])
                .ok();
            table.set_checked(row, index % 3 == 0).ok();
        })
        .build();

    table.add_column(ColumnSpec::new("Name").with_width(160)).unwrap();
    table.add_column(ColumnSpec::new("Code").with_alignment(Alignment::Trailing)).unwrap();
    table.set_item_count(1_000_000).unwrap();
    println!("Rows: {}", table.item_count().unwrap());

    // Only the visible page is ever populated
    for index in 500..520 {
        let row = table.item(index).unwrap();
        let name = table.text(row, 0).unwrap();
        let code = table.text(row, 1).unwrap();
        let checked = if table.checked(row).unwrap() { "x" } else { " " };
        println!("[{checked}] {name:<12} {code}");
    }
    println!("Populated so far: {}", populated.load(Ordering::Relaxed));

    // Clearing forces the provider to run again on next access
    table.clear_range(500..505).unwrap();
    for index in 500..505 {
        table.item(index).unwrap();
    }
    println!("Populated after clear: {}", populated.load(Ordering::Relaxed));

    // Selection materializes rows without populating them
    table.select_range(900_000..900_010).unwrap();
    println!("Selected: {:?}", table.selection_indices().unwrap());
    println!("Populated after select: {}", populated.load(Ordering::Relaxed));

    // What a backend would ask for when painting a cell
    let row = table.get_or_create(42).unwrap();
    let model_index = table.column(1).unwrap().model_index();
    if let Some(cell) = table.cell_data(model_index, row).unwrap() {
        println!("Backend cell: {:?} ({:?})", cell.text, cell.render_mode);
    }
}
