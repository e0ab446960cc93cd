//! Item and identity model for data-backed table and tree controls.
//!
//! Grove owns the rows, columns, selection and custom-draw state behind a
//! table or tree view, leaving painting to a rendering backend. Rows are
//! addressed by stable [`RowId`]s that are recycled after release, and
//! virtual containers materialize and populate rows only when something
//! reads them.
//!
//! # Example
//!
//! ```
//! use grove::prelude::*;
//!
//! let mut table = Table::builder()
//!     .style(ContainerStyle::multi().with_virtual())
//!     .data_provider(|table: &mut Table, row, index| {
//!         table.set_texts(row, &[format!("item {index}"), "detail".into()]).ok();
//!     })
//!     .build();
//!
//! table.add_column(ColumnSpec::new("Name")).unwrap();
//! table.add_column(ColumnSpec::new("Detail")).unwrap();
//! table.set_item_count(1_000_000).unwrap();
//!
//! let row = table.item(123_456).unwrap();
//! assert_eq!(table.text(row, 0).unwrap(), "item 123456");
//! assert_eq!(table.text(row, 1).unwrap(), "detail");
//! ```
//!
//! # Threading
//!
//! Containers are `Send + Sync` but bound to the thread that created them.
//! Calling into one from another thread panics.
//!
//! # Logging
//!
//! Everything is traced through `tracing` under the targets listed in
//! [`grove_core::logging::targets`].

pub mod backend;
pub mod column;
pub mod container;
pub mod custom_draw;
pub mod debug;
pub mod error;
pub mod event;
pub mod graphics;
pub mod id;
pub mod population;
pub mod prelude;
pub mod row;
pub mod selection;
pub mod style;
pub mod table;
pub mod tree;

pub use backend::{CellContent, NullBackend, RenderBackend};
pub use column::{Alignment, Column, ColumnModel, ColumnSpec};
pub use container::{ContainerBuilder, ItemContainer, SortDirection};
pub use custom_draw::{DrawEvent, DrawHook, RenderMode};
pub use debug::RowTreeDebug;
pub use error::{ItemError, Result};
pub use event::ItemEvent;
pub use graphics::{Color, Font, FontStyle};
pub use id::{GrowthPolicy, IdAllocator, RowId};
pub use population::{DataProvider, Population};
pub use row::{CellData, PopulationState, RowData, TEXT_LIMIT};
pub use selection::{SelectionDelta, SelectionMode, SelectionModel};
pub use style::ContainerStyle;
pub use table::{Table, TableBuilder};
pub use tree::{Tree, TreeBuilder};

pub use grove_core::{ConnectionId, Signal};
