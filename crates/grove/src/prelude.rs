//! Prelude module for Grove.
//!
//! ```
//! use grove::prelude::*;
//! ```

// ============================================================================
// Containers
// ============================================================================

pub use crate::container::{ItemContainer, SortDirection};
pub use crate::table::Table;
pub use crate::tree::Tree;

// ============================================================================
// Configuration
// ============================================================================

pub use crate::column::{Alignment, ColumnSpec};
pub use crate::id::GrowthPolicy;
pub use crate::selection::SelectionMode;
pub use crate::style::ContainerStyle;

// ============================================================================
// Rows and Events
// ============================================================================

pub use crate::custom_draw::{DrawEvent, DrawHook, RenderMode};
pub use crate::error::ItemError;
pub use crate::event::ItemEvent;
pub use crate::graphics::{Color, Font};
pub use crate::id::RowId;
pub use crate::population::Population;
