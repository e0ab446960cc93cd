//! Container configuration.
//!
//! [`ContainerStyle`] fixes the behavior of a container at construction
//! time. It deserializes from any `serde` format, so applications can keep
//! it in their settings files:
//!
//! ```ignore
//! let style: ContainerStyle = toml::from_str(r#"
//!     selection = "multi"
//!     virtual_items = true
//!
//!     [growth]
//!     increment = 16
//! "#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::id::GrowthPolicy;
use crate::selection::SelectionMode;

/// Construction-time behavior of a table or tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    /// One or many selected rows.
    pub selection: SelectionMode,
    /// Rows are materialized and populated lazily through the data provider.
    pub virtual_items: bool,
    /// Rows carry a check box; check and grayed state are ignored otherwise.
    pub check: bool,
    /// Selection highlights the full row width.
    pub full_selection: bool,
    /// Growth of the identity array.
    pub growth: GrowthPolicy,
}

impl ContainerStyle {
    /// A single-select container.
    pub fn single() -> Self {
        Self::default()
    }

    /// A multi-select container.
    pub fn multi() -> Self {
        Self {
            selection: SelectionMode::Multi,
            ..Self::default()
        }
    }

    pub fn with_virtual(mut self) -> Self {
        self.virtual_items = true;
        self
    }

    pub fn with_check(mut self) -> Self {
        self.check = true;
        self
    }

    pub fn with_full_selection(mut self) -> Self {
        self.full_selection = true;
        self
    }

    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    pub fn is_single(&self) -> bool {
        self.selection == SelectionMode::Single
    }
}
