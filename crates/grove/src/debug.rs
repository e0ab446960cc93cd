//! Text outline of a tree for diagnostics.
//!
//! ```
//! use grove::{ContainerStyle, ItemContainer, Tree};
//! use grove_core::{TreeFormatOptions, TreeStyle};
//!
//! let mut tree = Tree::new(ContainerStyle::single());
//! let root = tree.add_item(None).unwrap();
//! tree.set_text(root, 0, "root").unwrap();
//! let child = tree.add_item(Some(root)).unwrap();
//! tree.set_text(child, 0, "child").unwrap();
//!
//! let options = TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..TreeFormatOptions::minimal()
//! };
//! let outline = tree.debug_tree().with_options(options).to_string();
//! assert_eq!(outline, "\"root\"\n`-- \"child\"\n");
//! ```

use std::fmt;

use grove_core::TreeFormatOptions;

use crate::container::sealed::Sealed;
use crate::id::RowId;
use crate::row::PopulationState;
use crate::tree::Tree;

/// Display adapter printing one line per position of a [`Tree`].
///
/// Placeholders of a virtual tree print as `(unmaterialized)`. Printing
/// never runs the data provider.
pub struct RowTreeDebug<'a> {
    tree: &'a Tree,
    options: TreeFormatOptions,
}

impl<'a> RowTreeDebug<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            options: TreeFormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    fn write_level(
        &self,
        f: &mut fmt::Formatter<'_>,
        slots: &[Option<RowId>],
        depth: usize,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        for (index, slot) in slots.iter().enumerate() {
            let is_last = index + 1 == slots.len();
            write!(f, "{}", self.options.prefix(depth, is_last))?;

            let Some(row) = *slot else {
                writeln!(f, "(unmaterialized)")?;
                continue;
            };
            let Some(data) = self.tree.core().rows.get(row) else {
                writeln!(f, "(released {row})")?;
                continue;
            };

            write!(f, "{:?}", data.text(0))?;
            if self.options.show_ids {
                write!(f, " {row}")?;
            }
            if self.options.show_state {
                let state = match data.state() {
                    PopulationState::Uncached => "uncached",
                    PopulationState::Populating => "populating",
                    PopulationState::Cached => "cached",
                };
                write!(f, " [{state}]")?;
            }
            writeln!(f)?;
            self.write_level(f, data.children(), depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for RowTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, self.tree.roots(), 0)
    }
}

impl fmt::Debug for RowTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
