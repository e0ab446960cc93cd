//! Logging and debugging facilities for Grove.
//!
//! This module provides:
//! - Target names for filtering Grove's `tracing` output by subsystem
//! - [`PerfSpan`] for timing bulk operations
//! - Tree prefix rendering shared by the row-tree debug dumps
//!
//! # Tracing Integration
//!
//! Grove uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("grove::population=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Row creation, removal and clearing.
    pub const ITEMS: &str = "grove::items";
    /// Lazy population of virtual rows.
    pub const POPULATION: &str = "grove::population";
    /// Selection and focus changes.
    pub const SELECTION: &str = "grove::selection";
    /// Column creation, destruction and ordering.
    pub const COLUMNS: &str = "grove::columns";
    /// Identity allocation and compaction.
    pub const IDS: &str = "grove::ids";
    /// Signal/slot system.
    pub const SIGNAL: &str = "grove_core::signal";
    /// Performance spans.
    pub const PERF: &str = "grove::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show row ids.
    pub show_ids: bool,
    /// Whether to show the population state of each row.
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_state: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_state: false,
            ..Default::default()
        }
    }

    /// Build the prefix string for a node at `depth`.
    ///
    /// Depth 0 nodes get no prefix.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }

        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span open until dropped.
///
/// Useful for timing bulk operations such as item count changes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "grove::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event on the `grove` target.
#[macro_export]
macro_rules! grove_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "grove", $($arg)*)
    };
}

/// Debug-level event on the `grove` target.
#[macro_export]
macro_rules! grove_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "grove", $($arg)*)
    };
}

/// Warn-level event on the `grove` target.
#[macro_export]
macro_rules! grove_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "grove", $($arg)*)
    };
}
