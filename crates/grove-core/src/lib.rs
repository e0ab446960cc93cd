//! Core plumbing for Grove.
//!
//! This crate provides the pieces shared by every Grove item container:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Thread Affinity**: Enforcement that a container is only touched from
//!   the thread that created it
//! - **Logging**: `tracing` targets, performance spans and tree formatting
//!   helpers for diagnostics
//!
//! # Signal/Slot Example
//!
//! ```
//! use grove_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//!
//! let conn_id = count_changed.connect(|count| {
//!     println!("Row count is now {}", count);
//! });
//!
//! count_changed.emit(42);
//! count_changed.disconnect(conn_id);
//! ```
//!
//! # Thread Affinity Example
//!
//! ```
//! use grove_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//! affinity.assert_same_thread();
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
