//! Thread affinity checks for Grove containers.
//!
//! A container is confined to the thread that created it. Every public entry
//! point verifies the calling thread through the container's
//! [`ThreadAffinity`]; a mismatch is a fatal usage error and panics with a
//! descriptive message rather than returning an error.
//!
//! ```
//! use grove_core::thread_check::ThreadAffinity;
//!
//! struct Container {
//!     affinity: ThreadAffinity,
//!     rows: Vec<String>,
//! }
//!
//! impl Container {
//!     fn new() -> Self {
//!         Self {
//!             affinity: ThreadAffinity::current(),
//!             rows: Vec::new(),
//!         }
//!     }
//!
//!     fn push(&mut self, row: String) {
//!         self.affinity.assert_same_thread();
//!         self.rows.push(row);
//!     }
//! }
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker.
///
/// Records the thread on which an object was created and verifies that
/// subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs, in debug and release builds.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("container accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Container was created on thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Item containers are confined to the thread that created them.\n\
            Rows, columns, selection and population callbacks must all be\n\
            driven from that thread.\n\
            \n\
            POSSIBLE SOLUTIONS:\n\
            \n\
            1. Post the operation to the owning thread\n\
            2. Compute row content elsewhere and apply it from the owning thread\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
