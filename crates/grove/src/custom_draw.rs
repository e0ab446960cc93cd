//! Custom-draw negotiation.
//!
//! A container renders cells itself by default. Two things move it away from
//! that:
//!
//! - Registering any measure, erase or paint hook turns on owner drawing for
//!   every cell. Owner drawing can never be turned off again.
//! - Setting a per-cell font or color flags that cell's column for custom
//!   drawing, so the backend knows the default renderer is not enough.

use grove_core::{ConnectionId, Signal};

use crate::id::RowId;

/// Kind of draw hook an application can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawHook {
    Measure,
    Erase,
    Paint,
}

/// How the backend should render a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The backend's stock renderer.
    #[default]
    Default,
    /// Stock renderer with per-cell fonts or colors applied.
    Custom,
    /// The application paints through its draw hooks.
    Owner,
}

/// Argument passed to draw hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawEvent {
    pub hook: DrawHook,
    pub row: RowId,
    /// Creation index of the column.
    pub column: usize,
}

/// Draw hooks and the owner-draw switch of one container.
#[derive(Debug, Default)]
pub struct CustomDraw {
    owner_draw: bool,
    measure: Signal<DrawEvent>,
    erase: Signal<DrawEvent>,
    paint: Signal<DrawEvent>,
}

impl CustomDraw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_owner_draw(&self) -> bool {
        self.owner_draw
    }

    /// Register a hook.
    ///
    /// Returns the connection and whether this call switched owner drawing on.
    pub fn connect<F>(&mut self, hook: DrawHook, slot: F) -> (ConnectionId, bool)
    where
        F: Fn(&DrawEvent) + Send + Sync + 'static,
    {
        let id = self.signal(hook).connect(slot);
        let enabled = !std::mem::replace(&mut self.owner_draw, true);
        (id, enabled)
    }

    /// Remove a hook. Owner drawing stays on.
    pub fn disconnect(&self, hook: DrawHook, id: ConnectionId) -> bool {
        self.signal(hook).disconnect(id)
    }

    /// Run the hooks registered for `event.hook`.
    pub fn dispatch(&self, event: DrawEvent) {
        self.signal(event.hook).emit(event);
    }

    /// Resolve the render mode for a column with the given custom-draw flag.
    pub fn render_mode(&self, column_custom_draw: bool) -> RenderMode {
        if self.owner_draw {
            RenderMode::Owner
        } else if column_custom_draw {
            RenderMode::Custom
        } else {
            RenderMode::Default
        }
    }

    fn signal(&self, hook: DrawHook) -> &Signal<DrawEvent> {
        match hook {
            DrawHook::Measure => &self.measure,
            DrawHook::Erase => &self.erase,
            DrawHook::Paint => &self.paint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_owner_draw_is_irreversible() {
        let mut draw = CustomDraw::new();
        assert_eq!(draw.render_mode(false), RenderMode::Default);
        assert_eq!(draw.render_mode(true), RenderMode::Custom);

        let (id, enabled) = draw.connect(DrawHook::Paint, |_| {});
        assert!(enabled);
        let (_, enabled_again) = draw.connect(DrawHook::Measure, |_| {});
        assert!(!enabled_again);

        assert!(draw.disconnect(DrawHook::Paint, id));
        assert!(draw.is_owner_draw());
        assert_eq!(draw.render_mode(false), RenderMode::Owner);
    }

    #[test]
    fn test_dispatch_routes_by_hook() {
        let mut draw = CustomDraw::new();
        let paints = Arc::new(AtomicUsize::new(0));
        let paints_clone = paints.clone();
        draw.connect(DrawHook::Paint, move |event| {
            assert_eq!(event.column, 2);
            paints_clone.fetch_add(1, Ordering::SeqCst);
        });

        let row = RowId::new(0);
        draw.dispatch(DrawEvent { hook: DrawHook::Erase, row, column: 2 });
        draw.dispatch(DrawEvent { hook: DrawHook::Paint, row, column: 2 });
        assert_eq!(paints.load(Ordering::SeqCst), 1);
    }
}
