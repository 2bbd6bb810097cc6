//! Binding coordinator
//!
//! Propagates values between the store and the widget set. The store-side
//! subscription only enqueues the mutated handle; the actual push happens
//! in a synchronization pass that pulls current values, compares them with
//! each widget's mirror, and invalidates only the bounds of widgets that
//! actually changed.

use crate::registry::FieldHandle;
use crate::store::{FieldValueStore, StoreListener};
use crate::surface::RenderSurface;
use crate::widgets::WidgetArena;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct BindingCoordinator {
    dirty: Rc<RefCell<Vec<FieldHandle>>>,
}

impl BindingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscription callback for the store. Only records the handle;
    /// no widget work happens inside the notification.
    pub fn listener(&self) -> StoreListener {
        let dirty = Rc::clone(&self.dirty);
        Box::new(move |handle| {
            let mut dirty = dirty.borrow_mut();
            if !dirty.contains(&handle) {
                dirty.push(handle);
            }
        })
    }

    /// Push pending store changes into their widgets. Returns the number
    /// of redraws requested; a pass with nothing to do requests none.
    pub fn sync_dirty(
        &mut self,
        store: &FieldValueStore,
        arena: &mut WidgetArena,
        surface: &mut dyn RenderSurface,
    ) -> usize {
        let pending: Vec<FieldHandle> = self.dirty.borrow_mut().drain(..).collect();
        let mut redraws = 0;
        for handle in pending {
            if push_value(handle, store, arena, surface) {
                redraws += 1;
            }
        }
        redraws
    }

    /// Reconcile every widget against the store; invoked on surface
    /// refresh signals. Supersedes anything still queued as dirty.
    pub fn sync_all(
        &mut self,
        store: &FieldValueStore,
        arena: &mut WidgetArena,
        surface: &mut dyn RenderSurface,
    ) -> usize {
        self.dirty.borrow_mut().clear();
        let mut redraws = 0;
        for handle in arena.handles() {
            if push_value(handle, store, arena, surface) {
                redraws += 1;
            }
        }
        redraws
    }

    /// Forget queued work (no surface, or load teardown).
    pub fn clear(&mut self) {
        self.dirty.borrow_mut().clear();
    }
}

/// Store → widget push for one handle. The store is authoritative; the
/// widget is only touched (and only its rect invalidated) when its mirror
/// disagrees, which is also what stops edits echoing back to their origin.
fn push_value(
    handle: FieldHandle,
    store: &FieldValueStore,
    arena: &mut WidgetArena,
    surface: &mut dyn RenderSurface,
) -> bool {
    let widget = match arena.get_mut(handle) {
        Some(widget) => widget,
        None => {
            tracing::debug!("No widget for {:?}; value stays store-only", handle);
            return false;
        }
    };
    let current = store.get_value(handle);
    if widget.displayed == current {
        return false;
    }
    widget.displayed = current.to_string();
    surface.set_widget_value(widget.surface_id, current);
    surface.invalidate_rect(widget.page_index, widget.rect);
    true
}
