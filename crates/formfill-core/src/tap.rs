//! Tap routing
//!
//! Hit-tests page-space points against widget bounds. Widget counts per
//! page are small and bounded, so a linear scan in stable region-list
//! order is the whole algorithm; first match wins.

use crate::registry::FieldHandle;
use crate::widgets::WidgetArena;

/// What a tap on the page resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    /// Tap landed inside a widget; the form UI should scroll to and focus
    /// the field.
    FieldActivated(FieldHandle),
    /// Tap outside every widget bound; collapse any expanded panel.
    Background,
}

/// First widget on the page containing the point, if any.
pub fn hit_test(arena: &WidgetArena, page_index: u32, x: f64, y: f64) -> Option<FieldHandle> {
    arena
        .iter()
        .find(|w| w.page_index == page_index && w.rect.contains(x, y))
        .map(|w| w.handle)
}
