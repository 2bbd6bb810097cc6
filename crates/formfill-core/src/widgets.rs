//! Widget arena and synthesizer
//!
//! The arena holds one record per on-page widget: the synchronization
//! handle, the surface's widget id, and a mirror of the displayed value.
//! The real controls are owned by the render surface; teardown there needs
//! nothing from us beyond dropping the arena.

use crate::coords::{to_page_space, PageRect};
use crate::mode::DocumentMode;
use crate::region::FieldRegion;
use crate::registry::{FieldHandle, IdentityRegistry};
use crate::surface::{RenderSurface, SurfaceWidgetId, WidgetSpec, WidgetStyle};

/// One overlay (or adopted native) widget, bound 1:1 to a handle.
#[derive(Debug, Clone)]
pub struct Widget {
    pub handle: FieldHandle,
    pub surface_id: SurfaceWidgetId,
    pub field_key: String,
    pub page_index: u32,
    pub rect: PageRect,
    pub style: WidgetStyle,
    /// Mirror of the value the widget currently displays.
    pub displayed: String,
}

/// Widget records in stable region-list order.
#[derive(Debug, Default)]
pub struct WidgetArena {
    widgets: Vec<Widget>,
    by_handle: std::collections::HashMap<FieldHandle, usize>,
}

impl WidgetArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, widget: Widget) {
        if self.by_handle.contains_key(&widget.handle) {
            tracing::warn!(
                "Widget for '{}' already exists; keeping the first",
                widget.field_key
            );
            return;
        }
        self.by_handle.insert(widget.handle, self.widgets.len());
        self.widgets.push(widget);
    }

    pub fn get(&self, handle: FieldHandle) -> Option<&Widget> {
        self.by_handle.get(&handle).map(|&i| &self.widgets[i])
    }

    pub fn get_mut(&mut self, handle: FieldHandle) -> Option<&mut Widget> {
        match self.by_handle.get(&handle) {
            Some(&i) => Some(&mut self.widgets[i]),
            None => None,
        }
    }

    /// Widgets in insertion order (the stable region-list order).
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn handles(&self) -> Vec<FieldHandle> {
        self.widgets.iter().map(|w| w.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
        self.by_handle.clear();
    }
}

/// Outcome of one synthesis pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Overlay widgets created (Synthetic mode).
    pub created: usize,
    /// Native fields adopted (Native mode).
    pub adopted: usize,
    /// Regions skipped after a recorded warning.
    pub skipped: usize,
}

/// Builds the widget set for one document load.
///
/// Runs exactly once per load; refresh signals must not re-enter it, so
/// the per-page widget count stays constant for the life of the view.
#[derive(Debug, Default)]
pub struct WidgetSynthesizer {
    created: bool,
}

impl WidgetSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_run(&self) -> bool {
        self.created
    }

    pub fn run(
        &mut self,
        mode: DocumentMode,
        regions: &[FieldRegion],
        registry: &IdentityRegistry,
        arena: &mut WidgetArena,
        surface: &mut dyn RenderSurface,
    ) -> SynthesisReport {
        if self.created {
            tracing::debug!("Synthesis already ran for this load; keeping existing widgets");
            return SynthesisReport::default();
        }
        self.created = true;

        match mode {
            DocumentMode::Synthetic => self.synthesize(regions, registry, arena, surface),
            DocumentMode::Native => self.adopt_native(registry, arena, surface),
            DocumentMode::Fallback => SynthesisReport::default(),
        }
    }

    /// One overlay widget per valid region. A bad region is skipped with a
    /// warning and never aborts the rest of the pass.
    fn synthesize(
        &mut self,
        regions: &[FieldRegion],
        registry: &IdentityRegistry,
        arena: &mut WidgetArena,
        surface: &mut dyn RenderSurface,
    ) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        for region in regions {
            let handle = match registry.handle_for(&region.field_key) {
                Some(handle) => handle,
                None => {
                    tracing::warn!(
                        "Region {} has unmapped key '{}'; skipping",
                        region.id,
                        region.field_key
                    );
                    report.skipped += 1;
                    continue;
                }
            };
            let page = match surface.page_size(region.page_index) {
                Some(page) => page,
                None => {
                    tracing::warn!(
                        "Region {} targets missing page {}; skipping",
                        region.id,
                        region.page_index
                    );
                    report.skipped += 1;
                    continue;
                }
            };
            let rect = to_page_space(region, page.width, page.height);
            if !rect.is_finite() || rect.is_degenerate() {
                tracing::warn!("Region {} maps to unusable rect {:?}; skipping", region.id, rect);
                report.skipped += 1;
                continue;
            }

            let style = if region.kind.is_toggle() {
                WidgetStyle::Toggle
            } else {
                WidgetStyle::TextEntry
            };
            let spec = WidgetSpec {
                page_index: region.page_index,
                rect,
                style,
                kind: region.kind,
                field_key: region.field_key.clone(),
            };
            let surface_id = surface.add_widget(&spec);
            arena.insert(Widget {
                handle,
                surface_id,
                field_key: region.field_key.clone(),
                page_index: region.page_index,
                rect,
                style,
                displayed: String::new(),
            });
            report.created += 1;
        }

        tracing::debug!(
            "Synthesized {} widgets ({} skipped)",
            report.created,
            report.skipped
        );
        report
    }

    /// Reuse embedded fields whose tag matches a known field key. Never
    /// creates widgets.
    fn adopt_native(
        &mut self,
        registry: &IdentityRegistry,
        arena: &mut WidgetArena,
        surface: &mut dyn RenderSurface,
    ) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        for field in surface.native_fields() {
            let handle = match registry.handle_for(&field.tag) {
                Some(handle) => handle,
                None => {
                    tracing::debug!("Native field '{}' has no known key; left as-is", field.tag);
                    continue;
                }
            };
            let style = if field.kind.is_toggle() {
                WidgetStyle::Toggle
            } else {
                WidgetStyle::TextEntry
            };
            let displayed = surface.widget_value(field.id);
            arena.insert(Widget {
                handle,
                surface_id: field.id,
                field_key: field.tag,
                page_index: field.page_index,
                rect: field.rect,
                style,
                displayed,
            });
            report.adopted += 1;
        }

        tracing::debug!("Adopted {} native fields", report.adopted);
        report
    }
}
