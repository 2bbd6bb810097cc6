//! Render surface seam
//!
//! The document renderer (page rasterization, native form machinery, the
//! actual on-screen controls) lives outside this crate. The core talks to
//! it through [`RenderSurface`]; widgets created here are owned by the
//! surface and referenced by the core through [`SurfaceWidgetId`].

use crate::coords::PageRect;
use shared_types::FieldKind;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Surface-issued identifier for one overlay or native widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceWidgetId(pub u64);

/// Presentation style of an overlay widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStyle {
    TextEntry,
    Toggle,
}

/// Everything the surface needs to create one overlay widget.
#[derive(Debug, Clone)]
pub struct WidgetSpec {
    pub page_index: u32,
    pub rect: PageRect,
    pub style: WidgetStyle,
    /// Rides along so the surface can pick keyboards and formatters.
    pub kind: FieldKind,
    pub field_key: String,
}

/// A fillable field already embedded in the document, as enumerated by the
/// renderer in Native mode. The field's current value is read separately
/// through [`RenderSurface::widget_value`].
#[derive(Debug, Clone)]
pub struct NativeFieldInfo {
    pub id: SurfaceWidgetId,
    /// The embedded field's tag; matched against known field keys.
    pub tag: String,
    pub page_index: u32,
    pub rect: PageRect,
    pub kind: FieldKind,
}

/// The rendering collaborator. All calls happen on the owner thread; the
/// surface may translate them to whatever view system it wraps.
pub trait RenderSurface {
    fn page_count(&self) -> u32;

    fn page_size(&self, page_index: u32) -> Option<PageSize>;

    /// Embedded fillable fields, for Native-mode adoption.
    fn native_fields(&self) -> Vec<NativeFieldInfo>;

    fn add_widget(&mut self, spec: &WidgetSpec) -> SurfaceWidgetId;

    fn remove_widget(&mut self, id: SurfaceWidgetId);

    fn set_widget_value(&mut self, id: SurfaceWidgetId, value: &str);

    fn widget_value(&self, id: SurfaceWidgetId) -> String;

    /// Schedule a redraw of one sub-rectangle of one page.
    fn invalidate_rect(&mut self, page_index: u32, rect: PageRect);
}
