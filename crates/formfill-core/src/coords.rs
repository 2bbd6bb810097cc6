//! Coordinate transformation between normalized detection space and page space

use crate::region::FieldRegion;

/// Axis-aligned rectangle in page points, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageRect {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a page-space point falls inside this rect (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Convert a normalized region to page-space points (bottom-left origin).
///
/// Normalized y is measured from the page bottom; the flip preserves the
/// box's original top edge. Pure and deterministic; callers reject
/// non-finite or degenerate output rather than correcting it here.
pub fn to_page_space(region: &FieldRegion, page_width: f64, page_height: f64) -> PageRect {
    let width = region.w * page_width;
    let height = region.h * page_height;
    let x = region.x * page_width;
    let y = page_height - (region.y * page_height) - height;

    PageRect {
        x,
        y,
        width,
        height,
    }
}
