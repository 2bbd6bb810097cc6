//! Validated field regions
//!
//! A [`FieldRegion`] is one rectangle on one page believed to correspond to
//! a fillable field, in normalized page coordinates. Regions are built once
//! per load from the detection wire shape and replaced wholesale on reload,
//! never patched in place.

use crate::error::FormFillError;
use shared_types::{DetectedRegion, FieldKind};

/// Where a region came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Field already embedded in the document by its authoring tool.
    Native,
    /// Region produced by the detection service over a flat page.
    Detected,
}

/// A validated fillable area on one page.
///
/// Rect components are normalized to `0..=1` with a bottom-left origin.
/// Invariant: `0 <= x`, `0 <= y`, `w > 0`, `h > 0`, `x + w <= 1`,
/// `y + h <= 1`, all finite. Construction rejects anything else.
#[derive(Debug, Clone)]
pub struct FieldRegion {
    pub id: String,
    pub field_key: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub page_index: u32,
    pub kind: FieldKind,
    pub provenance: Provenance,
    /// Pass-through for the form UI; never consulted by sync logic.
    pub label: Option<String>,
    /// Pass-through for the form UI; never consulted by sync logic.
    pub confidence: Option<f64>,
}

impl FieldRegion {
    /// Validate a detected region and assign it a stable id.
    ///
    /// `ordinal` is the region's position in the detection result; it only
    /// feeds the id, which stays stable for the lifetime of the load.
    pub fn from_detected(
        detected: &DetectedRegion,
        ordinal: usize,
        provenance: Provenance,
    ) -> Result<Self, FormFillError> {
        let reject = |reason: &str| {
            Err(FormFillError::InvalidRegion(format!(
                "'{}': {}",
                detected.field_key, reason
            )))
        };

        if detected.field_key.trim().is_empty() {
            return reject("empty field key");
        }
        let values = [detected.x, detected.y, detected.width, detected.height];
        if values.iter().any(|v| !v.is_finite()) {
            return reject("non-finite coordinates");
        }
        if detected.x < 0.0 || detected.y < 0.0 {
            return reject("negative origin");
        }
        if detected.width <= 0.0 || detected.height <= 0.0 {
            return reject("non-positive extent");
        }
        if detected.x + detected.width > 1.0 {
            return reject("extends past the right page edge");
        }
        if detected.y + detected.height > 1.0 {
            return reject("extends past the top page edge");
        }

        let page_index = detected.page_index.unwrap_or(0);
        Ok(Self {
            id: format!("r{}-{}", page_index, ordinal),
            field_key: detected.field_key.clone(),
            x: detected.x,
            y: detected.y,
            w: detected.width,
            h: detected.height,
            page_index,
            kind: detected.field_kind,
            provenance,
            label: detected.label.clone(),
            confidence: detected.confidence,
        })
    }
}
