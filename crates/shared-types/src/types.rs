use serde::{Deserialize, Serialize};

/// Kind of fillable field reported by the detection service or native scan.
///
/// Unrecognized kind strings deserialize to `Unknown` so a newer detection
/// backend cannot break older clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Multiline,
    Date,
    Number,
    Email,
    Phone,
    Checkbox,
    Signature,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Checkbox-like kinds toggle instead of taking text input.
    pub fn is_toggle(&self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }
}

/// One machine-detected (or native-scanned) fillable area.
///
/// Coordinates are normalized to the page (`0..=1`), bottom-left origin.
/// `label` and `confidence` pass through to the form UI; sync logic never
/// consults them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedRegion {
    pub field_key: String,
    #[serde(default)]
    pub page_index: Option<u32>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub field_kind: FieldKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Result of scanning one document for fillable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOutcome {
    pub document_has_native_fields: bool,
    #[serde(default)]
    pub regions: Vec<DetectedRegion>,
}
