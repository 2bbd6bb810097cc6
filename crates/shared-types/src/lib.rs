pub mod draft;
pub mod types;

pub use draft::DraftRecord;
pub use types::{DetectedRegion, DetectionOutcome, FieldKind};
