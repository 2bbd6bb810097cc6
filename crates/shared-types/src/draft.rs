//! Persisted draft schema
//!
//! A draft is the snapshot of field values for one document, stored
//! independently of the document's rendered content. The shape is owned by
//! this workspace (it is not a binary document format).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of field values for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub document_id: String,
    /// fieldKey → current value
    pub form_data: BTreeMap<String, String>,
    pub file_name: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl DraftRecord {
    pub fn new(
        document_id: impl Into<String>,
        form_data: BTreeMap<String, String>,
        file_name: Option<String>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            form_data,
            file_name,
            saved_at,
        }
    }
}
