//! Draft persistence seam
//!
//! Actual storage (disk, IndexedDB, a sync service) lives with the
//! embedding application; the core only needs save/load of the owned
//! draft shape. Failures here are never fatal: the in-memory store stays
//! authoritative.

use crate::error::FormFillError;
use shared_types::DraftRecord;
use std::collections::HashMap;

pub trait DraftStore {
    fn save_draft(&mut self, draft: &DraftRecord) -> Result<(), FormFillError>;

    fn load_draft(&mut self, document_id: &str) -> Result<Option<DraftRecord>, FormFillError>;
}

/// In-memory implementation, used in tests and as the embedding default
/// until a real backend is wired up.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: HashMap<String, DraftRecord>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn save_draft(&mut self, draft: &DraftRecord) -> Result<(), FormFillError> {
        self.drafts.insert(draft.document_id.clone(), draft.clone());
        Ok(())
    }

    fn load_draft(&mut self, document_id: &str) -> Result<Option<DraftRecord>, FormFillError> {
        Ok(self.drafts.get(document_id).cloned())
    }
}
