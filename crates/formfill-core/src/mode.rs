//! Document mode selection
//!
//! One closed three-way branch decided at load: reuse native fields,
//! synthesize overlays, or fall back to a plain viewer.

use serde::{Deserialize, Serialize};

/// How fillable fields are presented for one document view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentMode {
    /// The document carries embedded fillable fields; reuse them.
    Native,
    /// Overlay widgets synthesized from detected regions.
    Synthetic,
    /// Plain viewer; interactions never reach the value store.
    Fallback,
}

impl std::fmt::Display for DocumentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentMode::Native => write!(f, "native"),
            DocumentMode::Synthetic => write!(f, "synthetic"),
            DocumentMode::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModeState {
    Unresolved,
    Resolved(DocumentMode),
}

/// Resolves the mode once per load and guards the one legal in-session
/// transition (Synthetic → Fallback, by explicit user action).
#[derive(Debug)]
pub struct ModeSelector {
    state: ModeState,
}

impl ModeSelector {
    pub fn new() -> Self {
        Self {
            state: ModeState::Unresolved,
        }
    }

    pub fn current(&self) -> Option<DocumentMode> {
        match self.state {
            ModeState::Unresolved => None,
            ModeState::Resolved(mode) => Some(mode),
        }
    }

    /// Decide the mode at load. Resolution is terminal for this view
    /// instance; calling again returns the already-chosen mode.
    pub fn resolve(
        &mut self,
        surface_available: bool,
        has_native_fields: bool,
        valid_region_count: usize,
    ) -> DocumentMode {
        if let ModeState::Resolved(mode) = self.state {
            tracing::debug!("Mode already resolved to {}; ignoring re-resolution", mode);
            return mode;
        }
        let mode = if !surface_available {
            DocumentMode::Fallback
        } else if has_native_fields {
            DocumentMode::Native
        } else if valid_region_count > 0 {
            DocumentMode::Synthetic
        } else {
            DocumentMode::Fallback
        };
        self.state = ModeState::Resolved(mode);
        mode
    }

    /// User affordance: leave Synthetic for the plain viewer. Any other
    /// state refuses; the reverse trip is not offered within a session.
    pub fn switch_to_fallback(&mut self) -> bool {
        match self.state {
            ModeState::Resolved(DocumentMode::Synthetic) => {
                self.state = ModeState::Resolved(DocumentMode::Fallback);
                true
            }
            _ => false,
        }
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}
