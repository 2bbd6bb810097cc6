//! Document session
//!
//! Owns the registry, store, widget arena, and all coordinators for one
//! loaded document, and is the single writer sequence the rest of the app
//! talks to. Everything here runs on one logical owner thread; the only
//! suspension points live behind the surface and persistence traits.

use crate::autosave::AutosaveAdapter;
use crate::binding::BindingCoordinator;
use crate::error::FormFillError;
use crate::mode::{DocumentMode, ModeSelector};
use crate::persist::DraftStore;
use crate::region::{FieldRegion, Provenance};
use crate::registry::{FieldHandle, IdentityRegistry};
use crate::store::FieldValueStore;
use crate::surface::RenderSurface;
use crate::tap::{self, TapEvent};
use crate::widgets::{WidgetArena, WidgetSynthesizer};
use chrono::Utc;
use shared_types::{DetectionOutcome, DraftRecord, FieldKind};
use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

/// Load-time parameters for one document session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub document_id: String,
    pub file_name: Option<String>,
    pub debounce: Duration,
}

impl SessionConfig {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            file_name: None,
            debounce: AutosaveAdapter::DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// One row for the list-style form UI.
#[derive(Debug, Clone)]
pub struct FormEntry {
    pub handle: FieldHandle,
    pub field_key: String,
    pub label: Option<String>,
    pub kind: FieldKind,
    /// None for values restored from a draft that no region backs.
    pub page_index: Option<u32>,
    pub value: String,
}

/// How much of the form is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillProgress {
    pub filled: usize,
    pub total: usize,
}

pub struct DocumentSession {
    document_id: String,
    file_name: Option<String>,
    registry: IdentityRegistry,
    store: FieldValueStore,
    regions: Vec<FieldRegion>,
    arena: WidgetArena,
    synthesizer: WidgetSynthesizer,
    coordinator: BindingCoordinator,
    mode: ModeSelector,
    autosave: AutosaveAdapter,
    surface: Option<Box<dyn RenderSurface>>,
    drafts: Box<dyn DraftStore>,
    tap_listeners: Vec<Box<dyn FnMut(&TapEvent)>>,
    active_field: Option<FieldHandle>,
    notices: Vec<String>,
}

impl DocumentSession {
    /// Load one document view: resolve the mode, build the mapping,
    /// restore any draft, and synthesize widgets.
    pub fn load(
        config: SessionConfig,
        outcome: DetectionOutcome,
        surface: Result<Box<dyn RenderSurface>, FormFillError>,
        drafts: Box<dyn DraftStore>,
    ) -> Self {
        let mut store = FieldValueStore::new();
        let coordinator = BindingCoordinator::new();
        let autosave = AutosaveAdapter::new(config.debounce);
        store.subscribe(coordinator.listener());
        store.subscribe(autosave.listener());

        let mut session = Self {
            document_id: config.document_id,
            file_name: config.file_name,
            registry: IdentityRegistry::new(),
            store,
            regions: Vec::new(),
            arena: WidgetArena::new(),
            synthesizer: WidgetSynthesizer::new(),
            coordinator,
            mode: ModeSelector::new(),
            autosave,
            surface: None,
            drafts,
            tap_listeners: Vec::new(),
            active_field: None,
            notices: Vec::new(),
        };
        session.install(outcome, surface);
        session
    }

    /// Replace the loaded document wholesale (reprocessing, re-open).
    ///
    /// Cancels any pending autosave, discards stale tap state, and
    /// re-enters mode resolution. Store subscriptions survive; handles
    /// from the previous load are never handed out again.
    pub fn reload(
        &mut self,
        outcome: DetectionOutcome,
        surface: Result<Box<dyn RenderSurface>, FormFillError>,
    ) {
        self.autosave.cancel();
        self.coordinator.clear();
        self.active_field = None;
        self.arena.clear();
        self.regions.clear();
        self.registry.clear();
        self.store.reset();
        self.synthesizer = WidgetSynthesizer::new();
        self.mode = ModeSelector::new();
        self.notices.clear();
        self.surface = None;
        self.install(outcome, surface);
    }

    fn install(
        &mut self,
        outcome: DetectionOutcome,
        surface: Result<Box<dyn RenderSurface>, FormFillError>,
    ) {
        match surface {
            Ok(surface) => {
                tracing::debug!("Opened document view with {} pages", surface.page_count());
                self.surface = Some(surface);
            }
            Err(err) => {
                tracing::warn!("Document failed to open: {}", err);
                self.notices.push(format!("Preview unavailable: {}", err));
                self.surface = None;
            }
        }

        let provenance = if outcome.document_has_native_fields {
            Provenance::Native
        } else {
            Provenance::Detected
        };
        let mut dropped = 0usize;
        for (ordinal, detected) in outcome.regions.iter().enumerate() {
            match FieldRegion::from_detected(detected, ordinal, provenance) {
                Ok(region) => self.regions.push(region),
                Err(err) => {
                    tracing::warn!("Skipping region: {}", err);
                    dropped += 1;
                }
            }
        }

        self.registry
            .build_mapping(self.regions.iter().map(|r| r.field_key.as_str()));

        let mode = self.mode.resolve(
            self.surface.is_some(),
            outcome.document_has_native_fields,
            self.regions.len(),
        );
        tracing::info!(
            "Document {} resolved to {} mode ({} regions, {} dropped)",
            self.document_id,
            mode,
            self.regions.len(),
            dropped
        );

        if let Some(surface) = self.surface.as_deref_mut() {
            self.synthesizer
                .run(mode, &self.regions, &self.registry, &mut self.arena, surface);
        }

        // Adopted native fields seed the store as defaults; a draft, loaded
        // next, overrides them.
        let seeds: Vec<(FieldHandle, String)> = self
            .arena
            .iter()
            .filter(|w| !w.displayed.is_empty())
            .map(|w| (w.handle, w.displayed.clone()))
            .collect();
        for (handle, value) in seeds {
            if self.store.get_value(handle).is_empty() {
                self.store.set_value(handle, value);
            }
        }

        match self.drafts.load_draft(&self.document_id) {
            Ok(Some(draft)) => {
                if self.file_name.is_none() {
                    self.file_name = draft.file_name.clone();
                }
                self.registry
                    .build_mapping(draft.form_data.keys().map(String::as_str));
                for (key, value) in &draft.form_data {
                    if let Some(handle) = self.registry.handle_for(key) {
                        self.store.set_value(handle, value.clone());
                    }
                }
                tracing::info!("Restored draft with {} values", draft.form_data.len());
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Draft load failed: {}", err);
                self.notices
                    .push(format!("Saved draft could not be loaded: {}", err));
            }
        }

        self.flush_all_bindings();
        // restoring a draft is not an edit
        self.autosave.cancel();
    }

    // ---- value access ------------------------------------------------

    pub fn get_value(&self, handle: FieldHandle) -> &str {
        self.store.get_value(handle)
    }

    /// Edit from the form UI (or any non-widget caller). Propagation into
    /// widgets completes before this returns.
    pub fn set_value(&mut self, handle: FieldHandle, value: impl Into<String>, now: Instant) {
        self.store.set_value(handle, value);
        self.flush_dirty_bindings();
        self.autosave.note_activity(now);
    }

    /// Edit committed by an on-page widget (in-place editor closed). The
    /// widget mirror updates first, so the sync pass does not echo the
    /// value straight back to its origin.
    pub fn widget_edited(&mut self, handle: FieldHandle, value: impl Into<String>, now: Instant) {
        let value = value.into();
        match self.arena.get_mut(handle) {
            Some(widget) => widget.displayed = value.clone(),
            None => tracing::debug!("Edit from unknown widget {:?}; storing anyway", handle),
        }
        self.store.set_value(handle, value);
        self.flush_dirty_bindings();
        self.autosave.note_activity(now);
    }

    pub fn handle_for(&self, field_key: &str) -> Option<FieldHandle> {
        self.registry.handle_for(field_key)
    }

    /// fieldKey → value snapshot for downstream composition.
    pub fn submit(&self) -> BTreeMap<String, String> {
        let snapshot = self.store.snapshot(&self.registry);
        tracing::info!(
            "Submitting {} field values for {}",
            snapshot.len(),
            self.document_id
        );
        snapshot
    }

    // ---- rendering-side signals --------------------------------------

    /// Surface refresh signal: reconcile every widget with the store.
    /// Never re-runs synthesis, so the widget count stays constant.
    pub fn refresh(&mut self) {
        self.flush_all_bindings();
    }

    /// Route a page-space tap. Hits activate the field for the form UI;
    /// misses collapse whatever is expanded.
    pub fn handle_tap(&mut self, page_index: u32, x: f64, y: f64) -> TapEvent {
        let event = match tap::hit_test(&self.arena, page_index, x, y) {
            Some(handle) => {
                self.active_field = Some(handle);
                TapEvent::FieldActivated(handle)
            }
            None => {
                self.active_field = None;
                TapEvent::Background
            }
        };
        for listener in &mut self.tap_listeners {
            listener(&event);
        }
        event
    }

    pub fn subscribe_taps(&mut self, listener: Box<dyn FnMut(&TapEvent)>) {
        self.tap_listeners.push(listener);
    }

    pub fn active_field(&self) -> Option<FieldHandle> {
        self.active_field
    }

    // ---- mode --------------------------------------------------------

    pub fn current_mode(&self) -> DocumentMode {
        self.mode.current().unwrap_or(DocumentMode::Fallback)
    }

    /// User affordance: give up on overlays and show the plain viewer.
    /// Store values survive the switch; only the widgets go away.
    pub fn switch_to_fallback(&mut self) -> bool {
        if !self.mode.switch_to_fallback() {
            return false;
        }
        if let Some(surface) = self.surface.as_deref_mut() {
            for widget in self.arena.iter() {
                surface.remove_widget(widget.surface_id);
            }
        }
        self.arena.clear();
        self.coordinator.clear();
        self.active_field = None;
        true
    }

    // ---- autosave ----------------------------------------------------

    /// Pump the autosave clock. Call from the owner loop's timer; a burst
    /// of edits yields exactly one save per quiet period.
    pub fn tick(&mut self, now: Instant) {
        if self.autosave.take_due(now) {
            self.save_draft_now();
        }
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.pending()
    }

    fn save_draft_now(&mut self) {
        let draft = DraftRecord::new(
            self.document_id.clone(),
            self.store.snapshot(&self.registry),
            self.file_name.clone(),
            Utc::now(),
        );
        match self.drafts.save_draft(&draft) {
            Ok(()) => tracing::debug!("Draft saved ({} values)", draft.form_data.len()),
            Err(err) => {
                tracing::warn!("Draft save failed: {}", err);
                self.notices.push(format!("Draft not saved: {}", err));
            }
        }
    }

    // ---- form UI view model ------------------------------------------

    /// Rows for the list-style form UI: region-backed fields in region
    /// order, then draft-only values sorted by key.
    pub fn form_entries(&self) -> Vec<FormEntry> {
        let mut entries = Vec::new();
        let mut seen: HashSet<FieldHandle> = HashSet::new();

        for region in &self.regions {
            if let Some(handle) = self.registry.handle_for(&region.field_key) {
                if !seen.insert(handle) {
                    continue;
                }
                entries.push(FormEntry {
                    handle,
                    field_key: region.field_key.clone(),
                    label: region.label.clone(),
                    kind: region.kind,
                    page_index: Some(region.page_index),
                    value: self.store.get_value(handle).to_string(),
                });
            }
        }

        let mut orphans: Vec<(&str, FieldHandle)> = self
            .registry
            .pairs()
            .filter(|(_, handle)| !seen.contains(handle))
            .collect();
        orphans.sort_by_key(|(key, _)| key.to_string());
        for (key, handle) in orphans {
            entries.push(FormEntry {
                handle,
                field_key: key.to_string(),
                label: None,
                kind: FieldKind::Unknown,
                page_index: None,
                value: self.store.get_value(handle).to_string(),
            });
        }
        entries
    }

    pub fn progress(&self) -> FillProgress {
        let total = self.registry.len();
        let filled = self
            .registry
            .handles()
            .filter(|&handle| !self.store.get_value(handle).is_empty())
            .count();
        FillProgress { filled, total }
    }

    // ---- notices & accessors -----------------------------------------

    /// Dismissible user-facing notices (failed draft I/O, missing preview).
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn widget_count(&self) -> usize {
        self.arena.len()
    }

    // ---- binding passes ----------------------------------------------

    fn flush_dirty_bindings(&mut self) {
        match self.surface.as_deref_mut() {
            Some(surface) => {
                self.coordinator
                    .sync_dirty(&self.store, &mut self.arena, surface);
            }
            None => self.coordinator.clear(),
        }
    }

    fn flush_all_bindings(&mut self) {
        match self.surface.as_deref_mut() {
            Some(surface) => {
                self.coordinator
                    .sync_all(&self.store, &mut self.arena, surface);
            }
            None => self.coordinator.clear(),
        }
    }
}
