//! Shared test doubles: a recording render surface and a shared-log draft
//! store, both inspectable after the session takes ownership.

use formfill_core::coords::PageRect;
use formfill_core::error::FormFillError;
use formfill_core::persist::DraftStore;
use formfill_core::surface::{
    NativeFieldInfo, PageSize, RenderSurface, SurfaceWidgetId, WidgetSpec,
};
use shared_types::{DetectedRegion, DraftRecord, FieldKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct SurfaceState {
    pub pages: Vec<PageSize>,
    pub native: Vec<NativeFieldInfo>,
    pub added: Vec<(SurfaceWidgetId, WidgetSpec)>,
    pub removed: Vec<SurfaceWidgetId>,
    pub values: HashMap<SurfaceWidgetId, String>,
    pub invalidations: Vec<(u32, PageRect)>,
    next_id: u64,
}

impl SurfaceState {
    pub fn live_widget_count(&self) -> usize {
        self.added.len() - self.removed.len()
    }
}

pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl RenderSurface for RecordingSurface {
    fn page_count(&self) -> u32 {
        self.state.borrow().pages.len() as u32
    }

    fn page_size(&self, page_index: u32) -> Option<PageSize> {
        self.state.borrow().pages.get(page_index as usize).copied()
    }

    fn native_fields(&self) -> Vec<NativeFieldInfo> {
        self.state.borrow().native.clone()
    }

    fn add_widget(&mut self, spec: &WidgetSpec) -> SurfaceWidgetId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = SurfaceWidgetId(state.next_id);
        state.added.push((id, spec.clone()));
        state.values.insert(id, String::new());
        id
    }

    fn remove_widget(&mut self, id: SurfaceWidgetId) {
        let mut state = self.state.borrow_mut();
        state.removed.push(id);
        state.values.remove(&id);
    }

    fn set_widget_value(&mut self, id: SurfaceWidgetId, value: &str) {
        self.state.borrow_mut().values.insert(id, value.to_string());
    }

    fn widget_value(&self, id: SurfaceWidgetId) -> String {
        self.state.borrow().values.get(&id).cloned().unwrap_or_default()
    }

    fn invalidate_rect(&mut self, page_index: u32, rect: PageRect) {
        self.state.borrow_mut().invalidations.push((page_index, rect));
    }
}

/// US Letter surface with `pages` pages and no native fields.
pub fn letter_surface(
    pages: u32,
) -> (Rc<RefCell<SurfaceState>>, Result<Box<dyn RenderSurface>, FormFillError>) {
    let state = Rc::new(RefCell::new(SurfaceState {
        pages: (0..pages)
            .map(|_| PageSize {
                width: 612.0,
                height: 792.0,
            })
            .collect(),
        ..SurfaceState::default()
    }));
    let surface = RecordingSurface {
        state: Rc::clone(&state),
    };
    (state, Ok(Box::new(surface)))
}

/// Letter surface that also reports embedded fillable fields, each paired
/// with the value it currently displays.
pub fn native_surface(
    pages: u32,
    native: Vec<(NativeFieldInfo, &str)>,
) -> (Rc<RefCell<SurfaceState>>, Result<Box<dyn RenderSurface>, FormFillError>) {
    let (state, surface) = letter_surface(pages);
    {
        let mut s = state.borrow_mut();
        for (field, value) in native {
            s.values.insert(field.id, value.to_string());
            s.native.push(field);
        }
    }
    (state, surface)
}

pub fn native_field(id: u64, tag: &str, page_index: u32) -> NativeFieldInfo {
    NativeFieldInfo {
        id: SurfaceWidgetId(id),
        tag: tag.to_string(),
        page_index,
        rect: PageRect {
            x: 50.0,
            y: 700.0,
            width: 180.0,
            height: 24.0,
        },
        kind: FieldKind::Text,
    }
}

pub fn detected(field_key: &str, page: u32, x: f64, y: f64, w: f64, h: f64) -> DetectedRegion {
    DetectedRegion {
        field_key: field_key.to_string(),
        page_index: Some(page),
        x,
        y,
        width: w,
        height: h,
        field_kind: FieldKind::Text,
        label: None,
        confidence: Some(0.9),
    }
}

#[derive(Default)]
pub struct DraftLog {
    pub saves: Vec<DraftRecord>,
    pub preloaded: Option<DraftRecord>,
    pub fail_saves: bool,
}

pub struct SharedDraftStore {
    log: Rc<RefCell<DraftLog>>,
}

impl DraftStore for SharedDraftStore {
    fn save_draft(&mut self, draft: &DraftRecord) -> Result<(), FormFillError> {
        let mut log = self.log.borrow_mut();
        if log.fail_saves {
            return Err(FormFillError::Persistence("disk full".to_string()));
        }
        log.saves.push(draft.clone());
        Ok(())
    }

    fn load_draft(&mut self, document_id: &str) -> Result<Option<DraftRecord>, FormFillError> {
        Ok(self
            .log
            .borrow()
            .preloaded
            .clone()
            .filter(|d| d.document_id == document_id))
    }
}

pub fn draft_store() -> (Rc<RefCell<DraftLog>>, Box<dyn DraftStore>) {
    let log = Rc::new(RefCell::new(DraftLog::default()));
    let store = SharedDraftStore {
        log: Rc::clone(&log),
    };
    (log, Box::new(store))
}
