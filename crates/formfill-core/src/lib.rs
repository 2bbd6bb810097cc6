//! Interactive field synchronization core
//!
//! Given a rendered, paginated document and a set of detected fillable
//! regions, this crate exposes each region as an editable overlay widget,
//! keeps one canonical value store per document, and keeps that store, the
//! on-page widgets, and the list-style form UI in agreement no matter
//! which side an edit comes from.
//!
//! Rendering and persistence stay outside: the renderer is consumed
//! through [`surface::RenderSurface`], drafts through
//! [`persist::DraftStore`].

pub mod autosave;
pub mod binding;
pub mod coords;
pub mod error;
pub mod mode;
pub mod persist;
pub mod region;
pub mod registry;
pub mod session;
pub mod store;
pub mod surface;
pub mod tap;
pub mod widgets;

pub use autosave::AutosaveAdapter;
pub use binding::BindingCoordinator;
pub use coords::{to_page_space, PageRect};
pub use error::FormFillError;
pub use mode::{DocumentMode, ModeSelector};
pub use persist::{DraftStore, MemoryDraftStore};
pub use region::{FieldRegion, Provenance};
pub use registry::{FieldHandle, IdentityRegistry};
pub use session::{DocumentSession, FillProgress, FormEntry, SessionConfig};
pub use store::FieldValueStore;
pub use surface::{NativeFieldInfo, PageSize, RenderSurface, SurfaceWidgetId, WidgetSpec, WidgetStyle};
pub use tap::{hit_test, TapEvent};
pub use widgets::{SynthesisReport, Widget, WidgetArena, WidgetSynthesizer};
