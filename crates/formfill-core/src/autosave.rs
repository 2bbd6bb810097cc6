//! Autosave debouncing
//!
//! Observes the value store and coalesces edit bursts: persistence runs
//! exactly once per quiet period, with whatever the store holds by then.
//! The adapter never reads a wall clock itself; the session passes `now`
//! in, which keeps the timing deterministic under test.

use crate::store::StoreListener;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct AutosaveAdapter {
    debounce: Duration,
    touched: Rc<Cell<bool>>,
    deadline: Option<Instant>,
}

impl AutosaveAdapter {
    /// Trailing quiet period before a save fires.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(5);

    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            touched: Rc::new(Cell::new(false)),
            deadline: None,
        }
    }

    /// Subscription callback for the store; only flags that something
    /// changed.
    pub fn listener(&self) -> StoreListener {
        let touched = Rc::clone(&self.touched);
        Box::new(move |_| touched.set(true))
    }

    /// Fold any flagged store activity into the deadline. Every edit
    /// pushes the deadline out to `now + debounce` (trailing debounce).
    pub fn note_activity(&mut self, now: Instant) {
        if self.touched.replace(false) {
            self.deadline = Some(now + self.debounce);
        }
    }

    /// True exactly once per elapsed quiet period; the caller saves.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any pending save; a new document load starts clean.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.touched.set(false);
    }
}

impl Default for AutosaveAdapter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEBOUNCE)
    }
}
