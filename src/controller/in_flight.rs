//! Per-action in-flight tracking
//!
//! Each long-running form action may only run once at a time. Starting it
//! again while it is running is refused instead of queued. Different actions
//! do not block each other.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Form actions that suspend on an external call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormAction {
    UploadImages,
    UploadBrochure,
    AutofillLocation,
    Save,
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormAction::UploadImages => "image upload",
            FormAction::UploadBrochure => "brochure upload",
            FormAction::AutofillLocation => "location search",
            FormAction::Save => "save",
        };
        f.write_str(name)
    }
}

/// Set of actions currently running
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    running: Arc<Mutex<HashSet<FormAction>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `action` as running; `None` if it already is
    pub fn begin(&self, action: FormAction) -> Option<InFlightGuard> {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if running.insert(action) {
            Some(InFlightGuard {
                running: Arc::clone(&self.running),
                action,
            })
        } else {
            None
        }
    }

    pub fn is_running(&self, action: FormAction) -> bool {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&action)
    }

    /// True while any action is running
    pub fn is_busy(&self) -> bool {
        !self
            .running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

/// Clears its action when dropped, including on early return or error
#[derive(Debug)]
pub struct InFlightGuard {
    running: Arc<Mutex<HashSet<FormAction>>>,
    action: FormAction,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        running.remove(&self.action);
    }
}
