//! Reusable sink fixtures.
//!
//! - [`RecordingSink`]: keeps every event it sees.
//! - [`FailingSink`]: returns an error on every call, counting them.
//! - [`PanickingSink`]: panics on every call.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use skirmish_engine::{KillEvent, KillSink, SinkError};

/// Records every event for later inspection.
#[derive(Default)]
pub struct RecordingSink {
    pub name: String,
    events: Mutex<Vec<KillEvent>>,
}

impl RecordingSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<KillEvent> {
        self.events.lock().clone()
    }

    /// Only the events with `won == true`.
    pub fn kills(&self) -> Vec<KillEvent> {
        self.events.lock().iter().filter(|e| e.won).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl KillSink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Fails every call with [`SinkError::Failed`].
#[derive(Default)]
pub struct FailingSink {
    calls: AtomicUsize,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl KillSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn on_kill(&self, _event: &KillEvent) -> Result<(), SinkError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        Err(SinkError::Failed {
            reason: format!("deliberate failure #{n}"),
        })
    }
}

/// Panics on every call.
#[derive(Default)]
pub struct PanickingSink;

impl KillSink for PanickingSink {
    fn name(&self) -> &str {
        "panicking"
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        panic!("panicking sink saw {event}");
    }
}
