use std::sync::{Arc, Mutex};
use crate::scope::event::Event;
/// Append-only record of everything ingested so far: the full event log plus
/// one peak amplitude per event. Shared between the ingest thread and the
/// render context; all access goes through the mutex so a reader never sees a
/// half-appended element.
///
/// Growth is unbounded by design. Renderers must consume bounded views
/// (`amplitude_tail`) instead of slicing the backing store; windowing never
/// mutates the history.
#[derive(Default)]
pub struct ScopeHistory {
    events: Vec<Arc<Event>>,
    amplitudes: Vec<f64>,
}
impl ScopeHistory {
    pub fn record(&mut self, event: Arc<Event>, peak: f64) {
        self.events.push(event);
        self.amplitudes.push(peak);
    }
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
    pub fn amplitude_count(&self) -> usize {
        self.amplitudes.len()
    }
    pub fn latest_event(&self) -> Option<Arc<Event>> {
        self.events.last().cloned()
    }
    /// Clone of at most the trailing `window` amplitudes, oldest first. The
    /// backing store is left untouched.
    pub fn amplitude_tail(&self, window: usize) -> Vec<f64> {
        let start = self.amplitudes.len().saturating_sub(window);
        self.amplitudes[start..].to_vec()
    }
    /// Histogram "Clear": drops recorded amplitudes only. The event log stays
    /// intact for replay or export.
    pub fn clear_amplitudes(&mut self) {
        self.amplitudes.clear();
    }
}
pub type SharedHistory = Arc<Mutex<ScopeHistory>>;
pub fn shared_history() -> SharedHistory {
    Arc::new(Mutex::new(ScopeHistory::default()))
}
