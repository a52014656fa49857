use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use log::{debug, info, warn};
use crate::scope::event::{FeatureExtractor, FeatureRequest};
use crate::scope::history::SharedHistory;
use crate::scope::mailbox::DisplaySender;
use crate::scope::recorder::FeatureRecorder;
use crate::scope::source::EventSource;
const PAUSE_POLL: Duration = Duration::from_millis(100);
const EXHAUSTED_POLL: Duration = Duration::from_millis(500);
/// Background ingest loop. Started at construction on its own thread; pulls
/// events from the source at full stream rate, appends every event to the
/// shared history, and offers at most one pending update to the display.
pub struct IngestWorker {
    abort_flag: Arc<AtomicBool>,
    pause_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}
impl IngestWorker {
    pub fn spawn<S, X>(
        source: S,
        extractor: X,
        history: SharedHistory,
        display: DisplaySender,
        recorder: Option<FeatureRecorder>,
    ) -> Self
    where
        S: EventSource + 'static,
        X: FeatureExtractor + Send + 'static,
    {
        let abort_flag = Arc::new(AtomicBool::new(false));
        let pause_flag = Arc::new(AtomicBool::new(false));
        let abort = abort_flag.clone();
        let pause = pause_flag.clone();
        let handle = thread::spawn(move || {
            ingest_loop(source, extractor, history, display, recorder, abort, pause);
        });
        Self {
            abort_flag,
            pause_flag,
            handle: Some(handle),
        }
    }
    /// Ask the loop to terminate. Takes effect on its next flag check, so
    /// latency is bounded by the idle-poll granularity plus any blocking
    /// read the source is currently parked in, not instantaneous.
    pub fn abort(&self) {
        debug!("ingest worker abort requested");
        self.abort_flag.store(true, Ordering::Relaxed);
    }
    /// Stop consuming events without losing the source position.
    pub fn pause(&self) {
        self.pause_flag.store(true, Ordering::Relaxed);
    }
    pub fn resume(&self) {
        self.pause_flag.store(false, Ordering::Relaxed);
    }
    pub fn set_paused(&self, paused: bool) {
        if paused {
            self.pause();
        } else {
            self.resume();
        }
    }
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ingest worker thread panicked");
            }
        }
    }
}
impl Drop for IngestWorker {
    // The worker must never outlive its consumer context.
    fn drop(&mut self) {
        self.abort();
        self.join();
    }
}
fn ingest_loop<S, X>(
    mut source: S,
    extractor: X,
    history: SharedHistory,
    display: DisplaySender,
    mut recorder: Option<FeatureRecorder>,
    abort: Arc<AtomicBool>,
    pause: Arc<AtomicBool>,
) where
    S: EventSource,
    X: FeatureExtractor,
{
    // The recorder wants the baseline too; the display-only path sticks to
    // the cheap peak-only request.
    let request = if recorder.is_some() {
        FeatureRequest::all()
    } else {
        FeatureRequest::peak_only()
    };
    loop {
        if abort.load(Ordering::Relaxed) {
            debug!("ingest worker aborted");
            return;
        }
        if pause.load(Ordering::Relaxed) {
            thread::sleep(PAUSE_POLL);
            continue;
        }
        let event = match source.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => {
                // Temporarily exhausted, not end-of-stream: a live pipe may
                // deliver more later.
                thread::sleep(EXHAUSTED_POLL);
                continue;
            }
            Err(err) => {
                warn!("skipping undecodable event: {err}");
                // Bound the spin if the source keeps failing.
                thread::sleep(PAUSE_POLL);
                continue;
            }
        };
        let features = match extractor.extract(&event, request) {
            Ok(features) => features,
            Err(err) => {
                warn!("feature extraction failed, event skipped: {err}");
                continue;
            }
        };
        if let Some(rec) = recorder.as_mut() {
            rec.write(&event, &features);
        }
        let event = Arc::new(event);
        // History is never sampled or dropped, regardless of display
        // throttling. A poisoned lock still yields a usable guard, so
        // appends survive a panic on the render side.
        history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .record(event.clone(), features.peak);
        if display.offer(event) {
            if let Some(progress) = source.progress() {
                info!("progress: {:6.3}%", 100.0 * progress);
            }
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::event::{Event, PulseExtractor};
    use crate::scope::history::shared_history;
    use crate::scope::mailbox::display_mailbox;
    use crate::scope::source::ManualSource;
    use std::time::Instant;
    fn event(peak: u16) -> Event {
        Event {
            timestamp: peak as u64,
            channel: 0,
            samples: vec![10, 12, peak],
        }
    }
    fn wait_for_count(history: &SharedHistory, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let recorded = history
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .amplitude_count();
            if recorded >= count {
                return;
            }
            assert!(Instant::now() < deadline, "ingest did not catch up");
            thread::sleep(Duration::from_millis(5));
        }
    }
    #[test]
    fn every_event_reaches_history_even_when_display_is_busy() {
        let history = shared_history();
        let (tx, rx) = display_mailbox();
        let source = ManualSource::new((0..50).map(|i| event(100 + i)));
        let mut worker =
            IngestWorker::spawn(source, PulseExtractor::new(2), history.clone(), tx, None);
        // The render side never takes, so all but the first display update
        // gets dropped while ingestion keeps going.
        wait_for_count(&history, 50);
        worker.abort();
        worker.join();
        let h = history.lock().unwrap();
        assert_eq!(h.event_count(), 50);
        assert_eq!(h.amplitude_tail(1), vec![149.0]);
        // Exactly one event is in flight to the display.
        assert!(rx.try_take().is_some());
        assert!(rx.try_take().is_none());
    }
    #[test]
    fn extraction_failure_does_not_stop_ingestion() {
        let history = shared_history();
        let (tx, _rx) = display_mailbox();
        let events = vec![
            event(100),
            Event {
                timestamp: 1,
                channel: 0,
                samples: vec![],
            },
            event(200),
        ];
        let mut worker = IngestWorker::spawn(
            ManualSource::new(events),
            PulseExtractor::new(2),
            history.clone(),
            tx,
            None,
        );
        wait_for_count(&history, 2);
        worker.abort();
        worker.join();
        let h = history.lock().unwrap();
        assert_eq!(h.amplitude_count(), 2);
        assert_eq!(h.amplitude_tail(2), vec![100.0, 200.0]);
    }
    #[test]
    fn poisoned_history_lock_does_not_drop_events() {
        let history = shared_history();
        // Poison the mutex the way a panicking consumer would.
        let poisoner = history.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("history consumer panicked");
        })
        .join();
        assert!(history.lock().is_err());
        let (tx, _rx) = display_mailbox();
        let mut worker = IngestWorker::spawn(
            ManualSource::new(vec![event(100), event(200)]),
            PulseExtractor::new(2),
            history.clone(),
            tx,
            None,
        );
        wait_for_count(&history, 2);
        worker.abort();
        worker.join();
        let h = history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        assert_eq!(h.event_count(), 2);
        assert_eq!(h.amplitude_tail(2), vec![100.0, 200.0]);
    }
    #[test]
    fn pause_gates_consumption_and_resume_continues() {
        let history = shared_history();
        let (tx, _rx) = display_mailbox();
        let source = ManualSource::new((0..10).map(|i| event(100 + i)));
        let worker =
            IngestWorker::spawn(source, PulseExtractor::new(2), history.clone(), tx, None);
        wait_for_count(&history, 1);
        worker.pause();
        // Give the loop time to observe the flag, then note the count.
        thread::sleep(Duration::from_millis(150));
        let frozen = history.lock().unwrap().amplitude_count();
        thread::sleep(Duration::from_millis(150));
        assert_eq!(history.lock().unwrap().amplitude_count(), frozen);
        worker.resume();
        wait_for_count(&history, 10);
        // Drop aborts and joins.
    }
}
