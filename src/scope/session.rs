use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use anyhow::{Context, Result};
use log::{info, warn};
use crate::scope::event::PulseExtractor;
use crate::scope::histogram::{HistogramRenderer, HistogramScene};
use crate::scope::history::shared_history;
use crate::scope::ingest::IngestWorker;
use crate::scope::mailbox::display_mailbox;
use crate::scope::plot::{render_histogram_png, render_waveform_png, PlotStyle};
use crate::scope::recorder::FeatureRecorder;
use crate::scope::source::EventSource;
use crate::scope::waveform::WaveformRenderer;
/// Control signals emitted by the surrounding UI surface. The session is
/// agnostic about what produces them.
#[derive(Clone, Debug)]
pub enum ControlEvent {
    BaselineChanged(usize),
    AutoscaleToggled(bool),
    HistogramPauseToggled(bool),
    IngestPauseToggled(bool),
    ClearRequested,
    Shutdown,
}
pub struct SessionConfig {
    pub baseline_samples: usize,
    pub tick_interval: Duration,
    /// Where to drop the latest waveform/histogram PNGs; `None` disables
    /// snapshot output.
    pub snapshot_dir: Option<PathBuf>,
    /// Stop after this many histogram ticks; `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    pub recorder: Option<FeatureRecorder>,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            baseline_samples: 20,
            tick_interval: Duration::from_millis(1900),
            snapshot_dir: None,
            max_ticks: None,
            recorder: None,
        }
    }
}
/// Cooperative render loop: drains the display mailbox, applies control
/// events and fires the histogram tick, all on one thread, never blocking on
/// I/O. Ingestion runs behind it on its own thread and is aborted and joined
/// before this returns.
pub fn run<S>(source: S, config: SessionConfig, controls: Receiver<ControlEvent>) -> Result<()>
where
    S: EventSource + 'static,
{
    let history = shared_history();
    let (display_tx, display_rx) = display_mailbox();
    let extractor = PulseExtractor::new(config.baseline_samples);
    let mut worker = IngestWorker::spawn(
        source,
        extractor,
        history.clone(),
        display_tx,
        config.recorder,
    );
    let mut waveform = WaveformRenderer::new(config.baseline_samples);
    let mut histogram = HistogramRenderer::new(history.clone());
    if let Some(dir) = &config.snapshot_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating snapshot dir {}", dir.display()))?;
    }
    let mut ticks: u64 = 0;
    let mut last_tick = Instant::now();
    loop {
        loop {
            match controls.try_recv() {
                Ok(ControlEvent::BaselineChanged(count)) => waveform.set_baseline_samples(count),
                Ok(ControlEvent::AutoscaleToggled(enabled)) => waveform.set_autoscale(enabled),
                Ok(ControlEvent::HistogramPauseToggled(paused)) => histogram.set_paused(paused),
                Ok(ControlEvent::IngestPauseToggled(paused)) => worker.set_paused(paused),
                Ok(ControlEvent::ClearRequested) => {
                    // Clear redraws the emptied histogram right away, even
                    // while the tick is paused.
                    let scene = histogram.clear();
                    snapshot_histogram(config.snapshot_dir.as_deref(), &scene);
                    info!("amplitude history cleared");
                }
                Ok(ControlEvent::Shutdown) | Err(TryRecvError::Disconnected) => {
                    worker.abort();
                    worker.join();
                    return Ok(());
                }
                Err(TryRecvError::Empty) => break,
            }
        }
        if let Some(event) = display_rx.try_take() {
            // One bad event must not take the session down.
            match waveform.render(&event) {
                Ok(scene) => {
                    if let Some(dir) = &config.snapshot_dir {
                        match render_waveform_png(&scene, PlotStyle::default()) {
                            Ok(png) => {
                                if let Err(err) = std::fs::write(dir.join("waveform.png"), png) {
                                    warn!("failed to write waveform snapshot: {err}");
                                }
                            }
                            Err(err) => warn!("waveform render failed: {err}"),
                        }
                    }
                }
                Err(err) => warn!("skipping waveform frame: {err}"),
            }
        }
        if last_tick.elapsed() >= config.tick_interval {
            last_tick = Instant::now();
            if let Some(scene) = histogram.tick() {
                snapshot_histogram(config.snapshot_dir.as_deref(), &scene);
            }
            if let Ok(h) = history.lock() {
                info!(
                    "events: {}, amplitudes: {}",
                    h.event_count(),
                    h.amplitude_count()
                );
            }
            ticks += 1;
            if let Some(limit) = config.max_ticks {
                if ticks >= limit {
                    worker.abort();
                    worker.join();
                    return Ok(());
                }
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}
fn snapshot_histogram(dir: Option<&Path>, scene: &HistogramScene) {
    let Some(dir) = dir else {
        return;
    };
    match render_histogram_png(scene, PlotStyle::default()) {
        Ok(png) => {
            if let Err(err) = std::fs::write(dir.join("histogram.png"), png) {
                warn!("failed to write histogram snapshot: {err}");
            }
        }
        Err(err) => warn!("histogram render failed: {err}"),
    }
}
