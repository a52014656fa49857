// src/scope/mod.rs
pub mod autoscale;
pub mod error;
pub mod event;
pub mod histogram;
pub mod history;
pub mod ingest;
pub mod mailbox;
pub mod plot;
pub mod recorder;
pub mod session;
pub mod source;
pub mod waveform;
pub use autoscale::{autoscale_baseline, AxisLimits, BASELINE_ANCHOR};
pub use error::ScopeError;
pub use event::{Event, FeatureExtractor, FeatureRequest, Features, PulseExtractor};
pub use histogram::{HistogramRenderer, HistogramScene};
pub use history::{shared_history, ScopeHistory, SharedHistory};
pub use ingest::IngestWorker;
pub use mailbox::{display_mailbox, DisplayReceiver, DisplaySender};
pub use plot::{render_histogram_png, render_waveform_png, PlotStyle};
pub use recorder::FeatureRecorder;
pub use session::{ControlEvent, SessionConfig};
pub use source::{EventSource, FramedSource, ManualSource};
pub use waveform::{WaveformRenderer, WaveformScene, CURVE_BACKLOG};
