use std::collections::VecDeque;
use crate::scope::autoscale::{autoscale_baseline, AxisLimits, BASELINE_ANCHOR};
use crate::scope::event::{Event, FeatureExtractor, FeatureRequest, PulseExtractor};
use crate::scope::ScopeError;
/// How many previously drawn traces stay visible while fading out.
pub const CURVE_BACKLOG: usize = 8;
/// One trace in the scene, newest-last. `opacity` decreases with age.
#[derive(Clone, Debug)]
pub struct Curve {
    pub samples: Vec<f64>,
    pub opacity: f64,
}
/// Everything needed to draw one waveform frame: the fading trace backlog,
/// the axis limits and the baseline marker. Pure data, backend-agnostic.
#[derive(Clone, Debug)]
pub struct WaveformScene {
    pub curves: Vec<Curve>,
    pub limits: AxisLimits,
    pub x_max: f64,
    pub baseline_marker_x: f64,
}
/// Renders the most recent event and recomputes axis limits with the
/// baseline-anchored autoscale. Limits persist across frames.
pub struct WaveformRenderer {
    extractor: PulseExtractor,
    limits: AxisLimits,
    backlog: VecDeque<Vec<f64>>,
    autoscale: bool,
    x_max: f64,
}
impl WaveformRenderer {
    pub fn new(baseline_samples: usize) -> Self {
        Self {
            extractor: PulseExtractor::new(baseline_samples),
            limits: AxisLimits::default(),
            backlog: VecDeque::with_capacity(CURVE_BACKLOG + 1),
            autoscale: true,
            x_max: 1.0,
        }
    }
    /// When disabled, limits are left entirely to manual zoom controls.
    pub fn set_autoscale(&mut self, enabled: bool) {
        self.autoscale = enabled;
    }
    pub fn autoscale_enabled(&self) -> bool {
        self.autoscale
    }
    pub fn set_baseline_samples(&mut self, count: usize) {
        self.extractor.baseline_samples = count.max(1);
    }
    pub fn baseline_samples(&self) -> usize {
        self.extractor.baseline_samples
    }
    pub fn limits(&self) -> AxisLimits {
        self.limits
    }
    /// Manual zoom path, meaningful while autoscale is off.
    pub fn set_limits(&mut self, limits: AxisLimits) {
        self.limits = limits;
    }
    /// Draw one event: push it onto the fading backlog, rescale if enabled,
    /// and emit the scene.
    pub fn render(&mut self, event: &Event) -> Result<WaveformScene, ScopeError> {
        if event.is_empty() {
            return Err(ScopeError::EmptyEvent);
        }
        self.backlog
            .push_back(event.samples.iter().map(|&s| s as f64).collect());
        while self.backlog.len() > CURVE_BACKLOG {
            self.backlog.pop_front();
        }
        self.x_max = event.len() as f64;
        if self.autoscale {
            let features = self.extractor.extract(event, FeatureRequest::all())?;
            let new_max = features.peak;
            let new_min = event.trough().unwrap_or(0) as f64;
            let baseline = features.baseline.unwrap_or(new_min);
            self.limits =
                autoscale_baseline(self.limits, new_max, new_min, baseline, BASELINE_ANCHOR);
        }
        Ok(self.scene())
    }
    /// Scene for the current state; also used to refresh the baseline marker
    /// after a control change without a new event.
    pub fn scene(&self) -> WaveformScene {
        let count = self.backlog.len();
        let curves = self
            .backlog
            .iter()
            .enumerate()
            .map(|(i, samples)| Curve {
                samples: samples.clone(),
                opacity: (i + 1) as f64 / count.max(1) as f64,
            })
            .collect();
        WaveformScene {
            curves,
            limits: self.limits,
            x_max: self.x_max,
            baseline_marker_x: self.extractor.baseline_samples as f64,
        }
    }
}
