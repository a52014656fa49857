use serde::Serialize;
use crate::scope::ScopeError;
/// Single digitized detector event: one ordered burst of ADC samples.
#[derive(Clone, Debug)]
pub struct Event {
    pub timestamp: u64,
    pub channel: u16,
    pub samples: Vec<u16>,
}
impl Event {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn peak(&self) -> Option<u16> {
        self.samples.iter().copied().max()
    }
    pub fn trough(&self) -> Option<u16> {
        self.samples.iter().copied().min()
    }
}
/// Scalar features derived from one event. Computed once, never mutated.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Features {
    pub peak: f64,
    pub baseline: Option<f64>,
}
/// Which features a caller actually needs. The ingest hot path asks for the
/// peak only; the waveform renderer asks for everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureRequest {
    pub peak: bool,
    pub baseline: bool,
}
impl FeatureRequest {
    pub fn peak_only() -> Self {
        Self {
            peak: true,
            baseline: false,
        }
    }
    pub fn all() -> Self {
        Self {
            peak: true,
            baseline: true,
        }
    }
}
pub trait FeatureExtractor {
    fn extract(&self, event: &Event, request: FeatureRequest) -> Result<Features, ScopeError>;
}
/// Default extractor: peak is the maximum sample, baseline the mean of the
/// leading `baseline_samples` samples (clamped to the event length).
#[derive(Clone, Copy, Debug)]
pub struct PulseExtractor {
    pub baseline_samples: usize,
}
impl PulseExtractor {
    pub fn new(baseline_samples: usize) -> Self {
        Self { baseline_samples }
    }
}
impl FeatureExtractor for PulseExtractor {
    fn extract(&self, event: &Event, request: FeatureRequest) -> Result<Features, ScopeError> {
        if event.is_empty() {
            return Err(ScopeError::EmptyEvent);
        }
        let peak = event.peak().unwrap_or(0) as f64;
        let baseline = if request.baseline {
            let take = self.baseline_samples.clamp(1, event.len());
            let sum: u64 = event.samples.iter().take(take).map(|&s| s as u64).sum();
            Some(sum as f64 / take as f64)
        } else {
            None
        };
        Ok(Features { peak, baseline })
    }
}
