use log::debug;
use crate::scope::history::SharedHistory;
/// Trailing window of amplitudes the histogram operates on.
pub const AMPLITUDE_WINDOW: usize = 100_000;
pub const BIN_COUNT: usize = 100;
const CLIP_LOW_PERCENTILE: f64 = 1.0;
const CLIP_HIGH_PERCENTILE: f64 = 99.0;
/// Binned view of the windowed amplitude history, ready to draw. `range` is
/// percentile-clipped so a handful of outliers cannot flatten the display.
#[derive(Clone, Debug)]
pub struct HistogramScene {
    pub bins: Vec<u32>,
    pub range: (f64, f64),
    pub max_count: u32,
    pub sample_count: usize,
    pub mean: f64,
    pub std_dev: f64,
}
impl HistogramScene {
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}
/// Recomputes the peak histogram on a fixed tick, decoupled from the
/// ingestion rate. Reads a bounded, non-destructive tail of the shared
/// amplitude history.
pub struct HistogramRenderer {
    history: SharedHistory,
    window: usize,
    paused: bool,
}
impl HistogramRenderer {
    pub fn new(history: SharedHistory) -> Self {
        Self {
            history,
            window: AMPLITUDE_WINDOW,
            paused: false,
        }
    }
    #[cfg(test)]
    fn with_window(history: SharedHistory, window: usize) -> Self {
        Self {
            history,
            window,
            paused: false,
        }
    }
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    /// Histogram "Clear": empty the recorded amplitudes and redraw empty.
    pub fn clear(&mut self) -> HistogramScene {
        if let Ok(mut h) = self.history.lock() {
            h.clear_amplitudes();
        }
        bin_amplitudes(&[])
    }
    /// One timer tick. `None` while paused (no redraw, no windowing work);
    /// otherwise the scene over the most recent window.
    pub fn tick(&mut self) -> Option<HistogramScene> {
        if self.paused {
            return None;
        }
        let windowed = match self.history.lock() {
            Ok(h) => h.amplitude_tail(self.window),
            Err(_) => return None,
        };
        let scene = bin_amplitudes(&windowed);
        debug!(
            "histogram: {} samples, mean {:.1}, std {:.1}",
            scene.sample_count, scene.mean, scene.std_dev
        );
        Some(scene)
    }
}
/// Bin a slice of amplitudes into the percentile-clipped display range.
/// Degenerates gracefully: empty input yields an empty scene, single-valued
/// input a single populated bin.
pub fn bin_amplitudes(values: &[f64]) -> HistogramScene {
    if values.is_empty() {
        return HistogramScene {
            bins: vec![0; BIN_COUNT],
            range: (0.0, 0.0),
            max_count: 0,
            sample_count: 0,
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut low = percentile(&sorted, CLIP_LOW_PERCENTILE);
    let mut high = percentile(&sorted, CLIP_HIGH_PERCENTILE);
    if high <= low {
        // All values inside the clip range are equal: widen to one bin.
        low -= 0.5;
        high += 0.5;
    }
    let mut bins = vec![0u32; BIN_COUNT];
    let width = (high - low) / BIN_COUNT as f64;
    for &v in values {
        if v < low || v > high {
            continue;
        }
        let idx = (((v - low) / width) as usize).min(BIN_COUNT - 1);
        bins[idx] += 1;
    }
    let max_count = bins.iter().copied().max().unwrap_or(0);
    HistogramScene {
        bins,
        range: (low, high),
        max_count,
        sample_count: values.len(),
        mean,
        std_dev,
    }
}
/// Linear-interpolated percentile over pre-sorted data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = q / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi.min(last)] * frac
}
