/// Visible amplitude range of the waveform axes. Persisted across frames:
/// each frame's autoscale decision depends on the previous frame's limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLimits {
    pub low: f64,
    pub high: f64,
}
impl AxisLimits {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
    fn strictly_contains(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }
}
impl Default for AxisLimits {
    fn default() -> Self {
        // Fresh axes before the first frame arrives.
        Self {
            low: 0.0,
            high: 1.0,
        }
    }
}
/// Fraction of the visible range the baseline sits up from the bottom.
pub const BASELINE_ANCHOR: f64 = 0.3;
const GRID: f64 = 100.0;
/// Pick new axis limits such that the baseline stays anchored at the same
/// fractional height while the new frame's extremes fit.
///
/// The smallest range satisfying both the top constraint (`new_max` visible
/// above the anchored baseline) and the bottom constraint (`new_min` visible
/// below it) wins. If the current limits are already wide enough and the new
/// extremes fall strictly inside them, they are kept unchanged to avoid
/// rescale jitter. Accepted rescales snap `high` up and `low` down to the
/// nearest multiple of 100 for visual stability.
pub fn autoscale_baseline(
    old_limits: AxisLimits,
    new_max: f64,
    new_min: f64,
    new_baseline: f64,
    anchor: f64,
) -> AxisLimits {
    let range_high = (new_max - new_baseline) / (1.0 - anchor);
    let range_low = (new_baseline - new_min) / anchor;
    let range_new = range_high.max(range_low);
    if old_limits.range() > range_new
        && old_limits.strictly_contains(new_max)
        && old_limits.strictly_contains(new_min)
    {
        return old_limits;
    }
    let high = new_baseline + range_new * (1.0 - anchor);
    let low = new_baseline - range_new * anchor;
    AxisLimits {
        low: (low / GRID).floor() * GRID,
        high: (high / GRID).ceil() * GRID,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn worked_example_from_the_bench() {
        // range_high = (1500-100)/0.7 = 2000, range_low = 100/0.3 = 333.3;
        // old range 1000 < 2000, so the rescale triggers.
        let result = autoscale_baseline(AxisLimits::new(0.0, 1000.0), 1500.0, 0.0, 100.0, 0.3);
        assert_eq!(result, AxisLimits::new(-500.0, 1500.0));
    }
    #[test]
    fn limits_are_kept_when_data_fits_inside_a_wider_range() {
        let old = AxisLimits::new(-1000.0, 3000.0);
        let result = autoscale_baseline(old, 500.0, 100.0, 200.0, 0.3);
        assert_eq!(result, old);
    }
    #[test]
    fn extreme_on_the_boundary_forces_a_rescale() {
        // new_max == old high is not strictly inside, so the keep branch is
        // not taken even though the old range is generous.
        let old = AxisLimits::new(-1000.0, 1500.0);
        let result = autoscale_baseline(old, 1500.0, 0.0, 100.0, 0.3);
        assert_ne!(result, old);
        assert_eq!(result, AxisLimits::new(-500.0, 1500.0));
    }
    #[test]
    fn outputs_snap_to_the_100_grid() {
        let result = autoscale_baseline(AxisLimits::default(), 1234.0, 17.0, 120.0, 0.3);
        assert_eq!(result.low % 100.0, 0.0);
        assert_eq!(result.high % 100.0, 0.0);
        // floor/ceil direction: the snapped limits contain the exact ones.
        let range_new: f64 = ((1234.0 - 120.0) / 0.7f64).max((120.0 - 17.0) / 0.3);
        assert!(result.high >= 120.0 + range_new * 0.7);
        assert!(result.low <= 120.0 - range_new * 0.3);
    }
    #[test]
    fn baseline_sits_at_the_anchor_within_snap_tolerance() {
        let baseline = 250.0;
        let anchor = 0.3;
        let result = autoscale_baseline(AxisLimits::default(), 4321.0, -37.0, baseline, anchor);
        let position = (baseline - result.low) / result.range();
        // Each snapped edge moves by less than one grid step.
        let tolerance = 2.0 * GRID / result.range();
        assert!((position - anchor).abs() <= tolerance);
    }
    #[test]
    fn bottom_constraint_can_dominate() {
        // Deep undershoot below the baseline: range_low wins.
        let result = autoscale_baseline(AxisLimits::default(), 200.0, -1000.0, 100.0, 0.5);
        // range_low = (100 - -1000)/0.5 = 2200 > range_high = 200.
        assert_eq!(result, AxisLimits::new(-1000.0, 1200.0));
    }
    #[test]
    fn rescale_is_idempotent() {
        let first = autoscale_baseline(AxisLimits::default(), 1500.0, 0.0, 100.0, 0.3);
        let second = autoscale_baseline(first, 1500.0, 0.0, 100.0, 0.3);
        // Re-running on its own output reproduces the same snapped limits.
        assert_eq!(first, second);
    }
}
