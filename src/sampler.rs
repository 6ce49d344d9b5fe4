use serde::{Deserialize, Serialize};

use crate::data::model::{SpectralSample, SpectralSeries};

/// Sample count used by the charts when none is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Half-open numeric interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distance between samples when the range is cut into `count` steps.
    pub fn step(&self, count: usize) -> f64 {
        (self.max - self.min) / count as f64
    }
}

/// Evaluate `f` at `count` evenly spaced points of `[min, max)`.
///
/// Points are `min + i * (max - min) / count`, so `max` itself is never
/// sampled. Returns an empty series when `min >= max`, `count == 0`, or the
/// bounds or the spacing between points are not finite.
pub fn sample_function(
    f: impl Fn(f64) -> f64,
    min: f64,
    max: f64,
    count: usize,
) -> SpectralSeries {
    let range = SampleRange::new(min, max);
    if count == 0 || !min.is_finite() || !max.is_finite() || min >= max {
        return SpectralSeries::default();
    }
    // `max - min` overflows to infinity for bounds near f64::MAX.
    let step = range.step(count);
    if !step.is_finite() || step <= 0.0 {
        return SpectralSeries::default();
    }

    let mut samples: Vec<SpectralSample> = Vec::with_capacity(count);
    for i in 0..count {
        let x = min + i as f64 * step;
        // A step below float resolution at `min` would repeat wavelengths.
        if !x.is_finite() || samples.last().is_some_and(|last| last.wavelength >= x) {
            continue;
        }
        samples.push(SpectralSample::new(x, f(x)));
    }
    SpectralSeries::from_sorted(samples)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn samples_half_open_range() {
        let s = sample_function(|x| x * x, 0.0, 10.0, 5);
        assert_eq!(
            s.to_points(),
            vec![[0.0, 0.0], [2.0, 4.0], [4.0, 16.0], [6.0, 36.0], [8.0, 64.0]]
        );
    }

    #[test]
    fn default_count_over_visible_band() {
        let s = sample_function(|x| x, 380e-9, 750e-9, DEFAULT_SAMPLE_COUNT);
        assert_eq!(s.len(), 100);
        assert_eq!(s.samples()[0].wavelength, 380e-9);
        let last = s.samples()[99].wavelength;
        assert!(last < 750e-9);
        assert_abs_diff_eq!(last, 750e-9 - 3.7e-9, epsilon = 1e-15);
    }

    #[test]
    fn degenerate_ranges_are_empty() {
        assert!(sample_function(|x| x, 1.0, 1.0, 10).is_empty());
        assert!(sample_function(|x| x, 2.0, 1.0, 10).is_empty());
        assert!(sample_function(|x| x, 0.0, 1.0, 0).is_empty());
        assert!(sample_function(|x| x, f64::NAN, 1.0, 10).is_empty());
    }

    #[test]
    fn overflowing_span_is_empty() {
        let s = sample_function(|x| x, -1e308, 1e308, 3);
        assert!(s.is_empty());
        assert!(s.wavelengths().all(f64::is_finite));
    }

    #[test]
    fn nan_values_are_kept() {
        let s = sample_function(|x| if x > 0.5 { f64::NAN } else { x }, 0.0, 1.0, 4);
        assert_eq!(s.len(), 4);
        assert!(s.samples()[3].value.is_nan());
    }
}
