use log::{debug, warn};

use super::model::{SpectralSample, SpectralSeries};
use crate::error::{Result, SpectralError};

// ---------------------------------------------------------------------------
// Merge join
// ---------------------------------------------------------------------------

/// Multiply two series on the wavelengths they share.
///
/// Walks both series with one cursor each, advancing whichever sits at the
/// smaller wavelength, and emits `a.value * b.value` when the wavelengths are
/// exactly equal. Nothing is interpolated: series sampled on different grids
/// give a sparse or empty result.
pub fn align_multiply(a: &SpectralSeries, b: &SpectralSeries) -> SpectralSeries {
    let (a, b) = (a.samples(), b.samples());
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (wa, wb) = (a[i].wavelength, b[j].wavelength);
        if wa < wb {
            i += 1;
        } else if wa > wb {
            j += 1;
        } else {
            out.push(SpectralSample::new(wa, a[i].value * b[j].value));
            i += 1;
            j += 1;
        }
    }

    if out.is_empty() && !a.is_empty() && !b.is_empty() {
        warn!(
            "align_multiply: no shared wavelengths between series of {} and {} samples",
            a.len(),
            b.len()
        );
    } else {
        debug!("align_multiply: {} of {}x{} samples matched", out.len(), a.len(), b.len());
    }

    SpectralSeries::from_sorted(out)
}

/// Join three series on the wavelengths all of them share.
///
/// Same cursor walk as [`align_multiply`], one cursor per series: every step
/// advances the cursors sitting below the largest current wavelength, and a
/// row is emitted only when all three are equal.
pub fn align3(
    a: &SpectralSeries,
    b: &SpectralSeries,
    c: &SpectralSeries,
) -> Vec<(f64, [f64; 3])> {
    let (a, b, c) = (a.samples(), b.samples(), c.samples());
    let mut out = Vec::with_capacity(a.len().min(b.len()).min(c.len()));
    let (mut i, mut j, mut k) = (0, 0, 0);

    while i < a.len() && j < b.len() && k < c.len() {
        let (wa, wb, wc) = (a[i].wavelength, b[j].wavelength, c[k].wavelength);
        if wa == wb && wb == wc {
            out.push((wa, [a[i].value, b[j].value, c[k].value]));
            i += 1;
            j += 1;
            k += 1;
            continue;
        }
        let top = wa.max(wb).max(wc);
        if wa < top {
            i += 1;
        }
        if wb < top {
            j += 1;
        }
        if wc < top {
            k += 1;
        }
    }

    if out.is_empty() && !a.is_empty() && !b.is_empty() && !c.is_empty() {
        warn!(
            "align3: no wavelength shared by series of {}, {} and {} samples",
            a.len(),
            b.len(),
            c.len()
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Reducers
// ---------------------------------------------------------------------------

/// Plain sum of all values, NaN included.
pub fn sum(s: &SpectralSeries) -> f64 {
    s.values().sum()
}

/// Divide every value by the sum of all values.
///
/// This is a total-flux normalisation that ignores sample spacing, not an
/// integral.
pub fn normalize_by_integral(s: &SpectralSeries) -> Result<SpectralSeries> {
    if s.is_empty() {
        return Err(SpectralError::EmptySeries);
    }
    let total = sum(s);
    if total == 0.0 {
        return Err(SpectralError::ZeroSum);
    }
    Ok(s.map_values(|v| v / total))
}

/// Mean of the values with wavelength in `[lo, hi]`.
///
/// NaN values are left out of the numerator but still counted in the
/// denominator, so gaps in a table pull the mean towards zero. Downstream
/// tallies depend on this; use [`average_finite`] for the conventional mean.
pub fn average(s: &SpectralSeries, lo: f64, hi: f64) -> Result<f64> {
    let (total, count, _) = band_totals(s, lo, hi)?;
    Ok(total / count as f64)
}

/// Mean of the non-NaN values with wavelength in `[lo, hi]`.
pub fn average_finite(s: &SpectralSeries, lo: f64, hi: f64) -> Result<f64> {
    let (total, count, nan_count) = band_totals(s, lo, hi)?;
    if count == nan_count {
        return Err(SpectralError::EmptyRange { lo, hi });
    }
    Ok(total / (count - nan_count) as f64)
}

/// Sum of non-NaN values, samples in band, NaN samples in band.
fn band_totals(s: &SpectralSeries, lo: f64, hi: f64) -> Result<(f64, usize, usize)> {
    let mut total = 0.0;
    let mut count = 0;
    let mut nan_count = 0;
    for sample in s.iter().filter(|x| x.wavelength >= lo && x.wavelength <= hi) {
        count += 1;
        if sample.value.is_nan() {
            nan_count += 1;
        } else {
            total += sample.value;
        }
    }
    if count == 0 {
        return Err(SpectralError::EmptyRange { lo, hi });
    }
    Ok((total, count, nan_count))
}
