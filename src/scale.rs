//! Domain → pixel mapping and axis ticks.
//!
//! This is the whole interface to the drawing side: points go in in data
//! units and come out in pixel space. Path and axis rendering happen elsewhere.

use serde::{Deserialize, Serialize};

/// Upper bound on the tick count asked of [`LinearScale::ticks`].
pub const MAX_TICKS: usize = 1000;

/// Affine map from a data interval onto a pixel interval.
///
/// The range may run backwards (e.g. `350 → 50` for a y axis whose origin is
/// at the bottom of the surface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a data value to pixels. A zero-width domain maps everything to the
    /// middle of the range.
    pub fn map(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Inverse of [`map`](Self::map).
    pub fn invert(&self, px: f64) -> f64 {
        LinearScale::new(self.range, self.domain).map(px)
    }

    /// Map `(x, y)` data points through an x and a y scale.
    pub fn map_points(x: &LinearScale, y: &LinearScale, points: &[[f64; 2]]) -> Vec<[f64; 2]> {
        points.iter().map(|&[px, py]| [x.map(px), y.map(py)]).collect()
    }

    /// Roughly `count` round tick values inside the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten, chosen so that the number of
    /// ticks is close to `count`, which is capped at [`MAX_TICKS`].
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.min(MAX_TICKS);
        let [d0, d1] = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = (hi - lo) / count as f64;
        if !step.is_finite() {
            return Vec::new();
        }
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        // Sub-unit steps are applied as divisions by an integer-ish inverse
        // so that 0.1 * 3 prints as 0.3.
        let ticks: Vec<f64> = if power >= 0.0 {
            let inc = factor * 10f64.powf(power);
            let (i0, i1) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
            (i0..=i1).map(|i| i as f64 * inc).collect()
        } else {
            let inv = 10f64.powf(-power) / factor;
            let (mut i0, mut i1) = ((lo * inv).round() as i64, (hi * inv).round() as i64);
            if (i0 as f64) / inv < lo {
                i0 += 1;
            }
            if (i1 as f64) / inv > hi {
                i1 -= 1;
            }
            (i0..=i1).map(|i| i as f64 / inv).collect()
        };

        if d0 > d1 {
            ticks.into_iter().rev().collect()
        } else {
            ticks
        }
    }
}

// ---------------------------------------------------------------------------
// Tick labels
// ---------------------------------------------------------------------------

/// How a tick value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TickFormat {
    /// `value / divisor` with a fixed number of decimals.
    Fixed { divisor: f64, decimals: usize },
    /// `value * 100` with no decimals and a `%` suffix.
    Percent,
}

impl Default for TickFormat {
    fn default() -> Self {
        TickFormat::Fixed {
            divisor: 1.0,
            decimals: 0,
        }
    }
}

impl TickFormat {
    /// Meters shown as whole nanometers.
    pub const NANOMETERS: Self = TickFormat::Fixed {
        divisor: 1e-9,
        decimals: 0,
    };

    pub fn format(&self, v: f64) -> String {
        match *self {
            TickFormat::Fixed { divisor, decimals } => format!("{:.*}", decimals, v / divisor),
            TickFormat::Percent => format!("{:.0}%", v * 100.0),
        }
    }
}

/// A tick ready to draw: value, pixel position and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Ticks of `scale` labelled with `format`.
pub fn axis_ticks(scale: &LinearScale, count: usize, format: TickFormat) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            value,
            position: scale.map(value),
            label: format.format(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn tick_count_is_capped() {
        let x = LinearScale::new([0.0, 1.0], [0.0, 100.0]);
        let ticks = x.ticks(usize::MAX);
        assert!(ticks.len() <= 2 * MAX_TICKS + 1, "{} ticks", ticks.len());
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1.0));
    }

    #[test]
    fn overflowing_domain_has_no_ticks() {
        assert!(LinearScale::new([-1e308, 1e308], [0.0, 1.0]).ticks(10).is_empty());
    }

    #[test]
    fn maps_and_inverts() {
        let x = LinearScale::new([380.0, 750.0], [50.0, 650.0]);
        assert_eq!(x.map(380.0), 50.0);
        assert_eq!(x.map(750.0), 650.0);
        assert_abs_diff_eq!(x.invert(x.map(512.0)), 512.0, epsilon = 1e-9);

        let y = LinearScale::new([0.0, 1.0], [350.0, 50.0]);
        assert_eq!(y.map(0.0), 350.0);
        assert_eq!(y.map(0.5), 200.0);
        assert_eq!(
            LinearScale::map_points(&x, &y, &[[380.0, 1.0]]),
            vec![[50.0, 50.0]]
        );
    }

    #[test]
    fn zero_width_domain_maps_to_midpoint() {
        let s = LinearScale::new([1.0, 1.0], [0.0, 10.0]);
        assert_eq!(s.map(1.0), 5.0);
    }

    #[test]
    fn nanometer_ticks() {
        let s = LinearScale::new([380.0, 750.0], [50.0, 650.0]);
        assert_eq!(
            s.ticks(10),
            vec![400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0, 750.0]
        );
    }

    #[test]
    fn fractional_ticks_are_exact() {
        let s = LinearScale::new([0.0, 1.0], [350.0, 50.0]);
        assert_eq!(s.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let labels: Vec<String> = axis_ticks(&s, 5, TickFormat::Percent)
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, ["0%", "20%", "40%", "60%", "80%", "100%"]);
    }

    #[test]
    fn meter_domain_with_nanometer_labels() {
        let s = LinearScale::new([380e-9, 750e-9], [50.0, 650.0]);
        let labels: Vec<String> = axis_ticks(&s, 10, TickFormat::NANOMETERS)
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, ["400", "450", "500", "550", "600", "650", "700", "750"]);
    }

    #[test]
    fn reversed_domain_gives_descending_ticks() {
        let s = LinearScale::new([10.0, 0.0], [0.0, 100.0]);
        assert_eq!(s.ticks(2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn fixed_format_divides() {
        let f = TickFormat::Fixed { divisor: 1e9, decimals: 2 };
        assert_eq!(f.format(4.6e7), "0.05");
        assert_eq!(TickFormat::default().format(12.4), "12");
    }
}
