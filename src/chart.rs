use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{series_palette, to_hex};
use crate::config::PlotConfig;
use crate::data::model::SpectralSeries;
use crate::sampler::sample_function;
use crate::scale::{axis_ticks, LinearScale, Tick, TickFormat};

// ---------------------------------------------------------------------------
// Chart document
// ---------------------------------------------------------------------------

/// A finished chart in pixel space, ready for an SVG or canvas backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub width: f64,
    pub height: f64,
    pub paths: Vec<ChartPath>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

/// One stroked polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPath {
    pub name: String,
    /// `#rrggbb`
    pub stroke: String,
    pub stroke_width: f64,
    pub curve: CurveKind,
    pub points: Vec<[f64; 2]>,
}

/// How a renderer joins consecutive path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Straight segments.
    Linear,
    /// Uniform cubic B-spline through the points' convex hull.
    #[default]
    Basis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Bottom,
    Left,
}

/// An axis line at `offset` pixels (y for a bottom axis, x for a left one).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub side: AxisSide,
    pub offset: f64,
    pub ticks: Vec<Tick>,
}

impl ChartPath {
    /// Project `series` through the scales. Samples with a NaN coordinate are
    /// left out of the path.
    pub fn from_series(
        name: &str,
        series: &SpectralSeries,
        x: &LinearScale,
        y: &LinearScale,
        stroke: String,
        stroke_width: f64,
        curve: CurveKind,
    ) -> Self {
        let data: Vec<[f64; 2]> = series
            .iter()
            .filter(|s| !s.wavelength.is_nan() && !s.value.is_nan())
            .map(|s| [s.wavelength, s.value])
            .collect();
        let dropped = series.len() - data.len();
        if dropped > 0 {
            debug!("path '{name}': dropped {dropped} NaN samples");
        }
        ChartPath {
            name: name.to_string(),
            stroke,
            stroke_width,
            curve,
            points: LinearScale::map_points(x, y, &data),
        }
    }
}

fn axes(
    config: &PlotConfig,
    x: &LinearScale,
    y: &LinearScale,
    x_format: TickFormat,
    y_format: TickFormat,
) -> (Axis, Axis) {
    let c = &config.chart;
    (
        Axis {
            side: AxisSide::Bottom,
            offset: c.y_range[0],
            ticks: axis_ticks(x, c.x_ticks, x_format),
        },
        Axis {
            side: AxisSide::Left,
            offset: c.x_range[0],
            ticks: axis_ticks(y, c.y_ticks, y_format),
        },
    )
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Spectral power of the configured bulb across the visible band.
///
/// x is labelled in nanometers, y in units of 10⁹.
pub fn bulb_spectrum_chart(config: &PlotConfig) -> Chart {
    let domain = config.bulb_domain;
    let bulb = config.bulb;
    let series = sample_function(|w| bulb.emission(w), domain.min, domain.max, config.sample_count);

    let x = LinearScale::new([domain.min, domain.max], config.chart.x_range);
    let y = LinearScale::new([0.0, config.radiance_max], config.chart.y_range);
    let (x_axis, y_axis) = axes(
        config,
        &x,
        &y,
        TickFormat::NANOMETERS,
        TickFormat::Fixed {
            divisor: 1e9,
            decimals: 2,
        },
    );

    let name = format!("{:.0} K", bulb.temperature);
    let path = ChartPath::from_series(
        &name,
        &series,
        &x,
        &y,
        config.chart.stroke.clone(),
        config.chart.stroke_width,
        config.chart.curve,
    );
    debug!("bulb chart: {} points", path.points.len());

    Chart {
        width: config.chart.width,
        height: config.chart.height,
        paths: vec![path],
        x_axis,
        y_axis,
    }
}

/// Tabulated relative curves (luminous efficiency, cone sensitivities, …) over
/// `curve_domain` nanometers with a 0–100 % y axis. One colour per series.
pub fn table_chart(series: &[(&str, SpectralSeries)], config: &PlotConfig) -> Chart {
    let x = LinearScale::new(config.curve_domain, config.chart.x_range);
    let y = LinearScale::new([0.0, 1.0], config.chart.y_range);
    let (x_axis, y_axis) = axes(config, &x, &y, TickFormat::default(), TickFormat::Percent);

    let paths = series
        .iter()
        .zip(series_palette(series.len()))
        .map(|((name, s), color)| {
            ChartPath::from_series(
                name,
                s,
                &x,
                &y,
                to_hex(color),
                config.chart.stroke_width,
                config.chart.curve,
            )
        })
        .collect();

    Chart {
        width: config.chart.width,
        height: config.chart.height,
        paths,
        x_axis,
        y_axis,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn bulb_chart_matches_page_layout() {
        let chart = bulb_spectrum_chart(&PlotConfig::default());
        assert_eq!((chart.width, chart.height), (700.0, 400.0));
        assert_eq!(chart.paths.len(), 1);

        let path = &chart.paths[0];
        assert_eq!(path.stroke, "#ff0000");
        assert_eq!(path.name, "3000 K");
        assert_eq!(path.points.len(), 100);
        assert_abs_diff_eq!(path.points[0][0], 50.0, epsilon = 1e-9);
        // Radiance rises across the visible band at 3000 K, so pixels climb.
        assert!(path.points.windows(2).all(|w| w[1][1] < w[0][1]));
        assert!(path.points.iter().all(|p| p[1] >= 50.0 && p[1] <= 350.0));

        assert_eq!(chart.x_axis.side, AxisSide::Bottom);
        assert_eq!(chart.x_axis.offset, 350.0);
        assert_eq!(chart.x_axis.ticks[0].label, "400");
        assert_eq!(chart.y_axis.offset, 50.0);
        assert_eq!(chart.y_axis.ticks.last().unwrap().label, "0.06");
    }

    #[test]
    fn table_chart_drops_nan_and_colors_series() {
        let a = SpectralSeries::from_pairs(&[(380.0, 0.0), (555.0, 1.0), (750.0, f64::NAN)]).unwrap();
        let b = SpectralSeries::from_pairs(&[(380.0, 0.5)]).unwrap();
        let chart = table_chart(&[("vl1924e", a), ("other", b)], &PlotConfig::default());

        assert_eq!(chart.paths[0].points.len(), 2);
        assert_eq!(chart.paths[0].points[0], [50.0, 350.0]);
        assert_eq!(chart.paths[0].stroke, "#ff0000");
        assert_ne!(chart.paths[1].stroke, chart.paths[0].stroke);
        assert_eq!(chart.y_axis.ticks.last().unwrap().label, "100%");
    }

    #[test]
    fn chart_serializes() {
        let json = serde_json::to_value(bulb_spectrum_chart(&PlotConfig::default())).unwrap();
        assert_eq!(json["x_axis"]["side"], "bottom");
        assert!(json["paths"][0]["points"].as_array().unwrap().len() == 100);
        assert_eq!(json["paths"][0]["curve"], "basis");
    }

    #[test]
    fn stroke_and_curve_follow_config() {
        let mut config = PlotConfig::default();
        config.chart.stroke = "#3366cc".to_string();
        config.chart.curve = CurveKind::Linear;

        let json = serde_json::to_value(bulb_spectrum_chart(&config)).unwrap();
        assert_eq!(json["paths"][0]["stroke"], "#3366cc");
        assert_eq!(json["paths"][0]["curve"], "linear");

        let s = SpectralSeries::from_pairs(&[(400.0, 0.2), (500.0, 0.8)]).unwrap();
        let json = serde_json::to_value(table_chart(&[("v", s)], &config)).unwrap();
        assert_eq!(json["paths"][0]["curve"], "linear");
    }
}
