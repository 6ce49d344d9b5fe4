use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chart::CurveKind;
use crate::radiant::BulbModel;
use crate::sampler::{SampleRange, DEFAULT_SAMPLE_COUNT};

// ---------------------------------------------------------------------------
// Drawing surface
// ---------------------------------------------------------------------------

/// Size of the drawing surface and where the plot area sits inside it, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    /// Left and right edge of the plot area.
    pub x_range: [f64; 2],
    /// Bottom and top edge of the plot area (y grows downwards).
    pub y_range: [f64; 2],
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Colour of single-curve charts such as the bulb spectrum, `#rrggbb`.
    pub stroke: String,
    pub stroke_width: f64,
    /// Interpolation the renderer should draw between path points.
    pub curve: CurveKind,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 400.0,
            x_range: [50.0, 650.0],
            y_range: [350.0, 50.0],
            x_ticks: 10,
            y_ticks: 5,
            stroke: "#ff0000".to_string(),
            stroke_width: 1.0,
            curve: CurveKind::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotConfig – everything the binary can be told
// ---------------------------------------------------------------------------

/// Settings for the chart and swatch documents. Every field is optional in the
/// JSON file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub chart: ChartConfig,
    pub bulb: BulbModel,
    /// Points per sampled curve.
    pub sample_count: usize,
    /// Wavelength span of the bulb chart, meters.
    pub bulb_domain: SampleRange,
    /// Top of the bulb chart's radiance axis.
    pub radiance_max: f64,
    /// Wavelength span of tabulated-curve charts, nanometers.
    pub curve_domain: [f64; 2],
    /// Band used for cone stimulus averages, nanometers.
    pub cone_band: [f64; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            bulb: BulbModel::default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            bulb_domain: SampleRange::new(380e-9, 750e-9),
            radiance_max: 6e7,
            curve_domain: [380.0, 750.0],
            cone_band: [380.0, 750.0],
        }
    }
}

impl PlotConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PlotConfig = serde_json::from_str(&text).context("parsing config JSON")?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
