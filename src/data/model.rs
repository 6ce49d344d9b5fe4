use std::fmt;

use serde::Serialize;

use crate::error::{Result, SpectralError};

// ---------------------------------------------------------------------------
// SpectralSample / SpectralSeries – wavelength-keyed values
// ---------------------------------------------------------------------------

/// One value of a physical quantity at one wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralSample {
    pub wavelength: f64,
    pub value: f64,
}

impl SpectralSample {
    pub fn new(wavelength: f64, value: f64) -> Self {
        Self { wavelength, value }
    }
}

/// Samples ordered by strictly increasing wavelength.
///
/// The ordering is checked once on construction; every operation that walks a
/// series (notably the merge join in [`crate::data::ops::align_multiply`]) relies
/// on it and never re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpectralSeries {
    samples: Vec<SpectralSample>,
}

impl SpectralSeries {
    /// Build a series, failing fast on unsorted or duplicate wavelengths.
    /// Values may be NaN; only the wavelength key is validated.
    pub fn new(samples: Vec<SpectralSample>) -> Result<Self> {
        for (index, s) in samples.iter().enumerate() {
            if !s.wavelength.is_finite() {
                return Err(SpectralError::NonFiniteWavelength { index });
            }
            if index > 0 {
                let previous = samples[index - 1].wavelength;
                if s.wavelength <= previous {
                    return Err(SpectralError::NotIncreasing {
                        index,
                        previous,
                        current: s.wavelength,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    /// Convenience constructor from `(wavelength, value)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(wavelength, value)| SpectralSample::new(wavelength, value))
                .collect(),
        )
    }

    /// Caller guarantees strictly increasing wavelengths (sub-sequences of a
    /// valid series, or grids generated in ascending order).
    pub(crate) fn from_sorted(samples: Vec<SpectralSample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].wavelength < w[1].wavelength));
        Self { samples }
    }

    pub fn samples(&self) -> &[SpectralSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpectralSample> {
        self.samples.iter()
    }

    pub fn wavelengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.wavelength)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// Same wavelength grid, every value passed through `f`.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_sorted(
            self.samples
                .iter()
                .map(|s| SpectralSample::new(s.wavelength, f(s.value)))
                .collect(),
        )
    }

    /// `(wavelength, value)` pairs for handing to a plotting layer.
    pub fn to_points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.wavelength, s.value]).collect()
    }
}

impl<'a> IntoIterator for &'a SpectralSeries {
    type Item = &'a SpectralSample;
    type IntoIter = std::slice::Iter<'a, SpectralSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Tristimulus / Chromaticity2D / GamutTriangle
// ---------------------------------------------------------------------------

/// A colour stimulus as three components: XYZ, RGB, or LMS depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tristimulus(pub [f64; 3]);

impl Tristimulus {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self([a, b, c])
    }

    pub fn components(&self) -> [f64; 3] {
        self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl fmt::Display for Tristimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({a:.4}, {b:.4}, {c:.4})")
    }
}

/// Normalised 2D chromaticity coordinates. NaN when derived from a zero stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chromaticity2D {
    pub x: f64,
    pub y: f64,
}

impl Chromaticity2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// False for the NaN coordinates a zero stimulus produces.
    pub fn is_defined(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The three primaries of a display gamut in chromaticity space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GamutTriangle {
    pub r: Chromaticity2D,
    pub g: Chromaticity2D,
    pub b: Chromaticity2D,
}

// ---------------------------------------------------------------------------
// SpectralTable – a loaded wavelength table
// ---------------------------------------------------------------------------

/// One named numeric column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Rows of numeric fields keyed by the first column (wavelength).
///
/// Wavelength units are whatever the source file uses; nothing is converted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralTable {
    pub wavelengths: Vec<f64>,
    pub columns: Vec<TableColumn>,
}

impl SpectralTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The named column paired with the wavelength key.
    pub fn series(&self, name: &str) -> Result<SpectralSeries> {
        let column = self
            .columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SpectralError::MissingColumn(name.to_string()))?;
        self.pair_with_wavelengths(&column.values)
    }

    /// Value column by position (0 is the first column after the wavelength).
    pub fn series_at(&self, index: usize) -> Result<SpectralSeries> {
        let column = self.columns.get(index).ok_or(SpectralError::TooFewColumns {
            needed: index + 1,
            found: self.columns.len(),
        })?;
        self.pair_with_wavelengths(&column.values)
    }

    fn pair_with_wavelengths(&self, values: &[f64]) -> Result<SpectralSeries> {
        SpectralSeries::new(
            self.wavelengths
                .iter()
                .zip(values)
                .map(|(&wavelength, &value)| SpectralSample::new(wavelength, value))
                .collect(),
        )
    }

    fn first_three(&self) -> Result<[SpectralSeries; 3]> {
        if self.columns.len() < 3 {
            return Err(SpectralError::TooFewColumns {
                needed: 3,
                found: self.columns.len(),
            });
        }
        Ok([self.series_at(0)?, self.series_at(1)?, self.series_at(2)?])
    }
}

/// CIE colour-matching functions x̄, ȳ, z̄ on one wavelength grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatchingFunctions {
    pub x_bar: SpectralSeries,
    pub y_bar: SpectralSeries,
    pub z_bar: SpectralSeries,
}

impl ColorMatchingFunctions {
    /// Uses the first three value columns, in x̄, ȳ, z̄ order.
    pub fn from_table(table: &SpectralTable) -> Result<Self> {
        let [x_bar, y_bar, z_bar] = table.first_three()?;
        Ok(Self { x_bar, y_bar, z_bar })
    }
}

/// Long, medium and short cone sensitivities.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeFundamentals {
    pub l: SpectralSeries,
    pub m: SpectralSeries,
    pub s: SpectralSeries,
}

impl ConeFundamentals {
    /// Uses the first three value columns, in L, M, S order.
    pub fn from_table(table: &SpectralTable) -> Result<Self> {
        let [l, m, s] = table.first_three()?;
        Ok(Self { l, m, s })
    }
}
