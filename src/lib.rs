//! Colour-science helpers for plotting spectral data.
//!
//! Wavelength tables (blackbody radiation, luminous efficiency, CIE
//! colour-matching functions, cone sensitivities) are loaded into
//! [`SpectralSeries`], combined with a merge join, converted to display
//! colours or chromaticities, and finally projected into pixel-space
//! [`chart::Chart`] documents or [`swatch`] gradients for an external renderer.
//!
//! Every numeric function is pure; the only I/O lives in [`data::loader`] and
//! [`config`].

pub mod chart;
pub mod chromaticity;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod radiant;
pub mod sampler;
pub mod scale;
pub mod stimulus;
pub mod swatch;

pub use data::model::{
    Chromaticity2D, ColorMatchingFunctions, ConeFundamentals, GamutTriangle, SpectralSample,
    SpectralSeries, SpectralTable, Tristimulus,
};
pub use error::{Result, SpectralError};
