use palette::Srgb;
use serde::{Serialize, Serializer};

use crate::color::{to_hex, xyz_to_srgb8};
use crate::data::model::{ColorMatchingFunctions, SpectralSeries};
use crate::data::ops::align3;
use crate::error::Result;
use crate::stimulus::spectrum_to_xyz;

/// One colour stop of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient, 0 at the shortest wavelength and 1 at the longest.
    pub offset: f64,
    pub wavelength: f64,
    #[serde(serialize_with = "serialize_hex")]
    pub color: Srgb<u8>,
}

fn serialize_hex<S: Serializer>(c: &Srgb<u8>, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&to_hex(*c))
}

/// The rainbow: each CMF sample rendered as its own sRGB colour.
///
/// Saturated spectral colours lie outside sRGB and come out clipped per
/// channel. Only wavelengths present in all three functions produce stops.
pub fn spectral_gradient(cmf: &ColorMatchingFunctions) -> Vec<GradientStop> {
    let rows = align3(&cmf.x_bar, &cmf.y_bar, &cmf.z_bar);

    let (first, last) = match (rows.first(), rows.last()) {
        (Some(f), Some(l)) => (f.0, l.0),
        _ => return Vec::new(),
    };
    let span = last - first;

    rows.into_iter()
        .map(|(wavelength, [x, y, z])| GradientStop {
            offset: if span > 0.0 { (wavelength - first) / span } else { 0.0 },
            wavelength,
            color: xyz_to_srgb8(x, y, z),
        })
        .collect()
}

/// Display colour of a light source, at unit luminance.
pub fn source_swatch(spd: &SpectralSeries, cmf: &ColorMatchingFunctions) -> Result<Srgb<u8>> {
    let [x, y, z] = spectrum_to_xyz(spd, cmf)?.0;
    Ok(xyz_to_srgb8(x, y, z))
}
