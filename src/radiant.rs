//! Thermal emitters: Planck's law and a small filament-bulb model.
//!
//! All wavelengths here are in meters.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Planck constant, J·s.
pub const PLANCK: f64 = 6.626e-34;
/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.38e-23;
/// Speed of light, m/s.
pub const SPEED_OF_LIGHT: f64 = 3e8;
/// Wien's displacement constant, m·K.
pub const WIEN: f64 = 2.898e-3;

/// Spectral radiance of a black body, W·sr⁻¹·m⁻³.
///
/// Diverges as the wavelength approaches zero and is undefined at zero.
pub fn planck_radiance(wavelength: f64, temperature: f64) -> f64 {
    let h = PLANCK;
    let c = SPEED_OF_LIGHT;
    let k = BOLTZMANN;
    (2.0 * h * c * c) / wavelength.powi(5) / ((h * c / (wavelength * k * temperature)).exp() - 1.0)
}

/// `planck_radiance` scaled by solid angle, emitting area and efficiency.
pub fn bulb_emission(
    wavelength: f64,
    temperature: f64,
    solid_angle: f64,
    surface_area: f64,
    efficiency: f64,
) -> f64 {
    solid_angle * surface_area * efficiency * planck_radiance(wavelength, temperature)
}

/// Wavelength of peak radiance at `temperature`.
pub fn wien_peak(temperature: f64) -> f64 {
    WIEN / temperature
}

// ---------------------------------------------------------------------------
// BulbModel – the parameter record for bulb_emission
// ---------------------------------------------------------------------------

/// A small-area thermal emitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulbModel {
    /// Filament temperature, K.
    pub temperature: f64,
    /// Solid angle the filament radiates into, sr.
    pub solid_angle: f64,
    /// Emitting surface area, m².
    pub surface_area: f64,
    /// Fraction of the ideal black-body output actually emitted.
    pub efficiency: f64,
}

impl Default for BulbModel {
    /// A 100 W incandescent filament radiating in every direction.
    fn default() -> Self {
        Self {
            temperature: 3000.0,
            solid_angle: 4.0 * PI,
            surface_area: (100.0 / 60.0) * 0.81 * 4e-6,
            efficiency: 0.8,
        }
    }
}

impl BulbModel {
    pub fn with_temperature(self, temperature: f64) -> Self {
        Self { temperature, ..self }
    }

    /// Spectral power at `wavelength` (meters).
    pub fn emission(&self, wavelength: f64) -> f64 {
        bulb_emission(
            wavelength,
            self.temperature,
            self.solid_angle,
            self.surface_area,
            self.efficiency,
        )
    }
}
