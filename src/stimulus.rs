//! What an eye or a standard observer makes of a spectrum.

use crate::data::model::{
    ColorMatchingFunctions, ConeFundamentals, SpectralSample, SpectralSeries, Tristimulus,
};
use crate::data::ops::{align_multiply, average, sum};
use crate::error::{Result, SpectralError};
use crate::radiant::planck_radiance;

/// Meters per nanometer.
const NM: f64 = 1e-9;

/// Black-body radiance at every wavelength of `grid`, which is in nanometers.
///
/// The result keeps the grid's wavelengths exactly so it joins cleanly with
/// the tabulated curve the grid came from.
pub fn blackbody_spectrum(grid: &SpectralSeries, temperature: f64) -> SpectralSeries {
    SpectralSeries::from_sorted(
        grid.wavelengths()
            .map(|nm| SpectralSample::new(nm, planck_radiance(nm * NM, temperature)))
            .collect(),
    )
}

/// CIE XYZ of a spectral power distribution, scaled so that Y = 1.
///
/// Only wavelengths present in both the SPD and the CMF table contribute.
pub fn spectrum_to_xyz(spd: &SpectralSeries, cmf: &ColorMatchingFunctions) -> Result<Tristimulus> {
    let x = sum(&align_multiply(spd, &cmf.x_bar));
    let y = sum(&align_multiply(spd, &cmf.y_bar));
    let z = sum(&align_multiply(spd, &cmf.z_bar));
    if y == 0.0 || y.is_nan() {
        return Err(SpectralError::ZeroSum);
    }
    Ok(Tristimulus::new(x / y, 1.0, z / y))
}

/// Mean L, M and S cone stimulation by `spd` over `[lo, hi]`.
///
/// Uses [`average`], so wavelengths where a cone curve has no data still count
/// towards the band size.
pub fn cone_response(
    spd: &SpectralSeries,
    cones: &ConeFundamentals,
    lo: f64,
    hi: f64,
) -> Result<Tristimulus> {
    let l = average(&align_multiply(spd, &cones.l), lo, hi)?;
    let m = average(&align_multiply(spd, &cones.m), lo, hi)?;
    let s = average(&align_multiply(spd, &cones.s), lo, hi)?;
    Ok(Tristimulus::new(l, m, s))
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn flat(pairs: &[(f64, f64)]) -> SpectralSeries {
        SpectralSeries::from_pairs(pairs).unwrap()
    }

    fn cmf() -> ColorMatchingFunctions {
        ColorMatchingFunctions {
            x_bar: flat(&[(450.0, 0.3362), (550.0, 0.4334), (650.0, 0.2835)]),
            y_bar: flat(&[(450.0, 0.0380), (550.0, 0.9950), (650.0, 0.1070)]),
            z_bar: flat(&[(450.0, 1.7721), (550.0, 0.0087), (650.0, 0.0000)]),
        }
    }

    #[test]
    fn blackbody_on_nanometer_grid() {
        let grid = flat(&[(500.0, 0.0), (600.0, 0.0)]);
        let bb = blackbody_spectrum(&grid, 3000.0);
        assert_eq!(bb.wavelengths().collect::<Vec<_>>(), vec![500.0, 600.0]);
        assert_relative_eq!(bb.samples()[0].value, planck_radiance(500e-9, 3000.0), max_relative = 1e-12);
        // Below the Wien peak radiance still rises with wavelength.
        assert!(bb.samples()[1].value > bb.samples()[0].value);
    }

    #[test]
    fn xyz_is_normalised_to_unit_luminance() {
        let spd = flat(&[(450.0, 1.0), (550.0, 1.0), (650.0, 1.0)]);
        let xyz = spectrum_to_xyz(&spd, &cmf()).unwrap();
        assert_abs_diff_eq!(xyz.0[1], 1.0);
        assert_abs_diff_eq!(xyz.0[0], (0.3362 + 0.4334 + 0.2835) / (0.038 + 0.995 + 0.107), epsilon = 1e-12);
    }

    #[test]
    fn warm_source_is_redder_than_blue_content() {
        let spd = flat(&[(450.0, 1.0), (550.0, 1.0), (650.0, 1.0)]);
        let grid = flat(&[(450.0, 0.0), (550.0, 0.0), (650.0, 0.0)]);
        let warm = spectrum_to_xyz(&blackbody_spectrum(&grid, 2700.0), &cmf()).unwrap();
        let flat_xyz = spectrum_to_xyz(&spd, &cmf()).unwrap();
        assert!(warm.0[2] < flat_xyz.0[2]);
    }

    #[test]
    fn disjoint_grids_have_no_luminance() {
        let spd = flat(&[(451.0, 1.0)]);
        assert_eq!(spectrum_to_xyz(&spd, &cmf()), Err(SpectralError::ZeroSum));
    }

    #[test]
    fn cone_band_average() {
        let cones = ConeFundamentals {
            l: flat(&[(500.0, 0.5), (600.0, 1.0)]),
            m: flat(&[(500.0, 1.0), (600.0, f64::NAN)]),
            s: flat(&[(500.0, 0.1), (600.0, 0.0)]),
        };
        let spd = flat(&[(500.0, 2.0), (600.0, 2.0)]);
        let lms = cone_response(&spd, &cones, 400.0, 700.0).unwrap();
        assert_abs_diff_eq!(lms.0[0], 1.5);
        // NaN at 600 nm still counts towards the denominator.
        assert_abs_diff_eq!(lms.0[1], 1.0);
        assert_abs_diff_eq!(lms.0[2], 0.1);
        assert!(cone_response(&spd, &cones, 800.0, 900.0).is_err());
    }
}
