use log::debug;
use serde::Serialize;

use crate::data::model::{Chromaticity2D, ColorMatchingFunctions, GamutTriangle, Tristimulus};
use crate::data::ops::align3;

/// `(a, b) / (a + b + c)`. Both coordinates are NaN for a zero stimulus.
pub fn to_chromaticity(t: Tristimulus) -> Chromaticity2D {
    let [a, b, _] = t.0;
    let sum = t.sum();
    Chromaticity2D::new(a / sum, b / sum)
}

/// Whether `p` lies inside `tri` or on its boundary. Undefined points are never inside.
pub fn point_in_triangle(p: Chromaticity2D, tri: &GamutTriangle) -> bool {
    if !p.is_defined() {
        return false;
    }
    fn side(p: Chromaticity2D, a: Chromaticity2D, b: Chromaticity2D) -> f64 {
        (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
    }
    let d1 = side(p, tri.r, tri.g);
    let d2 = side(p, tri.g, tri.b);
    let d3 = side(p, tri.b, tri.r);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

impl GamutTriangle {
    /// ITU-R BT.709 / sRGB primaries.
    pub const SRGB: Self = Self::from_xy([0.64, 0.33], [0.30, 0.60], [0.15, 0.06]);
    pub const ADOBE_RGB: Self = Self::from_xy([0.64, 0.33], [0.21, 0.71], [0.15, 0.06]);
    pub const DCI_P3: Self = Self::from_xy([0.680, 0.320], [0.265, 0.690], [0.150, 0.060]);
    /// CIE 1931 RGB monochromatic primaries.
    pub const CIE_RGB: Self =
        Self::from_xy([0.73467, 0.26533], [0.27376, 0.71741], [0.16658, 0.00886]);

    pub const fn from_xy(r: [f64; 2], g: [f64; 2], b: [f64; 2]) -> Self {
        Self {
            r: Chromaticity2D::new(r[0], r[1]),
            g: Chromaticity2D::new(g[0], g[1]),
            b: Chromaticity2D::new(b[0], b[1]),
        }
    }

    pub fn contains(&self, p: Chromaticity2D) -> bool {
        point_in_triangle(p, self)
    }

    /// Closed outline `r, g, b, r` for drawing.
    pub fn outline(&self) -> [[f64; 2]; 4] {
        [self.r, self.g, self.b, self.r].map(|c| [c.x, c.y])
    }
}

/// One point of the horseshoe-shaped locus of monochromatic light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocusPoint {
    pub wavelength: f64,
    pub chromaticity: Chromaticity2D,
}

/// Chromaticity of every CMF sample shared by x̄, ȳ and z̄.
///
/// Samples where all three functions are zero have no chromaticity and are
/// dropped here rather than passed on as NaN.
pub fn spectral_locus(cmf: &ColorMatchingFunctions) -> Vec<LocusPoint> {
    let rows = align3(&cmf.x_bar, &cmf.y_bar, &cmf.z_bar);
    let mut points = Vec::with_capacity(rows.len());
    let mut dropped = 0;
    for (wavelength, xyz) in rows {
        let chromaticity = to_chromaticity(Tristimulus(xyz));
        if chromaticity.is_defined() {
            points.push(LocusPoint { wavelength, chromaticity });
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!("spectral_locus: dropped {dropped} samples with no chromaticity");
    }
    points
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::model::SpectralSeries;

    #[test]
    fn zero_stimulus_is_undefined() {
        let c = to_chromaticity(Tristimulus::new(0.0, 0.0, 0.0));
        assert!(c.x.is_nan());
        assert!(c.y.is_nan());
    }

    #[test]
    fn equal_energy_is_one_third() {
        let c = to_chromaticity(Tristimulus::new(1.0, 1.0, 1.0));
        assert_abs_diff_eq!(c.x, 1.0 / 3.0);
        assert_abs_diff_eq!(c.y, 1.0 / 3.0);
    }

    #[test]
    fn d65_white_is_inside_srgb() {
        let white = to_chromaticity(Tristimulus::new(0.9505, 1.0, 1.089));
        assert_abs_diff_eq!(white.x, 0.3127, epsilon = 1e-3);
        assert!(GamutTriangle::SRGB.contains(white));
        assert!(GamutTriangle::DCI_P3.contains(white));
    }

    #[test]
    fn vertices_and_outside_points() {
        let srgb = GamutTriangle::SRGB;
        assert!(srgb.contains(srgb.r));
        assert!(srgb.contains(Chromaticity2D::new(0.3, 0.3)));
        // Saturated green, inside Adobe RGB but outside sRGB.
        let green = Chromaticity2D::new(0.22, 0.68);
        assert!(!srgb.contains(green));
        assert!(GamutTriangle::ADOBE_RGB.contains(green));
        assert!(!srgb.contains(Chromaticity2D::new(0.9, 0.9)));
        assert!(!srgb.contains(Chromaticity2D::new(f64::NAN, f64::NAN)));
    }

    #[test]
    fn winding_order_does_not_matter() {
        let t = GamutTriangle::SRGB;
        let reversed = GamutTriangle { r: t.b, g: t.g, b: t.r };
        let p = Chromaticity2D::new(0.3, 0.3);
        assert_eq!(point_in_triangle(p, &t), point_in_triangle(p, &reversed));
    }

    #[test]
    fn locus_skips_dark_samples() {
        let cmf = ColorMatchingFunctions {
            x_bar: SpectralSeries::from_pairs(&[(380.0, 0.0), (450.0, 0.3362), (550.0, 0.4334)]).unwrap(),
            y_bar: SpectralSeries::from_pairs(&[(380.0, 0.0), (450.0, 0.038), (550.0, 0.995)]).unwrap(),
            z_bar: SpectralSeries::from_pairs(&[(380.0, 0.0), (450.0, 1.7721), (550.0, 0.0087)]).unwrap(),
        };
        let locus = spectral_locus(&cmf);
        assert_eq!(locus.len(), 2);
        assert_eq!(locus[0].wavelength, 450.0);
        assert!(!GamutTriangle::SRGB.contains(locus[1].chromaticity));
    }

    #[test]
    fn locus_pairs_functions_by_wavelength() {
        let cmf = ColorMatchingFunctions {
            x_bar: SpectralSeries::from_pairs(&[(400.0, 0.0143), (450.0, 0.3362), (550.0, 0.4334)]).unwrap(),
            y_bar: SpectralSeries::from_pairs(&[(450.0, 0.038), (550.0, 0.995)]).unwrap(),
            z_bar: SpectralSeries::from_pairs(&[(450.0, 1.7721), (550.0, 0.0087)]).unwrap(),
        };
        let locus = spectral_locus(&cmf);
        assert_eq!(locus.len(), 2);
        assert_eq!(locus[0].wavelength, 450.0);
        assert_abs_diff_eq!(locus[0].chromaticity.x, 0.3362 / (0.3362 + 0.038 + 1.7721), epsilon = 1e-12);
        assert_eq!(locus[1].wavelength, 550.0);
    }
}
