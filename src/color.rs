use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Tristimulus;

// ---------------------------------------------------------------------------
// sRGB companding
// ---------------------------------------------------------------------------

/// Linear light → sRGB-encoded value.
///
/// No clamping: negative input takes the linear segment, and values above 1
/// encode above 1. Clamp first with [`clamp`] when the result must be displayable.
pub fn linear_to_encoded(c: f64) -> f64 {
    if c < 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB-encoded value → linear light.
pub fn encoded_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `v` bounded to `[lo, hi]`. NaN comes out as `lo`.
pub fn clamp(lo: f64, hi: f64, v: f64) -> f64 {
    v.max(lo).min(hi)
}

// ---------------------------------------------------------------------------
// XYZ → RGB
// ---------------------------------------------------------------------------

/// XYZ → linear sRGB (D65).
const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];

/// XYZ → CIE 1931 RGB primaries (700 nm, 546.1 nm, 435.8 nm).
const XYZ_TO_CIE_RGB: [[f64; 3]; 3] = [
    [2.3706743, -0.9000405, -0.4706338],
    [-0.5138850, 1.4253036, 0.0885814],
    [0.0052982, -0.0146949, 1.0093968],
];

fn mul(m: &[[f64; 3]; 3], xyz: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * xyz[0] + row[1] * xyz[1] + row[2] * xyz[2])
}

/// XYZ → encoded sRGB with channels in `[0, 255]`.
///
/// Each channel is clipped to `[0, 1]` on its own before companding; out-of-gamut
/// colours are not gamut-mapped, so their hue can shift.
pub fn xyz_to_srgb(x: f64, y: f64, z: f64) -> Tristimulus {
    let linear = mul(&XYZ_TO_LINEAR_SRGB, [x, y, z]);
    Tristimulus(linear.map(|c| 255.0 * linear_to_encoded(clamp(0.0, 1.0, c))))
}

/// [`xyz_to_srgb`] rounded to 8-bit channels. NaN channels become 0.
pub fn xyz_to_srgb8(x: f64, y: f64, z: f64) -> Srgb<u8> {
    let [r, g, b] = xyz_to_srgb(x, y, z).0.map(|c| c.round() as u8);
    Srgb::new(r, g, b)
}

/// XYZ → linear CIE RGB, unclamped and uncompanded.
pub fn xyz_to_cie_rgb(x: f64, y: f64, z: f64) -> Tristimulus {
    Tristimulus(mul(&XYZ_TO_CIE_RGB, [x, y, z]))
}

/// CSS-style `#rrggbb`.
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Stroke palette
// ---------------------------------------------------------------------------

/// `n` visually distinct stroke colours using evenly spaced hues, starting at red.
pub fn series_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 1.0, 0.5);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use palette::LinSrgb;

    use super::*;

    #[test]
    fn companding_round_trips() {
        for i in 0..=100 {
            let c = i as f64 / 100.0;
            assert_abs_diff_eq!(linear_to_encoded(encoded_to_linear(c)), c, epsilon = 1e-6);
            assert_abs_diff_eq!(encoded_to_linear(linear_to_encoded(c)), c, epsilon = 1e-6);
        }
    }

    #[test]
    fn decoding_is_continuous_at_threshold() {
        let below = encoded_to_linear(0.04045);
        let above = encoded_to_linear(0.04046);
        assert!((above - below).abs() < 1e-4);
        assert!(above > below);
    }

    #[test]
    fn companding_matches_palette() {
        for c in [0.001, 0.01, 0.2, 0.5, 0.9] {
            let encoded: Srgb<f64> = Srgb::from_linear(LinSrgb::new(c, c, c));
            assert_abs_diff_eq!(linear_to_encoded(c), encoded.red, epsilon = 1e-4);
        }
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(0.0, 1.0, -0.5), 0.0);
        assert_eq!(clamp(0.0, 1.0, 1.5), 1.0);
        assert_eq!(clamp(0.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn white_point_is_white() {
        let [r, g, b] = xyz_to_srgb(0.9505, 1.0, 1.089).0;
        for c in [r, g, b] {
            assert_abs_diff_eq!(c, 255.0, epsilon = 0.5);
        }
        assert_eq!(xyz_to_srgb8(0.9505, 1.0, 1.089), Srgb::new(255, 255, 255));
    }

    #[test]
    fn out_of_gamut_channels_are_clipped() {
        // Pure Z: red goes negative, blue above 1.
        let [r, _, b] = xyz_to_srgb(0.0, 0.0, 2.0).0;
        assert_eq!(r, 0.0);
        assert_eq!(b, 255.0);
        assert_eq!(xyz_to_srgb(0.0, 0.0, 0.0).0, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn cie_rgb_is_raw_linear() {
        let [r, g, b] = xyz_to_cie_rgb(1.0, 0.0, 0.0).0;
        assert_abs_diff_eq!(r, 2.3706743);
        assert_abs_diff_eq!(g, -0.5138850);
        assert_abs_diff_eq!(b, 0.0052982);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(Srgb::new(255, 0, 16)), "#ff0010");
    }

    #[test]
    fn palette_starts_red_and_is_distinct() {
        let colors = series_palette(3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], Srgb::new(255, 0, 0));
        assert_ne!(colors[1], colors[2]);
        assert!(series_palette(0).is_empty());
    }
}
