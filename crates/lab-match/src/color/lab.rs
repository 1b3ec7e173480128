//! CIE L*a*b* color space
//!
//! Lab is the perceptual space every catalog entry is stored in and every
//! query is converted to before ranking.
//!
//! The conversion uses the sRGB primaries with a D65 reference white
//! (2° observer). Matrix and white point carry six significant digits
//! so that coordinates computed here agree with catalogs built by common
//! image-processing toolkits.

use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;

/// Linear sRGB to CIE XYZ (D65)
const XYZ_FROM_RGB: [[f64; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// D65 reference white, 2° observer
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Below this the cube-root branch of `f` is replaced by its linear segment
const EPSILON: f64 = 0.008856;

/// A color in CIE L*a*b* space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 100.0 = white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// ```
    /// use lab_match::Lab;
    ///
    /// let gray = Lab::new(50.0, 0.0, 0.0);
    /// assert_eq!(gray.chroma(), 0.0);
    /// ```
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma magnitude `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Returns true if all three components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// Components as an `[l, a, b]` array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

impl From<[f64; 3]> for Lab {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[inline]
fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

impl From<LinearRgb> for Lab {
    /// Convert linear sRGB to Lab via CIE XYZ.
    fn from(rgb: LinearRgb) -> Self {
        let c = [rgb.r, rgb.g, rgb.b];
        let xyz: [f64; 3] = std::array::from_fn(|row| {
            let m = XYZ_FROM_RGB[row];
            m[0] * c[0] + m[1] * c[1] + m[2] * c[2]
        });

        let fx = f(xyz[0] / WHITE_D65[0]);
        let fy = f(xyz[1] / WHITE_D65[1]);
        let fz = f(xyz[2] / WHITE_D65[2]);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Srgb> for Lab {
    /// Convert an 8-bit sRGB color to Lab (gamma decode, then XYZ, then Lab).
    ///
    /// ```
    /// use lab_match::{Lab, Srgb};
    ///
    /// let red = Lab::from(Srgb::new(255, 0, 0));
    /// assert!((red.l - 53.24).abs() < 0.01);
    /// ```
    fn from(srgb: Srgb) -> Self {
        Lab::from(LinearRgb::from(srgb))
    }
}
