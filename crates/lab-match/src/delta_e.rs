//! Color-difference formulas over CIE Lab.
//!
//! [`DeltaE::Ciede2000`] is the default metric for ranking catalog entries.
//! [`DeltaE::Cie76`] (plain Euclidean distance) is kept for comparison and
//! for catalogs tuned against it.

use crate::color::Lab;

/// 25^7, the chroma pivot of the CIEDE2000 G and R_C terms
const POW25_7: f64 = 6_103_515_625.0;

/// Color-difference metric used to rank catalog entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaE {
    /// CIE 1976: Euclidean distance in Lab.
    Cie76,

    /// CIEDE2000 (CIE 142-2001) with parametric weights.
    ///
    /// The reference conditions are `kl = kc = kh = 1.0`, which is what
    /// [`DeltaE::default()`] returns.
    Ciede2000 {
        /// Lightness weight
        kl: f64,
        /// Chroma weight
        kc: f64,
        /// Hue weight
        kh: f64,
    },
}

impl Default for DeltaE {
    fn default() -> Self {
        DeltaE::Ciede2000 {
            kl: 1.0,
            kc: 1.0,
            kh: 1.0,
        }
    }
}

impl DeltaE {
    /// Distance between two Lab colors under this metric.
    ///
    /// Always non-negative, zero for identical inputs and symmetric in its
    /// arguments.
    ///
    /// ```
    /// use lab_match::{DeltaE, Lab};
    ///
    /// let a = Lab::new(50.0, 0.0, 0.0);
    /// let b = Lab::new(50.0, -1.0, 2.0);
    /// let d = DeltaE::default().distance(a, b);
    /// assert!((d - 2.3669).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn distance(self, a: Lab, b: Lab) -> f64 {
        match self {
            DeltaE::Cie76 => cie76(a, b),
            DeltaE::Ciede2000 { kl, kc, kh } => ciede2000(a, b, kl, kc, kh),
        }
    }

    /// Short lowercase name of the metric.
    pub fn name(self) -> &'static str {
        match self {
            DeltaE::Cie76 => "cie76",
            DeltaE::Ciede2000 { .. } => "ciede2000",
        }
    }
}

/// CIE76 color difference (Euclidean distance in Lab).
#[inline]
pub fn cie76(a: Lab, b: Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Hue angle in degrees, normalized to 0..360.
#[inline]
fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        0.0
    } else {
        b.atan2(a_prime).to_degrees().rem_euclid(360.0)
    }
}

/// CIEDE2000 color difference.
///
/// Follows Sharma, Wu & Dalal, "The CIEDE2000 Color-Difference Formula:
/// Implementation Notes, Supplementary Test Data, and Mathematical
/// Observations" (2005), including the hue handling for achromatic inputs.
pub fn ciede2000(lab1: Lab, lab2: Lab, kl: f64, kc: f64, kh: f64) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let avg_c = 0.5 * (a1.hypot(b1) + a2.hypot(b2));
    let avg_c7 = avg_c.powi(7);
    let g = 0.5 * (1.0 - (avg_c7 / (avg_c7 + POW25_7)).sqrt());

    let a1_prime = (1.0 + g) * a1;
    let a2_prime = (1.0 + g) * a2;
    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);
    let h1_prime = hue_degrees(b1, a1_prime);
    let h2_prime = hue_degrees(b2, a2_prime);

    let delta_l = l2 - l1;
    let delta_c = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let h_diff = h2_prime - h1_prime;
    let delta_h_angle = if chroma_product == 0.0 {
        0.0
    } else if h_diff.abs() <= 180.0 {
        h_diff
    } else if h_diff > 180.0 {
        h_diff - 360.0
    } else {
        h_diff + 360.0
    };
    let delta_h = 2.0 * chroma_product.sqrt() * (0.5 * delta_h_angle).to_radians().sin();

    let avg_l = 0.5 * (l1 + l2);
    let avg_c_prime = 0.5 * (c1_prime + c2_prime);
    let h_sum = h1_prime + h2_prime;
    let avg_h = if chroma_product == 0.0 {
        h_sum
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        0.5 * h_sum
    } else if h_sum < 360.0 {
        0.5 * (h_sum + 360.0)
    } else {
        0.5 * (h_sum - 360.0)
    };

    let t = 1.0 - 0.17 * (avg_h - 30.0).to_radians().cos()
        + 0.24 * (2.0 * avg_h).to_radians().cos()
        + 0.32 * (3.0 * avg_h + 6.0).to_radians().cos()
        - 0.20 * (4.0 * avg_h - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((avg_h - 275.0) / 25.0).powi(2)).exp();
    let avg_c_prime7 = avg_c_prime.powi(7);
    let r_c = 2.0 * (avg_c_prime7 / (avg_c_prime7 + POW25_7)).sqrt();
    let l_offset = (avg_l - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let s_c = 1.0 + 0.045 * avg_c_prime;
    let s_h = 1.0 + 0.015 * avg_c_prime * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_l / (kl * s_l);
    let dc = delta_c / (kc * s_c);
    let dh = delta_h / (kh * s_h);

    // Rounding can push the sum a hair below zero for near-identical inputs
    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference pairs from Sharma, Wu & Dalal (2005), Table 1.
    const SHARMA_PAIRS: &[([f64; 3], [f64; 3], f64)] = &[
        ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
        ([50.0, 3.1571, -77.2803], [50.0, 0.0, -82.7485], 2.8615),
        ([50.0, 2.8361, -74.0200], [50.0, 0.0, -82.7485], 3.4412),
        ([50.0, 0.0, 0.0], [50.0, -1.0, 2.0], 2.3669),
        ([50.0, 2.5, 0.0], [73.0, 25.0, -18.0], 27.1492),
        ([50.0, 2.49, -0.001], [50.0, -2.49, 0.0009], 7.1792),
        ([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387], 1.2644),
        ([22.7233, 20.0904, -46.6940], [23.0331, 14.9730, -42.5619], 2.0373),
    ];

    #[test]
    fn test_ciede2000_reference_pairs() {
        let metric = DeltaE::default();
        for (a, b, expected) in SHARMA_PAIRS {
            let d = metric.distance(Lab::from(*a), Lab::from(*b));
            assert!(
                (d - expected).abs() < 1e-4,
                "ΔE00({a:?}, {b:?}) expected {expected}, got {d}"
            );
        }
    }

    #[test]
    fn test_identity_is_zero() {
        let metric = DeltaE::default();
        for (a, b, _) in SHARMA_PAIRS {
            assert_eq!(metric.distance(Lab::from(*a), Lab::from(*a)), 0.0);
            assert_eq!(metric.distance(Lab::from(*b), Lab::from(*b)), 0.0);
        }
        let black = Lab::new(0.0, 0.0, 0.0);
        assert_eq!(metric.distance(black, black), 0.0);
    }

    #[test]
    fn test_symmetry() {
        for metric in [DeltaE::default(), DeltaE::Cie76] {
            for (a, b, _) in SHARMA_PAIRS {
                let ab = metric.distance(Lab::from(*a), Lab::from(*b));
                let ba = metric.distance(Lab::from(*b), Lab::from(*a));
                assert!(
                    (ab - ba).abs() < 1e-9,
                    "{} not symmetric: {ab} vs {ba}",
                    metric.name()
                );
            }
        }
    }

    #[test]
    fn test_cie76_is_euclidean() {
        let d = cie76(Lab::new(0.0, 0.0, 0.0), Lab::new(3.0, 4.0, 0.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_grows_with_dissimilarity() {
        let metric = DeltaE::default();
        let base = Lab::new(50.0, 20.0, 20.0);
        let mut prev = 0.0;
        for step in 1..=10 {
            let other = Lab::new(50.0 + step as f64 * 2.0, 20.0, 20.0);
            let d = metric.distance(base, other);
            assert!(d > prev, "distance not increasing at step {step}");
            prev = d;
        }
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(DeltaE::default().name(), "ciede2000");
        assert_eq!(DeltaE::Cie76.name(), "cie76");
    }
}
