//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `norm_inv`: Inverse CDF (quantile function), used for VaR z-scores
//!
//! All functions are generic over `T: Float`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Rational approximation coefficients for the central region of `norm_inv`.
const INV_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];

const INV_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];

/// Rational approximation coefficients for the tails of `norm_inv`.
const INV_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];

const INV_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Boundary between the central and tail regions.
const INV_P_LOW: f64 = 0.024_25;

/// Converts an `f64` constant into `T`.
///
/// Every `Float` implementor in use represents these literals; NaN is
/// returned for one that cannot.
#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which provides
/// maximum error of 1.5e-7 for all x.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = lit::<T>(0.254829592);
    let a2 = lit::<T>(-0.284496736);
    let a3 = lit::<T>(1.421413741);
    let a4 = lit::<T>(-1.453152027);
    let a5 = lit::<T>(1.061405429);
    let p = lit::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Accuracy
/// Accurate to at least 1e-7 for all finite x values.
///
/// # Examples
/// ```
/// use risk_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let arg = -x / lit::<T>(SQRT_2);
    lit::<T>(0.5) * erfc_approx(arg)
}

/// Standard normal probability density function.
///
/// # Examples
/// ```
/// use risk_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let exponent = -lit::<T>(0.5) * x * x;
    lit::<T>(FRAC_1_SQRT_2PI) * exponent.exp()
}

/// Inverse of the standard normal CDF.
///
/// Returns z such that Φ(z) = p. Uses a piecewise rational approximation
/// with relative error below 1.2e-9 over the open unit interval.
///
/// # Edge cases
/// - `p <= 0` returns negative infinity
/// - `p >= 1` returns positive infinity
/// - NaN input returns NaN
///
/// # Examples
/// ```
/// use risk_core::math::distributions::norm_inv;
///
/// assert!(norm_inv(0.5_f64).abs() < 1e-9);
/// assert!((norm_inv(0.95_f64) - 1.6448536269514715).abs() < 1e-8);
/// assert!((norm_inv(0.99_f64) - 2.3263478740408408).abs() < 1e-8);
/// assert!((norm_inv(0.05_f64) + 1.6448536269514715).abs() < 1e-8);
/// ```
pub fn norm_inv<T: Float>(p: T) -> T {
    if p.is_nan() {
        return T::nan();
    }
    if p <= T::zero() {
        return T::neg_infinity();
    }
    if p >= T::one() {
        return T::infinity();
    }

    let one = T::one();
    let p_low = lit::<T>(INV_P_LOW);
    let p_high = one - p_low;

    if p < p_low {
        let q = (lit::<T>(-2.0) * p.ln()).sqrt();
        tail_ratio(q)
    } else if p <= p_high {
        let q = p - lit::<T>(0.5);
        let r = q * q;
        let num = ((((lit::<T>(INV_A[0]) * r + lit::<T>(INV_A[1])) * r + lit::<T>(INV_A[2])) * r
            + lit::<T>(INV_A[3]))
            * r
            + lit::<T>(INV_A[4]))
            * r
            + lit::<T>(INV_A[5]);
        let den = ((((lit::<T>(INV_B[0]) * r + lit::<T>(INV_B[1])) * r + lit::<T>(INV_B[2])) * r
            + lit::<T>(INV_B[3]))
            * r
            + lit::<T>(INV_B[4]))
            * r
            + one;
        num * q / den
    } else {
        let q = (lit::<T>(-2.0) * (one - p).ln()).sqrt();
        -tail_ratio(q)
    }
}

/// Lower-tail rational function shared by both tails of `norm_inv`.
#[inline]
fn tail_ratio<T: Float>(q: T) -> T {
    let num = ((((lit::<T>(INV_C[0]) * q + lit::<T>(INV_C[1])) * q + lit::<T>(INV_C[2])) * q
        + lit::<T>(INV_C[3]))
        * q
        + lit::<T>(INV_C[4]))
        * q
        + lit::<T>(INV_C[5]);
    let den = (((lit::<T>(INV_D[0]) * q + lit::<T>(INV_D[1])) * q + lit::<T>(INV_D[2])) * q
        + lit::<T>(INV_D[3]))
        * q
        + T::one();
    num / den
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -1.0, -0.25, 0.0, 0.25, 1.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0_f64, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_pdf_at_one() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.2419707245191434, epsilon = 1e-12);
    }

    // ==========================================================
    // norm_inv tests
    // ==========================================================

    #[test]
    fn test_norm_inv_confidence_levels() {
        // z-scores for the confidence levels offered to users (90-99)
        let cases = [
            (0.90, 1.2815515655446004),
            (0.95, 1.6448536269514715),
            (0.975, 1.959963984540054),
            (0.99, 2.3263478740408408),
        ];
        for (p, z) in cases {
            assert_relative_eq!(norm_inv(p), z, max_relative = 1e-8);
        }
    }

    #[test]
    fn test_norm_inv_tails_are_antisymmetric() {
        for p in [0.001, 0.01, 0.02, 0.1, 0.3] {
            assert_relative_eq!(norm_inv(p), -norm_inv(1.0 - p), max_relative = 1e-8);
        }
    }

    #[test]
    fn test_norm_inv_inverts_cdf() {
        for p in [0.005, 0.05, 0.2, 0.5, 0.8, 0.95, 0.995] {
            assert_relative_eq!(norm_cdf(norm_inv(p)), p, epsilon = 2e-7);
        }
    }

    #[test]
    fn test_norm_inv_is_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for i in 1..1000 {
            let z = norm_inv(i as f64 / 1000.0);
            assert!(z > prev);
            prev = z;
        }
    }

    #[test]
    fn test_norm_inv_boundaries() {
        assert_eq!(norm_inv(0.0_f64), f64::NEG_INFINITY);
        assert_eq!(norm_inv(1.0_f64), f64::INFINITY);
        assert!(norm_inv(f64::NAN).is_nan());
    }

    #[test]
    fn test_norm_inv_f32() {
        assert_relative_eq!(norm_inv(0.95_f32), 1.644_853_6_f32, max_relative = 1e-5);
    }
}
