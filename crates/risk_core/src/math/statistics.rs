//! Descriptive statistics over return and MTM series.
//!
//! Conventions follow the usual data-frame defaults so that results are
//! reproducible against spreadsheet and notebook calculations:
//! - standard deviation uses Bessel's correction (ddof = 1)
//! - percentiles interpolate linearly between order statistics
//! - the first percentage change of a series is 0

use std::cmp::Ordering;

/// Arithmetic mean, or `None` for an empty slice.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns `None` when fewer than two values are supplied.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::sample_std;
///
/// let std = sample_std(&[0.0, 0.1]).unwrap();
/// assert!((std - 0.07071067811865475).abs() < 1e-15);
/// assert_eq!(sample_std(&[0.1]), None);
/// ```
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Percentile with linear interpolation between order statistics.
///
/// `pct` is expressed in percent and must lie in `[0, 100]`; values outside
/// that range, NaN, and an empty input return `None`. The input need not be
/// sorted.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::percentile_linear;
///
/// let data = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile_linear(&data, 50.0), Some(2.5));
/// assert_eq!(percentile_linear(&data, 0.0), Some(1.0));
/// assert_eq!(percentile_linear(&data, 100.0), Some(4.0));
/// ```
pub fn percentile_linear(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    percentile_sorted(&sorted, pct)
}

/// Linear-interpolated percentile of an already ascending slice.
///
/// Returns `None` for an empty slice or `pct` outside `[0, 100]`.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Period-over-period fractional change.
///
/// The first element is 0. A change from a zero base is also reported as 0
/// rather than an infinite or undefined value.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::pct_change;
///
/// assert_eq!(pct_change(&[1000.0, 1100.0, 0.0, 50.0]), vec![0.0, 0.1, -1.0, 0.0]);
/// ```
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut changes = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if i == 0 {
            changes.push(0.0);
            continue;
        }
        let prev = values[i - 1];
        if prev == 0.0 {
            changes.push(0.0);
        } else {
            changes.push((value - prev) / prev);
        }
    }
    changes
}

/// Trailing-window sample standard deviation.
///
/// Output has the same length as the input; the first `window - 1` entries
/// are `None`. A window below 2 yields `None` everywhere since a sample
/// deviation needs at least two points.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::rolling_std;
///
/// let out = rolling_std(&[1.0, 3.0, 5.0, 5.0], 2);
/// assert_eq!(out[0], None);
/// assert!((out[1].unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);
/// assert_eq!(out[3], Some(0.0));
/// ```
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, sample_std)
}

/// Applies `f` to every trailing window of `values`.
///
/// Entries before the first full window, and all entries when the window is
/// below 2, are `None`.
pub fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    (0..values.len())
        .map(|i| {
            if window < 2 || i + 1 < window {
                None
            } else {
                f(&values[i + 1 - window..=i])
            }
        })
        .collect()
}
