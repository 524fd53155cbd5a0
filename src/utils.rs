//! SDR utility functions.
//!
//! Pure functions over patterns and score vectors: density, sparse index
//! lists, the anomaly score, per-category bit counts and softmax.

use crate::error::{check_width, Result, SdrError};
use crate::Sdr;

/// Fraction of bits that are on.
///
/// A zero-width pattern has density 0.
///
/// # Examples
///
/// ```
/// use gridsdr::{utils::density, Sdr};
///
/// let sdr = Sdr::from_acts(8, &[0, 4]).unwrap();
/// assert_eq!(density(&sdr), 0.25);
/// ```
pub fn density(sdr: &Sdr) -> f64 {
    if sdr.is_empty() {
        return 0.0;
    }
    sdr.num_set() as f64 / sdr.num_bits() as f64
}

/// Ascending list of on-bit indices.
pub fn sparsify(sdr: &Sdr) -> Vec<usize> {
    sdr.get_acts()
}

/// Fraction of `real`'s on bits that are absent from `prediction`.
///
/// Computes `count(real AND NOT prediction) / count(real)`. The ratio is
/// undefined when `real` has no on bits; that case returns
/// [`SdrError::DegenerateInput`] instead of a NaN.
///
/// # Errors
///
/// - `ShapeMismatch` if the two patterns differ in width
/// - `DegenerateInput` if `real` is all off
///
/// # Examples
///
/// ```
/// use gridsdr::{utils::anomaly, Sdr};
///
/// let real = Sdr::from_acts(16, &[1, 2, 3, 4]).unwrap();
/// let pred = Sdr::from_acts(16, &[1, 2, 9]).unwrap();
/// assert_eq!(anomaly(&real, &pred).unwrap(), 0.5);
/// ```
pub fn anomaly(real: &Sdr, prediction: &Sdr) -> Result<f64> {
    let on = real.num_set();
    if on == 0 {
        return Err(SdrError::DegenerateInput(
            "anomaly score of a pattern with no active bits".to_string(),
        ));
    }
    let missed = real.num_missing_from(prediction)?;
    Ok(missed as f64 / on as f64)
}

/// Count on bits per contiguous category block.
///
/// Splits `sdr` into `num_categories` blocks of `len_per_category` bits and
/// returns each block's on-bit count, divided by `len_per_category` when
/// `normalize` is set.
///
/// # Errors
///
/// `ShapeMismatch` if `num_categories * len_per_category != sdr.num_bits()`,
/// including when the product overflows.
pub fn categorize(
    num_categories: usize,
    len_per_category: usize,
    sdr: &Sdr,
    normalize: bool,
) -> Result<Vec<f64>> {
    // An overflowing product can never match a real width
    let width = num_categories
        .checked_mul(len_per_category)
        .ok_or(SdrError::ShapeMismatch {
            expected: usize::MAX,
            actual: sdr.num_bits(),
        })?;
    check_width(width, sdr.num_bits())?;

    let divisor = if normalize && len_per_category > 0 {
        len_per_category as f64
    } else {
        1.0
    };

    Ok((0..num_categories)
        .map(|c| sdr.num_set_in(c * len_per_category, len_per_category) as f64 / divisor)
        .collect())
}

/// Numerically stable softmax.
///
/// The maximum element is subtracted before exponentiating. An empty slice
/// yields an empty vector.
///
/// Infinite maxima take the limit: the mass is split evenly over the `+inf`
/// elements, or over all elements when every one is `-inf`. A NaN input
/// yields NaN outputs.
pub fn softmax(x: &[f64]) -> Vec<f64> {
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        let ties = x.iter().filter(|&&v| v == max).count() as f64;
        return x
            .iter()
            .map(|&v| if v == max { 1.0 / ties } else { 0.0 })
            .collect();
    }
    let exps: Vec<f64> = x.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density() {
        let mut sdr = Sdr::new(10);
        assert_eq!(density(&sdr), 0.0);
        sdr.set_range(0, 3);
        assert_relative_eq!(density(&sdr), 0.3);
        assert_eq!(density(&Sdr::new(0)), 0.0);
    }

    #[test]
    fn test_sparsify() {
        let sdr = Sdr::from_bools(&[false, true, true, false, true]);
        assert_eq!(sparsify(&sdr), vec![1, 2, 4]);
    }

    #[test]
    fn test_anomaly_degenerate() {
        let real = Sdr::new(32);
        let pred = Sdr::from_acts(32, &[3]).unwrap();
        assert!(matches!(
            anomaly(&real, &pred),
            Err(SdrError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_anomaly_unpredicted() {
        let real = Sdr::from_acts(32, &[3, 7]).unwrap();
        assert_eq!(anomaly(&real, &Sdr::new(32)).unwrap(), 1.0);
    }

    #[test]
    fn test_anomaly_shape_mismatch() {
        let real = Sdr::from_acts(32, &[3]).unwrap();
        assert!(matches!(
            anomaly(&real, &Sdr::new(16)),
            Err(SdrError::ShapeMismatch {
                expected: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_categorize() {
        let sdr = Sdr::from_acts(12, &[0, 1, 5, 8, 9, 10, 11]).unwrap();
        assert_eq!(categorize(3, 4, &sdr, false).unwrap(), vec![2.0, 1.0, 4.0]);
        assert_eq!(categorize(3, 4, &sdr, true).unwrap(), vec![0.5, 0.25, 1.0]);
        assert!(categorize(4, 4, &sdr, true).is_err());
    }

    #[test]
    fn test_categorize_overflowing_width() {
        assert!(matches!(
            categorize(usize::MAX, 2, &Sdr::new(4), false),
            Err(SdrError::ShapeMismatch { actual: 4, .. })
        ));
        // Wraps to 0 in unchecked arithmetic
        assert!(categorize(1 << (usize::BITS - 1), 2, &Sdr::new(0), false).is_err());
    }

    #[test]
    fn test_softmax() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(p[0] < p[1] && p[1] < p[2]);

        // Large inputs stay finite
        let p = softmax(&[1000.0, 1000.0]);
        assert_relative_eq!(p[0], 0.5);
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_softmax_infinite() {
        assert_eq!(softmax(&[f64::INFINITY, 1.0]), vec![1.0, 0.0]);
        assert_eq!(
            softmax(&[f64::INFINITY, 3.0, f64::INFINITY]),
            vec![0.5, 0.0, 0.5]
        );
        assert_eq!(
            softmax(&[f64::NEG_INFINITY, f64::NEG_INFINITY]),
            vec![0.5, 0.5]
        );
        // A single -inf among finite values just gets no mass
        assert_eq!(softmax(&[f64::NEG_INFINITY, 0.0]), vec![0.0, 1.0]);
    }
}
