//! ScalarEncoder - Encodes a bounded scalar as a sliding run of active bits.
//!
//! Nearby values produce overlapping runs, so similarity degrades gracefully
//! with distance. The run length sets the receptive-field width and the
//! remaining `total - run` positions set the resolution.
//!
//! # Examples
//!
//! ```
//! use gridsdr::{Encoder, ScalarEncoder};
//!
//! let enc = ScalarEncoder::new(0.0, 800.0, 256, 416).unwrap();
//!
//! let low = enc.encode(0.0).unwrap();
//! assert_eq!(low.get_acts(), (0..256).collect::<Vec<_>>());
//!
//! let high = enc.encode(800.0).unwrap();
//! assert_eq!(high.get_acts(), (160..416).collect::<Vec<_>>());
//! ```

use super::Encoder;
use crate::{Result, Sdr, SdrError};

/// Encodes continuous scalar values into overlapping binary patterns.
///
/// # Algorithm
///
/// 1. Clamp the value to `[min_val, max_val]`
/// 2. Normalize to `u` in `[0, 1]`
/// 3. `start = floor((total_len - run_len) * u)`
/// 4. Set bits `[start, start + run_len)`
#[derive(Debug, Clone)]
pub struct ScalarEncoder {
    min_val: f64,
    max_val: f64,
    run_len: usize,
    total_len: usize,
}

impl ScalarEncoder {
    /// Create a new ScalarEncoder.
    ///
    /// # Arguments
    ///
    /// * `min_val` - Minimum input value (inclusive)
    /// * `max_val` - Maximum input value (inclusive)
    /// * `run_len` - Number of active bits per encoding
    /// * `total_len` - Width of the output pattern
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if `min_val > max_val`
    /// - `InvalidParameter` if a bound or the span `max_val - min_val` is not
    ///   finite, or if `run_len > total_len`
    pub fn new(min_val: f64, max_val: f64, run_len: usize, total_len: usize) -> Result<Self> {
        if !min_val.is_finite() || !max_val.is_finite() {
            return Err(SdrError::InvalidParameter(format!(
                "scalar bounds must be finite (got {}, {})",
                min_val, max_val
            )));
        }
        if min_val > max_val {
            return Err(SdrError::InvalidRange {
                min: min_val,
                max: max_val,
            });
        }
        if !(max_val - min_val).is_finite() {
            return Err(SdrError::InvalidParameter(format!(
                "scalar range is too wide to normalize ({} to {})",
                min_val, max_val
            )));
        }
        if run_len > total_len {
            return Err(SdrError::InvalidParameter(format!(
                "run length must be <= total length (got {} > {})",
                run_len, total_len
            )));
        }

        Ok(Self {
            min_val,
            max_val,
            run_len,
            total_len,
        })
    }

    /// Position of the first active bit for `value`.
    pub fn start_of(&self, value: f64) -> usize {
        let span = self.max_val - self.min_val;
        // A degenerate range maps everything to the first position
        let u = if span > 0.0 {
            ((value - self.min_val) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        // NaN clamps to NaN and casts to 0
        (((self.total_len - self.run_len) as f64) * u) as usize
    }

    /// Get minimum value.
    pub fn min_val(&self) -> f64 {
        self.min_val
    }

    /// Get maximum value.
    pub fn max_val(&self) -> f64 {
        self.max_val
    }

    /// Get the number of active bits per encoding.
    pub fn run_len(&self) -> usize {
        self.run_len
    }
}

impl Encoder<f64> for ScalarEncoder {
    fn encode(&self, value: f64) -> Result<Sdr> {
        let mut sdr = Sdr::new(self.total_len);
        sdr.set_range(self.start_of(value), self.run_len);
        Ok(sdr)
    }

    fn encode_size(&self) -> usize {
        self.total_len
    }
}

/// One-shot scalar encoding without keeping an encoder around.
pub fn encode_scalar(
    value: f64,
    min_val: f64,
    max_val: f64,
    run_len: usize,
    total_len: usize,
) -> Result<Sdr> {
    ScalarEncoder::new(min_val, max_val, run_len, total_len)?.encode(value)
}
