//! CategoryEncoder - Encodes a category id as one dedicated block of bits.
//!
//! Every category owns a disjoint block of `block_len` bits, so different
//! categories never overlap. There is no reserved "unknown" block; ids are
//! `0..num_categories`.
//!
//! # Examples
//!
//! ```
//! use gridsdr::{CategoryEncoder, Encoder};
//!
//! let enc = CategoryEncoder::new(4, 8).unwrap();
//! let sdr = enc.encode(2).unwrap();
//! assert_eq!(sdr.num_bits(), 32);
//! assert_eq!(sdr.get_acts(), (16..24).collect::<Vec<_>>());
//! assert_eq!(enc.decode(&sdr).unwrap(), vec![2]);
//! ```

use super::Encoder;
use crate::error::check_width;
use crate::{Result, Sdr, SdrError};

/// Encodes discrete categories into non-overlapping blocks.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    num_categories: usize,
    block_len: usize,
}

impl CategoryEncoder {
    /// Create a new CategoryEncoder with `num_categories` blocks of `block_len` bits.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if either argument is zero or their product overflows.
    pub fn new(num_categories: usize, block_len: usize) -> Result<Self> {
        if num_categories == 0 || block_len == 0 {
            return Err(SdrError::InvalidParameter(format!(
                "category encoder needs at least one category and one bit per block (got {} x {})",
                num_categories, block_len
            )));
        }
        if num_categories.checked_mul(block_len).is_none() {
            return Err(SdrError::InvalidParameter(format!(
                "category encoder width overflows ({} x {})",
                num_categories, block_len
            )));
        }
        Ok(Self {
            num_categories,
            block_len,
        })
    }

    /// Categories whose block has at least one active bit, ascending.
    ///
    /// The result may be empty or hold several ids when the input is a
    /// superposition; neither is an error.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `sdr` is not `encode_size()` bits wide.
    pub fn decode(&self, sdr: &Sdr) -> Result<Vec<usize>> {
        check_width(self.encode_size(), sdr.num_bits())?;
        Ok((0..self.num_categories)
            .filter(|&c| sdr.num_set_in(c * self.block_len, self.block_len) > 0)
            .collect())
    }

    /// Get number of categories.
    pub fn num_categories(&self) -> usize {
        self.num_categories
    }

    /// Get bits per category block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }
}

impl Encoder<usize> for CategoryEncoder {
    fn encode(&self, category: usize) -> Result<Sdr> {
        if category >= self.num_categories {
            return Err(SdrError::InvalidCategory {
                category,
                num_categories: self.num_categories,
            });
        }
        let mut sdr = Sdr::new(self.encode_size());
        sdr.set_range(category * self.block_len, self.block_len);
        Ok(sdr)
    }

    fn encode_size(&self) -> usize {
        self.num_categories * self.block_len
    }
}

/// One-shot category encoding without keeping an encoder around.
pub fn encode_category(category: usize, num_categories: usize, block_len: usize) -> Result<Sdr> {
    CategoryEncoder::new(num_categories, block_len)?.encode(category)
}
