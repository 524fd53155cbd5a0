//! Sdr - Fixed-length sparse binary pattern backed by the bitvec crate.
//!
//! # Design
//!
//! - Uses `BitVec<u32, Lsb0>` for storage (32-bit words, LSB-first ordering)
//! - The width is fixed at construction; encoders create a fresh `Sdr` per call
//! - Overlap and set operations work on raw words and use hardware popcount
//!
//! # Examples
//!
//! ```
//! use gridsdr::Sdr;
//!
//! let mut sdr = Sdr::new(64);
//! sdr.set_bit(5);
//! sdr.set_bit(10);
//! assert_eq!(sdr.num_set(), 2);
//! assert_eq!(sdr.get_acts(), vec![5, 10]);
//! ```

use crate::error::{check_width, Result, SdrError};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Word type for bit storage.
pub type Word = u32;

/// Number of bits per word.
pub const BITS_PER_WORD: usize = 32;

/// A sparse distributed representation: an ordered, fixed-length run of bits.
///
/// Two `Sdr`s are equal when they have the same width and the same bits on.
#[derive(Clone, Serialize, Deserialize)]
pub struct Sdr {
    bv: BitVec<Word, Lsb0>,
}

impl Sdr {
    /// Create an `Sdr` with `n` bits, all off.
    #[inline]
    pub fn new(n: usize) -> Self {
        Self {
            bv: BitVec::repeat(false, n),
        }
    }

    /// Create an `Sdr` of width `n` with the given bits on.
    ///
    /// Returns `ShapeMismatch` if an index does not fit in `n` bits.
    ///
    /// ```
    /// use gridsdr::Sdr;
    ///
    /// let sdr = Sdr::from_acts(8, &[1, 3]).unwrap();
    /// assert_eq!(sdr.to_bools(), vec![false, true, false, true, false, false, false, false]);
    /// ```
    pub fn from_acts(n: usize, acts: &[usize]) -> Result<Self> {
        let mut sdr = Self::new(n);
        for &idx in acts {
            if idx >= n {
                return Err(SdrError::ShapeMismatch {
                    expected: n,
                    actual: idx + 1,
                });
            }
            sdr.bv.set(idx, true);
        }
        Ok(sdr)
    }

    /// Create an `Sdr` from a dense boolean slice.
    pub fn from_bools(bits: &[bool]) -> Self {
        Self {
            bv: bits.iter().copied().collect(),
        }
    }

    /// Concatenate several patterns, in order, into one wide pattern.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Sdr>,
    {
        let mut bv = BitVec::new();
        for part in parts {
            bv.extend_from_bitslice(part.bv.as_bitslice());
        }
        Self { bv }
    }

    /// Total number of bits.
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.bv.len()
    }

    /// True for a zero-width pattern.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bv.is_empty()
    }

    /// Set bit `b` on.
    ///
    /// # Panics
    ///
    /// Panics if `b >= num_bits`.
    #[inline]
    pub fn set_bit(&mut self, b: usize) {
        self.bv.set(b, true);
    }

    /// Set bit `b` off.
    ///
    /// # Panics
    ///
    /// Panics if `b >= num_bits`.
    #[inline]
    pub fn clear_bit(&mut self, b: usize) {
        self.bv.set(b, false);
    }

    /// Read bit `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b >= num_bits`.
    #[inline]
    pub fn get_bit(&self, b: usize) -> bool {
        self.bv[b]
    }

    /// Set bits `[beg, beg+len)` on.
    ///
    /// # Panics
    ///
    /// Panics if `beg + len > num_bits`.
    pub fn set_range(&mut self, beg: usize, len: usize) {
        self.bv[beg..beg + len].fill(true);
    }

    /// Turn every bit off.
    pub fn clear_all(&mut self) {
        self.bv.fill(false);
    }

    /// Dense view as booleans.
    pub fn to_bools(&self) -> Vec<bool> {
        self.bv.iter().by_vals().collect()
    }

    /// Indices of all on bits, ascending.
    pub fn get_acts(&self) -> Vec<usize> {
        self.bv.iter_ones().collect()
    }

    /// Iterate over on-bit indices without allocating.
    pub fn iter_acts(&self) -> impl Iterator<Item = usize> + '_ {
        self.bv.iter_ones()
    }

    /// Count on bits.
    #[inline]
    pub fn num_set(&self) -> usize {
        self.bv.count_ones()
    }

    /// Count on bits within `[beg, beg+len)`.
    pub fn num_set_in(&self, beg: usize, len: usize) -> usize {
        self.bv[beg..beg + len].count_ones()
    }

    /// Count bits that are on in both patterns.
    ///
    /// Returns `ShapeMismatch` if the widths differ.
    pub fn num_similar(&self, other: &Sdr) -> Result<usize> {
        self.count_words(other, |a, b| a & b)
    }

    /// Count bits on in `self` but off in `other`.
    ///
    /// Returns `ShapeMismatch` if the widths differ.
    pub fn num_missing_from(&self, other: &Sdr) -> Result<usize> {
        self.count_words(other, |a, b| a & !b)
    }

    /// Raw storage words. Bits past `num_bits` in the last word are unspecified.
    #[inline(always)]
    pub fn words(&self) -> &[Word] {
        self.bv.as_raw_slice()
    }

    /// Mask selecting the live bits of the last storage word.
    #[inline]
    fn tail_mask(&self) -> Word {
        match self.bv.len() % BITS_PER_WORD {
            0 => Word::MAX,
            r => Word::MAX >> (BITS_PER_WORD - r),
        }
    }

    fn count_words(&self, other: &Sdr, op: impl Fn(Word, Word) -> Word) -> Result<usize> {
        check_width(self.num_bits(), other.num_bits())?;
        let last = self.words().len().saturating_sub(1);
        let mask = self.tail_mask();
        Ok(self
            .words()
            .iter()
            .zip(other.words())
            .enumerate()
            .map(|(i, (&a, &b))| {
                let w = op(a, b);
                let w = if i == last { w & mask } else { w };
                w.count_ones() as usize
            })
            .sum())
    }

    fn zip_words(&self, rhs: &Sdr, op: impl Fn(Word, Word) -> Word) -> Sdr {
        assert_eq!(self.num_bits(), rhs.num_bits(), "Sdrs must have same size");
        let mut result = self.clone();
        for (a, b) in result.bv.as_raw_mut_slice().iter_mut().zip(rhs.words()) {
            *a = op(*a, *b);
        }
        result
    }
}

impl PartialEq for Sdr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bv == other.bv
    }
}

impl Eq for Sdr {}

impl fmt::Debug for Sdr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sdr({}; {:?})", self.num_bits(), self.get_acts())
    }
}

impl BitAnd for &Sdr {
    type Output = Sdr;

    /// # Panics
    ///
    /// Panics if the widths differ.
    fn bitand(self, rhs: Self) -> Sdr {
        self.zip_words(rhs, |a, b| a & b)
    }
}

impl BitOr for &Sdr {
    type Output = Sdr;

    /// # Panics
    ///
    /// Panics if the widths differ.
    fn bitor(self, rhs: Self) -> Sdr {
        self.zip_words(rhs, |a, b| a | b)
    }
}

impl Not for &Sdr {
    type Output = Sdr;

    fn not(self) -> Sdr {
        Sdr {
            bv: !self.bv.clone(),
        }
    }
}
