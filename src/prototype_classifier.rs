//! PrototypeClassifier - Category recognition by overlap with learned prototypes.
//!
//! For every category the classifier accumulates how often each bit was on
//! across the patterns added for it. At query time a category's prototype
//! is the set of bits that were on in at least `threshold` of its samples;
//! the winner is the category whose prototype overlaps the query most.
//!
//! # Usage Pattern
//!
//! ```
//! use gridsdr::{CategoryEncoder, Encoder, PrototypeClassifier};
//!
//! let encoder = CategoryEncoder::new(3, 8).unwrap();
//! let mut classifier = PrototypeClassifier::new(3, encoder.encode_size()).unwrap();
//!
//! for c in 0..3 {
//!     classifier.add(c, &encoder.encode(c).unwrap()).unwrap();
//! }
//!
//! let query = encoder.encode(1).unwrap();
//! assert_eq!(classifier.compute(&query, 0.5).unwrap(), 1);
//! ```

use crate::error::check_width;
use crate::{Result, Sdr, SdrError};

/// Accumulated per-bit statistics for one category.
#[derive(Debug, Clone)]
struct Prototype {
    counts: Vec<u32>,
    samples: usize,
}

impl Prototype {
    fn new(num_bits: usize) -> Self {
        Self {
            counts: vec![0; num_bits],
            samples: 0,
        }
    }

    /// Bits on in at least `threshold` of the samples; all off when untrained.
    fn mask(&self, threshold: f64) -> Sdr {
        let mut mask = Sdr::new(self.counts.len());
        if self.samples == 0 {
            return mask;
        }
        let min_count = threshold * self.samples as f64;
        for (bit, &count) in self.counts.iter().enumerate() {
            if count as f64 >= min_count {
                mask.set_bit(bit);
            }
        }
        mask
    }
}

/// Prototype-overlap classifier over fixed-width patterns.
///
/// Training (`add`) and `reset` need exclusive access; `compute` never
/// mutates state.
#[derive(Debug, Clone)]
pub struct PrototypeClassifier {
    num_bits: usize,
    prototypes: Vec<Prototype>,
}

impl PrototypeClassifier {
    /// Create a classifier for `num_categories` categories of `num_bits`-wide patterns.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `num_categories == 0`.
    pub fn new(num_categories: usize, num_bits: usize) -> Result<Self> {
        if num_categories == 0 {
            return Err(SdrError::InvalidParameter(
                "classifier needs at least one category".to_string(),
            ));
        }
        Ok(Self {
            num_bits,
            prototypes: vec![Prototype::new(num_bits); num_categories],
        })
    }

    /// Accumulate `sdr` into `category`'s statistics.
    ///
    /// # Errors
    ///
    /// - `InvalidCategory` if `category >= num_categories`
    /// - `ShapeMismatch` if `sdr` is not `num_bits` wide
    pub fn add(&mut self, category: usize, sdr: &Sdr) -> Result<()> {
        self.check_category(category)?;
        check_width(self.num_bits, sdr.num_bits())?;

        let proto = &mut self.prototypes[category];
        for bit in sdr.iter_acts() {
            proto.counts[bit] += 1;
        }
        proto.samples += 1;
        log::trace!(
            "prototype {}: {} samples after add",
            category,
            proto.samples
        );
        Ok(())
    }

    /// Overlap between `sdr` and every category's prototype, in category order.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `threshold` is outside `[0, 1]`
    /// - `ShapeMismatch` if `sdr` is not `num_bits` wide
    pub fn scores(&self, sdr: &Sdr, threshold: f64) -> Result<Vec<usize>> {
        check_threshold(threshold)?;
        check_width(self.num_bits, sdr.num_bits())?;

        self.prototypes
            .iter()
            .map(|p| sdr.num_similar(&p.mask(threshold)))
            .collect()
    }

    /// Category with the strictly greatest overlap.
    ///
    /// Ties keep the earliest category. When every score is zero (for
    /// example an empty store) category 0 is returned; use [`scores`] to
    /// tell that apart from a real match.
    ///
    /// [`scores`]: PrototypeClassifier::scores
    pub fn compute(&self, sdr: &Sdr, threshold: f64) -> Result<usize> {
        let scores = self.scores(sdr, threshold)?;
        let mut best = 0;
        let mut best_score = 0;
        for (category, &score) in scores.iter().enumerate() {
            if score > best_score {
                best = category;
                best_score = score;
            }
        }
        Ok(best)
    }

    /// The thresholded prototype mask of `category`.
    ///
    /// # Errors
    ///
    /// - `InvalidCategory` if `category >= num_categories`
    /// - `InvalidParameter` if `threshold` is outside `[0, 1]`
    pub fn prototype(&self, category: usize, threshold: f64) -> Result<Sdr> {
        self.check_category(category)?;
        check_threshold(threshold)?;
        Ok(self.prototypes[category].mask(threshold))
    }

    /// Number of `add` calls made for `category` since the last reset.
    pub fn sample_count(&self, category: usize) -> Result<usize> {
        self.check_category(category)?;
        Ok(self.prototypes[category].samples)
    }

    /// Accumulated on-counts of `category`, one per bit.
    pub fn bit_counts(&self, category: usize) -> Result<&[u32]> {
        self.check_category(category)?;
        Ok(&self.prototypes[category].counts)
    }

    /// Zero every accumulator and sample count.
    pub fn reset(&mut self) {
        for p in &mut self.prototypes {
            p.counts.fill(0);
            p.samples = 0;
        }
        log::debug!("prototype classifier reset ({} categories)", self.prototypes.len());
    }

    /// Get number of categories.
    pub fn num_categories(&self) -> usize {
        self.prototypes.len()
    }

    /// Get pattern width.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    fn check_category(&self, category: usize) -> Result<()> {
        if category < self.prototypes.len() {
            Ok(())
        } else {
            Err(SdrError::InvalidCategory {
                category,
                num_categories: self.prototypes.len(),
            })
        }
    }
}

fn check_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(SdrError::InvalidParameter(format!(
            "threshold must be in [0, 1] (got {})",
            threshold
        )))
    }
}
