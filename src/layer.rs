//! Layer trait - The compute/reset capability shared by pattern processors.
//!
//! Anything that turns one pattern into another with optional learning
//! implements [`Layer`]: the sequence-memory adapter, a stack of layers, or a
//! caller-supplied algorithm.
//!
//! # Lifecycle
//!
//! - `compute(input, learn)` - Map an input pattern to an output pattern
//! - `reset()` - Forget any sequence context
//!
//! `train()` and `predict()` are shorthands for `compute` with learning on
//! or off.

use crate::error::check_width;
use crate::{Result, Sdr, SdrError};

/// Core trait for pattern-to-pattern processors.
pub trait Layer {
    /// Compute the output for `input`, updating internal state when `learn` is set.
    fn compute(&mut self, input: &Sdr, learn: bool) -> Result<Sdr>;

    /// Clear sequence context. Learned state is kept.
    fn reset(&mut self) {}

    /// Width of accepted inputs.
    fn input_size(&self) -> usize;

    /// Width of produced outputs.
    fn output_size(&self) -> usize;

    /// Learn from `input`, discarding the output.
    fn train(&mut self, input: &Sdr) -> Result<()> {
        self.compute(input, true).map(|_| ())
    }

    /// Compute without learning.
    ///
    /// Still takes `&mut self`: sequence context advances on every call.
    fn predict(&mut self, input: &Sdr) -> Result<Sdr> {
        self.compute(input, false)
    }
}

impl<L: Layer + ?Sized> Layer for Box<L> {
    fn compute(&mut self, input: &Sdr, learn: bool) -> Result<Sdr> {
        (**self).compute(input, learn)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn input_size(&self) -> usize {
        (**self).input_size()
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }
}

/// An ordered stack of layers, each feeding the next.
///
/// # Examples
///
/// ```
/// use gridsdr::{Layer, Result, Sdr, Sequential};
///
/// // Moves every active bit one position up, wrapping at the end
/// struct Shift(usize);
///
/// impl Layer for Shift {
///     fn compute(&mut self, input: &Sdr, _learn: bool) -> Result<Sdr> {
///         let acts: Vec<usize> = input.iter_acts().map(|b| (b + 1) % self.0).collect();
///         Sdr::from_acts(self.0, &acts)
///     }
///     fn input_size(&self) -> usize { self.0 }
///     fn output_size(&self) -> usize { self.0 }
/// }
///
/// let mut net = Sequential::new();
/// net.push(Shift(8))?;
/// net.push(Shift(8))?;
///
/// let input = Sdr::from_acts(8, &[0, 7])?;
/// assert_eq!(net.compute(&input, true)?.get_acts(), vec![1, 2]);
/// # Ok::<(), gridsdr::SdrError>(())
/// ```
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the layer's input width differs from the current
    /// last layer's output width.
    pub fn push<L: Layer + 'static>(&mut self, layer: L) -> Result<()> {
        if let Some(last) = self.layers.last() {
            check_width(last.output_size(), layer.input_size())?;
        }
        self.layers.push(Box::new(layer));
        Ok(())
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Borrow layer `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Layer> {
        self.layers.get(index).map(|l| &**l)
    }

    /// Mutably borrow layer `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Layer + 'static)> {
        self.layers.get_mut(index).map(|l| &mut **l)
    }
}

impl Layer for Sequential {
    fn compute(&mut self, input: &Sdr, learn: bool) -> Result<Sdr> {
        let (first, rest) = self
            .layers
            .split_first_mut()
            .ok_or_else(|| SdrError::InvalidParameter("sequential stack is empty".to_string()))?;

        let mut buffer = first.compute(input, learn)?;
        for layer in rest {
            buffer = layer.compute(&buffer, learn)?;
        }
        Ok(buffer)
    }

    fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
    }

    fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size())
    }

    fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.output_size())
    }
}
