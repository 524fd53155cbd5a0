//! Sequence memory adapter.
//!
//! The sequence-learning algorithm itself is not part of this crate. A
//! backend is injected through [`SequenceBackend`], built once from a
//! [`SequenceMemoryConfig`], and wrapped by [`SequenceMemory`], which owns
//! the single input-width validation step and checks what the backend
//! returns. The backend's output is its prediction of the next input, one
//! bit per input column.

use crate::config::SequenceMemoryConfig;
use crate::error::check_width;
use crate::{Layer, Result, Sdr, SdrError};

/// An externally supplied sequence-memory algorithm.
pub trait SequenceBackend: Layer + Sized {
    /// Construct for `input_size` columns with the given tuning.
    fn from_config(input_size: usize, config: &SequenceMemoryConfig) -> Result<Self>;
}

/// Validating wrapper around a sequence-memory backend.
#[derive(Debug)]
pub struct SequenceMemory<B> {
    backend: B,
    config: SequenceMemoryConfig,
    input_size: usize,
}

impl<B: SequenceBackend> SequenceMemory<B> {
    /// Validate `config` and build the backend for `input_size` columns.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `input_size == 0` or the config is invalid
    /// - `ShapeMismatch` if the backend reports other widths than requested
    /// - anything the backend's constructor returns
    pub fn new(input_size: usize, config: SequenceMemoryConfig) -> Result<Self> {
        if input_size == 0 {
            return Err(SdrError::InvalidParameter(
                "sequence memory needs a non-empty input".to_string(),
            ));
        }
        config.validate()?;
        let backend = B::from_config(input_size, &config)?;
        check_width(input_size, backend.input_size())?;
        check_width(input_size, backend.output_size())?;

        log::debug!(
            "sequence memory: {} columns x {} cells",
            input_size,
            config.cells_per_column
        );
        Ok(Self {
            backend,
            config,
            input_size,
        })
    }

    /// Build with the wrong-prediction decrement tuned to `sample`'s density.
    pub fn for_sample(sample: &Sdr, config: SequenceMemoryConfig) -> Result<Self> {
        Self::new(sample.num_bits(), config.tuned_for(sample))
    }
}

impl<B> SequenceMemory<B> {
    /// Get the configuration the backend was built with.
    pub fn config(&self) -> &SequenceMemoryConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: SequenceBackend> Layer for SequenceMemory<B> {
    fn compute(&mut self, input: &Sdr, learn: bool) -> Result<Sdr> {
        check_width(self.input_size, input.num_bits())?;
        let prediction = self.backend.compute(input, learn)?;
        check_width(self.input_size, prediction.num_bits())?;
        Ok(prediction)
    }

    fn reset(&mut self) {
        log::debug!("sequence memory reset");
        self.backend.reset();
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.input_size
    }
}
