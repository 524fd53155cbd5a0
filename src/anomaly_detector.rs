//! AnomalyDetector - Online surprise scoring of an encoded stream.
//!
//! Each step encodes a value, scores how much of the encoding the previous
//! step's prediction missed, then asks the layer for the next prediction.
//! Scores are kept in a bounded history for smoothing and thresholding.
//!
//! # Examples
//!
//! ```
//! use gridsdr::config::AnomalyConfig;
//! use gridsdr::{AnomalyDetector, CategoryEncoder, Encoder, Layer, Result, Sdr};
//!
//! // Predicts that the current input repeats
//! struct Echo(usize);
//!
//! impl Layer for Echo {
//!     fn compute(&mut self, input: &Sdr, _learn: bool) -> Result<Sdr> {
//!         Ok(input.clone())
//!     }
//!     fn input_size(&self) -> usize { self.0 }
//!     fn output_size(&self) -> usize { self.0 }
//! }
//!
//! let encoder = CategoryEncoder::new(4, 8)?;
//! let width = encoder.encode_size();
//! let mut detector = AnomalyDetector::new(encoder, Echo(width), AnomalyConfig::default())?;
//!
//! let scores: Vec<f64> = [1usize, 1, 1, 3]
//!     .into_iter()
//!     .map(|c| detector.step(c, true))
//!     .collect::<Result<_>>()?;
//!
//! assert_eq!(scores, vec![1.0, 0.0, 0.0, 1.0]);
//! assert!(detector.is_anomalous(scores[3]));
//! # Ok::<(), gridsdr::SdrError>(())
//! ```

use crate::config::AnomalyConfig;
use crate::error::check_width;
use crate::utils::anomaly;
use crate::{Encoder, Layer, Result, Sdr};
use std::collections::VecDeque;
use std::marker::PhantomData;

/// Encoder + predictive layer + score history.
pub struct AnomalyDetector<T, E, L> {
    encoder: E,
    layer: L,
    config: AnomalyConfig,
    last_prediction: Sdr,
    history: VecDeque<f64>,
    _value: PhantomData<fn(T)>,
}

impl<T, E, L> AnomalyDetector<T, E, L>
where
    E: Encoder<T>,
    L: Layer,
{
    /// Wire an encoder to a layer.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `config` is invalid
    /// - `ShapeMismatch` if the layer does not map encoder-width patterns to
    ///   encoder-width predictions
    pub fn new(encoder: E, layer: L, config: AnomalyConfig) -> Result<Self> {
        config.validate()?;
        let width = encoder.encode_size();
        check_width(width, layer.input_size())?;
        check_width(width, layer.output_size())?;

        Ok(Self {
            encoder,
            layer,
            history: VecDeque::with_capacity(config.history_len),
            config,
            last_prediction: Sdr::new(width),
            _value: PhantomData,
        })
    }

    /// Process one value and return its anomaly score in `[0, 1]`.
    ///
    /// The first step after construction or `reset` has nothing predicted
    /// and scores 1.0.
    ///
    /// # Errors
    ///
    /// Encoder and layer errors propagate; an all-off encoding yields
    /// `DegenerateInput`. On error the detector state is unchanged.
    pub fn step(&mut self, value: T, learn: bool) -> Result<f64> {
        let input = self.encoder.encode(value)?;
        let score = anomaly(&input, &self.last_prediction)?;
        self.last_prediction = self.layer.compute(&input, learn)?;

        if self.history.len() == self.config.history_len {
            self.history.pop_front();
        }
        self.history.push_back(score);

        if self.is_anomalous(score) {
            log::debug!("anomaly score {:.3} above threshold {:.3}", score, self.config.threshold);
        }
        Ok(score)
    }

    /// True when `score` is strictly above the configured threshold.
    pub fn is_anomalous(&self, score: f64) -> bool {
        score > self.config.threshold
    }

    /// Mean of the most recent `smoothing_window` scores, 0 when empty.
    pub fn smoothed_score(&self) -> f64 {
        let n = self.config.smoothing_window.min(self.history.len());
        mean(self.history.iter().rev().take(n))
    }

    /// Mean of every score in the history, 0 when empty.
    pub fn mean_score(&self) -> f64 {
        mean(self.history.iter())
    }

    /// Scores in arrival order, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// The layer's most recent prediction.
    pub fn last_prediction(&self) -> &Sdr {
        &self.last_prediction
    }

    /// Forget the history and pending prediction, and reset the layer.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_prediction.clear_all();
        self.layer.reset();
        log::debug!("anomaly detector reset");
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }
}

fn mean<'a>(scores: impl Iterator<Item = &'a f64>) -> f64 {
    let (sum, n) = scores.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryEncoder, SdrError};

    /// Predicts that the current input repeats.
    struct Echo(usize);

    impl Layer for Echo {
        fn compute(&mut self, input: &Sdr, _learn: bool) -> Result<Sdr> {
            Ok(input.clone())
        }

        fn input_size(&self) -> usize {
            self.0
        }

        fn output_size(&self) -> usize {
            self.0
        }
    }

    fn detector(config: AnomalyConfig) -> AnomalyDetector<usize, CategoryEncoder, Echo> {
        let encoder = CategoryEncoder::new(4, 4).unwrap();
        AnomalyDetector::new(encoder, Echo(16), config).unwrap()
    }

    #[test]
    fn test_first_step_is_surprising() {
        let mut d = detector(AnomalyConfig::default());
        assert_eq!(d.step(1, true).unwrap(), 1.0);
        assert_eq!(d.step(1, true).unwrap(), 0.0);
        assert_eq!(d.step(2, true).unwrap(), 1.0);
        assert!(d.is_anomalous(1.0));
        assert!(!d.is_anomalous(0.5));
    }

    #[test]
    fn test_history_is_bounded() {
        let config = AnomalyConfig {
            history_len: 3,
            smoothing_window: 2,
            ..Default::default()
        };
        let mut d = detector(config);
        for c in [0, 0, 0, 1, 1] {
            d.step(c, false).unwrap();
        }
        // scores: 1, 0, 0, 1, 0 -> kept: 0, 1, 0
        assert_eq!(d.history().collect::<Vec<_>>(), vec![0.0, 1.0, 0.0]);
        assert_eq!(d.smoothed_score(), 0.5);
        assert!((d.mean_score() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut d = detector(AnomalyConfig::default());
        d.step(3, true).unwrap();
        d.reset();
        assert_eq!(d.history().count(), 0);
        assert_eq!(d.last_prediction().num_set(), 0);
        assert_eq!(d.mean_score(), 0.0);
        assert_eq!(d.step(3, true).unwrap(), 1.0);
    }

    #[test]
    fn test_width_mismatch() {
        let encoder = CategoryEncoder::new(4, 4).unwrap();
        assert!(matches!(
            AnomalyDetector::<usize, _, _>::new(encoder, Echo(8), AnomalyConfig::default()),
            Err(SdrError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_encoder_error_leaves_state() {
        let mut d = detector(AnomalyConfig::default());
        d.step(0, true).unwrap();
        assert!(d.step(9, true).is_err());
        assert_eq!(d.history().count(), 1);
        assert_eq!(d.step(0, true).unwrap(), 0.0);
    }
}
