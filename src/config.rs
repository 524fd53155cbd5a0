//! Configuration types.
//!
//! Every tunable of the pipeline lives in a plain `serde` struct with a
//! `Default` matching the reference deployment (a 800x600 canvas tracked by
//! a 32-module grid encoder). [`PipelineConfig`] bundles them and converts
//! to and from JSON; reading files is left to the host application.
//!
//! # Example
//!
//! ```
//! use gridsdr::config::PipelineConfig;
//!
//! let json = r#"{ "grid": { "num_modules": 16, "seed": 3 } }"#;
//! let config = PipelineConfig::from_json(json).unwrap();
//! assert_eq!(config.grid.num_modules, 16);
//! assert_eq!(config.anomaly.threshold, 0.5);
//! ```

use crate::utils::density;
use crate::{Result, Sdr, SdrError};
use serde::{Deserialize, Serialize};

/// Grid population encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridEncoderConfig {
    pub num_modules: usize,
    /// Seed for sampling module parameters
    pub seed: u64,
}

impl Default for GridEncoderConfig {
    fn default() -> Self {
        Self {
            num_modules: 32,
            seed: 0,
        }
    }
}

/// Scalar-per-axis location encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationEncoderConfig {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Active bits per axis
    pub run_length: usize,
    /// Bits per axis
    pub total_length: usize,
}

impl Default for LocationEncoderConfig {
    fn default() -> Self {
        Self {
            x_range: (0.0, 800.0),
            y_range: (0.0, 600.0),
            run_length: 26,
            total_length: 256,
        }
    }
}

/// Tuning parameters handed to the external sequence-memory backend.
///
/// The backend receives this structure once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceMemoryConfig {
    pub cells_per_column: usize,
    pub activation_threshold: u32,
    pub initial_permanence: f64,
    pub connected_permanence: f64,
    pub min_threshold: u32,
    /// Maximum synapses grown per segment per step
    pub max_new_synapse_count: u32,
    pub permanence_increment: f64,
    pub permanence_decrement: f64,
    /// Punishment for segments that predicted wrongly
    pub predicted_segment_decrement: f64,
    pub seed: u64,
    pub max_segments_per_cell: usize,
    pub max_synapses_per_segment: usize,
    /// Let the backend validate its inputs itself
    pub check_inputs: bool,
}

impl Default for SequenceMemoryConfig {
    fn default() -> Self {
        Self {
            cells_per_column: 32,
            activation_threshold: 13,
            initial_permanence: 0.21,
            connected_permanence: 0.5,
            min_threshold: 10,
            max_new_synapse_count: 24,
            permanence_increment: 0.04,
            permanence_decrement: 0.045,
            predicted_segment_decrement: 0.0,
            seed: 42,
            max_segments_per_cell: 255,
            max_synapses_per_segment: 255,
            check_inputs: false,
        }
    }
}

impl SequenceMemoryConfig {
    /// Derive the wrong-prediction decrement from a representative input.
    ///
    /// Sets `predicted_segment_decrement = density(sample) * 1.3 * permanence_increment`.
    pub fn tuned_for(mut self, sample: &Sdr) -> Self {
        self.predicted_segment_decrement = density(sample) * 1.3 * self.permanence_increment;
        self
    }

    /// Reject values the backend could not work with.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(SdrError::InvalidParameter(format!(
                    "{} must be in [0, 1] (got {})",
                    name, v
                )))
            }
        };
        unit("initial_permanence", self.initial_permanence)?;
        unit("connected_permanence", self.connected_permanence)?;
        unit("permanence_increment", self.permanence_increment)?;
        unit("permanence_decrement", self.permanence_decrement)?;
        unit("predicted_segment_decrement", self.predicted_segment_decrement)?;

        if self.cells_per_column == 0 {
            return Err(SdrError::InvalidParameter(
                "cells_per_column must be > 0".to_string(),
            ));
        }
        if self.min_threshold > self.activation_threshold {
            return Err(SdrError::InvalidParameter(format!(
                "min_threshold must be <= activation_threshold (got {} > {})",
                self.min_threshold, self.activation_threshold
            )));
        }
        Ok(())
    }
}

/// Anomaly detector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Scores strictly above this are anomalous
    pub threshold: f64,
    /// Number of scores kept
    pub history_len: usize,
    /// Number of recent scores averaged by `smoothed_score`
    pub smoothing_window: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            history_len: 256,
            smoothing_window: 10,
        }
    }
}

impl AnomalyConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SdrError::InvalidParameter(format!(
                "anomaly threshold must be in [0, 1] (got {})",
                self.threshold
            )));
        }
        if self.history_len == 0 || self.smoothing_window == 0 {
            return Err(SdrError::InvalidParameter(
                "history_len and smoothing_window must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// All pipeline settings in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub grid: GridEncoderConfig,
    pub location: LocationEncoderConfig,
    pub sequence_memory: SequenceMemoryConfig,
    pub anomaly: AnomalyConfig,
}

impl PipelineConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.num_modules == 0 {
            return Err(SdrError::InvalidParameter(
                "grid.num_modules must be > 0".to_string(),
            ));
        }
        self.sequence_memory.validate()?;
        self.anomaly.validate()
    }
}
