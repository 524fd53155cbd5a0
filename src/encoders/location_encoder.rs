//! LocationEncoder - Position encoding from two independent scalar codes.
//!
//! A simpler alternative to the grid population: x and y are each encoded
//! with a [`ScalarEncoder`] over a bounded canvas and the two patterns are
//! concatenated, x first. Resolution is limited to the canvas, and positions
//! outside it clamp to the edge.

use super::{Encoder, Position, ScalarEncoder};
use crate::config::LocationEncoderConfig;
use crate::{Result, Sdr};

/// Encodes a position as `[scalar(x) | scalar(y)]`.
#[derive(Debug, Clone)]
pub struct LocationEncoder {
    x: ScalarEncoder,
    y: ScalarEncoder,
}

impl LocationEncoder {
    /// Create from one scalar encoder per axis.
    pub fn new(x: ScalarEncoder, y: ScalarEncoder) -> Self {
        Self { x, y }
    }

    /// Build from configuration.
    pub fn from_config(config: &LocationEncoderConfig) -> Result<Self> {
        let x = ScalarEncoder::new(
            config.x_range.0,
            config.x_range.1,
            config.run_length,
            config.total_length,
        )?;
        let y = ScalarEncoder::new(
            config.y_range.0,
            config.y_range.1,
            config.run_length,
            config.total_length,
        )?;
        Ok(Self::new(x, y))
    }

    pub fn x_encoder(&self) -> &ScalarEncoder {
        &self.x
    }

    pub fn y_encoder(&self) -> &ScalarEncoder {
        &self.y
    }
}

impl Encoder<Position> for LocationEncoder {
    fn encode(&self, pos: Position) -> Result<Sdr> {
        let x = self.x.encode(pos.x)?;
        let y = self.y.encode(pos.y)?;
        Ok(Sdr::concat([&x, &y]))
    }

    fn encode_size(&self) -> usize {
        self.x.encode_size() + self.y.encode_size()
    }
}
