//! Encoders - Turn positions, scalars and categories into binary patterns.
//!
//! Each encoder is configured once and then maps values to freshly allocated
//! [`Sdr`]s of a fixed width. Encoders hold no per-call state, so one
//! instance can be reused for any number of calls.

mod category_encoder;
mod grid_cell;
mod location_encoder;
mod scalar_encoder;

pub use category_encoder::{encode_category, CategoryEncoder};
pub use grid_cell::{GridCellPopulationEncoder, GridCellUnit, GridModuleParams, GRID_PERIOD};
pub use location_encoder::LocationEncoder;
pub use scalar_encoder::{encode_scalar, ScalarEncoder};

use crate::{Result, Sdr};
use serde::{Deserialize, Serialize};

/// A 2-D real-valued position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Capability shared by every encoder: one value in, one fixed-width pattern out.
pub trait Encoder<T> {
    /// Encode `value` into a new pattern of `encode_size()` bits.
    fn encode(&self, value: T) -> Result<Sdr>;

    /// Width of every pattern this encoder produces.
    fn encode_size(&self) -> usize;
}

impl<T, E: Encoder<T> + ?Sized> Encoder<T> for &E {
    fn encode(&self, value: T) -> Result<Sdr> {
        (**self).encode(value)
    }

    fn encode_size(&self) -> usize {
        (**self).encode_size()
    }
}
