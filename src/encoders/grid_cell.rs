//! Grid-cell position encoding.
//!
//! A [`GridCellUnit`] rotates, scales and offsets a position, then wraps it
//! onto a 4x4 torus and activates one or two of its 16 cells. A single unit
//! repeats every `4 * scale` units of distance, but many units with
//! unrelated rotations, scales and phases together behave like a residue
//! number system: the combined code stays unique over a very large range
//! while each unit remains cheap to evaluate.
//!
//! Randomness is injected: module parameters are drawn from a caller-owned
//! `Rng` (or a seeded `StdRng`) once, at construction, and never change.
//!
//! # Examples
//!
//! ```
//! use gridsdr::{Encoder, GridCellPopulationEncoder, Position};
//!
//! let encoder = GridCellPopulationEncoder::new(32, 7).unwrap();
//! let sdr = encoder.encode(Position::new(30.0, -1.0)).unwrap();
//!
//! assert_eq!(sdr.num_bits(), 512);
//! for m in 0..32 {
//!     let on = sdr.num_set_in(m * 16, 16);
//!     assert!(on == 1 || on == 2);
//! }
//! ```

use super::{Encoder, Position};
use crate::config::GridEncoderConfig;
use crate::{Result, Sdr, SdrError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Side length of the torus each module wraps positions onto.
pub const GRID_PERIOD: usize = 4;

const CELLS_PER_MODULE: usize = GRID_PERIOD * GRID_PERIOD;
const SCALE_MIN: f64 = 6.0;
const SCALE_MAX: f64 = 25.0;
// Above this every f64 is an integer and the cell phase is lost
const MAX_LATTICE_COORD: f64 = 4_503_599_627_370_496.0;

/// Geometric parameters of one grid module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridModuleParams {
    /// Rotation angle in radians
    pub theta: f64,
    /// Distance covered by one cell
    pub scale: f64,
    /// Phase offset in cell units, per axis
    pub bias: (f64, f64),
}

impl GridModuleParams {
    /// Draw `theta ~ U[0, 2pi)`, `scale ~ U[6, 25]`, `bias ~ U[0, 4)^2`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let period = GRID_PERIOD as f64;
        Self {
            theta: rng.gen_range(0.0..TAU),
            scale: rng.gen_range(SCALE_MIN..=SCALE_MAX),
            bias: (rng.gen_range(0.0..period), rng.gen_range(0.0..period)),
        }
    }

    fn validate(&self) -> Result<()> {
        let finite = self.theta.is_finite()
            && self.scale.is_finite()
            && self.bias.0.is_finite()
            && self.bias.1.is_finite();
        if !finite || self.scale <= 0.0 {
            return Err(SdrError::InvalidParameter(format!(
                "grid module needs finite parameters and a positive scale (got {:?})",
                self
            )));
        }
        Ok(())
    }
}

/// One periodic position-encoding module producing 16-bit patterns.
#[derive(Debug, Clone)]
pub struct GridCellUnit {
    params: GridModuleParams,
    // Row-major 2x2 rotation matrix R(theta)
    rotation: [[f64; 2]; 2],
}

impl GridCellUnit {
    /// Build a unit from explicit parameters.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if any parameter is non-finite or `scale <= 0`.
    pub fn with_params(params: GridModuleParams) -> Result<Self> {
        params.validate()?;
        let (sin, cos) = params.theta.sin_cos();
        Ok(Self {
            params,
            rotation: [[cos, -sin], [sin, cos]],
        })
    }

    /// Build a unit with parameters sampled from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let params = GridModuleParams::sample(rng);
        let (sin, cos) = params.theta.sin_cos();
        Self {
            params,
            rotation: [[cos, -sin], [sin, cos]],
        }
    }

    /// Get the module parameters.
    pub fn params(&self) -> &GridModuleParams {
        &self.params
    }

    /// Wrapped torus coordinate of `pos`, each axis in `[0, 4)`.
    pub fn grid_coord(&self, pos: Position) -> (f64, f64) {
        let (gx, gy) = self.lattice_coord(pos);
        let period = GRID_PERIOD as f64;
        (gx.rem_euclid(period), gy.rem_euclid(period))
    }

    /// Rotated, scaled and biased coordinate before wrapping.
    fn lattice_coord(&self, pos: Position) -> (f64, f64) {
        let [[a, b], [c, d]] = self.rotation;
        let gx = (a * pos.x + b * pos.y) / self.params.scale + self.params.bias.0;
        let gy = (c * pos.x + d * pos.y) / self.params.scale + self.params.bias.1;
        (gx, gy)
    }

    /// Flattened indices of the two active cells; they may coincide.
    ///
    /// The first cell truncates the torus coordinate, the second rounds it
    /// to the nearest integer (halves round up), both wrapped modulo 4.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the position is not finite, or lies so far out
    /// that its lattice coordinate overflows or no longer has a fractional
    /// part (magnitude of 2^52 or more).
    pub fn active_cells(&self, pos: Position) -> Result<[usize; 2]> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Err(SdrError::InvalidParameter(format!(
                "position must be finite (got {:?})",
                pos
            )));
        }
        let (lx, ly) = self.lattice_coord(pos);
        if !(lx.abs() < MAX_LATTICE_COORD && ly.abs() < MAX_LATTICE_COORD) {
            return Err(SdrError::InvalidParameter(format!(
                "position {:?} is out of range for a module of scale {}",
                pos, self.params.scale
            )));
        }
        let period = GRID_PERIOD as f64;
        let (gx, gy) = (lx.rem_euclid(period), ly.rem_euclid(period));
        // rem_euclid may round up to exactly 4.0, hence the extra wrap
        let wrap = |v: f64| (v as usize) % GRID_PERIOD;
        let nearest = wrap(gy.floor()) * GRID_PERIOD + wrap(gx.floor());
        let rounded = wrap(gy.round()) * GRID_PERIOD + wrap(gx.round());
        Ok([nearest, rounded])
    }
}

impl Encoder<Position> for GridCellUnit {
    fn encode(&self, pos: Position) -> Result<Sdr> {
        let mut sdr = Sdr::new(CELLS_PER_MODULE);
        for cell in self.active_cells(pos)? {
            sdr.set_bit(cell);
        }
        Ok(sdr)
    }

    fn encode_size(&self) -> usize {
        CELLS_PER_MODULE
    }
}

/// Many grid modules concatenated into one wide position code.
///
/// The module list is fixed after construction, so encoding is
/// deterministic for a given instance.
#[derive(Debug, Clone)]
pub struct GridCellPopulationEncoder {
    units: Vec<GridCellUnit>,
}

impl GridCellPopulationEncoder {
    /// Default number of modules.
    pub const DEFAULT_MODULES: usize = 32;

    /// Create `num_modules` units sampled from a `StdRng` seeded with `seed`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `num_modules == 0`.
    pub fn new(num_modules: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(num_modules, &mut rng)
    }

    /// Create `num_modules` units sampled from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(num_modules: usize, rng: &mut R) -> Result<Self> {
        let units = (0..num_modules).map(|_| GridCellUnit::random(rng)).collect();
        Self::from_units(units)
    }

    /// Wrap explicitly built units.
    pub fn from_units(units: Vec<GridCellUnit>) -> Result<Self> {
        if units.is_empty() {
            return Err(SdrError::InvalidParameter(
                "grid population needs at least one module".to_string(),
            ));
        }
        log::debug!("grid population encoder: {} modules", units.len());
        for (i, u) in units.iter().enumerate() {
            log::trace!("module {}: {:?}", i, u.params());
        }
        Ok(Self { units })
    }

    /// Build from configuration.
    pub fn from_config(config: &GridEncoderConfig) -> Result<Self> {
        Self::new(config.num_modules, config.seed)
    }

    /// Get number of modules.
    pub fn num_modules(&self) -> usize {
        self.units.len()
    }

    /// Get the modules, in output order.
    pub fn units(&self) -> &[GridCellUnit] {
        &self.units
    }
}

impl Default for GridCellPopulationEncoder {
    fn default() -> Self {
        let mut rng = StdRng::seed_from_u64(0);
        Self {
            units: (0..Self::DEFAULT_MODULES)
                .map(|_| GridCellUnit::random(&mut rng))
                .collect(),
        }
    }
}

impl Encoder<Position> for GridCellPopulationEncoder {
    fn encode(&self, pos: Position) -> Result<Sdr> {
        let mut sdr = Sdr::new(self.encode_size());
        for (m, unit) in self.units.iter().enumerate() {
            let offset = m * CELLS_PER_MODULE;
            for cell in unit.active_cells(pos)? {
                sdr.set_bit(offset + cell);
            }
        }
        Ok(sdr)
    }

    fn encode_size(&self) -> usize {
        self.units.len() * CELLS_PER_MODULE
    }
}
