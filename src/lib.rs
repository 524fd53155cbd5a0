//! Gridsdr - Grid-cell position encoding and SDR primitives
//!
//! Gridsdr turns continuous 2-D positions, scalars and categories into
//! **sparse distributed representations** (SDRs): fixed-width binary
//! patterns with a small fraction of bits on. It is the representation
//! layer of an online sequence-memory and anomaly-detection pipeline.
//!
//! # Architecture
//!
//! - **Sdr**: bitvec-backed fixed-width pattern with overlap counting
//! - **Encoders**: grid-cell population, scalar, category and location encoders
//! - **Utilities**: density, sparsify, anomaly score, categorize, softmax
//! - **PrototypeClassifier**: category inference by prototype overlap
//! - **Layer / SequenceMemory**: the compute/reset capability and an adapter
//!   for an externally supplied sequence-memory algorithm
//! - **AnomalyDetector**: encoder + layer + score history
//!
//! # Examples
//!
//! ```
//! use gridsdr::{Encoder, GridCellPopulationEncoder, Position};
//! use gridsdr::utils::{anomaly, density};
//!
//! let encoder = GridCellPopulationEncoder::new(32, 42).unwrap();
//! let a = encoder.encode(Position::new(100.0, 100.0)).unwrap();
//! let b = encoder.encode(Position::new(100.5, 100.0)).unwrap();
//!
//! assert_eq!(a.num_bits(), 512);
//! assert!(density(&a) <= 64.0 / 512.0);
//!
//! // Nearby positions share most of their active cells
//! assert!(anomaly(&b, &a).unwrap() < 0.5);
//! ```
//!
//! # Determinism
//!
//! All randomness is injected at construction (a seed or a caller-owned
//! `Rng`). Encoding never draws random numbers, so an encoder built from
//! the same seed always produces the same patterns.

pub mod anomaly_detector;
pub mod config;
pub mod encoders;
pub mod error;
pub mod layer;
pub mod prototype_classifier;
pub mod sdr;
pub mod sequence_memory;
pub mod utils;

pub use anomaly_detector::AnomalyDetector;
pub use encoders::{
    encode_category, encode_scalar, CategoryEncoder, Encoder, GridCellPopulationEncoder,
    GridCellUnit, GridModuleParams, LocationEncoder, Position, ScalarEncoder,
};
pub use error::{Result, SdrError};
pub use layer::{Layer, Sequential};
pub use prototype_classifier::PrototypeClassifier;
pub use sdr::Sdr;
pub use sequence_memory::{SequenceBackend, SequenceMemory};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Gridsdr";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
