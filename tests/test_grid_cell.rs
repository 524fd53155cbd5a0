//! Tests for grid-cell position encoding.
//!
//! Tests cover:
//! - Output width and per-module activity for any position
//! - Torus periodicity of a single module
//! - Reproducibility from a seed and from an injected Rng
//! - Locality: nearby positions share cells, distant ones mostly do not

use gridsdr::{Encoder, GridCellPopulationEncoder, GridCellUnit, GridModuleParams, Position, Sdr};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn module_counts(sdr: &Sdr) -> Vec<usize> {
    (0..sdr.num_bits() / 16)
        .map(|m| sdr.num_set_in(m * 16, 16))
        .collect()
}

/// Distance from `v` to the nearest integer or half-integer.
fn boundary_distance(v: f64) -> f64 {
    let f = v.fract();
    [f, (f - 0.5).abs(), 1.0 - f]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_reference_position_scenario() {
    let encoder = GridCellPopulationEncoder::new(32, 0).unwrap();
    let sdr = encoder.encode(Position::new(30.0, -1.0)).unwrap();

    assert_eq!(sdr.num_bits(), 512);
    assert_eq!(encoder.encode_size(), 512);
    for count in module_counts(&sdr) {
        assert!(count == 1 || count == 2, "module has {} active cells", count);
    }
}

#[test]
fn test_unit_encode_size() {
    let mut rng = StdRng::seed_from_u64(1);
    let unit = GridCellUnit::random(&mut rng);
    assert_eq!(unit.encode_size(), 16);
    assert_eq!(unit.encode(Position::new(3.0, 4.0)).unwrap().num_bits(), 16);
}

#[test]
fn test_injected_rng_reproducible() {
    let mut r1 = StdRng::seed_from_u64(99);
    let mut r2 = StdRng::seed_from_u64(99);
    let a = GridCellPopulationEncoder::from_rng(16, &mut r1).unwrap();
    let b = GridCellPopulationEncoder::from_rng(16, &mut r2).unwrap();

    for u in 0..16 {
        assert_eq!(a.units()[u].params(), b.units()[u].params());
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = GridCellPopulationEncoder::new(32, 1).unwrap();
    let b = GridCellPopulationEncoder::new(32, 2).unwrap();
    let p = Position::new(250.0, 410.0);
    assert_ne!(a.encode(p).unwrap(), b.encode(p).unwrap());
}

#[test]
fn test_explicit_module_periodicity() {
    let params = GridModuleParams {
        theta: 0.0,
        scale: 10.0,
        bias: (0.3, 0.3),
    };
    let unit = GridCellUnit::with_params(params).unwrap();
    let base = unit.encode(Position::new(1.0, 1.0)).unwrap();

    for k in -3..=3 {
        let shifted = Position::new(1.0 + 40.0 * k as f64, 1.0);
        assert_eq!(unit.encode(shifted).unwrap(), base);
        let shifted = Position::new(1.0, 1.0 + 40.0 * k as f64);
        assert_eq!(unit.encode(shifted).unwrap(), base);
    }
}

#[test]
fn test_far_positions_rejected() {
    let encoder = GridCellPopulationEncoder::new(32, 0).unwrap();
    assert!(encoder.encode(Position::new(1e308, 1e308)).is_err());
    assert!(encoder.encode(Position::new(-1e308, 0.0)).is_err());
    assert!(encoder.encode(Position::new(f64::NAN, 0.0)).is_err());
}

#[test]
fn test_locality() {
    let encoder = GridCellPopulationEncoder::new(32, 5).unwrap();
    let a = encoder.encode(Position::new(400.0, 300.0)).unwrap();
    let near = encoder.encode(Position::new(400.2, 300.1)).unwrap();
    let far = encoder.encode(Position::new(650.0, 20.0)).unwrap();

    let near_overlap = a.num_similar(&near).unwrap();
    let far_overlap = a.num_similar(&far).unwrap();
    assert!(
        near_overlap > far_overlap,
        "near overlap {} should exceed far overlap {}",
        near_overlap,
        far_overlap
    );
}

proptest! {
    #[test]
    fn prop_population_shape(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        modules in 1usize..64,
        seed in any::<u64>(),
    ) {
        let encoder = GridCellPopulationEncoder::new(modules, seed).unwrap();
        let sdr = encoder.encode(Position::new(x, y)).unwrap();
        prop_assert_eq!(sdr.num_bits(), 16 * modules);
        for count in module_counts(&sdr) {
            prop_assert!(count == 1 || count == 2);
        }
    }

    #[test]
    fn prop_unit_periodicity(
        theta in 0.0f64..std::f64::consts::TAU,
        scale in 6.0f64..25.0,
        bx in 0.0f64..4.0,
        by in 0.0f64..4.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        k in -5i32..=5,
    ) {
        let unit = GridCellUnit::with_params(GridModuleParams { theta, scale, bias: (bx, by) }).unwrap();
        let p = Position::new(x, y);
        let (gx, gy) = unit.grid_coord(p);
        // Skip positions sitting on a cell edge, where rounding noise decides the cell
        prop_assume!(boundary_distance(gx) > 1e-6 && boundary_distance(gy) > 1e-6);

        let (sin, cos) = theta.sin_cos();
        let k = k as f64;
        // R^-1 (4, 0) and R^-1 (0, 4), scaled
        let along_x = Position::new(x + k * scale * 4.0 * cos, y - k * scale * 4.0 * sin);
        let along_y = Position::new(x + k * scale * 4.0 * sin, y + k * scale * 4.0 * cos);

        let base = unit.encode(p).unwrap();
        prop_assert_eq!(unit.encode(along_x).unwrap(), base.clone());
        prop_assert_eq!(unit.encode(along_y).unwrap(), base);
    }
}
