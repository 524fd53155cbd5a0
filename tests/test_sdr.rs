//! Tests for the Sdr pattern type.

use gridsdr::Sdr;

#[test]
fn test_construction_views_agree() {
    let bools = [true, false, false, true, true, false, false, false, true];
    let a = Sdr::from_bools(&bools);
    let b = Sdr::from_acts(9, &[0, 3, 4, 8]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_bools(), bools.to_vec());
    assert_eq!(a.iter_acts().collect::<Vec<_>>(), a.get_acts());
}

#[test]
fn test_equality_requires_same_width() {
    assert_ne!(Sdr::new(8), Sdr::new(9));
    assert_eq!(Sdr::new(40), Sdr::new(40));
}

#[test]
fn test_bitwise_operators() {
    let a = Sdr::from_acts(70, &[1, 33, 65]).unwrap();
    let b = Sdr::from_acts(70, &[33, 65, 69]).unwrap();
    assert_eq!((&a & &b).get_acts(), vec![33, 65]);
    assert_eq!((&a | &b).get_acts(), vec![1, 33, 65, 69]);
    assert_eq!((&(!&b) & &a).get_acts(), vec![1]);
}

#[test]
fn test_concat_crosses_word_boundaries() {
    let a = Sdr::from_acts(20, &[0, 19]).unwrap();
    let b = Sdr::from_acts(20, &[5]).unwrap();
    let c = Sdr::concat([&a, &b, &a]);
    assert_eq!(c.num_bits(), 60);
    assert_eq!(c.get_acts(), vec![0, 19, 25, 40, 59]);
}

#[test]
fn test_overlap_width_check() {
    let a = Sdr::new(16);
    let b = Sdr::new(32);
    assert!(a.num_similar(&b).is_err());
    assert!(a.num_missing_from(&b).is_err());
}

#[test]
fn test_clear_all() {
    let mut sdr = Sdr::from_acts(50, &[3, 30, 49]).unwrap();
    sdr.clear_all();
    assert_eq!(sdr.num_set(), 0);
    assert_eq!(sdr, Sdr::new(50));
}
