//! Two runs, same seed, same profile.
//! They must produce bit-identical series.

use benefits_core::{
    config::resolve,
    field::Field,
    generator::generate,
    rng::RngBank,
    series::YearlySeries,
};

fn bits(series: &YearlySeries) -> Vec<u64> {
    series
        .records()
        .iter()
        .flat_map(|r| r.values().iter().map(|v| v.to_bits()))
        .collect()
}

#[test]
fn same_seed_produces_identical_series() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    let profile = resolve("La Réunion");

    let a = generate(&profile, 2002, 2025, &RngBank::new(SEED)).expect("run a");
    let b = generate(&profile, 2002, 2025, &RngBank::new(SEED)).expect("run b");

    let (bits_a, bits_b) = (bits(&a), bits(&b));
    assert_eq!(bits_a.len(), bits_b.len());
    for (i, (x, y)) in bits_a.iter().zip(&bits_b).enumerate() {
        assert_eq!(x, y, "series diverged at cell {i}");
    }
}

#[test]
fn noiseless_runs_are_identical() {
    let profile = resolve("Mayotte");
    let a = generate(&profile, 2002, 2025, &RngBank::noiseless()).unwrap();
    let b = generate(&profile, 2002, 2025, &RngBank::noiseless()).unwrap();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn different_seeds_produce_different_series() {
    let profile = resolve("Guadeloupe");
    let a = generate(&profile, 2002, 2025, &RngBank::new(42)).unwrap();
    let b = generate(&profile, 2002, 2025, &RngBank::new(99)).unwrap();

    assert_ne!(
        a.column(Field::TotalRevenue),
        b.column(Field::TotalRevenue),
        "Different seeds produced identical revenue; seed is not being used"
    );
}

#[test]
fn field_streams_do_not_depend_on_profile() {
    // Noise draws are per field, so the ratio between two profiles'
    // values of the same field is the ratio of their closed forms.
    let a = generate(&resolve("Martinique"), 2002, 2025, &RngBank::new(5)).unwrap();
    let b = generate(&resolve("Saint-Barthélemy"), 2002, 2025, &RngBank::new(5)).unwrap();

    let ratio = a.get(2002, Field::OtherRevenue).unwrap() / b.get(2002, Field::OtherRevenue).unwrap();
    assert!((ratio - 420.0 / 45.0).abs() < 1e-9, "ratio {ratio}");
}
