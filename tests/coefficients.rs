use std::f64::consts::PI;

use fourierplot::data::coefficients::*;

#[test]
fn x_squared_a0_matches_known_coefficient() {
    let t = compute_coefficients("x*x", MAX_TERMS, 2.0 * PI);
    let expected = 2.0 * PI * PI / 3.0;
    assert!(
        (t.a0 - expected).abs() < 0.1,
        "a0 = {}, expected ≈ {}",
        t.a0,
        expected
    );
    // aₙ of x² on [-π, π] is 4(-1)ⁿ/n²; check the sign pattern and rough size.
    let (a1, b1) = t.harmonic(1).unwrap();
    let (a2, _) = t.harmonic(2).unwrap();
    assert!((a1 + 4.0).abs() < 0.2, "a1 = {a1}");
    assert!((a2 - 1.0).abs() < 0.2, "a2 = {a2}");
    assert!(b1.abs() < 0.1, "even function should have tiny b1, got {b1}");
}

#[test]
fn sine_has_a_single_harmonic() {
    let t = compute_coefficients("sin(x)", MAX_TERMS, 2.0 * PI);
    let (a1, b1) = t.harmonic(1).unwrap();
    assert!((b1 - 1.0).abs() < 1e-3, "b1 = {b1}");
    assert!(a1.abs() < 1e-3);
    assert!(t.a0.abs() < 1e-3);
    let (a3, b3) = t.harmonic(3).unwrap();
    assert!(a3.abs() < 1e-3 && b3.abs() < 1e-3);
}

#[test]
fn table_always_has_requested_size() {
    let t = compute_coefficients("x", 100, 2.0 * PI);
    assert_eq!(t.len(), 100);
    assert_eq!(t.an.len(), 100);
    assert_eq!(t.bn.len(), 100);
    assert!(t.harmonic(0).is_none());
    assert!(t.harmonic(100).is_some());
    assert!(t.harmonic(101).is_none());
}

#[test]
fn bad_expressions_degrade_to_zero_table() {
    for expr in ["1/0", "nope(x)", "", "sqrt(-1)"] {
        let t = compute_coefficients(expr, MAX_TERMS, 2.0 * PI);
        assert_eq!(t.a0, 0.0, "{expr}");
        assert!(t.an.iter().all(|v| *v == 0.0), "{expr}");
        assert!(t.bn.iter().all(|v| *v == 0.0), "{expr}");
        assert_eq!(t.len(), MAX_TERMS);
    }
}

#[test]
fn non_finite_points_contribute_zero() {
    // 1/x fails only at the sample that lands on 0 (if any); the rest stays finite.
    let t = compute_coefficients("1/x", 10, 2.0 * PI);
    assert!(t.a0.is_finite());
    assert!(t.an.iter().chain(t.bn.iter()).all(|v| v.is_finite()));
}

#[test]
fn cache_recomputes_only_on_key_change() {
    let mut cache = CoefficientCache::new();
    assert!(cache.cached().is_none());
    let a0 = cache.get_or_compute("x*x", DEFAULT_PERIOD).a0;
    cache.get_or_compute("x*x", DEFAULT_PERIOD);
    cache.get_or_compute("x*x", DEFAULT_PERIOD);
    assert_eq!(cache.recompute_count(), 1);
    assert_eq!(cache.cached().unwrap().a0, a0);

    cache.get_or_compute("abs(x)", DEFAULT_PERIOD);
    assert_eq!(cache.recompute_count(), 2);
    cache.get_or_compute("abs(x)", 4.0);
    assert_eq!(cache.recompute_count(), 3);

    cache.invalidate();
    assert!(cache.cached().is_none());
    cache.get_or_compute("abs(x)", 4.0);
    assert_eq!(cache.recompute_count(), 4);
}
