//! Integration tests for descent runs.
//!
//! Covers path invariants, agreement with numerical gradients, seeded
//! reproducibility and loading runs from config files.

use std::fs;

use gd_core::{
    create, finite_diff_derivative, finite_diff_grad, max_grad_error, validate_domain, Bound,
    CoefficientScheme, Domain, GridResolution, Polynomial, SeparableSum,
};
use gd_descent::{create_descent_path, DemoConfig, DescentRunner, Scene};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Test Utilities
// ============================================================================

fn random_surface(seed: u64, degree: usize) -> SeparableSum {
    let mut rng = StdRng::seed_from_u64(seed);
    let scheme = CoefficientScheme::default();
    let p = create(degree, &scheme, &mut rng);
    let q = create(degree, &scheme, &mut rng);
    SeparableSum::new(p, q)
}

fn default_domain() -> Domain {
    validate_domain(&[Bound::Int(-2), Bound::Int(2)], 1.0).unwrap()
}

// ============================================================================
// Test: Path Invariants
// ============================================================================

#[test]
fn test_path_length_and_start_value() {
    let f = random_surface(1, 2);
    let domain = default_domain();
    let mut rng = StdRng::seed_from_u64(99);

    for steps in [0, 1, 5, 40] {
        let path = create_descent_path(&f, &domain, 0.02, steps, &mut rng);
        assert_eq!(path.len(), steps + 1);

        let start = path.start().unwrap();
        assert!(domain.contains(start.x) && domain.contains(start.y));
        assert_eq!(start.z, f.value(start.x, start.y));
    }
}

#[test]
fn test_each_step_follows_the_derivative() {
    let f = random_surface(2, 3);
    let rate = 0.02;
    let path = create_descent_path(&f, &default_domain(), rate, 25, &mut StdRng::seed_from_u64(4));

    let dp = f.poly_x().derivative();
    let dq = f.poly_y().derivative();

    for pair in path.points().windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        assert_eq!(next.x, prev.x - rate * dp.evaluate(prev.x));
        assert_eq!(next.y, prev.y - rate * dq.evaluate(prev.y));
        assert_eq!(next.z, f.value(next.x, next.y));
    }
}

#[test]
fn test_steps_agree_with_finite_differences() {
    eprintln!("\n=== Descent steps vs central differences ===");

    let f = random_surface(5, 4);
    let rate = 0.001;
    let path = create_descent_path(&f, &default_domain(), rate, 10, &mut StdRng::seed_from_u64(8));

    for (i, pair) in path.points().windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        let fd = finite_diff_grad(|v: &[f64]| f.value(v[0], v[1]), &[prev.x, prev.y], 1e-6);
        let taken = [(prev.x - next.x) / rate, (prev.y - next.y) / rate];
        let err = max_grad_error(&taken, &fd);
        eprintln!("  step {:2}: gradient error = {:.2e}", i + 1, err);
        assert!(err < 1e-4, "step {} gradient error {} too large", i + 1, err);
    }
}

#[test]
fn test_small_rate_decreases_convex_surface() {
    // Strictly convex, so a small enough rate lowers z every step
    let f = SeparableSum::new(
        Polynomial::new(vec![2.0, -1.0, 0.5]),
        Polynomial::new(vec![1.0, 3.0, -2.0]),
    );
    let path = DescentRunner::from_start(&f, 0.05, 60, 1.8, -1.9).run();

    for pair in path.points().windows(2) {
        assert!(pair[1].z <= pair[0].z);
    }

    // x* = 1/4, y* = -3/2
    let end = path.end().unwrap();
    assert!((end.x - 0.25).abs() < 1e-3);
    assert!((end.y + 1.5).abs() < 1e-2);
}

#[test]
fn test_too_large_rate_keeps_going() {
    eprintln!("\n=== Oversized learning rate ===");

    let f = SeparableSum::new(
        Polynomial::new(vec![1.0, 0.0, 0.0]),
        Polynomial::new(vec![1.0, 0.0, 0.0]),
    );
    let path = DescentRunner::from_start(&f, 1.2, 20, 1.0, 1.0).run();

    assert_eq!(path.len(), 21);
    let start = path.start().unwrap().z;
    let end = path.end().unwrap().z;
    eprintln!("  z: start = {:.3}, end = {:.3e}", start, end);
    assert!(end > start);
}

// ============================================================================
// Test: Derivatives
// ============================================================================

#[test]
fn test_random_derivatives_match_finite_differences() {
    let mut rng = StdRng::seed_from_u64(21);
    for degree in 0..6 {
        let p = create(degree, &CoefficientScheme::Integer { low: -5, high: 5 }, &mut rng);
        let d = p.derivative();
        for x in [-1.5, -0.2, 0.0, 0.7, 1.9] {
            let fd = finite_diff_derivative(&p, x, 1e-6);
            assert!((d.evaluate(x) - fd).abs() < 1e-4, "degree {} at x={}", degree, x);
        }
    }
}

// ============================================================================
// Test: Scenes and Configuration
// ============================================================================

#[test]
fn test_seeded_scene_is_reproducible() {
    let config = DemoConfig {
        seed: Some(1234),
        ..DemoConfig::default()
    };

    let a = Scene::build(&config, &mut config.rng()).unwrap();
    let b = Scene::build(&config, &mut config.rng()).unwrap();

    assert_eq!(a.poly_x, b.poly_x);
    assert_eq!(a.poly_y, b.poly_y);
    assert_eq!(a.path, b.path);
    assert_eq!(a.surface, b.surface);
}

#[test]
fn test_scene_surface_contains_path_polynomials() {
    let config = DemoConfig {
        resolution: GridResolution::Fixed { samples: 21 },
        seed: Some(5),
        ..DemoConfig::default()
    };
    let scene = Scene::build(&config, &mut config.rng()).unwrap();
    let f = SeparableSum::new(scene.poly_x.clone(), scene.poly_y.clone());

    for (i, row) in scene.surface.z.iter().enumerate() {
        for (j, &z) in row.iter().enumerate() {
            assert_eq!(z, f.value(scene.surface.xs[j], scene.surface.ys[i]));
        }
    }
    for p in &scene.path {
        assert_eq!(p.z, f.value(p.x, p.y));
    }
}

#[test]
fn test_integer_coefficient_scene() {
    let config = DemoConfig {
        degree_x: 3,
        degree_y: 1,
        coefficients: CoefficientScheme::Integer { low: -4, high: 5 },
        seed: Some(77),
        ..DemoConfig::default()
    };
    let scene = Scene::build(&config, &mut config.rng()).unwrap();

    assert_eq!(scene.poly_x.coefficients().len(), 4);
    assert_eq!(scene.poly_y.coefficients().len(), 2);
    for &c in scene.poly_x.coefficients().iter().chain(scene.poly_y.coefficients()) {
        assert_eq!(c, c.trunc());
    }
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    fs::write(
        &path,
        r#"{
            "degree_x": 4,
            "domain": [-3, 3],
            "learning_rate": 0.005,
            "steps": 8,
            "resolution": { "kind": "per_unit", "values_per_unit": 4 },
            "seed": 42
        }"#,
    )
    .unwrap();

    let config = DemoConfig::from_json_file(&path).unwrap();
    let scene = Scene::build(&config, &mut config.rng()).unwrap();

    assert_eq!(scene.poly_x.degree(), 4);
    assert_eq!(scene.path.len(), 9);
    assert_eq!(scene.surface.dimensions(), (25, 25));
}

#[test]
fn test_bad_domain_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "domain": [2, -2] }"#).unwrap();

    let config = DemoConfig::from_json_file(&path).unwrap();
    let err = Scene::build(&config, &mut config.rng()).unwrap_err();
    assert!(err.to_string().contains("strictly increasing"));
}

#[test]
fn test_oversized_grid_is_rejected_before_sampling() {
    let config = DemoConfig::from_json_str(r#"{ "domain": [-1e300, 1e300], "seed": 1 }"#).unwrap();
    let err = Scene::build(&config, &mut config.rng()).unwrap_err();
    assert!(err.to_string().contains("resolution"));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_path_has_steps_plus_one_points(
        seed in any::<u64>(),
        steps in 0usize..50,
        rate in 0.001f64..0.05,
    ) {
        let f = random_surface(seed, 2);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let path = create_descent_path(&f, &default_domain(), rate, steps, &mut rng);
        prop_assert_eq!(path.len(), steps + 1);
    }

    #[test]
    fn prop_start_point_inside_domain(seed in any::<u64>(), low in -50i64..0, width in 2i64..50) {
        let domain = validate_domain(&[Bound::Int(low), Bound::Int(low + width)], 1.0).unwrap();
        let f = random_surface(seed, 1);
        let path = create_descent_path(&f, &domain, 0.01, 0, &mut StdRng::seed_from_u64(seed));
        let start = path.start().unwrap();
        prop_assert!(domain.contains(start.x));
        prop_assert!(domain.contains(start.y));
    }
}
