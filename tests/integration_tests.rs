//! Integration tests for VaR estimation and option pricing
//!
//! These tests verify end-to-end behaviour across the public API: reference
//! values, convergence of the Monte Carlo estimators, reproducibility and
//! the error taxonomy.

use approx::assert_relative_eq;
use proptest::prelude::*;
use quant_risk::stats::inverse_normal_cdf;
use quant_risk::{
    black_scholes_price, compute_var, historical_var, monte_carlo_normal_var, monte_carlo_price,
    monte_carlo_student_t_var, parametric_var, price_option, ErrorKind, OptionParams, OptionSide,
    PricingMethod, QuantEngine, RandomSource, ReturnSeries, VarMethod,
};

fn normal_series(mean: f64, std_dev: f64, len: usize, seed: u64) -> ReturnSeries {
    let mut rng = RandomSource::from_seed(seed);
    let mut draws = vec![0.0; len];
    rng.fill_normal(&mut draws);
    ReturnSeries::from_values(draws.into_iter().map(|z| mean + std_dev * z))
}

#[test]
fn test_historical_var_reference_list() {
    let series = ReturnSeries::from_values(vec![-0.05, -0.02, 0.00, 0.01, 0.03, 0.04]);
    let result = historical_var(&series, 0.95).unwrap();

    // rank = 0.05 * 5 = 0.25 between -0.05 and -0.02
    assert_relative_eq!(result.value, -0.0425, epsilon = 1e-12);
}

#[test]
fn test_parametric_var_against_independent_reference() {
    let returns = [0.012, -0.004, 0.007, -0.015, 0.003, 0.009, -0.011, 0.002];
    let series = ReturnSeries::from_values(returns.to_vec());

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let std_dev = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();

    // Φ⁻¹(0.95) and Φ⁻¹(0.99) to 16 significant digits
    let expected_95 = mean - 1.6448536269514722 * std_dev;
    let expected_99 = mean - 2.3263478740408408 * std_dev;

    assert_relative_eq!(parametric_var(&series, 0.95).unwrap().value, expected_95, epsilon = 1e-9);
    assert_relative_eq!(parametric_var(&series, 0.99).unwrap().value, expected_99, epsilon = 1e-9);
}

#[test]
fn test_monte_carlo_normal_var_converges_to_parametric() {
    let series = normal_series(0.0004, 0.012, 1_000, 2024);
    let parametric = parametric_var(&series, 0.95).unwrap().value;

    let mut errors = Vec::new();
    for simulations in [2_000, 200_000] {
        let mc = monte_carlo_normal_var(&series, 0.95, simulations, &mut RandomSource::from_seed(42))
            .unwrap()
            .value;
        errors.push((mc - parametric).abs());
    }

    assert!(errors[1] < 5e-4, "error at 200k draws: {}", errors[1]);
    assert!(errors[0] < 3e-3, "error at 2k draws: {}", errors[0]);
}

#[test]
fn test_student_t_var_is_more_conservative_for_small_df() {
    let series = normal_series(0.0, 0.01, 750, 11);

    let normal = monte_carlo_normal_var(&series, 0.99, 100_000, &mut RandomSource::from_seed(1))
        .unwrap()
        .value;
    let df_4 = monte_carlo_student_t_var(&series, 0.99, 100_000, 4.0, &mut RandomSource::from_seed(1))
        .unwrap()
        .value;
    let df_30 = monte_carlo_student_t_var(&series, 0.99, 100_000, 30.0, &mut RandomSource::from_seed(1))
        .unwrap()
        .value;

    assert!(df_4 < df_30);
    assert!(df_30 < normal + 1e-3);
}

#[test]
fn test_black_scholes_reference_values() {
    let call = OptionParams::call(100.0, 100.0, 0.05, 0.2, 1.0);
    let put = call.with_side(OptionSide::Put);

    let c = black_scholes_price(&call).unwrap().price;
    let p = black_scholes_price(&put).unwrap().price;

    assert_relative_eq!(c, 10.4506, epsilon = 1e-4);
    assert_relative_eq!(p, 5.5735, epsilon = 1e-4);
    assert_relative_eq!(c - p, 100.0 - 100.0 * (-0.05f64).exp(), epsilon = 1e-10);
}

#[test]
fn test_expired_options_price_at_intrinsic() {
    for (spot, strike) in [(50.0, 100.0), (100.0, 50.0), (73.25, 73.25), (1e-3, 1e3)] {
        let call = OptionParams::call(spot, strike, 0.04, 0.35, 0.0);
        let put = call.with_side(OptionSide::Put);

        assert_eq!(black_scholes_price(&call).unwrap().price, f64::max(spot - strike, 0.0));
        assert_eq!(black_scholes_price(&put).unwrap().price, f64::max(strike - spot, 0.0));
    }
}

#[test]
fn test_monte_carlo_error_shrinks_with_simulations() {
    let params = OptionParams::call(100.0, 100.0, 0.03, 0.2, 1.0);
    let analytic = black_scholes_price(&params).unwrap().price;

    let counts = [1_000, 10_000, 100_000];
    let mut mean_abs_error = [0.0; 3];
    let mut mean_std_error = [0.0; 3];

    for seed in 0..10u64 {
        for (i, &n) in counts.iter().enumerate() {
            let result = monte_carlo_price(&params, n, &mut RandomSource::from_seed(seed)).unwrap();
            mean_abs_error[i] += (result.price - analytic).abs() / 10.0;
            mean_std_error[i] += result.standard_error.unwrap() / 10.0;
        }
    }

    assert!(mean_abs_error[2] < mean_abs_error[0]);
    for i in 0..2 {
        assert!(mean_std_error[i + 1] < mean_std_error[i]);
        let ratio = mean_std_error[i] / mean_std_error[i + 1];
        assert!(ratio > 10f64.sqrt() * 0.85 && ratio < 10f64.sqrt() * 1.15, "ratio {}", ratio);
    }
}

#[test]
fn test_same_seed_bit_identical_results() {
    let series = normal_series(0.0, 0.02, 250, 5);
    let params = OptionParams::put(95.0, 100.0, 0.01, 0.3, 0.75);

    let methods = [
        VarMethod::MonteCarloNormal { simulations: 10_000 },
        VarMethod::MonteCarloStudentT {
            simulations: 10_000,
            degrees_of_freedom: 5.0,
        },
    ];
    for method in methods {
        let a = compute_var(&series, 0.99, method, Some(&mut RandomSource::from_seed(77))).unwrap();
        let b = compute_var(&series, 0.99, method, Some(&mut RandomSource::from_seed(77))).unwrap();
        let c = compute_var(&series, 0.99, method, Some(&mut RandomSource::from_seed(78))).unwrap();

        assert_eq!(a.value.to_bits(), b.value.to_bits());
        assert_ne!(a.value, c.value);
        // Different seeds still agree statistically
        assert!((a.value - c.value).abs() < 0.01);
    }

    let method = PricingMethod::MonteCarlo { simulations: 20_000 };
    let a = price_option(&params, method, Some(&mut RandomSource::from_seed(77))).unwrap();
    let b = price_option(&params, method, Some(&mut RandomSource::from_seed(77))).unwrap();
    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(
        a.standard_error.unwrap().to_bits(),
        b.standard_error.unwrap().to_bits()
    );
}

#[test]
fn test_independent_sources_across_threads() {
    let params = OptionParams::call(100.0, 105.0, 0.02, 0.25, 1.0);
    let sequential: Vec<f64> = (0..4u64)
        .map(|seed| monte_carlo_price(&params, 10_000, &mut RandomSource::from_seed(seed)).unwrap().price)
        .collect();

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                monte_carlo_price(&params, 10_000, &mut RandomSource::from_seed(seed))
                    .unwrap()
                    .price
            })
        })
        .collect();
    let threaded: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, threaded);
}

#[test]
fn test_error_taxonomy() {
    let series = ReturnSeries::from_values(vec![0.01, -0.02, 0.005]);
    let single = ReturnSeries::new(vec![None, Some(0.01), None]);
    let empty = ReturnSeries::new(vec![]);

    let cases = [
        (compute_var(&series, 1.0, VarMethod::Historical, None), ErrorKind::InvalidParameter),
        (
            compute_var(&series, 0.95, VarMethod::MonteCarloNormal { simulations: 0 }, None),
            ErrorKind::InvalidParameter,
        ),
        (
            compute_var(
                &series,
                0.95,
                VarMethod::MonteCarloStudentT {
                    simulations: 100,
                    degrees_of_freedom: 2.0,
                },
                None,
            ),
            ErrorKind::InvalidParameter,
        ),
        (compute_var(&empty, 0.95, VarMethod::Historical, None), ErrorKind::InsufficientData),
        (compute_var(&single, 0.95, VarMethod::Parametric, None), ErrorKind::InsufficientData),
    ];
    for (result, kind) in cases {
        assert_eq!(result.unwrap_err().kind(), kind);
    }

    assert!(compute_var(&single, 0.95, VarMethod::Historical, None).is_ok());

    let bad = OptionParams::call(100.0, 100.0, 0.03, 0.2, -1.0);
    assert_eq!(
        price_option(&bad, PricingMethod::Analytic, None).unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
}

#[test]
fn test_engine_end_to_end_from_prices() {
    let yaml = r#"
var_simulations: 50000
pricing_simulations: 100000
degrees_of_freedom: 5.0
seed: 42
batches: 2
"#;
    let engine = QuantEngine::from_yaml(yaml).unwrap();

    let mut price = 100.0;
    let mut prices = vec![price];
    let mut rng = RandomSource::from_seed(8);
    for _ in 0..400 {
        price *= 1.0 + 0.0003 + 0.011 * rng.next_normal();
        prices.push(price);
    }
    let series = ReturnSeries::from_prices(&prices);
    assert_eq!(series.missing_count(), 1);

    let var = engine.compare_var(&series, 0.95).unwrap();
    assert!(var.historical.value < 0.0);
    assert!(var.monte_carlo_student_t.value < var.monte_carlo_normal.value);

    let call = OptionParams::call(100.0, 100.0, 0.03, 0.2, 1.0);
    let prices = engine.compare_prices(&call).unwrap();
    assert!(prices.difference().abs() < 4.0 * prices.monte_carlo.standard_error.unwrap());
}

proptest! {
    #[test]
    fn prop_parametric_var_identity(
        returns in prop::collection::vec(-0.1f64..0.1, 2..60),
        confidence_level in 0.5f64..0.999,
    ) {
        let series = ReturnSeries::from_values(returns.clone());
        prop_assume!(series.moments().is_ok());

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let std_dev = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        let expected = mean - inverse_normal_cdf(confidence_level).unwrap() * std_dev;

        let value = parametric_var(&series, confidence_level).unwrap().value;
        prop_assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_historical_var_within_observed_range(
        returns in prop::collection::vec(-0.2f64..0.2, 1..80),
        confidence_level in 0.01f64..0.99,
    ) {
        let series = ReturnSeries::from_values(returns.clone());
        let value = historical_var(&series, confidence_level).unwrap().value;

        let min = returns.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = returns.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(value >= min - 1e-15 && value <= max + 1e-15);
    }

    #[test]
    fn prop_put_call_parity(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        rate in -0.02f64..0.1,
        volatility in 0.0f64..1.0,
        time_to_expiry in 0.0f64..5.0,
    ) {
        let call = OptionParams::call(spot, strike, rate, volatility, time_to_expiry);
        let put = call.with_side(OptionSide::Put);

        let c = black_scholes_price(&call).unwrap().price;
        let p = black_scholes_price(&put).unwrap().price;

        prop_assert!(c >= 0.0 && p >= 0.0);
        let parity = spot - strike * call.discount_factor();
        prop_assert!((c - p - parity).abs() < 1e-8 * spot.max(strike));
    }
}
