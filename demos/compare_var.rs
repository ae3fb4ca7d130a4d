//! VaR comparison example
//!
//! Estimates Value at Risk for the same return series with all four
//! methods and prints them side by side.
//!
//! Run with: cargo run --example compare_var

use quant_risk::{EngineConfig, QuantEngine, RandomSource, ReturnSeries};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Value at Risk (VaR) Comparison ===\n");

    // 1. Build a synthetic close-price history (5 years of trading days)
    let mut rng = RandomSource::from_seed(2024);
    let mut price = 400.0;
    let mut prices = vec![price];
    for _ in 0..1260 {
        price *= 1.0 + 0.0004 + 0.012 * rng.next_normal();
        prices.push(price);
    }

    let series = ReturnSeries::from_prices(&prices);
    let moments = series.moments()?;
    println!("Sample returns statistics:");
    println!("  Mean return: {:.4}%", moments.mean * 100.0);
    println!("  Std deviation: {:.4}%", moments.std_dev * 100.0);
    println!("  Usable observations: {}", series.usable_count());
    println!();

    // 2. Engine with reproducible simulations
    let engine = QuantEngine::new(EngineConfig {
        var_simulations: 10_000,
        degrees_of_freedom: 5.0,
        seed: Some(42),
        ..Default::default()
    })?;

    // 3. Compare all methods at several confidence levels
    for &confidence_level in &[0.95, 0.99] {
        let comparison = engine.compare_var(&series, confidence_level)?;

        println!("--- VaR at {}% confidence ---", confidence_level * 100.0);
        println!("{:<24} {:>10}", "Method", "VaR");
        println!("{:-<35}", "");
        println!("{:<24} {:>10.4}", "Historical", comparison.historical.value);
        println!("{:<24} {:>10.4}", "Parametric", comparison.parametric.value);
        println!("{:<24} {:>10.4}", "Monte Carlo (Normal)", comparison.monte_carlo_normal.value);
        println!("{:<24} {:>10.4}", "Monte Carlo (Student-t)", comparison.monte_carlo_student_t.value);
        println!();
    }

    println!("=== Example Complete ===");

    Ok(())
}
