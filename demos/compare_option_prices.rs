//! Option pricing example
//!
//! Prices an at-the-money European call and put analytically and by Monte
//! Carlo, then shows the standard error shrinking as simulations grow.
//!
//! Run with: cargo run --example compare_option_prices

use quant_risk::{
    black_scholes_price, monte_carlo_price, EngineConfig, OptionParams, OptionSide, QuantEngine,
    RandomSource,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Black-Scholes: Analytic vs Monte Carlo ===\n");

    let call = OptionParams::call(100.0, 100.0, 0.03, 0.2, 1.0);
    let put = call.with_side(OptionSide::Put);

    let engine = QuantEngine::new(EngineConfig {
        pricing_simulations: 100_000,
        seed: Some(42),
        batches: 4,
        ..Default::default()
    })?;

    for (label, params) in [("Call", &call), ("Put ", &put)] {
        let comparison = engine.compare_prices(params)?;
        println!("{} (BS): {:.4}", label, comparison.analytic.price);
        println!(
            "{} (MC): {:.4} ± {:.4}",
            label,
            comparison.monte_carlo.price,
            comparison.monte_carlo.standard_error.unwrap_or_default()
        );
    }
    println!();

    // Convergence of the simulated call price
    println!("--- Monte Carlo convergence (call) ---");
    println!("{:>10} {:>10} {:>10} {:>10}", "Paths", "Price", "Error", "Std Err");
    let analytic = black_scholes_price(&call)?.price;
    for &simulations in &[1_000, 10_000, 100_000, 1_000_000] {
        let result = monte_carlo_price(&call, simulations, &mut RandomSource::from_seed(42))?;
        println!(
            "{:>10} {:>10.4} {:>10.4} {:>10.4}",
            simulations,
            result.price,
            result.price - analytic,
            result.standard_error.unwrap_or_default()
        );
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
