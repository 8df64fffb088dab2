use euler_mc_shared::config::{OptionConfiguration, RunSettings};
use euler_mc_sim::analytic::black_scholes;
use euler_mc_sim::PricingEngine;

use super::resolve_engine;
use crate::output;

pub fn run(config: OptionConfiguration, settings: RunSettings, engine: &str) -> anyhow::Result<()> {
    let engine = resolve_engine(engine);

    println!(
        "Pricing {} {} ({} simulations, {} steps each)...",
        config.kind, engine, config.n_simulations, settings.n_steps,
    );

    let start = std::time::Instant::now();
    let result = PricingEngine::new(settings).price(&config, engine)?;
    let elapsed = start.elapsed();

    output::print_result(&result, black_scholes(&config), elapsed);
    Ok(())
}
