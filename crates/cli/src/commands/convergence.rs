use euler_mc_shared::config::{OptionConfiguration, RunSettings};
use euler_mc_sim::analytic::black_scholes;
use euler_mc_sim::runner;

use super::resolve_engine;
use crate::output;

pub fn run(
    config: OptionConfiguration,
    settings: RunSettings,
    engine: &str,
    sizes: &[u64],
) -> anyhow::Result<()> {
    if sizes.is_empty() {
        anyhow::bail!("--sizes needs at least one simulation count");
    }
    if sizes.contains(&0) {
        anyhow::bail!("simulation counts must be at least 1");
    }
    let engine = resolve_engine(engine);

    println!(
        "Running convergence study with {} ({} sizes, {} steps each)...",
        engine,
        sizes.len(),
        settings.n_steps
    );

    let start = std::time::Instant::now();
    let report = runner::convergence(&config, engine, &settings, sizes)?;
    let elapsed = start.elapsed();

    output::print_convergence(&report, black_scholes(&config), elapsed);
    Ok(())
}
