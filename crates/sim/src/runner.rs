use rayon::prelude::*;
use tracing::info;

use euler_mc_shared::config::{
    derive_worker_seed, entropy_seed, OptionConfiguration, RunSettings, MAX_AUTO_WORKERS,
};
use euler_mc_shared::engine_type::EngineType;
use euler_mc_shared::result::{ConvergencePoint, ConvergenceReport, PricingResult};

use crate::engine::{PricingEngine, PricingError};

/// Prices many configurations side by side, one single-threaded run each.
///
/// Job `i` is seeded from the run seed and its position, so results do not
/// depend on how the pool schedules the jobs.
pub fn run_batch(
    configs: Vec<OptionConfiguration>,
    engine: EngineType,
    settings: &RunSettings,
) -> Result<Vec<PricingResult>, PricingError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(
            settings
                .n_workers
                .filter(|&n| n > 0)
                .unwrap_or_else(|| rayon::current_num_threads().min(MAX_AUTO_WORKERS)),
        )
        .build()?;
    let base_seed = settings.seed.unwrap_or_else(entropy_seed);

    pool.install(|| {
        configs
            .par_iter()
            .enumerate()
            .map(|(i, config)| {
                let job_settings = RunSettings {
                    n_workers: Some(1),
                    seed: Some(derive_worker_seed(base_seed, i)),
                    ..settings.clone()
                };
                PricingEngine::new(job_settings).price(config, engine)
            })
            .collect()
    })
}

/// Prices the same option at each simulation count in `sizes` to show how the
/// standard error shrinks with N.
pub fn convergence(
    config: &OptionConfiguration,
    engine: EngineType,
    settings: &RunSettings,
    sizes: &[u64],
) -> Result<ConvergenceReport, PricingError> {
    let configs: Vec<_> = sizes
        .iter()
        .map(|&n| OptionConfiguration {
            n_simulations: n,
            ..config.clone()
        })
        .collect();

    info!(sizes = ?sizes, engine = %engine, "running convergence study");
    let results = run_batch(configs, engine, settings)?;
    let points = sizes
        .iter()
        .zip(results)
        .map(|(&n_simulations, result)| ConvergencePoint {
            n_simulations,
            result,
        })
        .collect();
    Ok(ConvergenceReport::from_points(points))
}
