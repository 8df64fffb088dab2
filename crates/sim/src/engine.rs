use rayon::prelude::*;
use tracing::{debug, info, warn};

use euler_mc_rng::{NormalSource, NormalVariateSource};
use euler_mc_shared::config::{
    derive_worker_seed, entropy_seed, ConfigError, NumericPolicy, OptionConfiguration,
    RunSettings, MAX_AUTO_WORKERS,
};
use euler_mc_shared::engine_type::EngineType;
use euler_mc_shared::result::PricingResult;

use crate::aggregate::{AggregateStatistics, PayoffAggregator};
use crate::cancel::CancellationToken;
use crate::model::PriceProcessModel;
use crate::path::PathSimulator;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("non-finite payoff statistics: {invalid_paths} invalid of {completed} completed paths")]
    NumericOverflow { invalid_paths: u64, completed: u64 },
    #[error("run cancelled after {completed} of {requested} paths")]
    Cancelled { completed: u64, requested: u64 },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Prices `config` with the default run settings and `n_steps` time steps.
pub fn price(
    config: &OptionConfiguration,
    engine: EngineType,
    n_steps: u32,
) -> Result<PricingResult, PricingError> {
    let settings = RunSettings {
        n_steps,
        ..RunSettings::default()
    };
    PricingEngine::new(settings).price(config, engine)
}

#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    settings: RunSettings,
    cancel: Option<CancellationToken>,
}

struct WorkerJob {
    index: usize,
    n_paths: u64,
    source: NormalVariateSource,
}

struct WorkerReport {
    stats: AggregateStatistics,
    completed: u64,
    cancelled: bool,
    overflowed: bool,
}

impl PricingEngine {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Number of partitions the paths are split into.
    pub fn worker_count(&self, n_simulations: u64) -> usize {
        let requested = self
            .settings
            .n_workers
            .filter(|&n| n > 0)
            .unwrap_or_else(|| rayon::current_num_threads().min(MAX_AUTO_WORKERS));
        let cap = usize::try_from(n_simulations).unwrap_or(usize::MAX);
        requested.clamp(1, cap.max(1))
    }

    pub fn price(
        &self,
        config: &OptionConfiguration,
        engine: EngineType,
    ) -> Result<PricingResult, PricingError> {
        config.validate()?;
        self.settings.validate()?;
        if !engine.is_known() {
            warn!(engine = %engine, "no random engine for selector");
            return Err(ConfigError::UnknownEngine {
                requested: engine.description().to_string(),
            }
            .into());
        }

        let run_seed = self.settings.seed.unwrap_or_else(entropy_seed);
        let n_workers = self.worker_count(config.n_simulations);
        let jobs = partition(config.n_simulations, n_workers)
            .into_iter()
            .enumerate()
            .map(|(index, n_paths)| {
                let seed = derive_worker_seed(run_seed, index);
                let (source, _) = euler_mc_rng::build(engine, seed)?;
                Ok(WorkerJob {
                    index,
                    n_paths,
                    source,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        info!(
            engine = %engine,
            n_simulations = config.n_simulations,
            n_steps = self.settings.n_steps,
            n_workers,
            seed = run_seed,
            "starting pricing run"
        );

        let model = PriceProcessModel::from_config(config);
        let simulator =
            PathSimulator::new(model, config.spot, config.expiry, self.settings.n_steps);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .build()?;

        let reports: Vec<WorkerReport> = pool.install(|| {
            jobs.into_par_iter()
                .map(|job| self.run_worker(config, &simulator, job))
                .collect()
        });

        let completed: u64 = reports.iter().map(|r| r.completed).sum();
        if reports.iter().any(|r| r.cancelled) {
            info!(completed, requested = config.n_simulations, "pricing run cancelled");
            return Err(PricingError::Cancelled {
                completed,
                requested: config.n_simulations,
            });
        }

        let stats = reports
            .iter()
            .fold(AggregateStatistics::default(), |acc, r| acc.merged(&r.stats));

        if reports.iter().any(|r| r.overflowed) {
            warn!(
                invalid_paths = stats.invalid_paths,
                completed, "non-finite path under strict policy"
            );
            return Err(PricingError::NumericOverflow {
                invalid_paths: stats.invalid_paths,
                completed,
            });
        }

        if stats.invalid_paths > 0 {
            warn!(
                invalid_paths = stats.invalid_paths,
                "excluded paths with non-finite values"
            );
        }

        let summary = stats
            .summarize(config.discount_factor())
            .ok_or(PricingError::NumericOverflow {
                invalid_paths: stats.invalid_paths,
                completed,
            })?;

        info!(
            price = summary.price,
            standard_error = summary.standard_error,
            degenerate_paths = stats.degenerate_paths,
            "pricing run finished"
        );

        Ok(PricingResult {
            price: summary.price,
            standard_deviation: summary.standard_deviation,
            standard_error: summary.standard_error,
            degenerate_paths: stats.degenerate_paths,
            paths: stats.paths,
            invalid_paths: stats.invalid_paths,
            engine: engine.description().to_string(),
            seed: run_seed,
        })
    }

    fn run_worker(
        &self,
        config: &OptionConfiguration,
        simulator: &PathSimulator,
        job: WorkerJob,
    ) -> WorkerReport {
        let WorkerJob {
            index,
            n_paths,
            mut source,
        } = job;
        let mut aggregator = PayoffAggregator::new(config);
        let mut completed = 0u64;
        let mut cancelled = false;
        let mut overflowed = false;

        for _ in 0..n_paths {
            if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
                cancelled = true;
                break;
            }
            let outcome = simulator.simulate(&mut source);
            let accepted = aggregator.record_path(outcome.terminal, outcome.touched_zero);
            completed += 1;

            if !accepted {
                debug!(
                    worker = index,
                    path = completed,
                    terminal = outcome.terminal,
                    "non-finite path"
                );
                if self.settings.numeric_policy == NumericPolicy::Fail {
                    overflowed = true;
                    break;
                }
            }
        }

        debug!(
            worker = index,
            completed,
            seed = source.seed(),
            cancelled,
            overflowed,
            "worker finished"
        );
        WorkerReport {
            stats: aggregator.into_statistics(),
            completed,
            cancelled,
            overflowed,
        }
    }
}

/// Splits `n` paths into `workers` contiguous chunks whose sizes differ by at
/// most one.
pub fn partition(n: u64, workers: usize) -> Vec<u64> {
    let workers = workers.max(1) as u64;
    let base = n / workers;
    let extra = n % workers;
    (0..workers)
        .map(|i| base + u64::from(i < extra))
        .collect()
}

/// Simulates `n_paths` paths on a single caller-supplied source.
///
/// Useful when the caller owns the generator (tests, custom engines).
pub fn simulate_with_source<S: NormalSource + ?Sized>(
    config: &OptionConfiguration,
    source: &mut S,
    n_steps: u32,
    n_paths: u64,
) -> AggregateStatistics {
    let model = PriceProcessModel::from_config(config);
    let simulator = PathSimulator::new(model, config.spot, config.expiry, n_steps);
    let mut aggregator = PayoffAggregator::new(config);
    for _ in 0..n_paths {
        let outcome = simulator.simulate(source);
        aggregator.record_path(outcome.terminal, outcome.touched_zero);
    }
    aggregator.into_statistics()
}
