use std::time::{Duration, Instant};

use euler_mc_rng::{NormalSource, NormalVariateSource};
use euler_mc_shared::config::{OptionConfiguration, RunSettings};
use euler_mc_shared::engine_type::EngineType;

use crate::engine::{PricingEngine, PricingError};

#[derive(Debug, Clone)]
pub struct EngineTiming {
    pub engine: EngineType,
    /// Time to draw one normal deviate.
    pub per_draw: Duration,
    /// Wall time of a full pricing run.
    pub run: Duration,
    pub price: f64,
    pub standard_error: f64,
}

/// Times raw deviate generation and a full pricing run for every engine.
pub fn profile_engines(
    config: &OptionConfiguration,
    settings: &RunSettings,
    draws: u32,
) -> Result<Vec<EngineTiming>, PricingError> {
    EngineType::ALL
        .into_iter()
        .map(|engine| {
            let mut source = NormalVariateSource::new(engine, settings.seed.unwrap_or(0))?;
            // warmup
            for _ in 0..1_000 {
                std::hint::black_box(source.next_normal());
            }
            let start = Instant::now();
            for _ in 0..draws {
                std::hint::black_box(source.next_normal());
            }
            let per_draw = start.elapsed() / draws.max(1);

            let start = Instant::now();
            let result = PricingEngine::new(settings.clone()).price(config, engine)?;
            let run = start.elapsed();

            Ok(EngineTiming {
                engine,
                per_draw,
                run,
                price: result.price,
                standard_error: result.standard_error,
            })
        })
        .collect()
}
