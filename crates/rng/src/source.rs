use rand_core::{Error, RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, warn};

use euler_mc_shared::config::ConfigError;
use euler_mc_shared::engine_type::EngineType;

use crate::{LaggedFibonacci, MinStd, Mt19937};

/// Anything that can hand out standard normal deviates one at a time.
pub trait NormalSource {
    fn next_normal(&mut self) -> f64;
}

/// One of the supported uniform engines, dispatched statically.
#[derive(Debug, Clone)]
pub enum EngineRng {
    MersenneTwister(Mt19937),
    LaggedFibonacci(LaggedFibonacci),
    LinearCongruential(MinStd),
}

impl EngineRng {
    pub fn new(engine: EngineType, seed: u64) -> Result<Self, ConfigError> {
        match engine {
            EngineType::MersenneTwister => Ok(Self::MersenneTwister(Mt19937::seed_from_u64(seed))),
            EngineType::LaggedFibonacci => {
                Ok(Self::LaggedFibonacci(LaggedFibonacci::seed_from_u64(seed)))
            }
            EngineType::LinearCongruential => {
                Ok(Self::LinearCongruential(MinStd::seed_from_u64(seed)))
            }
            EngineType::Unknown => Err(ConfigError::UnknownEngine {
                requested: engine.description().to_string(),
            }),
        }
    }

    pub fn engine(&self) -> EngineType {
        match self {
            Self::MersenneTwister(_) => EngineType::MersenneTwister,
            Self::LaggedFibonacci(_) => EngineType::LaggedFibonacci,
            Self::LinearCongruential(_) => EngineType::LinearCongruential,
        }
    }
}

impl RngCore for EngineRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::MersenneTwister(rng) => rng.next_u32(),
            Self::LaggedFibonacci(rng) => rng.next_u32(),
            Self::LinearCongruential(rng) => rng.next_u32(),
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        match self {
            Self::MersenneTwister(rng) => rng.next_u64(),
            Self::LaggedFibonacci(rng) => rng.next_u64(),
            Self::LinearCongruential(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Self::MersenneTwister(rng) => rng.fill_bytes(dest),
            Self::LaggedFibonacci(rng) => rng.fill_bytes(dest),
            Self::LinearCongruential(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Standard normal deviates drawn from a privately owned engine.
///
/// Not `Sync`-shared: each worker builds and owns its own source.
#[derive(Debug, Clone)]
pub struct NormalVariateSource {
    rng: EngineRng,
    seed: u64,
}

impl NormalVariateSource {
    pub fn new(engine: EngineType, seed: u64) -> Result<Self, ConfigError> {
        let rng = EngineRng::new(engine, seed)?;
        Ok(Self { rng, seed })
    }

    pub fn engine(&self) -> EngineType {
        self.rng.engine()
    }

    pub fn description(&self) -> &'static str {
        self.engine().description()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NormalSource for NormalVariateSource {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Builds a seeded normal source for `engine` and reports the engine
/// description actually used.
pub fn build(
    engine: EngineType,
    seed: u64,
) -> Result<(NormalVariateSource, &'static str), ConfigError> {
    match NormalVariateSource::new(engine, seed) {
        Ok(source) => {
            let desc = source.description();
            debug!(engine = desc, seed, "built normal source");
            Ok((source, desc))
        }
        Err(err) => {
            warn!(%err, "refusing to build normal source");
            Err(err)
        }
    }
}
