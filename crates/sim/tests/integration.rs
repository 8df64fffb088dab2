use euler_mc_shared::config::{NumericPolicy, OptionConfiguration, OptionKind, RunSettings};
use euler_mc_shared::engine_type::EngineType;
use euler_mc_sim::analytic::black_scholes;
use euler_mc_sim::cancel::CancellationToken;
use euler_mc_sim::{PricingEngine, PricingError};

// Black-Scholes value of the benchmark put below.
const BENCHMARK_PUT: f64 = 5.846_282;

fn benchmark_put() -> OptionConfiguration {
    OptionConfiguration {
        strike: 65.0,
        expiry: 0.25,
        rate: 0.08,
        volatility: 0.3,
        spot: 60.0,
        dividend: 0.0,
        n_simulations: 50_000,
        kind: OptionKind::Put,
    }
}

fn seeded(seed: u64, workers: usize) -> RunSettings {
    RunSettings {
        n_steps: 100,
        n_workers: Some(workers),
        seed: Some(seed),
        numeric_policy: NumericPolicy::Exclude,
    }
}

#[test]
fn test_benchmark_put_matches_black_scholes() {
    let config = benchmark_put();
    assert!((black_scholes(&config) - BENCHMARK_PUT).abs() < 1e-4);

    for engine in EngineType::ALL {
        let result = PricingEngine::new(seeded(20_160_403, 4))
            .price(&config, engine)
            .unwrap();

        assert_eq!(result.paths, 50_000);
        assert_eq!(result.invalid_paths, 0);
        assert!(
            (result.price - BENCHMARK_PUT).abs() < 0.15,
            "{}: price {} too far from {}",
            engine,
            result.price,
            BENCHMARK_PUT
        );
        assert!(
            result.standard_deviation > 5.5 && result.standard_deviation < 7.0,
            "{}: sd {}",
            engine,
            result.standard_deviation
        );
        assert!(
            result.standard_error > 0.024 && result.standard_error < 0.032,
            "{}: se {}",
            engine,
            result.standard_error
        );
        // sigma * sqrt(T) = 0.15: a 60 spot never gets near zero
        assert_eq!(result.degenerate_paths, 0);
    }
}

#[test]
fn test_call_estimate_within_confidence_band() {
    let config = OptionConfiguration {
        kind: OptionKind::Call,
        n_simulations: 40_000,
        ..benchmark_put()
    };
    let result = PricingEngine::new(seeded(5, 2))
        .price(&config, EngineType::MersenneTwister)
        .unwrap();
    let reference = black_scholes(&config);
    assert!(
        (result.price - reference).abs() < 5.0 * result.standard_error + 0.01,
        "price {} vs {}",
        result.price,
        reference
    );
}

#[test]
fn test_worker_count_only_changes_streams() {
    let config = OptionConfiguration {
        n_simulations: 20_000,
        ..benchmark_put()
    };
    let one = PricingEngine::new(seeded(77, 1))
        .price(&config, EngineType::LaggedFibonacci)
        .unwrap();
    let many = PricingEngine::new(seeded(77, 5))
        .price(&config, EngineType::LaggedFibonacci)
        .unwrap();
    let again = PricingEngine::new(seeded(77, 5))
        .price(&config, EngineType::LaggedFibonacci)
        .unwrap();

    assert_eq!(many, again);
    assert_eq!(one.paths, many.paths);
    let band = 5.0 * (one.standard_error + many.standard_error);
    assert!((one.price - many.price).abs() < band);
}

#[test]
fn test_high_volatility_counts_degenerate_paths() {
    let config = OptionConfiguration {
        volatility: 3.0,
        expiry: 2.0,
        n_simulations: 5_000,
        ..benchmark_put()
    };
    let result = PricingEngine::new(RunSettings {
        n_steps: 4,
        ..seeded(8, 2)
    })
    .price(&config, EngineType::MersenneTwister)
    .unwrap();

    // coarse steps with sigma * sqrt(k) ~ 3 push many paths below zero
    assert!(result.degenerate_paths > 0);
    assert!(result.degenerate_paths <= result.paths);
    assert!(result.price.is_finite());
}

#[test]
fn test_cancellation_from_another_thread() {
    let config = OptionConfiguration {
        n_simulations: 5_000_000,
        ..benchmark_put()
    };
    let token = CancellationToken::new();
    let engine = PricingEngine::new(seeded(1, 2)).with_cancellation(token.clone());

    let handle = std::thread::spawn(move || engine.price(&config, EngineType::MersenneTwister));
    std::thread::sleep(std::time::Duration::from_millis(50));
    token.cancel();

    match handle.join().unwrap() {
        Err(PricingError::Cancelled { completed, requested }) => {
            assert!(completed < requested);
            assert_eq!(requested, 5_000_000);
        }
        Ok(result) => assert_eq!(result.paths, 5_000_000),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_engine_never_prices() {
    let err = PricingEngine::new(seeded(1, 1))
        .price(&benchmark_put(), EngineType::lookup("quantum"))
        .unwrap_err();
    assert!(matches!(err, PricingError::Configuration(_)));
}
