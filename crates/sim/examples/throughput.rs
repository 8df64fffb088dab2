use euler_mc_shared::config::{OptionConfiguration, RunSettings};
use euler_mc_sim::bench;

fn main() {
    let config = OptionConfiguration::default();
    let settings = RunSettings::with_seed(42);

    println!(
        "Pricing {} paths x {} steps per engine...",
        config.n_simulations, settings.n_steps
    );
    let timings = bench::profile_engines(&config, &settings, 1_000_000).unwrap();

    println!("========================================");
    for t in &timings {
        println!(
            "  {:<20} {:>6.1}ns/draw  run {:>7.3}s  price {:.4} (se {:.4})",
            t.engine.description(),
            t.per_draw.as_nanos() as f64,
            t.run.as_secs_f64(),
            t.price,
            t.standard_error,
        );
    }
    println!("========================================");
}
