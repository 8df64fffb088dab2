use std::time::Duration;

use euler_mc_shared::result::{ConvergenceReport, PricingResult};

pub fn print_result(result: &PricingResult, reference: f64, elapsed: Duration) {
    println!("\n========================================");
    println!("  Engine:         {}", result.engine);
    println!("  Seed:           {}", result.seed);
    println!("  Simulations:    {}", result.paths);
    println!("  Time:           {:.2}s", elapsed.as_secs_f64());
    println!("  Price:          {:.6}", result.price);
    println!("  95% interval:   +/- {:.6}", result.confidence_95());
    println!("  Std deviation:  {:.6}", result.standard_deviation);
    println!("  Std error:      {:.6}", result.standard_error);
    println!(
        "  Origin hits:    {} ({:.3}%)",
        result.degenerate_paths,
        100.0 * result.degenerate_fraction()
    );
    if result.invalid_paths > 0 {
        println!("  Excluded:       {} non-finite paths", result.invalid_paths);
    }
    println!("  Black-Scholes:  {:.6}", reference);
    println!("========================================");
}

pub fn print_convergence(report: &ConvergenceReport, reference: f64, elapsed: Duration) {
    println!("\n========================================");
    println!(
        "  {:>10}  {:>12}  {:>10}  {:>10}",
        "N", "price", "std err", "|error|"
    );
    for point in &report.points {
        println!(
            "  {:>10}  {:>12.6}  {:>10.6}  {:>10.6}",
            point.n_simulations,
            point.result.price,
            point.result.standard_error,
            (point.result.price - reference).abs(),
        );
    }

    let ratios = report.error_ratios();
    if !ratios.is_empty() {
        println!("\n  SE ratio between consecutive sizes (observed vs 1/sqrt(N)):");
        for (observed, expected) in ratios {
            println!("    {:.3} vs {:.3}", observed, expected);
        }
    }
    println!("\n  Black-Scholes:  {:.6}", reference);
    println!("  Time:           {:.2}s", elapsed.as_secs_f64());
    println!("========================================");
}
