/// Outcome of one pricing run.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Population standard deviation of the undiscounted payoff.
    pub standard_deviation: f64,
    pub standard_error: f64,
    /// Paths whose value reached zero or below at some step.
    pub degenerate_paths: u64,
    /// Paths that contributed to the statistics.
    pub paths: u64,
    /// Paths dropped because they produced a non-finite value.
    pub invalid_paths: u64,
    /// Description of the engine that generated the shocks.
    pub engine: String,
    /// Run seed the worker seeds were derived from.
    pub seed: u64,
}

impl PricingResult {
    /// Half-width of the 95% confidence interval around the price.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.standard_error
    }

    pub fn degenerate_fraction(&self) -> f64 {
        if self.paths == 0 {
            0.0
        } else {
            self.degenerate_paths as f64 / self.paths as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvergencePoint {
    pub n_simulations: u64,
    pub result: PricingResult,
}

#[derive(Debug, Clone)]
pub struct ConvergenceReport {
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceReport {
    pub fn from_points(mut points: Vec<ConvergencePoint>) -> Self {
        points.sort_by_key(|p| p.n_simulations);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ratio of consecutive standard errors next to the 1/sqrt(N) prediction.
    pub fn error_ratios(&self) -> Vec<(f64, f64)> {
        self.points
            .windows(2)
            .map(|w| {
                let observed = w[1].result.standard_error / w[0].result.standard_error;
                let expected = (w[0].n_simulations as f64 / w[1].n_simulations as f64).sqrt();
                (observed, expected)
            })
            .collect()
    }
}
