use euler_mc_shared::config::{OptionConfiguration, OptionKind};

/// Terminal payoff of a European option, floored at zero.
#[inline]
pub fn payoff(kind: OptionKind, strike: f64, terminal: f64) -> f64 {
    match kind {
        OptionKind::Call => (terminal - strike).max(0.0),
        OptionKind::Put => (strike - terminal).max(0.0),
    }
}

/// Running sums over completed paths.
///
/// Merging is commutative, so per-worker partials can be combined in any
/// order; the engine merges them in worker order to stay bit-reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateStatistics {
    pub sum: f64,
    pub sum_sq: f64,
    pub paths: u64,
    pub degenerate_paths: u64,
    pub invalid_paths: u64,
}

/// Statistics derived once every path has been recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub price: f64,
    pub mean_payoff: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub standard_error: f64,
}

impl AggregateStatistics {
    pub fn merge(&mut self, other: &AggregateStatistics) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.paths += other.paths;
        self.degenerate_paths += other.degenerate_paths;
        self.invalid_paths += other.invalid_paths;
    }

    pub fn merged(mut self, other: &AggregateStatistics) -> Self {
        self.merge(other);
        self
    }

    /// Whether the running sums are still usable.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.sum.is_finite() && self.sum_sq.is_finite()
    }

    /// Returns `None` when no path was recorded or when the sums, merged from
    /// partials that were each finite, overflowed.
    pub fn summarize(&self, discount_factor: f64) -> Option<Summary> {
        if self.paths == 0 || !self.is_finite() {
            return None;
        }
        let n = self.paths as f64;
        let mean = self.sum / n;
        // cancellation can leave a tiny negative residue
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        if !variance.is_finite() {
            return None;
        }
        let standard_deviation = variance.sqrt();
        Some(Summary {
            price: discount_factor * mean,
            mean_payoff: mean,
            variance,
            standard_deviation,
            standard_error: standard_deviation / n.sqrt(),
        })
    }
}

/// Turns path outcomes into payoffs and accumulates them.
#[derive(Debug, Clone)]
pub struct PayoffAggregator {
    kind: OptionKind,
    strike: f64,
    stats: AggregateStatistics,
}

impl PayoffAggregator {
    pub fn new(config: &OptionConfiguration) -> Self {
        Self {
            kind: config.kind,
            strike: config.strike,
            stats: AggregateStatistics::default(),
        }
    }

    /// Records one completed path. Returns `false` when the path produced a
    /// non-finite value, or would push the running sums past `f64::MAX`, and
    /// was excluded from the sums.
    pub fn record_path(&mut self, terminal: f64, touched_zero: bool) -> bool {
        let value = payoff(self.kind, self.strike, terminal);
        let squared = value * value;
        let sum = self.stats.sum + value;
        let sum_sq = self.stats.sum_sq + squared;
        if !terminal.is_finite() || !sum.is_finite() || !sum_sq.is_finite() {
            self.stats.invalid_paths += 1;
            return false;
        }

        self.stats.sum = sum;
        self.stats.sum_sq = sum_sq;
        self.stats.paths += 1;
        if touched_zero {
            self.stats.degenerate_paths += 1;
        }
        true
    }

    #[inline]
    pub fn statistics(&self) -> &AggregateStatistics {
        &self.stats
    }

    pub fn into_statistics(self) -> AggregateStatistics {
        self.stats
    }
}
