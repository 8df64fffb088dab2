use euler_mc_rng::NormalSource;

use crate::model::PriceProcessModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOutcome {
    pub terminal: f64,
    /// The value was at or below zero after at least one step.
    pub touched_zero: bool,
}

impl PathOutcome {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.terminal.is_finite()
    }
}

/// Explicit Euler-Maruyama stepping of one path from 0 to expiry.
///
/// Negative values are neither clamped nor cut short; they keep evolving
/// under the same scheme and only the payoff floors at zero.
#[derive(Debug, Clone, Copy)]
pub struct PathSimulator {
    model: PriceProcessModel,
    spot: f64,
    n_steps: u32,
    step: f64,
    sqrt_step: f64,
}

impl PathSimulator {
    pub fn new(model: PriceProcessModel, spot: f64, expiry: f64, n_steps: u32) -> Self {
        let step = expiry / f64::from(n_steps);
        Self {
            model,
            spot,
            n_steps,
            step,
            sqrt_step: step.sqrt(),
        }
    }

    #[inline]
    pub fn n_steps(&self) -> u32 {
        self.n_steps
    }

    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step
    }

    /// Runs one path, drawing exactly one deviate per step.
    pub fn simulate<S: NormalSource + ?Sized>(&self, source: &mut S) -> PathOutcome {
        let mut v = self.spot;
        let mut t = 0.0;
        let mut touched_zero = false;

        for _ in 0..self.n_steps {
            let z = source.next_normal();
            v += self.step * self.model.drift(t, v)
                + self.sqrt_step * self.model.diffusion(t, v) * z;
            if v <= 0.0 {
                touched_zero = true;
            }
            t += self.step;
        }

        PathOutcome {
            terminal: v,
            touched_zero,
        }
    }
}

pub fn simulate<S: NormalSource + ?Sized>(
    model: &PriceProcessModel,
    source: &mut S,
    spot: f64,
    expiry: f64,
    n_steps: u32,
) -> PathOutcome {
    PathSimulator::new(*model, spot, expiry, n_steps).simulate(source)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Replays a fixed list of shocks, cycling when exhausted.
    pub(crate) struct ScriptedShocks {
        shocks: Vec<f64>,
        next: usize,
        pub(crate) draws: usize,
    }

    impl ScriptedShocks {
        pub(crate) fn new(shocks: Vec<f64>) -> Self {
            Self {
                shocks,
                next: 0,
                draws: 0,
            }
        }
    }

    impl NormalSource for ScriptedShocks {
        fn next_normal(&mut self) -> f64 {
            let z = self.shocks[self.next];
            self.next = (self.next + 1) % self.shocks.len();
            self.draws += 1;
            z
        }
    }

    #[test]
    fn test_zero_volatility_is_compound_growth() {
        let model = PriceProcessModel::new(0.08, 0.02, 0.0);
        let mut shocks = ScriptedShocks::new(vec![1.5, -0.3]);
        let outcome = simulate(&model, &mut shocks, 60.0, 0.5, 50);

        let k: f64 = 0.5 / 50.0;
        let expected = 60.0 * (1.0 + 0.06 * k).powi(50);
        assert_relative_eq!(outcome.terminal, expected, max_relative = 1e-12);
        assert!(!outcome.touched_zero);
        assert_eq!(shocks.draws, 50);
    }

    #[test]
    fn test_single_step_update() {
        let model = PriceProcessModel::new(0.1, 0.0, 0.2);
        let mut shocks = ScriptedShocks::new(vec![0.5]);
        let outcome = simulate(&model, &mut shocks, 100.0, 1.0, 1);
        // 100 + 1 * 0.1 * 100 + 1 * 0.2 * 100 * 0.5
        assert_relative_eq!(outcome.terminal, 120.0, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_values_propagate_unclamped() {
        let model = PriceProcessModel::new(0.0, 0.0, 1.0);
        // k = 0.25, sqrt(k) = 0.5: each step multiplies by (1 + 0.5 z)
        let mut shocks = ScriptedShocks::new(vec![-4.0, 0.0, 0.0, 0.0]);
        let outcome = simulate(&model, &mut shocks, 1.0, 1.0, 4);
        assert_relative_eq!(outcome.terminal, -1.0);
        assert!(outcome.touched_zero);
    }

    #[test]
    fn test_degeneracy_flag_sticks_after_recovery() {
        let model = PriceProcessModel::new(0.0, 0.0, 1.0);
        let mut shocks = ScriptedShocks::new(vec![-4.0, -4.0, 0.0, 0.0]);
        let outcome = simulate(&model, &mut shocks, 1.0, 1.0, 4);
        assert_relative_eq!(outcome.terminal, 1.0);
        assert!(outcome.touched_zero);
    }

    #[test]
    fn test_zero_expiry_keeps_spot() {
        let model = PriceProcessModel::new(0.05, 0.0, 0.4);
        let mut shocks = ScriptedShocks::new(vec![3.0]);
        let outcome = simulate(&model, &mut shocks, 42.0, 0.0, 10);
        assert_eq!(outcome.terminal, 42.0);
        assert_eq!(shocks.draws, 10);
    }

    #[test]
    fn test_overflow_is_detectable() {
        let model = PriceProcessModel::new(0.0, 0.0, 1e300);
        let mut shocks = ScriptedShocks::new(vec![1e10]);
        let outcome = simulate(&model, &mut shocks, 1e10, 1.0, 3);
        assert!(!outcome.is_finite());
    }
}
