use euler_mc_shared::config::OptionConfiguration;

/// Coefficients of the risk-neutral price process
/// `dS = (r - D) S dt + sigma S dW`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceProcessModel {
    carry: f64,
    volatility: f64,
}

impl PriceProcessModel {
    pub fn new(rate: f64, dividend: f64, volatility: f64) -> Self {
        Self {
            carry: rate - dividend,
            volatility,
        }
    }

    pub fn from_config(config: &OptionConfiguration) -> Self {
        Self::new(config.rate, config.dividend, config.volatility)
    }

    /// `t` is unused: the coefficients are time-homogeneous.
    #[inline]
    pub fn drift(&self, _t: f64, s: f64) -> f64 {
        self.carry * s
    }

    #[inline]
    pub fn diffusion(&self, _t: f64, s: f64) -> f64 {
        self.volatility * s
    }
}
