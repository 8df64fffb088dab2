use std::fmt;

use rand::RngCore;
use rand_pcg::Pcg64;

// Baseline option parameters
pub const BASELINE_STRIKE: f64 = 100.0;
pub const BASELINE_EXPIRY: f64 = 0.25;
pub const BASELINE_RATE: f64 = 0.1;
pub const BASELINE_VOLATILITY: f64 = 0.1;
pub const BASELINE_SPOT: f64 = 110.0;
pub const BASELINE_DIVIDEND: f64 = 0.0;
pub const BASELINE_SIMS: u64 = 100_000;

// Baseline run parameters
pub const BASELINE_STEPS: u32 = 100;
pub const MAX_AUTO_WORKERS: usize = 8;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be {requirement}, got {value}")]
    InvalidField {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("number of simulations must be at least 1")]
    ZeroSimulations,
    #[error("number of time steps must be at least 1")]
    ZeroSteps,
    #[error("option type must be 1 (call) or -1 (put), got {0}")]
    InvalidOptionType(i32),
    #[error("no random engine matches {requested:?}")]
    UnknownEngine { requested: String },
    #[error("missing field {0}")]
    Missing(&'static str),
}

/// Every field-level error found while building a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Maps the conventional sign encoding (1 = call, -1 = put).
    pub fn from_sign(sign: i32) -> Result<Self, ConfigError> {
        match sign {
            1 => Ok(OptionKind::Call),
            -1 => Ok(OptionKind::Put),
            other => Err(ConfigError::InvalidOptionType(other)),
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            OptionKind::Call => 1,
            OptionKind::Put => -1,
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => f.write_str("Call"),
            OptionKind::Put => f.write_str("Put"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionConfiguration {
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    pub volatility: f64,
    pub spot: f64,
    pub dividend: f64,
    pub n_simulations: u64,
    pub kind: OptionKind,
}

impl Default for OptionConfiguration {
    fn default() -> Self {
        Self {
            strike: BASELINE_STRIKE,
            expiry: BASELINE_EXPIRY,
            rate: BASELINE_RATE,
            volatility: BASELINE_VOLATILITY,
            spot: BASELINE_SPOT,
            dividend: BASELINE_DIVIDEND,
            n_simulations: BASELINE_SIMS,
            kind: OptionKind::Call,
        }
    }
}

impl OptionConfiguration {
    pub fn builder() -> OptionConfigurationBuilder {
        OptionConfigurationBuilder::default()
    }

    /// Returns the first violated field constraint, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.violations().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn violations(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check(&mut errors, "strike", "finite and > 0", self.strike, |v| v > 0.0);
        check(&mut errors, "expiry", "finite and >= 0", self.expiry, |v| v >= 0.0);
        check(&mut errors, "rate", "finite and >= 0", self.rate, |v| v >= 0.0);
        check(&mut errors, "volatility", "finite and >= 0", self.volatility, |v| v >= 0.0);
        check(&mut errors, "spot", "finite and > 0", self.spot, |v| v > 0.0);
        check(&mut errors, "dividend", "finite and >= 0", self.dividend, |v| v >= 0.0);
        if self.n_simulations == 0 {
            errors.push(ConfigError::ZeroSimulations);
        }
        errors
    }

    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}

fn check(
    errors: &mut Vec<ConfigError>,
    field: &'static str,
    requirement: &'static str,
    value: f64,
    ok: impl Fn(f64) -> bool,
) {
    if !value.is_finite() || !ok(value) {
        errors.push(ConfigError::InvalidField {
            field,
            requirement,
            value,
        });
    }
}

/// Collects option fields one at a time and validates them together.
///
/// Unset fields are reported as [`ConfigError::Missing`] unless the builder
/// was seeded from the baseline with [`OptionConfigurationBuilder::baseline`].
#[derive(Debug, Clone, Default)]
pub struct OptionConfigurationBuilder {
    strike: Option<f64>,
    expiry: Option<f64>,
    rate: Option<f64>,
    volatility: Option<f64>,
    spot: Option<f64>,
    dividend: Option<f64>,
    n_simulations: Option<u64>,
    kind: Option<OptionKind>,
    errors: Vec<ConfigError>,
}

impl OptionConfigurationBuilder {
    pub fn baseline() -> Self {
        let base = OptionConfiguration::default();
        Self {
            strike: Some(base.strike),
            expiry: Some(base.expiry),
            rate: Some(base.rate),
            volatility: Some(base.volatility),
            spot: Some(base.spot),
            dividend: Some(base.dividend),
            n_simulations: Some(base.n_simulations),
            kind: Some(base.kind),
            errors: Vec::new(),
        }
    }

    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    pub fn expiry(mut self, expiry: f64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    pub fn dividend(mut self, dividend: f64) -> Self {
        self.dividend = Some(dividend);
        self
    }

    pub fn n_simulations(mut self, n: u64) -> Self {
        self.n_simulations = Some(n);
        self
    }

    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the kind from its sign encoding, recording an error for anything
    /// other than 1 or -1.
    pub fn kind_sign(mut self, sign: i32) -> Self {
        match OptionKind::from_sign(sign) {
            Ok(kind) => self.kind = Some(kind),
            Err(err) => {
                self.kind = None;
                self.errors.push(err);
            }
        }
        self
    }

    pub fn build(self) -> Result<OptionConfiguration, ConfigErrors> {
        let mut errors = self.errors;
        let kind_reported = errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidOptionType(_)));

        let mut require = |value: Option<f64>, name: &'static str| {
            value.unwrap_or_else(|| {
                errors.push(ConfigError::Missing(name));
                f64::NAN
            })
        };
        let strike = require(self.strike, "strike");
        let expiry = require(self.expiry, "expiry");
        let rate = require(self.rate, "rate");
        let volatility = require(self.volatility, "volatility");
        let spot = require(self.spot, "spot");
        let dividend = require(self.dividend, "dividend");

        let n_simulations = match self.n_simulations {
            Some(n) => n,
            None => {
                errors.push(ConfigError::Missing("n_simulations"));
                1
            }
        };
        let kind = match self.kind {
            Some(kind) => kind,
            None => {
                if !kind_reported {
                    errors.push(ConfigError::Missing("kind"));
                }
                OptionKind::Call
            }
        };

        let config = OptionConfiguration {
            strike,
            expiry,
            rate,
            volatility,
            spot,
            dividend,
            n_simulations,
            kind,
        };

        // Missing fields are NaN placeholders and already reported.
        for err in config.violations() {
            let placeholder =
                matches!(err, ConfigError::InvalidField { value, .. } if value.is_nan());
            let field_missing = match &err {
                ConfigError::InvalidField { field, .. } => errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::Missing(name) if name == field)),
                _ => false,
            };
            if !(placeholder && field_missing) {
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigErrors(errors))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Drop non-finite paths from the aggregate and count them.
    #[default]
    Exclude,
    /// Abort the run on the first non-finite path.
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub n_steps: u32,
    pub n_workers: Option<usize>,
    pub seed: Option<u64>,
    pub numeric_policy: NumericPolicy,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            n_steps: BASELINE_STEPS,
            n_workers: None,
            seed: None,
            numeric_policy: NumericPolicy::Exclude,
        }
    }
}

impl RunSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(())
    }
}

/// Derives the seed of one worker's generator from the run seed.
///
/// Each worker index selects a distinct PCG stream, so streams never overlap
/// even when run seeds are adjacent.
pub fn derive_worker_seed(run_seed: u64, worker_index: usize) -> u64 {
    let mut rng = Pcg64::new(run_seed as u128, worker_index as u128);
    rng.next_u64()
}

/// Fresh high-entropy run seed for callers that did not pin one.
pub fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OptionConfiguration::default().validate().is_ok());
        assert!(RunSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let config = OptionConfiguration {
            strike: 0.0,
            ..OptionConfiguration::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { field: "strike", .. })
        ));

        let config = OptionConfiguration {
            volatility: f64::NAN,
            ..OptionConfiguration::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { field: "volatility", .. })
        ));

        let config = OptionConfiguration {
            n_simulations: 0,
            ..OptionConfiguration::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSimulations));
    }

    #[test]
    fn test_zero_expiry_is_allowed() {
        let config = OptionConfiguration {
            expiry: 0.0,
            ..OptionConfiguration::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.discount_factor(), 1.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let settings = RunSettings {
            n_steps: 0,
            ..RunSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroSteps));
    }

    #[test]
    fn test_builder_complete() {
        let config = OptionConfiguration::builder()
            .strike(65.0)
            .expiry(0.25)
            .rate(0.08)
            .volatility(0.3)
            .spot(60.0)
            .dividend(0.0)
            .n_simulations(50_000)
            .kind_sign(-1)
            .build()
            .unwrap();
        assert_eq!(config.kind, OptionKind::Put);
        assert_eq!(config.strike, 65.0);
        assert_eq!(config.n_simulations, 50_000);
    }

    #[test]
    fn test_builder_collects_every_error() {
        let errors = OptionConfiguration::builder()
            .strike(-1.0)
            .expiry(0.25)
            .rate(-0.5)
            .volatility(0.2)
            .dividend(0.0)
            .n_simulations(0)
            .kind_sign(3)
            .build()
            .unwrap_err();

        let errs = &errors.0;
        assert!(errs.contains(&ConfigError::InvalidOptionType(3)));
        assert!(errs.contains(&ConfigError::Missing("spot")));
        assert!(errs.contains(&ConfigError::ZeroSimulations));
        assert!(errs
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidField { field: "strike", .. })));
        assert!(errs
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidField { field: "rate", .. })));
        // missing spot is reported once, not again as an invalid value
        assert!(!errs
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidField { field: "spot", .. })));
        assert!(!errs.contains(&ConfigError::Missing("kind")));
        assert_eq!(errs.len(), 5);
    }

    #[test]
    fn test_builder_baseline_overrides() {
        let config = OptionConfigurationBuilder::baseline()
            .kind(OptionKind::Put)
            .spot(95.0)
            .build()
            .unwrap();
        assert_eq!(config.kind, OptionKind::Put);
        assert_eq!(config.spot, 95.0);
        assert_eq!(config.strike, BASELINE_STRIKE);
    }

    #[test]
    fn test_errors_display_joined() {
        let errors = ConfigErrors(vec![ConfigError::ZeroSimulations, ConfigError::ZeroSteps]);
        let text = errors.to_string();
        assert!(text.contains("simulations"));
        assert!(text.contains("; "));
    }

    #[test]
    fn test_option_kind_sign() {
        assert_eq!(OptionKind::from_sign(1), Ok(OptionKind::Call));
        assert_eq!(OptionKind::from_sign(-1), Ok(OptionKind::Put));
        assert_eq!(OptionKind::from_sign(0), Err(ConfigError::InvalidOptionType(0)));
        assert_eq!(OptionKind::Put.sign(), -1);
    }

    #[test]
    fn test_worker_seeds_are_deterministic_and_distinct() {
        assert_eq!(derive_worker_seed(42, 0), derive_worker_seed(42, 0));
        assert_ne!(derive_worker_seed(42, 0), derive_worker_seed(42, 1));
        assert_ne!(derive_worker_seed(42, 0), derive_worker_seed(43, 0));
    }
}
