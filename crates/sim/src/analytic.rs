use euler_mc_shared::config::{OptionConfiguration, OptionKind};

use crate::aggregate::payoff;

pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

pub fn normal_cdf(x: f64) -> f64 {
    // Abramowitz & Stegun 7.1.26
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 {
        approx
    } else {
        1.0 - approx
    }
}

/// Closed-form Black-Scholes price with a continuous dividend yield.
///
/// With no time or no volatility the price collapses to the discounted
/// intrinsic value of the forward.
pub fn black_scholes(config: &OptionConfiguration) -> f64 {
    let OptionConfiguration {
        strike: k,
        expiry: t,
        rate: r,
        volatility: sigma,
        spot: s,
        dividend: d,
        kind,
        ..
    } = *config;

    let vol_sqrt_t = sigma * t.sqrt();
    if vol_sqrt_t <= 0.0 {
        let forward = s * ((r - d) * t).exp();
        return (-r * t).exp() * payoff(kind, k, forward);
    }

    let d1 = ((s / k).ln() + (r - d + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let df_spot = s * (-d * t).exp();
    let df_strike = k * (-r * t).exp();

    match kind {
        OptionKind::Call => df_spot * normal_cdf(d1) - df_strike * normal_cdf(d2),
        OptionKind::Put => df_strike * normal_cdf(-d2) - df_spot * normal_cdf(-d1),
    }
}
