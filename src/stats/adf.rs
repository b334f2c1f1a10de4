//! Least-squares fit and Dickey-Fuller unit-root test.
//!
//! Cointegration is scored Engle-Granger style: regress one close series on
//! the other without an intercept, then test the residual spread for a unit
//! root. The test regression is `Δr_t = α + γ·r_{t-1} + ε`; under the null
//! (unit root) γ = 0, and a strongly negative t-statistic on γ rejects it.
//! The t-statistic is mapped to a p-value with MacKinnon's (1994) response
//! surface for the single-variable constant-only case, using the standard
//! normal CDF via `statrs` erf.

use statrs::function::erf::erf;

// MacKinnon (1994) response-surface coefficients, one variable, constant only.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALLP: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGEP: [f64; 4] = [1.7339, 0.93202, -0.12359, 0.027087];

const MIN_DENOM: f64 = 1e-12;

/// Slope of the no-intercept least-squares fit `y ≈ beta * x`.
/// NaN when `x` has no mass on the window.
pub fn ols_beta(y: &[f64], x: &[f64]) -> f64 {
    let n = y.len().min(x.len());
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for i in 0..n {
        sum_xy += x[i] * y[i];
        sum_xx += x[i] * x[i];
    }
    if sum_xx < MIN_DENOM {
        return f64::NAN;
    }
    sum_xy / sum_xx
}

/// Residuals of the no-intercept fit.
pub fn ols_residuals(y: &[f64], x: &[f64], beta: f64) -> Vec<f64> {
    y.iter().zip(x).map(|(&yi, &xi)| yi - beta * xi).collect()
}

/// Dickey-Fuller p-value for a unit root in `series`. Low values indicate a
/// stationary (mean-reverting) series. NaN for degenerate input.
pub fn unit_root_pvalue(series: &[f64]) -> f64 {
    if series.len() < 4 {
        return f64::NAN;
    }

    let n = series.len() - 1;
    let deltas: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let lagged = &series[..n];

    // Demeaning both sides is equivalent to including the constant term
    let n_f = n as f64;
    let mean_lag = lagged.iter().sum::<f64>() / n_f;
    let mean_delta = deltas.iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for i in 0..n {
        let x = lagged[i] - mean_lag;
        sxy += x * (deltas[i] - mean_delta);
        sxx += x * x;
    }
    if sxx < MIN_DENOM {
        return f64::NAN;
    }
    let gamma = sxy / sxx;

    let mut sse = 0.0;
    for i in 0..n {
        let predicted = mean_delta + gamma * (lagged[i] - mean_lag);
        let residual = deltas[i] - predicted;
        sse += residual * residual;
    }

    // Two estimated parameters: intercept and gamma
    let dof = n_f - 2.0;
    if dof <= 0.0 {
        return f64::NAN;
    }
    let se_gamma = (sse / dof / sxx).sqrt();
    if se_gamma < MIN_DENOM {
        return f64::NAN;
    }

    mackinnon_pvalue(gamma / se_gamma)
}

/// Engle-Granger cointegration p-value: OLS of `y` on `x`, then a unit-root
/// test on the residual spread.
pub fn engle_granger_pvalue(y: &[f64], x: &[f64]) -> f64 {
    let beta = ols_beta(y, x);
    if beta.is_nan() {
        return f64::NAN;
    }
    let spread = ols_residuals(y, x, beta);
    unit_root_pvalue(&spread)
}

/// MacKinnon response-surface approximation of the ADF p-value for a given
/// tau statistic. NaN tau propagates.
fn mackinnon_pvalue(tau: f64) -> f64 {
    if tau.is_nan() {
        return f64::NAN;
    }
    if tau > TAU_MAX {
        return 1.0;
    }
    if tau < TAU_MIN {
        return 0.0;
    }
    let z = if tau <= TAU_STAR {
        polyval(&TAU_SMALLP, tau)
    } else {
        polyval(&TAU_LARGEP, tau)
    };
    norm_cdf(z)
}

fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

/// Standard normal CDF: Φ(x) = 0.5 * (1 + erf(x / √2)).
fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / f64::sqrt(2.0)))
}
