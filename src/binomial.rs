// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Binomial Distribution Math
//
// Probability mass tables, exact two-sided p-values, quantiles and the
// Wilson score interval. Small trial counts use direct combinatorial
// products; larger ones go through ln Γ so nothing overflows.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest trial count evaluated with direct combinatorial products.
/// C(60, 30) ≈ 1.18e17 is still comfortably representable in f64.
pub const DIRECT_LIMIT: u32 = 60;

/// Relative slack when comparing pmf values against the observed one, so
/// that mathematically equal masses compare equal after rounding.
const RELATIVE_TOLERANCE: f64 = 1e-7;

/// Two-sided 95% standard normal quantile.
pub const Z_95: f64 = 1.959_963_984_540_054;

// ---------------------------------------------------------------------------
// PMF evaluation
// ---------------------------------------------------------------------------

/// How the probability mass table is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmfMethod {
    /// Binomial coefficients by running products.
    Direct,
    /// exp(ln C(n, k) + k ln p + (n - k) ln q).
    LogSpace,
}

impl PmfMethod {
    pub fn for_trials(n: u32) -> Self {
        if n <= DIRECT_LIMIT { Self::Direct } else { Self::LogSpace }
    }
}

/// P(X = i) for i in 0..=n under Binomial(n, p).
///
/// Both methods mirror the coefficient half-table so that, at p = 0.5,
/// entries i and n - i are bit-identical.
pub fn pmf_table(n: u32, p: f64, method: PmfMethod) -> Vec<f64> {
    let len = n as usize + 1;
    if p <= 0.0 {
        let mut table = vec![0.0; len];
        table[0] = 1.0;
        return table;
    }
    if p >= 1.0 {
        let mut table = vec![0.0; len];
        table[len - 1] = 1.0;
        return table;
    }

    match method {
        PmfMethod::Direct => direct_table(n, p),
        PmfMethod::LogSpace => log_space_table(n, p),
    }
}

fn direct_table(n: u32, p: f64) -> Vec<f64> {
    let q = 1.0 - p;
    let coefficients = mirrored_coefficients(n);
    coefficients
        .iter()
        .enumerate()
        .map(|(i, &c)| c * p.powi(i as i32) * q.powi((n as usize - i) as i32))
        .collect()
}

/// C(n, i) for every i, computed over the lower half and mirrored.
fn mirrored_coefficients(n: u32) -> Vec<f64> {
    let len = n as usize + 1;
    let mut table = vec![0.0; len];
    let mut coef = 1.0_f64;
    for i in 0..=(n / 2) {
        table[i as usize] = coef;
        table[(n - i) as usize] = coef;
        coef *= (n - i) as f64 / (i + 1) as f64;
    }
    table
}

fn log_space_table(n: u32, p: f64) -> Vec<f64> {
    let ln_p = p.ln();
    let ln_q = (1.0 - p).ln();
    (0..=n)
        .map(|i| {
            let tail = i as f64 * ln_p + (n - i) as f64 * ln_q;
            (ln_choose(n, i) + tail).exp()
        })
        .collect()
}

/// ln C(n, k), symmetric in k and n - k.
pub fn ln_choose(n: u32, k: u32) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    if k == 0 {
        return 0.0;
    }
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// Lanczos approximation of ln(Γ(x)) for x > 0.
#[allow(clippy::excessive_precision)]
pub fn ln_gamma(x: f64) -> f64 {
    // g = 7, n = 9
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = COEFFICIENTS[0];
    let t = x + 7.5;
    for (i, &coef) in COEFFICIENTS.iter().enumerate().skip(1) {
        acc += coef / (x + i as f64);
    }

    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

// ---------------------------------------------------------------------------
// Exact two-sided test
// ---------------------------------------------------------------------------

/// Two-sided exact binomial p-value for `k` successes in `n` trials.
///
/// Sums the mass of every count no more likely than the observed one
/// (minimum-likelihood definition). The result is clamped to [0, 1].
/// A count equal to the expected count n·p has p-value exactly 1.
pub fn two_sided_p_value(k: u32, n: u32, p: f64) -> f64 {
    two_sided_p_value_with(k, n, p, PmfMethod::for_trials(n))
}

pub fn two_sided_p_value_with(k: u32, n: u32, p: f64, method: PmfMethod) -> f64 {
    if k > n {
        return 0.0;
    }
    if k as f64 == n as f64 * p {
        return 1.0;
    }
    let table = pmf_table(n, p, method);
    let threshold = table[k as usize] * (1.0 + RELATIVE_TOLERANCE);
    let (included, excluded) = table.iter().fold((0.0_f64, 0.0_f64), |(inc, exc), &mass| {
        if mass <= threshold { (inc + mass, exc) } else { (inc, exc + mass) }
    });
    // Central counts: 1 - excluded is exactly 1.0 when nothing is excluded.
    let total = if included > 0.5 { 1.0 - excluded } else { included };
    total.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// CDF / quantiles
// ---------------------------------------------------------------------------

/// P(X <= k) under Binomial(n, p).
pub fn cdf(k: u32, n: u32, p: f64) -> f64 {
    let table = pmf_table(n, p, PmfMethod::for_trials(n));
    let upto = k.min(n) as usize;
    table[..=upto].iter().sum::<f64>().clamp(0.0, 1.0)
}

/// Smallest k with P(X <= k) >= q.
pub fn quantile(q: f64, n: u32, p: f64) -> u32 {
    let table = pmf_table(n, p, PmfMethod::for_trials(n));
    let mut running = 0.0;
    for (k, mass) in table.iter().enumerate() {
        running += mass;
        if running >= q {
            return k as u32;
        }
    }
    n
}

/// Central `level` range of success counts under Binomial(n, p).
pub fn central_count_range(n: u32, p: f64, level: f64) -> (u32, u32) {
    let tail = (1.0 - level) / 2.0;
    (quantile(tail, n, p), quantile(1.0 - tail, n, p))
}

// ---------------------------------------------------------------------------
// Wilson score interval
// ---------------------------------------------------------------------------

/// Wilson score interval for a success proportion, clamped to [0, 1].
///
/// Returns (0, 1) when there are no trials.
pub fn wilson_interval(successes: u32, trials: u32, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = trials as f64;
    let p_hat = successes as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;

    let center = (p_hat + z2 / (2.0 * n)) / denom;
    let margin = z * ((p_hat * (1.0 - p_hat) + z2 / (4.0 * n)) / n).sqrt() / denom;

    let lower = if successes == 0 { 0.0 } else { (center - margin).clamp(0.0, 1.0) };
    let upper = if successes >= trials { 1.0 } else { (center + margin).clamp(0.0, 1.0) };
    (lower, upper.max(lower))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
