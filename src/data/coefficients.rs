//! Coefficient engine: numerically estimated Fourier coefficients of a custom expression.
//!
//! The function is treated as periodic with half-period `L = period / 2` and sampled
//! at a fixed [`SAMPLE_STEP`] over `[-L, L)`. The coefficients are left-rectangle
//! (Riemann) sums of the usual Fourier integrals:
//!
//! ```text
//! a0 = (1/L) · step · Σ f(xᵢ)
//! aₙ = (1/L) · step · Σ f(xᵢ) · cos(nπxᵢ/L)
//! bₙ = (1/L) · step · Σ f(xᵢ) · sin(nπxᵢ/L)
//! ```
//!
//! Accuracy is bounded by the step, which is good enough for visualization. A full
//! table costs `samples × MAX_TERMS` trigonometric evaluations, so tables are memoized
//! in [`CoefficientCache`] and only recomputed when the expression or period changes.

use std::f64::consts::PI;
use std::time::Instant;

use super::expression::Expression;

/// Harmonics computed per table, independent of the displayed term count.
pub const MAX_TERMS: usize = 100;

/// Spacing between samples of the integrand, in data units.
pub const SAMPLE_STEP: f64 = 0.02;

/// Period assumed for custom expressions.
pub const DEFAULT_PERIOD: f64 = 2.0 * PI;

/// Estimated coefficients `a0`, `a1..aN`, `b1..bN`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoefficientTable {
    pub a0: f64,
    /// `an[k]` holds the coefficient of harmonic `k + 1`.
    pub an: Vec<f64>,
    /// `bn[k]` holds the coefficient of harmonic `k + 1`.
    pub bn: Vec<f64>,
}

impl CoefficientTable {
    /// A table of `n_max` zero harmonics; the result for an unusable expression.
    pub fn zeros(n_max: usize) -> Self {
        Self {
            a0: 0.0,
            an: vec![0.0; n_max],
            bn: vec![0.0; n_max],
        }
    }

    /// Number of harmonics stored.
    pub fn len(&self) -> usize {
        self.an.len().min(self.bn.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(aₙ, bₙ)` for harmonic `n >= 1`.
    pub fn harmonic(&self, n: usize) -> Option<(f64, f64)> {
        if n == 0 || n > self.len() {
            return None;
        }
        Some((self.an[n - 1], self.bn[n - 1]))
    }
}

/// Sample points `xᵢ = -L + i·step` with `xᵢ < L`.
fn sample_points(half_period: f64, step: f64) -> impl Iterator<Item = f64> {
    (0usize..)
        .map(move |i| -half_period + i as f64 * step)
        .take_while(move |x| *x < half_period)
}

/// Estimate the coefficient table of `expression` for the given `period`.
///
/// Unparseable expressions and non-finite samples contribute zero, so the result
/// degrades towards a flat approximation instead of failing.
pub fn compute_coefficients(expression: &str, n_max: usize, period: f64) -> CoefficientTable {
    let started = Instant::now();
    let half = period / 2.0;
    if !(half.is_finite() && half > 0.0) {
        log::warn!("invalid period {period}, using zero coefficients");
        return CoefficientTable::zeros(n_max);
    }
    let expr = match Expression::parse(expression) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("expression '{expression}' does not parse ({e}); approximating as 0");
            return CoefficientTable::zeros(n_max);
        }
    };

    let samples: Vec<(f64, f64)> = sample_points(half, SAMPLE_STEP)
        .map(|x| {
            let v = expr.value_at(x);
            (x, if v.is_finite() { v } else { 0.0 })
        })
        .collect();

    let scale = SAMPLE_STEP / half;
    let a0 = scale * samples.iter().map(|(_, f)| f).sum::<f64>();
    let mut an = Vec::with_capacity(n_max);
    let mut bn = Vec::with_capacity(n_max);
    for n in 1..=n_max {
        let k = n as f64 * PI / half;
        let (mut sa, mut sb) = (0.0, 0.0);
        for &(x, f) in &samples {
            let (s, c) = (k * x).sin_cos();
            sa += f * c;
            sb += f * s;
        }
        an.push(scale * sa);
        bn.push(scale * sb);
    }

    log::debug!(
        "computed {} harmonics of '{}' from {} samples in {:?}",
        n_max,
        expression,
        samples.len(),
        started.elapsed()
    );
    CoefficientTable { a0, an, bn }
}

/// Memoized coefficient table keyed on `(expression, period)`.
#[derive(Debug, Default)]
pub struct CoefficientCache {
    key: Option<(String, u64)>,
    table: CoefficientTable,
    recomputes: usize,
}

impl CoefficientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `(expression, period)`, recomputing only when the key changed.
    pub fn get_or_compute(&mut self, expression: &str, period: f64) -> &CoefficientTable {
        let stale = match &self.key {
            Some((e, p)) => e != expression || *p != period.to_bits(),
            None => true,
        };
        if stale {
            self.table = compute_coefficients(expression, MAX_TERMS, period);
            self.key = Some((expression.to_string(), period.to_bits()));
            self.recomputes += 1;
        }
        &self.table
    }

    /// The last computed table, if any, without recomputing.
    pub fn cached(&self) -> Option<&CoefficientTable> {
        self.key.as_ref().map(|_| &self.table)
    }

    /// Drop the cached table; the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many times a table has been computed.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }
}
