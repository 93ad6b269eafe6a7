//! Series evaluator: exact periodic reference values and truncated partial sums.
//!
//! The three canonical waveforms use their known Fourier series directly:
//!
//! | waveform | reference on `(-π, π]` | partial sum |
//! | -------- | ---------------------- | ----------- |
//! | square   | `±1`                   | `(4/π) Σ sin((2n−1)x)/(2n−1)` |
//! | triangle | `1 − 2|x|/π`           | `(8/π²) Σ cos((2n−1)x)/(2n−1)²` |
//! | sawtooth | `x/π`                  | `(2/π) Σ (−1)^(n+1) sin(nx)/n` |
//!
//! Custom expressions are evaluated through [`evaluate`] for the reference and
//! through a cached [`CoefficientTable`] for the partial sum.

use std::f64::consts::PI;

use super::coefficients::CoefficientTable;
use super::expression::evaluate;
use super::waveform::{fold_to_period, Waveform};

static EMPTY_TABLE: CoefficientTable = CoefficientTable {
    a0: 0.0,
    an: Vec::new(),
    bn: Vec::new(),
};

/// Reference value of a closed-form waveform, `None` for [`Waveform::Custom`].
pub fn closed_form_reference(x: f64, waveform: Waveform) -> Option<f64> {
    let x = fold_to_period(x);
    match waveform {
        Waveform::Square => Some(if x >= 0.0 { 1.0 } else { -1.0 }),
        Waveform::Triangle => Some(1.0 - 2.0 * x.abs() / PI),
        Waveform::Sawtooth => Some(x / PI),
        Waveform::Custom => None,
    }
}

/// First `n` terms of a closed-form waveform's series, `None` for [`Waveform::Custom`].
pub fn closed_form_partial_sum(x: f64, waveform: Waveform, n: usize) -> Option<f64> {
    match waveform {
        Waveform::Square => {
            let s: f64 = (1..=n)
                .map(|k| {
                    let m = (2 * k - 1) as f64;
                    (m * x).sin() / m
                })
                .sum();
            Some(4.0 / PI * s)
        }
        Waveform::Triangle => {
            let s: f64 = (1..=n)
                .map(|k| {
                    let m = (2 * k - 1) as f64;
                    (m * x).cos() / (m * m)
                })
                .sum();
            Some(8.0 / (PI * PI) * s)
        }
        Waveform::Sawtooth => {
            let s: f64 = (1..=n)
                .map(|k| {
                    let m = k as f64;
                    let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
                    sign * (m * x).sin() / m
                })
                .sum();
            Some(2.0 / PI * s)
        }
        Waveform::Custom => None,
    }
}

/// `a0/2 + Σ aₙcos(nx) + bₙsin(nx)` over the first `n` harmonics of `table`.
///
/// Requests beyond the stored harmonics are clamped to the table length.
pub fn custom_partial_sum(x: f64, table: &CoefficientTable, n: usize) -> f64 {
    let terms = n.min(table.len());
    let mut sum = table.a0 / 2.0;
    for k in 1..=terms {
        let (a, b) = (table.an[k - 1], table.bn[k - 1]);
        let (s, c) = (k as f64 * x).sin_cos();
        sum += a * c + b * s;
    }
    sum
}

/// Evaluates one waveform's reference and partial sum at arbitrary `x`.
#[derive(Debug, Clone, Copy)]
pub struct SeriesEvaluator<'a> {
    waveform: Waveform,
    expression: &'a str,
    table: &'a CoefficientTable,
}

impl<'a> SeriesEvaluator<'a> {
    /// Evaluator for square, triangle or sawtooth. A `Custom` selector here
    /// behaves as an unparseable expression with an empty table, i.e. flat zero.
    pub fn closed_form(waveform: Waveform) -> Self {
        Self {
            waveform,
            expression: "",
            table: &EMPTY_TABLE,
        }
    }

    /// Evaluator for a custom expression and its coefficient table.
    pub fn custom(expression: &'a str, table: &'a CoefficientTable) -> Self {
        Self {
            waveform: Waveform::Custom,
            expression,
            table,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// The exact periodic function at `x`, folded into `(-π, π]`.
    pub fn reference_value(&self, x: f64) -> f64 {
        closed_form_reference(x, self.waveform)
            .unwrap_or_else(|| evaluate(self.expression, fold_to_period(x)))
    }

    /// The truncated series with `n` terms at `x`.
    pub fn partial_sum(&self, x: f64, n: usize) -> f64 {
        closed_form_partial_sum(x, self.waveform, n)
            .unwrap_or_else(|| custom_partial_sum(x, self.table, n))
    }
}
