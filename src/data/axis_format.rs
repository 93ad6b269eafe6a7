//! Number formatting for axis tick labels and the scale readout.
//!
//! [`AxisFormatter`] picks between plain decimals, scientific notation and
//! multiples of π. `Auto` behaves like decimal formatting but switches to
//! scientific notation when the visible step is very large or very small.

use std::f64::consts::PI;

use super::viewport::VisibleWindow;

// ─────────────────────────────────────────────────────────────────────────────
// DecimalFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Plain decimal formatting with optional fixed decimal places.
///
/// If `decimal_places` is `None`, the `dec_pl` passed at format time is used.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecimalFormatter {
    pub decimal_places: Option<usize>,
    /// Optional unit suffix appended after the number.
    pub unit: Option<String>,
}

impl DecimalFormatter {
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        let places = self.decimal_places.unwrap_or(dec_pl);
        let s = format!("{:.*}", places, value);
        match &self.unit {
            Some(u) => format!("{} {}", s, u),
            None => s,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScientificFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Scientific notation like `1.23e4`, without leading `+` or padded exponents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScientificFormatter {
    /// Digits after the decimal point of the mantissa, `None` uses `dec_pl`.
    pub significant_digits: Option<usize>,
    pub unit: Option<String>,
}

impl ScientificFormatter {
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        let digits = self.significant_digits.unwrap_or(dec_pl);
        let formatted = format_scientific(value, digits);
        match &self.unit {
            Some(u) => format!("{} {}", formatted, u),
            None => formatted,
        }
    }
}

/// Render `value` as compact scientific notation like `1.23e5` or `-4.00e-2`.
fn format_scientific(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0_f64);
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    let abs_val = value.abs();
    let exp = abs_val.log10().floor() as i32;
    let mantissa = sign * abs_val / 10f64.powi(exp);
    if exp == 0 {
        format!("{:.*}", digits, mantissa)
    } else {
        format!("{:.*}e{}", digits, mantissa, exp)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PiFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Formats values as multiples of π (`0`, `π`, `-2π`, `π/2`) when they are
/// (within `tolerance`) an integer multiple of `π / denominator`, and as decimals otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PiFormatter {
    pub max_denominator: u32,
    pub tolerance: f64,
}

impl Default for PiFormatter {
    fn default() -> Self {
        Self {
            max_denominator: 4,
            tolerance: 1e-9,
        }
    }
}

impl PiFormatter {
    /// ```
    /// # use fourierplot::data::axis_format::PiFormatter;
    /// use std::f64::consts::PI;
    /// let pf = PiFormatter::default();
    /// assert_eq!(pf.format(-2.0 * PI, 2), "-2π");
    /// assert_eq!(pf.format(PI / 2.0, 2), "π/2");
    /// assert_eq!(pf.format(1.0, 2), "1.00");
    /// ```
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        if !value.is_finite() {
            return format!("{}", value);
        }
        let ratio = value / PI;
        for den in 1..=self.max_denominator.max(1) {
            let num = (ratio * den as f64).round();
            if (ratio * den as f64 - num).abs() > self.tolerance * den as f64 {
                continue;
            }
            let num = num as i64;
            if num == 0 {
                return "0".to_string();
            }
            let head = match num {
                1 => "π".to_string(),
                -1 => "-π".to_string(),
                n => format!("{}π", n),
            };
            return if den == 1 {
                head
            } else {
                format!("{}/{}", head, den)
            };
        }
        format!("{:.*}", dec_pl, value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AxisFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects how an axis value is rendered.
#[derive(Debug, Clone, Default)]
pub enum AxisFormatter {
    /// Decimal, switching to scientific when the step is far from unity.
    #[default]
    Auto,
    Decimal(DecimalFormatter),
    Scientific(ScientificFormatter),
    Pi(PiFormatter),
}

impl AxisFormatter {
    /// Format `value`; `step` is the tick or view step used for the auto-scientific decision.
    pub fn format(&self, value: f64, dec_pl: usize, step: f64) -> String {
        match self {
            AxisFormatter::Auto => format_adaptive_numeric(value, dec_pl, step, None),
            AxisFormatter::Decimal(df) => df.format(value, dec_pl),
            AxisFormatter::Scientific(sf) => sf.format(value, dec_pl),
            AxisFormatter::Pi(pf) => pf.format(value, dec_pl),
        }
    }
}

fn format_adaptive_numeric(v: f64, dec_pl: usize, step: f64, unit: Option<&str>) -> String {
    let sci = if step.is_finite() && step != 0.0 {
        let exp = step.abs().log10().floor() as i32;
        exp < -(dec_pl as i32) || exp >= dec_pl as i32
    } else {
        false
    };

    let formatted = if sci {
        format_scientific(v, dec_pl)
    } else {
        format!("{:.*}", dec_pl, v)
    };

    match unit {
        Some(u) => format!("{} {}", formatted, u),
        None => formatted,
    }
}

/// Fewest decimal places (at most 3) that show every multiple of `step` exactly.
pub fn decimals_for_step(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (0..3)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.max(1.0)
        })
        .unwrap_or(3)
}

/// Label of a horizontal grid line at `value` when lines are `step` apart.
///
/// ```
/// # use fourierplot::data::axis_format::y_tick_label;
/// assert_eq!(y_tick_label(15.0, 1.0), "15");
/// assert_eq!(y_tick_label(-0.5, 0.5), "-0.5");
/// ```
pub fn y_tick_label(value: f64, step: f64) -> String {
    DecimalFormatter {
        decimal_places: Some(decimals_for_step(step)),
        unit: None,
    }
    .format(value, 0)
}

/// Scale readout for the visible window, e.g. `x: [-6.28, 6.28]  y: [-2.00, 2.00]`.
pub fn format_window(window: &VisibleWindow, dec_pl: usize) -> String {
    let fmt = AxisFormatter::Auto;
    let xs = window.width();
    let ys = window.height();
    format!(
        "x: [{}, {}]  y: [{}, {}]",
        fmt.format(window.x_min, dec_pl, xs),
        fmt.format(window.x_max, dec_pl, xs),
        fmt.format(window.y_min, dec_pl, ys),
        fmt.format(window.y_max, dec_pl, ys),
    )
}
