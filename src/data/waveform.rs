//! Waveform selector and the periodic fold shared by the reference curves.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which function is being approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Square,
    Triangle,
    Sawtooth,
    /// A user-supplied expression, approximated through numerically estimated coefficients.
    Custom,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Custom => "Custom",
        }
    }

    /// Closed-form partial sums exist for every waveform except [`Waveform::Custom`].
    pub fn is_closed_form(&self) -> bool {
        !matches!(self, Waveform::Custom)
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Waveform {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            "sawtooth" => Ok(Waveform::Sawtooth),
            "custom" => Ok(Waveform::Custom),
            other => Err(format!("unknown waveform '{}'", other)),
        }
    }
}

/// Reduce `x` into `(-π, π]`.
///
/// ```
/// # use fourierplot::data::waveform::fold_to_period;
/// use std::f64::consts::PI;
/// assert!((fold_to_period(PI / 2.0 + 4.0 * PI) - PI / 2.0).abs() < 1e-12);
/// assert!((fold_to_period(-0.5 - 2.0 * PI) + 0.5).abs() < 1e-12);
/// ```
pub fn fold_to_period(x: f64) -> f64 {
    let r = (x + PI).rem_euclid(2.0 * PI) - PI;
    if r <= -PI {
        r + 2.0 * PI
    } else {
        r
    }
}
