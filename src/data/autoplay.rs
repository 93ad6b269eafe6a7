//! Term count handling: range clamping, the nonlinear slider mapping and autoplay stepping.
//!
//! Autoplay is driven by an external periodic tick; [`Autoplay::tick`] only decides
//! whether a step is due and [`next_term_count`] holds the stepping policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_TERMS: usize = 1;
pub const MAX_TERMS: usize = 100;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Number of harmonics in the displayed partial sum, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct TermCount(usize);

impl TermCount {
    /// Clamp `n` into the valid range.
    pub fn new(n: usize) -> Self {
        Self(n.clamp(MIN_TERMS, MAX_TERMS))
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Autoplay step applied to this count.
    pub fn step(&self) -> usize {
        match self.0 {
            n if n < 30 => 1,
            n if n < 70 => 2,
            _ => 3,
        }
    }

    /// The next count under autoplay.
    pub fn advance(self) -> Self {
        next_term_count(self)
    }

    pub fn increment(self) -> Self {
        Self::new(self.0 + 1)
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Position of this count on the slider, in `[0, 1]`.
    pub fn slider_position(&self) -> f64 {
        slider_position_for(*self)
    }

    /// Count selected by a slider at `position`.
    pub fn from_slider_position(position: f64) -> Self {
        term_count_for_slider(position)
    }
}

impl Default for TermCount {
    fn default() -> Self {
        Self(5)
    }
}

impl From<usize> for TermCount {
    fn from(n: usize) -> Self {
        Self::new(n)
    }
}

impl From<TermCount> for usize {
    fn from(t: TermCount) -> Self {
        t.0
    }
}

/// Autoplay policy: `+1` below 30, `+2` below 70, `+3` otherwise, capped at 100.
/// A tick at 100 wraps back to 1.
///
/// ```
/// # use fourierplot::data::autoplay::{next_term_count, TermCount};
/// assert_eq!(next_term_count(TermCount::new(68)).get(), 70);
/// assert_eq!(next_term_count(TermCount::new(70)).get(), 73);
/// assert_eq!(next_term_count(TermCount::new(100)).get(), 1);
/// ```
pub fn next_term_count(current: TermCount) -> TermCount {
    if current.get() >= MAX_TERMS {
        return TermCount::new(MIN_TERMS);
    }
    TermCount::new(current.get() + current.step())
}

/// Slider position `p` in `[0, 1]` maps to `N = 1 + round(99·p²)`, giving finer
/// control over small term counts.
pub fn term_count_for_slider(position: f64) -> TermCount {
    let p = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
    let span = (MAX_TERMS - MIN_TERMS) as f64;
    TermCount::new(MIN_TERMS + (span * p * p).round() as usize)
}

/// Inverse of [`term_count_for_slider`].
pub fn slider_position_for(n: TermCount) -> f64 {
    let span = (MAX_TERMS - MIN_TERMS) as f64;
    ((n.get() - MIN_TERMS) as f64 / span).sqrt()
}

/// Accumulates elapsed time and reports how many autoplay steps are due.
#[derive(Debug, Clone)]
pub struct Autoplay {
    pub playing: bool,
    pub interval: Duration,
    pending: Duration,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            playing: false,
            interval: interval.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.pending = Duration::ZERO;
        }
        self.playing = playing;
    }

    /// Feed `elapsed` wall time; returns the number of steps due, at most one.
    ///
    /// A stall longer than one interval (minimized window, slow frame) yields a
    /// single step and drops the backlog, like a fixed-rate timer that skips missed
    /// ticks. Stopped autoplay never reports steps and discards accumulated time.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        if !self.playing {
            self.pending = Duration::ZERO;
            return 0;
        }
        self.pending = self.pending.saturating_add(elapsed);
        if self.pending < self.interval {
            return 0;
        }
        self.pending -= self.interval;
        if self.pending >= self.interval {
            self.pending = Duration::ZERO;
        }
        1
    }

    /// Time until the next step is due while playing.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.pending)
    }
}
