//! Per-frame sampling: grid placement, both curves in pixel space and the error metric.
//!
//! Everything here is pure; the egui painter in `app::canvas` consumes a
//! [`FrameSamples`] and never computes curve values itself.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::series::SeriesEvaluator;
use super::viewport::{to_data, to_pixel, Viewport, VisibleWindow};

/// Tunable constants of the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// A jump larger than this between neighbouring reference samples breaks the line.
    pub discontinuity_threshold: f64,
    /// Sample the reference curve every this many pixel columns.
    pub reference_stride: usize,
    /// Accumulate the squared error every this many pixel columns.
    pub error_stride: usize,
    /// Distance between vertical grid lines, in data units.
    pub x_grid_spacing: f64,
    /// Distance between horizontal grid lines, in data units.
    pub y_grid_spacing: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            discontinuity_threshold: 1.5,
            reference_stride: 2,
            error_stride: 5,
            x_grid_spacing: PI,
            y_grid_spacing: 1.0,
        }
    }
}

impl RenderSettings {
    /// Replace unusable values (non-positive or non-finite spacings and thresholds,
    /// zero strides) with their defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let positive = |v: f64, fallback: f64, name: &str| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                log::warn!("ignoring render setting {name} = {v}, using {fallback}");
                fallback
            }
        };
        let stride = |v: usize, fallback: usize, name: &str| {
            if v > 0 {
                v
            } else {
                log::warn!("ignoring render setting {name} = 0, using {fallback}");
                fallback
            }
        };
        Self {
            discontinuity_threshold: positive(
                self.discontinuity_threshold,
                d.discontinuity_threshold,
                "discontinuity_threshold",
            ),
            reference_stride: stride(self.reference_stride, d.reference_stride, "reference_stride"),
            error_stride: stride(self.error_stride, d.error_stride, "error_stride"),
            x_grid_spacing: positive(self.x_grid_spacing, d.x_grid_spacing, "x_grid_spacing"),
            y_grid_spacing: positive(self.y_grid_spacing, d.y_grid_spacing, "y_grid_spacing"),
        }
    }
}

/// Grid lines per axis above which that axis is drawn without a grid.
pub const MAX_GRID_LINES: usize = 1000;

/// One grid line: its data coordinate and where it lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub value: f64,
    pub pixel: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Lines at multiples of `x_grid_spacing`.
    pub vertical: Vec<GridLine>,
    /// Lines at multiples of `y_grid_spacing`.
    pub horizontal: Vec<GridLine>,
    /// Pixel row of `y = 0`, when visible.
    pub x_axis: Option<f64>,
    /// Pixel column of `x = 0`, when visible.
    pub y_axis: Option<f64>,
    /// Data distance between neighbouring horizontal lines.
    pub y_step: f64,
}

/// Everything needed to draw one frame and report on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSamples {
    pub window: VisibleWindow,
    pub canvas: [f64; 2],
    pub grid: GridLines,
    /// Reference curve in pixel space, split into segments at discontinuities.
    pub reference: Vec<Vec<[f64; 2]>>,
    /// Partial-sum curve in pixel space, one continuous path.
    pub approximation: Vec<[f64; 2]>,
    /// Mean squared error over the sparse error columns.
    pub mse: f64,
    /// How many columns contributed to `mse`.
    pub error_samples: usize,
}

fn multiples_within(lo: f64, hi: f64, spacing: f64) -> Vec<f64> {
    if !(spacing > 0.0 && spacing.is_finite() && lo.is_finite() && hi.is_finite()) {
        return Vec::new();
    }
    let first = (lo / spacing).ceil();
    let last = (hi / spacing).floor();
    if !(last - first < MAX_GRID_LINES as f64) {
        return Vec::new();
    }
    (first as i64..=last as i64)
        .map(|k| k as f64 * spacing)
        .collect()
}

/// Grid lines and axes for `window` on a canvas of `[width, height]` pixels.
///
/// Density is one line per spacing unit regardless of zoom. An axis that would
/// need more than [`MAX_GRID_LINES`] lines gets none.
pub fn grid_lines(window: &VisibleWindow, canvas: [f64; 2], settings: &RenderSettings) -> GridLines {
    let vertical = multiples_within(window.x_min, window.x_max, settings.x_grid_spacing)
        .into_iter()
        .map(|value| GridLine {
            value,
            pixel: to_pixel(window, [value, 0.0], canvas)[0],
        })
        .collect();
    let horizontal = multiples_within(window.y_min, window.y_max, settings.y_grid_spacing)
        .into_iter()
        .map(|value| GridLine {
            value,
            pixel: to_pixel(window, [0.0, value], canvas)[1],
        })
        .collect();
    GridLines {
        vertical,
        horizontal,
        x_axis: window
            .contains_y(0.0)
            .then(|| to_pixel(window, [0.0, 0.0], canvas)[1]),
        y_axis: window
            .contains_x(0.0)
            .then(|| to_pixel(window, [0.0, 0.0], canvas)[0]),
        y_step: settings.y_grid_spacing,
    }
}

fn column_count(canvas: [f64; 2]) -> usize {
    if canvas[0].is_finite() && canvas[0] > 0.0 && canvas[1] > 0.0 {
        canvas[0].floor() as usize
    } else {
        0
    }
}

/// Reference curve sampled every `stride` columns, broken where neighbouring
/// samples differ by more than `threshold`.
pub fn reference_segments(
    series: &SeriesEvaluator<'_>,
    window: &VisibleWindow,
    canvas: [f64; 2],
    stride: usize,
    threshold: f64,
) -> Vec<Vec<[f64; 2]>> {
    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    let mut prev: Option<f64> = None;
    for px in (0..column_count(canvas)).step_by(stride.max(1)) {
        let x = to_data(window, [px as f64, 0.0], canvas)[0];
        let y = series.reference_value(x);
        if let Some(p) = prev {
            if (y - p).abs() > threshold && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.push([px as f64, to_pixel(window, [x, y], canvas)[1]]);
        prev = Some(y);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Partial sum with `n` terms sampled at every pixel column.
pub fn approximation_path(
    series: &SeriesEvaluator<'_>,
    n: usize,
    window: &VisibleWindow,
    canvas: [f64; 2],
) -> Vec<[f64; 2]> {
    (0..column_count(canvas))
        .map(|px| {
            let x = to_data(window, [px as f64, 0.0], canvas)[0];
            let y = series.partial_sum(x, n);
            [px as f64, to_pixel(window, [x, y], canvas)[1]]
        })
        .collect()
}

/// Mean squared difference between reference and partial sum at every
/// `stride`-th pixel column. Returns `(mse, samples)`; `(0.0, 0)` on an empty canvas.
pub fn windowed_mse(
    series: &SeriesEvaluator<'_>,
    n: usize,
    window: &VisibleWindow,
    canvas: [f64; 2],
    stride: usize,
) -> (f64, usize) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for px in (0..column_count(canvas)).step_by(stride.max(1)) {
        let x = to_data(window, [px as f64, 0.0], canvas)[0];
        let d = series.reference_value(x) - series.partial_sum(x, n);
        sum += d * d;
        count += 1;
    }
    if count == 0 {
        (0.0, 0)
    } else {
        (sum / count as f64, count)
    }
}

/// Sample one full frame for `viewport` on a canvas of `[width, height]` pixels.
pub fn sample_frame(
    series: &SeriesEvaluator<'_>,
    n: usize,
    viewport: &Viewport,
    canvas: [f64; 2],
    settings: &RenderSettings,
) -> FrameSamples {
    let window = viewport.visible_window();
    let (mse, error_samples) = windowed_mse(series, n, &window, canvas, settings.error_stride);
    FrameSamples {
        window,
        canvas,
        grid: grid_lines(&window, canvas, settings),
        reference: reference_segments(
            series,
            &window,
            canvas,
            settings.reference_stride,
            settings.discontinuity_threshold,
        ),
        approximation: approximation_path(series, n, &window, canvas),
        mse,
        error_samples,
    }
}
