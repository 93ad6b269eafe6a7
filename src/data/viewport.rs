//! Viewport transform: zoom and pan state plus the data ⇄ pixel mapping.
//!
//! The visible window is a fixed [`BaseWindow`] scaled by `1/zoom` around its
//! center and translated by `(offset_x, offset_y)` in data units. Pixel space has
//! its origin at the top-left corner of the canvas with `y` growing downwards.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;
/// Relative zoom change per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Data-space extents shown at zoom 1 with no offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for BaseWindow {
    fn default() -> Self {
        Self {
            x_min: -2.0 * PI,
            x_max: 2.0 * PI,
            y_min: -2.0,
            y_max: 2.0,
        }
    }
}

impl BaseWindow {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Finite extents with positive width and height.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    pub fn center(&self) -> [f64; 2] {
        [
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        ]
    }
}

/// The data-space rectangle currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl VisibleWindow {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

/// Zoom one notch around a pointer at `pointer_ratio` of the canvas width.
///
/// Returns `(new_zoom, offset_x_delta)`. The new zoom is clamped to
/// `[MIN_ZOOM, MAX_ZOOM]`; the offset delta keeps the data point under the pointer fixed.
/// A positive `delta_sign` zooms in, a negative one zooms out, zero leaves the zoom unchanged.
///
/// ```
/// # use fourierplot::data::viewport::zoom_at;
/// let (z, dx) = zoom_at(0.5, 1.0, 1.0, 10.0);
/// assert!((z - 1.1).abs() < 1e-12);
/// assert_eq!(dx, 0.0);
/// ```
pub fn zoom_at(pointer_ratio: f64, delta_sign: f64, current_zoom: f64, base_width: f64) -> (f64, f64) {
    let factor = if delta_sign > 0.0 {
        1.0 + ZOOM_STEP
    } else if delta_sign < 0.0 {
        1.0 - ZOOM_STEP
    } else {
        1.0
    };
    let old = current_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    let new = (old * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    let ratio = pointer_ratio.clamp(0.0, 1.0);
    let adjustment = (ratio - 0.5) * base_width * (1.0 / old - 1.0 / new);
    (new, adjustment)
}

/// Convert a pointer drag in pixels into an offset change in data units.
///
/// Returns `(offset_x_delta, offset_y_delta)` such that the content follows the
/// pointer. Pixel `y` grows downwards while data `y` grows upwards, so the vertical
/// component is inverted relative to the horizontal one.
pub fn pan_by(
    pixel_dx: f64,
    pixel_dy: f64,
    canvas_width: f64,
    canvas_height: f64,
    window: &VisibleWindow,
) -> (f64, f64) {
    if canvas_width <= 0.0 || canvas_height <= 0.0 {
        return (0.0, 0.0);
    }
    let dx = -pixel_dx * window.width() / canvas_width;
    let dy = pixel_dy * window.height() / canvas_height;
    (dx, dy)
}

/// Zoom factor and pan offsets over a fixed base window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub base: BaseWindow,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(BaseWindow::default())
    }
}

impl Viewport {
    pub fn new(base: BaseWindow) -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            base,
        }
    }

    /// Back to zoom 1 and no offset.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    pub fn is_identity(&self) -> bool {
        self.zoom == 1.0 && self.offset_x == 0.0 && self.offset_y == 0.0
    }

    /// Apply [`zoom_at`] to this viewport.
    pub fn zoom_at(&mut self, pointer_ratio: f64, delta_sign: f64) {
        let (zoom, dx) = zoom_at(pointer_ratio, delta_sign, self.zoom, self.base.width());
        self.zoom = zoom;
        self.offset_x += dx;
    }

    /// Apply [`pan_by`] to this viewport.
    pub fn pan_by(&mut self, pixel_dx: f64, pixel_dy: f64, canvas_width: f64, canvas_height: f64) {
        let window = self.visible_window();
        let (dx, dy) = pan_by(pixel_dx, pixel_dy, canvas_width, canvas_height, &window);
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn visible_window(&self) -> VisibleWindow {
        let [cx, cy] = self.base.center();
        let cx = cx + self.offset_x;
        let cy = cy + self.offset_y;
        let half_w = 0.5 * self.base.width() / self.zoom;
        let half_h = 0.5 * self.base.height() / self.zoom;
        VisibleWindow {
            x_min: cx - half_w,
            x_max: cx + half_w,
            y_min: cy - half_h,
            y_max: cy + half_h,
        }
    }

    /// Map a data point to pixel coordinates on a canvas of `[width, height]`.
    pub fn to_pixel(&self, data: [f64; 2], canvas: [f64; 2]) -> [f64; 2] {
        to_pixel(&self.visible_window(), data, canvas)
    }

    /// Inverse of [`Viewport::to_pixel`].
    pub fn to_data(&self, pixel: [f64; 2], canvas: [f64; 2]) -> [f64; 2] {
        to_data(&self.visible_window(), pixel, canvas)
    }
}

/// Affine data → pixel map for a given window.
pub fn to_pixel(window: &VisibleWindow, data: [f64; 2], canvas: [f64; 2]) -> [f64; 2] {
    [
        (data[0] - window.x_min) / window.width() * canvas[0],
        (window.y_max - data[1]) / window.height() * canvas[1],
    ]
}

/// Affine pixel → data map for a given window.
pub fn to_data(window: &VisibleWindow, pixel: [f64; 2], canvas: [f64; 2]) -> [f64; 2] {
    [
        window.x_min + pixel[0] / canvas[0] * window.width(),
        window.y_max - pixel[1] / canvas[1] * window.height(),
    ]
}
