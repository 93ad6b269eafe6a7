//! Paints a sampled frame onto an egui canvas.

use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::data::axis_format::{y_tick_label, AxisFormatter, PiFormatter};
use crate::data::pipeline::FrameSamples;

/// Colors and widths of everything drawn on the canvas.
#[derive(Debug, Clone)]
pub struct CurveLook {
    pub background: Color32,
    pub grid: Color32,
    pub axis: Color32,
    pub label: Color32,
    pub reference: Color32,
    pub approximation: Color32,
    pub reference_width: f32,
    pub approximation_width: f32,
}

impl Default for CurveLook {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(18, 20, 26),
            grid: Color32::from_rgb(45, 50, 60),
            axis: Color32::from_rgb(140, 145, 155),
            label: Color32::from_rgb(150, 155, 165),
            reference: Color32::from_rgb(31, 119, 180),
            approximation: Color32::from_rgb(255, 127, 14),
            reference_width: 2.0,
            approximation_width: 1.5,
        }
    }
}

fn to_pos(rect: Rect, p: [f64; 2]) -> Pos2 {
    Pos2::new(rect.left() + p[0] as f32, rect.top() + p[1] as f32)
}

// Keep wildly off-screen points from producing degenerate geometry.
fn clamp_to_band(rect: Rect, pos: Pos2) -> Pos2 {
    let band = rect.height().max(1.0) * 4.0;
    let y = if pos.y.is_finite() {
        pos.y.clamp(rect.top() - band, rect.bottom() + band)
    } else {
        rect.bottom() + band
    };
    Pos2::new(pos.x, y)
}

const LABEL_HEIGHT: f32 = 14.0;
const LABEL_WIDTH: f32 = 30.0;

/// Top-left corner for the x tick labels (row) and y tick labels (column).
///
/// Labels hug the axes when visible and stay inside `rect` otherwise; on a rect
/// smaller than one label they pin to its top-left corner.
pub fn label_anchor(rect: Rect, frame: &FrameSamples) -> (f32, f32) {
    let last_row = (rect.bottom() - LABEL_HEIGHT).max(rect.top());
    let last_col = (rect.right() - LABEL_WIDTH).max(rect.left());
    let row = frame
        .grid
        .x_axis
        .map(|y| rect.top() + y as f32 + 2.0)
        .unwrap_or(last_row);
    let col = frame
        .grid
        .y_axis
        .map(|x| rect.left() + x as f32 + 3.0)
        .unwrap_or(rect.left() + 3.0);
    (
        if row.is_finite() { row.clamp(rect.top(), last_row) } else { rect.top() },
        if col.is_finite() { col.clamp(rect.left(), last_col) } else { rect.left() },
    )
}

/// Draw grid, axes, tick labels and both curves of `frame` into `rect`.
pub fn paint_frame(painter: &Painter, rect: Rect, frame: &FrameSamples, look: &CurveLook) {
    if !(rect.width() > 0.0 && rect.height() > 0.0) {
        return;
    }
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, CornerRadius::ZERO, look.background);

    let grid = Stroke::new(1.0, look.grid);
    let font = FontId::monospace(11.0);
    let x_fmt = AxisFormatter::Pi(PiFormatter::default());
    let (label_row, label_col) = label_anchor(rect, frame);

    for line in &frame.grid.vertical {
        let x = rect.left() + line.pixel as f32;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        if line.value != 0.0 {
            painter.text(
                Pos2::new(x + 2.0, label_row),
                Align2::LEFT_TOP,
                x_fmt.format(line.value, 2, frame.window.width()),
                font.clone(),
                look.label,
            );
        }
    }
    for line in &frame.grid.horizontal {
        let y = rect.top() + line.pixel as f32;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        if line.value != 0.0 {
            painter.text(
                Pos2::new(label_col, y - 2.0),
                Align2::LEFT_BOTTOM,
                y_tick_label(line.value, frame.grid.y_step),
                font.clone(),
                look.label,
            );
        }
    }

    let axis = Stroke::new(1.5, look.axis);
    if let Some(y) = frame.grid.x_axis {
        let y = rect.top() + y as f32;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], axis);
    }
    if let Some(x) = frame.grid.y_axis {
        let x = rect.left() + x as f32;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], axis);
    }

    let reference = Stroke::new(look.reference_width, look.reference);
    for segment in &frame.reference {
        if segment.len() < 2 {
            continue;
        }
        let points: Vec<Pos2> = segment
            .iter()
            .map(|p| clamp_to_band(rect, to_pos(rect, *p)))
            .collect();
        painter.add(Shape::line(points, reference));
    }

    if frame.approximation.len() >= 2 {
        let points: Vec<Pos2> = frame
            .approximation
            .iter()
            .map(|p| clamp_to_band(rect, to_pos(rect, *p)))
            .collect();
        painter.add(Shape::line(
            points,
            Stroke::new(look.approximation_width, look.approximation),
        ));
    }
}
