use eframe::egui;
use fourierplot::app::canvas::{label_anchor, paint_frame, CurveLook};
use fourierplot::data::waveform::Waveform;
use fourierplot::ExplorerState;

fn paint(size: [f32; 2], state: &mut ExplorerState) {
    let frame = state.frame([size[0] as f64, size[1] as f64]);
    let rect = egui::Rect::from_min_size(egui::pos2(5.0, 7.0), egui::vec2(size[0], size[1]));
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        let painter = ctx.layer_painter(egui::LayerId::background());
        paint_frame(&painter, rect, &frame, &CurveLook::default());
    });
}

#[test]
fn paints_tiny_canvases() {
    let mut state = ExplorerState::default();
    for size in [[20.0, 10.0], [10.0, 300.0], [1.0, 1.0], [0.0, 0.0], [800.0, 3.0]] {
        paint(size, &mut state);
    }
    state.set_waveform(Waveform::Custom);
    paint([20.0, 10.0], &mut state);
}

#[test]
fn paints_zoomed_out_and_panned_views() {
    let mut state = ExplorerState::default();
    for _ in 0..40 {
        state.zoom_at(0.5, -1.0);
    }
    paint([640.0, 480.0], &mut state);
    state.pan_by(-1e5, 1e5, 640.0, 480.0);
    paint([640.0, 480.0], &mut state);
}

#[test]
fn label_anchor_stays_inside_small_rects() {
    let mut state = ExplorerState::default();
    let frame = state.frame([20.0, 10.0]);
    let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(20.0, 10.0));
    let (row, col) = label_anchor(rect, &frame);
    assert_eq!(row, rect.top());
    assert_eq!(col, rect.left());
}

#[test]
fn label_anchor_follows_axes() {
    let mut state = ExplorerState::default();
    let frame = state.frame([800.0, 600.0]);
    let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
    let (row, col) = label_anchor(rect, &frame);
    assert_eq!(row, 302.0);
    assert_eq!(col, 403.0);
}
