use std::f64::consts::PI;

use fourierplot::data::pipeline::*;
use fourierplot::data::series::SeriesEvaluator;
use fourierplot::data::viewport::Viewport;
use fourierplot::data::waveform::Waveform;

const CANVAS: [f64; 2] = [800.0, 600.0];

fn frame_for(waveform: Waveform, n: usize) -> FrameSamples {
    sample_frame(
        &SeriesEvaluator::closed_form(waveform),
        n,
        &Viewport::default(),
        CANVAS,
        &RenderSettings::default(),
    )
}

#[test]
fn mse_never_grows_with_more_terms() {
    for waveform in [Waveform::Square, Waveform::Triangle, Waveform::Sawtooth] {
        let mut prev = f64::INFINITY;
        for n in [1, 2, 5, 10, 20, 50, 100] {
            let mse = frame_for(waveform, n).mse;
            assert!(mse.is_finite());
            assert!(mse <= prev + 1e-6, "{waveform}: N={n} mse {mse} > {prev}");
            prev = mse;
        }
    }
}

#[test]
fn mse_uses_every_fifth_column() {
    let f = frame_for(Waveform::Square, 5);
    assert_eq!(f.error_samples, 160);
    assert!(f.mse > 0.0);
}

#[test]
fn empty_canvas_gives_zero_mse_and_no_curves() {
    let f = sample_frame(
        &SeriesEvaluator::closed_form(Waveform::Square),
        10,
        &Viewport::default(),
        [0.0, 600.0],
        &RenderSettings::default(),
    );
    assert_eq!(f.mse, 0.0);
    assert_eq!(f.error_samples, 0);
    assert!(f.approximation.is_empty());
    assert!(f.reference.is_empty());
}

#[test]
fn approximation_has_one_point_per_column() {
    let f = frame_for(Waveform::Triangle, 7);
    assert_eq!(f.approximation.len(), 800);
    for (i, p) in f.approximation.iter().enumerate() {
        assert_eq!(p[0], i as f64);
        assert!(p[1].is_finite());
    }
}

#[test]
fn reference_breaks_at_jumps_only() {
    // jumps at -π, 0 and π
    assert_eq!(frame_for(Waveform::Square, 1).reference.len(), 4);
    // jumps at -π and π
    assert_eq!(frame_for(Waveform::Sawtooth, 1).reference.len(), 3);
    assert_eq!(frame_for(Waveform::Triangle, 1).reference.len(), 1);
}

#[test]
fn reference_is_sampled_every_other_column() {
    let f = frame_for(Waveform::Triangle, 1);
    let seg = &f.reference[0];
    assert_eq!(seg.len(), 400);
    assert_eq!(seg[1][0] - seg[0][0], 2.0);
}

#[test]
fn grid_lines_sit_on_multiples_of_pi() {
    let f = frame_for(Waveform::Square, 1);
    assert_eq!(f.grid.vertical.len(), 5);
    for (k, line) in (-2..=2).zip(&f.grid.vertical) {
        assert!((line.value - k as f64 * PI).abs() < 1e-9);
        assert!((line.pixel - (k + 2) as f64 * 200.0).abs() < 1e-6);
    }
    assert_eq!(f.grid.horizontal.len(), 5);
    assert!((f.grid.x_axis.unwrap() - 300.0).abs() < 1e-9);
    assert!((f.grid.y_axis.unwrap() - 400.0).abs() < 1e-9);
}

#[test]
fn axes_disappear_when_panned_away() {
    let mut vp = Viewport::default();
    vp.offset_x = 100.0;
    vp.offset_y = 100.0;
    let grid = grid_lines(&vp.visible_window(), CANVAS, &RenderSettings::default());
    assert!(grid.x_axis.is_none());
    assert!(grid.y_axis.is_none());
    assert!(!grid.vertical.is_empty());
}

#[test]
fn grid_density_is_fixed_when_zoomed_out() {
    let mut vp = Viewport::default();
    vp.zoom = 0.5;
    let grid = grid_lines(&vp.visible_window(), CANVAS, &RenderSettings::default());
    // x ∈ [-4π, 4π], y ∈ [-4, 4]
    assert_eq!(grid.vertical.len(), 9);
    assert_eq!(grid.horizontal.len(), 9);
}

#[test]
fn custom_threshold_merges_segments() {
    let series = SeriesEvaluator::closed_form(Waveform::Square);
    let window = Viewport::default().visible_window();
    let merged = reference_segments(&series, &window, CANVAS, 2, 5.0);
    assert_eq!(merged.len(), 1);
}

#[test]
fn windowed_mse_of_high_order_triangle_is_tiny() {
    let series = SeriesEvaluator::closed_form(Waveform::Triangle);
    let window = Viewport::default().visible_window();
    let (mse, count) = windowed_mse(&series, 100, &window, CANVAS, 5);
    assert_eq!(count, 160);
    assert!(mse < 1e-5);
}

#[test]
fn grid_is_skipped_when_too_dense() {
    let settings = RenderSettings {
        x_grid_spacing: 1e-12,
        y_grid_spacing: 1e-300,
        ..RenderSettings::default()
    };
    let grid = grid_lines(&Viewport::default().visible_window(), CANVAS, &settings);
    assert!(grid.vertical.is_empty());
    assert!(grid.horizontal.is_empty());
    assert!(grid.x_axis.is_some());

    let just_fits = RenderSettings {
        y_grid_spacing: 4.0 / 999.0,
        ..RenderSettings::default()
    };
    let grid = grid_lines(&Viewport::default().visible_window(), CANVAS, &just_fits);
    assert!(!grid.horizontal.is_empty());
    assert!(grid.horizontal.len() <= MAX_GRID_LINES);
}

#[test]
fn sanitized_keeps_valid_settings() {
    let custom = RenderSettings {
        discontinuity_threshold: 0.5,
        reference_stride: 1,
        error_stride: 7,
        x_grid_spacing: PI / 2.0,
        y_grid_spacing: 0.5,
    };
    assert_eq!(custom.sanitized(), custom);
    let broken = RenderSettings {
        x_grid_spacing: f64::NAN,
        error_stride: 0,
        ..custom
    };
    let fixed = broken.sanitized();
    assert_eq!(fixed.x_grid_spacing, PI);
    assert_eq!(fixed.error_stride, 5);
    assert_eq!(fixed.y_grid_spacing, 0.5);
}
