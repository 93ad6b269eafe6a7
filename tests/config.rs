use std::time::Duration;

use fourierplot::data::hotkeys::{Hotkey, Modifier};
use fourierplot::data::waveform::Waveform;
use fourierplot::{ConfigError, FourierPlotConfig};

#[test]
fn empty_documents_give_defaults() {
    let json = FourierPlotConfig::from_str_with_format("{}", "json").unwrap();
    assert_eq!(json.waveform, Waveform::Square);
    assert_eq!(json.expression, "x*x");
    assert_eq!(json.term_count, 5);
    assert!(!json.autoplay);
    assert_eq!(json.autoplay_interval_ms, 50);
    assert_eq!(json.render.error_stride, 5);
}

#[test]
fn yaml_overrides_selected_fields() {
    let text = "\
waveform: custom
expression: \"abs(x)\"
term_count: 250
autoplay: true
autoplay_interval_ms: 20
render:
  error_stride: 3
hotkeys:
  play_pause:
    modifier: Ctrl
    key: P
";
    let cfg = FourierPlotConfig::from_str_with_format(text, "yml").unwrap();
    assert_eq!(cfg.waveform, Waveform::Custom);
    assert_eq!(cfg.render.error_stride, 3);
    assert_eq!(cfg.render.reference_stride, 2);
    assert_eq!(cfg.hotkeys.play_pause, Some(Hotkey::new(Modifier::Ctrl, 'P')));
    assert_eq!(cfg.hotkeys.save_png, Some(Hotkey::new(Modifier::None, 'S')));

    let state = cfg.build_state();
    assert_eq!(state.waveform(), Waveform::Custom);
    assert_eq!(state.expression(), "abs(x)");
    assert_eq!(state.term_count().get(), 100);
    assert!(state.is_playing());
    assert_eq!(state.autoplay.interval, Duration::from_millis(20));
    assert_eq!(state.coefficient_recomputes(), 1);
}

#[test]
fn json_base_window() {
    let text = r#"{"base_window": {"x_min": -1.0, "x_max": 1.0, "y_min": -3.0, "y_max": 3.0}}"#;
    let cfg = FourierPlotConfig::from_str_with_format(text, "json").unwrap();
    let w = cfg.build_state().visible_window();
    assert_eq!((w.x_min, w.x_max, w.y_min, w.y_max), (-1.0, 1.0, -3.0, 3.0));
}

#[test]
fn unknown_waveform_is_rejected() {
    let err = FourierPlotConfig::from_str_with_format(r#"{"waveform": "sine"}"#, "json");
    assert!(matches!(err, Err(ConfigError::Json(_))));
}

#[test]
fn unsupported_extension() {
    let err = FourierPlotConfig::from_str_with_format("", "toml");
    assert!(matches!(err, Err(ConfigError::UnsupportedExtension(ext)) if ext == "toml"));
}

#[test]
fn load_reads_file_by_extension() {
    let dir = std::env::temp_dir().join(format!("fourierplot_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("explorer.yaml");
    std::fs::write(&path, "waveform: triangle\nterm_count: 12\n").unwrap();
    let cfg = FourierPlotConfig::load(&path).unwrap();
    assert_eq!(cfg.waveform, Waveform::Triangle);
    assert_eq!(cfg.term_count, 12);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_missing_file_is_io_error() {
    let err = FourierPlotConfig::load("/nonexistent/fourierplot.json");
    assert!(matches!(err, Err(ConfigError::Io { .. })));
}

#[test]
fn unusable_render_settings_fall_back_to_defaults() {
    let text = r#"{"render": {"x_grid_spacing": -1.0, "y_grid_spacing": 0.0,
        "error_stride": 0, "reference_stride": 0, "discontinuity_threshold": -3.0}}"#;
    let cfg = FourierPlotConfig::from_str_with_format(text, "json").unwrap();
    let state = cfg.build_state();
    assert_eq!(state.render, fourierplot::data::pipeline::RenderSettings::default());
}

#[test]
fn tiny_grid_spacing_does_not_flood_the_frame() {
    let text = "render:\n  x_grid_spacing: 1.0e-12\n  y_grid_spacing: 1.0e-9\n";
    let cfg = FourierPlotConfig::from_str_with_format(text, "yaml").unwrap();
    let mut state = cfg.build_state();
    assert_eq!(state.render.x_grid_spacing, 1e-12);
    let frame = state.frame([800.0, 600.0]);
    assert!(frame.grid.vertical.is_empty());
    assert!(frame.grid.horizontal.is_empty());
    assert_eq!(frame.approximation.len(), 800);
}

#[test]
fn degenerate_base_window_is_replaced() {
    let text = r#"{"base_window": {"x_min": 1.0, "x_max": 1.0, "y_min": -1.0, "y_max": 1.0}}"#;
    let cfg = FourierPlotConfig::from_str_with_format(text, "json").unwrap();
    let w = cfg.build_state().visible_window();
    assert!(w.width() > 0.0);
    assert!((w.y_max - 2.0).abs() < 1e-12);
}
