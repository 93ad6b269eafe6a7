use std::f64::consts::PI;

use fourierplot::data::axis_format::*;
use fourierplot::data::viewport::Viewport;

#[test]
fn pi_formatter_names_multiples() {
    let pf = PiFormatter::default();
    assert_eq!(pf.format(0.0, 2), "0");
    assert_eq!(pf.format(PI, 2), "π");
    assert_eq!(pf.format(-PI, 2), "-π");
    assert_eq!(pf.format(2.0 * PI, 2), "2π");
    assert_eq!(pf.format(3.0 * PI / 4.0, 2), "3π/4");
    assert_eq!(pf.format(-PI / 4.0, 2), "-π/4");
    assert_eq!(pf.format(PI / 3.0, 2), "π/3");
}

#[test]
fn pi_formatter_falls_back_to_decimals() {
    let pf = PiFormatter::default();
    assert_eq!(pf.format(1.0, 2), "1.00");
    assert_eq!(pf.format(PI / 5.0, 3), "0.628");
    assert_eq!(pf.format(f64::INFINITY, 2), "inf");

    let halves_only = PiFormatter {
        max_denominator: 1,
        ..PiFormatter::default()
    };
    assert_eq!(halves_only.format(PI / 2.0, 2), "1.57");
}

#[test]
fn decimal_formatter_fixed_places_and_unit() {
    let df = DecimalFormatter {
        decimal_places: Some(1),
        unit: Some("rad".to_string()),
    };
    assert_eq!(df.format(1.234, 3), "1.2 rad");
    assert_eq!(DecimalFormatter::default().format(1.234, 3), "1.234");
}

#[test]
fn scientific_formatter() {
    let sf = ScientificFormatter::default();
    assert_eq!(sf.format(12340.0, 2), "1.23e4");
    assert_eq!(sf.format(-0.04, 2), "-4.00e-2");
    assert_eq!(sf.format(0.0, 2), "0.00");
    assert_eq!(sf.format(5.0, 1), "5.0");
}

#[test]
fn auto_switches_to_scientific_for_extreme_steps() {
    let auto = AxisFormatter::Auto;
    assert_eq!(auto.format(0.5, 2, 1.0), "0.50");
    assert_eq!(auto.format(1234.0, 2, 1e4), "1.23e3");
    assert_eq!(auto.format(0.00025, 2, 1e-4), "2.50e-4");
}

#[test]
fn axis_formatter_dispatches() {
    assert_eq!(
        AxisFormatter::Pi(PiFormatter::default()).format(PI / 2.0, 2, 1.0),
        "π/2"
    );
    assert_eq!(
        AxisFormatter::Decimal(DecimalFormatter::default()).format(2.0, 1, 1e9),
        "2.0"
    );
}

#[test]
fn window_readout_for_default_view() {
    let w = Viewport::default().visible_window();
    assert_eq!(format_window(&w, 2), "x: [-6.28, 6.28]  y: [-2.00, 2.00]");
}

#[test]
fn y_tick_labels_stay_decimal_when_zoomed_out() {
    assert_eq!(y_tick_label(15.0, 1.0), "15");
    assert_eq!(y_tick_label(10.0, 1.0), "10");
    assert_eq!(y_tick_label(-20.0, 1.0), "-20");
    assert_eq!(y_tick_label(0.5, 0.5), "0.5");
    assert_eq!(y_tick_label(0.75, 0.25), "0.75");

    let mut vp = Viewport::default();
    vp.zoom = 0.1;
    let grid = fourierplot::data::pipeline::grid_lines(
        &vp.visible_window(),
        [800.0, 600.0],
        &fourierplot::data::pipeline::RenderSettings::default(),
    );
    assert_eq!(grid.y_step, 1.0);
    let labels: Vec<String> = grid
        .horizontal
        .iter()
        .map(|l| y_tick_label(l.value, grid.y_step))
        .collect();
    assert!(labels.contains(&"15".to_string()));
    assert!(labels.iter().all(|l| !l.contains('e')));
}

#[test]
fn decimals_follow_step() {
    assert_eq!(decimals_for_step(1.0), 0);
    assert_eq!(decimals_for_step(10.0), 0);
    assert_eq!(decimals_for_step(0.5), 1);
    assert_eq!(decimals_for_step(0.25), 2);
    assert_eq!(decimals_for_step(PI), 3);
    assert_eq!(decimals_for_step(0.0), 0);
    assert_eq!(decimals_for_step(f64::NAN), 0);
}
