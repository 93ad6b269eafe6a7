//! Standalone application: controls, canvas interaction and per-frame wiring.
//!
//! Each frame runs in a fixed order:
//!
//! 1. apply pending [`ExplorerController`] requests,
//! 2. advance autoplay by the elapsed wall time,
//! 3. handle hotkeys and the control bar,
//! 4. handle pointer input on the canvas, sample the frame and paint it,
//! 5. publish the resulting [`FrameInfo`](crate::data::explorer::FrameInfo).

use std::time::Instant;

use eframe::egui;
use egui_phosphor::regular as icons;

use crate::config::FourierPlotConfig;
use crate::controllers::ExplorerController;
use crate::data::axis_format::{format_window, AxisFormatter, PiFormatter};
use crate::data::autoplay::{TermCount, MAX_TERMS};
use crate::data::explorer::ExplorerState;
use crate::data::hotkeys::{self as hotkey_helpers, format_button_tooltip, HotkeyName, Hotkeys};
use crate::data::waveform::Waveform;

use super::canvas::{paint_frame, CurveLook};
use super::export;

/// Symbols offered by the expression keypad, inserted verbatim.
const KEYPAD: [&str; 22] = [
    "x", "PI", "E", "+", "-", "*", "/", "^", "(", ")", ",", "sin(", "cos(", "tan(", "abs(",
    "sqrt(", "pow(", "floor(", "ceil(", "sign(", "max(", "min(",
];

/// Harmonics listed in the coefficient readout.
const COEFFICIENT_ROWS: usize = 8;

pub struct FourierApp {
    pub state: ExplorerState,
    pub hotkeys: Hotkeys,
    pub look: CurveLook,
    pub controller: Option<ExplorerController>,
    expression_text: String,
    last_tick: Option<Instant>,
    request_screenshot: bool,
}

impl Default for FourierApp {
    fn default() -> Self {
        Self::new(ExplorerState::default())
    }
}

impl FourierApp {
    pub fn new(state: ExplorerState) -> Self {
        Self {
            expression_text: state.expression().to_string(),
            state,
            hotkeys: Hotkeys::default(),
            look: CurveLook::default(),
            controller: None,
            last_tick: None,
            request_screenshot: false,
        }
    }

    /// Build the app from a configuration, taking its controller.
    pub fn from_config(cfg: &mut FourierPlotConfig) -> Self {
        let mut app = Self::new(cfg.build_state());
        app.hotkeys = cfg.hotkeys.clone();
        app.controller = cfg.controller.take();
        app
    }

    fn apply_controller(&mut self) {
        if let Some(ctrl) = &self.controller {
            if ctrl.apply_to(&mut self.state) {
                self.request_screenshot = true;
            }
            if self.expression_text != self.state.expression() {
                self.expression_text = self.state.expression().to_string();
            }
        }
    }

    fn advance_autoplay(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let elapsed = self
            .last_tick
            .map(|t| now.duration_since(t))
            .unwrap_or_default();
        self.last_tick = Some(now);
        self.state.tick(elapsed);
        if self.state.is_playing() {
            ctx.request_repaint_after(self.state.autoplay.until_next());
        }
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        for act in hotkey_helpers::detect_hotkey_actions(&self.hotkeys, ctx) {
            match act {
                HotkeyName::PlayPause => self.state.toggle_playing(),
                HotkeyName::ResetView => self.state.reset_view(),
                HotkeyName::MoreTerms => {
                    let n = self.state.term_count().increment();
                    self.state.set_term_count(n.get());
                }
                HotkeyName::FewerTerms => {
                    let n = self.state.term_count().decrement();
                    self.state.set_term_count(n.get());
                }
                HotkeyName::SavePng => self.request_screenshot = true,
            }
        }
    }

    fn tooltip(&self, description: &str, name: HotkeyName) -> String {
        format_button_tooltip(description, self.hotkeys.get(name))
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut waveform = self.state.waveform();
            egui::ComboBox::from_id_salt("waveform")
                .selected_text(waveform.label())
                .show_ui(ui, |ui| {
                    for w in Waveform::ALL {
                        ui.selectable_value(&mut waveform, w, w.label());
                    }
                });
            if waveform != self.state.waveform() {
                self.state.set_waveform(waveform);
            }

            ui.separator();

            let n = self.state.term_count();
            let mut pos = n.slider_position();
            let resp = ui.add(
                egui::Slider::new(&mut pos, 0.0..=1.0)
                    .show_value(false)
                    .clamping(egui::SliderClamping::Always),
            );
            if resp.changed() {
                self.state
                    .set_term_count(TermCount::from_slider_position(pos).get());
            }
            let mut n_value = self.state.term_count().get();
            let dv = ui.add(
                egui::DragValue::new(&mut n_value)
                    .range(1..=MAX_TERMS)
                    .prefix("N = "),
            );
            if dv.changed() {
                self.state.set_term_count(n_value);
            }

            ui.separator();

            let (icon, label) = if self.state.is_playing() {
                (icons::PAUSE, "Pause")
            } else {
                (icons::PLAY, "Play")
            };
            if ui
                .button(format!("{icon} {label}"))
                .on_hover_text(self.tooltip("Animate the term count", HotkeyName::PlayPause))
                .clicked()
            {
                self.state.toggle_playing();
            }
            if ui
                .button(format!("{} Reset", icons::ARROW_COUNTER_CLOCKWISE))
                .on_hover_text(self.tooltip("Reset zoom and pan", HotkeyName::ResetView))
                .clicked()
            {
                self.state.reset_view();
            }
            if ui
                .button(format!("{} Save PNG", icons::CAMERA))
                .on_hover_text(self.tooltip("Save a snapshot of the window", HotkeyName::SavePng))
                .clicked()
            {
                self.request_screenshot = true;
            }

            ui.separator();
            ui.monospace(format!("MSE {:.6}", self.state.mse()));
        });

        if self.state.waveform() == Waveform::Custom {
            self.render_expression_editor(ui);
        }

        ui.horizontal(|ui| {
            ui.weak(format_window(&self.state.visible_window(), 2));
            ui.weak(format!("zoom {:.2}×", self.state.viewport.zoom));
        });
    }

    fn render_expression_editor(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("f(x) =");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.expression_text)
                    .code_editor()
                    .desired_width(320.0),
            );
            if resp.changed() {
                self.state.set_expression(self.expression_text.clone());
            }
            if let Some(err) = self.state.expression_error() {
                ui.colored_label(ui.visuals().warn_fg_color, format!("{err} (plotted as 0)"));
            }
        });
        ui.horizontal_wrapped(|ui| {
            for sym in KEYPAD {
                if ui.small_button(sym).clicked() {
                    self.expression_text.push_str(sym);
                    self.state.set_expression(self.expression_text.clone());
                }
            }
            if ui.small_button(icons::BACKSPACE).clicked() {
                self.expression_text.pop();
                self.state.set_expression(self.expression_text.clone());
            }
        });
        egui::CollapsingHeader::new("Coefficients")
            .default_open(false)
            .show(ui, |ui| {
                let Some(table) = self.state.coefficients() else {
                    return;
                };
                ui.monospace(format!("a0 = {:+.5}", table.a0));
                egui::Grid::new("coefficients").striped(true).show(ui, |ui| {
                    ui.strong("n");
                    ui.strong("aₙ");
                    ui.strong("bₙ");
                    ui.end_row();
                    for n in 1..=COEFFICIENT_ROWS.min(table.len()) {
                        if let Some((a, b)) = table.harmonic(n) {
                            ui.monospace(n.to_string());
                            ui.monospace(format!("{a:+.5}"));
                            ui.monospace(format!("{b:+.5}"));
                            ui.end_row();
                        }
                    }
                });
            });
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let (w, h) = (rect.width() as f64, rect.height() as f64);
        if w < 1.0 || h < 1.0 {
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let d = response.drag_delta();
            self.state.pan_by(d.x as f64, d.y as f64, w, h);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                if let Some(pos) = response.hover_pos() {
                    let ratio = ((pos.x - rect.left()) / rect.width()) as f64;
                    self.state.zoom_at(ratio, scroll.signum() as f64);
                }
            }
        }
        if response.double_clicked() {
            self.state.reset_view();
        }

        let frame = self.state.frame([w, h]);
        paint_frame(&painter, rect, &frame, &self.look);

        if let Some(pos) = response.hover_pos() {
            let [x, y] = self
                .state
                .viewport
                .to_data([(pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64], [w, h]);
            let x_label = AxisFormatter::Pi(PiFormatter::default()).format(x, 3, frame.window.width());
            painter.text(
                rect.right_top() + egui::vec2(-8.0, 8.0),
                egui::Align2::RIGHT_TOP,
                format!("x = {x_label}  y = {y:.3}"),
                egui::FontId::monospace(12.0),
                self.look.label,
            );
        }
    }
}

impl eframe::App for FourierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_controller();
        self.advance_autoplay(ctx);
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.render_controls(ui);
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.render_canvas(ui);
            });

        if std::mem::take(&mut self.request_screenshot) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
        export::handle_screenshot_events(ctx);

        if let Some(ctrl) = &self.controller {
            ctrl.publish(self.state.info());
        }
    }
}
