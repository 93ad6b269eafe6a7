//! Owned explorer state and the operations the UI shell drives.
//!
//! [`ExplorerState`] is the single source of truth for waveform, expression, term
//! count, autoplay and viewport. The render pass borrows it; it never owns it.
//! Coefficient tables are recomputed synchronously inside the setters (and again,
//! if needed, right before sampling), so a frame can never read a stale table.

use std::time::Duration;

use super::autoplay::{Autoplay, TermCount};
use super::coefficients::{CoefficientCache, CoefficientTable, DEFAULT_PERIOD};
use super::expression::{ExprError, Expression};
use super::pipeline::{sample_frame, FrameSamples, RenderSettings};
use super::series::SeriesEvaluator;
use super::viewport::{BaseWindow, Viewport, VisibleWindow};
use super::waveform::Waveform;

pub const DEFAULT_EXPRESSION: &str = "x*x";

/// Summary of the most recent frame, published to controllers and the scale readout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    pub waveform: Waveform,
    pub term_count: usize,
    pub mse: f64,
    pub window: VisibleWindow,
    pub zoom: f64,
    pub playing: bool,
}

pub struct ExplorerState {
    waveform: Waveform,
    expression: String,
    term_count: TermCount,
    pub autoplay: Autoplay,
    pub viewport: Viewport,
    pub render: RenderSettings,
    coefficients: CoefficientCache,
    last_mse: f64,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new(BaseWindow::default(), RenderSettings::default(), Autoplay::default())
    }
}

impl ExplorerState {
    pub fn new(base: BaseWindow, render: RenderSettings, autoplay: Autoplay) -> Self {
        Self {
            waveform: Waveform::default(),
            expression: DEFAULT_EXPRESSION.to_string(),
            term_count: TermCount::default(),
            autoplay,
            viewport: Viewport::new(base),
            render: render.sanitized(),
            coefficients: CoefficientCache::new(),
            last_mse: 0.0,
        }
    }

    // ── Waveform / expression ────────────────────────────────────────────────

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.ensure_coefficients();
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn set_expression(&mut self, text: impl Into<String>) {
        self.expression = text.into();
        self.ensure_coefficients();
    }

    /// Parse diagnostic for the current expression, if it does not parse.
    pub fn expression_error(&self) -> Option<ExprError> {
        Expression::parse(&self.expression).err()
    }

    /// Recompute the coefficient table if the custom expression changed.
    pub fn ensure_coefficients(&mut self) {
        if self.waveform == Waveform::Custom {
            self.coefficients
                .get_or_compute(&self.expression, DEFAULT_PERIOD);
        }
    }

    /// The cached table of the custom expression, if one has been computed.
    pub fn coefficients(&self) -> Option<&CoefficientTable> {
        self.coefficients.cached()
    }

    pub fn coefficient_recomputes(&self) -> usize {
        self.coefficients.recompute_count()
    }

    // ── Term count / autoplay ────────────────────────────────────────────────

    pub fn term_count(&self) -> TermCount {
        self.term_count
    }

    pub fn set_term_count(&mut self, n: usize) {
        self.term_count = TermCount::new(n);
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.autoplay.set_playing(playing);
    }

    pub fn toggle_playing(&mut self) {
        let playing = !self.autoplay.playing;
        self.set_playing(playing);
    }

    /// One autoplay step, regardless of timing.
    pub fn advance(&mut self) {
        self.term_count = self.term_count.advance();
    }

    /// Feed elapsed time to autoplay. Returns `true` if the term count changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let steps = self.autoplay.tick(elapsed);
        for _ in 0..steps {
            self.advance();
        }
        steps > 0
    }

    // ── Viewport ─────────────────────────────────────────────────────────────

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        log::debug!("viewport reset");
    }

    pub fn zoom_at(&mut self, pointer_ratio: f64, delta_sign: f64) {
        self.viewport.zoom_at(pointer_ratio, delta_sign);
    }

    pub fn pan_by(&mut self, pixel_dx: f64, pixel_dy: f64, canvas_width: f64, canvas_height: f64) {
        self.viewport
            .pan_by(pixel_dx, pixel_dy, canvas_width, canvas_height);
    }

    pub fn visible_window(&self) -> VisibleWindow {
        self.viewport.visible_window()
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Evaluator for the current selection. Call [`Self::ensure_coefficients`] first
    /// when the selection may have changed; [`Self::frame`] does so itself.
    pub fn series(&self) -> SeriesEvaluator<'_> {
        match (self.waveform, self.coefficients.cached()) {
            (Waveform::Custom, Some(table)) => SeriesEvaluator::custom(&self.expression, table),
            (w, _) => SeriesEvaluator::closed_form(w),
        }
    }

    /// Sample one frame on a canvas of `[width, height]` pixels and remember its MSE.
    pub fn frame(&mut self, canvas: [f64; 2]) -> FrameSamples {
        self.ensure_coefficients();
        let samples = sample_frame(
            &self.series(),
            self.term_count.get(),
            &self.viewport,
            canvas,
            &self.render,
        );
        self.last_mse = samples.mse;
        samples
    }

    /// MSE of the most recent frame.
    pub fn mse(&self) -> f64 {
        self.last_mse
    }

    pub fn info(&self) -> FrameInfo {
        FrameInfo {
            waveform: self.waveform,
            term_count: self.term_count.get(),
            mse: self.last_mse,
            window: self.visible_window(),
            zoom: self.viewport.zoom,
            playing: self.autoplay.playing,
        }
    }
}
