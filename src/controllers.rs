//! Controller for driving the explorer from external code.
//!
//! [`ExplorerController`] is a cheap, cloneable handle. Non-UI code queues the same
//! requests the on-screen controls produce (waveform, expression, term count,
//! playback, view reset) and can subscribe to a [`FrameInfo`] published after every
//! rendered frame. Requests are applied at the start of the next frame, before the
//! frame is sampled.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::explorer::{ExplorerState, FrameInfo};
use crate::data::waveform::Waveform;

#[derive(Clone, Default)]
pub struct ExplorerController {
    pub(crate) inner: Arc<Mutex<ExplorerCtrlInner>>,
}

#[derive(Default)]
pub(crate) struct ExplorerCtrlInner {
    pub(crate) request_waveform: Option<Waveform>,
    pub(crate) request_expression: Option<String>,
    pub(crate) request_term_count: Option<usize>,
    pub(crate) request_playing: Option<bool>,
    pub(crate) request_reset_view: bool,
    pub(crate) request_screenshot: bool,
    pub(crate) last_info: Option<FrameInfo>,
    pub(crate) listeners: Vec<Sender<FrameInfo>>,
}

impl ExplorerController {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ExplorerCtrlInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Request a waveform change.
    pub fn set_waveform(&self, waveform: Waveform) {
        self.lock().request_waveform = Some(waveform);
    }

    /// Request a new custom expression. Does not switch the waveform by itself.
    pub fn set_expression(&self, text: impl Into<String>) {
        self.lock().request_expression = Some(text.into());
    }

    /// Request a term count; clamped to `[1, 100]` when applied.
    pub fn set_term_count(&self, n: usize) {
        self.lock().request_term_count = Some(n);
    }

    pub fn set_playing(&self, playing: bool) {
        self.lock().request_playing = Some(playing);
    }

    pub fn reset_view(&self) {
        self.lock().request_reset_view = true;
    }

    /// Request a PNG snapshot of the window (the UI asks for a file name).
    pub fn request_screenshot(&self) {
        self.lock().request_screenshot = true;
    }

    /// The most recently published frame summary.
    pub fn last_info(&self) -> Option<FrameInfo> {
        self.lock().last_info.clone()
    }

    /// Subscribe to frame summaries. The receiver gets one [`FrameInfo`] per rendered frame.
    pub fn subscribe(&self) -> Receiver<FrameInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().listeners.push(tx);
        rx
    }

    /// Apply and clear all pending requests. Returns `true` if a screenshot was requested.
    pub fn apply_to(&self, state: &mut ExplorerState) -> bool {
        let mut inner = self.lock();
        if let Some(text) = inner.request_expression.take() {
            state.set_expression(text);
        }
        if let Some(w) = inner.request_waveform.take() {
            state.set_waveform(w);
        }
        if let Some(n) = inner.request_term_count.take() {
            state.set_term_count(n);
        }
        if let Some(p) = inner.request_playing.take() {
            state.set_playing(p);
        }
        if std::mem::take(&mut inner.request_reset_view) {
            state.reset_view();
        }
        std::mem::take(&mut inner.request_screenshot)
    }

    /// Record `info` and send it to every live subscriber, dropping closed ones.
    pub fn publish(&self, info: FrameInfo) {
        let mut inner = self.lock();
        inner.listeners.retain(|tx| tx.send(info.clone()).is_ok());
        inner.last_info = Some(info);
    }
}
