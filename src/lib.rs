//! Fourierplot crate root: module wiring and re-exports.
//!
//! An interactive explorer for truncated Fourier series built on egui/eframe:
//! - `data`: the numeric core (expression evaluator, coefficient engine, series
//!   evaluator, viewport transform, per-frame sampling) and the owned explorer state
//! - `app`: the eframe window that drives and paints that state
//! - `controllers`: drive a running explorer from other code
//! - `config`: startup configuration

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;

pub use app::{run_fourierplot, FourierApp};
pub use config::{ConfigError, FourierPlotConfig};
pub use controllers::ExplorerController;
pub use data::explorer::{ExplorerState, FrameInfo};
pub use data::expression::{evaluate, ExprError, Expression};
pub use data::waveform::Waveform;
