//! eframe shell around the explorer state.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`fourier_app`] | [`FourierApp`]: controls, pointer input, per-frame wiring |
//! | [`canvas`]      | painting a sampled frame with the egui painter |
//! | [`export`]      | PNG snapshots |
//! | [`run`]         | [`run_fourierplot()`] entry point and [`icon_from_svg`] |

pub mod canvas;
pub mod export;
mod fourier_app;
mod run;

pub use fourier_app::FourierApp;
pub use run::{icon_from_svg, run_fourierplot, ICON_SIZE};
