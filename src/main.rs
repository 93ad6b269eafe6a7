//! Standalone Fourier series explorer.
//!
//! Usage: `fourierplot [config.json|config.yaml]`. Log verbosity follows `RUST_LOG`
//! (default `info`).

use fourierplot::{run_fourierplot, FourierPlotConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => FourierPlotConfig::load(&path).unwrap_or_else(|e| {
            log::error!("{e}; starting with defaults");
            FourierPlotConfig::default()
        }),
        None => FourierPlotConfig::default(),
    };
    run_fourierplot(cfg)
}
