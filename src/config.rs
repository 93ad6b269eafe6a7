//! Startup configuration for the explorer window.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controllers::ExplorerController;
use crate::data::autoplay::{Autoplay, DEFAULT_INTERVAL};
use crate::data::explorer::{ExplorerState, DEFAULT_EXPRESSION};
use crate::data::hotkeys::Hotkeys;
use crate::data::pipeline::RenderSettings;
use crate::data::viewport::BaseWindow;
use crate::data::waveform::Waveform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config extension '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedExtension(String),
}

/// Configuration applied once when the explorer starts.
///
/// The serializable part can be loaded from JSON or YAML with [`FourierPlotConfig::load`];
/// `native_options` and `controller` are runtime-only.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FourierPlotConfig {
    /// Window title.
    pub title: String,
    pub waveform: Waveform,
    /// Initial custom expression in `x`.
    pub expression: String,
    /// Initial number of terms, clamped to `[1, 100]`.
    pub term_count: usize,
    /// Start with autoplay running.
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
    pub render: RenderSettings,
    /// Data-space extents at zoom 1.
    pub base_window: BaseWindow,
    pub hotkeys: Hotkeys,
    /// Optional native window options (size, icon, ...).
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
    /// Optional handle for controlling the explorer from other code.
    #[serde(skip)]
    pub controller: Option<ExplorerController>,
}

impl Default for FourierPlotConfig {
    fn default() -> Self {
        Self {
            title: "Fourier Series Explorer".to_string(),
            waveform: Waveform::Square,
            expression: DEFAULT_EXPRESSION.to_string(),
            term_count: 5,
            autoplay: false,
            autoplay_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            render: RenderSettings::default(),
            base_window: BaseWindow::default(),
            hotkeys: Hotkeys::default(),
            native_options: None,
            controller: None,
        }
    }
}

impl FourierPlotConfig {
    /// Load from a `.json`, `.yaml` or `.yml` file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let cfg = Self::from_str_with_format(&text, &ext)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Parse `text` as `json` or `yaml`/`yml`.
    pub fn from_str_with_format(text: &str, format: &str) -> Result<Self, ConfigError> {
        match format {
            "json" => Ok(serde_json::from_str(text)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(text)?),
            other => Err(ConfigError::UnsupportedExtension(other.to_string())),
        }
    }

    /// Explorer state initialised from this configuration.
    ///
    /// Unusable render settings and a degenerate base window fall back to defaults.
    pub fn build_state(&self) -> ExplorerState {
        let mut autoplay =
            Autoplay::new(std::time::Duration::from_millis(self.autoplay_interval_ms));
        autoplay.set_playing(self.autoplay);
        let base = if self.base_window.is_valid() {
            self.base_window
        } else {
            log::warn!("ignoring degenerate base window {:?}", self.base_window);
            BaseWindow::default()
        };
        let mut state = ExplorerState::new(base, self.render, autoplay);
        state.set_expression(self.expression.clone());
        state.set_waveform(self.waveform);
        state.set_term_count(self.term_count);
        state
    }
}
