pub mod autoplay;
pub mod axis_format;
pub mod coefficients;
pub mod explorer;
pub mod expression;
pub mod hotkeys;
pub mod pipeline;
pub mod series;
pub mod viewport;
pub mod waveform;
