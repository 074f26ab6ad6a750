// error.rs - Everything that can fail outside the frame loop
//
// Ticking the simulation never fails. Loading a config and talking to the
// browser's timer API can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoupError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("steam lifetime {lifetime}s is shorter than fade-in {fade_in}s + fade-out {fade_out}s")]
    FadeWindowsOverlap { lifetime: f32, fade_in: f32, fade_out: f32 },

    #[error("no global `window` available")]
    NoWindow,

    #[error("timer host rejected callback: {0}")]
    Timer(String),
}

impl SoupError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SoupError::Invalid { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SoupError>;
