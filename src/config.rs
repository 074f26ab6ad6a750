// config.rs - Scene configuration
//
// Every field has a default matching the live page, so an empty JSON object
// (or an empty TOML file) produces the stock scene. Configs come from JS as
// JSON and from disk as TOML for the preview tool.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoupError};
use crate::world::{Camera, Easing};

/// Upper bound on `count`; each bowl also carries a steam emitter and timer
pub const MAX_BOWLS: u32 = 2_000;

/// Top-level parameters accepted when the scene is composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scalar motion multiplier for every bowl
    pub speed: f32,

    /// Number of floating bowls
    pub count: u32,

    /// Maximum placement depth along the viewing axis
    pub depth: f32,

    /// Maps normalized bowl index to a depth fraction
    pub easing: Easing,

    pub steam: SteamConfig,

    pub camera: Camera,

    /// Fixed RNG seed; the wasm entry draws one from `Math.random()` if unset
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            count: 60,
            depth: 70.0,
            easing: Easing::QuarterCircle,
            steam: SteamConfig::default(),
            camera: Camera::default(),
            seed: None,
        }
    }
}

/// Lifetime and fade windows for steam puffs, plus the spawn cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    /// Seconds a puff lives
    pub lifetime: f32,

    /// Seconds of fade-in (opacity and sphere growth)
    pub fade_in: f32,

    /// Seconds of fade-out at the end of life
    pub fade_out: f32,

    pub spawn_delay_ms: DelayRange,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            lifetime: 3.0,
            fade_in: 0.5,
            fade_out: 0.7,
            spawn_delay_ms: DelayRange::default(),
        }
    }
}

/// Inclusive range for a uniformly drawn delay, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u32,
    pub max: u32,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min: 400, max: 900 }
    }
}

impl SceneConfig {
    pub fn from_json(src: &str) -> Result<Self> {
        let cfg: SceneConfig = serde_json::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        let cfg: SceneConfig = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation has no sensible behavior for.
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SoupError::invalid("speed", format!("must be finite and >= 0, got {}", self.speed)));
        }
        if self.count > MAX_BOWLS {
            return Err(SoupError::invalid("count", format!("must be <= {MAX_BOWLS}, got {}", self.count)));
        }
        if !self.depth.is_finite() || self.depth < 0.0 {
            return Err(SoupError::invalid("depth", format!("must be finite and >= 0, got {}", self.depth)));
        }
        if !(self.camera.distance > 0.0) {
            return Err(SoupError::invalid("camera.distance", "must be > 0"));
        }
        if !(self.camera.fov_deg > 0.0 && self.camera.fov_deg < 180.0) {
            return Err(SoupError::invalid("camera.fov_deg", "must be in (0, 180)"));
        }
        self.steam.validate()
    }
}

/// Viewport width over height; must be a positive finite number
pub fn validate_aspect(aspect: f32) -> Result<()> {
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(SoupError::invalid("aspect", format!("must be finite and > 0, got {aspect}")));
    }
    Ok(())
}

impl SteamConfig {
    pub fn validate(&self) -> Result<()> {
        let SteamConfig { lifetime, fade_in, fade_out, spawn_delay_ms } = *self;

        if !(fade_in > 0.0) {
            return Err(SoupError::invalid("steam.fade_in", "must be > 0"));
        }
        if !(fade_out > 0.0) {
            return Err(SoupError::invalid("steam.fade_out", "must be > 0"));
        }
        // Overlapping fade windows have no defined curve
        if !(lifetime >= fade_in + fade_out) {
            return Err(SoupError::FadeWindowsOverlap { lifetime, fade_in, fade_out });
        }
        if spawn_delay_ms.min == 0 {
            return Err(SoupError::invalid("steam.spawn_delay_ms.min", "must be > 0"));
        }
        if spawn_delay_ms.min > spawn_delay_ms.max {
            return Err(SoupError::invalid(
                "steam.spawn_delay_ms",
                format!("min {} exceeds max {}", spawn_delay_ms.min, spawn_delay_ms.max),
            ));
        }
        Ok(())
    }
}
