// easing.rs - Depth placement curves
//
// Bowl `i` of `n` sits at `round(easing(i / n) * depth)`. The default
// quarter-circle packs most bowls toward the back of the scene.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `sqrt(1 - (t - 1)^2)`
    #[default]
    QuarterCircle,
    Linear,
    /// Caller-supplied curve, not reachable from a config file
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Easing {
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::QuarterCircle => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::Linear => t,
            Easing::Custom(f) => f(t),
        }
    }
}

/// Depth of bowl `index` in a scene of `count` bowls
#[inline]
pub fn placement_depth(index: u32, count: u32, depth: f32, easing: &Easing) -> f32 {
    if count == 0 { return 0.0; }
    (easing.apply(index as f32 / count as f32) * depth).round()
}
