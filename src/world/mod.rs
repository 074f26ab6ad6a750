// world/ - Viewport geometry
//
// Pure functions to place bowls and size their visible area.
// No state, no allocation - just math.

mod camera;
mod easing;

pub use camera::*;
pub use easing::*;
