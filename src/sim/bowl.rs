// bowl.rs - Floating bowls
//
// Each bowl drifts on a straight heading across the plane at its depth,
// tumbling slowly. Once it leaves the padded viewport it re-enters from a
// random edge, aimed back at the origin.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use log::trace;
use rand::Rng;

use crate::world::Extent;

/// Frames longer than this are clock hiccups (tab switch, GC pause)
pub const MAX_STEP: f32 = 0.1;

/// Leaving `extent * BOUNDS_MARGIN` triggers a respawn
const BOUNDS_MARGIN: f32 = 1.3;

/// Respawn line, just outside the viewport but inside the bounds
const EDGE_OFFSET: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Bottom,
            2 => Edge::Left,
            _ => Edge::Right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FloatingBowl {
    index: u32,
    depth: f32,
    extent: Extent,
    speed: f32,

    position: Vec2,
    heading: f32,

    // Tumble
    spin: f32,
    rot_x: f32,
    rot_z: f32,
    yaw: f32,
}

impl FloatingBowl {
    /// Fresh bowl somewhere inside the viewport, heading anywhere
    pub fn spawn_inside(index: u32, depth: f32, extent: Extent, speed: f32, rng: &mut impl Rng) -> Self {
        let position = Vec2::new(spread(rng, extent.width), spread(rng, extent.height));
        let heading = rng.gen_range(0.0..TAU);

        let mut bowl = Self {
            index,
            depth,
            extent,
            speed,
            position,
            heading,
            spin: 1.0,
            rot_x: 0.0,
            rot_z: 0.0,
            yaw: yaw_at(index, 0.0),
        };
        bowl.reroll_tumble(rng);
        bowl
    }

    /// Advance by `dt` seconds to scene time `elapsed`, respawning from an
    /// edge if the bowl left the bounds. Oversized steps leave the bowl
    /// untouched, yaw included.
    pub fn tick(mut self, dt: f32, elapsed: f32, rng: &mut impl Rng) -> Self {
        if dt > MAX_STEP { return self; }

        let (sin, cos) = self.heading.sin_cos();
        self.position += Vec2::new(cos, sin) * self.speed * dt;

        self.rot_x += dt / self.spin;
        self.rot_z += dt / self.spin;
        self.yaw = yaw_at(self.index, elapsed);

        if self.is_outside() {
            let edge = Edge::random(rng);
            trace!("bowl {} left the view, re-entering from {:?}", self.index, edge);
            self.respawn(edge, rng);
        }
        self
    }

    pub fn is_outside(&self) -> bool {
        self.position.x.abs() > self.extent.width * BOUNDS_MARGIN
            || self.position.y.abs() > self.extent.height * BOUNDS_MARGIN
    }

    /// Re-enter from `edge`, heading for the origin
    pub fn respawn(&mut self, edge: Edge, rng: &mut impl Rng) {
        let Extent { width, height } = self.extent;

        self.position = match edge {
            Edge::Top => Vec2::new(spread(rng, width * 2.0), height * EDGE_OFFSET),
            Edge::Bottom => Vec2::new(spread(rng, width * 2.0), -height * EDGE_OFFSET),
            Edge::Left => Vec2::new(-width * EDGE_OFFSET, spread(rng, height * 2.0)),
            Edge::Right => Vec2::new(width * EDGE_OFFSET, spread(rng, height * 2.0)),
        };
        self.heading = (-self.position.y).atan2(-self.position.x);
        self.reroll_tumble(rng);
    }

    fn reroll_tumble(&mut self, rng: &mut impl Rng) {
        self.spin = rng.gen_range(1.0..=2.0);
        self.rot_x = rng.gen_range(0.0..PI);
        self.rot_z = rng.gen_range(0.0..PI);
    }

    /// Viewport changed; position and heading carry over
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    /// Rotation about the vertical axis as of the last applied tick
    pub fn yaw(&self) -> f32 { self.yaw }

    pub fn index(&self) -> u32 { self.index }
    pub fn depth(&self) -> f32 { self.depth }
    pub fn extent(&self) -> Extent { self.extent }
    pub fn position(&self) -> Vec2 { self.position }
    pub fn heading(&self) -> f32 { self.heading }
    pub fn spin(&self) -> f32 { self.spin }
    pub fn rotation(&self) -> (f32, f32) { (self.rot_x, self.rot_z) }
}

/// Yaw of bowl `index` at scene time `elapsed`
#[inline]
pub fn yaw_at(index: u32, elapsed: f32) -> f32 {
    (index as f32 * 1000.0 + elapsed / 10.0).sin() * PI
}

/// Uniform in `[-range / 2, range / 2]`
#[inline]
fn spread(rng: &mut impl Rng, range: f32) -> f32 {
    range * rng.gen_range(-0.5f32..=0.5)
}
