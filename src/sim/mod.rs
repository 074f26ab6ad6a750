// sim/ - Floating soup simulation
//
// Bowls drift through the scene, each carrying its own steam emitter. The
// host calls `tick` once per animation frame; steam spawns on its own timer.

mod bowl;
mod emitter;
mod steam;

pub use bowl::{Edge, FloatingBowl, MAX_STEP, yaw_at};
pub use emitter::SteamEmitter;
pub use steam::{PuffId, Sphere, SteamPuff, SteamPuffs};

use std::rc::Rc;

use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{SceneConfig, validate_aspect};
use crate::error::Result;
use crate::render::Encoder;
use crate::timer::TimerHost;
use crate::world::placement_depth;

/// Seed used when the config does not pin one
pub const DEFAULT_SEED: u64 = 0x5EED_50_0B;

/// The soup inside each bowl turns this much every frame
const DISH_TURN: f32 = 0.001;

pub struct SoupWorld<H: TimerHost + 'static> {
    config: SceneConfig,
    aspect: f32,

    // Scene clock, advances on every frame including skipped ones
    elapsed: f32,
    dish_yaw: f32,

    // Entities, steam[i] rides on bowls[i]
    bowls: Vec<FloatingBowl>,
    steam: Vec<SteamEmitter<H>>,

    // Output
    encoder: Encoder,

    rng: ChaCha8Rng,
}

impl<H: TimerHost + 'static> SoupWorld<H> {
    pub fn new(config: SceneConfig, aspect: f32, host: Rc<H>) -> Result<Self> {
        config.validate()?;
        validate_aspect(aspect)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        let count = config.count;

        let mut bowls = Vec::with_capacity(count as usize);
        let mut steam = Vec::with_capacity(count as usize);
        for i in 0..count {
            let depth = placement_depth(i, count, config.depth, &config.easing);
            let extent = config.camera.viewport_at(depth, aspect);
            bowls.push(FloatingBowl::spawn_inside(i, depth, extent, config.speed, &mut rng));
            steam.push(SteamEmitter::new(Rc::clone(&host), &config.steam, rng.next_u64())?);
        }

        info!(
            "soup world: {} bowls, depth {} (far plane {}), speed {}",
            count,
            config.depth,
            config.camera.far(config.depth),
            config.speed
        );

        let mut world = Self {
            config,
            aspect,
            elapsed: 0.0,
            dish_yaw: 0.0,
            bowls,
            steam,
            encoder: Encoder::new(),
            rng,
        };
        world.encode();
        Ok(world)
    }

    /// One animation frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.dish_yaw += DISH_TURN;

        let (rng, elapsed) = (&mut self.rng, self.elapsed);
        self.bowls = std::mem::take(&mut self.bowls)
            .into_iter()
            .map(|bowl| bowl.tick(dt, elapsed, rng))
            .collect();

        // Steam has no hiccup guard
        for emitter in &self.steam {
            emitter.tick(dt);
        }

        self.encode();
    }

    /// Rejects a non-positive or non-finite aspect and keeps the old one
    pub fn resize(&mut self, aspect: f32) -> Result<()> {
        validate_aspect(aspect)?;
        self.aspect = aspect;
        for bowl in &mut self.bowls {
            bowl.set_extent(self.config.camera.viewport_at(bowl.depth(), aspect));
        }
        Ok(())
    }

    /// Stop every spawn timer. Safe to call more than once.
    pub fn teardown(&mut self) {
        for emitter in &self.steam {
            emitter.teardown();
        }
    }

    fn encode(&mut self) {
        self.encoder.clear();
        self.encoder.encode_bowls(&self.bowls, self.dish_yaw);
        for (i, emitter) in self.steam.iter().enumerate() {
            self.encoder.encode_steam(i as u32, &emitter.puffs());
        }
    }

    pub fn config(&self) -> &SceneConfig { &self.config }
    pub fn aspect(&self) -> f32 { self.aspect }
    pub fn elapsed(&self) -> f32 { self.elapsed }
    pub fn dish_yaw(&self) -> f32 { self.dish_yaw }
    pub fn bowls(&self) -> &[FloatingBowl] { &self.bowls }
    pub fn emitters(&self) -> &[SteamEmitter<H>] { &self.steam }
    pub fn encoder(&self) -> &Encoder { &self.encoder }
}

impl<H: TimerHost + 'static> Drop for SoupWorld<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
