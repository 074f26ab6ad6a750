// steam.rs - Rising steam puffs
//
// A puff is a cluster of four small spheres that swirls around a fixed
// center while rising, fading in over its first half second and out over
// its last 0.7s. Puff state only changes through `tick`.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SteamConfig;

const SPHERES_PER_PUFF: usize = 4;
const START_HEIGHT: f32 = 0.4;
const RISE_SPEED: f32 = 0.4;
const CENTER_JITTER: f32 = 0.3;
const MIN_SWIRL_SPEED: f32 = 0.2;
const MAX_SWIRL_SPEED: f32 = 1.0;
const MIN_SCALE_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuffId(pub u64);

/// One sphere of a puff, relative to the puff position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub offset: Vec3,
    pub base_scale: f32,
}

#[derive(Debug, Clone)]
pub struct SteamPuff {
    id: PuffId,
    timing: SteamConfig,

    position: Vec3,
    center: Vec2,  // (x, z)
    age: f32,

    // Swirl
    angle: f32,
    radius: f32,
    angular_speed: f32,
    angular_accel: f32,

    drift: Vec2,   // (x, z) per second

    spheres: [Sphere; SPHERES_PER_PUFF],
}

impl SteamPuff {
    pub fn new(id: PuffId, timing: SteamConfig, rng: &mut impl Rng) -> Self {
        let center = Vec2::new(
            rng.gen_range(-CENTER_JITTER..CENTER_JITTER),
            rng.gen_range(-CENTER_JITTER..CENTER_JITTER),
        );

        let spheres = std::array::from_fn(|_| Sphere {
            offset: Vec3::new(
                rng.gen_range(-0.15..0.15),
                rng.gen_range(0.0..0.2),
                rng.gen_range(-0.15..0.15),
            ),
            base_scale: rng.gen_range(0.3..0.5),
        });

        Self {
            id,
            timing,
            position: Vec3::new(center.x, START_HEIGHT, center.y),
            center,
            age: 0.0,
            angle: rng.gen_range(0.0..TAU),
            radius: rng.gen_range(0.05..0.10),
            angular_speed: rng.gen_range(0.5..1.0),
            angular_accel: rng.gen_range(-0.05..0.05),
            drift: Vec2::new(rng.gen_range(-0.01..0.01), rng.gen_range(-0.01..0.01)),
            spheres,
        }
    }

    /// Advance by `dt` seconds
    pub fn tick(mut self, dt: f32) -> Self {
        self.age += dt;

        self.angular_speed = (self.angular_speed + self.angular_accel * dt)
            .clamp(MIN_SWIRL_SPEED, MAX_SWIRL_SPEED);
        self.angle += self.angular_speed * dt;

        let (sin, cos) = self.angle.sin_cos();
        let planar = self.center + self.radius * Vec2::new(cos, sin) + self.drift * dt;
        self.position.x = planar.x;
        self.position.z = planar.y;
        self.position.y += RISE_SPEED * dt;

        self
    }

    pub fn is_alive(&self) -> bool {
        self.age <= self.timing.lifetime
    }

    /// Linear fade in, hold, linear fade out; always within [0, 1]
    pub fn opacity(&self) -> f32 {
        let SteamConfig { lifetime, fade_in, fade_out, .. } = self.timing;

        let alpha = if self.age < fade_in {
            self.age / fade_in
        } else if self.age > lifetime - fade_out {
            1.0 - (self.age - (lifetime - fade_out)) / fade_out
        } else {
            1.0
        };
        alpha.clamp(0.0, 1.0)
    }

    /// Spheres grow from a tenth of their size during fade-in, then hold
    pub fn sphere_scale(&self, base_scale: f32) -> f32 {
        let min = MIN_SCALE_FACTOR * base_scale;
        if self.age < self.timing.fade_in {
            let t = self.age / self.timing.fade_in;
            min + t * (base_scale - min)
        } else {
            base_scale
        }
    }

    pub fn id(&self) -> PuffId { self.id }
    pub fn age(&self) -> f32 { self.age }
    pub fn position(&self) -> Vec3 { self.position }
    pub fn spheres(&self) -> &[Sphere] { &self.spheres }
    pub fn angular_speed(&self) -> f32 { self.angular_speed }
}

/// Live puffs of one emitter, in spawn order
pub struct SteamPuffs {
    puffs: Vec<SteamPuff>,
    timing: SteamConfig,
    next_id: u64,
    rng: ChaCha8Rng,
}

impl SteamPuffs {
    pub fn new(timing: SteamConfig, seed: u64) -> Self {
        Self {
            puffs: Vec::new(),
            timing,
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn clear(&mut self) {
        self.puffs.clear();
    }

    pub fn spawn(&mut self) -> PuffId {
        let id = PuffId(self.next_id);
        self.next_id += 1;
        self.puffs.push(SteamPuff::new(id, self.timing, &mut self.rng));
        id
    }

    /// Age every puff, then drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        // In-place collect keeps the allocation
        self.puffs = std::mem::take(&mut self.puffs)
            .into_iter()
            .map(|p| p.tick(dt))
            .collect();
        self.puffs.retain(SteamPuff::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SteamPuff> {
        self.puffs.iter()
    }

    pub fn len(&self) -> usize { self.puffs.len() }
    pub fn is_empty(&self) -> bool { self.puffs.is_empty() }

    /// Total spheres across live puffs
    pub fn sphere_count(&self) -> usize {
        self.puffs.len() * SPHERES_PER_PUFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn puff(seed: u64) -> SteamPuff {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        SteamPuff::new(PuffId(0), SteamConfig::default(), &mut rng)
    }

    fn aged(age: f32) -> SteamPuff {
        let mut p = puff(1);
        p.age = age;
        p
    }

    #[test]
    fn spawn_ranges() {
        for seed in 0..200 {
            let p = puff(seed);
            assert!(p.center.x.abs() <= 0.3 && p.center.y.abs() <= 0.3);
            assert!((0.05..=0.10).contains(&p.radius));
            assert!((0.5..=1.0).contains(&p.angular_speed));
            assert!(p.angular_accel.abs() <= 0.05);
            assert!(p.drift.x.abs() <= 0.01 && p.drift.y.abs() <= 0.01);
            assert_eq!(p.position.y, START_HEIGHT);
            assert_eq!(p.spheres.len(), 4);
            for s in p.spheres {
                assert!(s.offset.x.abs() <= 0.15 && s.offset.z.abs() <= 0.15);
                assert!((0.0..=0.2).contains(&s.offset.y));
                assert!((0.3..=0.5).contains(&s.base_scale));
            }
        }
    }

    #[test]
    fn opacity_curve_keypoints() {
        assert!(aged(0.0).opacity().abs() < EPS);
        assert!((aged(0.25).opacity() - 0.5).abs() < EPS);
        assert!((aged(0.5).opacity() - 1.0).abs() < EPS);
        assert!((aged(1.5).opacity() - 1.0).abs() < EPS);
        assert!((aged(2.3).opacity() - 1.0).abs() < EPS);
        assert!((aged(2.65).opacity() - 0.5).abs() < EPS);
        assert!(aged(3.0).opacity().abs() < EPS);
    }

    #[test]
    fn opacity_stays_in_unit_range() {
        for i in 0..=3000 {
            let a = aged(i as f32 * 0.001).opacity();
            assert!((0.0..=1.0).contains(&a), "age {} opacity {}", i as f32 * 0.001, a);
        }
        // Slightly past the end, before removal
        assert_eq!(aged(3.05).opacity(), 0.0);
    }

    #[test]
    fn sphere_scale_grows_only_during_fade_in() {
        let base = 0.4;
        assert!((aged(0.0).sphere_scale(base) - 0.04).abs() < EPS);
        assert!((aged(0.25).sphere_scale(base) - 0.22).abs() < EPS);
        for age in [0.5, 1.0, 2.3, 2.9, 3.0] {
            assert_eq!(aged(age).sphere_scale(base), base);
        }
    }

    #[test]
    fn swirl_speed_stays_clamped() {
        let mut p = puff(5);
        p.angular_accel = 0.05;
        for _ in 0..10_000 { p = p.tick(0.1); }
        assert!((MIN_SWIRL_SPEED..=MAX_SWIRL_SPEED).contains(&p.angular_speed));
        assert_eq!(p.angular_speed, MAX_SWIRL_SPEED);

        p.angular_accel = -0.05;
        for _ in 0..10_000 {
            p = p.tick(0.1);
            assert!((MIN_SWIRL_SPEED..=MAX_SWIRL_SPEED).contains(&p.angular_speed));
        }
        assert_eq!(p.angular_speed, MIN_SWIRL_SPEED);
    }

    #[test]
    fn tick_moves_around_center_and_rises() {
        let p = puff(7);
        let (center, radius, drift) = (p.center, p.radius, p.drift);
        let p = p.tick(0.5);

        let planar = Vec2::new(p.position.x, p.position.z) - drift * 0.5;
        assert!(((planar - center).length() - radius).abs() < 1e-4);
        assert!((p.position.y - (START_HEIGHT + 0.2)).abs() < EPS);
        assert!((p.age - 0.5).abs() < EPS);
    }

    #[test]
    fn spheres_never_change() {
        let p = puff(11);
        let before = p.spheres;
        let p = p.tick(0.016).tick(0.5).tick(1.0);
        assert_eq!(before, p.spheres);
    }

    #[test]
    fn collection_removes_on_first_tick_past_lifetime() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 3);
        puffs.spawn();

        let mut last_age = 0.0;
        let mut ticks = 0;
        while !puffs.is_empty() {
            puffs.tick(0.25);
            ticks += 1;
            if let Some(p) = puffs.iter().next() {
                assert!(p.age() >= last_age);
                assert!(p.age() <= 3.0);
                last_age = p.age();
            }
        }
        // 12 ticks reach exactly 3.0 (still alive), the 13th exceeds it
        assert_eq!(ticks, 13);
    }

    #[test]
    fn removal_keeps_younger_puffs() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 3);
        let old = puffs.spawn();
        puffs.tick(2.9);
        let young = puffs.spawn();
        puffs.tick(0.2);

        let ids: Vec<PuffId> = puffs.iter().map(SteamPuff::id).collect();
        assert_eq!(ids, vec![young]);
        assert_ne!(old, young);
    }

    #[test]
    fn tick_reuses_buffer() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 3);
        for _ in 0..8 { puffs.spawn(); }
        let (ptr, cap) = (puffs.puffs.as_ptr(), puffs.puffs.capacity());

        for _ in 0..10 { puffs.tick(0.1); }
        assert_eq!(puffs.len(), 8);
        assert_eq!(puffs.puffs.as_ptr(), ptr);
        assert_eq!(puffs.puffs.capacity(), cap);

        puffs.tick(2.5);
        assert!(puffs.is_empty());
        assert_eq!(puffs.puffs.capacity(), cap);
    }

    #[test]
    fn ids_are_unique() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 3);
        let a = puffs.spawn();
        let b = puffs.spawn();
        let c = puffs.spawn();
        assert!(a != b && b != c && a != c);
        assert_eq!(puffs.sphere_count(), 12);
    }
}
