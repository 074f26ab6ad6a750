// render.rs - Encode simulation state to output buffers
//
// JS views these through Float32Arrays over wasm memory and copies the
// values onto its meshes. Layouts, one record after another:
//
//   bowls  (BOWL_STRIDE)  = x, y, z, rot_x, yaw, rot_z, dish_yaw
//   steam  (STEAM_STRIDE) = bowl, x, y, z, scale, opacity
//
// Bowl z is negative (the bowl sits `depth` units behind the origin). Steam
// coordinates are local to the owning bowl's group.

use crate::sim::{FloatingBowl, SteamPuffs};

pub const BOWL_STRIDE: usize = 7;
pub const STEAM_STRIDE: usize = 6;

#[derive(Default)]
pub struct Encoder {
    bowls: Vec<f32>,
    steam: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bowls.clear();
        self.steam.clear();
    }

    /// Encode bowl transforms
    pub fn encode_bowls(&mut self, bowls: &[FloatingBowl], dish_yaw: f32) {
        self.bowls.reserve(bowls.len() * BOWL_STRIDE);
        for bowl in bowls {
            let p = bowl.position();
            let (rot_x, rot_z) = bowl.rotation();
            self.bowls.extend_from_slice(&[
                p.x,
                p.y,
                -bowl.depth(),
                rot_x,
                bowl.yaw(),
                rot_z,
                dish_yaw,
            ]);
        }
    }

    /// Encode every sphere of every live puff owned by bowl `owner`
    pub fn encode_steam(&mut self, owner: u32, puffs: &SteamPuffs) {
        self.steam.reserve(puffs.sphere_count() * STEAM_STRIDE);
        for puff in puffs.iter() {
            let origin = puff.position();
            let alpha = puff.opacity();
            for sphere in puff.spheres() {
                let p = origin + sphere.offset;
                self.steam.extend_from_slice(&[
                    owner as f32,
                    p.x,
                    p.y,
                    p.z,
                    puff.sphere_scale(sphere.base_scale),
                    alpha,
                ]);
            }
        }
    }

    pub fn bowls(&self) -> &[f32] { &self.bowls }
    pub fn steam(&self) -> &[f32] { &self.steam }

    pub fn bowls_ptr(&self) -> *const f32 { self.bowls.as_ptr() }
    pub fn bowls_len(&self) -> usize { self.bowls.len() }
    pub fn steam_ptr(&self) -> *const f32 { self.steam.as_ptr() }
    pub fn steam_len(&self) -> usize { self.steam.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SteamConfig;
    use crate::world::Extent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn bowl_record_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let extent = Extent { width: 4.0, height: 2.0 };
        let bowls = vec![
            FloatingBowl::spawn_inside(0, 5.0, extent, 1.0, &mut rng),
            FloatingBowl::spawn_inside(1, 9.0, extent, 1.0, &mut rng),
        ];

        let mut enc = Encoder::new();
        enc.encode_bowls(&bowls, 0.5);
        assert_eq!(enc.bowls_len(), 2 * BOWL_STRIDE);

        let rec = &enc.bowls()[BOWL_STRIDE..];
        let (rx, rz) = bowls[1].rotation();
        assert_eq!(rec[0], bowls[1].position().x);
        assert_eq!(rec[1], bowls[1].position().y);
        assert_eq!(rec[2], -9.0);
        assert_eq!(rec[3], rx);
        assert_eq!(rec[4], bowls[1].yaw());
        assert_eq!(rec[5], rz);
        assert_eq!(rec[6], 0.5);
    }

    #[test]
    fn steam_record_layout() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 9);
        puffs.spawn();
        puffs.spawn();
        puffs.tick(0.25);

        let mut enc = Encoder::new();
        enc.encode_steam(7, &puffs);
        assert_eq!(enc.steam_len(), puffs.sphere_count() * STEAM_STRIDE);

        let puff = puffs.iter().next().unwrap();
        let sphere = puff.spheres()[0];
        let rec = &enc.steam()[..STEAM_STRIDE];
        assert_eq!(rec[0], 7.0);
        assert_eq!(rec[1], puff.position().x + sphere.offset.x);
        assert_eq!(rec[2], puff.position().y + sphere.offset.y);
        assert_eq!(rec[3], puff.position().z + sphere.offset.z);
        assert_eq!(rec[4], puff.sphere_scale(sphere.base_scale));
        assert!((rec[5] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn clear_empties_both_buffers() {
        let mut puffs = SteamPuffs::new(SteamConfig::default(), 9);
        puffs.spawn();
        let mut enc = Encoder::new();
        enc.encode_steam(0, &puffs);
        enc.clear();
        assert_eq!(enc.steam_len(), 0);
        assert_eq!(enc.bowls_len(), 0);
    }
}
