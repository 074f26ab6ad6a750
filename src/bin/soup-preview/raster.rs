// raster.rs - Flat software rendering of one frame
//
// Good enough to judge density, depth spread and steam cadence. Bowl tumble
// is ignored: steam is drawn at the bowl position plus its local offset.

use image::{Rgba, RgbaImage};

use soup_engine::SoupWorld;
use soup_engine::timer::TimerHost;

const BACKGROUND: [u8; 3] = [0xff, 0xbf, 0x40];
const BOWL: [u8; 3] = [0xf8, 0xf8, 0xf8];
const SOUP: [u8; 3] = [0x5c, 0x2b, 0x1c];
const STEAM: [u8; 3] = [0xff, 0xff, 0xff];

const BOWL_RADIUS: f32 = 0.9;
const SOUP_RADIUS: f32 = 0.69;
const SPHERE_RADIUS: f32 = 0.5;
const STEAM_ALPHA: f32 = 0.6;

pub fn draw<H: TimerHost + 'static>(world: &SoupWorld<H>, w: u32, h: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(w, h, Rgba([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255]));
    let max_depth = world.config().depth.max(1.0);

    // Far to near
    let mut order: Vec<usize> = (0..world.bowls().len()).collect();
    order.sort_by(|&a, &b| world.bowls()[b].depth().total_cmp(&world.bowls()[a].depth()));

    for i in order {
        let bowl = &world.bowls()[i];
        let extent = bowl.extent();
        let px_per_unit = h as f32 / extent.height;
        let p = bowl.position();

        let to_screen = |x: f32, y: f32| {
            (
                (x / extent.width + 0.5) * w as f32,
                (0.5 - y / extent.height) * h as f32,
            )
        };

        // Distant bowls sink into the background
        let haze = (bowl.depth() / max_depth) * 0.6;
        let (cx, cy) = to_screen(p.x, p.y);
        fill_disc(&mut img, cx, cy, BOWL_RADIUS * px_per_unit, BOWL, 1.0 - haze);
        fill_disc(&mut img, cx, cy, SOUP_RADIUS * px_per_unit, SOUP, 1.0 - haze);

        for puff in world.emitters()[i].puffs().iter() {
            let alpha = puff.opacity() * STEAM_ALPHA * (1.0 - haze);
            for sphere in puff.spheres() {
                let local = puff.position() + sphere.offset;
                let (sx, sy) = to_screen(p.x + local.x, p.y + local.y);
                let r = SPHERE_RADIUS * puff.sphere_scale(sphere.base_scale) * px_per_unit;
                fill_disc(&mut img, sx, sy, r, STEAM, alpha);
            }
        }
    }

    img
}

fn fill_disc(img: &mut RgbaImage, cx: f32, cy: f32, r: f32, color: [u8; 3], alpha: f32) {
    if r <= 0.0 || alpha <= 0.0 { return; }
    let (w, h) = (img.width() as i64, img.height() as i64);

    let x0 = ((cx - r).floor() as i64).max(0);
    let x1 = ((cx + r).ceil() as i64).min(w - 1);
    let y0 = ((cy - r).floor() as i64).max(0);
    let y1 = ((cy + r).ceil() as i64).min(h - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
            if dx * dx + dy * dy > r * r { continue; }

            let px = img.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                let blended = px.0[c] as f32 * (1.0 - alpha) + color[c] as f32 * alpha;
                px.0[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
