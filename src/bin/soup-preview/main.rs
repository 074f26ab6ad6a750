// soup-preview - Run the floating soups headless and save a frame as PNG
//
// Pipeline:
//   1. Load scene config (TOML), or use the stock scene
//   2. Step the world at a fixed frame rate on a virtual clock
//   3. Rasterize the final frame (bowls as discs, steam as soft dots)
//
// Usage: cargo run --bin soup-preview -- [config.toml] [--seconds N]
//        [--width W] [--height H] [--fps N] [--out file.png]

mod raster;

use std::env;
use std::error::Error;
use std::fs;
use std::rc::Rc;

use soup_engine::timer::ManualTimers;
use soup_engine::{SceneConfig, SoupWorld};

struct Args {
    config: Option<String>,
    seconds: f32,
    width: u32,
    height: u32,
    fps: u32,
    out: String,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        config: None,
        seconds: 10.0,
        width: 960,
        height: 540,
        fps: 60,
        out: "soup-preview.png".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--seconds" => { parsed.seconds = value.and_then(|s| s.parse().ok()).unwrap_or(10.0); i += 2; }
            "--width" => { parsed.width = value.and_then(|s| s.parse().ok()).unwrap_or(960); i += 2; }
            "--height" => { parsed.height = value.and_then(|s| s.parse().ok()).unwrap_or(540); i += 2; }
            "--fps" => { parsed.fps = value.and_then(|s| s.parse().ok()).unwrap_or(60).max(1); i += 2; }
            "--out" => { parsed.out = value.cloned().unwrap_or(parsed.out); i += 2; }
            path if !path.starts_with("--") && parsed.config.is_none() => {
                parsed.config = Some(path.to_string());
                i += 1;
            }
            _ => i += 1,
        }
    }
    parsed
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();

    let config = match &args.config {
        Some(path) => {
            println!("Loading {}...", path);
            SceneConfig::from_toml(&fs::read_to_string(path)?)?
        }
        None => SceneConfig::default(),
    };

    println!(
        "Simulating {} bowls for {}s at {} fps ({}x{})...",
        config.count, args.seconds, args.fps, args.width, args.height
    );

    let host = Rc::new(ManualTimers::new());
    let aspect = args.width as f32 / args.height as f32;
    let mut world = SoupWorld::new(config, aspect, Rc::clone(&host))?;

    let frame_ms = 1000 / args.fps as u64;
    let dt = frame_ms as f32 / 1000.0;
    let frames = (args.seconds * args.fps as f32) as usize;
    for _ in 0..frames {
        host.advance(frame_ms);
        world.tick(dt);
    }

    let puffs: usize = world.emitters().iter().map(|e| e.puffs().len()).sum();
    println!("  {} live steam puffs", puffs);

    println!("  Rasterizing...");
    let img = raster::draw(&world, args.width, args.height);
    img.save(&args.out)?;

    world.teardown();
    println!("Wrote {}", args.out);
    Ok(())
}
