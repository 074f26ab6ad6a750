use std::rc::Rc;

use wasm_bindgen::prelude::*;

// ============================================================================
// FLOATING SOUPS - Drifting bowls with procedural steam
// ============================================================================

pub mod config;
pub mod error;
pub mod render;
pub mod sim;
pub mod timer;
pub mod world;

mod console;

pub use config::{DelayRange, SceneConfig, SteamConfig};
pub use error::{Result, SoupError};
pub use sim::SoupWorld;

use timer::BrowserTimers;

#[wasm_bindgen]
pub struct SoupScene {
    world: SoupWorld<BrowserTimers>,
}

#[wasm_bindgen]
impl SoupScene {
    /// `config_json` may be empty or `{}` for the stock scene
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, aspect: f32) -> std::result::Result<SoupScene, JsValue> {
        console_error_panic_hook::set_once();
        console::init(log::LevelFilter::Info);

        let mut config = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(config_json).map_err(to_js)?
        };
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
        }

        let host = Rc::new(BrowserTimers::new().map_err(to_js)?);
        let world = SoupWorld::new(config, aspect, host).map_err(to_js)?;
        Ok(SoupScene { world })
    }

    /// `dt` is seconds since the previous animation frame
    pub fn tick(&mut self, dt: f32) {
        self.world.tick(dt);
    }

    pub fn resize(&mut self, aspect: f32) -> std::result::Result<(), JsValue> {
        self.world.resize(aspect).map_err(to_js)
    }

    /// Cancel steam timers. Call before dropping the canvas.
    pub fn dispose(&mut self) {
        self.world.teardown();
    }

    // Accessors for WASM
    pub fn bowl_count(&self) -> u32 { self.world.bowls().len() as u32 }
    pub fn far_plane(&self) -> f32 {
        let cfg = self.world.config();
        cfg.camera.far(cfg.depth)
    }
    pub fn bowls_ptr(&self) -> *const f32 { self.world.encoder().bowls_ptr() }
    pub fn bowls_len(&self) -> usize { self.world.encoder().bowls_len() }
    pub fn steam_ptr(&self) -> *const f32 { self.world.encoder().steam_ptr() }
    pub fn steam_len(&self) -> usize { self.world.encoder().steam_len() }
}

fn to_js(err: SoupError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
