// browser.rs - window.setTimeout / clearTimeout

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::{TimerHost, TimerId};
use crate::error::{Result, SoupError};

pub struct BrowserTimers {
    window: web_sys::Window,
}

impl BrowserTimers {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(SoupError::NoWindow)?;
        Ok(Self { window })
    }
}

impl TimerHost for BrowserTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<TimerId> {
        // JS owns the closure from here on and frees it when it runs. A
        // cleared timeout keeps its closure; that happens once per teardown.
        let handler = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                handler.unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| SoupError::Timer(format!("{e:?}")))
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id);
    }
}
