// timer/ - Deferred callbacks outside the frame clock
//
// Steam spawning runs on its own cadence, not once per frame. Hosts hand out
// one-shot timeouts; `RepeatingTask` chains them into a cancellable loop.

mod browser;
mod manual;
mod repeat;

pub use browser::BrowserTimers;
pub use manual::ManualTimers;
pub use repeat::RepeatingTask;

use crate::error::Result;

/// Handle returned by `set_timeout`, valid until the callback fires or is cleared
pub type TimerId = i32;

/// Something that can run a callback once after a delay.
///
/// Single-threaded: callbacks run on the same thread that armed them, never
/// while `set_timeout` itself is on the stack.
pub trait TimerHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<TimerId>;

    /// Clearing an id that already fired is a no-op
    fn clear_timeout(&self, id: TimerId);
}
