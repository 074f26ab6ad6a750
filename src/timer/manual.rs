// manual.rs - Virtual clock timer host
//
// Time only moves when `advance` is called. Used by tests and by the native
// preview, which steps the world at a fixed frame rate.

use std::cell::RefCell;

use super::{TimerHost, TimerId};
use crate::error::Result;

struct Pending {
    id: TimerId,
    due_ms: u64,
    delay_ms: u32,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Queue {
    now_ms: u64,
    next_id: TimerId,
    pending: Vec<Pending>,
}

#[derive(Default)]
pub struct ManualTimers {
    queue: RefCell<Queue>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Number of armed, not yet fired timeouts
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Requested delays of the armed timeouts, in arming order
    pub fn pending_delays(&self) -> Vec<u32> {
        self.queue.borrow().pending.iter().map(|p| p.delay_ms).collect()
    }

    /// Move the clock forward, firing every timeout that comes due on the way
    /// in due order. Callbacks armed during the advance fire too if they come
    /// due before the target time.
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now_ms + ms;

        loop {
            let next = {
                let mut q = self.queue.borrow_mut();
                let earliest = q
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.id))
                    .map(|(i, _)| i);

                earliest.map(|i| {
                    let p = q.pending.remove(i);
                    q.now_ms = p.due_ms;
                    p.callback
                })
            };

            // Queue borrow released: the callback may arm new timeouts
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.queue.borrow_mut().now_ms = target;
    }
}

impl TimerHost for ManualTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<TimerId> {
        let mut q = self.queue.borrow_mut();
        let id = q.next_id;
        q.next_id = q.next_id.wrapping_add(1);
        let due_ms = q.now_ms + delay_ms as u64;
        q.pending.push(Pending { id, due_ms, delay_ms, callback });
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.queue.borrow_mut().pending.retain(|p| p.id != id);
    }
}
