// repeat.rs - Self-rescheduling task
//
// Each round draws a fresh delay, runs the job when it fires, then arms the
// next round. Callbacks hold only weak references, so dropping the task (or
// the host) stops the chain.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{TimerHost, TimerId};
use crate::config::DelayRange;
use crate::error::Result;

type Job = Rc<RefCell<dyn FnMut()>>;

struct TaskState {
    pending: Option<TimerId>,
    cancelled: bool,
    delays: DelayRange,
    rng: ChaCha8Rng,
}

impl TaskState {
    fn next_delay(&mut self) -> u32 {
        self.rng.gen_range(self.delays.min..=self.delays.max)
    }
}

pub struct RepeatingTask<H: TimerHost + 'static> {
    host: Rc<H>,
    state: Rc<RefCell<TaskState>>,
}

impl<H: TimerHost + 'static> RepeatingTask<H> {
    /// Arm the first round. The job first runs one delay from now.
    pub fn start(host: Rc<H>, delays: DelayRange, seed: u64, job: impl FnMut() + 'static) -> Result<Self> {
        let state = Rc::new(RefCell::new(TaskState {
            pending: None,
            cancelled: false,
            delays,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }));
        let job: Job = Rc::new(RefCell::new(job));

        arm(&host, &state, &job)?;
        Ok(Self { host, state })
    }

    /// Clear the armed round; no further rounds run. Idempotent.
    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.cancelled = true;
        if let Some(id) = state.pending.take() {
            self.host.clear_timeout(id);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl<H: TimerHost + 'static> Drop for RepeatingTask<H> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn arm<H: TimerHost + 'static>(host: &Rc<H>, state: &Rc<RefCell<TaskState>>, job: &Job) -> Result<()> {
    let delay = state.borrow_mut().next_delay();

    let weak_host = Rc::downgrade(host);
    let weak_state = Rc::downgrade(state);
    let job = Rc::clone(job);
    let id = host.set_timeout(delay, Box::new(move || fire(weak_host, weak_state, job)))?;

    state.borrow_mut().pending = Some(id);
    Ok(())
}

fn fire<H: TimerHost + 'static>(host: Weak<H>, state: Weak<RefCell<TaskState>>, job: Job) {
    let (Some(host), Some(state)) = (host.upgrade(), state.upgrade()) else { return };

    {
        let mut s = state.borrow_mut();
        if s.cancelled { return; }
        s.pending = None;
    }

    (&mut *job.borrow_mut())();

    if state.borrow().cancelled { return; }
    if let Err(err) = arm(&host, &state, &job) {
        warn!("repeating task stopped: {err}");
    }
}
