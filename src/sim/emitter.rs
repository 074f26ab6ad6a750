// emitter.rs - Steam source riding on one bowl
//
// Puffs are added by the spawn timer and aged by the frame tick. The timer
// callback only holds a weak reference to the puffs, so it can never keep
// them alive past the emitter.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::debug;

use super::SteamPuffs;
use crate::config::SteamConfig;
use crate::error::Result;
use crate::timer::{RepeatingTask, TimerHost};

pub struct SteamEmitter<H: TimerHost + 'static> {
    puffs: Rc<RefCell<SteamPuffs>>,
    spawner: RepeatingTask<H>,
}

impl<H: TimerHost + 'static> SteamEmitter<H> {
    pub fn new(host: Rc<H>, steam: &SteamConfig, seed: u64) -> Result<Self> {
        let puffs = Rc::new(RefCell::new(SteamPuffs::new(*steam, seed)));

        let target = Rc::downgrade(&puffs);
        let spawner = RepeatingTask::start(host, steam.spawn_delay_ms, seed.rotate_left(32), move || {
            if let Some(puffs) = target.upgrade() {
                puffs.borrow_mut().spawn();
            }
        })?;

        Ok(Self { puffs, spawner })
    }

    pub fn tick(&self, dt: f32) {
        self.puffs.borrow_mut().tick(dt);
    }

    pub fn puffs(&self) -> Ref<'_, SteamPuffs> {
        self.puffs.borrow()
    }

    /// Stop spawning. Live puffs keep aging out through `tick`.
    pub fn teardown(&self) {
        if self.spawner.is_armed() {
            debug!("steam emitter torn down with {} live puffs", self.puffs.borrow().len());
        }
        self.spawner.cancel();
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimers;

    fn emitter(host: &Rc<ManualTimers>) -> SteamEmitter<ManualTimers> {
        SteamEmitter::new(Rc::clone(host), &SteamConfig::default(), 42).unwrap()
    }

    #[test]
    fn schedules_one_spawn_within_delay_range() {
        let host = Rc::new(ManualTimers::new());
        let e = emitter(&host);

        let delays = host.pending_delays();
        assert_eq!(delays.len(), 1);
        assert!((400..=900).contains(&delays[0]));
        assert!(e.puffs().is_empty());

        host.advance(900);
        assert_eq!(e.puffs().len(), 1);
        assert_eq!(host.pending_count(), 1);
    }

    #[test]
    fn teardown_stops_spawning() {
        let host = Rc::new(ManualTimers::new());
        let e = emitter(&host);
        host.advance(2_000);
        let before = e.puffs().len();
        assert!(before >= 2);

        e.teardown();
        assert!(!e.is_spawning());
        assert_eq!(host.pending_count(), 0);

        host.advance(10_000);
        assert_eq!(e.puffs().len(), before);
    }

    #[test]
    fn puffs_age_out_after_teardown() {
        let host = Rc::new(ManualTimers::new());
        let e = emitter(&host);
        host.advance(1_000);
        e.teardown();

        for _ in 0..200 {
            e.tick(1.0 / 60.0);
        }
        assert!(e.puffs().is_empty());
    }

    #[test]
    fn steady_state_population() {
        let host = Rc::new(ManualTimers::new());
        let e = emitter(&host);

        // 10 seconds at 60 fps, timer and frames interleaved
        for _ in 0..600 {
            host.advance(16);
            e.tick(0.016);
        }
        // One puff every 0.4..0.9s living 3s: between 3 and 8 alive
        let n = e.puffs().len();
        assert!((3..=8).contains(&n), "{n} live puffs");
    }

    #[test]
    fn dropping_emitter_clears_timer() {
        let host = Rc::new(ManualTimers::new());
        drop(emitter(&host));
        assert_eq!(host.pending_count(), 0);
        host.advance(5_000);
    }
}
