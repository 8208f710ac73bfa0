//! Timer seam. The controller arms a repeating schedule and cancels it by
//! handle; a cancelled handle must never fire again, so no orphaned
//! callback can mutate game state after a stop.

/// Opaque id for an armed repeating schedule.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TickHandle(u64);

impl TickHandle {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Provider of repeating ticks, implemented by the presentation layer
/// (interval timers, frame callbacks) or by [`ManualScheduler`] in tests.
pub trait Scheduler {
    /// Arm a repeating tick every `period_ms`. The returned handle stays
    /// valid until cancelled.
    fn schedule_repeating(&mut self, period_ms: u32) -> TickHandle;

    /// Invalidate the handle. Ticks for it must stop permanently.
    fn cancel(&mut self, handle: TickHandle);
}

/// Deterministic scheduler: records the armed schedule and never fires on
/// its own. The test driver calls `Controller::tick` directly.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    armed: Option<(TickHandle, u32)>,
    cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<(TickHandle, u32)> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn was_cancelled(&self, handle: TickHandle) -> bool {
        self.cancelled.contains(&handle)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period_ms: u32) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::from_raw(self.next_id);
        self.armed = Some((handle, period_ms));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.armed.map_or(false, |(armed, _)| armed == handle) {
            self.armed = None;
        }
        self.cancelled.push(handle);
    }
}
