use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Countdown interval used by every quiz session
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one recurring tick registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Owned handle to a recurring tick registration.
///
/// Cancelling is idempotent and dropping the handle cancels it, so a
/// registration can never outlive the session that holds it.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new(id: TimerId) -> (Self, Arc<AtomicBool>) {
        let cancelled = Arc::new(AtomicBool::new(false));
        (
            Self {
                id,
                cancelled: Arc::clone(&cancelled),
            },
            cancelled,
        )
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of recurring ticks
pub trait Clock {
    /// Register a recurring tick every `every`. Ticks stop once the
    /// returned handle is cancelled or dropped.
    fn schedule_interval(&self, every: Duration) -> TimerHandle;
}

/// Clock that never fires on its own; tests drive ticks by hand and use it
/// to observe how many registrations are still live.
#[derive(Debug, Default)]
pub struct ManualClock {
    registrations: RefCell<Vec<(TimerId, Arc<AtomicBool>)>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total registrations ever made
    pub fn scheduled(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Registrations that have not been cancelled
    pub fn live(&self) -> Vec<TimerId> {
        self.registrations
            .borrow()
            .iter()
            .filter(|(_, cancelled)| !cancelled.load(Ordering::SeqCst))
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Clock for ManualClock {
    fn schedule_interval(&self, _every: Duration) -> TimerHandle {
        let mut registrations = self.registrations.borrow_mut();
        let id = TimerId(registrations.len() as u64 + 1);
        let (handle, flag) = TimerHandle::new(id);
        registrations.push((id, flag));
        handle
    }
}
