//! Cooperative interval scheduling for stored closures.
//!
//! The scheduler owns no clock and spawns nothing: the surrounding loop
//! supplies the current time to [`Scheduler::update`], which fires every
//! due callback synchronously on the caller's thread. Timestamps are
//! wrapping `u32` milliseconds, so behavior is continuous across timer
//! rollover.

use {
    crate::closure_holder::ClosureHolder,
    log::{debug, trace, warn},
};

/// Identifies an interval registered with [`Scheduler::set_interval`].
///
/// Ids name slots, and slots are reused once cleared: an id held across a
/// [`Scheduler::clear_interval`] \ [`Scheduler::set_interval`] pair may name
/// the newer interval. Clearing an id whose slot is already free is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalId(usize);

struct IntervalSlot {
    callback: ClosureHolder<()>,
    period_ms: u32,
    last_fired_ms: u32,
}

/// Cooperative interval scheduler over effect-only [`ClosureHolder`]s.
///
/// Registered callbacks fire at most once per [`update`] call, whenever at
/// least `period_ms` milliseconds have elapsed since their last firing.
///
/// [`update`]: Self::update
#[derive(Default)]
pub struct Scheduler {
    slots: Vec<Option<IntervalSlot>>,
    // Latest time seen by `update`; new intervals are stamped with it.
    clock_ms: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to fire every `period_ms` milliseconds,
    /// starting one full period after the most recent [`update`] time.
    ///
    /// The lowest free slot is reused before the table grows.
    ///
    /// [`update`]: Self::update
    pub fn set_interval(&mut self, callback: ClosureHolder<()>, period_ms: u32) -> IntervalId {
        let slot = IntervalSlot {
            callback,
            period_ms,
            last_fired_ms: self.clock_ms,
        };

        let index = match self.slots.iter().position(|entry| entry.is_none()) {
            Some(free) => {
                self.slots[free] = Some(slot);
                free
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        debug!("interval {} registered, period {}ms", index, period_ms);

        IntervalId(index)
    }

    /// Unregisters the interval named by `id`, dropping its callback.
    ///
    /// Stale or already-cleared ids are ignored.
    pub fn clear_interval(&mut self, id: IntervalId) {
        if let Some(entry) = self.slots.get_mut(id.0) {
            if entry.take().is_some() {
                debug!("interval {} cleared", id.0);
            }
        }
    }

    /// Fires every due callback, in slot order, on the caller's thread.
    ///
    /// `now_ms` is the current wrapping millisecond clock. A slot whose
    /// holder is empty fires nothing; the checked execution failure is
    /// logged and the slot is left in place.
    pub fn update(&mut self, now_ms: u32) {
        self.clock_ms = now_ms;

        for (index, entry) in self.slots.iter_mut().enumerate() {
            let Some(slot) = entry else {
                continue;
            };

            if now_ms.wrapping_sub(slot.last_fired_ms) < slot.period_ms {
                continue;
            }

            slot.last_fired_ms = now_ms;
            trace!("interval {} fired at {}ms", index, now_ms);

            if slot.callback.try_execute(()).is_err() {
                warn!("interval {} holds no callback", index);
            }
        }
    }

    /// Number of currently registered intervals.
    pub fn active_intervals(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }
}
