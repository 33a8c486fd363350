//! Indicator-LED flashing over scheduled toggle callbacks.

use {
    crate::closure_holder::ClosureHolder,
    crate::scheduler::{IntervalId, Scheduler},
    log::debug,
    std::{cell::RefCell, rc::Rc},
};

/// Toggle period of a flashing channel.
pub const FLASH_PERIOD_MS: u32 = 200;

/// Digital output line.
///
/// Implemented by the hardware layer for real pins; tests use in-memory
/// mocks. Implementations receive pins already configured as outputs.
pub trait PinOutput {
    /// Drives the line high (`true`) or low (`false`).
    fn write(&mut self, level: bool);
}

/// Flashes up to `N` indicator LEDs by scheduling a toggle callback per
/// active channel.
///
/// Each channel's callback captures its own toggle level together with a
/// shared handle to the channel's pin, so the level is ordinary per-channel
/// state rather than anything hidden in the callback's compiled body. A
/// freshly started channel writes its first (high) edge one period after
/// the most recent [`update`].
///
/// Single-threaded, like everything in this crate: [`update`] must be
/// called from the loop that owns the flasher.
///
/// [`update`]: Self::update
pub struct LedFlasher<P: PinOutput + 'static, const N: usize> {
    scheduler: Scheduler,
    pins: [Rc<RefCell<P>>; N],
    intervals: [Option<IntervalId>; N],
}

impl<P: PinOutput + 'static, const N: usize> LedFlasher<P, N> {
    /// Takes ownership of the channel pins and drives them all low.
    pub fn new(pins: [P; N]) -> Self {
        let pins = pins.map(|pin| Rc::new(RefCell::new(pin)));

        for pin in &pins {
            pin.borrow_mut().write(false);
        }

        Self {
            scheduler: Scheduler::new(),
            pins,
            intervals: [None; N],
        }
    }

    /// Starts flashing `channel` at [`FLASH_PERIOD_MS`].
    ///
    /// A channel that is already flashing is restarted: the old toggle
    /// callback is dropped and a fresh one (starting from the high edge)
    /// takes its place.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= N`.
    pub fn start_flashing(&mut self, channel: usize) {
        if let Some(id) = self.intervals[channel].take() {
            self.scheduler.clear_interval(id);
        }

        let pin = Rc::clone(&self.pins[channel]);
        let mut level = true;

        let callback = ClosureHolder::new(move |()| {
            pin.borrow_mut().write(level);
            level = !level;
        });

        self.intervals[channel] = Some(self.scheduler.set_interval(callback, FLASH_PERIOD_MS));

        debug!("channel {} flashing", channel);
    }

    /// Stops flashing `channel` and drives its pin low.
    ///
    /// A channel that is not flashing still has its pin driven low.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= N`.
    pub fn stop_flashing(&mut self, channel: usize) {
        if let Some(id) = self.intervals[channel].take() {
            self.scheduler.clear_interval(id);
            debug!("channel {} stopped", channel);
        }

        self.pins[channel].borrow_mut().write(false);
    }

    /// Stops every channel.
    pub fn clear_all(&mut self) {
        for channel in 0..N {
            self.stop_flashing(channel);
        }
    }

    /// Whether `channel` currently has a toggle callback registered.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= N`.
    pub fn is_flashing(&self, channel: usize) -> bool {
        self.intervals[channel].is_some()
    }

    /// Fires the due toggle callbacks. `now_ms` is the current wrapping
    /// millisecond clock, as for [`Scheduler::update`].
    pub fn update(&mut self, now_ms: u32) {
        self.scheduler.update(now_ms);
    }
}
