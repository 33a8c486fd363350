//! Host integration tests driving the public API end to end, with the pin
//! hardware replaced by an in-memory mock.

use cloneclosure::{ClosureHolder, EmptyClosureError, LedFlasher, PinOutput, Scheduler};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Mock pin
// ============================================================================

#[derive(Clone, Default)]
struct MockPin {
    state: Rc<RefCell<MockPinState>>,
}

#[derive(Default)]
struct MockPinState {
    last_level: Option<bool>,
    write_count: usize,
    history: Vec<bool>,
}

impl MockPin {
    fn last_level(&self) -> Option<bool> {
        self.state.borrow().last_level
    }

    fn write_count(&self) -> usize {
        self.state.borrow().write_count
    }

    fn history(&self) -> Vec<bool> {
        self.state.borrow().history.clone()
    }
}

impl PinOutput for MockPin {
    fn write(&mut self, level: bool) {
        let mut state = self.state.borrow_mut();
        state.last_level = Some(level);
        state.write_count += 1;
        state.history.push(level);
    }
}

// ============================================================================
// Tests: holder contract
// ============================================================================

#[test]
fn counter_increments_once_per_invocation() {
    let c = Rc::new(Cell::new(0u32));

    let mut h = {
        let c = Rc::clone(&c);
        ClosureHolder::new(move |()| c.set(c.get() + 1))
    };

    h.execute(());
    assert_eq!(c.get(), 1);

    h.execute(());
    assert_eq!(c.get(), 2);
}

#[test]
fn holders_work_as_container_elements() {
    let mut handlers: Vec<ClosureHolder<i32, i32>> = vec![
        ClosureHolder::new(|n| n + 1),
        ClosureHolder::new(|n| n * 2),
        ClosureHolder::new({
            let mut total = 0;
            move |n| {
                total += n;
                total
            }
        }),
    ];

    let results: Vec<i32> = handlers.iter_mut().map(|h| h.execute(10)).collect();
    assert_eq!(results, vec![11, 20, 10]);

    let results: Vec<i32> = handlers.iter_mut().map(|h| h.execute(10)).collect();
    assert_eq!(results, vec![11, 20, 20]);
}

#[test]
fn empty_holder_reports_typed_error() {
    let mut h = ClosureHolder::<(), u32>::empty();

    assert!(!h.is_some());
    assert_eq!(h.try_execute(()), Err(EmptyClosureError));
    assert_eq!(
        EmptyClosureError.to_string(),
        "tried to execute an empty `ClosureHolder`"
    );
}

#[test]
fn cloned_scheduler_callbacks_share_nothing_but_the_counter() {
    // Two schedulers given clones of one stateful callback: each clone owns
    // its own captured tick count, while the observed counter is shared.
    let observed = Rc::new(Cell::new(0u32));

    let callback = {
        let observed = Rc::clone(&observed);
        let mut ticks = 0u32;
        ClosureHolder::new(move |()| {
            ticks += 1;
            observed.set(observed.get() + ticks);
        })
    };

    let mut a = Scheduler::new();
    let mut b = Scheduler::new();
    a.set_interval(callback.clone(), 100);
    b.set_interval(callback, 100);

    a.update(100);
    a.update(200);
    // a's clone has ticked twice: 1 + 2.
    assert_eq!(observed.get(), 3);

    b.update(100);
    // b's copy starts from its own tick count: + 1.
    assert_eq!(observed.get(), 4);
}

// ============================================================================
// Tests: flasher end to end
// ============================================================================

#[test]
fn flasher_end_to_end() {
    let pins: [MockPin; 4] = std::array::from_fn(|_| MockPin::default());
    let mut flasher = LedFlasher::new(pins.clone());

    // Construction clears every channel.
    for pin in &pins {
        assert_eq!(pin.last_level(), Some(false));
        assert_eq!(pin.write_count(), 1);
    }

    flasher.start_flashing(0);
    flasher.start_flashing(2);

    // One full period elapses: both active channels write their high edge.
    flasher.update(200);
    assert_eq!(pins[0].history(), vec![false, true]);
    assert_eq!(pins[2].history(), vec![false, true]);
    assert_eq!(pins[1].write_count(), 1);
    assert_eq!(pins[3].write_count(), 1);

    flasher.update(400);
    assert_eq!(pins[0].history(), vec![false, true, false]);

    // Stopping one channel leaves the other flashing.
    flasher.stop_flashing(0);
    assert_eq!(pins[0].last_level(), Some(false));

    flasher.update(600);
    assert_eq!(pins[0].history(), vec![false, true, false, false]);
    assert_eq!(pins[2].history(), vec![false, true, false, true]);

    flasher.clear_all();
    let settled: Vec<usize> = pins.iter().map(|pin| pin.write_count()).collect();

    flasher.update(2_000);
    let after: Vec<usize> = pins.iter().map(|pin| pin.write_count()).collect();
    assert_eq!(settled, after);
}

#[test]
fn flasher_channels_toggle_independently() {
    let pins: [MockPin; 2] = std::array::from_fn(|_| MockPin::default());
    let mut flasher = LedFlasher::new(pins.clone());

    flasher.start_flashing(0);
    flasher.update(200);

    // Channel 1 starts later, so its toggle phase lags channel 0's.
    flasher.start_flashing(1);
    flasher.update(400);

    assert_eq!(pins[0].history(), vec![false, true, false]);
    assert_eq!(pins[1].history(), vec![false, true]);
}
