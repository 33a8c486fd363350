//! Clonable type-erased closure storage, plus the cooperative scheduling
//! helpers that consume it.
//!
//! The central type is [`ClosureHolder`]: a value type holding any cloneable
//! closure matching a fixed call signature, with the concrete closure type
//! erased at capture time. Holders copy, assign and drop like plain values;
//! cloning deep-copies the captured state, so clones never interfere with
//! each other. Executing an empty holder is a checked failure, either a
//! documented panic ([`ClosureHolder::execute`]) or a typed error
//! ([`ClosureHolder::try_execute`]).
//!
//! Built on top of it:
//!
//! - [`Scheduler`]: registers effect-only holders as periodic callbacks and
//!   fires the due ones from a caller-driven update loop.
//! - [`LedFlasher`]: flashes indicator LEDs behind a [`PinOutput`] pin
//!   abstraction by scheduling a toggle callback per channel.
//!
//! Everything is synchronous and single-threaded: callbacks run on the
//! thread that calls `update`, and no locking is provided. Logging goes
//! through the `log` facade; the crate never installs a logger.

pub mod closure_holder;
pub mod flasher;
pub mod scheduler;

pub use closure_holder::{ClosureHolder, EmptyClosureError};
pub use flasher::{LedFlasher, PinOutput, FLASH_PERIOD_MS};
pub use scheduler::{IntervalId, Scheduler};
