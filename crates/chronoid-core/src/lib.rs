//! Shared engine pieces for the chronoid identifier generators.
//!
//! This crate holds the clock abstraction, the per-generator
//! [`Sequencer`] state machine and the error type used by every scheme.

mod clock;
pub mod error;
pub mod sequencer;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use error::{Error, Result};
pub use sequencer::{Sequencer, SequencerSettings, Tick, MAX_SEQUENCE, SEQUENCE_BITS};

/// Largest worker id any scheme accepts (10 bits).
pub const MAX_WORKER_ID: u16 = (1 << 10) - 1;
