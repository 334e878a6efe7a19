use jiff::Timestamp;
use std::time::Duration;

#[cfg(any(test, feature = "test-util"))]
pub use manual_clock::ManualClock;

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
    /// Block and wait until the clock reaches the target time.
    fn wait_until(&self, target: Timestamp);
}

/// The wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // Sleep and re-check rather than spin. The target is always a whole
        // millisecond, so a pending wait is at least 1 ms once truncated.
        loop {
            let now = Timestamp::now();
            if now >= target {
                return;
            }
            let remaining_ms = (target.as_millisecond() - now.as_millisecond()).max(1) as u64;
            std::thread::sleep(Duration::from_millis(remaining_ms));
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
mod manual_clock {
    use super::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex, MutexGuard};

    /// A clock that only moves when told to.
    ///
    /// Clones share the same underlying time, so a test can keep a handle while
    /// the generator owns another. `wait_until` jumps straight to the target
    /// instead of blocking and records how many times it was asked to wait.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        inner: Arc<Mutex<ManualClockState>>,
    }

    #[derive(Debug)]
    struct ManualClockState {
        now: Timestamp,
        waits: usize,
    }

    impl ManualClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(ManualClockState { now, waits: 0 })),
            }
        }

        /// Moves the clock to `now`, backwards included.
        pub fn set(&self, now: Timestamp) {
            self.state().now = now;
        }

        /// Moves the clock by `delta`, which may be negative.
        pub fn advance(&self, delta: SignedDuration) -> Result<(), jiff::Error> {
            let mut state = self.state();
            state.now = state.now.checked_add(delta)?;
            Ok(())
        }

        /// Number of `wait_until` calls that actually had to move the clock.
        pub fn waits(&self) -> usize {
            self.state().waits
        }

        fn state(&self) -> MutexGuard<'_, ManualClockState> {
            // the state is a plain value, a panic elsewhere cannot leave it torn
            self.inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            self.state().now
        }

        fn wait_until(&self, target: Timestamp) {
            let mut state = self.state();
            if target > state.now {
                state.now = target;
                state.waits += 1;
            }
        }
    }
}
