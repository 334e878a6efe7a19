use crate::{
    clock::Clock,
    error::{Error, Result},
};
use jiff::Timestamp;
use std::sync::Mutex;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Width of the per-millisecond sequence field shared by both schemes.
pub const SEQUENCE_BITS: u32 = 12;
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Configures where a [`Sequencer`] starts counting.
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct SequencerSettings {
    /// Sequence of the very first tick the sequencer hands out.
    #[builder(default = 0)]
    pub initial: u16,
    /// Sequence every later millisecond starts from, and the value the
    /// counter restarts at after an overflow.
    #[builder(default = 0)]
    pub offset: u16,
}

/// One `(timestamp, sequence)` pair. Ordering is lexicographic over the two
/// fields, which is the order ticks are issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick {
    /// Unix time in milliseconds, not shifted by any epoch.
    pub timestamp: i64,
    pub sequence: u16,
}

#[derive(Debug)]
struct SequencerState {
    last_timestamp: Option<i64>,
    sequence: u16,
}

/// Turns a clock into strictly increasing [`Tick`]s.
///
/// Within one millisecond the sequence counts up by one per tick. When it
/// would wrap past [`MAX_SEQUENCE`] the call blocks until the clock reaches
/// the next millisecond. A clock that moves backwards is reported as
/// [`Error::ClockRegression`] and never corrected.
pub struct Sequencer<C: Clock> {
    clock: C,
    offset: u16,
    state: Mutex<SequencerState>,
}

impl<C: Clock> Sequencer<C> {
    pub fn new(settings: SequencerSettings, clock: C) -> Result<Self> {
        Error::check_setting("sequence", settings.initial.into(), MAX_SEQUENCE.into())?;
        Error::check_setting("sequence offset", settings.offset.into(), MAX_SEQUENCE.into())?;

        Ok(Self {
            clock,
            offset: settings.offset,
            state: Mutex::new(SequencerState {
                last_timestamp: None,
                sequence: settings.initial,
            }),
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Issues the next tick.
    ///
    /// On error the sequencer state is left exactly as it was, so a caller
    /// may try again once the clock has caught up.
    pub fn next(&self) -> Result<Tick> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let mut now = self.clock.now().as_millisecond();

        let sequence = match state.last_timestamp {
            // First call: use the configured initial sequence.
            None => state.sequence,
            Some(last) if now < last => {
                warn!(last, now, "clock moved backwards, refusing to issue a tick");
                return Err(Error::ClockRegression { last, now });
            }
            Some(last) if now == last => {
                let next = (state.sequence + 1) & MAX_SEQUENCE;
                if next == 0 {
                    // Sequence space for this millisecond is spent.
                    debug!(last, "sequence exhausted, waiting for the next millisecond");
                    now = self.wait_past(last);
                    self.offset
                } else {
                    next
                }
            }
            Some(_) => self.offset,
        };

        state.last_timestamp = Some(now);
        state.sequence = sequence;
        trace!(timestamp = now, sequence, "tick");

        Ok(Tick {
            timestamp: now,
            sequence,
        })
    }

    /// Blocks until the clock reads strictly later than `last` and returns
    /// that reading.
    fn wait_past(&self, last: i64) -> i64 {
        let target = Timestamp::from_millisecond(last + 1).unwrap_or(Timestamp::MAX);
        loop {
            self.clock.wait_until(target);
            let now = self.clock.now().as_millisecond();
            if now > last {
                return now;
            }
        }
    }
}
