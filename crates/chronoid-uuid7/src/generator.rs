use crate::{
    codec::{self, Uuid7Fields, RAND_B_MASK},
    random::{OsRandom, RandomSource},
    Uuid7,
};
use chronoid_core::{
    Clock, Error, Result, Sequencer, SequencerSettings, SystemClock, MAX_SEQUENCE, MAX_WORKER_ID,
};
use std::sync::Mutex;
use tracing::debug;
use typed_builder::TypedBuilder;

/// Configures a UUIDv7 generator instance.
///
/// There is no separate worker field in a UUIDv7. The worker id is folded
/// into the 12-bit sequence instead: every millisecond starts counting at
/// `(worker_id + sequence) mod 4096`.
///
/// Offsets only shift where the count starts. Worker `n`'s `k`-th identifier
/// in a millisecond carries the same `rand_a` as worker `n + k`'s first, and
/// worker 1 with sequence 0 starts where worker 0 with sequence 1 does. Two
/// workers that each mint at most `k` identifiers per millisecond keep
/// disjoint `rand_a` values only if their offsets are at least `k` apart;
/// otherwise the 62 random bits of `rand_b` are what separates them.
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct Uuid7Settings {
    /// Worker index in the range `[0, 1023]`.
    #[builder(default = 0)]
    pub worker_id: u16,
    /// Additional sequence offset in the range `[0, 4095]`.
    #[builder(default = 0)]
    pub sequence: u16,
}

impl Uuid7Settings {
    pub fn sequence_offset(&self) -> u16 {
        // widened so that unchecked settings wrap instead of overflowing
        let sum = u32::from(self.worker_id) + u32::from(self.sequence);
        (sum & u32::from(MAX_SEQUENCE)) as u16
    }
}

/// UUIDv7 generator.
///
/// `rand_a` carries the sequence rather than random bits so that
/// identifiers from one instance are strictly increasing; `rand_b` is drawn
/// fresh from the random source for every identifier.
pub struct Uuid7Generator<R: RandomSource = OsRandom, C: Clock = SystemClock> {
    worker_id: u16,
    sequencer: Sequencer<C>,
    rng: Mutex<R>,
}

impl Uuid7Generator<OsRandom, SystemClock> {
    /// Creates a generator backed by the system clock and the OS random
    /// number generator.
    pub fn new(settings: Uuid7Settings) -> Result<Self> {
        Self::with_sources(settings, OsRandom::default(), SystemClock)
    }

    pub fn parse(value: &str) -> Result<Uuid7Fields> {
        codec::parse(value)
    }

    pub fn is_valid(value: &str) -> bool {
        codec::is_valid(value)
    }
}

impl<R: RandomSource, C: Clock> Uuid7Generator<R, C> {
    pub fn with_sources(settings: Uuid7Settings, rng: R, clock: C) -> Result<Self> {
        Error::check_setting("worker_id", settings.worker_id.into(), MAX_WORKER_ID.into())?;
        Error::check_setting("sequence", settings.sequence.into(), MAX_SEQUENCE.into())?;

        let offset = settings.sequence_offset();
        let sequencer = Sequencer::new(
            SequencerSettings::builder()
                .initial(offset)
                .offset(offset)
                .build(),
            clock,
        )?;

        debug!(
            worker_id = settings.worker_id,
            sequence_offset = offset,
            "uuid7 generator ready"
        );

        Ok(Self {
            worker_id: settings.worker_id,
            sequencer,
            rng: Mutex::new(rng),
        })
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    pub fn sequence_offset(&self) -> u16 {
        self.sequencer.offset()
    }

    /// Generates the next identifier in its 128-bit form.
    pub fn generate_binary(&self) -> Result<Uuid7> {
        let tick = self.sequencer.next()?;
        let rand_b = self.rng.lock().map_err(|_| Error::StatePoisoned)?.next_u64() & RAND_B_MASK;
        codec::pack(tick.timestamp, tick.sequence, rand_b)
    }

    /// Generates the next identifier in canonical string form.
    pub fn generate(&self) -> Result<String> {
        Ok(self.generate_binary()?.to_string())
    }
}
