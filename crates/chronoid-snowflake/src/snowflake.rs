use crate::{
    codec::{SnowflakeCodec, SnowflakeFields, DEFAULT_EPOCH},
    SnowflakeId,
};
use chronoid_core::{
    Clock, Error, Result, Sequencer, SequencerSettings, SystemClock, MAX_SEQUENCE, MAX_WORKER_ID,
};
use jiff::Timestamp;
use tracing::debug;
use typed_builder::TypedBuilder;

/// Configures a Snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct SnowflakeSettings {
    /// A unique worker index in the range `[0, 1023]`.
    #[builder]
    pub worker_id: u16,
    /// Sequence of the first identifier, in the range `[0, 4095]`. Every
    /// later millisecond starts again from 0.
    #[builder(default = 0)]
    pub sequence: u16,
    /// Zero point of the 41-bit timestamp field.
    #[builder(default = DEFAULT_EPOCH)]
    pub epoch: Timestamp,
}

/// Snowflake ID generator.
///
/// The worker id is fixed at construction. Calls on one instance are
/// serialized internally, so it may be shared across threads; identifiers
/// from one instance are strictly increasing.
pub struct Snowflake<C: Clock = SystemClock> {
    worker_id: u16,
    codec: SnowflakeCodec,
    sequencer: Sequencer<C>,
}

impl Snowflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: SnowflakeSettings) -> Result<Self> {
        Self::with_clock(settings, SystemClock)
    }

    /// Decodes a Snowflake string against the default epoch.
    ///
    /// Use [`SnowflakeCodec::parse`] for identifiers minted with a custom
    /// epoch.
    pub fn parse(value: &str) -> Result<SnowflakeFields> {
        SnowflakeCodec::default().parse(value)
    }

    pub fn is_valid(value: &str) -> bool {
        SnowflakeCodec::is_valid(value)
    }
}

impl<C: Clock> Snowflake<C> {
    pub fn with_clock(settings: SnowflakeSettings, clock: C) -> Result<Self> {
        Error::check_setting("worker_id", settings.worker_id.into(), MAX_WORKER_ID.into())?;
        Error::check_setting("sequence", settings.sequence.into(), MAX_SEQUENCE.into())?;

        let sequencer = Sequencer::new(
            SequencerSettings::builder()
                .initial(settings.sequence)
                .build(),
            clock,
        )?;

        debug!(
            worker_id = settings.worker_id,
            epoch = %settings.epoch,
            "snowflake generator ready"
        );

        Ok(Self {
            worker_id: settings.worker_id,
            codec: SnowflakeCodec::new(settings.epoch),
            sequencer,
        })
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    pub fn codec(&self) -> SnowflakeCodec {
        self.codec
    }

    /// Generates the next identifier as its integer form.
    pub fn generate_binary(&self) -> Result<SnowflakeId> {
        let tick = self.sequencer.next()?;
        self.codec.pack(tick.timestamp, self.worker_id, tick.sequence)
    }

    /// Generates the next identifier as a decimal string.
    pub fn generate(&self) -> Result<String> {
        Ok(self.generate_binary()?.to_string())
    }
}
