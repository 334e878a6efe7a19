use crate::{snowflake_id::parse_decimal_u64, SnowflakeId};
use chronoid_core::{Error, Result, SEQUENCE_BITS};
use jiff::Timestamp;
use serde::Serialize;

pub const TIMESTAMP_BITS: u32 = 41;
pub const WORKER_ID_BITS: u32 = 10;

/// Default epoch, 2010-11-04T01:42:54.657Z.
pub const DEFAULT_EPOCH: Timestamp = Timestamp::constant(1_288_834_974, 657_000_000);

/// Decoded view of a [`SnowflakeId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnowflakeFields {
    pub id: u64,
    /// Absolute Unix time in milliseconds (epoch added back).
    pub timestamp: i64,
    pub worker_id: u16,
    pub sequence: u16,
    /// The identifier as a 64 character, zero-padded bit string.
    pub binary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<Timestamp>,
}

/// Packs and unpacks Snowflake identifiers relative to a fixed epoch.
///
/// The codec holds no state besides the epoch; it is `Copy` and can be
/// shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeCodec {
    epoch: Timestamp,
}

impl Default for SnowflakeCodec {
    fn default() -> Self {
        Self::new(DEFAULT_EPOCH)
    }
}

impl SnowflakeCodec {
    pub const fn new(epoch: Timestamp) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    /// Packs an absolute Unix millisecond `timestamp` with its worker id and
    /// sequence.
    ///
    /// Fails with [`Error::FieldOverflow`] when any field exceeds its width,
    /// including timestamps before the epoch or 2^41 ms after it.
    pub fn pack(&self, timestamp: i64, worker_id: u16, sequence: u16) -> Result<SnowflakeId> {
        let elapsed = i128::from(timestamp) - i128::from(self.epoch.as_millisecond());
        Error::check_field("timestamp", elapsed, TIMESTAMP_BITS)?;
        Error::check_field("worker_id", worker_id.into(), WORKER_ID_BITS)?;
        Error::check_field("sequence", sequence.into(), SEQUENCE_BITS)?;

        Ok(SnowflakeId::new()
            .with_timestamp(elapsed as u64)
            .with_worker_id(worker_id)
            .with_sequence(sequence))
    }

    pub fn unpack(&self, id: SnowflakeId) -> SnowflakeFields {
        let timestamp = id.timestamp() as i64 + self.epoch.as_millisecond();
        SnowflakeFields {
            id: id.as_u64(),
            timestamp,
            worker_id: id.worker_id(),
            sequence: id.sequence(),
            binary: format!("{:064b}", id.as_u64()),
            datetime: Timestamp::from_millisecond(timestamp).ok(),
        }
    }

    /// Decodes the canonical decimal string form.
    pub fn parse(&self, value: &str) -> Result<SnowflakeFields> {
        Ok(self.unpack(value.parse()?))
    }

    /// Decodes the integer form.
    pub fn parse_u64(&self, value: u64) -> Result<SnowflakeFields> {
        Ok(self.unpack(SnowflakeId::try_from(value)?))
    }

    /// Whether `value` round-trips as an unsigned 64-bit decimal integer.
    ///
    /// This is looser than [`SnowflakeCodec::parse`], which also refuses the
    /// sign bit. Says nothing about whether the worker id is one actually in
    /// use.
    pub fn is_valid(value: &str) -> bool {
        parse_decimal_u64(value).is_ok_and(|parsed| parsed.to_string() == value)
    }

    /// Integer form of [`SnowflakeCodec::is_valid`].
    pub fn is_valid_u64(value: u64) -> bool {
        Self::is_valid(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_epoch_is_the_classic_one() {
        assert_eq!(DEFAULT_EPOCH.as_millisecond(), 1_288_834_974_657);
    }

    #[test]
    fn pack_then_unpack_restores_fields() {
        let codec = SnowflakeCodec::default();
        let cases = [
            (DEFAULT_EPOCH.as_millisecond(), 0, 0),
            (1_716_093_634_155, 123, 0),
            (1_716_093_634_155, 1023, 4095),
            (DEFAULT_EPOCH.as_millisecond() + (1 << 41) - 1, 7, 42),
        ];

        for (timestamp, worker_id, sequence) in cases {
            let id = codec.pack(timestamp, worker_id, sequence).unwrap();
            let fields = codec.unpack(id);
            assert_eq!(fields.timestamp, timestamp);
            assert_eq!(fields.worker_id, worker_id);
            assert_eq!(fields.sequence, sequence);
        }
    }

    #[test]
    fn pack_matches_shift_arithmetic() {
        let codec = SnowflakeCodec::default();
        let timestamp = 1_716_093_634_155;
        let id = codec.pack(timestamp, 123, 9).unwrap();
        let elapsed = (timestamp - DEFAULT_EPOCH.as_millisecond()) as u64;
        assert_eq!(id.as_u64(), elapsed << 22 | 123 << 12 | 9);
    }

    #[test]
    fn pack_rejects_out_of_range_fields() {
        let codec = SnowflakeCodec::default();
        let epoch = DEFAULT_EPOCH.as_millisecond();

        assert!(matches!(
            codec.pack(epoch - 1, 0, 0),
            Err(Error::FieldOverflow {
                field: "timestamp",
                value: -1,
                ..
            })
        ));
        assert!(matches!(
            codec.pack(epoch + (1 << 41), 0, 0),
            Err(Error::FieldOverflow {
                field: "timestamp",
                bits: 41,
                ..
            })
        ));
        assert!(matches!(
            codec.pack(epoch, 1024, 0),
            Err(Error::FieldOverflow {
                field: "worker_id",
                ..
            })
        ));
        assert!(matches!(
            codec.pack(epoch, 0, 4096),
            Err(Error::FieldOverflow {
                field: "sequence",
                ..
            })
        ));
    }

    #[test]
    fn unpack_reports_padded_binary() {
        let codec = SnowflakeCodec::default();
        let fields = codec.parse("4198401").unwrap();
        assert_eq!(fields.binary.len(), 64);
        // timestamp bit 22, worker bit 12, sequence bit 0
        let expected = format!(
            "{}1{}1{}1",
            "0".repeat(41),
            "0".repeat(9),
            "0".repeat(11)
        );
        assert_eq!(fields.binary, expected);
        assert_eq!(fields.timestamp, DEFAULT_EPOCH.as_millisecond() + 1);
        assert_eq!(fields.worker_id, 1);
        assert_eq!(fields.sequence, 1);
    }

    #[test]
    fn custom_epoch_shifts_timestamps() {
        let epoch = Timestamp::from_millisecond(1_700_000_000_000).unwrap();
        let codec = SnowflakeCodec::new(epoch);
        let id = codec.pack(1_700_000_000_005, 3, 0).unwrap();
        assert_eq!(id.timestamp(), 5);
        assert_eq!(codec.unpack(id).timestamp, 1_700_000_000_005);
    }

    #[test]
    fn validity_check() {
        assert!(SnowflakeCodec::is_valid("1541815603606036480"));
        assert!(!SnowflakeCodec::is_valid("abc"));
        assert!(!SnowflakeCodec::is_valid("01"));
        assert!(!SnowflakeCodec::is_valid("+1"));
        assert!(!SnowflakeCodec::is_valid("18446744073709551616"));
    }

    #[test]
    fn validity_covers_the_whole_unsigned_range() {
        // valid as unsigned integers even though parse refuses the sign bit
        assert!(SnowflakeCodec::is_valid("9223372036854775808"));
        assert!(SnowflakeCodec::is_valid(&u64::MAX.to_string()));
        assert!(SnowflakeCodec::default().parse("9223372036854775808").is_err());

        assert!(SnowflakeCodec::is_valid_u64(0));
        assert!(SnowflakeCodec::is_valid_u64(u64::MAX));
    }

    #[test]
    fn parse_u64_rejects_sign_bit() {
        let codec = SnowflakeCodec::default();
        assert!(codec.parse_u64(u64::MAX).is_err());
        assert_eq!(codec.parse_u64(1).unwrap().sequence, 1);
    }
}
