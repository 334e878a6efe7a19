use chronoid_core::Error;
use modular_bitfield::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A 64-bit Snowflake identifier.
///
/// Fields are declared from the least significant bit upwards, so the
/// numeric layout reads `[sign=0][timestamp:41][worker_id:10][sequence:12]`.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeId {
    /// 12 bits for the per-millisecond sequence.
    pub sequence: B12,
    /// 10 bits for the worker id (up to 1024 workers).
    pub worker_id: B10,
    /// 41 bits for milliseconds since the codec epoch.
    pub timestamp: B41,
    #[skip]
    __: B1,
}

impl SnowflakeId {
    /// Returns the identifier as an integer.
    pub fn as_u64(&self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }
}

impl TryFrom<u64> for SnowflakeId {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value >> 63 != 0 {
            return Err(Error::InvalidIdentifier(format!(
                "snowflake {value} has the sign bit set"
            )));
        }
        Ok(Self::from_bytes(value.to_le_bytes()))
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.as_u64()
    }
}

/// Reads the canonical base-10 form of an unsigned 64-bit integer: ASCII
/// digits, no sign, no leading zeros.
pub(crate) fn parse_decimal_u64(src: &str) -> Result<u64, Error> {
    if src.is_empty() || !src.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidIdentifier(format!(
            "snowflake must be a decimal integer: {src:?}"
        )));
    }
    if src.len() > 1 && src.starts_with('0') {
        return Err(Error::InvalidIdentifier(format!(
            "snowflake has leading zeros: {src:?}"
        )));
    }
    src.parse().map_err(|_| {
        Error::InvalidIdentifier(format!("snowflake does not fit in 64 bits: {src:?}"))
    })
}

impl FromStr for SnowflakeId {
    type Err = Error;

    /// Accepts the canonical base-10 form only, with the sign bit clear.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::try_from(parse_decimal_u64(src)?)
    }
}

impl PartialOrd for SnowflakeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SnowflakeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u64().cmp(&other.as_u64())
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
