//! Stateless packing and unpacking of UUIDv7 fields.

use crate::Uuid7;
use chronoid_core::{Error, Result};
use jiff::Timestamp;
use serde::Serialize;

pub const TIMESTAMP_BITS: u32 = 48;
pub const RAND_A_BITS: u32 = 12;
pub const RAND_B_BITS: u32 = 62;
pub const RAND_B_MASK: u64 = (1 << RAND_B_BITS) - 1;

pub const VERSION: u8 = 0b0111;
pub const VARIANT: u8 = 0b10;

/// Decoded view of a [`Uuid7`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uuid7Fields {
    pub uuid: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
    pub version: u8,
    pub variant: u8,
    pub rand_a: u16,
    pub rand_b: u64,
    pub left: u64,
    pub right: u64,
    /// The identifier as a 128 character, zero-padded bit string.
    pub binary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<Timestamp>,
}

/// Packs a UUIDv7 with the version and variant fixed.
///
/// Fails with [`Error::FieldOverflow`] if `timestamp` is negative or any
/// field exceeds its width.
pub fn pack(timestamp: i64, rand_a: u16, rand_b: u64) -> Result<Uuid7> {
    Error::check_field("timestamp", timestamp.into(), TIMESTAMP_BITS)?;
    Error::check_field("rand_a", rand_a.into(), RAND_A_BITS)?;
    Error::check_field("rand_b", rand_b.into(), RAND_B_BITS)?;

    Ok(Uuid7::new()
        .with_timestamp(timestamp as u64)
        .with_version(VERSION)
        .with_rand_a(rand_a)
        .with_variant(VARIANT)
        .with_rand_b(rand_b))
}

pub fn unpack(id: Uuid7) -> Uuid7Fields {
    let (left, right) = id.halves();
    let timestamp = id.timestamp() as i64;
    Uuid7Fields {
        uuid: id.to_string(),
        timestamp,
        version: id.version(),
        variant: id.variant(),
        rand_a: id.rand_a(),
        rand_b: id.rand_b(),
        left,
        right,
        binary: format!("{:0128b}", id.as_u128()),
        datetime: Timestamp::from_millisecond(timestamp).ok(),
    }
}

/// Decodes the canonical string form.
///
/// Only the shape is enforced; a well-formed UUID of another version
/// decodes with its own version and variant bits reported as they are.
pub fn parse(value: &str) -> Result<Uuid7Fields> {
    Ok(unpack(value.parse()?))
}

pub fn is_valid(value: &str) -> bool {
    Uuid7::is_canonical(value)
}
