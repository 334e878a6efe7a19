use chronoid_core::Error;
use modular_bitfield::prelude::*;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("canonical uuid pattern compiles")
});

/// A 128-bit UUID laid out as version 7.
///
/// Fields are declared from the least significant bit upwards:
///
/// ```text
/// left  = [timestamp:48][version:4][rand_a:12]
/// right = [variant:2][rand_b:62]
/// ```
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid7 {
    /// 62 bits of randomness.
    pub rand_b: B62,
    /// 2 bits, `0b10` for RFC 9562 UUIDs.
    pub variant: B2,
    /// 12 bits carrying the per-millisecond sequence.
    pub rand_a: B12,
    /// 4 bits, `0b0111`.
    pub version: B4,
    /// 48 bits of Unix time in milliseconds.
    pub timestamp: B48,
}

impl Uuid7 {
    pub fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.into_bytes())
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }

    /// Splits the UUID into its `(left, right)` 64-bit halves for storage
    /// that has no 128-bit integer type.
    pub fn halves(&self) -> (u64, u64) {
        let value = self.as_u128();
        ((value >> 64) as u64, value as u64)
    }

    pub fn from_halves(left: u64, right: u64) -> Self {
        Self::from_u128(u128::from(left) << 64 | u128::from(right))
    }

    /// Whether `value` has the `8-4-4-4-12` hexadecimal shape. Hex digits
    /// may be in either case; any other grouping, compact form included, is
    /// rejected.
    pub fn is_canonical(value: &str) -> bool {
        CANONICAL.is_match(value)
    }
}

impl fmt::Display for Uuid7 {
    /// Writes the lowercase 8-4-4-4-12 canonical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.as_u128();
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            v >> 96,
            (v >> 80) & 0xffff,
            (v >> 64) & 0xffff,
            (v >> 48) & 0xffff,
            v & 0xffff_ffff_ffff
        )
    }
}

impl FromStr for Uuid7 {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !Self::is_canonical(src) {
            return Err(Error::InvalidIdentifier(format!(
                "uuid must be 8-4-4-4-12 hex: {src:?}"
            )));
        }
        let hex: String = src.chars().filter(|c| *c != '-').collect();
        let value = u128::from_str_radix(&hex, 16)
            .map_err(|e| Error::InvalidIdentifier(format!("uuid {src:?}: {e}")))?;
        Ok(Self::from_u128(value))
    }
}

impl PartialOrd for Uuid7 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uuid7 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u128().cmp(&other.as_u128())
    }
}

impl From<Uuid7> for u128 {
    fn from(id: Uuid7) -> Self {
        id.as_u128()
    }
}

impl fmt::Debug for Uuid7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uuid7").field(&self.to_string()).finish()
    }
}
