use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by generator construction, ID generation and ID parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {field} {value}; expected 0..={max}")]
    InvalidConfiguration {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("clock moved backwards: last={last}ms, now={now}ms")]
    ClockRegression { last: i64, now: i64 },
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: i128,
        bits: u32,
    },
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}

impl Error {
    /// Checks that `value` fits in a field of `bits` bits.
    pub fn check_field(field: &'static str, value: i128, bits: u32) -> Result<()> {
        if value < 0 || value >= 1_i128 << bits {
            return Err(Error::FieldOverflow { field, value, bits });
        }
        Ok(())
    }

    /// Checks a construction-time setting against its inclusive maximum.
    pub fn check_setting(field: &'static str, value: u64, max: u64) -> Result<()> {
        if value > max {
            return Err(Error::InvalidConfiguration { field, value, max });
        }
        Ok(())
    }
}
