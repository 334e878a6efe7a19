//! 64-bit Snowflake identifiers.
//!
//! ```text
//! [sign=0][timestamp:41][worker_id:10][sequence:12]
//! ```
//!
//! The timestamp counts milliseconds since a configurable epoch
//! ([`DEFAULT_EPOCH`] unless set otherwise), which leaves room for roughly
//! 69 years of identifiers.

pub mod codec;
mod snowflake;
mod snowflake_id;

pub use chronoid_core::{Error, Result};
pub use codec::{SnowflakeCodec, SnowflakeFields, DEFAULT_EPOCH};
pub use snowflake::{Snowflake, SnowflakeSettings};
pub use snowflake_id::SnowflakeId;
