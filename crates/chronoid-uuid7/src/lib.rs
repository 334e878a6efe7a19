//! RFC 9562 UUID version 7 identifiers.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |   rand_a (sequence)   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! `rand_a` holds the 12-bit per-millisecond sequence, which keeps the
//! identifiers of one generator strictly increasing. `rand_b` is 62 bits
//! from a cryptographically strong [`RandomSource`].

pub mod codec;
mod generator;
pub mod random;
mod uuid7;

pub use chronoid_core::{Error, Result};
pub use codec::Uuid7Fields;
pub use generator::{Uuid7Generator, Uuid7Settings};
pub use random::{Adapter, OsRandom, RandomSource};
pub use uuid7::Uuid7;
