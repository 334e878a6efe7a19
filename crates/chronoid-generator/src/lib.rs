//! A common interface over the Snowflake and UUIDv7 generators.
//!
//! Code written against [`Generator`] can switch encodings by swapping the
//! concrete generator and nothing else.

use chronoid_core::{Clock, Result};
use chronoid_snowflake::{Snowflake, SnowflakeFields, SnowflakeId};
use chronoid_uuid7::{RandomSource, Uuid7, Uuid7Fields, Uuid7Generator};
use serde::Serialize;
use std::fmt::Display;

/// Trait for generating time-ordered identifiers.
///
/// Implementations keep their own sequencer state; successive calls on one
/// instance return strictly increasing identifiers.
pub trait Generator: Send + Sync + 'static {
    /// The codec-native form of an identifier.
    type Output: Copy + Ord + Display;
    /// The decoded fields of an identifier.
    type Fields: Serialize;

    /// Generates the next identifier in its codec-native form.
    fn generate_binary(&self) -> Result<Self::Output>;

    /// Generates the next identifier in its string form.
    fn generate(&self) -> Result<String> {
        Ok(self.generate_binary()?.to_string())
    }

    /// Decodes an identifier produced by a generator configured like this one.
    fn parse(&self, value: &str) -> Result<Self::Fields>;

    /// Whether `value` has the string form of this scheme.
    fn is_valid(&self, value: &str) -> bool;
}

impl<C: Clock + 'static> Generator for Snowflake<C> {
    type Output = SnowflakeId;
    type Fields = SnowflakeFields;

    fn generate_binary(&self) -> Result<Self::Output> {
        Snowflake::generate_binary(self)
    }

    fn parse(&self, value: &str) -> Result<Self::Fields> {
        // decode against this generator's epoch, not the default one
        self.codec().parse(value)
    }

    fn is_valid(&self, value: &str) -> bool {
        chronoid_snowflake::SnowflakeCodec::is_valid(value)
    }
}

impl<R: RandomSource + 'static, C: Clock + 'static> Generator for Uuid7Generator<R, C> {
    type Output = Uuid7;
    type Fields = Uuid7Fields;

    fn generate_binary(&self) -> Result<Self::Output> {
        Uuid7Generator::generate_binary(self)
    }

    fn parse(&self, value: &str) -> Result<Self::Fields> {
        chronoid_uuid7::codec::parse(value)
    }

    fn is_valid(&self, value: &str) -> bool {
        chronoid_uuid7::codec::is_valid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Generator;
    use chronoid_snowflake::{Snowflake, SnowflakeSettings};
    use chronoid_uuid7::{Uuid7Generator, Uuid7Settings};

    fn generate_two<G: Generator>(generator: &G) -> (String, String) {
        (
            generator.generate().unwrap(),
            generator.generate().unwrap(),
        )
    }

    #[test]
    fn snowflake_implements_generator_trait() {
        let settings = SnowflakeSettings::builder().worker_id(0).build();
        let snowflake = Snowflake::new(settings).unwrap();

        let (first, second) = generate_two(&snowflake);

        assert_ne!(first, second);
        assert!(Generator::is_valid(&snowflake, &first));
    }

    #[test]
    fn uuid7_implements_generator_trait() {
        let uuid7 = Uuid7Generator::new(Uuid7Settings::default()).unwrap();

        let (first, second) = generate_two(&uuid7);

        assert_ne!(first, second);
        assert!(Generator::is_valid(&uuid7, &first));
        assert!(!Generator::is_valid(&uuid7, "1541815603606036480"));
    }
}
