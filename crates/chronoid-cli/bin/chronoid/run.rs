use crate::cli::{Command, DecodeArgs, GenerateArgs, SchemeArg, CLI};
use anyhow::Context;
use chronoid_generator::Generator;
use chronoid_snowflake::{Snowflake, SnowflakeCodec, SnowflakeSettings};
use chronoid_uuid7::{codec as uuid7_codec, Uuid7Generator, Uuid7Settings};
use jiff::Timestamp;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Executes the parsed command, writing its results to `out`.
pub fn run(config: &CLI, out: &mut impl Write) -> anyhow::Result<()> {
    let epoch = Timestamp::from_millisecond(config.epoch_ms)
        .with_context(|| format!("invalid epoch {}ms", config.epoch_ms))?;

    match (&config.command, config.scheme) {
        (Command::Generate(args), SchemeArg::Snowflake) => {
            let settings = SnowflakeSettings::builder()
                .worker_id(args.worker_id)
                .sequence(args.sequence)
                .epoch(epoch)
                .build();
            let generator = Snowflake::new(settings).context("invalid snowflake configuration")?;
            generate(&generator, args, out)
        }
        (Command::Generate(args), SchemeArg::Uuid7) => {
            let settings = Uuid7Settings::builder()
                .worker_id(args.worker_id)
                .sequence(args.sequence)
                .build();
            let generator = Uuid7Generator::new(settings).context("invalid uuid7 configuration")?;
            generate(&generator, args, out)
        }
        (Command::Decode(args), SchemeArg::Snowflake) => {
            let codec = SnowflakeCodec::new(epoch);
            decode(args, |id| codec.parse(id), out)
        }
        (Command::Decode(args), SchemeArg::Uuid7) => decode(args, uuid7_codec::parse, out),
    }
}

fn generate<G: Generator>(
    generator: &G,
    args: &GenerateArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    debug!(count = args.count, "generating identifiers");
    for _ in 0..args.count {
        writeln!(out, "{}", generator.generate()?)?;
    }
    Ok(())
}

fn decode<T, F>(args: &DecodeArgs, parse: F, out: &mut impl Write) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&str) -> chronoid_snowflake::Result<T>,
{
    for id in &args.ids {
        let fields = parse(id).with_context(|| format!("cannot decode {id:?}"))?;
        writeln!(out, "{}", serde_json::to_string_pretty(&fields)?)?;
    }
    Ok(())
}
