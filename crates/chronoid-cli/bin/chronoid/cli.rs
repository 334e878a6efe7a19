use chronoid_snowflake::DEFAULT_EPOCH;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const SCHEME_ENV: &str = "CHRONOID_SCHEME";
pub const EPOCH_ENV: &str = "CHRONOID_EPOCH_MS";
pub const WORKER_ID_ENV: &str = "CHRONOID_WORKER_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    #[value(name = "snowflake")]
    Snowflake,
    #[value(name = "uuid7")]
    Uuid7,
}

impl Display for SchemeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeArg::Snowflake => write!(f, "snowflake"),
            SchemeArg::Uuid7 => write!(f, "uuid7"),
        }
    }
}

/// Generate and decode time-ordered identifiers.
#[derive(Debug, Parser)]
#[command(name = "chronoid", version)]
pub struct CLI {
    #[arg(
        long,
        global = true,
        env = SCHEME_ENV,
        value_enum,
        default_value_t = SchemeArg::Snowflake
    )]
    pub scheme: SchemeArg,

    /// Snowflake epoch in Unix milliseconds.
    #[arg(
        long,
        global = true,
        env = EPOCH_ENV,
        default_value_t = DEFAULT_EPOCH.as_millisecond(),
        allow_negative_numbers = true
    )]
    pub epoch_ms: i64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print new identifiers, one per line.
    Generate(GenerateArgs),
    /// Print the fields of each identifier as JSON.
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(short, long, env = WORKER_ID_ENV, default_value_t = 0)]
    pub worker_id: u16,

    /// Starting sequence (snowflake) or extra sequence offset (uuid7).
    #[arg(short, long, default_value_t = 0)]
    pub sequence: u16,

    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
}
