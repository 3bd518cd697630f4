use clap::{Args, Subcommand, ValueEnum};
use factoryproxy_binary::CodecConfig;
use factoryproxy_descriptor::FactoryKind;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a factory proxy descriptor.
    Encode(EncodeArgs),
    /// Decode a factory proxy descriptor from hex or a file.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, config),
        Command::Decode(args) => decode::run(args, format, config),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format, config),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum KindArg {
    /// Application-supplied factory, named by fully-qualified class name.
    User,
    /// Factory built into the remote runtime, named by identifier.
    Default,
}

impl From<KindArg> for FactoryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::User => FactoryKind::User,
            KindArg::Default => FactoryKind::Default,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Factory kind.
    #[arg(long, value_enum)]
    pub kind: KindArg,
    /// Factory class name or built-in factory identifier.
    #[arg(long = "class", value_name = "NAME")]
    pub class_name: String,
    /// JSON payload passed to the factory. Omit for no payload.
    #[arg(long, value_name = "JSON", conflicts_with = "payload_file")]
    pub payload: Option<String>,
    /// Read the JSON payload from a file.
    #[arg(long, value_name = "PATH", conflicts_with = "payload")]
    pub payload_file: Option<PathBuf>,
    /// Write the encoded bytes to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded descriptor bytes (whitespace and a 0x prefix are allowed).
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw descriptor bytes from a file ("-" for stdin).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
