mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use factoryproxy_binary::{CodecConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "factoryproxy",
    version,
    about = "Build and inspect cross-runtime factory proxy descriptors"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Maximum nesting depth of payload collections and maps.
    #[arg(
        long,
        env = "FACTORYPROXY_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH,
        global = true
    )]
    max_depth: usize,

    /// Maximum byte length or element count of one payload node.
    #[arg(
        long,
        env = "FACTORYPROXY_MAX_LENGTH",
        default_value_t = DEFAULT_MAX_LENGTH,
        global = true
    )]
    max_length: usize,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            max_depth: self.max_depth,
            max_length: self.max_length,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = cli.codec_config();
    let result = cmd::run(cli.command, format, &config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "factoryproxy",
            "encode",
            "--kind",
            "default",
            "--class",
            "built-in-cache-factory",
            "--payload",
            "{\"size\":10}",
        ])
        .expect("encode args should parse");

        assert!(matches!(cli.command, Command::Encode(_)));
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "factoryproxy",
            "encode",
            "--kind",
            "user",
            "--class",
            "com.example.MyFactory",
            "--payload",
            "null",
            "--payload-file",
            "payload.json",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn decode_requires_input() {
        let err = Cli::try_parse_from(["factoryproxy", "decode"])
            .expect_err("decode without input should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn limits_flow_into_codec_config() {
        let cli = Cli::try_parse_from([
            "factoryproxy",
            "--max-depth",
            "4",
            "--max-length",
            "128",
            "decode",
            "00000000",
        ])
        .expect("decode args should parse");

        let config = cli.codec_config();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_length, 128);
    }
}
