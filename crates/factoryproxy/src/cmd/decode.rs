use std::fs;
use std::io::{self, Read};
use std::path::Path;

use factoryproxy_binary::{BinaryReader, CodecConfig};
use factoryproxy_descriptor::decode;
use tracing::{debug, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let data = resolve_input(&args)?;
    debug!(size = data.len(), "decoding descriptor");

    let mut reader = BinaryReader::with_config(data, *config);
    let decoded = decode(&mut reader).map_err(|err| decode_error("decode failed", err))?;

    let trailing = reader.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring bytes after descriptor");
    }

    print_decoded(&decoded, trailing, format);
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    match &args.file {
        Some(path) => read_file(path),
        None => Err(CliError::new(USAGE, "either HEX or --file is required")),
    }
}

fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(data);
    }
    fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}

/// Parse hex text. Whitespace anywhere and a leading `0x` are ignored.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = trimmed
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("hex input has an odd number of digits ({})", digits.len()),
        ));
    }

    digits
        .chunks_exact(2)
        .map(|pair| -> CliResult<u8> {
            Ok((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?)
        })
        .collect()
}

fn hex_digit(b: u8) -> CliResult<u8> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(CliError::new(
            DATA_INVALID,
            format!("invalid hex digit: {:?}", char::from(b)),
        )),
    }
}
