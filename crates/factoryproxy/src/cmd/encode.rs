use std::fs;

use factoryproxy_binary::{CodecConfig, FieldRecorder, Value};
use factoryproxy_descriptor::{encode, encode_to_bytes, FactoryDescriptor, FactoryTarget};
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{binary_error, descriptor_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    let target = FactoryTarget::new(args.kind.into(), args.class_name.as_str());
    let descriptor = FactoryDescriptor::new(target, payload)
        .map_err(|err| descriptor_error("invalid descriptor", err))?;

    let bytes = encode_to_bytes(&descriptor, config)
        .map_err(|err| binary_error("encode failed", err))?;

    let mut recorder = FieldRecorder::new();
    let Ok(()) = encode(&descriptor, &mut recorder);

    if let Some(path) = &args.out {
        fs::write(path, &bytes)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
        info!(path = %path.display(), size = bytes.len(), "wrote descriptor");
        if matches!(format, OutputFormat::Raw) {
            return Ok(SUCCESS);
        }
    }

    print_encoded(&descriptor, &bytes, recorder.fields(), format);
    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Option<Value>> {
    if let Some(json) = &args.payload {
        return parse_payload(json, "--payload");
    }
    if let Some(path) = &args.payload_file {
        let text = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return parse_payload(&text, "--payload-file");
    }
    Ok(None)
}

/// JSON `null` means no payload.
fn parse_payload(text: &str, flag: &str) -> CliResult<Option<Value>> {
    let json: serde_json::Value = serde_json::from_str(text)
        .map_err(|err| CliError::new(USAGE, format!("{flag} is not valid JSON: {err}")))?;
    let value = Value::from_json(&json);
    Ok((!value.is_null()).then_some(value))
}
