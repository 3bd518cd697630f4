use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use factoryproxy_binary::{Field, Value};
use factoryproxy_descriptor::{DecodedFactory, FactoryDescriptor};
use serde::Serialize;

/// Names of the four positional descriptor fields, in wire order.
pub const FIELD_NAMES: [&str; 4] = ["kindCode", "className", "payload", "reserved"];

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FieldOutput {
    index: usize,
    name: &'static str,
    #[serde(rename = "type")]
    field_type: &'static str,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    kind: &'static str,
    kind_code: i32,
    class_name: &'a str,
    size: usize,
    hex: String,
    fields: Vec<FieldOutput>,
}

pub fn print_encoded(
    descriptor: &FactoryDescriptor,
    bytes: &[u8],
    fields: &[Field],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                kind: descriptor.kind().as_str(),
                kind_code: descriptor.kind().code(),
                class_name: descriptor.class_name(),
                size: bytes.len(),
                hex: to_hex(bytes),
                fields: field_outputs(fields),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "FIELD", "TYPE", "VALUE"]);
            for field in field_outputs(fields) {
                table.add_row(vec![
                    field.index.to_string(),
                    field.name.to_string(),
                    field.field_type.to_string(),
                    field.value.to_string(),
                ]);
            }
            println!("{table}");
            println!("{} bytes: {}", bytes.len(), to_hex(bytes));
        }
        OutputFormat::Pretty => {
            println!(
                "kind={}({}) class={} payload={} reserved={} size={} hex={}",
                descriptor.kind(),
                descriptor.kind().code(),
                descriptor.class_name(),
                payload_json(descriptor),
                descriptor.reserved(),
                bytes.len(),
                to_hex(bytes)
            );
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

pub fn print_decoded(decoded: &DecodedFactory, trailing_bytes: usize, format: OutputFormat) {
    let descriptor = &decoded.descriptor;
    let out = decoded_json(decoded, trailing_bytes);

    match format {
        OutputFormat::Json => println!("{out}"),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec![
                    "kind".to_string(),
                    format!("{} ({})", descriptor.kind(), descriptor.kind().code()),
                ])
                .add_row(vec![
                    "class_name".to_string(),
                    descriptor.class_name().to_string(),
                ])
                .add_row(vec!["payload".to_string(), out["payload"].to_string()]);
            for (key, value) in &decoded.properties {
                table.add_row(vec![format!("property {key}"), value.to_json().to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "kind={}({}) class={} payload={} properties={}",
                descriptor.kind(),
                descriptor.kind().code(),
                descriptor.class_name(),
                out["payload"],
                decoded.properties.len()
            );
        }
        OutputFormat::Raw => println!("{}", descriptor.class_name()),
    }
}

/// Decoded descriptor JSON plus the count of ignored trailing bytes.
fn decoded_json(decoded: &DecodedFactory, trailing_bytes: usize) -> serde_json::Value {
    let mut out = decoded.to_json();
    if let serde_json::Value::Object(members) = &mut out {
        members.insert(
            "trailing_bytes".to_string(),
            serde_json::Value::from(trailing_bytes),
        );
    }
    out
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Lowercase hex, two digits per byte, no separators.
pub fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn payload_json(descriptor: &FactoryDescriptor) -> serde_json::Value {
    descriptor
        .payload()
        .map_or(serde_json::Value::Null, Value::to_json)
}

fn field_outputs(fields: &[Field]) -> Vec<FieldOutput> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| FieldOutput {
            index: i + 1,
            name: FIELD_NAMES.get(i).copied().unwrap_or("extra"),
            field_type: field.type_name(),
            value: field_value(field),
        })
        .collect()
}

fn field_value(field: &Field) -> serde_json::Value {
    match field {
        Field::Int(v) => serde_json::Value::from(*v),
        Field::String(v) => v
            .as_deref()
            .map_or(serde_json::Value::Null, serde_json::Value::from),
        Field::Object(v) => v.to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(to_hex(&[0x00, 0x0a, 0xff]), "000aff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn field_outputs_are_named_in_wire_order() {
        let fields = vec![
            Field::Int(1),
            Field::String(Some("cache".to_string())),
            Field::Object(Value::map([("size", 10)])),
            Field::Int(0),
        ];
        let out = field_outputs(&fields);
        let names: Vec<_> = out.iter().map(|f| f.name).collect();
        assert_eq!(names, FIELD_NAMES.to_vec());
        assert_eq!(out[2].value, serde_json::json!({"size": 10}));
        assert_eq!(out[1].field_type, "string");
    }

    #[test]
    fn decoded_json_keeps_repeated_property_keys() {
        let decoded = DecodedFactory {
            descriptor: FactoryDescriptor::user("a.B", None).unwrap(),
            properties: vec![
                ("k".to_string(), Value::Int(1)),
                ("k".to_string(), Value::Int(2)),
            ],
        };
        let out = decoded_json(&decoded, 3);
        assert_eq!(
            out["properties"],
            serde_json::json!([{"key": "k", "value": 1}, {"key": "k", "value": 2}])
        );
        assert_eq!(out["trailing_bytes"], 3);
        assert_eq!(out["class_name"], "a.B");
    }

    #[test]
    fn null_string_field_renders_as_null() {
        assert_eq!(field_value(&Field::String(None)), serde_json::Value::Null);
    }
}
