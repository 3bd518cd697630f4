#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const USER_HEX: &str =
    "000000000915000000636f6d2e6578616d706c652e4d79466163746f72796500000000";
const DEFAULT_HEX: &str = "0100000009160000006275696c742d696e2d63616368652d666163746f7279\
190100000002090400000073697a65030a00000000000000";

fn factoryproxy(args: &[&str]) -> Output {
    factoryproxy_with_format("json", args)
}

fn factoryproxy_with_format(format: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_factoryproxy"))
        .args(["--log-level", "error", "--format", format])
        .args(args)
        .output()
        .expect("factoryproxy should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn unique_temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "factoryproxy-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

#[test]
fn encode_user_factory_without_payload() {
    let out = stdout_json(&factoryproxy(&[
        "encode",
        "--kind",
        "user",
        "--class",
        "com.example.MyFactory",
    ]));

    assert_eq!(out["kind"], "user");
    assert_eq!(out["kind_code"], 0);
    assert_eq!(out["hex"], USER_HEX);

    let fields = out["fields"].as_array().expect("fields should be an array");
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["value"], 0);
    assert_eq!(fields[1]["value"], "com.example.MyFactory");
    assert!(fields[2]["value"].is_null());
    assert_eq!(fields[3]["name"], "reserved");
    assert_eq!(fields[3]["value"], 0);
}

#[test]
fn encode_default_factory_with_map_payload() {
    let out = stdout_json(&factoryproxy(&[
        "encode",
        "--kind",
        "default",
        "--class",
        "built-in-cache-factory",
        "--payload",
        "{\"size\":10}",
    ]));

    assert_eq!(out["kind_code"], 1);
    assert_eq!(out["hex"], DEFAULT_HEX);
    assert_eq!(out["fields"][2]["value"], serde_json::json!({"size": 10}));
}

#[test]
fn decode_hex_roundtrip() {
    let out = stdout_json(&factoryproxy(&["decode", DEFAULT_HEX]));

    assert_eq!(out["kind"], "default");
    assert_eq!(out["class_name"], "built-in-cache-factory");
    assert_eq!(out["payload"], serde_json::json!({"size": 10}));
    assert_eq!(out["properties"], serde_json::json!([]));
    assert_eq!(out["trailing_bytes"], 0);
}

#[test]
fn decode_keeps_repeated_property_keys() {
    let hex = "000000000903000000612e42650200000009010000006b030100000009010000006b0302000000";
    let out = stdout_json(&factoryproxy(&["decode", hex]));

    assert_eq!(out["class_name"], "a.B");
    assert_eq!(
        out["properties"],
        serde_json::json!([{"key": "k", "value": 1}, {"key": "k", "value": 2}])
    );
}

#[test]
fn zero_max_depth_encodes_absent_payload() {
    let out = stdout_json(&factoryproxy(&[
        "--max-depth",
        "0",
        "encode",
        "--kind",
        "user",
        "--class",
        "a.B",
    ]));
    assert_eq!(out["hex"], "000000000903000000612e426500000000");

    let output = factoryproxy(&[
        "--max-depth",
        "0",
        "encode",
        "--kind",
        "user",
        "--class",
        "a.B",
        "--payload",
        "[1]",
    ]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_reads_file_written_by_encode() {
    let path = unique_temp_path("roundtrip");
    let path_str = path.to_str().expect("temp path should be UTF-8");

    let encoded = factoryproxy_with_format(
        "raw",
        &[
            "encode",
            "--kind",
            "user",
            "--class",
            "com.example.MyFactory",
            "-o",
            path_str,
        ],
    );
    assert!(encoded.status.success());
    assert!(encoded.stdout.is_empty());

    let out = stdout_json(&factoryproxy(&["decode", "--file", path_str]));
    assert_eq!(out["class_name"], "com.example.MyFactory");
    assert!(out["payload"].is_null());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn decode_reads_stdin() {
    let bytes: Vec<u8> = (0..USER_HEX.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&USER_HEX[i..i + 2], 16).expect("valid hex"))
        .collect();

    let mut child = Command::new(env!("CARGO_BIN_EXE_factoryproxy"))
        .args(["--log-level", "error", "--format", "json", "decode", "--file", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("decode should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(&bytes)
        .expect("stdin should accept bytes");
    let output = child.wait_with_output().expect("decode should finish");

    let out = stdout_json(&output);
    assert_eq!(out["kind"], "user");
}

#[test]
fn invalid_class_name_is_usage_error() {
    let output = factoryproxy(&["encode", "--kind", "user", "--class", "com..Broken"]);
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid descriptor"), "stderr: {stderr}");
}

#[test]
fn malformed_input_is_data_invalid() {
    let output = factoryproxy(&["decode", "xyz1"]);
    assert_eq!(output.status.code(), Some(60));

    let truncated = &USER_HEX[..20];
    let output = factoryproxy(&["decode", truncated]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("decode failed"), "stderr: {stderr}");

    let output = factoryproxy(&["decode", "07000000"]);
    assert_eq!(output.status.code(), Some(60));
}
