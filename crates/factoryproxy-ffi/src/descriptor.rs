use std::os::raw::c_char;

use factoryproxy_binary::{CodecConfig, Value};
use factoryproxy_descriptor::{decode_bytes, FactoryDescriptor, FactoryKind, FactoryTarget};

use crate::args;
use crate::buffer::write_buffer_out;
use crate::error;
use crate::types::{FpBuffer, FpResult};

/// Build a descriptor and encode it into `out`.
///
/// `kind` is the wire code (`FP_KIND_USER` or `FP_KIND_DEFAULT`).
/// `payload_json` may be null for an absent payload; otherwise it is a JSON
/// document converted into the payload object graph.
///
/// # Safety
/// `class_name` must be a valid NUL-terminated C string. `payload_json` must be
/// null or a valid NUL-terminated C string. `out` must be a valid writable
/// pointer; a buffer it already holds from this library is freed first.
#[no_mangle]
pub unsafe extern "C" fn fp_encode(
    kind: i32,
    class_name: *const c_char,
    payload_json: *const c_char,
    out: *mut FpBuffer,
) -> FpResult {
    crate::ffi_boundary(FpResult::Internal, || {
        error::clear_error_state();

        let Some(kind) = FactoryKind::from_code(kind) else {
            return error::set_invalid_argument(format!("unknown factory kind {kind}"));
        };
        let class_name = {
            // SAFETY: We validate null and UTF-8 in helper.
            match unsafe { args::required_str_arg(class_name, "class_name") } {
                Some(v) => v,
                None => return FpResult::InvalidArgument,
            }
        };
        let payload_json = {
            // SAFETY: We validate UTF-8 in helper; null is allowed.
            match unsafe { args::optional_str_arg(payload_json, "payload_json") } {
                Some(v) => v,
                None => return FpResult::InvalidArgument,
            }
        };

        let payload = match payload_json {
            None => None,
            Some(text) => match serde_json::from_str::<serde_json::Value>(text) {
                Ok(json) => Some(Value::from_json(&json)),
                Err(err) => {
                    return error::set_invalid_argument(format!(
                        "payload_json is not valid JSON: {err}"
                    ))
                }
            },
        };

        let descriptor =
            match FactoryDescriptor::new(FactoryTarget::new(kind, class_name), payload) {
                Ok(descriptor) => descriptor,
                Err(err) => return error::map_descriptor_error(&err),
            };

        match descriptor.to_bytes() {
            Ok(bytes) => write_buffer_out(out, &bytes),
            Err(err) => error::map_encode_error(&err),
        }
    })
}

/// Decode descriptor bytes and write a JSON rendering of it into `out`.
///
/// The JSON object has `kind`, `kind_code`, `class_name`, `payload` and
/// `properties` members; `properties` is an array of `{"key", "value"}`
/// objects in wire order. The buffer is UTF-8 and not NUL-terminated.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes. `out`
/// must be a valid writable pointer.
#[no_mangle]
pub unsafe extern "C" fn fp_decode_json(data: *const u8, len: usize, out: *mut FpBuffer) -> FpResult {
    crate::ffi_boundary(FpResult::Internal, || {
        error::clear_error_state();

        let data = {
            // SAFETY: We validate null/len in helper.
            match unsafe { args::bytes_arg(data, len, "data") } {
                Some(v) => v,
                None => return FpResult::InvalidArgument,
            }
        };

        let decoded = match decode_bytes(data, &CodecConfig::default()) {
            Ok(decoded) => decoded,
            Err(err) => return error::map_decode_error(&err),
        };

        match serde_json::to_vec(&decoded.to_json()) {
            Ok(json) => write_buffer_out(out, &json),
            Err(err) => {
                error::set_error_message(format!("failed rendering JSON: {err}"));
                FpResult::Internal
            }
        }
    })
}
