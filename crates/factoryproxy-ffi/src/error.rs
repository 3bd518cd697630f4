use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use factoryproxy_binary::BinaryError;
use factoryproxy_descriptor::{DecodeError, DescriptorError};

use crate::types::FpResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let message = message.into();
    let sanitized = message.replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(message: impl Into<String>) -> FpResult {
    set_error_message(message);
    FpResult::InvalidArgument
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_descriptor_error(err: &DescriptorError) -> FpResult {
    set_error_message(err.to_string());
    FpResult::InvalidDescriptor
}

pub(crate) fn map_encode_error(err: &BinaryError) -> FpResult {
    set_error_message(format!("encode failed: {err}"));
    FpResult::EncodeFailed
}

pub(crate) fn map_decode_error(err: &DecodeError) -> FpResult {
    set_error_message(format!("decode failed: {err}"));
    FpResult::DecodeFailed
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
