//! factoryproxy-ffi: C-ABI exports for building and reading factory proxy descriptors.

mod args;
mod buffer;
mod descriptor;
mod error;
mod types;

use std::panic::AssertUnwindSafe;

pub use buffer::fp_buffer_free;
pub use descriptor::{fp_decode_json, fp_encode};
pub use types::{
    FpBuffer, FpResult, FP_ERR_DECODE, FP_ERR_ENCODE, FP_ERR_INTERNAL, FP_ERR_INVALID_ARGUMENT,
    FP_ERR_INVALID_DESCRIPTOR, FP_KIND_DEFAULT, FP_KIND_USER, FP_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn fp_init() -> FpResult {
    ffi_boundary(FpResult::Internal, || {
        error::clear_error_state();
        FpResult::Ok
    })
}

#[no_mangle]
pub extern "C" fn fp_cleanup() {
    ffi_boundary((), || {
        error::clear_error_state();
    });
}

#[no_mangle]
pub extern "C" fn fp_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
