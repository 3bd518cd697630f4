use std::ptr;

use crate::error;
use crate::types::{FpBuffer, FpResult};

/// Store `bytes` in `out`, releasing any buffer it already held.
pub(crate) fn write_buffer_out(out: *mut FpBuffer, bytes: &[u8]) -> FpResult {
    if out.is_null() {
        return error::set_invalid_argument("out cannot be null");
    }

    let buffer = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *out }
    };
    release(buffer);

    let boxed: Box<[u8]> = bytes.to_vec().into_boxed_slice();
    let len = boxed.len();
    buffer.data = if len == 0 {
        ptr::null_mut()
    } else {
        Box::into_raw(boxed) as *mut u8
    };
    buffer.len = len;

    FpResult::Ok
}

fn release(buffer: &mut FpBuffer) {
    if !buffer.data.is_null() {
        let slice_ptr = ptr::slice_from_raw_parts_mut(buffer.data, buffer.len);
        // SAFETY: Non-null buffers are allocated as `Box<[u8]>` by `write_buffer_out`.
        unsafe {
            drop(Box::from_raw(slice_ptr));
        }
    }
    *buffer = FpBuffer::default();
}

/// Free memory held by an [`FpBuffer`] populated by this library.
///
/// # Safety
/// `buffer` must be either null or a valid pointer to an `FpBuffer`.
/// If `buffer->data` is non-null, it must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn fp_buffer_free(buffer: *mut FpBuffer) {
    crate::ffi_boundary((), || {
        if buffer.is_null() {
            return;
        }

        let buffer_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *buffer }
        };
        release(buffer_ref);
    });
}
