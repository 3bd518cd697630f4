#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpResult {
    Ok = 0,
    InvalidArgument = 1,
    InvalidDescriptor = 2,
    EncodeFailed = 3,
    DecodeFailed = 4,
    Internal = 99,
}

#[allow(dead_code)]
pub const FP_OK: FpResult = FpResult::Ok;
#[allow(dead_code)]
pub const FP_ERR_INVALID_ARGUMENT: FpResult = FpResult::InvalidArgument;
#[allow(dead_code)]
pub const FP_ERR_INVALID_DESCRIPTOR: FpResult = FpResult::InvalidDescriptor;
#[allow(dead_code)]
pub const FP_ERR_ENCODE: FpResult = FpResult::EncodeFailed;
#[allow(dead_code)]
pub const FP_ERR_DECODE: FpResult = FpResult::DecodeFailed;
#[allow(dead_code)]
pub const FP_ERR_INTERNAL: FpResult = FpResult::Internal;

#[allow(dead_code)]
pub const FP_KIND_USER: i32 = 0;
#[allow(dead_code)]
pub const FP_KIND_DEFAULT: i32 = 1;

/// Byte buffer owned by this library, released with `fp_buffer_free`.
#[repr(C)]
#[derive(Debug)]
pub struct FpBuffer {
    pub data: *mut u8,
    pub len: usize,
}

impl Default for FpBuffer {
    fn default() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
        }
    }
}
