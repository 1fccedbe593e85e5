use zstd_sys as sys;

use core::ffi::{c_char, CStr};

use crate::error::ErrorCode;

#[inline]
pub(crate) fn convert_c_str(text: *const c_char) -> Option<&'static str> {
    if text.is_null() {
        return None;
    }

    //Engine only hands out pointers to static strings
    let text = unsafe {
        CStr::from_ptr(text)
    };
    text.to_str().ok()
}

#[inline]
pub(crate) fn error_name(code: usize) -> &'static str {
    let name = unsafe {
        sys::ZSTD_getErrorName(code)
    };
    convert_c_str(name).unwrap_or("Unknown zstd error")
}

#[inline(always)]
pub(crate) fn is_error(code: usize) -> bool {
    unsafe {
        sys::ZSTD_isError(code) != 0
    }
}

#[inline(always)]
///Splits engine's return value into result or error code.
pub(crate) fn check(code: usize) -> Result<usize, ErrorCode> {
    if is_error(code) {
        Err(ErrorCode(code))
    } else {
        Ok(code)
    }
}

#[inline]
///Returns version string of the linked `libzstd`
pub fn version() -> &'static str {
    let version = unsafe {
        sys::ZSTD_versionString()
    };
    convert_c_str(version).unwrap_or("unknown")
}

#[inline]
///Returns version of the linked `libzstd` as `MAJOR * 10000 + MINOR * 100 + RELEASE`
pub fn version_number() -> u32 {
    unsafe {
        sys::ZSTD_versionNumber() as u32
    }
}
