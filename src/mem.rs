//!Allocator hooks routing engine allocations through Rust's global allocator
use zstd_sys as sys;

use core::ffi::c_void;
use core::{mem, ptr};
use std::alloc::Layout;

//Size header is stored in front of every block, so offset must keep user pointer aligned
const MIN_ALIGN: usize = 16;
const LAYOUT_OFFSET: usize = MIN_ALIGN;

const _: () = {
    assert!(LAYOUT_OFFSET >= mem::size_of::<usize>());
};

#[cold]
#[inline(never)]
fn unlikely_null() -> *mut c_void {
    ptr::null_mut()
}

///`malloc` impl with Rust allocator, in form of `ZSTD_allocFunction`
pub(crate) unsafe extern "C" fn rust_malloc(_: *mut c_void, size: usize) -> *mut c_void {
    let total = match size.checked_add(LAYOUT_OFFSET) {
        Some(total) => total,
        None => return unlikely_null(),
    };

    if let Ok(layout) = Layout::from_size_align(total, MIN_ALIGN) {
        let mem = std::alloc::alloc(layout);
        if !mem.is_null() {
            ptr::write(mem as *mut usize, total);
            return mem.add(LAYOUT_OFFSET) as _;
        }
    }

    unlikely_null()
}

///`free` impl with Rust allocator, in form of `ZSTD_freeFunction`
pub(crate) unsafe extern "C" fn rust_free(_: *mut c_void, mem: *mut c_void) {
    if !mem.is_null() {
        let mem = (mem as *mut u8).sub(LAYOUT_OFFSET);
        let total = ptr::read(mem as *const usize);
        let layout = Layout::from_size_align_unchecked(total, MIN_ALIGN);
        std::alloc::dealloc(mem, layout);
    }
}

#[inline(always)]
///Allocator description to pass into `_advanced` constructors
pub(crate) fn custom_mem() -> sys::ZSTD_customMem {
    sys::ZSTD_customMem {
        customAlloc: Some(rust_malloc),
        customFree: Some(rust_free),
        opaque: ptr::null_mut(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_allocate_aligned_and_free() {
        for size in [1usize, 7, 64, 4096, 1 << 20] {
            unsafe {
                let mem = rust_malloc(ptr::null_mut(), size);
                assert!(!mem.is_null());
                assert_eq!(mem as usize % MIN_ALIGN, 0);
                ptr::write_bytes(mem as *mut u8, 0xAA, size);
                rust_free(ptr::null_mut(), mem);
            }
        }
    }

    #[test]
    fn should_ignore_null_free() {
        unsafe {
            rust_free(ptr::null_mut(), ptr::null_mut());
        }
    }

    #[test]
    fn should_refuse_overflowing_size() {
        let mem = unsafe {
            rust_malloc(ptr::null_mut(), usize::MAX)
        };
        assert!(mem.is_null());
    }
}
