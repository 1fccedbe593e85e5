//! Encoder
//!
//!Owning handle over engine's compression context, exposing single compression step.

use zstd_sys as sys;

use core::{mem, ptr};

use crate::error::ErrorCode;

mod zstd;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
///Compression directive, telling how far frame lifecycle should advance.
pub enum Directive {
    ///Just compress as usual.
    ///
    ///Engine may buffer data, no output is guaranteed.
    Continue,
    ///Flush all data given so far, keeping frame open.
    ///
    ///Receiver can decode everything up to this point immediately.
    ///Potentially may incur overhead
    Flush,
    ///Finish frame, writing its epilogue (and checksum if enabled).
    End,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
///Encode status
pub(crate) enum EncodeStatus {
    ///Made progress, carry on.
    Continue,
    ///Output is exhausted while engine still holds data.
    NeedOutput,
    ///Directive is fully honored, nothing left to flush.
    Finished,
}

#[derive(Debug)]
///Encode output
pub(crate) struct Encode {
    ///Number of bytes left unprocessed in `input`
    pub input_remain: usize,
    ///Number of bytes left unprocessed in `output`
    pub output_remain: usize,
    ///Status after `encode`
    pub status: Result<EncodeStatus, ErrorCode>,
}

///Encoder
///
///Exclusively owns compression context, which is released on drop.
pub(crate) struct Encoder {
    instance: ptr::NonNull<sys::ZSTD_CCtx>,
}

//Context has no thread affinity, it only must not be used concurrently, which `&mut self` prevents
unsafe impl Send for Encoder {}

impl Encoder {
    #[inline(always)]
    ///Raw encoding function, with no checks.
    ///
    ///Arguments
    ///
    ///- `input` - Pointer to start of input to process. MUST NOT be null.
    ///- `input_len` - Size of data to process in `input`
    ///- `ouput` - Pointer to start of buffer where to write result. MUST NOT be null
    ///- `output_len` - Size of buffer pointed by `output`
    ///- `op` - Directive to apply.
    pub unsafe fn raw_encode(&mut self, input: *const u8, input_len: usize, output: *mut u8, output_len: usize, op: Directive) -> Encode {
        zstd::encode_fn(self.instance, input, input_len, output, output_len, op)
    }

    #[inline(always)]
    ///Encodes `input` into uninit `output`.
    ///
    ///`Encode` will contain number of bytes written into `output`. This number always indicates number of bytes written hence which can be assumed initialized.
    pub fn encode_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>], op: Directive) -> Encode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_encode(input.as_ptr(), input_len, output.as_mut_ptr() as _, output_len, op)
        }
    }

    #[inline(always)]
    ///Encodes `input` into spare space in `output`.
    ///
    ///Function require user to alloc spare capacity himself.
    ///
    ///`Encode::output_remain` will be relative to spare capacity length.
    pub fn encode_vec(&mut self, input: &[u8], output: &mut Vec<u8>, op: Directive) -> Encode {
        let spare_capacity = output.spare_capacity_mut();
        let spare_capacity_len = spare_capacity.len();
        let result = self.encode_uninit(input, spare_capacity, op);

        let new_len = output.len() + spare_capacity_len - result.output_remain;
        unsafe {
            output.set_len(new_len);
        }
        result
    }
}

impl Drop for Encoder {
    #[inline]
    fn drop(&mut self) {
        zstd::drop_fn(self.instance);
    }
}
