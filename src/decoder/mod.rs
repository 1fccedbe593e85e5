//! Decoder
//!
//!Owning handle over engine's decompression context, exposing single decompression step.
use zstd_sys as sys;

use core::{mem, ptr};

use crate::error::ErrorCode;

mod zstd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Result of decoding
pub(crate) enum DecodeStatus {
    ///Cannot finish frame due to lack of input data
    NeedInput,
    ///Need to flush data somewhere before continuing
    NeedOutput,
    ///Frame is fully decoded and flushed.
    ///
    ///Engine stops at frame boundary, any remaining input belongs to the next frame.
    Finished,
}

///Decode output
pub(crate) struct Decode {
    ///Number of bytes left unprocessed in `input`
    pub input_remain: usize,
    ///Number of bytes left unprocessed in `output`
    pub output_remain: usize,
    ///Result of decoding
    pub status: Result<DecodeStatus, ErrorCode>,
}

///Decoder
///
///Exclusively owns decompression context, which is released on drop.
pub(crate) struct Decoder {
    instance: ptr::NonNull<sys::ZSTD_DCtx>,
}

//Context has no thread affinity, it only must not be used concurrently, which `&mut self` prevents
unsafe impl Send for Decoder {}

impl Decoder {
    #[inline(always)]
    ///Raw decoding function, with no checks.
    ///
    ///Arguments
    ///
    ///- `input` - Pointer to start of input to process. MUST NOT be null.
    ///- `input_len` - Size of data to process in `input`
    ///- `ouput` - Pointer to start of buffer where to write result. MUST NOT be null
    ///- `output_len` - Size of buffer pointed by `output`
    pub unsafe fn raw_decode(&mut self, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Decode {
        zstd::decode_fn(self.instance, input, input_len, output, output_len)
    }

    #[inline(always)]
    ///Decodes `input` into uninit `output`.
    ///
    ///`Decode` will contain number of bytes written into `output`. This number always indicates
    ///number of bytes written hence which can be assumed initialized.
    pub fn decode_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>]) -> Decode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_decode(input.as_ptr(), input_len, output.as_mut_ptr() as _, output_len)
        }
    }

    #[inline]
    ///Decodes `input` into spare space in `output`, writing no more than `limit` bytes.
    ///
    ///`Decode::output_remain` will be relative to used part of spare capacity.
    pub fn decode_vec(&mut self, input: &[u8], output: &mut Vec<u8>, limit: usize) -> Decode {
        let spare_capacity = output.spare_capacity_mut();
        let spare_capacity_len = spare_capacity.len().min(limit);
        let result = self.decode_uninit(input, &mut spare_capacity[..spare_capacity_len]);

        let new_len = output.len() + spare_capacity_len - result.output_remain;
        unsafe {
            output.set_len(new_len);
        }
        result
    }
}

impl Drop for Decoder {
    #[inline]
    fn drop(&mut self) {
        zstd::drop_fn(self.instance);
    }
}
