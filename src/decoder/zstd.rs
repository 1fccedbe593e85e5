//! `zstd` decompression context glue

use zstd_sys as sys;

use core::ptr;

use super::{Decode, DecodeStatus, Decoder};
use crate::error::{Error, ErrorCode, Result};
use crate::param::DecompressParams;
use crate::utils::check;

impl Decoder {
    ///Creates decompression context with `params` applied in order.
    #[inline]
    pub(crate) fn new(params: &DecompressParams) -> Result<Self> {
        Self::with_mem(params, crate::mem::custom_mem())
    }

    ///Creates context using `mem` for all its allocations.
    pub(crate) fn with_mem(params: &DecompressParams, mem: sys::ZSTD_customMem) -> Result<Self> {
        let ctx = unsafe {
            sys::ZSTD_createDCtx_advanced(mem)
        };
        let instance = match ptr::NonNull::new(ctx) {
            Some(instance) => instance,
            None => return Err(Error::EngineFailure("unable to create decompression context")),
        };
        let decoder = Self {
            instance,
        };

        for (param, value) in params.iter() {
            let result = unsafe {
                sys::ZSTD_DCtx_setParameter(decoder.instance.as_ptr(), param.into_sys(), value as _)
            };
            if let Err(code) = check(result) {
                return Err(Error::EngineFailure(code.name()));
            }
        }

        Ok(decoder)
    }

    ///References prepared dictionary for all subsequent frames.
    ///
    ///## Safety
    ///
    ///`ddict` must outlive this decoder.
    pub(crate) unsafe fn ref_ddict(&mut self, ddict: ptr::NonNull<sys::ZSTD_DDict>) -> core::result::Result<(), ErrorCode> {
        let result = sys::ZSTD_DCtx_refDDict(self.instance.as_ptr(), ddict.as_ptr());
        check(result).map(|_| ())
    }
}

#[inline]
pub(super) unsafe fn decode_fn(state: ptr::NonNull<sys::ZSTD_DCtx>, input: *const u8, input_remain: usize, output: *mut u8, output_remain: usize) -> Decode {
    let mut input = sys::ZSTD_inBuffer_s {
        src: input as _,
        size: input_remain,
        pos: 0,
    };
    let mut output = sys::ZSTD_outBuffer_s {
        dst: output as _,
        size: output_remain,
        pos: 0,
    };
    let result = unsafe {
        sys::ZSTD_decompressStream(state.as_ptr(), &mut output, &mut input)
    };

    Decode {
        input_remain: input.size - input.pos,
        output_remain: output.size - output.pos,
        status: match check(result) {
            Ok(0) => Ok(DecodeStatus::Finished),
            //Non-zero is hint of next input size, so frame is still in flight.
            //ZSTD_decompressStream() always flushes to maximum, so full output means there is more
            //to flush, otherwise it waits for input.
            Ok(_) if output.pos == output.size => Ok(DecodeStatus::NeedOutput),
            Ok(_) => Ok(DecodeStatus::NeedInput),
            Err(code) => Err(code),
        },
    }
}

#[inline]
pub(super) fn drop_fn(state: ptr::NonNull<sys::ZSTD_DCtx>) {
    let result = unsafe {
        sys::ZSTD_freeDCtx(state.as_ptr())
    };
    debug_assert_eq!(result, 0);
}
