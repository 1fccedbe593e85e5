//! `zstd` compression context glue

use zstd_sys as sys;

use core::ptr;

use super::{Directive, Encode, EncodeStatus, Encoder};
use crate::error::{Error, ErrorCode, Result};
use crate::param::CompressParams;
use crate::utils::check;

impl Directive {
    #[inline(always)]
    const fn into_zstd(self) -> sys::ZSTD_EndDirective {
        match self {
            Self::Continue => sys::ZSTD_EndDirective::ZSTD_e_continue,
            Self::Flush => sys::ZSTD_EndDirective::ZSTD_e_flush,
            Self::End => sys::ZSTD_EndDirective::ZSTD_e_end,
        }
    }
}

impl Encoder {
    ///Creates compression context with `params` applied in order.
    #[inline]
    pub(crate) fn new(params: &CompressParams) -> Result<Self> {
        Self::with_mem(params, crate::mem::custom_mem())
    }

    ///Creates context using `mem` for all its allocations.
    pub(crate) fn with_mem(params: &CompressParams, mem: sys::ZSTD_customMem) -> Result<Self> {
        let ctx = unsafe {
            sys::ZSTD_createCCtx_advanced(mem)
        };
        let instance = match ptr::NonNull::new(ctx) {
            Some(instance) => instance,
            None => return Err(Error::EngineFailure("unable to create compression context")),
        };
        //From now on context is released on every exit path
        let encoder = Self {
            instance,
        };

        for (param, value) in params.iter() {
            let result = unsafe {
                sys::ZSTD_CCtx_setParameter(encoder.instance.as_ptr(), param.into_sys(), value as _)
            };
            if let Err(code) = check(result) {
                return Err(Error::EngineFailure(code.name()));
            }
        }

        Ok(encoder)
    }

    ///References prepared dictionary for all subsequent frames.
    ///
    ///## Safety
    ///
    ///`cdict` must outlive this encoder.
    pub(crate) unsafe fn ref_cdict(&mut self, cdict: ptr::NonNull<sys::ZSTD_CDict>) -> core::result::Result<(), ErrorCode> {
        let result = sys::ZSTD_CCtx_refCDict(self.instance.as_ptr(), cdict.as_ptr());
        check(result).map(|_| ())
    }
}

pub(super) unsafe fn encode_fn(state: ptr::NonNull<sys::ZSTD_CCtx>, input: *const u8, input_remain: usize, output: *mut u8, output_remain: usize, op: Directive) -> Encode {
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
        sys::ZSTD_compressStream2(state.as_ptr(), &mut output, &mut input, op.into_zstd())
    };

    Encode {
        input_remain: input.size - input.pos,
        output_remain: output.size - output.pos,
        status: match check(result) {
            //0 always mean there is nothing else to flush.
            //For `Flush` and `End` it means directive is completed
            Ok(0) => Ok(EncodeStatus::Finished),
            //Value is amount of data still sitting in engine's buffers
            Ok(_) if output.pos == output.size => Ok(EncodeStatus::NeedOutput),
            Ok(_) => Ok(EncodeStatus::Continue),
            Err(code) => Err(code),
        },
    }
}

#[inline]
pub(super) fn drop_fn(state: ptr::NonNull<sys::ZSTD_CCtx>) {
    let result = unsafe {
        sys::ZSTD_freeCCtx(state.as_ptr())
    };
    debug_assert_eq!(result, 0);
}
