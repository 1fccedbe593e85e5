//! Error type shared by all sessions

use core::fmt;

//Values of `ZSTD_ErrorCode`, engine encodes them as negated `size_t`
const ERROR_MEMORY_ALLOCATION: usize = 64;
const ERROR_WORKSPACE_TOO_SMALL: usize = 66;

///Raw engine error code, as returned by `libzstd` functions.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ErrorCode(pub(crate) usize);

impl ErrorCode {
    #[inline(always)]
    ///Returns raw code
    pub const fn as_raw(&self) -> usize {
        self.0
    }

    #[inline]
    ///Returns whether engine failed due to lack of resources, rather than because of input.
    pub const fn is_resource_failure(&self) -> bool {
        matches!(self.0.wrapping_neg(), ERROR_MEMORY_ALLOCATION | ERROR_WORKSPACE_TOO_SMALL)
    }

    #[inline]
    ///Returns engine's descriptive text for the code.
    pub fn name(&self) -> &'static str {
        crate::utils::error_name(self.0)
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCode({}: {})", self.0, self.name())
    }
}

impl fmt::Display for ErrorCode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Direction of parameter
pub enum ParamKind {
    ///Compression parameter
    Compress,
    ///Decompression parameter
    Decompress,
}

impl fmt::Display for ParamKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => f.write_str("compression"),
            Self::Decompress => f.write_str("decompression"),
        }
    }
}

///Errors reported by parameters, dictionaries and sessions.
///
///Construction errors (`InvalidParameterId`, `OutOfRange`, `ValueTooLarge`) can be fixed by
///caller by adjusting arguments.
///`CorruptInput` and `EngineFailure` poison the session that reported them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    ///Parameter id is not known.
    #[error("{kind} parameter id {id} is invalid")]
    InvalidParameterId {
        ///Direction
        kind: ParamKind,
        ///Raw id as supplied.
        id: i32,
    },
    ///Value is outside of bounds reported by engine.
    #[error("{kind} parameter \"{name}\" should be {lower} <= value <= {upper}, provided value is {value}")]
    OutOfRange {
        ///Direction
        kind: ParamKind,
        ///Parameter name
        name: &'static str,
        ///Supplied value
        value: i32,
        ///Inclusive lower bound
        lower: i32,
        ///Inclusive upper bound
        upper: i32,
    },
    ///Value doesn't fit 32-bit signed integer expected by engine.
    #[error("value {value} of {kind} parameter id {id} is not a 32-bit signed integer")]
    ValueTooLarge {
        ///Direction
        kind: ParamKind,
        ///Raw id as supplied.
        id: i32,
        ///Supplied value
        value: i64,
    },
    ///Engine could not produce dictionary out of supplied samples.
    #[error("dictionary training failed: {0}")]
    TrainingFailed(&'static str),
    ///Compressed data is malformed.
    #[error("corrupt input: {0}")]
    CorruptInput(&'static str),
    ///Engine failed in a way that leaves session unusable.
    #[error("engine failure: {0}")]
    EngineFailure(&'static str),
}

///Result alias
pub type Result<T> = core::result::Result<T, Error>;

impl From<std::collections::TryReserveError> for Error {
    #[cold]
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::EngineFailure("unable to allocate output buffer")
    }
}
