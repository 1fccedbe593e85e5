//! Typed engine parameters
//!
//!Parameters are closed enumerations mirroring `ZSTD_cParameter` and `ZSTD_dParameter`.
//!Values are validated against bounds reported by the engine before any session is created,
//!so that invalid parameter sets never reach compression context.

use zstd_sys as sys;

use core::fmt;

use crate::error::{Error, ParamKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
///Inclusive bounds of parameter value
pub struct Bounds {
    ///Lowest accepted value
    pub lower: i32,
    ///Highest accepted value
    pub upper: i32,
}

impl Bounds {
    #[inline(always)]
    ///Returns whether `value` is within bounds.
    pub const fn contains(&self, value: i32) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for Bounds {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

///Engine parameter identifier.
///
///Implemented by [CParameter] and [DParameter] only.
pub trait Parameter: fmt::Debug + Copy + Eq + 'static {
    ///Direction of parameter.
    const KIND: ParamKind;
    ///All known parameters.
    const ALL: &'static [Self];

    ///Looks up parameter by raw engine id.
    fn from_raw(raw: i32) -> Option<Self>;
    ///Returns raw engine id.
    fn as_raw(self) -> i32;
    ///Returns parameter name, as used in engine documentation.
    fn name(self) -> &'static str;
    ///Queries engine for inclusive bounds of parameter.
    fn bounds(self) -> Result<Bounds>;
}

macro_rules! declare_parameters {
    (
        $(#[$meta:meta])*
        $ty:ident: $sys:ident, $kind:expr, $bounds_fn:ident {
            $(
                $(#[$doc:meta])*
                $variant:ident => $raw:ident as $text:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $ty {
            $(
                $(#[$doc])*
                $variant = sys::$sys::$raw as i32,
            )+
        }

        impl $ty {
            #[inline(always)]
            pub(crate) const fn into_sys(self) -> sys::$sys {
                match self {
                    $(
                        Self::$variant => sys::$sys::$raw,
                    )+
                }
            }
        }

        impl Parameter for $ty {
            const KIND: ParamKind = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[inline]
            fn from_raw(raw: i32) -> Option<Self> {
                Self::ALL.iter().copied().find(|param| *param as i32 == raw)
            }

            #[inline(always)]
            fn as_raw(self) -> i32 {
                self as i32
            }

            #[inline]
            fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $text,
                    )+
                }
            }

            fn bounds(self) -> Result<Bounds> {
                let bounds = unsafe {
                    sys::$bounds_fn(self.into_sys())
                };
                match crate::utils::check(bounds.error) {
                    Ok(_) => Ok(Bounds {
                        lower: bounds.lowerBound as i32,
                        upper: bounds.upperBound as i32,
                    }),
                    Err(code) => Err(Error::EngineFailure(code.name())),
                }
            }
        }
    };
}

declare_parameters!(
    ///Compression parameter.
    ///
    ///For details refer to `http://facebook.github.io/zstd/zstd_manual.html#Chapter5`
    CParameter: ZSTD_cParameter, ParamKind::Compress, ZSTD_cParam_getBounds {
        ///Compression level, negative values are fast levels. 0 selects engine's default.
        CompressionLevel => ZSTD_c_compressionLevel as "compressionLevel",
        ///Maximum back-reference distance, as power of 2.
        WindowLog => ZSTD_c_windowLog as "windowLog",
        ///Size of initial probe table, as power of 2.
        HashLog => ZSTD_c_hashLog as "hashLog",
        ///Size of multi-probe search table, as power of 2.
        ChainLog => ZSTD_c_chainLog as "chainLog",
        ///Number of search attempts, as power of 2.
        SearchLog => ZSTD_c_searchLog as "searchLog",
        ///Minimum size of searched matches.
        MinMatch => ZSTD_c_minMatch as "minMatch",
        ///Strategy dependent target length.
        TargetLength => ZSTD_c_targetLength as "targetLength",
        ///Match finder, see [Strategy].
        Strategy => ZSTD_c_strategy as "strategy",
        ///Long distance matching mode.
        EnableLongDistanceMatching => ZSTD_c_enableLongDistanceMatching as "enableLongDistanceMatching",
        ///Size of long distance matching table, as power of 2.
        LdmHashLog => ZSTD_c_ldmHashLog as "ldmHashLog",
        ///Minimum match size for long distance matcher.
        LdmMinMatch => ZSTD_c_ldmMinMatch as "ldmMinMatch",
        ///Long distance matching bucket size, as power of 2.
        LdmBucketSizeLog => ZSTD_c_ldmBucketSizeLog as "ldmBucketSizeLog",
        ///Frequency of inserting into long distance matching table, as power of 2.
        LdmHashRateLog => ZSTD_c_ldmHashRateLog as "ldmHashRateLog",
        ///Write content size into frame header whenever it is known.
        ContentSizeFlag => ZSTD_c_contentSizeFlag as "contentSizeFlag",
        ///Write 32-bit checksum of content at the end of frame.
        ChecksumFlag => ZSTD_c_checksumFlag as "checksumFlag",
        ///Write dictionary id into frame header.
        DictIdFlag => ZSTD_c_dictIDFlag as "dictIDFlag",
        ///Number of worker threads, only non-zero when engine is built with multithreading.
        NbWorkers => ZSTD_c_nbWorkers as "nbWorkers",
        ///Size of job given to each worker.
        JobSize => ZSTD_c_jobSize as "jobSize",
        ///Overlap size between jobs, as fraction of window.
        OverlapLog => ZSTD_c_overlapLog as "overlapLog",
    }
);

declare_parameters!(
    ///Decompression parameter.
    ///
    ///For details refer to `http://facebook.github.io/zstd/zstd_manual.html#Chapter6`
    DParameter: ZSTD_dParameter, ParamKind::Decompress, ZSTD_dParam_getBounds {
        ///Cap on window size, refusing to decompress anything above it.
        WindowLogMax => ZSTD_d_windowLogMax as "windowLogMax",
    }
);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i32)]
///Possible enumeration of strategies from fastest to slowest
///
///Used as value of [CParameter::Strategy]
pub enum Strategy {
    ///ZSTD_fast
    Fast = 1,
    ///ZSTD_dfast
    DFast = 2,
    ///ZSTD_greedy
    Greedy = 3,
    ///ZSTD_lazy
    Lazy = 4,
    ///ZSTD_lazy2
    Lazy2 = 5,
    ///ZSTD_btlazy2
    BtLazy2 = 6,
    ///ZSTD_btopt
    BtOpt = 7,
    ///ZSTD_btultra
    BtUltra = 8,
    ///ZSTD_btultra2
    BtUltra2 = 9,
}

impl From<Strategy> for i64 {
    #[inline(always)]
    fn from(strategy: Strategy) -> Self {
        strategy as i32 as i64
    }
}

///Engine's default compression level
pub const DEFAULT_LEVEL: i32 = sys::ZSTD_CLEVEL_DEFAULT as i32;

#[inline]
///Returns range of compression levels supported by engine.
pub fn level_bounds() -> Bounds {
    unsafe {
        Bounds {
            lower: sys::ZSTD_minCLevel() as i32,
            upper: sys::ZSTD_maxCLevel() as i32,
        }
    }
}

#[inline]
///Queries engine for inclusive bounds of `param`
pub fn bounds_for<P: Parameter>(param: P) -> Result<Bounds> {
    param.bounds()
}

#[derive(Clone, PartialEq, Eq)]
///Validated set of parameters.
///
///Every stored value has been checked against engine bounds.
///Values are applied to session in insertion order.
pub struct ParameterTable<P: Parameter> {
    entries: Vec<(P, i32)>,
}

///Compression parameters
pub type CompressParams = ParameterTable<CParameter>;
///Decompression parameters
pub type DecompressParams = ParameterTable<DParameter>;

impl<P: Parameter> ParameterTable<P> {
    #[inline(always)]
    ///Creates empty table, meaning engine's defaults.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    ///Creates table out of raw `(id, value)` pairs, validating each in order.
    ///
    ///First invalid pair aborts construction.
    pub fn from_pairs<I: IntoIterator<Item = (i32, i64)>>(pairs: I) -> Result<Self> {
        let mut table = Self::new();
        for (id, value) in pairs {
            table.set_raw(id, value)?;
        }
        Ok(table)
    }

    ///Sets parameter identified by raw engine `id`.
    pub fn set_raw(&mut self, id: i32, value: i64) -> Result<&mut Self> {
        let value = match i32::try_from(value) {
            Ok(value) => value,
            Err(_) => return Err(Error::ValueTooLarge {
                kind: P::KIND,
                id,
                value,
            }),
        };
        match P::from_raw(id) {
            Some(param) => self.insert(param, value),
            None => Err(Error::InvalidParameterId {
                kind: P::KIND,
                id,
            }),
        }
    }

    #[inline]
    ///Sets `param` to `value`, replacing previous value if any.
    pub fn set(&mut self, param: P, value: i64) -> Result<&mut Self> {
        match i32::try_from(value) {
            Ok(value) => self.insert(param, value),
            Err(_) => Err(Error::ValueTooLarge {
                kind: P::KIND,
                id: param.as_raw(),
                value,
            }),
        }
    }

    #[inline]
    ///Builder variant of [set](Self::set)
    pub fn with(mut self, param: P, value: i64) -> Result<Self> {
        self.set(param, value)?;
        Ok(self)
    }

    fn insert(&mut self, param: P, value: i32) -> Result<&mut Self> {
        let bounds = param.bounds()?;
        if !bounds.contains(value) {
            return Err(Error::OutOfRange {
                kind: P::KIND,
                name: param.name(),
                value,
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }

        match self.entries.iter_mut().find(|(existing, _)| *existing == param) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((param, value)),
        }
        Ok(self)
    }

    #[inline]
    ///Returns value of `param` if it was set.
    pub fn get(&self, param: P) -> Option<i32> {
        self.entries.iter().find(|(existing, _)| *existing == param).map(|(_, value)| *value)
    }

    #[inline(always)]
    ///Iterates over parameters in order they were set.
    pub fn iter(&self) -> impl Iterator<Item = (P, i32)> + '_ {
        self.entries.iter().copied()
    }

    #[inline(always)]
    ///Returns number of set parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    ///Returns whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParameterTable<CParameter> {
    #[inline]
    ///Creates table with only compression level set.
    pub fn with_level(level: i64) -> Result<Self> {
        Self::new().with(CParameter::CompressionLevel, level)
    }

    #[inline(always)]
    ///Compression level used to prepare dictionary, 0 if not set.
    pub(crate) fn level(&self) -> i32 {
        self.get(CParameter::CompressionLevel).unwrap_or(0)
    }
}

impl<P: Parameter> Default for ParameterTable<P> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Parameter> fmt::Debug for ParameterTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(param, value)| (param.name(), value))).finish()
    }
}
