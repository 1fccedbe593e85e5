//!Incremental `zstd` compression and decompression
//!
//!Built on top of `libzstd` via `zstd-sys`, which is statically linked.
//!All engine allocations go through Rust's global allocator.
//!
//!## Components
//!
//!- [params] - validated engine parameters.
//!- [Compressor] - compression session, advancing frame according to [Directive].
//!- [Decompressor] - decompression session, handling concatenated frames and output limits.
//!- [Dictionary] - shared dictionary, loaded from bytes or trained via [DictTrainer].
//!- [FrameInfo] - frame header inspection.
//!- [oneshot] - single call compression and decompression.
//!
//!## Logging
//!
//!Crate emits records via `log`: session and dictionary creation at `debug`,
//!per call progress at `trace`, poisoned sessions and ignored trailing data at `warn`.
//!
//!## Usage
//!
//!```rust
//!use zstream::{oneshot, params::{CParameter, CompressParams, DecompressParams}};
//!
//!let params = CompressParams::new().with(CParameter::CompressionLevel, 5).expect("valid level")
//!                                  .with(CParameter::ChecksumFlag, 1).expect("valid flag");
//!let compressed = oneshot::compress(b"abc", &params, None).expect("compress");
//!let info = zstream::FrameInfo::inspect(&compressed).expect("inspect");
//!assert_eq!(info.content_size, Some(3));
//!assert!(info.has_checksum);
//!let output = oneshot::decompress(&compressed, None, &DecompressParams::new()).expect("decompress");
//!assert_eq!(output, b"abc");
//!```

#![warn(missing_docs)]

mod utils;
pub use utils::{version, version_number};
mod mem;
mod error;
pub use error::{Error, ErrorCode, ParamKind, Result};
mod param;
///Engine parameters
pub mod params {
    pub use crate::param::*;
}
mod encoder;
pub use encoder::Directive;
mod decoder;
mod compressor;
pub use compressor::{Compressor, State};
mod decompressor;
pub use decompressor::Decompressor;
mod dict;
pub use dict::Dictionary;
mod trainer;
pub use trainer::{DictTrainer, DEFAULT_DICT_SIZE};
mod frame;
pub use frame::{frame_size, FrameInfo};
pub mod oneshot;
