//!Frame header inspection

use zstd_sys as sys;

use core::mem;

use crate::error::{Error, Result};
use crate::utils::check;

const CONTENT_SIZE_UNKNOWN: u64 = u64::MAX;
const CONTENT_SIZE_ERROR: u64 = u64::MAX - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Metadata stored in frame header
pub struct FrameInfo {
    ///Size of decompressed content, if recorded
    pub content_size: Option<u64>,
    ///Id of dictionary required to decompress frame, if recorded
    pub dict_id: Option<u32>,
    ///Whether frame ends with content checksum
    pub has_checksum: bool,
    ///Window size required by decoder
    pub window_size: u64,
    ///Size of frame header itself
    pub header_size: u32,
}

impl FrameInfo {
    ///Parses header at the start of `data`, without decompressing anything.
    ///
    ///Fails with [Error::CorruptInput] if header is malformed or `data` is too short to hold it.
    pub fn inspect(data: &[u8]) -> Result<Self> {
        let mut header = mem::MaybeUninit::<sys::ZSTD_FrameHeader>::zeroed();
        let result = unsafe {
            sys::ZSTD_getFrameHeader(header.as_mut_ptr(), data.as_ptr() as _, data.len())
        };
        match check(result) {
            Ok(0) => (),
            //Positive value is size of header, which is not yet available
            Ok(_) => return Err(Error::CorruptInput("frame header is incomplete")),
            Err(code) => return Err(Error::CorruptInput(code.name())),
        }

        let header = unsafe {
            header.assume_init()
        };
        //Header of skippable frame holds length of its payload, which is never decompressed content
        let content_size = unsafe {
            sys::ZSTD_getFrameContentSize(data.as_ptr() as _, data.len())
        };
        let content_size = match content_size as u64 {
            CONTENT_SIZE_UNKNOWN | CONTENT_SIZE_ERROR => None,
            size => Some(size),
        };

        Ok(Self {
            content_size,
            dict_id: match header.dictID {
                0 => None,
                id => Some(id as u32),
            },
            has_checksum: header.checksumFlag != 0,
            window_size: header.windowSize as u64,
            header_size: header.headerSize as u32,
        })
    }
}

///Returns size of first complete frame in `data`, including its header and checksum.
///
///Fails with [Error::CorruptInput] if `data` does not start with complete frame.
pub fn frame_size(data: &[u8]) -> Result<usize> {
    let result = unsafe {
        sys::ZSTD_findFrameCompressedSize(data.as_ptr() as _, data.len())
    };
    check(result).map_err(|code| Error::CorruptInput(code.name()))
}
