//!One-shot functions
//!
//!Thin compositions over [Compressor] and [Decompressor] for data that is already in memory.

use crate::compressor::Compressor;
use crate::decompressor::Decompressor;
use crate::dict::Dictionary;
use crate::encoder::Directive;
use crate::error::{Error, Result};
use crate::param::{CompressParams, DecompressParams};

#[inline]
///Compresses `data` into single frame.
///
///Frame records content size, unless disabled via `params`.
pub fn compress(data: &[u8], params: &CompressParams, dict: Option<&Dictionary>) -> Result<Vec<u8>> {
    let mut compressor = Compressor::with_dict(params, dict)?;
    compressor.compress(data, Directive::End)
}

#[inline]
///Compresses `data` into single frame at compression `level`.
pub fn compress_level(data: &[u8], level: i64) -> Result<Vec<u8>> {
    compress(data, &CompressParams::with_level(level)?, None)
}

///Decompresses all frames in `data`, concatenating their content.
///
///Every frame is decoded by fresh session.
///Failure of the first frame is returned as error, while failure of any subsequent frame
///ends decompression, returning content of frames decoded so far.
///This tolerates trailing bytes that do not form a frame.
pub fn decompress(data: &[u8], dict: Option<&Dictionary>, params: &DecompressParams) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::CorruptInput("input is empty"));
    }

    let mut output = Vec::new();
    let mut input = data;
    let mut frames = 0usize;

    while !input.is_empty() {
        let mut decompressor = Decompressor::single_frame(dict, params)?;
        let result = decompressor.decompress(input, None).and_then(|content| {
            let unused = decompressor.unused_len();
            if !decompressor.at_frame_edge() {
                Err(Error::CorruptInput("compressed data ended before the end-of-frame marker"))
            } else if unused == input.len() {
                Err(Error::CorruptInput("no frame found"))
            } else {
                Ok((content, unused))
            }
        });

        match result {
            Ok((content, unused)) => {
                output.extend_from_slice(&content);
                input = &input[input.len() - unused..];
                frames += 1;
            },
            Err(error) if frames == 0 => return Err(error),
            Err(error) => {
                log::warn!("decompress: ignoring {} trailing bytes after {frames} frame(s): {error}", input.len());
                break;
            }
        }
    }

    Ok(output)
}
