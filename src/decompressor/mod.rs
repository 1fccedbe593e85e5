//!Incremental decompression session

use crate::decoder::{DecodeStatus, Decoder};
use crate::dict::Dictionary;
use crate::error::{Error, Result};
use crate::param::DecompressParams;

use core::{cmp, mem};

//Output chunk reserved per engine call when there is no better estimate
const OUTPUT_CHUNK: usize = 32 * 1024;

///Decompression session
///
///Consumes one or more concatenated frames across repeated calls.
///Parameters and dictionary persist across frames.
///
///Session tracks two flags:
///
///- [needs_input](Self::needs_input) - all given input is consumed and engine has no pending output.
///- [at_frame_edge](Self::at_frame_edge) - no partially consumed frame is in flight.
///
///When `decompress` is capped by `max_output`, `needs_input` stays `false` and caller must keep calling
///with empty input until it becomes `true`, before supplying more data.
pub struct Decompressor {
    //Context references dictionary's derived form, so it must be released first
    decoder: Decoder,
    dict: Option<Dictionary>,
    input: Vec<u8>,
    needs_input: bool,
    at_frame_edge: bool,
    single_frame: bool,
    //Unconsumed bytes of last input
    unused_len: usize,
    poison: Option<Error>,
}

impl Decompressor {
    #[inline]
    ///Creates session with engine's defaults.
    pub fn new() -> Result<Self> {
        Self::with_dict(None, &DecompressParams::new())
    }

    ///Creates session with optional dictionary and parameters.
    pub fn with_dict(dict: Option<&Dictionary>, params: &DecompressParams) -> Result<Self> {
        let mut decoder = Decoder::new(params)?;

        if let Some(dict) = dict {
            let ddict = dict.decompression_form()?;
            //Dictionary is stored alongside and released after decoder
            let result = unsafe {
                decoder.ref_ddict(ddict)
            };
            if let Err(code) = result {
                return Err(Error::EngineFailure(code.name()));
            }
        }

        log::debug!("decompressor created: params={params:?} dict_id={:?}", dict.map(Dictionary::dict_id));
        Ok(Self {
            decoder,
            dict: dict.cloned(),
            input: Vec::new(),
            needs_input: true,
            at_frame_edge: true,
            single_frame: false,
            unused_len: 0,
            poison: None,
        })
    }

    #[inline]
    ///Creates session that stops after first complete frame.
    ///
    ///Bytes following the frame are left to caller, their number is reported by [unused_len](Self::unused_len)
    pub(crate) fn single_frame(dict: Option<&Dictionary>, params: &DecompressParams) -> Result<Self> {
        let mut result = Self::with_dict(dict, params)?;
        result.single_frame = true;
        Ok(result)
    }

    #[inline(always)]
    ///Returns whether session requires more input to make progress.
    pub fn needs_input(&self) -> bool {
        self.needs_input
    }

    #[inline(always)]
    ///Returns whether session sits exactly between frames.
    pub fn at_frame_edge(&self) -> bool {
        self.at_frame_edge
    }

    #[inline(always)]
    ///Returns dictionary used by session, if any.
    pub fn dict(&self) -> Option<&Dictionary> {
        self.dict.as_ref()
    }

    #[inline(always)]
    ///Number of trailing bytes of last input, not consumed by engine.
    ///
    ///Unless session is single frame, these bytes are staged for the next call.
    pub(crate) fn unused_len(&self) -> usize {
        self.unused_len
    }

    ///Decompresses `data`, returning at most `max_output` bytes (unlimited if `None`).
    ///
    ///Empty `data` at frame edge is no-op.
    ///Bytes following complete frame are decoded as start of next frame.
    ///
    ///Malformed data is reported as [Error::CorruptInput] and lack of memory as [Error::EngineFailure].
    ///Either error poisons session.
    ///Output returned by previous calls stays valid.
    pub fn decompress(&mut self, data: &[u8], max_output: Option<usize>) -> Result<Vec<u8>> {
        if let Some(error) = self.poison.as_ref() {
            return Err(error.clone());
        }

        if self.input.is_empty() && data.is_empty() && self.at_frame_edge {
            self.needs_input = true;
            self.unused_len = 0;
            return Ok(Vec::new());
        }

        let limit = max_output.unwrap_or(usize::MAX);
        let staged;
        let input = if self.input.is_empty() {
            data
        } else {
            let mut buffer = mem::take(&mut self.input);
            buffer.extend_from_slice(data);
            staged = buffer;
            staged.as_slice()
        };

        let mut output = Vec::new();
        match self.drive(input, &mut output, limit) {
            Ok(remain) => {
                self.unused_len = remain;
                //Single frame session never continues, so remaining bytes are left with caller
                if !self.single_frame {
                    self.input = input[input.len() - remain..].to_vec();
                }
                self.needs_input = if remain > 0 {
                    false
                } else if self.at_frame_edge {
                    true
                } else {
                    //Hitting limit means engine may still hold output
                    output.len() < limit
                };
                log::trace!("decompress: input={} output={} remain={} frame_edge={}", input.len(), output.len(), remain, self.at_frame_edge);
                Ok(output)
            },
            Err(error) => {
                log::warn!("decompressor poisoned: {error}");
                self.poison = Some(error.clone());
                Err(error)
            }
        }
    }

    //Returns number of unconsumed bytes in `input`
    fn drive(&mut self, mut input: &[u8], output: &mut Vec<u8>, limit: usize) -> Result<usize> {
        loop {
            let room = limit - output.len();
            if room == 0 {
                break;
            }

            if output.capacity() == output.len() {
                let reserve_size = cmp::min(room, cmp::max(OUTPUT_CHUNK, input.len()));
                output.try_reserve(reserve_size)?;
            }

            let output_len = output.len();
            let result = self.decoder.decode_vec(input, output, room);
            let consumed = input.len() - result.input_remain;
            input = &input[consumed..];

            match result.status {
                Ok(DecodeStatus::Finished) => {
                    self.at_frame_edge = true;
                    log::trace!("frame finished, input remain={}", input.len());
                    if self.single_frame || input.is_empty() {
                        break;
                    }
                },
                Ok(status) => {
                    if consumed > 0 {
                        self.at_frame_edge = false;
                    }
                    if status == DecodeStatus::NeedInput && input.is_empty() {
                        break;
                    } else if consumed == 0 && output.len() == output_len {
                        break;
                    }
                },
                Err(code) if code.is_resource_failure() => return Err(Error::EngineFailure(code.name())),
                Err(code) => return Err(Error::CorruptInput(code.name())),
            }
        }

        Ok(input.len())
    }
}

impl core::fmt::Debug for Decompressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decompressor")
         .field("dict", &self.dict)
         .field("unused", &self.input.len())
         .field("needs_input", &self.needs_input)
         .field("at_frame_edge", &self.at_frame_edge)
         .field("poison", &self.poison)
         .finish()
    }
}
