//!Incremental compression session

use crate::dict::Dictionary;
use crate::encoder::{Directive, EncodeStatus, Encoder};
use crate::error::{Error, Result};
use crate::param::CompressParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Lifecycle of compression session
pub enum State {
    ///Nothing has been compressed yet.
    Idle,
    ///Frame is open.
    Active,
    ///Frame is closed by [Directive::End].
    ///
    ///Further calls start new frame within the same session.
    Ended,
}

///Compression session
///
///Owns engine's compression context for its whole lifetime.
///Parameters and dictionary are fixed at construction.
///
///Single session must not be used from multiple threads at once, which is enforced by `&mut self`.
///Abandoning session at any point is safe, but produced stream remains incomplete unless frame is ended.
///
///## Usage
///
///```rust
///use zstream::{Compressor, Directive, Decompressor};
///
///let mut compressor = Compressor::with_level(3).expect("create compressor");
///let mut compressed = compressor.compress(b"hello ", Directive::Continue).expect("compress");
///compressed.extend(compressor.compress(b"world", Directive::End).expect("compress"));
///
///let mut decompressor = Decompressor::new().expect("create decompressor");
///let output = decompressor.decompress(&compressed, None).expect("decompress");
///assert_eq!(output, b"hello world");
///```
pub struct Compressor {
    //Context references dictionary's derived form, so it must be released first
    encoder: Encoder,
    dict: Option<Dictionary>,
    params: CompressParams,
    state: State,
    poison: Option<Error>,
}

impl Compressor {
    #[inline]
    ///Creates session with engine's defaults.
    pub fn new() -> Result<Self> {
        Self::with_dict(&CompressParams::new(), None)
    }

    #[inline]
    ///Creates session with only compression level set.
    pub fn with_level(level: i64) -> Result<Self> {
        Self::with_dict(&CompressParams::with_level(level)?, None)
    }

    #[inline]
    ///Creates session with provided parameters
    pub fn with_params(params: &CompressParams) -> Result<Self> {
        Self::with_dict(params, None)
    }

    ///Creates session with provided parameters and optional dictionary.
    ///
    ///Dictionary is prepared for compression level in `params`, reusing previously prepared
    ///form when another session already used the same level.
    pub fn with_dict(params: &CompressParams, dict: Option<&Dictionary>) -> Result<Self> {
        let mut encoder = Encoder::new(params)?;

        if let Some(dict) = dict {
            let cdict = dict.compression_form(params.level())?;
            //Dictionary is stored alongside and released after encoder
            let result = unsafe {
                encoder.ref_cdict(cdict)
            };
            if let Err(code) = result {
                return Err(Error::EngineFailure(code.name()));
            }
        }

        log::debug!("compressor created: params={params:?} dict_id={:?}", dict.map(Dictionary::dict_id));
        Ok(Self {
            encoder,
            dict: dict.cloned(),
            params: params.clone(),
            state: State::Idle,
            poison: None,
        })
    }

    #[inline(always)]
    ///Returns current state of session
    pub fn state(&self) -> State {
        self.state
    }

    #[inline(always)]
    ///Returns parameters session was created with
    pub fn params(&self) -> &CompressParams {
        &self.params
    }

    #[inline(always)]
    ///Returns dictionary used by session, if any.
    pub fn dict(&self) -> Option<&Dictionary> {
        self.dict.as_ref()
    }

    #[inline]
    ///Compresses `data`, returning bytes produced by this call.
    ///
    ///- [Directive::Continue] - engine may buffer everything, output can be empty.
    ///- [Directive::Flush] - everything given so far is represented in output, frame stays open.
    ///- [Directive::End] - frame is closed, including checksum if enabled.
    ///
    ///Once engine reports failure, session is poisoned and every further call returns the same error.
    pub fn compress(&mut self, data: &[u8], directive: Directive) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress_into(data, &mut output, directive)?;
        Ok(output)
    }

    ///Compresses `data`, appending produced bytes to `output`.
    ///
    ///Returns number of bytes appended.
    ///On failure nothing is appended.
    pub fn compress_into(&mut self, data: &[u8], output: &mut Vec<u8>, directive: Directive) -> Result<usize> {
        if let Some(error) = self.poison.as_ref() {
            return Err(error.clone());
        }

        let offset = output.len();
        match self.drive(data, output, directive) {
            Ok(()) => {
                self.state = match directive {
                    Directive::End => State::Ended,
                    Directive::Continue | Directive::Flush => State::Active,
                };
                log::trace!("compress: input={} output={} directive={directive:?}", data.len(), output.len() - offset);
                Ok(output.len() - offset)
            },
            Err(error) => {
                //Output of failed call is never part of valid stream
                output.truncate(offset);
                log::warn!("compressor poisoned: {error}");
                self.poison = Some(error.clone());
                Err(error)
            }
        }
    }

    #[inline]
    ///Closes current frame, returning remaining output.
    ///
    ///Same as `compress(&[], Directive::End)`
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        self.compress(&[], Directive::End)
    }

    #[inline]
    ///Flushes everything given so far, keeping frame open.
    ///
    ///Same as `compress(&[], Directive::Flush)`
    pub fn flush_block(&mut self) -> Result<Vec<u8>> {
        self.compress(&[], Directive::Flush)
    }

    fn drive(&mut self, mut input: &[u8], output: &mut Vec<u8>, directive: Directive) -> Result<()> {
        const RESERVE_DEFAULT: usize = 1024;
        let input_len = input.len();
        let reserve_size = if input_len < RESERVE_DEFAULT {
            //Frame header and epilogue are emitted even for empty input
            output.try_reserve_exact(input_len + 64)?;
            RESERVE_DEFAULT
        } else if input_len < (RESERVE_DEFAULT * 16) {
            output.try_reserve_exact(input_len / 2)?;
            RESERVE_DEFAULT
        } else {
            output.try_reserve_exact(input_len / 3)?;
            RESERVE_DEFAULT * 8
        };

        loop {
            if output.capacity() == output.len() {
                output.try_reserve_exact(reserve_size)?;
            }

            let result = self.encoder.encode_vec(input, output, directive);
            input = &input[input.len() - result.input_remain..];

            match result.status {
                Ok(EncodeStatus::Finished) if input.is_empty() => break Ok(()),
                //Engine may keep buffering, which is fine unless directive asks to flush it
                Ok(_) if input.is_empty() && directive == Directive::Continue => break Ok(()),
                Ok(EncodeStatus::NeedOutput) => output.try_reserve_exact(reserve_size)?,
                Ok(_) => continue,
                Err(code) => break Err(Error::EngineFailure(code.name())),
            }
        }
    }
}

impl core::fmt::Debug for Compressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Compressor")
         .field("params", &self.params)
         .field("dict", &self.dict)
         .field("state", &self.state)
         .field("poison", &self.poison)
         .finish()
    }
}
