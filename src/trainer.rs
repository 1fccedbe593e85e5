//!Dictionary training

use zstd_sys as sys;

use crate::dict::Dictionary;
use crate::error::{Error, Result};

///Default target size of trained dictionary
pub const DEFAULT_DICT_SIZE: usize = 100 * 1024;

#[derive(Default, Clone)]
///Training corpus
///
///Samples are stored back to back in single buffer, with separate table of their sizes,
///which is the layout training engine expects.
///Corpus is discarded once dictionary is produced.
pub struct DictTrainer {
    samples: Vec<u8>,
    sizes: Vec<usize>,
}

impl DictTrainer {
    #[inline(always)]
    ///Creates empty corpus
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
            sizes: Vec::new(),
        }
    }

    #[inline]
    ///Appends `sample`, preserving order.
    pub fn push(&mut self, sample: &[u8]) -> &mut Self {
        self.samples.extend_from_slice(sample);
        self.sizes.push(sample.len());
        self
    }

    #[inline(always)]
    ///Returns number of samples
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline(always)]
    ///Returns whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    ///Trains dictionary of at most `target_size` bytes.
    pub fn train(self, target_size: usize) -> Result<Dictionary> {
        if self.sizes.is_empty() {
            return Err(Error::TrainingFailed("no samples"));
        } else if target_size == 0 {
            return Err(Error::TrainingFailed("dictionary size must be positive"));
        }
        let samples_len = match u32::try_from(self.sizes.len()) {
            Ok(len) => len,
            Err(_) => return Err(Error::TrainingFailed("too many samples")),
        };

        let mut content = Vec::new();
        if content.try_reserve_exact(target_size).is_err() {
            return Err(Error::TrainingFailed("unable to allocate dictionary buffer"));
        }

        let result = unsafe {
            sys::ZDICT_trainFromBuffer(content.as_mut_ptr() as _, target_size, self.samples.as_ptr() as _, self.sizes.as_ptr(), samples_len)
        };

        if unsafe { sys::ZDICT_isError(result) } != 0 {
            let name = unsafe {
                sys::ZDICT_getErrorName(result)
            };
            let name = crate::utils::convert_c_str(name).unwrap_or("Unknown dictionary training error");
            log::warn!("dictionary training failed: samples={} total={} target={target_size}: {name}", self.sizes.len(), self.samples.len());
            return Err(Error::TrainingFailed(name));
        }

        //Engine writes exactly `result` bytes, which is never above capacity
        unsafe {
            content.set_len(result);
        }
        log::debug!("dictionary trained: samples={} dict_size={result}", self.sizes.len());
        Ok(Dictionary::from_raw_bytes(content))
    }
}

impl core::fmt::Debug for DictTrainer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DictTrainer")
         .field("samples", &self.sizes.len())
         .field("total_size", &self.samples.len())
         .finish()
    }
}
