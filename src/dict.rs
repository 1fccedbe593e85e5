//!Shared dictionary
//!
//!Dictionary content is immutable once constructed.
//!Engine specific forms are derived on first use by session and cached inside the handle,
//!so that any number of sessions can share them.

use zstd_sys as sys;

use core::{fmt, ptr};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::{Error, Result};
use crate::trainer::DictTrainer;

struct CompressionForm(ptr::NonNull<sys::ZSTD_CDict>);

//Prepared dictionary is read-only for engine once created.
unsafe impl Send for CompressionForm {}
unsafe impl Sync for CompressionForm {}

impl Drop for CompressionForm {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            sys::ZSTD_freeCDict(self.0.as_ptr());
        }
    }
}

struct DecompressionForm(ptr::NonNull<sys::ZSTD_DDict>);

unsafe impl Send for DecompressionForm {}
unsafe impl Sync for DecompressionForm {}

impl Drop for DecompressionForm {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            sys::ZSTD_freeDDict(self.0.as_ptr());
        }
    }
}

struct Inner {
    content: Box<[u8]>,
    dict_id: OnceLock<u32>,
    //Keyed by compression level
    compression: Mutex<HashMap<i32, CompressionForm>>,
    decompression: Mutex<Option<DecompressionForm>>,
}

#[derive(Clone)]
///Dictionary handle
///
///Cloning is cheap and shares the same content and derived forms.
///Handle can be used concurrently by any number of sessions.
///Sessions hold their own clone, so dictionary lives as long as last session using it.
pub struct Dictionary {
    inner: Arc<Inner>,
}

impl Dictionary {
    ///Wraps `content` as it is.
    ///
    ///Content is either dictionary produced by training, or arbitrary raw bytes used as prefix
    ///(in which case [dict_id](Self::dict_id) is 0).
    pub fn from_raw_bytes(content: impl Into<Vec<u8>>) -> Self {
        let content = content.into().into_boxed_slice();
        log::debug!("dictionary loaded: dict_size={}", content.len());
        Self {
            inner: Arc::new(Inner {
                content,
                dict_id: OnceLock::new(),
                compression: Mutex::new(HashMap::new()),
                decompression: Mutex::new(None),
            }),
        }
    }

    ///Trains dictionary of at most `target_size` bytes out of `samples`.
    ///
    ///Fails with [Error::TrainingFailed] if engine cannot produce dictionary, which is usually
    ///result of too few or too small samples.
    pub fn train<I, T>(samples: I, target_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut trainer = DictTrainer::new();
        for sample in samples {
            trainer.push(sample.as_ref());
        }
        trainer.train(target_size)
    }

    #[inline]
    ///Returns dictionary id, parsed from content on first access.
    ///
    ///0 means dictionary has no id, i.e. it is raw content.
    pub fn dict_id(&self) -> u32 {
        *self.inner.dict_id.get_or_init(|| unsafe {
            sys::ZSTD_getDictID_fromDict(self.inner.content.as_ptr() as _, self.inner.content.len()) as u32
        })
    }

    #[inline(always)]
    ///Returns dictionary content
    pub fn content(&self) -> &[u8] {
        &self.inner.content
    }

    #[inline(always)]
    ///Returns size of dictionary content
    pub fn len(&self) -> usize {
        self.inner.content.len()
    }

    #[inline(always)]
    ///Returns whether dictionary content is empty
    pub fn is_empty(&self) -> bool {
        self.inner.content.is_empty()
    }

    ///Returns form prepared for compression at `level`, building it once.
    ///
    ///Pointer is valid as long as this handle (or any clone) is alive.
    pub(crate) fn compression_form(&self, level: i32) -> Result<ptr::NonNull<sys::ZSTD_CDict>> {
        let mut forms = self.inner.compression.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(form) = forms.get(&level) {
            return Ok(form.0);
        }

        let cdict = unsafe {
            sys::ZSTD_createCDict(self.inner.content.as_ptr() as _, self.inner.content.len(), level)
        };
        match ptr::NonNull::new(cdict) {
            Some(cdict) => {
                log::debug!("dictionary prepared for compression: dict_id={} level={level}", self.dict_id());
                forms.insert(level, CompressionForm(cdict));
                Ok(cdict)
            },
            None => Err(Error::EngineFailure("unable to prepare dictionary for compression")),
        }
    }

    ///Returns form prepared for decompression, building it once.
    ///
    ///Pointer is valid as long as this handle (or any clone) is alive.
    pub(crate) fn decompression_form(&self) -> Result<ptr::NonNull<sys::ZSTD_DDict>> {
        let mut form = self.inner.decompression.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(form) = form.as_ref() {
            return Ok(form.0);
        }

        let ddict = unsafe {
            sys::ZSTD_createDDict(self.inner.content.as_ptr() as _, self.inner.content.len())
        };
        match ptr::NonNull::new(ddict) {
            Some(ddict) => {
                log::debug!("dictionary prepared for decompression: dict_id={}", self.dict_id());
                *form = Some(DecompressionForm(ddict));
                Ok(ddict)
            },
            None => Err(Error::EngineFailure("unable to prepare dictionary for decompression")),
        }
    }

    #[cfg(test)]
    fn prepared_levels(&self) -> usize {
        self.inner.compression.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
         .field("dict_id", &self.dict_id())
         .field("dict_size", &self.len())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_raw_content_as_id_less() {
        let dict = Dictionary::from_raw_bytes(&b"some prefix content which is not a dictionary"[..]);
        assert_eq!(dict.dict_id(), 0);
        assert_eq!(dict.content(), b"some prefix content which is not a dictionary");
        assert_eq!(dict.clone().len(), dict.len());
    }

    #[test]
    fn should_cache_derived_forms() {
        let dict = Dictionary::from_raw_bytes(vec![b'x'; 512]);
        let first = dict.compression_form(3).expect("prepare level 3");
        let second = dict.clone().compression_form(3).expect("prepare level 3 again");
        assert_eq!(first, second);
        dict.compression_form(1).expect("prepare level 1");
        assert_eq!(dict.prepared_levels(), 2);

        let first = dict.decompression_form().expect("prepare");
        let second = dict.decompression_form().expect("prepare again");
        assert_eq!(first, second);
    }
}
