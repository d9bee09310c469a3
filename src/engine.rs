use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use crate::assets::cache::{CacheStats, ImageCache};
use crate::assets::decode::DecoderRegistry;
use crate::assets::encode::EncoderRegistry;
use crate::assets::format::{self, SNIFF_LEN};
use crate::assets::xpm;
use crate::foundation::config::EngineConfig;
use crate::foundation::error::{ErrorCode, RasterError, RasterResult};
use crate::raster::image::RImage;
use crate::transform::filters::Filter;
use crate::transform::resample;

/// Context object owning the image cache, the active resampling filter, codec registries and
/// the code of the last failed load or save.
///
/// Engines never share state with each other. Wrap one in a `Mutex` to share it across threads.
#[derive(Debug)]
pub struct ImageEngine {
    config: EngineConfig,
    cache: Option<ImageCache>,
    filter: Filter,
    decoders: DecoderRegistry,
    encoders: EncoderRegistry,
    last_error: Option<ErrorCode>,
}

impl Default for ImageEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ImageEngine {
    /// Build an engine; out-of-range config values are clamped.
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            filter: config.filter,
            decoders: DecoderRegistry::with_builtin(config.generic_fallback),
            encoders: EncoderRegistry::with_builtin(),
            cache: None,
            last_error: None,
            config,
        }
    }

    /// Build an engine configured from `RIMAGE_CACHE` / `RIMAGE_CACHE_SIZE`.
    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// Effective configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable access to the decoder table, e.g. to register an extra format decoder.
    pub fn decoders_mut(&mut self) -> &mut DecoderRegistry {
        &mut self.decoders
    }

    /// Mutable access to the encoder table.
    pub fn encoders_mut(&mut self) -> &mut EncoderRegistry {
        &mut self.encoders
    }

    fn record<T>(&mut self, result: RasterResult<T>) -> RasterResult<T> {
        if let Err(e) = &result {
            self.last_error = Some(e.code());
        }
        result
    }

    /// Code of the most recent failed load or save, [`ErrorCode::None`] if nothing failed yet.
    pub fn last_error(&self) -> ErrorCode {
        self.last_error.unwrap_or(ErrorCode::None)
    }

    /// Load frame `frame_index` of the image at `path`, going through the cache.
    pub fn load(&mut self, path: impl AsRef<Path>, frame_index: usize) -> RasterResult<RImage> {
        let result = self.load_path(path.as_ref(), frame_index);
        self.record(result)
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    fn load_path(&mut self, path: &Path, frame_index: usize) -> RasterResult<RImage> {
        let cache = self.cache.get_or_insert_with(|| {
            tracing::debug!(
                entries = self.config.cache_entries,
                max_pixels = self.config.cache_max_pixels,
                "initializing image cache"
            );
            ImageCache::new(self.config.cache_entries, self.config.cache_max_pixels)
        });

        let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        if cache.capacity() > 0
            && let Some(hit) = cache.lookup(path, frame_index, mtime)
        {
            return Ok(hit);
        }

        let bytes = read_file(path)?;
        let image = self.decoders.decode(&bytes, frame_index)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            alpha = image.has_alpha(),
            "decoded image"
        );

        if let (Some(cache), Some(mtime)) = (self.cache.as_mut(), mtime) {
            cache.store(path, frame_index, mtime, &image);
        }
        Ok(image)
    }

    /// Decode an in-memory normalized XPM given as its string literals. Never cached.
    pub fn load_xpm_data<S: AsRef<str>>(&mut self, lines: &[S]) -> RasterResult<RImage> {
        let result = xpm::load_xpm_data(lines);
        self.record(result)
    }

    /// Encode `image` as `format_name` (case-insensitive) and write it to `path`.
    pub fn save(
        &mut self,
        image: &RImage,
        path: impl AsRef<Path>,
        format_name: &str,
        title: Option<&str>,
    ) -> RasterResult<()> {
        let result = self.save_path(image, path.as_ref(), format_name, title);
        self.record(result)
    }

    #[tracing::instrument(skip(self, image, path), fields(path = %path.display()))]
    fn save_path(
        &self,
        image: &RImage,
        path: &Path,
        format_name: &str,
        title: Option<&str>,
    ) -> RasterResult<()> {
        let bytes = self.encoders.get(format_name)?.encode(image, title)?;
        let mut file = File::create(path).map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        std::io::Write::write_all(&mut file, &bytes)
            .and_then(|()| file.sync_all())
            .map_err(|source| RasterError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(bytes = bytes.len(), "saved image");
        Ok(())
    }

    /// Select the filter used by [`ImageEngine::smooth_scale`].
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Active resampling filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Filtered resize with the active filter.
    pub fn smooth_scale(&self, image: &RImage, width: u32, height: u32) -> RasterResult<RImage> {
        resample::smooth_scale(image, width, height, self.filter)
    }

    /// Drop every cached image and return the cache to its uninitialized state.
    pub fn release_cache(&mut self) {
        if self.cache.take().is_some() {
            tracing::debug!("released image cache");
        }
    }

    /// Cache counters; all zero before the first load.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.as_ref().map(ImageCache::stats).unwrap_or_default()
    }

    /// Names of the formats [`ImageEngine::load`] understands.
    pub fn supported_formats(&self) -> &'static [&'static str] {
        format::supported_formats()
    }

    /// Sniff the container of `path` without decoding it.
    ///
    /// Returns `None` for unknown signatures and unreadable files; the latter also sets
    /// [`ImageEngine::last_error`].
    pub fn image_file_format(&mut self, path: impl AsRef<Path>) -> Option<&'static str> {
        let path = path.as_ref();
        let head = read_head(path);
        let head = self.record(head).ok()?;
        format::sniff(&head).map(|f| f.name())
    }
}

fn open(path: &Path) -> RasterResult<File> {
    File::open(path).map_err(|source| RasterError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> RasterResult<Vec<u8>> {
    let mut bytes = Vec::new();
    open(path)?
        .read_to_end(&mut bytes)
        .map_err(|source| RasterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

fn read_head(path: &Path) -> RasterResult<Vec<u8>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|source| RasterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(head)
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
