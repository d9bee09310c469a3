use serde::{Deserialize, Serialize};

use crate::foundation::error::{RasterError, RasterResult};
use crate::transform::filters::Filter;

/// Default number of cached images.
pub const DEFAULT_CACHE_ENTRIES: usize = 8;
/// Upper bound for [`EngineConfig::cache_entries`].
pub const MAX_CACHE_ENTRIES: usize = 256;
/// Default largest pixel count (64x64) an image may have to be cached.
pub const DEFAULT_CACHE_MAX_PIXELS: usize = 64 * 64;
/// Upper bound (256x256) for [`EngineConfig::cache_max_pixels`].
pub const MAX_CACHE_MAX_PIXELS: usize = 256 * 256;

/// Environment variable overriding the cache entry count.
pub const ENV_CACHE_ENTRIES: &str = "RIMAGE_CACHE";
/// Environment variable overriding the largest cacheable pixel count.
pub const ENV_CACHE_MAX_PIXELS: &str = "RIMAGE_CACHE_SIZE";

/// Configuration of an [`ImageEngine`](crate::ImageEngine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of decoded images kept in the cache. `0` disables caching.
    pub cache_entries: usize,
    /// Largest `width * height` that is still cached. `0` means any size.
    pub cache_max_pixels: usize,
    /// Resampling filter used by [`ImageEngine::smooth_scale`](crate::ImageEngine::smooth_scale).
    pub filter: Filter,
    /// Let the `image` crate guess formats that signature sniffing does not recognize.
    pub generic_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_entries: DEFAULT_CACHE_ENTRIES,
            cache_max_pixels: DEFAULT_CACHE_MAX_PIXELS,
            filter: Filter::default(),
            generic_fallback: false,
        }
    }
}

impl EngineConfig {
    /// Read `RIMAGE_CACHE` and `RIMAGE_CACHE_SIZE` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`] but with an injected variable lookup.
    ///
    /// Missing or unparsable values keep their defaults; out-of-range values are clamped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = parse_count(ENV_CACHE_ENTRIES, lookup(ENV_CACHE_ENTRIES)) {
            cfg.cache_entries = clamp_count(ENV_CACHE_ENTRIES, v, MAX_CACHE_ENTRIES);
        }
        if let Some(v) = parse_count(ENV_CACHE_MAX_PIXELS, lookup(ENV_CACHE_MAX_PIXELS)) {
            cfg.cache_max_pixels = clamp_count(ENV_CACHE_MAX_PIXELS, v, MAX_CACHE_MAX_PIXELS);
        }
        cfg
    }

    /// Parse a JSON document; absent fields take their defaults.
    pub fn from_json_str(src: &str) -> RasterResult<Self> {
        let cfg: Self = serde_json::from_str(src)
            .map_err(|e| RasterError::validation(format!("engine config json: {e}")))?;
        Ok(cfg.sanitized())
    }

    /// Clamp every value into its documented range.
    pub fn sanitized(mut self) -> Self {
        if self.cache_entries > MAX_CACHE_ENTRIES {
            tracing::debug!(
                requested = self.cache_entries,
                max = MAX_CACHE_ENTRIES,
                "clamping cache entry count"
            );
            self.cache_entries = MAX_CACHE_ENTRIES;
        }
        if self.cache_max_pixels > MAX_CACHE_MAX_PIXELS {
            tracing::debug!(
                requested = self.cache_max_pixels,
                max = MAX_CACHE_MAX_PIXELS,
                "clamping cache pixel threshold"
            );
            self.cache_max_pixels = MAX_CACHE_MAX_PIXELS;
        }
        self
    }
}

fn parse_count(key: &str, raw: Option<String>) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::debug!(key, value = %raw, "ignoring unparsable cache setting");
            None
        }
    }
}

fn clamp_count(key: &str, v: i64, max: usize) -> usize {
    let clamped = v.clamp(0, max as i64) as usize;
    if clamped as i64 != v {
        tracing::debug!(key, requested = v, used = clamped, "clamping cache setting");
    }
    clamped
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
