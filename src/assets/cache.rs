use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::raster::image::RImage;

/// Counters describing cache behavior since creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to decode.
    pub misses: u64,
    /// Entries dropped because the file changed or vanished.
    pub stale_evictions: u64,
    /// Entries replaced to make room.
    pub lru_evictions: u64,
    /// Entries currently held.
    pub entries: usize,
}

#[derive(Debug)]
struct CacheEntry {
    path: PathBuf,
    frame_index: usize,
    image: RImage,
    mtime: SystemTime,
    last_used: u64,
}

/// Fixed-capacity table of decoded images keyed by `(path, frame)` and validated by mtime.
///
/// Recency is a logical tick bumped on every hit and store, so ties cannot occur.
#[derive(Debug)]
pub struct ImageCache {
    capacity: usize,
    max_pixels: usize,
    entries: Vec<CacheEntry>,
    tick: u64,
    stats: CacheStats,
}

impl ImageCache {
    /// Cache holding up to `capacity` images of at most `max_pixels` pixels (`0` = any size).
    pub fn new(capacity: usize, max_pixels: usize) -> Self {
        Self {
            capacity,
            max_pixels,
            entries: Vec::with_capacity(capacity),
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Look up a cached decode of `path`.
    ///
    /// `mtime` is the file's current modification time, or `None` when it could not be read.
    /// A matching entry with a different (or unknown) mtime is evicted and counts as a miss.
    pub fn lookup(
        &mut self,
        path: &Path,
        frame_index: usize,
        mtime: Option<SystemTime>,
    ) -> Option<RImage> {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.frame_index == frame_index && e.path == path)
        else {
            self.stats.misses += 1;
            return None;
        };

        if mtime == Some(self.entries[pos].mtime) {
            let tick = self.next_tick();
            let entry = &mut self.entries[pos];
            entry.last_used = tick;
            self.stats.hits += 1;
            tracing::debug!(path = %path.display(), frame_index, "image cache hit");
            return Some(entry.image.clone());
        }

        self.entries.swap_remove(pos);
        self.stats.stale_evictions += 1;
        self.stats.misses += 1;
        tracing::debug!(path = %path.display(), frame_index, "evicting stale cache entry");
        None
    }

    /// Whether an image of this size may be stored.
    pub fn accepts(&self, image: &RImage) -> bool {
        self.capacity > 0 && (self.max_pixels == 0 || image.pixel_count() <= self.max_pixels)
    }

    /// Store a clone of `image`, replacing the least-recently-used entry when full.
    ///
    /// Returns whether the image was stored.
    pub fn store(
        &mut self,
        path: &Path,
        frame_index: usize,
        mtime: SystemTime,
        image: &RImage,
    ) -> bool {
        if !self.accepts(image) {
            return false;
        }
        let entry = CacheEntry {
            path: path.to_path_buf(),
            frame_index,
            image: image.clone(),
            mtime,
            last_used: self.next_tick(),
        };

        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.frame_index == frame_index && e.path == path)
        {
            *existing = entry;
        } else if self.entries.len() < self.capacity {
            self.entries.push(entry);
        } else if let Some(victim) = self.entries.iter_mut().min_by_key(|e| e.last_used) {
            tracing::debug!(
                evicted = %victim.path.display(),
                path = %path.display(),
                "evicting least recently used cache entry"
            );
            *victim = entry;
            self.stats.lru_evictions += 1;
        }
        tracing::debug!(path = %path.display(), frame_index, entries = self.entries.len(), "cached image");
        true
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
