//! Decoded asset bookkeeping.
//!
//! Shell and texture images decode asynchronously. The store records the
//! load state of every asset along with a generation counter: each new load
//! request for a key bumps its generation, and a completion carrying an older
//! generation is stale and gets dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Identifies a loadable image asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    /// Device shell artwork, keyed by device key.
    Shell(String),
    /// Background texture, keyed by palette index.
    Texture(usize),
}

impl AssetKey {
    pub fn shell(device_key: impl Into<String>) -> Self {
        Self::Shell(device_key.into())
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Shell(device) => write!(f, "shell:{device}"),
            AssetKey::Texture(index) => write!(f, "texture:{index}"),
        }
    }
}

/// Load state of a single asset.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Requested, decode not finished.
    Pending,
    /// Decoded and usable.
    Ready(Arc<RgbaImage>),
    /// Fetch or decode failed; renderers use their fallback path.
    Failed { reason: String },
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

#[derive(Debug, Clone)]
struct AssetEntry {
    generation: u64,
    state: LoadState,
}

/// All known assets and their current load state.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    entries: HashMap<AssetKey, AssetEntry>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as pending and return the generation the completion must carry.
    pub fn begin(&mut self, key: AssetKey) -> u64 {
        let entry = self.entries.entry(key).or_insert(AssetEntry {
            generation: 0,
            state: LoadState::Pending,
        });
        entry.generation += 1;
        entry.state = LoadState::Pending;
        entry.generation
    }

    /// Record a finished load.
    ///
    /// Returns `false` and leaves the store untouched when the completion is
    /// stale (unknown key or superseded generation).
    pub fn complete(
        &mut self,
        key: &AssetKey,
        generation: u64,
        outcome: Result<Arc<RgbaImage>, String>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != generation {
            return false;
        }
        entry.state = match outcome {
            Ok(image) => LoadState::Ready(image),
            Err(reason) => LoadState::Failed { reason },
        };
        true
    }

    /// Install an already-decoded image, superseding any in-flight load.
    pub fn insert_ready(&mut self, key: AssetKey, image: Arc<RgbaImage>) {
        let generation = self.begin(key.clone());
        self.complete(&key, generation, Ok(image));
    }

    /// The decoded image for `key`, if it finished loading with nonzero size.
    pub fn ready(&self, key: &AssetKey) -> Option<&Arc<RgbaImage>> {
        match self.entries.get(key).map(|e| &e.state) {
            Some(LoadState::Ready(image)) if image.width() > 0 && image.height() > 0 => {
                Some(image)
            }
            _ => None,
        }
    }

    pub fn state(&self, key: &AssetKey) -> Option<&LoadState> {
        self.entries.get(key).map(|e| &e.state)
    }

    /// Current generation for `key` (0 if never requested).
    pub fn generation(&self, key: &AssetKey) -> u64 {
        self.entries.get(key).map(|e| e.generation).unwrap_or(0)
    }

    /// Number of assets still decoding.
    pub fn pending(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.state.is_pending())
            .count()
    }
}
