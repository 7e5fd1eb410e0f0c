// ABOUTME: Persisted layout geometry for a container.
// ABOUTME: Serializes region sizes and panel id lists to a key-value store as JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::{LayoutStore, Pixels, Region, RegionSizes, StoreError};

/// What a container writes after a resize or a move.
///
/// Only `sizes` is read back. The id lists describe which panels were
/// docked where, but panel content is never persisted, so the owning
/// application re-adds panels itself on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    #[serde(default = "LayoutRecord::default_version")]
    pub version: u32,
    #[serde(default, deserialize_with = "sizes_lenient")]
    pub sizes: BTreeMap<String, Pixels>,
    #[serde(default)]
    pub regions: BTreeMap<String, Vec<String>>,
}

impl LayoutRecord {
    pub const CURRENT_VERSION: u32 = 1;

    fn default_version() -> u32 {
        Self::CURRENT_VERSION
    }

    pub fn new(sizes: &RegionSizes) -> Self {
        let regions = Region::ALL
            .iter()
            .map(|region| (region.as_str().to_string(), Vec::new()))
            .collect();
        Self {
            version: Self::CURRENT_VERSION,
            sizes: sizes.to_map(),
            regions,
        }
    }

    /// Record the panels docked in a region. Anonymous panels are written as "".
    pub fn set_region_ids<I, S>(&mut self, region: Region, ids: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let ids = ids
            .into_iter()
            .map(|id| id.map(Into::into).unwrap_or_default())
            .collect();
        self.regions.insert(region.as_str().to_string(), ids);
    }

    pub fn region_ids(&self, region: Region) -> &[String] {
        self.regions
            .get(region.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let record: LayoutRecord = serde_json::from_str(json)?;

        // Version check - for future compatibility
        if record.version > Self::CURRENT_VERSION {
            return Err(PersistError::UnsupportedVersion(record.version));
        }

        Ok(record)
    }

    /// Write this record under `key`
    pub fn save(&self, store: &dyn LayoutStore, key: &str) -> Result<(), PersistError> {
        let json = self.to_json()?;
        store.set(key, &json)?;
        Ok(())
    }

    /// Read the record under `key`. `Ok(None)` when nothing was saved yet.
    pub fn load(store: &dyn LayoutStore, key: &str) -> Result<Option<Self>, PersistError> {
        match store.get(key)? {
            Some(json) => Self::from_json(&json).map(Some),
            None => Ok(None),
        }
    }
}

/// One unreadable size drops that entry, not the whole record
fn sizes_lenient<'de, D>(deserializer: D) -> Result<BTreeMap<String, Pixels>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| match serde_json::from_value::<Pixels>(value) {
            Ok(size) => Some((name, size)),
            Err(e) => {
                tracing::warn!("Dropping saved size for {}: {}", name, e);
                None
            }
        })
        .collect())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layout version: {0}")]
    UnsupportedVersion(u32),
}
