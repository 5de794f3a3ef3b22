//! # Lookup Table
//!
//! The nested `functional location -> asset -> point -> id` structure that the exporter
//! produces and the seeder consults to avoid re-creating nodes.
//!
//! All keys are normalized with [`normalize`]. Inside an asset entry two reserved keys
//! ([`LOCATION_ID_KEY`] and [`ASSET_ID_KEY`]) hold the ids of the parent functional
//! location and of the asset itself; every other key is a point.
//!
//! ```json
//! {
//!   "server_room": {
//!     "rack_1": {
//!       "__location_id__": "F1",
//!       "__asset_id__": "A1",
//!       "temperature": "P1"
//!     }
//!   }
//! }
//! ```
pub mod file;

pub use file::{LookupFile, LookupFileError};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Reserved key holding the id of the functional location an asset lives under.
pub const LOCATION_ID_KEY: &str = "__location_id__";
/// Reserved key holding the id of the asset itself.
pub const ASSET_ID_KEY: &str = "__asset_id__";

/// Point key -> id, plus the two reserved keys.
pub type AssetEntry = BTreeMap<String, String>;
/// Asset key -> asset entry.
pub type AssetMap = BTreeMap<String, AssetEntry>;

/// Normalizes a node label into a lookup key: lower-cased, spaces replaced by `_`.
///
/// Normalizing an already normalized name is a no-op.
pub fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    locations: BTreeMap<String, AssetMap>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of functional locations in the table.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn functional_locations(&self) -> impl Iterator<Item = (&str, &AssetMap)> {
        self.locations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn functional_location(&self, key: &str) -> Option<&AssetMap> {
        self.locations.get(key)
    }

    pub fn asset(&self, location_key: &str, asset_key: &str) -> Option<&AssetEntry> {
        self.locations.get(location_key)?.get(asset_key)
    }

    /// Returns the id of a functional location.
    ///
    /// The table does not store it directly: it is read from the [`LOCATION_ID_KEY`] of the
    /// first asset (in key order) that has one. An asset nested under another asset is
    /// filed under the same functional location with the parent asset's id as its
    /// [`LOCATION_ID_KEY`], so ids that belong to an asset of the same functional location
    /// are skipped.
    ///
    /// Returns `None` when the functional location is unknown or has no direct assets.
    pub fn location_id(&self, location_key: &str) -> Option<&str> {
        let assets = self.locations.get(location_key)?;
        let asset_ids: BTreeSet<&str> = assets
            .values()
            .filter_map(|entry| entry.get(ASSET_ID_KEY))
            .map(String::as_str)
            .collect();

        assets
            .values()
            .filter_map(|entry| entry.get(LOCATION_ID_KEY))
            .map(String::as_str)
            .find(|id| !asset_ids.contains(id))
    }

    /// Returns `true` when the asset has a non-empty entry.
    pub fn contains_asset(&self, location_key: &str, asset_key: &str) -> bool {
        self.asset(location_key, asset_key)
            .is_some_and(|entry| !entry.is_empty())
    }

    /// Registers a functional location. Existing assets under the same key are kept.
    pub fn insert_functional_location(&mut self, key: impl Into<String>) -> &mut AssetMap {
        self.locations.entry(key.into()).or_default()
    }

    /// Registers an asset with both reserved ids. Points already recorded for it are kept.
    pub fn insert_asset(
        &mut self,
        location_key: &str,
        asset_key: impl Into<String>,
        location_id: impl Into<String>,
        asset_id: impl Into<String>,
    ) -> &mut AssetEntry {
        let entry = self
            .insert_functional_location(location_key)
            .entry(asset_key.into())
            .or_default();

        entry.insert(LOCATION_ID_KEY.to_string(), location_id.into());
        entry.insert(ASSET_ID_KEY.to_string(), asset_id.into());
        entry
    }

    /// Records a point under an asset.
    ///
    /// Returns `false`, leaving the table untouched, when the asset has not been inserted.
    pub fn insert_point(
        &mut self,
        location_key: &str,
        asset_key: &str,
        point_key: impl Into<String>,
        point_id: impl Into<String>,
    ) -> bool {
        let Some(entry) = self
            .locations
            .get_mut(location_key)
            .and_then(|assets| assets.get_mut(asset_key))
        else {
            return false;
        };

        entry.insert(point_key.into(), point_id.into());
        true
    }
}

/// Returns the points of an asset entry, skipping the reserved keys.
pub fn points(entry: &AssetEntry) -> impl Iterator<Item = (&str, &str)> {
    entry
        .iter()
        .filter(|(k, _)| k.as_str() != LOCATION_ID_KEY && k.as_str() != ASSET_ID_KEY)
        .map(|(k, v)| (k.as_str(), v.as_str()))
}
