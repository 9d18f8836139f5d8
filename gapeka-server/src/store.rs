//! Persisted route store.
//!
//! Maps a train id to its precomputed polyline as ordered `[lat, lon]`
//! pairs. Written once per precomputation run and read-only afterwards;
//! estimation calls share one loaded store. BTreeMap keys keep the file
//! output deterministic across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::DataError;

/// A polyline point as persisted: `[latitude, longitude]`.
pub type RoutePoint = [f64; 2];

/// Precomputed routes for all trains.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteStore {
    routes: BTreeMap<String, Vec<RoutePoint>>,
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a train's route. Empty polylines must not be inserted; the
    /// stitcher omits trains with no usable segments instead.
    pub fn insert(&mut self, train_id: String, points: Vec<RoutePoint>) {
        debug_assert!(!points.is_empty());
        self.routes.insert(train_id, points);
    }

    /// The route for a train, if one was precomputed.
    pub fn get(&self, train_id: &str) -> Option<&[RoutePoint]> {
        self.routes.get(train_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Load a store previously written by [`RouteStore::save`].
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store: Self = serde_json::from_str(&raw).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(routes = store.len(), path = %path.display(), "route store loaded");
        Ok(store)
    }

    /// Write the store as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let raw = serde_json::to_string_pretty(self).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(routes = self.len(), path = %path.display(), "route store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut store = RouteStore::new();
        store.insert("7A".to_string(), vec![[-6.2, 106.8], [-6.3, 106.9]]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("7A").unwrap().len(), 2);
        assert!(store.get("8B").is_none());
    }

    #[test]
    fn save_load_roundtrip() {
        let mut store = RouteStore::new();
        store.insert("7A".to_string(), vec![[-6.2, 106.8], [-6.3, 106.9]]);
        store.insert("112".to_string(), vec![[-7.0, 110.0], [-7.1, 110.1]]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precomputed-routes.json");
        store.save(&path).unwrap();

        let loaded = RouteStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("7A").unwrap(), store.get("7A").unwrap());
    }

    #[test]
    fn wire_format_is_id_to_pairs() {
        let mut store = RouteStore::new();
        store.insert("7A".to_string(), vec![[-6.2, 106.8]]);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["7A"][0][0], -6.2);
        assert_eq!(json["7A"][0][1], 106.8);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = RouteStore::load(Path::new("/nonexistent/routes.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
