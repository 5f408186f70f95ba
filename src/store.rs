use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};

/// String key-value storage, the kind a browser's local storage or
/// `eframe`'s persistence gives you.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);

    fn get_json<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        let data = self.get(key)?;
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring corrupt value for '{key}': {err}");
                None
            }
        }
    }

    fn set_json<T>(&mut self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, json),
            Err(err) => log::error!("cannot serialize '{key}': {err}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    map: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the whole store from a blob written by [`MemoryStore::to_blob`]
    pub fn from_blob(blob: &str) -> Self {
        serde_json::from_str(blob).unwrap_or_else(|err| {
            log::warn!("starting with an empty store: {err}");
            Self::default()
        })
    }

    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).expect("string maps are valid json")
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.map.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// Loads a [`MemoryStore`] out of `eframe`'s storage
pub fn load_from(storage: &dyn eframe::Storage, key: &str) -> MemoryStore {
    storage
        .get_string(key)
        .as_deref()
        .map(MemoryStore::from_blob)
        .unwrap_or_default()
}

pub fn save_to(store: &MemoryStore, storage: &mut dyn eframe::Storage, key: &str) {
    storage.set_string(key, store.to_blob());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Saved {
        table: u32,
        names: Vec<String>,
    }

    #[test]
    fn get_and_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("tableNumber"), None);

        store.set("tableNumber", "12".into());
        assert_eq!(store.get("tableNumber").as_deref(), Some("12"));

        store.remove("tableNumber");
        assert!(store.is_empty());
    }

    #[test]
    fn json_values() {
        let mut store = MemoryStore::new();
        let saved = Saved {
            table: 4,
            names: vec!["Alice".into()],
        };
        store.set_json("saved", &saved);
        assert_eq!(store.get_json::<Saved>("saved"), Some(saved));
    }

    #[test]
    fn corrupt_json_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("saved", "{not json".into());
        assert_eq!(store.get_json::<Saved>("saved"), None);
    }

    #[test]
    fn blob_restores_everything() {
        let mut store = MemoryStore::new();
        store.set("a", "1".into());
        store.set("cart", "[]".into());

        let restored = MemoryStore::from_blob(&store.to_blob());
        assert_eq!(restored, store);
        assert!(MemoryStore::from_blob("garbage").is_empty());
    }
}
