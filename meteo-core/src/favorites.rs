use crate::{error::StorageError, model::CityName, storage::KeyValueStore};

/// Storage key holding the JSON array of favorite city names.
pub const FAVORITES_KEY: &str = "favorites";

/// Ordered, duplicate-free list of favorite cities.
///
/// Every call reloads the persisted list; nothing is cached between calls.
/// `toggle` is a plain read-modify-write with no lock, so two toggles racing
/// from separate callers can lose one update. That is accepted for a
/// single-user local list.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Never fails: absent, unreadable or corrupt values load as empty.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites, using empty list: {}", e);
                return Vec::new();
            }
        };

        let parsed: Vec<String> = match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Stored favorites are not a string list, using empty list: {}", e);
                return Vec::new();
            }
        };

        let mut favorites: Vec<String> = Vec::with_capacity(parsed.len());
        for city in parsed {
            if !favorites.contains(&city) {
                favorites.push(city);
            }
        }
        favorites
    }

    pub fn is_favorite(&self, city: &CityName) -> bool {
        self.load().iter().any(|c| c == city.as_str())
    }

    /// Flips membership and persists. Returns the new membership state.
    pub fn toggle(&self, city: &CityName) -> Result<bool, StorageError> {
        let mut favorites = self.load();
        let now_favorite = if favorites.iter().any(|c| c == city.as_str()) {
            favorites.retain(|c| c != city.as_str());
            false
        } else {
            favorites.push(city.to_string());
            true
        };

        self.persist(&favorites)?;
        tracing::debug!(city = %city, favorite = now_favorite, "Toggled favorite");

        Ok(now_favorite)
    }

    fn persist(&self, favorites: &[String]) -> Result<(), StorageError> {
        let json = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_KEY, &json)
    }
}
