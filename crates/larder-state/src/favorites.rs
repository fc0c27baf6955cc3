//! Favorites / wishlist membership, persisted across reloads.

use crate::storage::KeyValueStorage;
use larder_catalog::ids::ProductId;

/// The single durable key favorites live under.
pub const FAVORITES_KEY: &str = "product-favorites";

/// A set of favorited product identities.
///
/// Loaded once at construction; every mutation persists the full set
/// synchronously. Insertion order is preserved, matching what the
/// stored JSON array encodes.
pub struct FavoritesStore<S: KeyValueStorage> {
    storage: S,
    ids: Vec<ProductId>,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    /// Load the set from storage. Malformed or unreadable state is
    /// logged and treated as empty, never fatal to initialization.
    pub fn open(storage: S) -> Self {
        let ids = match storage.load(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().map(ProductId::new).collect(),
                Err(error) => {
                    tracing::warn!(%error, "malformed favorites; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "favorites unreadable; starting empty");
                Vec::new()
            }
        };

        Self { storage, ids }
    }

    /// The favorited ids, in insertion order.
    pub fn favorites(&self) -> &[ProductId] {
        &self.ids
    }

    /// Pure membership lookup; never touches storage.
    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add an id. No-op when already present.
    pub fn add(&mut self, id: ProductId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
            self.persist();
        }
    }

    /// Remove an id. No-op when absent.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() != before {
            self.persist();
        }
    }

    /// Flip membership. Returns the new membership state. Applying
    /// twice restores the original state.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.is_favorite(&id) {
            self.remove(&id);
            false
        } else {
            self.add(id);
            true
        }
    }

    fn persist(&self) {
        let encoded: Vec<&str> = self.ids.iter().map(ProductId::as_str).collect();
        let raw = match serde_json::to_string(&encoded) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(%error, "failed to encode favorites");
                return;
            }
        };
        if let Err(error) = self.storage.store(FAVORITES_KEY, &raw) {
            tracing::warn!(%error, "failed to persist favorites");
        }
    }
}
