//! Client-session state for the Larder storefront.
//!
//! Everything a hydrated listing page keeps between events, owned by the
//! single UI thread:
//!
//! - **Resources**: per-fetch loading/error state, with tagged responses
//!   so a slow early answer never overwrites a faster later one
//! - **Debounce**: a cooperative timer turning keystrokes into stable
//!   search terms
//! - **Favorites**: durable wishlist membership over an injected storage
//!   capability
//! - **Controller**: the piece that combines all of the above with the
//!   pure listing pipeline from `larder-catalog`

mod controller;
mod debounce;
mod favorites;
mod resource;
mod storage;

pub use controller::{ListingController, ListingView};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use resource::{Resource, TaggedResource};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::KvStorage;
