//! # Storage Layer
//!
//! This module defines the storage abstraction for memoz. The [`DataStore`]
//! trait is a plain key-value contract: it stores and returns whole serialized
//! documents and knows nothing about memos.
//!
//! ## Keys
//!
//! There are four logical keys, each holding one JSON array:
//!
//! | Key                        | Document                |
//! |----------------------------|-------------------------|
//! | [`StoreKey::Memos`]        | active memos            |
//! | [`StoreKey::Archive`]      | archived memos          |
//! | [`StoreKey::Trash`]        | deleted memos           |
//! | [`StoreKey::SharedLinks`]  | shared-link registry    |
//!
//! ## Typed Access
//!
//! Commands never touch raw documents. They go through [`load_collection`]
//! and [`save_collection`], which handle JSON.
//!
//! `load_collection` fails closed: a document that no longer parses is logged
//! and treated as an empty collection. A corrupted store therefore loses its
//! data silently instead of making every command fail. This is an accepted
//! risk; the warning in the log is the only trace.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store, one `<key>.json` file per key.
//! - [`memory::InMemoryStore`]: in-memory store for tests.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Memos,
    Archive,
    Trash,
    SharedLinks,
}

impl StoreKey {
    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::Memos => "memos",
            StoreKey::Archive => "memos_archive",
            StoreKey::Trash => "memos_trash",
            StoreKey::SharedLinks => "shared_memos",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract interface for the persistent medium.
///
/// Every write replaces the whole document stored under a key.
pub trait DataStore {
    /// Raw document stored under `key`, or `None` if nothing was ever saved.
    fn load(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    fn save(&mut self, key: StoreKey, document: &str) -> Result<()>;
}

/// Reads a collection, substituting an empty one for missing or corrupt data.
pub fn load_collection<T, S>(store: &S, key: StoreKey) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: DataStore + ?Sized,
{
    let Some(document) = store.load(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&document) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "store corrupt, using an empty collection");
            Ok(Vec::new())
        }
    }
}

pub fn save_collection<T, S>(store: &mut S, key: StoreKey, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: DataStore + ?Sized,
{
    let document = serde_json::to_string(items)?;
    store.save(key, &document)?;
    tracing::debug!(key = %key, count = items.len(), "collection saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;
    use crate::model::{Memo, NewMemo};

    #[test]
    fn missing_key_loads_empty() {
        let store = InMemoryStore::new();
        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert!(memos.is_empty());
    }

    #[test]
    fn corrupt_document_fails_closed() {
        let mut store = InMemoryStore::new();
        store.save(StoreKey::Trash, "{not json").unwrap();
        let trash: Vec<Memo> = load_collection(&store, StoreKey::Trash).unwrap();
        assert!(trash.is_empty());
    }

    #[test]
    fn wrong_shape_fails_closed() {
        let mut store = InMemoryStore::new();
        store.save(StoreKey::Memos, r#"[{"title": 3}]"#).unwrap();
        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert!(memos.is_empty());
    }

    #[test]
    fn saved_collection_reloads() {
        let mut store = InMemoryStore::new();
        let memos = vec![Memo::new(NewMemo::new("A", "x"))];
        save_collection(&mut store, StoreKey::Memos, &memos).unwrap();
        let loaded: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert_eq!(loaded, memos);
    }

    #[test]
    fn key_names() {
        assert_eq!(StoreKey::Memos.name(), "memos");
        assert_eq!(StoreKey::Archive.name(), "memos_archive");
        assert_eq!(StoreKey::Trash.name(), "memos_trash");
        assert_eq!(StoreKey::SharedLinks.name(), "shared_memos");
    }
}
