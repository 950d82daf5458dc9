use super::{DataStore, StoreKey};
use crate::error::{MemozError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    documents: HashMap<StoreKey, String>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, for testing error paths.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl DataStore for InMemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.documents.get(&key).cloned())
    }

    fn save(&mut self, key: StoreKey, document: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(MemozError::Store("Simulated write error".to_string()));
        }
        self.documents.insert(key, document.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ArchivedMemo, Category, DeletedMemo, Memo, NewMemo};
    use crate::store::{load_collection, save_collection};
    use chrono::{DateTime, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn push_active(mut self, memo: Memo) -> Self {
            let mut memos: Vec<Memo> = load_collection(&self.store, StoreKey::Memos).unwrap();
            memos.push(memo);
            save_collection(&mut self.store, StoreKey::Memos, &memos).unwrap();
            self
        }

        pub fn with_memos(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = NewMemo::new(format!("Memo {}", i + 1), format!("Content {}", i + 1));
                self = self.push_active(Memo::new(draft));
            }
            self
        }

        pub fn with_memo(self, title: &str, content: &str) -> Self {
            self.push_active(Memo::new(NewMemo::new(title, content)))
        }

        pub fn with_categorized_memo(self, title: &str, category: Category) -> Self {
            self.push_active(Memo::new(
                NewMemo::new(title, "Some content").with_category(category),
            ))
        }

        pub fn with_pinned_memo(self, title: &str) -> Self {
            self.push_active(Memo::new(NewMemo::new(title, "Pinned content").pinned()))
        }

        pub fn with_archived_memo(mut self, title: &str) -> Self {
            let mut archive: Vec<ArchivedMemo> =
                load_collection(&self.store, StoreKey::Archive).unwrap();
            archive.push(ArchivedMemo::from_memo(Memo::new(NewMemo::new(
                title,
                "Archived content",
            ))));
            save_collection(&mut self.store, StoreKey::Archive, &archive).unwrap();
            self
        }

        pub fn with_trashed_memo(mut self, title: &str, deleted_at: DateTime<Utc>) -> Self {
            let mut trash: Vec<DeletedMemo> =
                load_collection(&self.store, StoreKey::Trash).unwrap();
            let mut deleted =
                DeletedMemo::from_memo(Memo::new(NewMemo::new(title, "Deleted content")));
            deleted.deleted_at = deleted_at;
            trash.push(deleted);
            save_collection(&mut self.store, StoreKey::Trash, &trash).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_returns_documents() {
        let mut store = InMemoryStore::new();
        assert!(store.load(StoreKey::Memos).unwrap().is_none());
        store.save(StoreKey::Memos, "[]").unwrap();
        assert_eq!(store.load(StoreKey::Memos).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn simulated_write_error() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        assert!(matches!(
            store.save(StoreKey::Memos, "[]"),
            Err(MemozError::Store(_))
        ));
        assert!(store.load(StoreKey::Memos).unwrap().is_none());
    }
}
