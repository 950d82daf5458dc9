use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{MemoId, MemoPatch};
use crate::store::DataStore;

use super::helpers::{find_memo_mut, load_active, save_active};

/// Merges `patch` into the memo and refreshes `updated_at`.
pub fn run<S: DataStore>(store: &mut S, id: MemoId, patch: &MemoPatch) -> Result<CmdResult> {
    patch.validate()?;

    let mut memos = load_active(store)?;
    let memo = find_memo_mut(&mut memos, id)?;
    patch.apply_to(memo);
    memo.touch();
    let updated = memo.clone();

    save_active(store, &memos)?;
    tracing::debug!(id = %id, "memo updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo updated ({}): {}",
        updated.id, updated.title
    )));
    result.affected_memos.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::error::MemozError;
    use crate::model::{Category, Memo, NewMemo};
    use crate::store::memory::InMemoryStore;
    use crate::store::{load_collection, StoreKey};

    fn created(store: &mut InMemoryStore) -> Memo {
        create::run(store, NewMemo::new("A", "x").with_category(Category::Work))
            .unwrap()
            .affected_memos
            .remove(0)
    }

    #[test]
    fn updates_content_and_bumps_updated_at() {
        let mut store = InMemoryStore::new();
        let original = created(&mut store);

        let patch = MemoPatch {
            content: Some("y".into()),
            ..Default::default()
        };
        run(&mut store, original.id, &patch).unwrap();

        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert_eq!(memos[0].content, "y");
        assert_eq!(memos[0].title, "A");
        assert_eq!(memos[0].created_at, original.created_at);
        assert!(memos[0].updated_at > original.updated_at);
        assert_eq!(memos[0].id, original.id);
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut store = InMemoryStore::new();
        created(&mut store);
        let err = run(&mut store, MemoId(42), &MemoPatch::default()).unwrap_err();
        assert!(matches!(err, MemozError::MemoNotFound(MemoId(42))));
        assert!(err.is_not_found());
    }

    #[test]
    fn failed_write_leaves_store_untouched() {
        let mut store = InMemoryStore::new();
        let original = created(&mut store);
        store.set_simulate_write_error(true);

        let patch = MemoPatch {
            title: Some("B".into()),
            ..Default::default()
        };
        assert!(run(&mut store, original.id, &patch).is_err());

        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert_eq!(memos[0].title, "A");
    }
}
