//! Pin state changes from the list view.
//!
//! These go through the same load/find/persist path as an update, but leave
//! `updated_at` alone: pinning is list arrangement, not an edit.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::MemoId;
use crate::store::DataStore;

use super::helpers::{find_memo_mut, load_active, save_active};

pub fn pin<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    set_pinned(store, id, Some(true))
}

pub fn unpin<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    set_pinned(store, id, Some(false))
}

pub fn toggle<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    set_pinned(store, id, None)
}

fn set_pinned<S: DataStore>(store: &mut S, id: MemoId, pinned: Option<bool>) -> Result<CmdResult> {
    let mut memos = load_active(store)?;
    let memo = find_memo_mut(&mut memos, id)?;
    memo.is_pinned = pinned.unwrap_or(!memo.is_pinned);
    let memo = memo.clone();
    save_active(store, &memos)?;

    let verb = if memo.is_pinned { "pinned" } else { "unpinned" };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo {} ({}): {}",
        verb, memo.id, memo.title
    )));
    result.affected_memos.push(memo);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::error::MemozError;
    use crate::model::{Memo, NewMemo};
    use crate::store::memory::InMemoryStore;
    use crate::store::{load_collection, StoreKey};

    #[test]
    fn pin_and_unpin() {
        let mut store = InMemoryStore::new();
        let memo = create::run(&mut store, NewMemo::new("A", "x"))
            .unwrap()
            .affected_memos
            .remove(0);

        pin(&mut store, memo.id).unwrap();
        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert!(memos[0].is_pinned);

        unpin(&mut store, memo.id).unwrap();
        let memos: Vec<Memo> = load_collection(&store, StoreKey::Memos).unwrap();
        assert!(!memos[0].is_pinned);
    }

    #[test]
    fn toggle_flips_and_keeps_updated_at() {
        let mut store = InMemoryStore::new();
        let memo = create::run(&mut store, NewMemo::new("A", "x"))
            .unwrap()
            .affected_memos
            .remove(0);

        let result = toggle(&mut store, memo.id).unwrap();
        assert!(result.affected_memos[0].is_pinned);
        assert_eq!(result.affected_memos[0].updated_at, memo.updated_at);

        let result = toggle(&mut store, memo.id).unwrap();
        assert!(!result.affected_memos[0].is_pinned);
    }

    #[test]
    fn pin_missing_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            pin(&mut store, MemoId(7)),
            Err(MemozError::MemoNotFound(_))
        ));
    }
}
