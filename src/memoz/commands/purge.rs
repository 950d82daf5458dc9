use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::MemoId;
use crate::store::DataStore;

use super::helpers::{load_trash, save_trash, take_held};

/// Permanently removes one trash entry.
pub fn run<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    let mut trash = load_trash(store)?;
    let removed = take_held(&mut trash, id)?;
    save_trash(store, &mut trash)?;
    tracing::debug!(id = %id, "trash entry purged");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo permanently deleted ({}): {}",
        id, removed.memo.title
    )));
    result.trashed.push(removed);
    Ok(result)
}

pub fn empty_trash<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let trash = load_trash(store)?;
    let mut result = CmdResult::default();

    if trash.is_empty() {
        result.add_message(CmdMessage::info("Trash is already empty."));
        return Ok(result);
    }

    save_trash(store, &mut Vec::new())?;
    tracing::info!(count = trash.len(), "trash emptied");
    result.add_message(CmdMessage::success(format!(
        "Permanently deleted {} memo(s).",
        trash.len()
    )));
    Ok(result.with_trashed(trash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemozError;
    use crate::model::DeletedMemo;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::{load_collection, StoreKey};
    use chrono::Utc;

    fn trash(fixture: &StoreFixture) -> Vec<DeletedMemo> {
        load_collection(&fixture.store, StoreKey::Trash).unwrap()
    }

    #[test]
    fn purges_single_entry() {
        let mut fixture = StoreFixture::new()
            .with_trashed_memo("A", Utc::now())
            .with_trashed_memo("B", Utc::now());
        let id = trash(&fixture)[0].memo.id;

        run(&mut fixture.store, id).unwrap();

        let left = trash(&fixture);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].memo.title, "B");
    }

    #[test]
    fn purge_missing_is_not_found() {
        let mut fixture = StoreFixture::new().with_trashed_memo("A", Utc::now());
        assert!(matches!(
            run(&mut fixture.store, MemoId(3)),
            Err(MemozError::MemoNotFound(_))
        ));
        assert_eq!(trash(&fixture).len(), 1);
    }

    #[test]
    fn empties_trash() {
        let mut fixture = StoreFixture::new()
            .with_memos(2)
            .with_trashed_memo("A", Utc::now())
            .with_trashed_memo("B", Utc::now());

        let result = empty_trash(&mut fixture.store).unwrap();

        assert_eq!(result.trashed.len(), 2);
        assert!(trash(&fixture).is_empty());
        let active: Vec<crate::model::Memo> =
            load_collection(&fixture.store, StoreKey::Memos).unwrap();
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn empty_trash_on_empty_is_info() {
        let mut fixture = StoreFixture::new();
        let result = empty_trash(&mut fixture.store).unwrap();
        assert!(result.trashed.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
