use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{DeletedMemo, MemoId};
use crate::store::DataStore;

use super::helpers::{load_active, load_trash, save_active, save_trash, take_memo};

/// Moves one memo to the trash under a fresh id.
pub fn run<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    let mut memos = load_active(store)?;
    let memo = take_memo(&mut memos, id)?;
    let deleted = DeletedMemo::from_memo(memo);

    let mut trash = load_trash(store)?;
    trash.push(deleted.clone());
    save_trash(store, &mut trash)?;
    save_active(store, &memos)?;
    tracing::debug!(id = %id, trash_id = %deleted.memo.id, "memo moved to trash");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo deleted ({}): {}",
        id, deleted.memo.title
    )));
    result.trashed.push(deleted);
    Ok(result)
}

/// Moves every listed memo present in the active collection to the trash.
/// Ids that are not there are skipped.
pub fn bulk<S: DataStore>(store: &mut S, ids: &[MemoId]) -> Result<CmdResult> {
    let mut memos = load_active(store)?;
    let mut trash = load_trash(store)?;
    let mut result = CmdResult::default();

    for &id in ids {
        let Ok(memo) = take_memo(&mut memos, id) else {
            result.add_message(CmdMessage::warning(format!(
                "Memo not found, skipped: {}",
                id
            )));
            continue;
        };
        let deleted = DeletedMemo::from_memo(memo);
        result.add_message(CmdMessage::success(format!(
            "Memo deleted ({}): {}",
            id, deleted.memo.title
        )));
        trash.push(deleted.clone());
        result.trashed.push(deleted);
    }

    if result.trashed.is_empty() {
        result.add_message(CmdMessage::info("No memos to delete."));
        return Ok(result);
    }

    save_trash(store, &mut trash)?;
    save_active(store, &memos)?;
    tracing::info!(count = result.trashed.len(), "memos moved to trash");
    Ok(result)
}
