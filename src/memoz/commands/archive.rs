use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ArchivedMemo, MemoId};
use crate::store::DataStore;

use super::helpers::{load_active, load_archive, save_active, save_archive, take_memo};

/// Moves one memo to the archive under a fresh id.
pub fn run<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    let mut memos = load_active(store)?;
    let memo = take_memo(&mut memos, id)?;
    let archived = ArchivedMemo::from_memo(memo);

    let mut archive = load_archive(store)?;
    archive.push(archived.clone());
    save_archive(store, &archive)?;
    save_active(store, &memos)?;
    tracing::debug!(id = %id, archive_id = %archived.memo.id, "memo archived");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo archived ({}): {}",
        id, archived.memo.title
    )));
    result.archived.push(archived);
    Ok(result)
}

pub fn bulk<S: DataStore>(store: &mut S, ids: &[MemoId]) -> Result<CmdResult> {
    let mut memos = load_active(store)?;
    let mut archive = load_archive(store)?;
    let mut result = CmdResult::default();

    for &id in ids {
        let Ok(memo) = take_memo(&mut memos, id) else {
            result.add_message(CmdMessage::warning(format!(
                "Memo not found, skipped: {}",
                id
            )));
            continue;
        };
        let archived = ArchivedMemo::from_memo(memo);
        result.add_message(CmdMessage::success(format!(
            "Memo archived ({}): {}",
            id, archived.memo.title
        )));
        archive.push(archived.clone());
        result.archived.push(archived);
    }

    if result.archived.is_empty() {
        result.add_message(CmdMessage::info("No memos to archive."));
        return Ok(result);
    }

    save_archive(store, &archive)?;
    save_active(store, &memos)?;
    tracing::info!(count = result.archived.len(), "memos archived");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Memo;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::{load_collection, StoreKey};
    use chrono::{Duration, Utc};

    #[test]
    fn archives_with_provenance() {
        let mut fixture = StoreFixture::new().with_pinned_memo("Keep");
        let memos: Vec<Memo> = load_collection(&fixture.store, StoreKey::Memos).unwrap();
        let id = memos[0].id;

        run(&mut fixture.store, id).unwrap();

        let archive: Vec<ArchivedMemo> =
            load_collection(&fixture.store, StoreKey::Archive).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].original_id, id);
        assert_ne!(archive[0].memo.id, id);
        assert!(archive[0].memo.is_pinned);
    }

    #[test]
    fn archive_does_not_touch_trash() {
        let mut fixture = StoreFixture::new()
            .with_memo("A", "x")
            .with_trashed_memo("old", Utc::now() - Duration::days(90));
        let memos: Vec<Memo> = load_collection(&fixture.store, StoreKey::Memos).unwrap();

        run(&mut fixture.store, memos[0].id).unwrap();

        let trash: Vec<crate::model::DeletedMemo> =
            load_collection(&fixture.store, StoreKey::Trash).unwrap();
        assert_eq!(trash.len(), 1);
    }

    #[test]
    fn bulk_archives_present_ids() {
        let mut fixture = StoreFixture::new().with_memos(3);
        let memos: Vec<Memo> = load_collection(&fixture.store, StoreKey::Memos).unwrap();

        let result = bulk(&mut fixture.store, &[memos[1].id, MemoId(3)]).unwrap();

        assert_eq!(result.archived.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("skipped: 3")));
        let remaining: Vec<Memo> = load_collection(&fixture.store, StoreKey::Memos).unwrap();
        assert_eq!(remaining.len(), 2);
    }
}
