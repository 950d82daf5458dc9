//! Moving held records back into the active collection.
//!
//! A restored memo gets a new id and loses its holding fields; neither the id
//! it had before the move nor its archive/trash id is reused.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{HeldMemo, MemoId};
use crate::store::DataStore;

use super::helpers::{
    load_active, load_archive, load_trash, save_active, save_archive, save_trash, take_held,
};

pub fn from_archive<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    let mut archive = load_archive(store)?;
    let held = take_held(&mut archive, id)?;

    let mut result = restore_into_active(store, held)?;
    save_archive(store, &archive)?;
    result.add_message(CmdMessage::success(format!(
        "Memo restored from archive ({}): {}",
        id, result.affected_memos[0].title
    )));
    Ok(result)
}

pub fn from_trash<S: DataStore>(store: &mut S, id: MemoId) -> Result<CmdResult> {
    let mut trash = load_trash(store)?;
    let held = take_held(&mut trash, id)?;

    let mut result = restore_into_active(store, held)?;
    save_trash(store, &mut trash)?;
    result.add_message(CmdMessage::success(format!(
        "Memo restored from trash ({}): {}",
        id, result.affected_memos[0].title
    )));
    Ok(result)
}

fn restore_into_active<S: DataStore, T: HeldMemo>(store: &mut S, held: T) -> Result<CmdResult> {
    let held_id = held.id();
    let memo = held.into_memo().with_new_id();

    let mut memos = load_active(store)?;
    memos.push(memo.clone());
    save_active(store, &memos)?;
    tracing::debug!(held_id = %held_id, id = %memo.id, "memo restored");

    Ok(CmdResult::default().with_affected_memos(vec![memo]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{archive, create, delete, update};
    use crate::error::MemozError;
    use crate::model::{ArchivedMemo, Category, DeletedMemo, Memo, MemoPatch, NewMemo};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::{load_collection, StoreKey};
    use chrono::Utc;

    fn active(store: &InMemoryStore) -> Vec<Memo> {
        load_collection(store, StoreKey::Memos).unwrap()
    }

    #[test]
    fn lifecycle_scenario() {
        let mut store = InMemoryStore::new();

        create::run(
            &mut store,
            NewMemo::new("A", "x").with_category(Category::Work),
        )
        .unwrap();
        let memos = active(&store);
        assert_eq!(memos.len(), 1);
        assert_eq!(memos[0].created_at, memos[0].updated_at);
        let created = memos[0].clone();

        let patch = MemoPatch {
            content: Some("y".into()),
            ..Default::default()
        };
        update::run(&mut store, created.id, &patch).unwrap();
        let updated = active(&store).remove(0);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        delete::run(&mut store, created.id).unwrap();
        assert!(active(&store).is_empty());
        let trash: Vec<DeletedMemo> = load_collection(&store, StoreKey::Trash).unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].original_id, created.id);
        let trash_id = trash[0].memo.id;
        assert_ne!(trash_id, created.id);

        from_trash(&mut store, trash_id).unwrap();
        let restored = active(&store);
        assert_eq!(restored.len(), 1);
        assert_ne!(restored[0].id, created.id);
        assert_ne!(restored[0].id, trash_id);
        assert_eq!(restored[0].content, "y");
        assert_eq!(restored[0].category, Some(Category::Work));

        let raw = store.load(StoreKey::Memos).unwrap().unwrap();
        assert!(!raw.contains("deletedAt"));
        assert!(!raw.contains("originalId"));

        let trash: Vec<DeletedMemo> = load_collection(&store, StoreKey::Trash).unwrap();
        assert!(trash.is_empty());
    }

    #[test]
    fn trash_round_trip_preserves_fields() {
        let mut store = InMemoryStore::new();
        let memo = create::run(
            &mut store,
            NewMemo::new("T", "body")
                .with_category(Category::Ideas)
                .with_tags(["a", "b"])
                .pinned(),
        )
        .unwrap()
        .affected_memos
        .remove(0);

        let trash_id = delete::run(&mut store, memo.id).unwrap().trashed[0].memo.id;
        let restored = from_trash(&mut store, trash_id).unwrap().affected_memos[0].clone();

        assert_eq!(restored.title, memo.title);
        assert_eq!(restored.content, memo.content);
        assert_eq!(restored.category, memo.category);
        assert_eq!(restored.tags, memo.tags);
        assert_eq!(restored.is_pinned, memo.is_pinned);
        assert_ne!(restored.id, memo.id);
        assert_ne!(restored.id, trash_id);
    }

    #[test]
    fn restores_from_archive() {
        let mut fixture = StoreFixture::new().with_memo("A", "x");
        let id = active(&fixture.store)[0].id;
        let archive_id = archive::run(&mut fixture.store, id).unwrap().archived[0].memo.id;

        from_archive(&mut fixture.store, archive_id).unwrap();

        let archive: Vec<ArchivedMemo> =
            load_collection(&fixture.store, StoreKey::Archive).unwrap();
        assert!(archive.is_empty());
        let memos = active(&fixture.store);
        assert_eq!(memos.len(), 1);
        assert_ne!(memos[0].id, archive_id);
    }

    #[test]
    fn missing_held_id_is_not_found() {
        let mut fixture = StoreFixture::new()
            .with_archived_memo("A")
            .with_trashed_memo("B", Utc::now());
        assert!(matches!(
            from_archive(&mut fixture.store, MemoId(1)),
            Err(MemozError::MemoNotFound(MemoId(1)))
        ));
        assert!(matches!(
            from_trash(&mut fixture.store, MemoId(1)),
            Err(MemozError::MemoNotFound(MemoId(1)))
        ));
        assert!(active(&fixture.store).is_empty());
    }
}
