use crate::error::{MemozError, Result};
use crate::model::{ArchivedMemo, DeletedMemo, HeldMemo, Memo, MemoId, SharedMemo};
use crate::store::{load_collection, save_collection, DataStore, StoreKey};
use chrono::{DateTime, Duration, Utc};

/// Trash entries are kept this long after deletion.
pub const TRASH_RETENTION_DAYS: i64 = 30;

pub fn load_active<S: DataStore>(store: &S) -> Result<Vec<Memo>> {
    load_collection(store, StoreKey::Memos)
}

pub fn save_active<S: DataStore>(store: &mut S, memos: &[Memo]) -> Result<()> {
    save_collection(store, StoreKey::Memos, memos)
}

pub fn load_archive<S: DataStore>(store: &S) -> Result<Vec<ArchivedMemo>> {
    load_collection(store, StoreKey::Archive)
}

pub fn save_archive<S: DataStore>(store: &mut S, archive: &[ArchivedMemo]) -> Result<()> {
    save_collection(store, StoreKey::Archive, archive)
}

pub fn load_trash<S: DataStore>(store: &S) -> Result<Vec<DeletedMemo>> {
    load_collection(store, StoreKey::Trash)
}

pub fn load_shares<S: DataStore>(store: &S) -> Result<Vec<SharedMemo>> {
    load_collection(store, StoreKey::SharedLinks)
}

pub fn save_shares<S: DataStore>(store: &mut S, shares: &[SharedMemo]) -> Result<()> {
    save_collection(store, StoreKey::SharedLinks, shares)
}

/// Writes the trash after dropping entries past the retention window.
/// Every trash write goes through here.
pub fn save_trash<S: DataStore>(store: &mut S, trash: &mut Vec<DeletedMemo>) -> Result<()> {
    let purged = cleanup_expired_trash(trash, Utc::now());
    if purged > 0 {
        tracing::info!(purged, "expired trash entries removed");
    }
    save_collection(store, StoreKey::Trash, trash)
}

/// Removes entries deleted `TRASH_RETENTION_DAYS` or more before `now`.
/// Returns how many were removed.
pub fn cleanup_expired_trash(trash: &mut Vec<DeletedMemo>, now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::days(TRASH_RETENTION_DAYS);
    let before = trash.len();
    trash.retain(|entry| entry.deleted_at > cutoff);
    before - trash.len()
}

/// Removes and returns the active memo with `id`.
pub fn take_memo(memos: &mut Vec<Memo>, id: MemoId) -> Result<Memo> {
    let pos = memos
        .iter()
        .position(|m| m.id == id)
        .ok_or(MemozError::MemoNotFound(id))?;
    Ok(memos.remove(pos))
}

pub fn find_memo_mut(memos: &mut [Memo], id: MemoId) -> Result<&mut Memo> {
    memos
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(MemozError::MemoNotFound(id))
}

/// Removes and returns the held record with `id` from the archive or trash.
pub fn take_held<T: HeldMemo>(held: &mut Vec<T>, id: MemoId) -> Result<T> {
    let pos = held
        .iter()
        .position(|h| h.id() == id)
        .ok_or(MemozError::MemoNotFound(id))?;
    Ok(held.remove(pos))
}
