//! Shared-link registry.
//!
//! A share is a copy of a memo under a random opaque id. Expiry is lazy: an
//! expired share is only removed when someone tries to open it (or when
//! [`cleanup_expired`] runs).

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MemozError, Result};
use crate::model::{MemoId, SharedMemo};
use crate::store::DataStore;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::helpers::{load_active, load_shares, save_shares};

/// Shares a copy of memo `id`, optionally expiring after `expires_in_days`.
pub fn create<S: DataStore>(
    store: &mut S,
    id: MemoId,
    expires_in_days: Option<i64>,
) -> Result<CmdResult> {
    if let Some(days) = expires_in_days {
        if days < 0 {
            return Err(MemozError::Validation(
                "Expiry must be zero or more days".into(),
            ));
        }
    }

    let memo = load_active(store)?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(MemozError::MemoNotFound(id))?;

    let now = Utc::now();
    let share = SharedMemo {
        id: Uuid::new_v4().simple().to_string(),
        memo,
        shared_at: now,
        expires_at: expires_in_days.map(|days| now + Duration::days(days)),
        access_count: 0,
        is_public: true,
    };

    let mut shares = load_shares(store)?;
    shares.push(share.clone());
    save_shares(store, &shares)?;
    tracing::debug!(id = %id, share = %share.id, "share created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Share link created: {}",
        share.link()
    )));
    Ok(result.with_shares(vec![share]))
}

/// Opens a share, counting the access. An expired share is removed and
/// reported as not found.
pub fn access<S: DataStore>(store: &mut S, share_id: &str) -> Result<CmdResult> {
    access_at(store, share_id, Utc::now())
}

fn access_at<S: DataStore>(store: &mut S, share_id: &str, now: DateTime<Utc>) -> Result<CmdResult> {
    let mut shares = load_shares(store)?;
    let pos = shares
        .iter()
        .position(|s| s.id == share_id)
        .ok_or_else(|| MemozError::ShareNotFound(share_id.to_string()))?;

    if shares[pos].is_expired_at(now) {
        shares.remove(pos);
        save_shares(store, &shares)?;
        tracing::warn!(share = %share_id, "expired share removed on access");
        return Err(MemozError::ShareNotFound(share_id.to_string()));
    }

    shares[pos].access_count += 1;
    let share = shares[pos].clone();
    save_shares(store, &shares)?;

    Ok(CmdResult::default().with_shares(vec![share]))
}

/// Every registered share, expired ones included.
pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut shares = load_shares(store)?;
    shares.sort_by(|a, b| b.shared_at.cmp(&a.shared_at));
    Ok(CmdResult::default().with_shares(shares))
}

pub fn revoke<S: DataStore>(store: &mut S, share_id: &str) -> Result<CmdResult> {
    let mut shares = load_shares(store)?;
    let pos = shares
        .iter()
        .position(|s| s.id == share_id)
        .ok_or_else(|| MemozError::ShareNotFound(share_id.to_string()))?;
    let removed = shares.remove(pos);
    save_shares(store, &shares)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Share revoked: {} ({})",
        removed.id, removed.memo.title
    )));
    Ok(result.with_shares(vec![removed]))
}

/// Removes every share whose expiry has passed.
pub fn cleanup_expired<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    cleanup_expired_at(store, Utc::now())
}

fn cleanup_expired_at<S: DataStore>(store: &mut S, now: DateTime<Utc>) -> Result<CmdResult> {
    let shares = load_shares(store)?;
    let (expired, live): (Vec<_>, Vec<_>) =
        shares.into_iter().partition(|s| s.is_expired_at(now));

    let mut result = CmdResult::default();
    if expired.is_empty() {
        result.add_message(CmdMessage::info("No expired shares."));
        return Ok(result);
    }

    save_shares(store, &live)?;
    tracing::info!(count = expired.len(), "expired shares removed");
    result.add_message(CmdMessage::success(format!(
        "Removed {} expired share(s).",
        expired.len()
    )));
    Ok(result.with_shares(expired))
}
