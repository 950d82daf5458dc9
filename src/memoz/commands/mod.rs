//! # Command Layer
//!
//! Business logic for each memoz operation. Every command is a free function
//! generic over [`DataStore`](crate::store::DataStore), so the same code runs
//! against files in production and [`InMemoryStore`](crate::store::memory::InMemoryStore)
//! in tests.
//!
//! ## Snapshot Discipline
//!
//! A command loads the collections it needs, changes its own copies, and
//! writes each changed collection back once. A failure before the write leaves
//! the store as it was; there is no partially applied bulk operation.
//!
//! When a move touches two collections, the destination is written first.
//! If the second write fails the record exists twice rather than zero times.

use crate::model::{ArchivedMemo, DeletedMemo, Memo, SharedMemo};

pub mod archive;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod pinning;
pub mod purge;
pub mod restore;
pub mod share;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Memos created or changed by the command, as they are after it.
    pub affected_memos: Vec<Memo>,
    /// The list view, for read commands.
    pub listed_memos: Vec<Memo>,
    pub archived: Vec<ArchivedMemo>,
    pub trashed: Vec<DeletedMemo>,
    pub shares: Vec<SharedMemo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_memos(mut self, memos: Vec<Memo>) -> Self {
        self.affected_memos = memos;
        self
    }

    pub fn with_listed_memos(mut self, memos: Vec<Memo>) -> Self {
        self.listed_memos = memos;
        self
    }

    pub fn with_archived(mut self, archived: Vec<ArchivedMemo>) -> Self {
        self.archived = archived;
        self
    }

    pub fn with_trashed(mut self, trashed: Vec<DeletedMemo>) -> Self {
        self.trashed = trashed;
        self
    }

    pub fn with_shares(mut self, shares: Vec<SharedMemo>) -> Self {
        self.shares = shares;
        self
    }
}
