//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It parses user-facing ids, picks single or bulk variants of a
//! command, and returns structured results. Business rules live in
//! `commands/*.rs`; nothing here writes to a terminal.
//!
//! `MemozApi<S: DataStore>` takes its store at construction:
//! - Production: `MemozApi<FileStore>`
//! - Testing: `MemozApi<InMemoryStore>`
//!
//! API tests check dispatch and argument handling only. Command logic is
//! tested beside each command.

use crate::commands::{self, helpers};
use crate::error::{MemozError, Result};
use crate::model::{MemoId, MemoPatch, NewMemo};
use crate::print;
use crate::query::{self, MemoQuery};
use crate::stats::{self, MemoStatistics};
use crate::store::DataStore;
use crate::templates;
use chrono::Local;

pub struct MemozApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> MemozApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_memo(&mut self, draft: NewMemo) -> Result<CmdResult> {
        commands::create::run(&mut self.store, draft)
    }

    /// Creates a memo from a built-in template, with `title` replacing the
    /// template title when given.
    pub fn create_from_template(
        &mut self,
        template_id: &str,
        title: Option<String>,
        pinned: bool,
    ) -> Result<CmdResult> {
        let mut draft = templates::apply_template(&templates::catalog_now(), template_id)?;
        if let Some(title) = title {
            draft.title = title;
        }
        draft.is_pinned = pinned;
        commands::create::run(&mut self.store, draft)
    }

    pub fn list_memos(&self, query: &MemoQuery) -> Result<CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn search_memos(&self, text: &str, query: &MemoQuery) -> Result<CmdResult> {
        commands::list::search(&self.store, text, query)
    }

    pub fn view_memo(&self, id: &str) -> Result<CmdResult> {
        commands::list::view(&self.store, parse_id(id)?)
    }

    pub fn update_memo(&mut self, id: &str, patch: &MemoPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, parse_id(id)?, patch)
    }

    pub fn pin_memo(&mut self, id: &str) -> Result<CmdResult> {
        commands::pinning::pin(&mut self.store, parse_id(id)?)
    }

    pub fn unpin_memo(&mut self, id: &str) -> Result<CmdResult> {
        commands::pinning::unpin(&mut self.store, parse_id(id)?)
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<CmdResult> {
        commands::pinning::toggle(&mut self.store, parse_id(id)?)
    }

    /// One id must exist; several ids are a bulk delete that skips unknown ones.
    pub fn delete_memos<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        match parse_ids(ids)?.as_slice() {
            [id] => commands::delete::run(&mut self.store, *id),
            ids => commands::delete::bulk(&mut self.store, ids),
        }
    }

    pub fn archive_memos<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        match parse_ids(ids)?.as_slice() {
            [id] => commands::archive::run(&mut self.store, *id),
            ids => commands::archive::bulk(&mut self.store, ids),
        }
    }

    pub fn list_archive(&self) -> Result<CmdResult> {
        commands::list::archived(&self.store)
    }

    pub fn list_trash(&self) -> Result<CmdResult> {
        commands::list::trashed(&self.store)
    }

    pub fn restore_from_archive(&mut self, id: &str) -> Result<CmdResult> {
        commands::restore::from_archive(&mut self.store, parse_id(id)?)
    }

    pub fn restore_from_trash(&mut self, id: &str) -> Result<CmdResult> {
        commands::restore::from_trash(&mut self.store, parse_id(id)?)
    }

    pub fn purge_trash(&mut self, id: &str) -> Result<CmdResult> {
        commands::purge::run(&mut self.store, parse_id(id)?)
    }

    pub fn empty_trash(&mut self) -> Result<CmdResult> {
        commands::purge::empty_trash(&mut self.store)
    }

    pub fn export_memos<I: AsRef<str>>(&self, format: ExportFormat, ids: &[I]) -> Result<ExportDocument> {
        commands::export::run(&self.store, format, &parse_ids(ids)?)
    }

    pub fn import_memos(&mut self, document: &str) -> Result<CmdResult> {
        commands::import::run(&mut self.store, document)
    }

    /// Print markup: the whole list (in `query` order) when `ids` is empty, a
    /// single memo page for one id, a selection otherwise.
    pub fn print_memos<I: AsRef<str>>(&self, query: &MemoQuery, ids: &[I]) -> Result<String> {
        let ids = parse_ids(ids)?;
        let memos = helpers::load_active(&self.store)?;
        let visible: Vec<_> = query::apply(&memos, query).into_iter().cloned().collect();

        match ids.as_slice() {
            [] => Ok(print::list_document(&visible, Local::now())),
            [id] => memos
                .iter()
                .find(|m| m.id == *id)
                .map(print::memo_document)
                .ok_or(MemozError::MemoNotFound(*id)),
            ids => Ok(print::selected_document(&visible, ids, Local::now())),
        }
    }

    pub fn share_memo(&mut self, id: &str, expires_in_days: Option<i64>) -> Result<CmdResult> {
        commands::share::create(&mut self.store, parse_id(id)?, expires_in_days)
    }

    pub fn open_share(&mut self, share_id: &str) -> Result<CmdResult> {
        commands::share::access(&mut self.store, share_id.trim_start_matches("#/share/"))
    }

    pub fn list_shares(&self) -> Result<CmdResult> {
        commands::share::list(&self.store)
    }

    pub fn revoke_share(&mut self, share_id: &str) -> Result<CmdResult> {
        commands::share::revoke(&mut self.store, share_id.trim_start_matches("#/share/"))
    }

    pub fn cleanup_shares(&mut self) -> Result<CmdResult> {
        commands::share::cleanup_expired(&mut self.store)
    }

    pub fn statistics(&self) -> Result<MemoStatistics> {
        let memos = helpers::load_active(&self.store)?;
        Ok(stats::calculate(&memos, Local::now()))
    }
}

pub fn parse_id(input: &str) -> Result<MemoId> {
    input.parse().map_err(MemozError::Validation)
}

fn parse_ids<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<MemoId>> {
    inputs.iter().map(|s| parse_id(s.as_ref())).collect()
}

pub use crate::commands::export::{ExportDocument, ExportFormat};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
