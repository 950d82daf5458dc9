//! Import of a JSON export file.
//!
//! The whole document is parsed and checked before anything is written. Every
//! record gets a new id; timestamps are kept when they parse.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MemozError, Result};
use crate::model::{Category, Memo, NewMemo};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::helpers::{load_active, save_active};

/// One record of an import file. Unknown keys, including `id`, are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedMemo {
    title: String,
    content: String,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    updated_at: Option<Value>,
}

impl ImportedMemo {
    fn into_memo(self, now: DateTime<Utc>) -> Result<Memo> {
        let draft = NewMemo {
            title: self.title,
            content: self.content,
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            is_pinned: self.is_pinned,
        };
        draft.validate()?;

        let created_at = parse_timestamp(self.created_at.as_ref()).unwrap_or(now);
        let updated_at = parse_timestamp(self.updated_at.as_ref())
            .unwrap_or(now)
            .max(created_at);

        let mut memo = Memo::new(draft);
        memo.created_at = created_at;
        memo.updated_at = updated_at;
        Ok(memo)
    }
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = value?.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses an export document into fresh memo records.
pub fn parse(document: &str) -> Result<Vec<Memo>> {
    let records: Vec<ImportedMemo> = serde_json::from_str(document)
        .map_err(|e| MemozError::InvalidFormat(format!("Invalid JSON file format: {}", e)))?;

    let now = Utc::now();
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record.into_memo(now).map_err(|e| {
                MemozError::InvalidFormat(format!("Record {}: {}", i + 1, e))
            })
        })
        .collect()
}

/// Appends every record of `document` to the active collection, or nothing.
pub fn run<S: DataStore>(store: &mut S, document: &str) -> Result<CmdResult> {
    let imported = parse(document)?;
    let mut result = CmdResult::default();

    if imported.is_empty() {
        result.add_message(CmdMessage::info("No memos to import."));
        return Ok(result);
    }

    let mut memos = load_active(store)?;
    memos.extend(imported.iter().cloned());
    save_active(store, &memos)?;
    tracing::info!(count = imported.len(), "memos imported");

    result.add_message(CmdMessage::success(format!(
        "Imported {} memo(s).",
        imported.len()
    )));
    Ok(result.with_affected_memos(imported))
}
