//! JSON and CSV export.
//!
//! Formatting is pure (`to_json`, `to_csv`); [`run`] reads the active
//! collection and names the document. Writing the file is the caller's job.

use crate::error::{MemozError, Result};
use crate::model::{Memo, MemoId};
use crate::store::DataStore;
use chrono::{Local, NaiveDate, SecondsFormat};
use std::fmt;
use std::str::FromStr;

use super::helpers::load_active;

const CSV_HEADER: &str = "ID,Title,Content,Category,Tags,Pinned,Created At,Updated At";
const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub content: String,
    pub memo_count: usize,
}

pub fn to_json(memos: &[Memo]) -> Result<String> {
    serde_json::to_string_pretty(memos).map_err(MemozError::Serialization)
}

/// CSV with a byte-order mark, for spreadsheet tools that guess encodings.
pub fn to_csv(memos: &[Memo]) -> String {
    let mut lines = Vec::with_capacity(memos.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(memos.iter().map(csv_row));

    let mut out = String::new();
    out.push(BYTE_ORDER_MARK);
    out.push_str(&lines.join("\n"));
    out
}

fn csv_row(memo: &Memo) -> String {
    [
        memo.id.to_string(),
        quote(&memo.title),
        quote(&memo.content),
        memo.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
        quote(&memo.tags.join(", ")),
        if memo.is_pinned { "Yes" } else { "No" }.to_string(),
        memo.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        memo.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
    .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("memos_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

pub fn document(memos: &[Memo], format: ExportFormat, date: NaiveDate) -> Result<ExportDocument> {
    let content = match format {
        ExportFormat::Json => to_json(memos)?,
        ExportFormat::Csv => to_csv(memos),
    };
    Ok(ExportDocument {
        filename: filename(format, date),
        content,
        memo_count: memos.len(),
    })
}

/// Exports the active collection, or only the memos in `ids` when it is not
/// empty. Selected memos keep their collection order; unknown ids are ignored.
pub fn run<S: DataStore>(store: &S, format: ExportFormat, ids: &[MemoId]) -> Result<ExportDocument> {
    let memos = load_active(store)?;
    let selected: Vec<Memo> = if ids.is_empty() {
        memos
    } else {
        memos.into_iter().filter(|m| ids.contains(&m.id)).collect()
    };
    document(&selected, format, Local::now().date_naive())
}
