//! # Domain Model
//!
//! This module defines the records memoz keeps: [`Memo`] and the wrappers that
//! carry a memo through its other states ([`ArchivedMemo`], [`DeletedMemo`],
//! [`SharedMemo`]).
//!
//! ## One Record, Explicit Wrappers
//!
//! A memo is always the same record. Moving it somewhere else wraps it with
//! only the fields that state needs:
//!
//! ```text
//! Memo ──archive──▶ ArchivedMemo { memo, original_id, archived_at }
//!      ──delete───▶ DeletedMemo  { memo, original_id, deleted_at }
//!      ──share────▶ SharedMemo   { id, memo, shared_at, expires_at, ... }
//! ```
//!
//! The wrapped memo is flattened when serialized, so an archived record reads
//! as a memo with two extra keys.
//!
//! ## Ids
//!
//! Each collection (active, archive, trash) is its own id space. Every move
//! mints a fresh id for the moved record; `original_id` is a breadcrumb back
//! to the id the record had before, never a lookup key.
//!
//! Ids are `millis * 1024 + random tiebreak`, forced strictly above the last
//! id minted in this process. They stay below 2^53 so exported files survive
//! tools that read JSON numbers as doubles.
//!
//! ## Wire Format
//!
//! Field names are camelCase and timestamps are RFC 3339 strings, matching
//! the JSON export file. `tags` and `isPinned` may be absent; absent tags and
//! an empty list are the same thing.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{MemozError, Result};

pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 1000;

const ID_TIEBREAK_SPAN: u64 = 1024;

static LAST_MINTED_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(pub u64);

impl MemoId {
    /// Mints a new id, unique within this process even when called several
    /// times in the same millisecond.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        let tiebreak = rand::thread_rng().gen_range(0..ID_TIEBREAK_SPAN);
        let candidate = millis * ID_TIEBREAK_SPAN + tiebreak;

        let mut last = LAST_MINTED_ID.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(last + 1);
            match LAST_MINTED_ID.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return MemoId(next),
                Err(actual) => last = actual,
            }
        }
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemoId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(MemoId)
            .map_err(|_| format!("Invalid memo id: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Ideas,
    Todo,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Ideas,
        Category::Todo,
        Category::Other,
    ];

    /// Stable lowercase name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Ideas => "ideas",
            Category::Todo => "todo",
            Category::Other => "other",
        }
    }

    /// Human-readable name for printouts and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Ideas => "Ideas",
            Category::Todo => "To-do",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    pub fn new(draft: NewMemo) -> Self {
        let now = Utc::now();
        Self {
            id: MemoId::generate(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            is_pinned: draft.is_pinned,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`. The new value is strictly later than the old
    /// one, even if the clock has not advanced.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Same memo under a freshly minted id.
    pub fn with_new_id(mut self) -> Self {
        self.id = MemoId::generate();
        self
    }
}

/// A creatable memo: everything but the id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemo {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

impl NewMemo {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

/// A partial edit. `None` leaves a field untouched; `category: Some(None)`
/// clears the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Option<Category>>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
}

impl MemoPatch {
    pub fn is_empty(&self) -> bool {
        self == &MemoPatch::default()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }

    /// Merges the set fields into `memo`. Timestamps are the caller's job.
    pub fn apply_to(&self, memo: &mut Memo) {
        if let Some(title) = &self.title {
            memo.title = title.clone();
        }
        if let Some(content) = &self.content {
            memo.content = content.clone();
        }
        if let Some(category) = self.category {
            memo.category = category;
        }
        if let Some(tags) = &self.tags {
            memo.tags = tags.clone();
        }
        if let Some(pinned) = self.is_pinned {
            memo.is_pinned = pinned;
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(MemozError::Validation("Title cannot be empty".into()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(MemozError::Validation(format!(
            "Title is longer than {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(MemozError::Validation("Content cannot be empty".into()));
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(MemozError::Validation(format!(
            "Content is longer than {} characters",
            CONTENT_MAX_CHARS
        )));
    }
    Ok(())
}

/// Common surface of the holding wrappers, so restore can treat the archive
/// and the trash alike.
pub trait HeldMemo {
    fn id(&self) -> MemoId;
    fn into_memo(self) -> Memo;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedMemo {
    #[serde(flatten)]
    pub memo: Memo,
    pub original_id: MemoId,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedMemo {
    pub fn from_memo(memo: Memo) -> Self {
        let original_id = memo.id;
        Self {
            memo: memo.with_new_id(),
            original_id,
            archived_at: Utc::now(),
        }
    }
}

impl HeldMemo for ArchivedMemo {
    fn id(&self) -> MemoId {
        self.memo.id
    }

    fn into_memo(self) -> Memo {
        self.memo
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMemo {
    #[serde(flatten)]
    pub memo: Memo,
    pub original_id: MemoId,
    pub deleted_at: DateTime<Utc>,
}

impl DeletedMemo {
    pub fn from_memo(memo: Memo) -> Self {
        let original_id = memo.id;
        Self {
            memo: memo.with_new_id(),
            original_id,
            deleted_at: Utc::now(),
        }
    }
}

impl HeldMemo for DeletedMemo {
    fn id(&self) -> MemoId {
        self.memo.id
    }

    fn into_memo(self) -> Memo {
        self.memo
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedMemo {
    pub id: String,
    pub memo: Memo,
    pub shared_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

impl SharedMemo {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| now > expiry)
    }

    /// Application-internal fragment path for this share.
    pub fn link(&self) -> String {
        format!("#/share/{}", self.id)
    }
}
