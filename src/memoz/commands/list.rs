use crate::commands::CmdResult;
use crate::error::{MemozError, Result};
use crate::model::MemoId;
use crate::query::{self, MemoQuery};
use crate::search::parse_query;
use crate::store::DataStore;

use super::helpers::{load_active, load_archive, load_trash};

/// The active collection as the list view shows it for `query`.
pub fn run<S: DataStore>(store: &S, query: &MemoQuery) -> Result<CmdResult> {
    let memos = load_active(store)?;
    let visible = query::apply(&memos, query)
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_memos(visible))
}

/// Like [`run`], but `text` uses the search syntax (`"exact phrase"`,
/// `-exclude`) and is matched against title and content together.
pub fn search<S: DataStore>(store: &S, text: &str, query: &MemoQuery) -> Result<CmdResult> {
    let parsed = parse_query(text);
    let memos = load_active(store)?;
    let visible = query::apply(&memos, query)
        .into_iter()
        .filter(|m| parsed.matches(&format!("{}\n{}", m.title, m.content)))
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_memos(visible))
}

/// One active memo.
pub fn view<S: DataStore>(store: &S, id: MemoId) -> Result<CmdResult> {
    let memo = load_active(store)?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(MemozError::MemoNotFound(id))?;
    Ok(CmdResult::default().with_listed_memos(vec![memo]))
}

/// Archived records, most recently archived first.
pub fn archived<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut archive = load_archive(store)?;
    archive.sort_by(|a, b| b.archived_at.cmp(&a.archived_at));
    Ok(CmdResult::default().with_archived(archive))
}

/// Trash entries, most recently deleted first.
pub fn trashed<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut trash = load_trash(store)?;
    trash.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    Ok(CmdResult::default().with_trashed(trash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::query::{CategoryFilter, SortDirection, SortField};
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::{Duration, Utc};

    #[test]
    fn lists_filtered_and_pinned_first() {
        let fixture = StoreFixture::new()
            .with_categorized_memo("Budget", Category::Work)
            .with_categorized_memo("Groceries", Category::Personal)
            .with_pinned_memo("Standup");

        let query = MemoQuery {
            sort_field: SortField::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let titles: Vec<_> = run(&fixture.store, &query)
            .unwrap()
            .listed_memos
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Standup", "Budget", "Groceries"]);

        let query = MemoQuery {
            category: CategoryFilter::Only(Category::Work),
            ..Default::default()
        };
        let result = run(&fixture.store, &query).unwrap();
        assert_eq!(result.listed_memos.len(), 1);
        assert_eq!(result.listed_memos[0].title, "Budget");
    }

    #[test]
    fn search_uses_query_syntax() {
        let fixture = StoreFixture::new()
            .with_memo("Budget draft", "next quarter numbers")
            .with_memo("Budget final", "next quarter numbers")
            .with_memo("Holiday", "next week");

        let result = search(&fixture.store, r#""next quarter" -draft"#, &MemoQuery::default()).unwrap();
        assert_eq!(result.listed_memos.len(), 1);
        assert_eq!(result.listed_memos[0].title, "Budget final");
    }

    #[test]
    fn empty_store_lists_nothing() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.store, &MemoQuery::default()).unwrap();
        assert!(result.listed_memos.is_empty());
    }

    #[test]
    fn view_missing_is_not_found() {
        let fixture = StoreFixture::new().with_memos(1);
        assert!(view(&fixture.store, MemoId(2)).unwrap_err().is_not_found());
    }

    #[test]
    fn trash_lists_newest_first() {
        let now = Utc::now();
        let fixture = StoreFixture::new()
            .with_trashed_memo("older", now - Duration::days(2))
            .with_trashed_memo("newer", now - Duration::hours(1));

        let titles: Vec<_> = trashed(&fixture.store)
            .unwrap()
            .trashed
            .into_iter()
            .map(|d| d.memo.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[test]
    fn archive_lists_records() {
        let fixture = StoreFixture::new()
            .with_archived_memo("one")
            .with_archived_memo("two");
        assert_eq!(archived(&fixture.store).unwrap().archived.len(), 2);
    }
}
