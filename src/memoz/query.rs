//! # Query Engine
//!
//! Turns the active collection into the list a user sees: filter, then sort
//! with pinned memos first. [`Selection`] tracks bulk-selected ids against
//! whatever is currently visible.
//!
//! ```text
//! memos ──filter(search, category, tag)──▶ sort(field, direction, pinned first) ──▶ view
//! ```
//!
//! [`apply`] borrows its input and never mutates it. It is cheap enough to
//! recompute from scratch whenever any input changes.
//!
//! ## Ordering Rules
//!
//! - Pinned memos precede unpinned ones, whatever the direction.
//! - Within each group, memos compare by the chosen field. Dates compare as
//!   instants, titles case-insensitively, and a missing category sorts as the
//!   empty string (lowest).
//! - Ties keep the order they had after filtering (the sort is stable).

use crate::model::{Category, Memo, MemoId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(*wanted),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Category,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Category => "category",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "title" => Ok(SortField::Title),
            "category" => Ok(SortField::Category),
            "createdat" | "created" => Ok(SortField::CreatedAt),
            "updatedat" | "updated" => Ok(SortField::UpdatedAt),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Everything the list view is computed from, besides the memos themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub tag: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl MemoQuery {
    pub fn matches(&self, memo: &Memo) -> bool {
        matches_search(memo, &self.search)
            && self.category.accepts(memo.category)
            && matches_tag(memo, &self.tag)
    }
}

fn matches_search(memo: &Memo, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    memo.title.to_lowercase().contains(&needle) || memo.content.to_lowercase().contains(&needle)
}

fn matches_tag(memo: &Memo, tag: &str) -> bool {
    if tag.is_empty() {
        return true;
    }
    let needle = tag.to_lowercase();
    memo.tags
        .iter()
        .any(|t| t.to_lowercase().contains(&needle))
}

fn compare_field(a: &Memo, b: &Memo, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Category => category_key(a).cmp(category_key(b)),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

fn category_key(memo: &Memo) -> &'static str {
    memo.category.map(|c| c.as_str()).unwrap_or("")
}

/// Orders memos in place: pinned first, then by field and direction.
pub fn sort_memos(memos: &mut [&Memo], field: SortField, direction: SortDirection) {
    memos.sort_by(|a, b| {
        b.is_pinned.cmp(&a.is_pinned).then_with(|| {
            let ord = compare_field(a, b, field);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        })
    });
}

/// Filters and sorts `memos` into the visible list.
pub fn apply<'a>(memos: &'a [Memo], query: &MemoQuery) -> Vec<&'a Memo> {
    let mut visible: Vec<&Memo> = memos.iter().filter(|m| query.matches(m)).collect();
    sort_memos(&mut visible, query.sort_field, query.direction);
    visible
}

/// Bulk-selection state for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<MemoId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: MemoId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds or removes a single id, leaving the rest alone.
    pub fn toggle(&mut self, id: MemoId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Selects exactly the visible memos.
    pub fn select_all(&mut self, visible: &[&Memo]) {
        self.ids = visible.iter().map(|m| m.id).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn all_selected(&self, visible: &[&Memo]) -> bool {
        !visible.is_empty() && visible.iter().all(|m| self.ids.contains(&m.id))
    }

    /// The "select all" checkbox: selects every visible memo, or clears the
    /// selection when they are all selected already.
    pub fn toggle_all(&mut self, visible: &[&Memo]) {
        if self.all_selected(visible) {
            self.clear();
        } else {
            self.select_all(visible);
        }
    }

    /// Selected memos among `visible`, in view order.
    pub fn selected_from<'a>(&self, visible: &[&'a Memo]) -> Vec<&'a Memo> {
        visible
            .iter()
            .copied()
            .filter(|m| self.ids.contains(&m.id))
            .collect()
    }

    pub fn ids(&self) -> Vec<MemoId> {
        let mut ids: Vec<MemoId> = self.ids.iter().copied().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<MemoId> for Selection {
    fn from_iter<I: IntoIterator<Item = MemoId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewMemo;
    use chrono::{Duration, Utc};

    fn memo(title: &str, content: &str, days_ago: i64) -> Memo {
        let mut m = Memo::new(NewMemo::new(title, content));
        m.created_at = Utc::now() - Duration::days(days_ago);
        m.updated_at = m.created_at;
        m
    }

    fn sample() -> Vec<Memo> {
        let mut a = memo("Alpha", "groceries list", 5);
        a.category = Some(Category::Personal);
        a.tags = vec!["Shopping".into()];
        let mut b = memo("bravo", "quarterly report", 3);
        b.category = Some(Category::Work);
        b.tags = vec!["reports".into(), "q3".into()];
        b.is_pinned = true;
        let c = memo("Charlie", "random idea", 1);
        let mut d = memo("delta", "another Report draft", 10);
        d.category = Some(Category::Work);
        d.is_pinned = true;
        vec![a, b, c, d]
    }

    fn titles(view: &[&Memo]) -> Vec<String> {
        view.iter().map(|m| m.title.clone()).collect()
    }

    #[test]
    fn empty_query_keeps_everything() {
        let memos = sample();
        assert_eq!(apply(&memos, &MemoQuery::default()).len(), 4);
    }

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let memos = sample();
        let query = MemoQuery {
            search: "REPORT".into(),
            ..Default::default()
        };
        let mut found = titles(&apply(&memos, &query));
        found.sort();
        assert_eq!(found, vec!["bravo", "delta"]);

        let query = MemoQuery {
            search: "alp".into(),
            ..Default::default()
        };
        assert_eq!(titles(&apply(&memos, &query)), vec!["Alpha"]);
    }

    #[test]
    fn category_and_tag_filters_combine() {
        let memos = sample();
        let query = MemoQuery {
            category: CategoryFilter::Only(Category::Work),
            tag: "REP".into(),
            ..Default::default()
        };
        assert_eq!(titles(&apply(&memos, &query)), vec!["bravo"]);

        let query = MemoQuery {
            tag: "shop".into(),
            ..Default::default()
        };
        assert_eq!(titles(&apply(&memos, &query)), vec!["Alpha"]);
    }

    #[test]
    fn memos_without_tags_fail_a_tag_filter() {
        let memos = sample();
        let query = MemoQuery {
            tag: "x".into(),
            ..Default::default()
        };
        assert!(apply(&memos, &query).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let memos = sample();
        let query = MemoQuery {
            search: "r".into(),
            ..Default::default()
        };
        let once: Vec<Memo> = apply(&memos, &query).into_iter().cloned().collect();
        let twice: Vec<Memo> = apply(&once, &query).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn pinned_first_for_every_field_and_direction() {
        let memos = sample();
        for field in [
            SortField::Title,
            SortField::Category,
            SortField::CreatedAt,
            SortField::UpdatedAt,
        ] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let query = MemoQuery {
                    sort_field: field,
                    direction,
                    ..Default::default()
                };
                let view = apply(&memos, &query);
                let first_unpinned = view.iter().position(|m| !m.is_pinned).unwrap();
                assert!(
                    view[first_unpinned..].iter().all(|m| !m.is_pinned),
                    "{field} {direction}"
                );
            }
        }
    }

    #[test]
    fn reversing_direction_reverses_each_partition() {
        let memos = sample();
        for field in [SortField::Title, SortField::CreatedAt, SortField::UpdatedAt] {
            let asc = apply(
                &memos,
                &MemoQuery {
                    sort_field: field,
                    direction: SortDirection::Asc,
                    ..Default::default()
                },
            );
            let desc = apply(
                &memos,
                &MemoQuery {
                    sort_field: field,
                    direction: SortDirection::Desc,
                    ..Default::default()
                },
            );
            for pinned in [true, false] {
                let a: Vec<_> = asc.iter().filter(|m| m.is_pinned == pinned).collect();
                let mut d: Vec<_> = desc.iter().filter(|m| m.is_pinned == pinned).collect();
                d.reverse();
                assert_eq!(a, d);
            }
        }
    }

    #[test]
    fn title_sort_ignores_case() {
        let memos = sample();
        let view = apply(
            &memos,
            &MemoQuery {
                sort_field: SortField::Title,
                direction: SortDirection::Asc,
                ..Default::default()
            },
        );
        assert_eq!(titles(&view), vec!["bravo", "delta", "Alpha", "Charlie"]);
    }

    #[test]
    fn missing_category_sorts_lowest() {
        let memos = sample();
        let view = apply(
            &memos,
            &MemoQuery {
                sort_field: SortField::Category,
                direction: SortDirection::Asc,
                ..Default::default()
            },
        );
        // Unpinned partition: Charlie (none) before Alpha (personal).
        assert_eq!(titles(&view[2..]), vec!["Charlie", "Alpha"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut memos = sample();
        for m in memos.iter_mut() {
            m.is_pinned = false;
            m.category = Some(Category::Ideas);
        }
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let view = apply(
                &memos,
                &MemoQuery {
                    sort_field: SortField::Category,
                    direction,
                    ..Default::default()
                },
            );
            assert_eq!(titles(&view), vec!["Alpha", "bravo", "Charlie", "delta"]);
        }
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let memos = sample();
        let before = memos.clone();
        let _ = apply(
            &memos,
            &MemoQuery {
                sort_field: SortField::Title,
                ..Default::default()
            },
        );
        assert_eq!(memos, before);
    }

    #[test]
    fn selection_toggle_and_select_all() {
        let memos = sample();
        let query = MemoQuery {
            category: CategoryFilter::Only(Category::Work),
            ..Default::default()
        };
        let visible = apply(&memos, &query);

        let mut selection = Selection::new();
        selection.toggle(memos[0].id);
        selection.toggle(memos[2].id);
        selection.toggle(memos[0].id);
        assert_eq!(selection.ids(), vec![memos[2].id]);

        selection.select_all(&visible);
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(memos[2].id));
        assert!(selection.all_selected(&visible));

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn selected_from_follows_view_order() {
        let memos = sample();
        let view = apply(&memos, &MemoQuery::default());
        let selection: Selection = [memos[3].id, memos[0].id].into_iter().collect();
        let picked = selection.selected_from(&view);
        let expected: Vec<MemoId> = view
            .iter()
            .filter(|m| m.id == memos[3].id || m.id == memos[0].id)
            .map(|m| m.id)
            .collect();
        assert_eq!(picked.iter().map(|m| m.id).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn parse_filters() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "ideas".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Ideas))
        );
        assert_eq!("created-at".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("updatedAt".parse::<SortField>(), Ok(SortField::UpdatedAt));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
