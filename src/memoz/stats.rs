//! # Statistics
//!
//! Read-only aggregation over the active collection: counts, averages,
//! recent-activity windows, tag rankings and a trailing monthly histogram.
//! [`insights`] turns the numbers into short sentences for display.
//!
//! `now` is a parameter so results are reproducible. Month buckets follow the
//! local calendar; the 7- and 30-day windows are plain durations.

use crate::model::{Category, Memo};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};

pub const TOP_TAGS: usize = 5;
pub const HISTOGRAM_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoStatistics {
    pub total_memos: usize,
    pub total_pinned: usize,
    /// Every category, zero-filled.
    pub category_counts: BTreeMap<Category, usize>,
    /// Only tags that occur, in first-seen order.
    pub tag_counts: Vec<TagCount>,
    pub average_content_length: usize,
    pub created_last_7_days: usize,
    pub created_last_30_days: usize,
    pub most_used_tags: Vec<TagCount>,
    /// Current month first, then the eleven before it.
    pub memos_by_month: Vec<MonthCount>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MemoStatistics {
    pub fn category_count(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

pub fn calculate(memos: &[Memo], now: DateTime<Local>) -> MemoStatistics {
    let now_utc = now.with_timezone(&Utc);
    let week_ago = now_utc - Duration::days(7);
    let month_ago = now_utc - Duration::days(30);

    let mut category_counts: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|c| (*c, 0)).collect();
    let mut tag_counts: Vec<TagCount> = Vec::new();
    let mut tag_index: HashMap<String, usize> = HashMap::new();

    let months = trailing_months(now.date_naive());
    let mut month_counts = vec![0usize; months.len()];

    let mut total_chars = 0usize;
    let mut total_pinned = 0;
    let mut created_last_7_days = 0;
    let mut created_last_30_days = 0;
    let mut last_updated: Option<DateTime<Utc>> = None;

    for memo in memos {
        if let Some(category) = memo.category {
            *category_counts.entry(category).or_insert(0) += 1;
        }

        for tag in &memo.tags {
            match tag_index.get(tag) {
                Some(&i) => tag_counts[i].count += 1,
                None => {
                    tag_index.insert(tag.clone(), tag_counts.len());
                    tag_counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }

        total_chars += memo.content.chars().count();
        if memo.is_pinned {
            total_pinned += 1;
        }

        if memo.created_at >= week_ago {
            created_last_7_days += 1;
        }
        if memo.created_at >= month_ago {
            created_last_30_days += 1;
        }

        let key = month_key(memo.created_at.with_timezone(&Local).date_naive());
        if let Some(i) = months.iter().position(|m| *m == key) {
            month_counts[i] += 1;
        }

        if last_updated.map_or(true, |last| memo.updated_at > last) {
            last_updated = Some(memo.updated_at);
        }
    }

    let average_content_length = if memos.is_empty() {
        0
    } else {
        (total_chars as f64 / memos.len() as f64).round() as usize
    };

    // Stable sort keeps first-seen order among equal counts.
    let mut most_used_tags = tag_counts.clone();
    most_used_tags.sort_by(|a, b| b.count.cmp(&a.count));
    most_used_tags.truncate(TOP_TAGS);

    let memos_by_month = months
        .into_iter()
        .zip(month_counts)
        .map(|(month, count)| MonthCount { month, count })
        .collect();

    MemoStatistics {
        total_memos: memos.len(),
        total_pinned,
        category_counts,
        tag_counts,
        average_content_length,
        created_last_7_days,
        created_last_30_days,
        most_used_tags,
        memos_by_month,
        last_updated,
    }
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `YYYY-MM` keys for the month of `today` and the preceding eleven, newest
/// first.
fn trailing_months(today: NaiveDate) -> Vec<String> {
    let mut year = today.year();
    let mut month = today.month();
    let mut keys = Vec::with_capacity(HISTOGRAM_MONTHS as usize);
    for _ in 0..HISTOGRAM_MONTHS {
        keys.push(format!("{:04}-{:02}", year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    keys
}

/// Human-readable observations, in a fixed order. Lines whose figure is zero
/// are left out.
pub fn insights(stats: &MemoStatistics) -> Vec<String> {
    let mut lines = Vec::new();

    let mut top: Option<(Category, usize)> = None;
    for (category, count) in &stats.category_counts {
        if top.map_or(true, |(_, best)| *count > best) {
            top = Some((*category, *count));
        }
    }
    if let Some((category, count)) = top.filter(|(_, count)| *count > 0) {
        lines.push(format!(
            "Most used category is \"{}\" ({} memos)",
            category.label(),
            count
        ));
    }

    if stats.created_last_7_days > 0 {
        lines.push(format!(
            "{} memo(s) written in the last 7 days",
            stats.created_last_7_days
        ));
    }

    if stats.average_content_length > 0 {
        lines.push(format!(
            "Average memo length is {} characters",
            stats.average_content_length
        ));
    }

    if let Some(top_tag) = stats.most_used_tags.first() {
        lines.push(format!("Most used tag is \"#{}\"", top_tag.tag));
    }

    if stats.total_memos > 0 {
        let ratio = (stats.total_pinned as f64 / stats.total_memos as f64 * 100.0).round();
        lines.push(format!("{}% of memos are pinned", ratio as u64));
    }

    lines
}
