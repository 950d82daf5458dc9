//! Built-in memo templates.
//!
//! The catalog is built for a given date so titles like the weekly to-do
//! range come out right; [`catalog_now`] uses the local clock.

use crate::error::{MemozError, Result};
use crate::model::{Category, NewMemo};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
}

impl MemoTemplate {
    /// The template as a creatable memo: no id, no timestamps, unpinned.
    pub fn to_new_memo(&self) -> NewMemo {
        NewMemo::new(self.title.clone(), self.content.clone())
            .with_category(self.category)
            .with_tags(self.tags.iter().cloned())
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// `M/D - M/D` for Monday through Sunday of the week containing `today`.
pub fn week_range(today: NaiveDate) -> String {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let sunday = monday + Duration::days(6);
    format!(
        "{}/{} - {}/{}",
        monday.month(),
        monday.day(),
        sunday.month(),
        sunday.day()
    )
}

pub fn catalog(today: NaiveDate, now: DateTime<Local>) -> Vec<MemoTemplate> {
    vec![
        MemoTemplate {
            id: "daily-journal",
            name: "Daily journal",
            description: "Wrap up the day",
            title: format!("{} Journal", today.format("%Y-%m-%d")),
            content: "## Weather\n\n\n## Mood\n\n\n## What happened today\n- \n\n\
                      ## Three things I'm grateful for\n1. \n2. \n3. \n\n\
                      ## Plans for tomorrow\n- "
                .to_string(),
            category: Category::Personal,
            tags: tags(&["journal", "daily"]),
        },
        MemoTemplate {
            id: "meeting-notes",
            name: "Meeting notes",
            description: "Record a meeting",
            title: "Meeting notes - ".to_string(),
            content: format!(
                "## Meeting info\n- **When**: {}\n- **Attendees**: \n- **Where**: \n\n\
                 ## Agenda\n1. \n\n## Discussion\n### \n\n## Decisions\n- \n\n\
                 ## Next steps\n- \n\n## Next meeting\n- **When**: \n- **Agenda**: ",
                now.format("%Y-%m-%d %H:%M")
            ),
            category: Category::Work,
            tags: tags(&["meeting", "work"]),
        },
        MemoTemplate {
            id: "project-idea",
            name: "Project idea",
            description: "Shape a new project idea",
            title: "Project idea - ".to_string(),
            content: "## Overview\n### Name\n### Purpose\n\n## Key features\n1. \n2. \n3. \n\n\
                      ## Expected impact\n- \n\n## Resources\n### People\n### Time\n### Budget\n\n\
                      ## Plan\n### Phase 1\n### Phase 2\n### Phase 3\n\n## References\n- "
                .to_string(),
            category: Category::Ideas,
            tags: tags(&["project", "idea"]),
        },
        MemoTemplate {
            id: "weekly-todo",
            name: "Weekly to-do",
            description: "Plan this week's tasks",
            title: format!("{} Weekly to-do", week_range(today)),
            content: "## Goal for the week\n\n\n## Monday\n- \n- \n\n## Tuesday\n- \n- \n\n\
                      ## Wednesday\n- \n- \n\n## Thursday\n- \n- \n\n## Friday\n- \n- \n\n\
                      ## Weekend\n- \n- \n\n## Notes\n"
                .to_string(),
            category: Category::Todo,
            tags: tags(&["todo", "weekly"]),
        },
        MemoTemplate {
            id: "book-review",
            name: "Book notes",
            description: "Notes on a book you read",
            title: "Book notes - ".to_string(),
            content: "## Book\n- **Title**: \n- **Author**: \n- **Publisher**: \n- **Read**: \n\n\
                      ## Summary\n\n\n## Favorite passages\n\n\n## My thoughts\n\n\n\
                      ## Rating\n( / 5)\n\n## Recommended for\n"
                .to_string(),
            category: Category::Personal,
            tags: tags(&["reading", "books"]),
        },
        MemoTemplate {
            id: "recipe",
            name: "Recipe",
            description: "Write down a recipe",
            title: "Recipe - ".to_string(),
            content: "## Ingredients (servings)\n- \n- \n- \n\n## Seasoning\n- \n- \n\n\
                      ## Steps\n1. \n2. \n3. \n4. \n5. \n\n\
                      ## Time\n- Prep: min\n- Cook: min\n- Total: min\n\n## Tips\n\n\n## Photos\n"
                .to_string(),
            category: Category::Personal,
            tags: tags(&["cooking", "recipe"]),
        },
    ]
}

pub fn catalog_now() -> Vec<MemoTemplate> {
    let now = Local::now();
    catalog(now.date_naive(), now)
}

pub fn find<'a>(templates: &'a [MemoTemplate], id: &str) -> Result<&'a MemoTemplate> {
    templates
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| MemozError::TemplateNotFound(id.to_string()))
}

/// The skeleton of template `id`, ready to be filled in and created.
pub fn apply_template(templates: &[MemoTemplate], id: &str) -> Result<NewMemo> {
    find(templates, id).map(MemoTemplate::to_new_memo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> Vec<MemoTemplate> {
        // A Wednesday.
        let now = Local.with_ymd_and_hms(2024, 2, 28, 9, 5, 0).unwrap();
        catalog(now.date_naive(), now)
    }

    #[test]
    fn catalog_has_six_unique_templates() {
        let templates = fixed();
        assert_eq!(templates.len(), 6);
        let mut ids: Vec<_> = templates.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn dates_are_embedded() {
        let templates = fixed();
        assert_eq!(find(&templates, "daily-journal").unwrap().title, "2024-02-28 Journal");
        assert!(find(&templates, "meeting-notes")
            .unwrap()
            .content
            .contains("2024-02-28 09:05"));
        assert_eq!(
            find(&templates, "weekly-todo").unwrap().title,
            "2/26 - 3/3 Weekly to-do"
        );
    }

    #[test]
    fn week_range_from_sunday_and_monday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(week_range(sunday), "2/26 - 3/3");
        assert_eq!(week_range(monday), "3/4 - 3/10");
    }

    #[test]
    fn apply_returns_unpinned_skeleton() {
        let draft = apply_template(&fixed(), "recipe").unwrap();
        assert_eq!(draft.title, "Recipe - ");
        assert_eq!(draft.category, Some(Category::Personal));
        assert_eq!(draft.tags, vec!["cooking", "recipe"]);
        assert!(!draft.is_pinned);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let err = apply_template(&fixed(), "nope").unwrap_err();
        assert!(matches!(err, MemozError::TemplateNotFound(_)));
    }
}
