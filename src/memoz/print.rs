//! Print-ready HTML for one memo, a list, or a selection.
//!
//! Memo content is treated as a small markdown subset: headings, bold and
//! italic emphasis, bullet and numbered lists, paragraphs and line breaks.
//! Anything else the parser recognizes (raw HTML, links, images, code) is
//! written out as escaped text. Headings are demoted two levels so they sit
//! below the memo title.

use crate::model::{Memo, MemoId};
use chrono::{DateTime, Local, Utc};
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const PRINT_STYLES: &str = r#"
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif;
         font-size: 12pt; line-height: 1.6; color: #000; margin: 0; padding: 20px; }
  .memo-title { margin: 0 0 10px 0; }
  .memo-meta { display: flex; gap: 10px; font-size: 10pt; color: #666; }
  .pinned-badge, .category-badge { border: 1px solid #999; border-radius: 4px; padding: 2px 8px; }
  .memo-content { margin: 20px 0; }
  .memo-tags { font-size: 10pt; color: #666; }
  .memo-footer { margin-top: 20px; padding-top: 10px; border-top: 1px solid #ddd;
                 font-size: 9pt; color: #999; }
  .memo-item { margin-bottom: 30px; padding-bottom: 20px; border-bottom: 1px solid #ddd;
               page-break-inside: avoid; }
  .list-header { margin-bottom: 30px; padding-bottom: 10px; border-bottom: 2px solid #000; }
  .list-meta { font-size: 10pt; color: #666; }
  @media print { body { padding: 0; } .memo-item { page-break-inside: avoid; } }
"#;

/// One level down (`##` prints as h3), capped at h6.
fn demote(level: HeadingLevel) -> HeadingLevel {
    match level {
        HeadingLevel::H1 => HeadingLevel::H2,
        HeadingLevel::H2 => HeadingLevel::H3,
        HeadingLevel::H3 => HeadingLevel::H4,
        HeadingLevel::H4 => HeadingLevel::H5,
        HeadingLevel::H5 | HeadingLevel::H6 => HeadingLevel::H6,
    }
}

fn restrict(event: Event<'_>) -> Option<Event<'_>> {
    match event {
        Event::Start(Tag::Heading { level, .. }) => Some(Event::Start(Tag::Heading {
            level: demote(level),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        })),
        Event::End(TagEnd::Heading(level)) => Some(Event::End(TagEnd::Heading(demote(level)))),
        Event::Start(
            tag @ (Tag::Paragraph | Tag::Emphasis | Tag::Strong | Tag::List(_) | Tag::Item),
        ) => Some(Event::Start(tag)),
        Event::End(
            tag @ (TagEnd::Paragraph
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::List(_)
            | TagEnd::Item),
        ) => Some(Event::End(tag)),
        // Other containers are dropped; their text still comes through.
        Event::Start(_) | Event::End(_) => None,
        Event::Text(text) | Event::Code(text) | Event::Html(text) | Event::InlineHtml(text) => {
            Some(Event::Text(text))
        }
        Event::SoftBreak | Event::HardBreak => Some(Event::HardBreak),
        _ => None,
    }
}

/// Memo content as print markup.
pub fn format_content(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::empty()).filter_map(restrict);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn tags_line(memo: &Memo) -> String {
    if memo.tags.is_empty() {
        return String::new();
    }
    let tags: Vec<String> = memo
        .tags
        .iter()
        .map(|t| format!("#{}", escape_html(t)))
        .collect();
    format!("<div class=\"memo-tags\">{}</div>\n", tags.join(" "))
}

fn meta_line(memo: &Memo, compact: bool) -> String {
    let mut meta = String::new();
    if memo.is_pinned {
        meta.push_str(if compact {
            "<span class=\"pinned-badge\">Pinned</span>"
        } else {
            "<span class=\"pinned-badge\">&#128204; Pinned</span>"
        });
    }
    if let Some(category) = memo.category {
        meta.push_str(&format!(
            "<span class=\"category-badge\">{}</span>",
            escape_html(category.label())
        ));
    }
    if compact {
        meta.push_str(&format!(
            "<span class=\"memo-date\">{}</span>",
            memo.updated_at.with_timezone(&Local).format("%Y-%m-%d")
        ));
    }
    format!("<div class=\"memo-meta\">{}</div>", meta)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n\
         <style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        PRINT_STYLES,
        body
    )
}

pub fn memo_document(memo: &Memo) -> String {
    let body = format!(
        "<div class=\"memo-container\">\n\
         <div class=\"memo-header\">\n<h1 class=\"memo-title\">{title}</h1>\n{meta}\n</div>\n\
         <div class=\"memo-content\">\n{content}</div>\n\
         {tags}\
         <div class=\"memo-footer\">\n<div>Created: {created}</div>\n<div>Updated: {updated}</div>\n</div>\n\
         </div>\n",
        title = escape_html(&memo.title),
        meta = meta_line(memo, false),
        content = format_content(&memo.content),
        tags = tags_line(memo),
        created = local(memo.created_at),
        updated = local(memo.updated_at),
    );
    page(&format!("Memo: {}", memo.title), &body)
}

pub fn list_document(memos: &[Memo], printed_at: DateTime<Local>) -> String {
    let items: String = memos
        .iter()
        .map(|memo| {
            format!(
                "<div class=\"memo-item\">\n\
                 <div class=\"memo-header\">\n<h2 class=\"memo-title\">{}</h2>\n{}\n</div>\n\
                 <div class=\"memo-content\">\n{}</div>\n{}</div>\n",
                escape_html(&memo.title),
                meta_line(memo, true),
                format_content(&memo.content),
                tags_line(memo),
            )
        })
        .collect();

    let body = format!(
        "<div class=\"memo-list-container\">\n\
         <div class=\"list-header\">\n<h1>Memos</h1>\n\
         <div class=\"list-meta\">{} memo(s) | Printed: {}</div>\n</div>\n\
         <div class=\"memo-list\">\n{}</div>\n</div>\n",
        memos.len(),
        printed_at.format("%Y-%m-%d %H:%M"),
        items
    );
    page(&format!("Memos ({})", memos.len()), &body)
}

/// List document restricted to `ids`, in the order of `memos`.
pub fn selected_document(memos: &[Memo], ids: &[MemoId], printed_at: DateTime<Local>) -> String {
    let selected: Vec<Memo> = memos
        .iter()
        .filter(|m| ids.contains(&m.id))
        .cloned()
        .collect();
    list_document(&selected, printed_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, NewMemo};

    #[test]
    fn formats_markdown_subset() {
        let html = format_content("# Title\n\n**bold** and *soft*\n\n- one\n- two");
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn headings_demote_and_cap() {
        assert!(format_content("## Sub").contains("<h3>Sub</h3>"));
        assert!(format_content("### Minor").contains("<h4>Minor</h4>"));
        assert!(format_content("###### Deep").contains("<h6>Deep</h6>"));
    }

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("메모"), "메모");
    }

    #[test]
    fn line_breaks_survive() {
        let html = format_content("line one\nline two");
        assert!(html.contains("line one<br />"));
    }

    #[test]
    fn raw_html_and_links_are_escaped_text() {
        let html = format_content("<script>alert(1)</script>\n\n[site](http://x.test) `code`");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<a "));
        assert!(html.contains("site"));
        assert!(!html.contains("<code>"));
        assert!(html.contains("code"));
    }

    #[test]
    fn memo_document_escapes_title_and_shows_meta() {
        let memo = Memo::new(
            NewMemo::new("A <b>", "body")
                .with_category(Category::Todo)
                .with_tags(["x"])
                .pinned(),
        );
        let html = memo_document(&memo);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Memo: A &lt;b&gt;</title>"));
        assert!(html.contains("To-do"));
        assert!(html.contains("#x"));
        assert!(html.contains("Pinned"));
    }

    #[test]
    fn selection_limits_list() {
        let a = Memo::new(NewMemo::new("First", "a"));
        let b = Memo::new(NewMemo::new("Second", "b"));
        let html = selected_document(&[a.clone(), b], &[a.id], Local::now());
        assert!(html.contains("First"));
        assert!(!html.contains("Second"));
        assert!(html.contains("1 memo(s)"));
    }
}
