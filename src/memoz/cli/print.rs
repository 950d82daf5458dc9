use chrono::{DateTime, Duration, Local, Utc};
use colored::Colorize;
use memoz::api::{CmdMessage, MessageLevel};
use memoz::commands::helpers::TRASH_RETENTION_DAYS;
use memoz::model::{ArchivedMemo, DeletedMemo, Memo, SharedMemo};
use memoz::search::{count_occurrences, highlight, preview, MatchSegment};
use memoz::stats::MemoStatistics;
use memoz::templates::MemoTemplate;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 17;
const PIN_MARKER: &str = "⚲";
const PREVIEW_CHARS: usize = 60;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn one_line(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// One row per memo: pin marker, id, title and content preview, age.
pub(super) fn print_memos(memos: &[Memo]) {
    if memos.is_empty() {
        println!("No memos found.");
        return;
    }

    let mut last_was_pinned = false;
    for memo in memos {
        if last_was_pinned && !memo.is_pinned {
            println!();
        }
        last_was_pinned = memo.is_pinned;

        let prefix = if memo.is_pinned {
            format!("{} ", PIN_MARKER)
        } else {
            "  ".to_string()
        };
        let id = format!("{:<width$} ", memo.id.to_string(), width = ID_WIDTH);
        let category = memo
            .category
            .map(|c| format!(" [{}]", c.as_str()))
            .unwrap_or_default();

        let preview = one_line(&memo.content, PREVIEW_CHARS);
        let text = format!("{}{} {}", memo.title, category, preview);

        let fixed = prefix.width() + id.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let shown = truncate_to_width(&text, available);
        let padding = available.saturating_sub(shown.width());

        println!(
            "{}{}{}{}{}",
            prefix.yellow(),
            id.dimmed(),
            shown,
            " ".repeat(padding),
            format_time_ago(memo.updated_at).dimmed()
        );
    }
}

/// Search results with matches of the first term highlighted.
pub(super) fn print_search_results(memos: &[Memo], term: &str) {
    if memos.is_empty() {
        println!("No memos found.");
        return;
    }
    for memo in memos {
        let hits = count_occurrences(&memo.title, term) + count_occurrences(&memo.content, term);
        println!(
            "{} {} {}",
            memo.id.to_string().dimmed(),
            render_highlighted(&memo.title, term).bold(),
            format!("({} match{})", hits, if hits == 1 { "" } else { "es" }).dimmed()
        );
        let snippet = one_line(&preview(&memo.content, term, PREVIEW_CHARS), PREVIEW_CHARS + 6);
        println!("    {}", render_highlighted(&snippet, term));
    }
}

fn render_highlighted(text: &str, term: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|segment| match segment {
            MatchSegment::Plain(s) => s,
            MatchSegment::Match(s) => s.black().on_yellow().to_string(),
        })
        .collect()
}

pub(super) fn print_full_memo(memo: &Memo) {
    let pin = if memo.is_pinned {
        format!(" {}", PIN_MARKER).yellow().to_string()
    } else {
        String::new()
    };
    println!("{} {}{}", memo.id.to_string().yellow(), memo.title.bold(), pin);

    let mut meta = Vec::new();
    if let Some(category) = memo.category {
        meta.push(category.label().to_string());
    }
    if !memo.tags.is_empty() {
        meta.push(
            memo.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    if !meta.is_empty() {
        println!("{}", meta.join("  ").cyan());
    }
    println!("--------------------------------");
    println!("{}", memo.content);
    println!("--------------------------------");
    println!(
        "{}",
        format!(
            "Created {}  Updated {}",
            local(memo.created_at),
            local(memo.updated_at)
        )
        .dimmed()
    );
}

pub(super) fn print_archive(archive: &[ArchivedMemo]) {
    if archive.is_empty() {
        println!("Archive is empty.");
        return;
    }
    for entry in archive {
        let id = format!("{:<width$}", entry.memo.id.to_string(), width = ID_WIDTH);
        println!(
            "  {} {}  {}",
            id.dimmed(),
            entry.memo.title,
            format!("archived {}", local(entry.archived_at)).dimmed()
        );
    }
}

pub(super) fn print_trash(trash: &[DeletedMemo]) {
    if trash.is_empty() {
        println!("Trash is empty.");
        return;
    }
    let now = Utc::now();
    for entry in trash {
        let expires = entry.deleted_at + Duration::days(TRASH_RETENTION_DAYS);
        let days_left = (expires - now).num_days().max(0);
        let id = format!("{:<width$}", entry.memo.id.to_string(), width = ID_WIDTH);
        println!(
            "  {} {}  {}",
            id.red(),
            entry.memo.title,
            format!("deleted {}, {} day(s) left", local(entry.deleted_at), days_left).dimmed()
        );
    }
}

pub(super) fn print_shares(shares: &[SharedMemo]) {
    if shares.is_empty() {
        println!("No shared memos.");
        return;
    }
    let now = Utc::now();
    for share in shares {
        let expiry = match share.expires_at {
            Some(_) if share.is_expired_at(now) => "expired".red().to_string(),
            Some(at) => format!("expires {}", local(at)),
            None => "no expiry".to_string(),
        };
        println!(
            "  {}  {}  {}",
            share.link().cyan(),
            share.memo.title,
            format!("{} view(s), {}", share.access_count, expiry).dimmed()
        );
    }
}

pub(super) fn print_statistics(stats: &MemoStatistics, insights: &[String]) {
    println!("{}", "Statistics".bold());
    println!("  Total memos        {}", stats.total_memos);
    println!("  Pinned             {}", stats.total_pinned);
    println!("  Average length     {} chars", stats.average_content_length);
    println!("  Last 7 days        {}", stats.created_last_7_days);
    println!("  Last 30 days       {}", stats.created_last_30_days);
    if let Some(last) = stats.last_updated {
        println!("  Last updated       {}", local(last));
    }

    println!("\n{}", "Categories".bold());
    for (category, count) in &stats.category_counts {
        println!("  {:<18} {}", category.label(), count);
    }

    if !stats.most_used_tags.is_empty() {
        println!("\n{}", "Top tags".bold());
        for tag in &stats.most_used_tags {
            println!("  {:<18} {}", format!("#{}", tag.tag), tag.count);
        }
    }

    println!("\n{}", "By month".bold());
    for month in &stats.memos_by_month {
        println!("  {}  {:>3} {}", month.month, month.count, "▇".repeat(month.count.min(40)));
    }

    if !insights.is_empty() {
        println!("\n{}", "Insights".bold());
        for line in insights {
            println!("  • {}", line);
        }
    }
}

pub(super) fn print_templates(templates: &[MemoTemplate]) {
    for template in templates {
        println!(
            "  {} {:<16} {}",
            format!("{:<15}", template.id).yellow(),
            template.name,
            template.description.dimmed()
        );
    }
}

fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
