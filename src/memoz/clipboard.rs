use crate::error::{MemozError, Result};
use crate::model::Memo;
use chrono::{DateTime, Local, Utc};
use std::io::Write;
use std::process::{Command, Stdio};

// Clipboard tools to try, in order.
#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(windows)]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(all(unix, not(target_os = "macos")))]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(not(any(unix, windows)))]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[];

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    Ok(child.wait()?.success())
}

/// Copies `text` with the first platform clipboard tool that works.
/// Fails with `PlatformUnavailable` when none is installed or all refuse.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in CLIPBOARD_TOOLS {
        match pipe_to(program, args, text) {
            Ok(true) => return Ok(()),
            Ok(false) => tracing::debug!(program, "clipboard tool exited with error"),
            Err(e) => tracing::debug!(program, error = %e, "clipboard tool unavailable"),
        }
    }
    Err(MemozError::PlatformUnavailable(
        "No working clipboard tool found (install wl-copy, xclip or xsel)".to_string(),
    ))
}

fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Plain-text rendering of a memo: title, blank line, content, then
/// category, tags and dates.
pub fn format_for_clipboard(memo: &Memo) -> String {
    let mut text = format!("{}\n\n{}", memo.title, memo.content);

    if let Some(category) = memo.category {
        text.push_str(&format!("\n\nCategory: {}", category.label()));
    }
    if !memo.tags.is_empty() {
        let tags: Vec<String> = memo.tags.iter().map(|t| format!("#{}", t)).collect();
        text.push_str(&format!("\nTags: {}", tags.join(" ")));
    }

    text.push_str(&format!("\n\nCreated: {}", local(memo.created_at)));
    text.push_str(&format!("\nUpdated: {}", local(memo.updated_at)));
    text
}

/// A `mailto:` link with the memo as subject and body.
pub fn email_share_link(memo: &Memo) -> String {
    let subject = urlencoding::encode(&format!("Memo: {}", memo.title)).into_owned();
    let body = format!("{}\n\n--\nShared from memoz", format_for_clipboard(memo));
    format!("mailto:?subject={}&body={}", subject, urlencoding::encode(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, NewMemo};

    #[test]
    fn formats_plain_memo() {
        let memo = Memo::new(NewMemo::new("My Title", "Some content"));
        let text = format_for_clipboard(&memo);
        assert!(text.starts_with("My Title\n\nSome content\n\nCreated: "));
        assert!(!text.contains("Category:"));
        assert!(!text.contains("Tags:"));
    }

    #[test]
    fn formats_category_and_tags() {
        let memo = Memo::new(
            NewMemo::new("T", "C")
                .with_category(Category::Todo)
                .with_tags(["a", "b"]),
        );
        let text = format_for_clipboard(&memo);
        assert!(text.contains("\n\nCategory: To-do\nTags: #a #b\n\nCreated: "));
        assert!(text.contains("\nUpdated: "));
    }

    #[test]
    fn email_link_is_percent_encoded() {
        let memo = Memo::new(NewMemo::new("Hi & bye", "line"));
        let link = email_share_link(&memo);
        assert!(link.starts_with("mailto:?subject=Memo%3A%20Hi%20%26%20bye&body="));
        assert!(!link.contains('\n'));
        assert!(link.contains("Shared%20from%20memoz"));
    }
}
