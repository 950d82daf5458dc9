//! Search-term helpers for the list view: highlighting, counting, previews,
//! and the `"exact phrase" -exclude` query syntax.
//!
//! All matching is case-insensitive and works on characters, not bytes, so
//! non-ASCII text highlights correctly.

/// A segment of text in a search match, either plain text or a matched term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// Character ranges of every non-overlapping case-insensitive match.
fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // Lowercase char by char so indices stay aligned with `text`; chars that
    // lowercase to several chars keep only the first.
    let hay: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Splits `text` into plain and matched segments, preserving original casing.
pub fn highlight(text: &str, term: &str) -> Vec<MatchSegment> {
    let term = term.trim();
    let ranges = match_ranges(text, term);
    if ranges.is_empty() {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![MatchSegment::Plain(text.to_string())]
        };
    }

    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            segments.push(MatchSegment::Plain(chars[cursor..start].iter().collect()));
        }
        segments.push(MatchSegment::Match(chars[start..end].iter().collect()));
        cursor = end;
    }
    if cursor < chars.len() {
        segments.push(MatchSegment::Plain(chars[cursor..].iter().collect()));
    }
    segments
}

pub fn count_occurrences(text: &str, term: &str) -> usize {
    match_ranges(text, term.trim()).len()
}

/// At most `max_chars` characters of `text`, centered on the first match of
/// `term` when there is one, with `...` marking cut sides.
pub fn preview(text: &str, term: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let first = match_ranges(text, term.trim()).first().map(|(s, _)| *s);
    let start = match first {
        Some(pos) => pos.saturating_sub(max_chars / 2),
        None => 0,
    };
    let end = (start + max_chars).min(chars.len());
    let start = end.saturating_sub(max_chars);

    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str("...");
    }
    out
}

/// A search query split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub terms: Vec<String>,
    pub exact: Vec<String>,
    pub exclude: Vec<String>,
}

/// Parses `plain words "exact phrases" -excluded`.
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    let mut rest = String::new();

    let mut in_quotes = false;
    let mut phrase = String::new();
    for c in query.chars() {
        match (c, in_quotes) {
            ('"', false) => in_quotes = true,
            ('"', true) => {
                if !phrase.trim().is_empty() {
                    parsed.exact.push(phrase.trim().to_string());
                }
                phrase.clear();
                in_quotes = false;
                rest.push(' ');
            }
            (c, true) => phrase.push(c),
            (c, false) => rest.push(c),
        }
    }
    // An unclosed quote is treated as plain words.
    if in_quotes {
        rest.push(' ');
        rest.push_str(&phrase);
    }

    for word in rest.split_whitespace() {
        match word.strip_prefix('-') {
            Some(excluded) if !excluded.is_empty() => parsed.exclude.push(excluded.to_string()),
            _ => parsed.terms.push(word.to_string()),
        }
    }
    parsed
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.exact.is_empty() && self.exclude.is_empty()
    }

    /// Every term and phrase present, no excluded word present.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.terms
            .iter()
            .chain(self.exact.iter())
            .all(|t| lower.contains(&t.to_lowercase()))
            && !self
                .exclude
                .iter()
                .any(|t| lower.contains(&t.to_lowercase()))
    }
}
