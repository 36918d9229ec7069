//! Line-level scanning of Markdown-ish text
//!
//! Both corpora are loosely structured Markdown: headers delimit sections,
//! bullets carry statements. This module only recognizes structure; deciding
//! what counts as a claim or a behavior is left to the extractors.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static INLINE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("valid date regex"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}_-]+)").expect("valid tag regex"));

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)](\s+|$)").expect("valid list regex"));

/// Structural kind of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `#`..`######` followed by a title
    Header { level: usize, title: &'a str },
    /// List item with the marker (and any checkbox) removed
    Bullet(&'a str),
    /// Horizontal rule
    Rule,
    /// Code fence delimiter
    Fence,
    /// Whitespace only
    Blank,
    /// Anything else
    Text(&'a str),
}

/// Classify one line of input
pub(crate) fn classify_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
        return Line::Fence;
    }
    if is_rule(trimmed) {
        return Line::Rule;
    }
    if let Some(header) = parse_header(trimmed) {
        return header;
    }
    if let Some(item) = strip_bullet(trimmed) {
        return Line::Bullet(item);
    }
    Line::Text(trimmed)
}

fn is_rule(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&marker| compact.chars().all(|c| c == marker))
}

fn parse_header(trimmed: &str) -> Option<Line<'_>> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    // `#tag` is not a header
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(Line::Header {
        level,
        title: rest.trim().trim_end_matches('#').trim(),
    })
}

fn strip_bullet(trimmed: &str) -> Option<&str> {
    let item = if let Some(rest) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
    {
        rest
    } else if matches!(trimmed, "-" | "*" | "+") {
        ""
    } else if let Some(m) = ORDERED_MARKER.find(trimmed) {
        &trimmed[m.end()..]
    } else {
        return None;
    };

    let item = item.trim();
    let item = ["[ ] ", "[x] ", "[X] "]
        .iter()
        .find_map(|checkbox| item.strip_prefix(checkbox))
        .unwrap_or(item);
    Some(item.trim())
}

/// Stack of enclosing headers
#[derive(Debug, Default)]
pub(crate) struct SectionPath {
    stack: Vec<(usize, String)>,
}

impl SectionPath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Enter a header, closing any open header of the same or deeper level
    pub(crate) fn enter(&mut self, level: usize, title: &str) {
        while self.stack.last().is_some_and(|(l, _)| *l >= level) {
            self.stack.pop();
        }
        self.stack.push((level, title.to_string()));
    }

    /// Titles joined outermost first, `None` outside any section
    pub(crate) fn path(&self) -> Option<String> {
        if self.stack.is_empty() {
            return None;
        }
        Some(
            self.stack
                .iter()
                .map(|(_, title)| title.as_str())
                .collect::<Vec<_>>()
                .join(" > "),
        )
    }

    /// Whether any enclosing title matches one of `names` (case-insensitive)
    pub(crate) fn within_any(&self, names: &[String]) -> bool {
        self.stack.iter().any(|(_, title)| {
            names
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case(title.trim()))
        })
    }
}

/// Split prose into sentences on `.`, `!`, `?` and their full-width forms
///
/// ASCII terminators only end a sentence when followed by whitespace or end of
/// line, so `will.md` or `v1.2` stay intact.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let ends = match c {
            '。' | '！' | '？' => true,
            '.' | '!' | '?' => chars.peek().map_or(true, |next| next.is_whitespace()),
            _ => false,
        };
        if ends {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Whether a statement is structural filler rather than content
pub(crate) fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().all(|c| !c.is_alphanumeric()) {
        return true;
    }
    matches!(
        trimmed.to_lowercase().as_str(),
        "tbd" | "todo" | "none" | "(none)" | "n/a" | "未記入" | "(未記入)" | "（未記入）"
    )
}

/// First valid `YYYY-MM-DD` date mentioned in the text
pub(crate) fn inline_date(text: &str) -> Option<NaiveDate> {
    INLINE_DATE
        .captures_iter(text)
        .find_map(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok())
}

/// Explicit `#tag` tokens, lowercased, in order of appearance
pub(crate) fn tags(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in TAG.captures_iter(text) {
        let tag = caps[1].to_lowercase();
        if !found.contains(&tag) {
            found.push(tag);
        }
    }
    found
}

/// Parse a day key of the form `YYYY-MM-DD`
pub(crate) fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}
