use std::sync::LazyLock;

use regex::Regex;

/// Number of lines `head` and `tail` show.
pub const EXCERPT_LINES: usize = 5;

/// Characters `strings` treats as printable, in runs of four or more.
static PRINTABLE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9{}_]{4,}").expect("valid regex"));

/// A slice of a file's lines plus whether anything was cut off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt<'a> {
    /// Lines shown, in file order.
    pub lines: Vec<&'a str>,
    /// True when the file had more than [`EXCERPT_LINES`] lines.
    pub truncated: bool,
}

/// First [`EXCERPT_LINES`] lines of `content`.
pub fn head(content: &str) -> Excerpt<'_> {
    let all: Vec<&str> = content.split('\n').collect();
    let truncated = all.len() > EXCERPT_LINES;
    Excerpt {
        lines: all.into_iter().take(EXCERPT_LINES).collect(),
        truncated,
    }
}

/// Last [`EXCERPT_LINES`] lines of `content`.
pub fn tail(content: &str) -> Excerpt<'_> {
    let all: Vec<&str> = content.split('\n').collect();
    let start = all.len().saturating_sub(EXCERPT_LINES);
    Excerpt {
        truncated: start > 0,
        lines: all[start..].to_vec(),
    }
}

/// Shortest pattern `grep` will look for in leetspeak.
pub const LEET_MIN_PATTERN: usize = 4;

/// Lines of `content` containing `pattern`, ignoring case. Matching lines
/// keep their original case and order.
///
/// A word pattern of at least [`LEET_MIN_PATTERN`] ASCII letters also
/// matches a line whose leetspeak spelling contains it, so `password` finds
/// `P4ssw0rd`. Shorter patterns, and any pattern with a digit or symbol,
/// are plain substring searches.
pub fn grep<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    let needle = pattern.to_lowercase();
    let leet = needle.len() >= LEET_MIN_PATTERN && needle.chars().all(|c| c.is_ascii_lowercase());
    content
        .split('\n')
        .filter(|line| {
            let line = line.to_lowercase();
            line.contains(&needle) || (leet && fold_leet(&line).contains(&needle))
        })
        .collect()
}

/// Replace common leetspeak digits and symbols with the letters they stand for.
fn fold_leet(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '4' | '@' => 'a',
            '3' => 'e',
            '1' => 'i',
            '0' => 'o',
            '5' | '$' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

/// Maximal runs of `[A-Za-z0-9{}_]` at least four characters long, in order
/// of appearance.
pub fn printable_runs(content: &str) -> Vec<&str> {
    PRINTABLE_RUN
        .find_iter(content)
        .map(|m| m.as_str())
        .collect()
}

/// `s` with its characters in reverse order.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}
