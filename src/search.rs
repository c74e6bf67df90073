//! Case-insensitive literal search and replace-all.
//!
//! Matching uses Unicode simple case folding and never overlaps: each match
//! consumes its span before the scan resumes at the match's end. An empty
//! query never matches.

use crate::span::TextSpan;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Room the compiled matcher may take per byte of query.
const BYTES_PER_QUERY_BYTE: usize = 256;
const MIN_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// The query lower-cased char by char; used when the regex cannot be
    /// built within its size limits.
    Folded(Vec<char>),
}

/// A compiled search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    query: String,
    matcher: Option<Matcher>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let matcher = (!query.is_empty()).then(|| compile(&query));
        Self { query, matcher }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// All matches in `text`, left to right.
    pub fn find_all(&self, text: &str) -> Vec<TextSpan> {
        match &self.matcher {
            Some(Matcher::Regex(re)) => re
                .find_iter(text)
                .map(|m| TextSpan::at(m.start(), m.len()))
                .collect(),
            Some(Matcher::Folded(folded)) => find_folded(text, folded),
            None => Vec::new(),
        }
    }

    /// Replace every match in one pass over the original text.
    pub fn replace_all(&self, text: &str, replacement: &str) -> (String, usize) {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return (text.to_string(), 0);
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for span in &matches {
            output.push_str(&text[last..span.start]);
            output.push_str(replacement);
            last = span.end;
        }
        output.push_str(&text[last..]);

        (output, matches.len())
    }
}

fn compile(query: &str) -> Matcher {
    let limit = query
        .len()
        .saturating_mul(BYTES_PER_QUERY_BYTE)
        .max(MIN_SIZE_LIMIT);
    let built = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .size_limit(limit)
        .dfa_size_limit(limit)
        .build();
    match built {
        Ok(re) => Matcher::Regex(re),
        Err(e) => {
            debug!(query_len = query.len(), error = %e, "falling back to folded scan");
            Matcher::Folded(query.chars().flat_map(char::to_lowercase).collect())
        }
    }
}

/// Left-to-right, non-overlapping scan comparing lower-cased chars.
fn find_folded(text: &str, folded: &[char]) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    if folded.is_empty() {
        return spans;
    }
    let mut from = 0;
    while from < text.len() {
        let rest = &text[from..];
        match folded_match_len(rest, folded) {
            Some(len) => {
                spans.push(TextSpan::at(from, len));
                from += len;
            }
            None => from += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    spans
}

/// Byte length of the match of `folded` at the start of `haystack`.
fn folded_match_len(haystack: &str, folded: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (idx, c) in haystack.char_indices() {
        if matched == folded.len() {
            return Some(idx);
        }
        for lower in c.to_lowercase() {
            if folded.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
    }
    (matched == folded.len()).then_some(haystack.len())
}

/// All case-insensitive occurrences of `query` in `text`.
pub fn find_all(text: &str, query: &str) -> Vec<TextSpan> {
    SearchQuery::new(query).find_all(text)
}

/// Replace every case-insensitive occurrence of `query`, returning the new
/// text and the number of replacements.
pub fn replace_all(text: &str, query: &str, replacement: &str) -> (String, usize) {
    SearchQuery::new(query).replace_all(text, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_case_insensitive() {
        let spans = find_all("The cat saw THE dog", "the");
        assert_eq!(
            spans,
            vec![TextSpan::new(0, 3).unwrap(), TextSpan::new(12, 15).unwrap()]
        );
    }

    #[test]
    fn test_empty_query_never_matches() {
        assert!(find_all("anything at all", "").is_empty());
        assert!(find_all("", "").is_empty());
        assert_eq!(replace_all("abc", "", "x"), ("abc".to_string(), 0));
    }

    #[test]
    fn test_query_is_literal() {
        assert_eq!(find_all("a.b axb", "a.b").len(), 1);
        assert_eq!(find_all("(1+1) (1+1)", "(1+1)").len(), 2);
    }

    #[test]
    fn test_non_overlapping_matches() {
        assert_eq!(
            find_all("aaaa", "aa"),
            vec![TextSpan::new(0, 2).unwrap(), TextSpan::new(2, 4).unwrap()]
        );
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(find_all("ÉCOLE école", "école").len(), 2);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(
            replace_all("the cat the dog", "the", "a"),
            ("a cat a dog".to_string(), 2)
        );
    }

    #[test]
    fn test_replace_all_consumes_matches() {
        assert_eq!(replace_all("aaa", "aa", "b"), ("ba".to_string(), 1));
    }

    #[test]
    fn test_replacement_containing_query_not_reprocessed() {
        assert_eq!(
            replace_all("cat cat", "cat", "cats"),
            ("cats cats".to_string(), 2)
        );
        assert_eq!(replace_all("Cat", "cat", "cat"), ("cat".to_string(), 1));
    }

    #[test]
    fn test_absent_query() {
        assert_eq!(replace_all("hello", "xyz", "a"), ("hello".to_string(), 0));
    }

    #[test]
    fn test_long_query() {
        let query = "ab".repeat(200_000);
        let text = format!("x{query}y");
        assert_eq!(find_all(&text, &query), vec![TextSpan::new(1, 400_001).unwrap()]);

        let (replaced, count) = replace_all(&text, &query.to_uppercase(), "-");
        assert_eq!((replaced.as_str(), count), ("x-y", 1));
    }

    #[test]
    fn test_folded_scan() {
        let folded: Vec<char> = "école".chars().collect();
        assert_eq!(
            find_folded("ÉCOLE, école", &folded),
            vec![TextSpan::new(0, 6).unwrap(), TextSpan::new(8, 14).unwrap()]
        );
        let aa: Vec<char> = "aa".chars().collect();
        assert_eq!(find_folded("AaA", &aa), vec![TextSpan::new(0, 2).unwrap()]);
        assert!(find_folded("ab", &['a', 'b', 'c']).is_empty());
        assert!(find_folded("anything", &[]).is_empty());
    }

    #[test]
    fn test_query_reuse() {
        let query = SearchQuery::new("Hello");
        assert_eq!(query.as_str(), "Hello");
        assert_eq!(query.find_all("hello HELLO").len(), 2);
        assert!(!query.is_empty());
    }
}
