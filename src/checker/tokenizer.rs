use crate::span::TextSpan;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

/// Which characters make up a word. Everything else is a gap.
///
/// Apostrophes, hyphens, digits and underscores are gaps under both
/// policies, so `it's` yields `it` and `s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordPolicy {
    /// Grapheme clusters starting with an alphabetic char. Combining marks
    /// stay attached to their base letter.
    #[default]
    Unicode,
    /// Grapheme clusters made only of ASCII letters.
    Ascii,
}

impl WordPolicy {
    fn is_word_grapheme(self, grapheme: &str) -> bool {
        match self {
            WordPolicy::Unicode => grapheme.chars().next().is_some_and(char::is_alphabetic),
            WordPolicy::Ascii => {
                !grapheme.is_empty() && grapheme.chars().all(|c| c.is_ascii_alphabetic())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: TextSpan,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    policy: WordPolicy,
}

impl Tokenizer {
    pub fn new(policy: WordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> WordPolicy {
        self.policy
    }

    /// Lazily split `text` into maximal word runs, left to right.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens {
            text,
            graphemes: text.grapheme_indices(true),
            policy: self.policy,
        }
    }

    /// True if `word` is non-empty and made only of word characters.
    pub fn is_word(&self, word: &str) -> bool {
        !word.is_empty()
            && word
                .graphemes(true)
                .all(|g| self.policy.is_word_grapheme(g))
    }

    /// The token whose span contains `pos`, if any.
    pub fn token_at<'a>(&self, text: &'a str, pos: usize) -> Option<Token<'a>> {
        self.tokenize(text)
            .take_while(|t| t.span.start <= pos)
            .find(|t| t.span.contains(pos))
    }
}

/// Iterator over the words of a text. Cloning restarts from the clone point.
#[derive(Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    graphemes: GraphemeIndices<'a>,
    policy: WordPolicy,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, mut end) = loop {
            let (idx, g) = self.graphemes.next()?;
            if self.policy.is_word_grapheme(g) {
                break (idx, idx + g.len());
            }
        };

        let mut rest = self.graphemes.clone();
        while let Some((idx, g)) = rest.next() {
            if !self.policy.is_word_grapheme(g) {
                break;
            }
            end = idx + g.len();
            self.graphemes = rest.clone();
        }

        Some(Token {
            text: &self.text[start..end],
            span: TextSpan::at(start, end - start),
        })
    }
}

impl FusedIterator for Tokens<'_> {}

/// Whitespace-separated word count, as shown in a window title.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(policy: WordPolicy, text: &str) -> Vec<&str> {
        Tokenizer::new(policy).tokenize(text).map(|t| t.text).collect()
    }

    #[test]
    fn test_apostrophe_and_hyphen_are_gaps() {
        let expected = vec!["it", "s", "a", "test", "case"];
        assert_eq!(words(WordPolicy::Unicode, "it's a test-case"), expected);
        assert_eq!(words(WordPolicy::Ascii, "it's a test-case"), expected);
    }

    #[test]
    fn test_digits_and_underscores_are_gaps() {
        assert_eq!(
            words(WordPolicy::Unicode, "abc123def snake_case"),
            vec!["abc", "def", "snake", "case"]
        );
    }

    #[test]
    fn test_spans_match_text() {
        let text = "  Hello, wörld!  ";
        for token in Tokenizer::default().tokenize(text) {
            assert_eq!(token.span.slice(text), Some(token.text));
        }
    }

    #[test]
    fn test_policies_differ_on_non_ascii() {
        assert_eq!(words(WordPolicy::Unicode, "café au lait"), vec!["café", "au", "lait"]);
        assert_eq!(words(WordPolicy::Ascii, "café au lait"), vec!["caf", "au", "lait"]);
    }

    #[test]
    fn test_combining_mark_stays_in_word() {
        let text = "cafe\u{301} noir";
        assert_eq!(words(WordPolicy::Unicode, text), vec!["cafe\u{301}", "noir"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(words(WordPolicy::Unicode, "").is_empty());
        assert!(words(WordPolicy::Unicode, "... 42 !?").is_empty());
    }

    #[test]
    fn test_tokens_are_restartable() {
        let tokenizer = Tokenizer::default();
        let mut tokens = tokenizer.tokenize("one two three");
        tokens.next();
        let saved = tokens.clone();
        assert_eq!(tokens.map(|t| t.text).collect::<Vec<_>>(), vec!["two", "three"]);
        assert_eq!(saved.map(|t| t.text).collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn test_token_at() {
        let tokenizer = Tokenizer::default();
        let text = "helo wrold";
        assert_eq!(tokenizer.token_at(text, 2).map(|t| t.text), Some("helo"));
        assert_eq!(tokenizer.token_at(text, 4), None);
        assert_eq!(tokenizer.token_at(text, 5).map(|t| t.text), Some("wrold"));
    }

    #[test]
    fn test_is_word() {
        let tokenizer = Tokenizer::new(WordPolicy::Ascii);
        assert!(tokenizer.is_word("hello"));
        assert!(!tokenizer.is_word("it's"));
        assert!(!tokenizer.is_word(""));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree "), 3);
        assert_eq!(word_count(""), 0);
    }
}
