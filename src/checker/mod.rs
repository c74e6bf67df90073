pub mod dictionary;
pub mod ignore;
pub mod tokenizer;

use crate::error::{Error, Result};
use crate::span::TextSpan;
use dictionary::KnownWords;
use ignore::IgnoreSet;
use regex::Regex;
use std::collections::BTreeSet;
use tokenizer::Tokenizer;

/// Spans of every misspelled word in `text`.
///
/// Each distinct token is looked up once. A token is misspelled when it is a
/// word under the tokenizer's policy, the dictionary does not know it and
/// it is not ignored. Every literal occurrence of a misspelled word is then
/// tagged, including occurrences inside longer words. The result is sorted
/// and disjoint.
pub fn compute_misspelled<D>(
    text: &str,
    tokenizer: &Tokenizer,
    dictionary: &D,
    ignored: &IgnoreSet,
) -> Vec<TextSpan>
where
    D: KnownWords + ?Sized,
{
    let words = misspelled_words(text, tokenizer, dictionary, |w| ignored.contains(w));
    locate_occurrences(text, &words)
}

fn misspelled_words<'a, D>(
    text: &'a str,
    tokenizer: &Tokenizer,
    dictionary: &D,
    is_ignored: impl Fn(&str) -> bool,
) -> BTreeSet<&'a str>
where
    D: KnownWords + ?Sized,
{
    let distinct: BTreeSet<&str> = tokenizer.tokenize(text).map(|t| t.text).collect();
    distinct
        .into_iter()
        .filter(|&word| tokenizer.is_word(word) && !dictionary.is_known(word) && !is_ignored(word))
        .collect()
}

/// Non-overlapping left-to-right occurrences of each word. Occurrences of
/// different words that overlap are merged into one span covering both, so
/// every offset of every occurrence stays tagged.
fn locate_occurrences(text: &str, words: &BTreeSet<&str>) -> Vec<TextSpan> {
    let mut spans: Vec<TextSpan> = words
        .iter()
        .flat_map(|word| {
            text.match_indices(word)
                .map(move |(start, _)| TextSpan::at(start, word.len()))
        })
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<TextSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if last.overlaps(&span) => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// A dictionary plus the session's ignore rules and word policy.
pub struct SpellChecker<D> {
    dictionary: D,
    tokenizer: Tokenizer,
    ignored: IgnoreSet,
    ignore_patterns: Vec<Regex>,
}

impl<D: KnownWords> SpellChecker<D> {
    pub fn new(dictionary: D, tokenizer: Tokenizer) -> Self {
        Self {
            dictionary,
            tokenizer,
            ignored: IgnoreSet::new(),
            ignore_patterns: Vec::new(),
        }
    }

    /// Treat every word fully matching one of `patterns` as ignored.
    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let anchored = format!("^(?:{pattern})$");
            let re = Regex::new(&anchored).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.ignore_patterns.push(re);
        }
        Ok(self)
    }

    pub fn with_ignored<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(words);
        self
    }

    /// Sorted, disjoint spans of misspelled words in `text`.
    pub fn check(&self, text: &str) -> Vec<TextSpan> {
        if self.ignore_patterns.is_empty() {
            return compute_misspelled(text, &self.tokenizer, &self.dictionary, &self.ignored);
        }
        let words = self.misspelled_words(text);
        locate_occurrences(text, &words)
    }

    /// Distinct misspelled words of `text`, sorted.
    pub fn misspelled_words<'a>(&self, text: &'a str) -> BTreeSet<&'a str> {
        misspelled_words(text, &self.tokenizer, &self.dictionary, |w| self.is_ignored(w))
    }

    /// Returns `true` if the word was not already ignored.
    pub fn ignore(&mut self, word: impl Into<String>) -> bool {
        self.ignored.add(word)
    }

    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignored.contains(word) || self.ignore_patterns.iter().any(|re| re.is_match(word))
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }
}
