use crate::error::Result;
use fst::{Set, SetBuilder};
use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// The one question the engine asks a dictionary.
///
/// Implementations must be pure: the same word always gets the same answer.
pub trait KnownWords {
    fn is_known(&self, word: &str) -> bool;
}

/// Exact match first, then the lower-cased form, so a capitalised word at
/// the start of a sentence still counts as known.
fn known_with_fold(word: &str, contains: impl Fn(&str) -> bool) -> bool {
    if contains(word) {
        return true;
    }
    let lower = word.to_lowercase();
    lower != word && contains(&lower)
}

impl KnownWords for HashSet<String> {
    fn is_known(&self, word: &str) -> bool {
        known_with_fold(word, |w| self.contains(w))
    }
}

impl KnownWords for BTreeSet<String> {
    fn is_known(&self, word: &str) -> bool {
        known_with_fold(word, |w| self.contains(w))
    }
}

impl<T: KnownWords + ?Sized> KnownWords for &T {
    fn is_known(&self, word: &str) -> bool {
        (**self).is_known(word)
    }
}

impl<T: KnownWords + ?Sized> KnownWords for Box<T> {
    fn is_known(&self, word: &str) -> bool {
        (**self).is_known(word)
    }
}

/// A word list compiled into a finite state transducer.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Build an in-memory dictionary from any list of words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let set = Set::from_iter(sorted)?;
        Ok(Self { set })
    }

    /// Load a compiled fst dictionary.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let set = Set::new(bytes)?;
        Ok(Self { set })
    }

    /// Load a plain word list: one word per line, `#` comments and blank
    /// lines skipped.
    pub fn load_word_list(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Compile a word list into an fst file at `output_path`.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<usize> {
        let mut sorted_words = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        sorted_words.sort_unstable();
        sorted_words.dedup();

        let writer = BufWriter::new(File::create(output_path)?);
        let mut builder = SetBuilder::new(writer)?;
        for word in &sorted_words {
            builder.insert(word.as_bytes())?;
        }
        builder.finish()?;

        Ok(sorted_words.len())
    }

    /// Check if word exists in dictionary, exactly as given.
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl KnownWords for Dictionary {
    fn is_known(&self, word: &str) -> bool {
        known_with_fold(word, |w| self.contains(w))
    }
}
