use std::collections::BTreeSet;

/// Words the user has approved for this session. Exact, case-sensitive
/// matching; entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    words: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the word was not already ignored.
    pub fn add(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.words.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut set = IgnoreSet::new();
        assert!(set.add("helo"));
        assert!(!set.add("helo"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_case_sensitive() {
        let set: IgnoreSet = ["Rust"].into_iter().collect();
        assert!(set.contains("Rust"));
        assert!(!set.contains("rust"));
    }
}
