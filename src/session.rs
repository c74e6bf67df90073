//! The edit session: one document, its annotations and the ignore list.
//!
//! Every public operation runs to completion before returning. Mutations
//! are validated before they touch the document, and after any mutation
//! both tags are recomputed from the new text, so no range held by the
//! store ever refers to an older snapshot.

use crate::annotations::{AnnotationStore, HIGHLIGHT, MISSPELLED};
use crate::checker::dictionary::KnownWords;
use crate::checker::ignore::IgnoreSet;
use crate::checker::tokenizer::{word_count, Token};
use crate::checker::SpellChecker;
use crate::document::Document;
use crate::error::Result;
use crate::search::SearchQuery;
use crate::span::{Position, TextSpan};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recomputing,
}

/// A change to the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert { at: Position, text: String },
    Delete(TextSpan),
    ReplaceText(String),
}

impl Mutation {
    fn apply(&self, doc: &mut Document) -> Result<()> {
        match self {
            Mutation::Insert { at, text } => doc.insert(*at, text),
            Mutation::Delete(span) => doc.delete(*span),
            Mutation::ReplaceText(text) => {
                doc.replace_all_text(text.as_str());
                Ok(())
            }
        }
    }
}

/// Everything a host can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Mutate(Mutation),
    Ignore(String),
    Search(String),
    ReplaceAll { query: String, replacement: String },
}

pub struct EditSession<D> {
    document: Document,
    checker: SpellChecker<D>,
    annotations: AnnotationStore,
    query: Option<SearchQuery>,
    state: SessionState,
}

impl<D: KnownWords> EditSession<D> {
    pub fn new(checker: SpellChecker<D>) -> Self {
        Self::with_text(checker, "")
    }

    /// Start a session over loaded text; misspellings are computed at once.
    pub fn with_text(checker: SpellChecker<D>, text: impl Into<String>) -> Self {
        let mut session = Self {
            document: Document::from_text(text),
            checker,
            annotations: AnnotationStore::new(),
            query: None,
            state: SessionState::Idle,
        };
        session.recompute(true, false);
        session
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tags(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn misspelled(&self) -> &[TextSpan] {
        self.annotations.ranges(MISSPELLED)
    }

    pub fn highlights(&self) -> &[TextSpan] {
        self.annotations.ranges(HIGHLIGHT)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ignored(&self) -> &IgnoreSet {
        self.checker.ignored()
    }

    pub fn checker(&self) -> &SpellChecker<D> {
        &self.checker
    }

    /// The active search query, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().map(SearchQuery::as_str)
    }

    pub fn word_count(&self) -> usize {
        word_count(self.document.text())
    }

    pub fn insert(&mut self, at: Position, text: &str) -> Result<()> {
        self.mutate(&Mutation::Insert {
            at,
            text: text.to_string(),
        })
    }

    pub fn delete(&mut self, span: TextSpan) -> Result<()> {
        self.mutate(&Mutation::Delete(span))
    }

    pub fn replace_all_text(&mut self, text: impl Into<String>) {
        self.document.replace_all_text(text);
        self.recompute(true, true);
    }

    pub fn mutate(&mut self, mutation: &Mutation) -> Result<()> {
        if let Err(e) = mutation.apply(&mut self.document) {
            trace!(?mutation, error = %e, "rejected mutation");
            return Err(e);
        }
        self.recompute(true, true);
        Ok(())
    }

    /// Apply a burst of mutations and recompute once.
    ///
    /// The burst is applied to a scratch copy and committed only if every
    /// mutation is valid; otherwise the session is left unchanged.
    pub fn apply_batch<'m, I>(&mut self, mutations: I) -> Result<()>
    where
        I: IntoIterator<Item = &'m Mutation>,
    {
        let mut scratch = self.document.clone();
        let mut applied = 0usize;
        for mutation in mutations {
            if let Err(e) = mutation.apply(&mut scratch) {
                trace!(?mutation, applied, error = %e, "rejected batch");
                return Err(e);
            }
            applied += 1;
        }
        if applied == 0 {
            return Ok(());
        }
        self.document = scratch;
        self.recompute(true, true);
        Ok(())
    }

    /// Add a word to the ignore list. Surrounding whitespace is trimmed and
    /// an empty word is a no-op. Returns `true` if the word was new.
    pub fn ignore_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        let added = self.checker.ignore(word);
        self.recompute(true, false);
        added
    }

    /// The word under `pos`.
    pub fn word_at(&self, pos: Position) -> Option<Token<'_>> {
        self.checker.tokenizer().token_at(self.document.text(), pos)
    }

    /// The word under `pos`, if that whole word is tagged misspelled.
    pub fn misspelled_word_at(&self, pos: Position) -> Option<Token<'_>> {
        self.word_at(pos).filter(|token| {
            self.annotations.ranges_at(MISSPELLED, token.span.start) == Some(token.span)
        })
    }

    /// Ignore the misspelled word under `pos` and return it. Words that are
    /// not tagged misspelled are left alone.
    pub fn ignore_word_at(&mut self, pos: Position) -> Option<String> {
        let word = self.misspelled_word_at(pos)?.text.to_string();
        self.ignore_word(&word);
        Some(word)
    }

    /// Set the search query and recompute highlights only. An empty query
    /// clears them.
    pub fn search(&mut self, query: &str) {
        self.query = (!query.is_empty()).then(|| SearchQuery::new(query));
        self.recompute(false, true);
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Replace every case-insensitive occurrence of `query` and re-annotate.
    /// The query stays active, so highlights show what is left of it.
    pub fn replace_all(&mut self, query: &str, replacement: &str) -> usize {
        let search = SearchQuery::new(query);
        let (text, count) = search.replace_all(self.document.text(), replacement);
        if count > 0 {
            self.document.replace_all_text(text);
        }
        self.query = (!search.is_empty()).then_some(search);
        self.recompute(true, true);
        count
    }

    /// Run one event through the session and return the resulting tags.
    pub fn on_event(&mut self, event: SessionEvent) -> Result<&AnnotationStore> {
        match event {
            SessionEvent::Mutate(mutation) => self.mutate(&mutation)?,
            SessionEvent::Ignore(word) => {
                self.ignore_word(&word);
            }
            SessionEvent::Search(query) => self.search(&query),
            SessionEvent::ReplaceAll { query, replacement } => {
                self.replace_all(&query, &replacement);
            }
        }
        Ok(&self.annotations)
    }

    fn recompute(&mut self, misspelled: bool, highlight: bool) {
        self.state = SessionState::Recomputing;
        let text = self.document.text();

        if misspelled {
            let ranges = self.checker.check(text);
            debug!(tag = MISSPELLED, ranges = ranges.len(), len = text.len(), "recomputed");
            Self::store(&mut self.annotations, MISSPELLED, ranges);
        }

        if highlight {
            let ranges = self
                .query
                .as_ref()
                .map(|q| q.find_all(text))
                .unwrap_or_default();
            debug!(tag = HIGHLIGHT, ranges = ranges.len(), len = text.len(), "recomputed");
            Self::store(&mut self.annotations, HIGHLIGHT, ranges);
        }

        self.state = SessionState::Idle;
    }

    fn store(annotations: &mut AnnotationStore, tag: &str, ranges: Vec<TextSpan>) {
        // Annotators emit sorted, disjoint ranges; a failure here is a bug
        // in an annotator, and the stale set must not survive it.
        if let Err(e) = annotations.set_tag(tag, ranges) {
            tracing::error!(tag, error = %e, "annotator produced overlapping ranges");
            annotations.remove_tag(tag);
        }
    }
}
