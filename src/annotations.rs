//! Named tags over document ranges.
//!
//! Each tag holds a sorted set of disjoint spans. A tag's set is only ever
//! replaced whole, so a reader sees either the old set or the new one.

use crate::error::{Error, Result};
use crate::span::{Position, TextSpan};
use serde::Serialize;
use std::collections::BTreeMap;

pub const MISSPELLED: &str = "misspelled";
pub const HIGHLIGHT: &str = "highlight";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStore {
    tags: BTreeMap<String, Vec<TextSpan>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every range of `name`. Overlapping input is rejected and the
    /// previous set is kept. An empty set removes the tag.
    pub fn set_tag(&mut self, name: &str, mut ranges: Vec<TextSpan>) -> Result<()> {
        ranges.sort_unstable();
        if let Some(pair) = ranges.windows(2).find(|w| w[0].overlaps(&w[1])) {
            return Err(Error::OverlappingRanges {
                tag: name.to_string(),
                offset: pair[1].start,
            });
        }

        if ranges.is_empty() {
            self.tags.remove(name);
        } else {
            self.tags.insert(name.to_string(), ranges);
        }
        Ok(())
    }

    pub fn ranges(&self, name: &str) -> &[TextSpan] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The range of `name` containing `pos`, if any.
    pub fn ranges_at(&self, name: &str, pos: Position) -> Option<TextSpan> {
        let ranges = self.ranges(name);
        let idx = ranges.partition_point(|r| r.end <= pos);
        ranges.get(idx).copied().filter(|r| r.contains(pos))
    }

    /// Every tag with a range covering `pos`.
    pub fn tag_names_at(&self, pos: Position) -> Vec<&str> {
        self.tags
            .keys()
            .filter(|name| self.ranges_at(name, pos).is_some())
            .map(String::as_str)
            .collect()
    }

    pub fn has_tag_at(&self, name: &str, pos: Position) -> bool {
        self.ranges_at(name, pos).is_some()
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn remove_tag(&mut self, name: &str) -> Option<Vec<TextSpan>> {
        self.tags.remove(name)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
