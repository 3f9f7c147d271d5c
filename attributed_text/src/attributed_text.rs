// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Error, TextRange};

/// A string partitioned into runs, each carrying one attribute value.
///
/// Runs are contiguous, non-empty and cover the whole text. Adjacent runs with equal attributes
/// are coalesced, so every run boundary marks an actual change in formatting.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<Attr> {
    text: String,
    runs: Vec<(Range<usize>, Attr)>,
}

impl<Attr> Default for AttributedText<Attr> {
    fn default() -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
        }
    }
}

impl<Attr> AttributedText<Attr> {
    /// Creates an empty `AttributedText`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an `AttributedText` holding `text` as a single run.
    pub fn from_text(text: impl Into<String>, attr: Attr) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            alloc::vec![(0..text.len(), attr)]
        };
        Self { text, runs }
    }

    /// Borrow the underlying text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterate over the runs and the byte ranges they cover, in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = (Range<usize>, &Attr)> + Clone {
        self.runs.iter().map(|(range, attr)| (range.clone(), attr))
    }

    /// Returns the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Returns the attributes at byte `index` along with the range of the run containing it.
    ///
    /// Returns `None` if `index` is at or past the end of the text.
    pub fn attributes_at(&self, index: usize) -> Option<(&Attr, Range<usize>)> {
        let run = self.run_index_at(index)?;
        let (range, attr) = &self.runs[run];
        Some((attr, range.clone()))
    }

    /// Returns the range of the last character, if any.
    pub fn last_char_range(&self) -> Option<TextRange> {
        let (start, ch) = self.text.char_indices().next_back()?;
        Some(TextRange::from_bounds(start, start + ch.len_utf8()))
    }

    /// Returns the range from the last line break before the end of `range` to that end.
    ///
    /// Line breaks are `\n`, `\r`, U+2028 and U+2029; a paragraph starts after the break.
    pub fn paragraph_range(&self, range: TextRange) -> TextRange {
        let end = range.end().min(self.text.len());
        let head = self.text.get(..end).unwrap_or(self.text.as_str());
        let start = head
            .char_indices()
            .rev()
            .find(|(_, ch)| matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
            .map_or(0, |(i, ch)| i + ch.len_utf8());
        TextRange::from_bounds(start, end)
    }

    fn run_index_at(&self, index: usize) -> Option<usize> {
        if index >= self.text.len() {
            return None;
        }
        let run = self.runs.partition_point(|(range, _)| range.end <= index);
        (run < self.runs.len()).then_some(run)
    }
}

impl<Attr: Clone + PartialEq> AttributedText<Attr> {
    /// Appends `text` as a run styled with `attr`.
    ///
    /// Empty text is ignored. If `attr` equals the attributes of the current last run, that run
    /// is extended instead.
    pub fn push_str(&mut self, text: &str, attr: Attr) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        match self.runs.last_mut() {
            Some((range, last)) if *last == attr => range.end = end,
            _ => self.runs.push((start..end, attr)),
        }
    }

    /// Appends every run of `other`.
    pub fn append(&mut self, other: &Self) {
        for (range, attr) in other.runs() {
            self.push_str(&other.text[range], attr.clone());
        }
    }

    /// Returns a copy of the runs within `range`.
    pub fn slice(&self, range: TextRange) -> Self {
        let range = range.as_range();
        let mut out = Self::new();
        for (run, attr) in self.runs() {
            let start = run.start.max(range.start);
            let end = run.end.min(range.end);
            if start < end {
                out.push_str(&self.text[start..end], attr.clone());
            }
        }
        out
    }

    /// Like [`slice`](Self::slice), validating `range` first.
    pub fn try_slice(&self, range: Range<usize>) -> Result<Self, Error> {
        Ok(self.slice(TextRange::new(&self.text, range)?))
    }

    /// Replaces the attributes of every run within `range` with `attr`.
    pub fn set_attributes(&mut self, range: TextRange, attr: Attr) {
        self.update_attributes(range, |existing| *existing = attr.clone());
    }

    /// Calls `f` on the attributes of every run within `range`.
    ///
    /// Runs that straddle the ends of `range` are split first, so `f` only affects the text
    /// inside `range`. Afterwards adjacent runs that became equal are coalesced.
    pub fn update_attributes(&mut self, range: TextRange, mut f: impl FnMut(&mut Attr)) {
        let range = range.as_range();
        if range.is_empty() {
            return;
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for (run, attr) in &mut self.runs {
            if run.start >= range.start && run.end <= range.end {
                f(attr);
            }
        }
        self.coalesce();
    }

    /// Like [`update_attributes`](Self::update_attributes), validating `range` first.
    pub fn try_update_attributes(
        &mut self,
        range: Range<usize>,
        f: impl FnMut(&mut Attr),
    ) -> Result<(), Error> {
        let range = TextRange::new(&self.text, range)?;
        self.update_attributes(range, f);
        Ok(())
    }

    /// Calls `f` with the range and attributes of every run, replacing the attributes with the
    /// returned value.
    pub fn map_runs(&mut self, mut f: impl FnMut(Range<usize>, &Attr) -> Attr) {
        for (range, attr) in &mut self.runs {
            *attr = f(range.clone(), attr);
        }
        self.coalesce();
    }

    fn split_at(&mut self, index: usize) {
        let Some(run) = self.run_index_at(index) else {
            return;
        };
        let (range, attr) = &mut self.runs[run];
        if range.start == index {
            return;
        }
        let tail = (index..range.end, attr.clone());
        range.end = index;
        self.runs.insert(run + 1, tail);
    }

    fn coalesce(&mut self) {
        self.runs.dedup_by(|(next, next_attr), (prev, prev_attr)| {
            if next_attr == prev_attr {
                prev.end = next.end;
                true
            } else {
                false
            }
        });
    }
}
