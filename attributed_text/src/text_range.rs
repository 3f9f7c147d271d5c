// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Error;

/// A byte range known to address whole characters of a text.
///
/// Range updates on [`AttributedText`](crate::AttributedText) take a `TextRange` and cannot fail.
/// Ranges come either from [`TextRange::new`], which validates a plain `Range<usize>`, or from
/// the text itself, as with [`last_char_range`](crate::AttributedText::last_char_range).
///
/// A `TextRange` stays valid for the text it came from as long as that text is only appended to.
///
/// ```
/// use attributed_text::{AttributedText, TextRange};
///
/// let mut text = AttributedText::from_text("Hello!", 0_u8);
/// let range = TextRange::new(text.text(), 0..5).unwrap();
/// text.set_attributes(range, 1);
/// assert_eq!(text.run_count(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Validates `range` against `text`.
    pub fn new(text: &str, range: Range<usize>) -> Result<Self, Error> {
        if range.start > range.end {
            return Err(Error::Reversed {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > text.len() {
            return Err(Error::OutOfBounds {
                range,
                len: text.len(),
            });
        }
        if let Some(index) = [range.start, range.end]
            .into_iter()
            .find(|i| !text.is_char_boundary(*i))
        {
            return Err(Error::not_on_char_boundary(text, index));
        }
        Ok(Self::from_bounds(range.start, range.end))
    }

    /// Bounds the caller derived from character positions of the text.
    pub(crate) const fn from_bounds(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The start byte offset.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns `true` if the range covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[cfg(test)]
mod tests {
    use super::TextRange;
    use crate::Error;

    #[test]
    fn accepts_character_ranges() {
        let t = "Hello!";
        assert!(TextRange::new(t, 0..6).is_ok());
        assert!(TextRange::new(t, 1..3).is_ok_and(|r| !r.is_empty()));
        assert!(TextRange::new(t, 6..6).is_ok_and(TextRange::is_empty));
    }

    #[test]
    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    fn rejects_reversed_and_out_of_bounds_ranges() {
        let t = "Hello!";
        assert_eq!(
            TextRange::new(t, 4..3),
            Err(Error::Reversed { start: 4, end: 3 })
        );
        assert_eq!(
            TextRange::new(t, 0..7),
            Err(Error::OutOfBounds { range: 0..7, len: 6 })
        );
    }

    #[test]
    fn reports_the_character_an_endpoint_splits() {
        // "é" is 2 bytes in UTF-8.
        let t = "a\u{e9}clair";
        let err = TextRange::new(t, 2..3).unwrap_err();
        assert_eq!(
            err,
            Error::NotOnCharBoundary {
                index: 2,
                char_range: 1..3
            }
        );
        assert_eq!(
            TextRange::new(t, 0..2).unwrap_err(),
            Error::NotOnCharBoundary {
                index: 2,
                char_range: 1..3
            }
        );
    }
}
