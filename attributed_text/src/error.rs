// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// A byte range that cannot address an attributed text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The range starts after it ends.
    Reversed {
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },
    /// The range ends past the end of the text.
    OutOfBounds {
        /// The requested range.
        range: Range<usize>,
        /// Length of the text, in bytes.
        len: usize,
    },
    /// An endpoint falls inside the UTF-8 encoding of a character.
    NotOnCharBoundary {
        /// The offending endpoint.
        index: usize,
        /// Byte range of the character containing `index`.
        char_range: Range<usize>,
    },
}

impl Error {
    pub(crate) fn not_on_char_boundary(text: &str, index: usize) -> Self {
        let start = (0..=index)
            .rev()
            .find(|i| text.is_char_boundary(*i))
            .unwrap_or(0);
        let end = text[start..]
            .chars()
            .next()
            .map_or(index, |ch| start + ch.len_utf8());
        Self::NotOnCharBoundary {
            index,
            char_range: start..end,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reversed { start, end } => write!(f, "range {start}..{end} is reversed"),
            Self::OutOfBounds { range, len } => {
                write!(f, "range {range:?} is out of bounds for a text of {len} bytes")
            }
            Self::NotOnCharBoundary { index, char_range } => write!(
                f,
                "byte {index} is inside the character at {char_range:?}"
            ),
        }
    }
}

impl core::error::Error for Error {}
