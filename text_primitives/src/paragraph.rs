// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Horizontal alignment of the lines of a paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    /// Align to the left edge.
    Left,
    /// Center between the edges.
    Center,
    /// Align to the right edge.
    Right,
    /// Stretch to both edges.
    Justified,
    /// Follow the writing direction of the paragraph.
    #[default]
    Natural,
}

/// What happens to a line that does not fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LineBreakMode {
    /// Wrap at word boundaries.
    #[default]
    WordWrapping,
    /// Wrap at character boundaries.
    CharWrapping,
    /// Cut off at the edge.
    Clipping,
    /// Elide the start of the line.
    TruncatingHead,
    /// Elide the end of the line.
    TruncatingTail,
    /// Elide the middle of the line.
    TruncatingMiddle,
}

/// Additional line breaking heuristics, combined as a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LineBreakStrategy(u8);

impl LineBreakStrategy {
    /// No additional heuristics.
    pub const NONE: Self = Self(0);
    /// Push out individual lines to avoid a single word on the last line.
    pub const PUSH_OUT: Self = Self(1 << 0);
    /// Forbid breaking between Hangul characters.
    pub const HANGUL_WORD_PRIORITY: Self = Self(1 << 1);
    /// The platform's standard set of heuristics.
    pub const STANDARD: Self = Self(0xFF);

    /// Returns the union of both strategies.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if every heuristic in `other` is enabled in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// The base writing direction of a paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WritingDirection {
    /// Determined from the content.
    #[default]
    Natural,
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}
