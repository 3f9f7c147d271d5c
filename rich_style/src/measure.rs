// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use crate::RichText;

/// Text measurement collaborator.
pub trait TextMeasure {
    /// Returns the rendered width, in points, of the text in `range`.
    fn width(&self, text: &RichText, range: Range<usize>) -> f32;
}

/// A [`TextMeasure`] that gives every character the same advance relative to its font size.
///
/// Characters without a font are measured at [`MonospaceMeasure::FALLBACK_SIZE`]. Active kerning
/// is added after every character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance of one character, as a fraction of the point size.
    pub advance_ratio: f32,
}

impl MonospaceMeasure {
    /// Point size assumed for text without a font.
    pub const FALLBACK_SIZE: f32 = 12.0;

    /// A measure with an advance ratio of `0.6`.
    pub const DEFAULT: Self = Self { advance_ratio: 0.6 };
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &RichText, range: Range<usize>) -> f32 {
        let mut width = 0.0;
        for (run, attrs) in text.runs() {
            let start = run.start.max(range.start);
            let end = run.end.min(range.end);
            if start >= end {
                continue;
            }
            let Some(slice) = text.text().get(start..end) else {
                continue;
            };
            let size = attrs.font.as_ref().map_or(Self::FALLBACK_SIZE, |f| f.size());
            let advance = size * self.advance_ratio + attrs.kerning.unwrap_or(0.0);
            width += slice.chars().count() as f32 * advance;
        }
        width
    }
}
