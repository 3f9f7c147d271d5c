// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use attributed_text::TextRange;

use super::Composable;
use crate::adapt::{self, EmbeddedTransformation};
use crate::attributes::ParagraphAttributes;
use crate::context::StyleContext;
use crate::measure::TextMeasure;
use crate::style::Style;
use crate::RichText;

/// A tab character whose stop is placed relative to the text before it.
///
/// The stop is embedded as a transformation, so [`adapt_text`](crate::adapt_text) moves it when the
/// preceding text changes size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    /// A stop `padding` points after the preceding text.
    Spacer(f32),
    /// Like [`Tab::Spacer`], and wrapped lines of the paragraph are indented to the stop.
    HeadIndent(f32),
}

impl Tab {
    /// Space between the preceding text and the stop.
    pub fn padding(self) -> f32 {
        match self {
            Self::Spacer(padding) | Self::HeadIndent(padding) => padding,
        }
    }

    /// Recomputes the stops of every tab character within `range`.
    ///
    /// The paragraph runs from the last line break before `range` to the end of `range`. The k-th
    /// tab of the paragraph sets tab stop k. The paragraph attributes are taken from the nearest
    /// run at or before the start of `range` that has any, and written back over the whole
    /// paragraph.
    ///
    /// Fails without touching `text` if `range` does not address whole characters of it.
    pub fn update(
        self,
        text: &mut RichText,
        range: Range<usize>,
        measure: &dyn TextMeasure,
    ) -> Result<(), attributed_text::Error> {
        let range = TextRange::new(text.text(), range)?;
        let paragraph_range = text.paragraph_range(range);
        let mut paragraph = Self::paragraph_before(text, range.start(), paragraph_range.start());

        let tabs: Vec<usize> = text.text()[paragraph_range.as_range()]
            .match_indices('\t')
            .map(|(offset, _)| paragraph_range.start() + offset)
            .collect();
        for (index, tab) in tabs.into_iter().enumerate() {
            if !range.as_range().contains(&tab) {
                continue;
            }
            let stop = measure.width(text, paragraph_range.start()..tab) + self.padding();
            paragraph.set_tab_stop(index, stop);
            if let Self::HeadIndent(_) = self {
                paragraph.head_indent = stop;
            }
        }

        text.update_attributes(paragraph_range, |attrs| {
            attrs.paragraph = Some(paragraph.clone());
        });
        Ok(())
    }

    fn paragraph_before(text: &RichText, index: usize, floor: usize) -> ParagraphAttributes {
        let mut cursor = Some(index);
        while let Some(index) = cursor.filter(|i| *i >= floor) {
            let Some((attrs, run)) = text.attributes_at(index) else {
                break;
            };
            if let Some(paragraph) = &attrs.paragraph {
                return paragraph.clone();
            }
            cursor = run.start.checked_sub(1);
        }
        ParagraphAttributes::default()
    }
}

impl Composable for Tab {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        _is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        let attributes = adapt::embed(
            &EmbeddedTransformation::from(*self),
            &base_style.attributes(cx.fonts),
        );
        let start = text.len();
        text.push_str("\t", attributes);
        if let Err(err) = self.update(text, start..text.len(), cx.measure) {
            log::warn!("cannot place the stop of {self:?}: {err}");
        }
    }
}
