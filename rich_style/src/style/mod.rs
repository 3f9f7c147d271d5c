// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style algebra.
//!
//! A [`Style`] is a record of optional formatting fields. Styles are combined with
//! [`Style::add`]: fields present in the newer style win, list-valued fields concatenate and the
//! emphasis set is unioned. Styles are plain values and never observe the text they format; they
//! are compiled into an [`AttributeSet`](crate::AttributeSet) by
//! [`materialize`](crate::materialize).

mod features;
mod part;
mod tracking;
mod transform;

use std::sync::Arc;

use hashbrown::HashMap;
use peniko::Color;
use smallvec::SmallVec;
use text_primitives::{Emphasis, LineBreakMode, LineBreakStrategy, TextAlignment, WritingDirection};

pub use features::{
    ContextualAlternates, FontFeatureProvider, Fractions, NumberCase, NumberSpacing, SmallCaps,
    StylisticAlternates, VerticalPosition,
};
pub use part::StylePart;
pub use tracking::Tracking;
pub use transform::{Transform, TransformFn};

use crate::adapt::AdaptiveStyle;
use crate::attributes::{ExtraValue, Ligatures, UnderlineStyle};
use crate::font::Font;
use crate::markup::XmlStyler;

/// A line decoration: its style and an optional color.
pub type Decoration = (UnderlineStyle, Option<Color>);

/// A declarative, mergeable description of text formatting.
///
/// Every field is optional. Absent fields leave whatever the target already has untouched when the
/// style is materialized.
#[derive(Clone, Debug, Default)]
pub struct Style {
    /// Host attributes passed through verbatim, merged key by key.
    pub extra: HashMap<String, ExtraValue>,

    /// The font.
    pub font: Option<Font>,
    /// Link target.
    pub link: Option<String>,
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub background_color: Option<Color>,
    /// Underline style and color.
    pub underline: Option<Decoration>,
    /// Strikethrough style and color.
    pub strikethrough: Option<Decoration>,
    /// Baseline offset in points.
    pub baseline_offset: Option<f32>,
    /// Ligature behaviour.
    pub ligatures: Option<Ligatures>,

    /// Horizontal alignment.
    pub alignment: Option<TextAlignment>,
    /// Extra space between lines.
    pub line_spacing: Option<f32>,
    /// Space after each paragraph.
    pub paragraph_spacing_after: Option<f32>,
    /// Space before each paragraph.
    pub paragraph_spacing_before: Option<f32>,
    /// Indent of the first line of each paragraph.
    pub first_line_head_indent: Option<f32>,
    /// Indent of the lines after the first.
    pub head_indent: Option<f32>,
    /// Trailing indent.
    pub tail_indent: Option<f32>,
    /// Line breaking behaviour.
    pub line_break_mode: Option<LineBreakMode>,
    /// Extra line breaking heuristics.
    pub line_break_strategy: Option<LineBreakStrategy>,
    /// Minimum line height.
    pub minimum_line_height: Option<f32>,
    /// Maximum line height.
    pub maximum_line_height: Option<f32>,
    /// Base writing direction.
    pub base_writing_direction: Option<WritingDirection>,
    /// Line height multiplier.
    pub line_height_multiple: Option<f32>,
    /// Hyphenation threshold.
    pub hyphenation_factor: Option<f32>,
    /// Whether glyphs may be tightened before truncating.
    pub allows_default_tightening_for_truncation: Option<bool>,

    /// Numeral height.
    pub number_case: Option<NumberCase>,
    /// Numeral width.
    pub number_spacing: Option<NumberSpacing>,
    /// Fraction forms.
    pub fractions: Option<Fractions>,
    /// Superscript forms.
    pub superscript: Option<bool>,
    /// Subscript forms.
    pub subscript: Option<bool>,
    /// Ordinal forms.
    pub ordinals: Option<bool>,
    /// Scientific inferior forms.
    pub scientific_inferiors: Option<bool>,
    /// Small capital forms, in insertion order without duplicates.
    pub small_caps: SmallVec<[SmallCaps; 2]>,
    /// Stylistic sets.
    pub stylistic_alternates: StylisticAlternates,
    /// Contextual and swash alternates.
    pub contextual_alternates: ContextualAlternates,
    /// Additional feature providers, applied before the toggles above.
    pub font_feature_providers: Vec<Arc<dyn FontFeatureProvider>>,

    /// Behaviours that re-adapt the text to a content size, embedded into the output.
    pub adaptations: Vec<AdaptiveStyle>,
    /// Symbolic font traits.
    pub emphasis: Emphasis,
    /// Inter-character spacing.
    pub tracking: Option<Tracking>,
    /// Case transformation applied to plain text.
    pub transform: Option<Transform>,
    /// Markup styler. When present, text styled with this style is compiled as markup.
    pub xml_styler: Option<Arc<dyn XmlStyler>>,
}

impl Style {
    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style from parts, applied in order.
    ///
    /// ```
    /// use rich_style::{Font, Style, StylePart, Tracking};
    ///
    /// let style = Style::from_parts([
    ///     StylePart::Font(Font::new("Avenir", 12.0)),
    ///     StylePart::Tracking(Tracking::Point(1.0)),
    ///     StylePart::Font(Font::new("Avenir", 14.0)),
    /// ]);
    /// assert_eq!(style.font.map(|f| f.size()), Some(14.0));
    /// ```
    pub fn from_parts(parts: impl IntoIterator<Item = StylePart>) -> Self {
        let mut style = Self::new();
        for part in parts {
            style.update(part);
        }
        style
    }

    /// Applies one more part.
    #[must_use]
    pub fn with(mut self, part: StylePart) -> Self {
        self.update(part);
        self
    }

    /// Returns a copy of this style with `parts` applied in order.
    #[must_use]
    pub fn with_parts(&self, parts: impl IntoIterator<Item = StylePart>) -> Self {
        let mut style = self.clone();
        for part in parts {
            style.update(part);
        }
        style
    }

    /// Merges `other` into this style.
    ///
    /// Fields present in `other` replace the ones here. Feature providers and adaptations are
    /// appended, emphasis and small caps are unioned, and alternates and extra attributes merge
    /// entry by entry.
    pub fn add(&mut self, other: &Self) {
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }

        macro_rules! override_present {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field.clone_from(&other.$field);
                    }
                )*
            };
        }
        override_present!(
            font,
            link,
            color,
            background_color,
            underline,
            strikethrough,
            baseline_offset,
            ligatures,
            alignment,
            line_spacing,
            paragraph_spacing_after,
            paragraph_spacing_before,
            first_line_head_indent,
            head_indent,
            tail_indent,
            line_break_mode,
            line_break_strategy,
            minimum_line_height,
            maximum_line_height,
            base_writing_direction,
            line_height_multiple,
            hyphenation_factor,
            allows_default_tightening_for_truncation,
            number_case,
            number_spacing,
            fractions,
            superscript,
            subscript,
            ordinals,
            scientific_inferiors,
            tracking,
            transform,
            xml_styler,
        );

        for small_caps in &other.small_caps {
            self.insert_small_caps(*small_caps);
        }
        self.stylistic_alternates.add(&other.stylistic_alternates);
        self.contextual_alternates.add(&other.contextual_alternates);
        self.font_feature_providers
            .extend(other.font_feature_providers.iter().cloned());
        self.adaptations.extend(other.adaptations.iter().cloned());
        self.emphasis |= other.emphasis;
    }

    /// Returns this style with `other` merged on top.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut style = self.clone();
        style.add(other);
        style
    }

    /// Adds `small_caps` to the small caps set unless it is already present.
    pub fn insert_small_caps(&mut self, small_caps: SmallCaps) {
        if !self.small_caps.contains(&small_caps) {
            self.small_caps.push(small_caps);
        }
    }

    /// Returns `true` if this style sets any paragraph attribute.
    pub fn has_paragraph_attributes(&self) -> bool {
        self.alignment.is_some()
            || self.line_spacing.is_some()
            || self.paragraph_spacing_after.is_some()
            || self.paragraph_spacing_before.is_some()
            || self.first_line_head_indent.is_some()
            || self.head_indent.is_some()
            || self.tail_indent.is_some()
            || self.line_break_mode.is_some()
            || self.line_break_strategy.is_some()
            || self.minimum_line_height.is_some()
            || self.maximum_line_height.is_some()
            || self.base_writing_direction.is_some()
            || self.line_height_multiple.is_some()
            || self.hyphenation_factor.is_some()
            || self.allows_default_tightening_for_truncation.is_some()
    }

    /// Returns a copy without a markup styler.
    #[must_use]
    pub(crate) fn without_xml_styler(&self) -> Self {
        Self {
            xml_styler: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SmallCaps, Style, StylePart, Tracking};
    use crate::adapt::AdaptiveStyle;
    use crate::font::Font;
    use text_primitives::{Emphasis, FontFeature, Tag, TextAlignment};

    use std::sync::Arc;

    #[test]
    fn present_fields_override() {
        let base = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 12.0)),
            StylePart::Alignment(TextAlignment::Center),
            StylePart::Tracking(Tracking::Point(1.0)),
        ]);
        let top = Style::from_parts([StylePart::Tracking(Tracking::Point(3.0))]);
        let merged = base.merged_with(&top);
        assert_eq!(merged.font.as_ref().map(Font::size), Some(12.0));
        assert_eq!(merged.alignment, Some(TextAlignment::Center));
        assert_eq!(merged.tracking, Some(Tracking::Point(3.0)));
    }

    #[test]
    fn lists_append_and_sets_union() {
        let a = Style::from_parts([
            StylePart::Adapt(AdaptiveStyle::Control),
            StylePart::Emphasis(Emphasis::BOLD),
            StylePart::SmallCaps(SmallCaps::FromLowercase),
            StylePart::FontFeature(Arc::new(FontFeature::enabled(Tag::new(b"liga")))),
        ]);
        let b = Style::from_parts([
            StylePart::Adapt(AdaptiveStyle::Body),
            StylePart::Emphasis(Emphasis::ITALIC),
            StylePart::SmallCaps(SmallCaps::FromLowercase),
            StylePart::SmallCaps(SmallCaps::FromUppercase),
        ]);
        let merged = a.merged_with(&b);
        assert_eq!(
            merged.adaptations,
            [AdaptiveStyle::Control, AdaptiveStyle::Body]
        );
        assert_eq!(merged.emphasis, Emphasis::BOLD | Emphasis::ITALIC);
        assert_eq!(
            merged.small_caps.as_slice(),
            [SmallCaps::FromLowercase, SmallCaps::FromUppercase]
        );
        assert_eq!(merged.font_feature_providers.len(), 1);
    }

    #[test]
    fn merging_twice_duplicates_list_entries() {
        let a = Style::from_parts([StylePart::Adapt(AdaptiveStyle::Control)]);
        let twice = a.merged_with(&a);
        assert_eq!(twice.adaptations.len(), 2);
    }

    #[test]
    fn merge_is_associative_for_scalars() {
        let a = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 12.0)),
            StylePart::LineSpacing(2.0),
        ]);
        let b = Style::from_parts([StylePart::LineSpacing(4.0), StylePart::Link("a".into())]);
        let c = Style::from_parts([StylePart::Font(Font::new("Georgia", 20.0))]);
        let left = a.merged_with(&b).merged_with(&c);
        let right = a.merged_with(&b.merged_with(&c));
        assert_eq!(left.font, right.font);
        assert_eq!(left.line_spacing, right.line_spacing);
        assert_eq!(left.link, right.link);
        assert_eq!(left.font.as_ref().map(Font::family), Some("Georgia"));
    }
}
