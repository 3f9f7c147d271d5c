// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::Color;
use text_primitives::{Emphasis, LineBreakMode, LineBreakStrategy, TextAlignment, WritingDirection};

use super::{
    ContextualAlternates, FontFeatureProvider, Fractions, NumberCase, NumberSpacing, SmallCaps,
    Style, StylisticAlternates, Tracking, Transform,
};
use crate::adapt::AdaptiveStyle;
use crate::attributes::{ExtraValue, Ligatures, UnderlineStyle};
use crate::font::Font;
use crate::markup::{RuleStyler, XmlStyleRule, XmlStyler};
use crate::special::Special;

/// A single style declaration.
///
/// A list of parts is the most compact way to write a style. Parts are applied in order with
/// [`Style::update`]; for scalar fields the last part wins.
#[derive(Clone, Debug)]
pub enum StylePart {
    /// A host attribute passed through verbatim.
    Extra(String, ExtraValue),
    /// The font.
    Font(Font),
    /// Link target.
    Link(String),
    /// Foreground color.
    Color(Color),
    /// Background color.
    BackgroundColor(Color),
    /// Underline style and color.
    Underline(UnderlineStyle, Option<Color>),
    /// Strikethrough style and color.
    Strikethrough(UnderlineStyle, Option<Color>),
    /// Baseline offset.
    BaselineOffset(f32),
    /// Ligature behaviour.
    Ligatures(Ligatures),

    /// Horizontal alignment.
    Alignment(TextAlignment),
    /// Extra space between lines.
    LineSpacing(f32),
    /// Space after each paragraph.
    ParagraphSpacingAfter(f32),
    /// Space before each paragraph.
    ParagraphSpacingBefore(f32),
    /// Indent of the first line.
    FirstLineHeadIndent(f32),
    /// Indent of the lines after the first.
    HeadIndent(f32),
    /// Trailing indent.
    TailIndent(f32),
    /// Line breaking behaviour.
    LineBreakMode(LineBreakMode),
    /// Extra line breaking heuristics.
    LineBreakStrategy(LineBreakStrategy),
    /// Minimum line height.
    MinimumLineHeight(f32),
    /// Maximum line height.
    MaximumLineHeight(f32),
    /// Base writing direction.
    BaseWritingDirection(WritingDirection),
    /// Line height multiplier.
    LineHeightMultiple(f32),
    /// Hyphenation threshold.
    HyphenationFactor(f32),
    /// Whether glyphs may be tightened before truncating.
    AllowsDefaultTighteningForTruncation(bool),

    /// Numeral height.
    NumberCase(NumberCase),
    /// Numeral width.
    NumberSpacing(NumberSpacing),
    /// Fraction forms.
    Fractions(Fractions),
    /// Superscript forms on or off.
    Superscript(bool),
    /// Subscript forms on or off.
    Subscript(bool),
    /// Ordinal forms on or off.
    Ordinals(bool),
    /// Scientific inferior forms on or off.
    ScientificInferiors(bool),
    /// Adds a small caps mode.
    SmallCaps(SmallCaps),
    /// Specifies stylistic sets, keeping the ones it leaves unspecified.
    StylisticAlternates(StylisticAlternates),
    /// Specifies contextual alternates, keeping the ones it leaves unspecified.
    ContextualAlternates(ContextualAlternates),
    /// Appends a feature provider.
    FontFeature(Arc<dyn FontFeatureProvider>),

    /// Appends a content size behaviour.
    Adapt(AdaptiveStyle),
    /// Replaces the symbolic traits.
    Emphasis(Emphasis),
    /// Inter-character spacing.
    Tracking(Tracking),
    /// Case transformation.
    Transform(Transform),
    /// Compiles text as markup with this styler.
    XmlStyler(Arc<dyn XmlStyler>),
    /// Compiles text as markup with these rules, followed by the special character rules.
    XmlRules(Vec<XmlStyleRule>),
    /// Merges a whole style.
    Style(Style),
}

impl Style {
    /// Applies one part to this style.
    pub fn update(&mut self, part: StylePart) {
        match part {
            StylePart::Extra(key, value) => {
                self.extra.insert(key, value);
            }
            StylePart::Font(font) => self.font = Some(font),
            StylePart::Link(link) => self.link = Some(link),
            StylePart::Color(color) => self.color = Some(color),
            StylePart::BackgroundColor(color) => self.background_color = Some(color),
            StylePart::Underline(style, color) => self.underline = Some((style, color)),
            StylePart::Strikethrough(style, color) => self.strikethrough = Some((style, color)),
            StylePart::BaselineOffset(offset) => self.baseline_offset = Some(offset),
            StylePart::Ligatures(ligatures) => self.ligatures = Some(ligatures),
            StylePart::Alignment(alignment) => self.alignment = Some(alignment),
            StylePart::LineSpacing(v) => self.line_spacing = Some(v),
            StylePart::ParagraphSpacingAfter(v) => self.paragraph_spacing_after = Some(v),
            StylePart::ParagraphSpacingBefore(v) => self.paragraph_spacing_before = Some(v),
            StylePart::FirstLineHeadIndent(v) => self.first_line_head_indent = Some(v),
            StylePart::HeadIndent(v) => self.head_indent = Some(v),
            StylePart::TailIndent(v) => self.tail_indent = Some(v),
            StylePart::LineBreakMode(mode) => self.line_break_mode = Some(mode),
            StylePart::LineBreakStrategy(strategy) => self.line_break_strategy = Some(strategy),
            StylePart::MinimumLineHeight(v) => self.minimum_line_height = Some(v),
            StylePart::MaximumLineHeight(v) => self.maximum_line_height = Some(v),
            StylePart::BaseWritingDirection(d) => self.base_writing_direction = Some(d),
            StylePart::LineHeightMultiple(v) => self.line_height_multiple = Some(v),
            StylePart::HyphenationFactor(v) => self.hyphenation_factor = Some(v),
            StylePart::AllowsDefaultTighteningForTruncation(v) => {
                self.allows_default_tightening_for_truncation = Some(v);
            }
            StylePart::NumberCase(v) => self.number_case = Some(v),
            StylePart::NumberSpacing(v) => self.number_spacing = Some(v),
            StylePart::Fractions(v) => self.fractions = Some(v),
            StylePart::Superscript(v) => self.superscript = Some(v),
            StylePart::Subscript(v) => self.subscript = Some(v),
            StylePart::Ordinals(v) => self.ordinals = Some(v),
            StylePart::ScientificInferiors(v) => self.scientific_inferiors = Some(v),
            StylePart::SmallCaps(small_caps) => self.insert_small_caps(small_caps),
            StylePart::StylisticAlternates(v) => self.stylistic_alternates.add(&v),
            StylePart::ContextualAlternates(v) => self.contextual_alternates.add(&v),
            StylePart::FontFeature(provider) => self.font_feature_providers.push(provider),
            StylePart::Adapt(adaptation) => self.adaptations.push(adaptation),
            StylePart::Emphasis(emphasis) => self.emphasis = emphasis,
            StylePart::Tracking(tracking) => self.tracking = Some(tracking),
            StylePart::Transform(transform) => self.transform = Some(transform),
            StylePart::XmlStyler(styler) => self.xml_styler = Some(styler),
            StylePart::XmlRules(mut rules) => {
                rules.extend(Special::insertion_rules());
                self.xml_styler = Some(Arc::new(RuleStyler::new(rules)));
            }
            StylePart::Style(style) => self.add(&style),
        }
    }
}
