// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The concrete per-run attribute schema that styles compile to.

use std::ops::BitOr;

use hashbrown::HashMap;
use peniko::Color;
use serde_json::Value;
use text_primitives::{LineBreakMode, LineBreakStrategy, TextAlignment, WritingDirection};

use crate::font::Font;
use crate::image::Image;

/// An opaque passthrough value for attributes that only the host understands.
pub type ExtraValue = Value;

/// Line style for underlines and strikethroughs, combined as a set of flags.
///
/// The raw values follow the common host encoding: a thickness in the low byte, a dash pattern in
/// the second byte and a by-word flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct UnderlineStyle(u32);

impl UnderlineStyle {
    /// No line.
    pub const NONE: Self = Self(0x00);
    /// A single thin line.
    pub const SINGLE: Self = Self(0x01);
    /// A single thick line.
    pub const THICK: Self = Self(0x02);
    /// Two thin lines.
    pub const DOUBLE: Self = Self(0x09);
    /// Dotted pattern.
    pub const PATTERN_DOT: Self = Self(0x0100);
    /// Dashed pattern.
    pub const PATTERN_DASH: Self = Self(0x0200);
    /// Dash-dot pattern.
    pub const PATTERN_DASH_DOT: Self = Self(0x0300);
    /// Dash-dot-dot pattern.
    pub const PATTERN_DASH_DOT_DOT: Self = Self(0x0400);
    /// Only draw under words, not whitespace.
    pub const BY_WORD: Self = Self(0x8000);

    /// Creates a style from its raw value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl BitOr for UnderlineStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Ligature behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Ligatures {
    /// Only ligatures required for correct rendering.
    Disabled = 0,
    /// The font's standard ligatures.
    #[default]
    Default = 1,
    /// Every ligature the font has.
    All = 2,
}

/// A tab stop within a paragraph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabStop {
    /// Distance from the leading edge of the paragraph, in points.
    pub location: f32,
    /// How text aligns to the stop.
    pub alignment: TextAlignment,
}

impl TabStop {
    /// A naturally aligned stop at `location`.
    pub const fn natural(location: f32) -> Self {
        Self {
            location,
            alignment: TextAlignment::Natural,
        }
    }
}

/// Paragraph layout attributes, stored as one value per run.
///
/// [`ParagraphAttributes::default`] is the host's default paragraph. Materialization only attaches
/// a paragraph to a run when it differs from that default.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphAttributes {
    /// Horizontal alignment.
    pub alignment: TextAlignment,
    /// Extra space between lines.
    pub line_spacing: f32,
    /// Space after the paragraph.
    pub paragraph_spacing: f32,
    /// Space before the paragraph.
    pub paragraph_spacing_before: f32,
    /// Indent of the first line.
    pub first_line_head_indent: f32,
    /// Indent of every line but the first.
    pub head_indent: f32,
    /// Trailing indent; negative values are measured from the trailing edge.
    pub tail_indent: f32,
    /// Line breaking behaviour.
    pub line_break_mode: LineBreakMode,
    /// Extra line breaking heuristics.
    pub line_break_strategy: LineBreakStrategy,
    /// Minimum line height, `0` for none.
    pub minimum_line_height: f32,
    /// Maximum line height, `0` for none.
    pub maximum_line_height: f32,
    /// Base writing direction.
    pub base_writing_direction: WritingDirection,
    /// Line height multiplier, `0` for the natural height.
    pub line_height_multiple: f32,
    /// Hyphenation threshold between `0` and `1`.
    pub hyphenation_factor: f32,
    /// Whether glyphs may be tightened before truncating.
    pub allows_default_tightening_for_truncation: bool,
    /// Tab stops, sorted by how they were assigned.
    pub tab_stops: Vec<TabStop>,
    /// Interval of implicit tab stops after the last explicit one, `0` for none.
    pub default_tab_interval: f32,
}

impl ParagraphAttributes {
    /// Number of tab stops in a default paragraph.
    pub const DEFAULT_TAB_STOP_COUNT: usize = 12;
    /// Spacing of the tab stops in a default paragraph.
    pub const DEFAULT_TAB_STOP_INTERVAL: f32 = 28.0;

    /// Sets tab stop `index` to a natural stop at `location`, adding default stops before it as
    /// needed.
    pub fn set_tab_stop(&mut self, index: usize, location: f32) {
        while self.tab_stops.len() <= index {
            let next = self.tab_stops.len() + 1;
            self.tab_stops
                .push(TabStop::natural(next as f32 * Self::DEFAULT_TAB_STOP_INTERVAL));
        }
        self.tab_stops[index] = TabStop::natural(location);
    }

    /// Fills every field of `self` that still has its default value from `defaults`.
    #[must_use]
    pub fn supplying_defaults(&self, defaults: &Self) -> Self {
        let base = Self::default();
        let mut p = self.clone();
        macro_rules! supply {
            ($($field:ident),* $(,)?) => {
                $(
                    if p.$field == base.$field {
                        p.$field.clone_from(&defaults.$field);
                    }
                )*
            };
        }
        supply!(
            alignment,
            line_spacing,
            paragraph_spacing,
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
            tab_stops,
            default_tab_interval,
        );
        p
    }
}

impl Default for ParagraphAttributes {
    fn default() -> Self {
        let tab_stops = (1..=Self::DEFAULT_TAB_STOP_COUNT)
            .map(|i| TabStop::natural(i as f32 * Self::DEFAULT_TAB_STOP_INTERVAL))
            .collect();
        Self {
            alignment: TextAlignment::Natural,
            line_spacing: 0.0,
            paragraph_spacing: 0.0,
            paragraph_spacing_before: 0.0,
            first_line_head_indent: 0.0,
            head_indent: 0.0,
            tail_indent: 0.0,
            line_break_mode: LineBreakMode::WordWrapping,
            line_break_strategy: LineBreakStrategy::NONE,
            minimum_line_height: 0.0,
            maximum_line_height: 0.0,
            base_writing_direction: WritingDirection::Natural,
            line_height_multiple: 0.0,
            hyphenation_factor: 0.0,
            allows_default_tightening_for_truncation: false,
            tab_stops,
            default_tab_interval: 0.0,
        }
    }
}

/// One serialized adaptive transformation, as stored in an [`AttributeSet`].
///
/// Records are kept as structured data rather than decoded values so that kinds this version
/// does not know about survive a round trip through the attribute set.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformationRecord(Value);

impl TransformationRecord {
    /// Wraps a serialized record.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The serialized record.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `type` tag of the record, if it has one.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }
}

/// An image standing in for the U+FFFC character it is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    /// The image.
    pub image: Image,
    /// Offset of the image's bottom edge from the baseline, in points.
    pub baseline_offset: f32,
    /// Color a template image is tinted with.
    pub tint: Option<Color>,
}

/// The formatting of one run of rich text.
///
/// Every attribute this engine produces has a typed field. `extra` carries opaque values that are
/// passed through untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    /// The font.
    pub font: Option<Font>,
    /// Link target.
    pub link: Option<String>,
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub background_color: Option<Color>,
    /// Underline style.
    pub underline_style: Option<UnderlineStyle>,
    /// Underline color.
    pub underline_color: Option<Color>,
    /// Strikethrough style.
    pub strikethrough_style: Option<UnderlineStyle>,
    /// Strikethrough color.
    pub strikethrough_color: Option<Color>,
    /// Baseline offset in points.
    pub baseline_offset: Option<f32>,
    /// Ligature behaviour.
    pub ligatures: Option<Ligatures>,
    /// Active kerning added after each character, in points.
    pub kerning: Option<f32>,
    /// Kerning held back from the last character of composed text.
    pub shadowed_kerning: Option<f32>,
    /// Paragraph attributes, when different from the default paragraph.
    pub paragraph: Option<ParagraphAttributes>,
    /// The font as styled, before any content size adaptation.
    pub non_adapted_font: Option<Font>,
    /// An inline image.
    pub attachment: Option<Attachment>,
    /// Embedded adaptive transformations, without duplicates.
    pub transformations: Vec<TransformationRecord>,
    /// Opaque host attributes.
    pub extra: HashMap<String, ExtraValue>,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attributes present.
    ///
    /// The transformation list counts as one attribute when it is non-empty, and every extra
    /// attribute counts individually.
    pub fn len(&self) -> usize {
        let present = [
            self.font.is_some(),
            self.link.is_some(),
            self.color.is_some(),
            self.background_color.is_some(),
            self.underline_style.is_some(),
            self.underline_color.is_some(),
            self.strikethrough_style.is_some(),
            self.strikethrough_color.is_some(),
            self.baseline_offset.is_some(),
            self.ligatures.is_some(),
            self.kerning.is_some(),
            self.shadowed_kerning.is_some(),
            self.paragraph.is_some(),
            self.non_adapted_font.is_some(),
            self.attachment.is_some(),
            !self.transformations.is_empty(),
        ];
        present.iter().filter(|p| **p).count() + self.extra.len()
    }

    /// Returns `true` if no attributes are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `record` to the transformation list unless an equal record is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert_transformation(&mut self, record: TransformationRecord) -> bool {
        if self.transformations.contains(&record) {
            return false;
        }
        self.transformations.push(record);
        true
    }

    /// Returns a set where `self` supplies every attribute that `existing` lacks.
    ///
    /// Attributes already in `existing` win. Paragraphs merge field by field, with the existing
    /// paragraph's non-default fields winning. Transformation lists concatenate with the existing
    /// records last, so they are reapplied after the defaults and win over them.
    #[must_use]
    pub fn supplying_defaults_for(&self, existing: &Self) -> Self {
        let mut out = existing.clone();
        macro_rules! supply {
            ($($field:ident),* $(,)?) => {
                $(
                    if out.$field.is_none() {
                        out.$field.clone_from(&self.$field);
                    }
                )*
            };
        }
        supply!(
            font,
            link,
            color,
            background_color,
            underline_style,
            underline_color,
            strikethrough_style,
            strikethrough_color,
            baseline_offset,
            ligatures,
            kerning,
            shadowed_kerning,
            non_adapted_font,
            attachment,
        );
        out.paragraph = match (&existing.paragraph, &self.paragraph) {
            (Some(existing), Some(defaults)) => Some(existing.supplying_defaults(defaults)),
            (existing, defaults) => existing.clone().or_else(|| defaults.clone()),
        };
        out.transformations.clone_from(&self.transformations);
        for record in &existing.transformations {
            out.insert_transformation(record.clone());
        }
        for (key, value) in &self.extra {
            out.extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeSet, ParagraphAttributes, TransformationRecord};
    use crate::font::Font;
use crate::image::Image;
    use serde_json::json;
    use text_primitives::TextAlignment;

    #[test]
    fn default_paragraph_has_twelve_stops() {
        let p = ParagraphAttributes::default();
        assert_eq!(p.tab_stops.len(), 12);
        assert_eq!(p.tab_stops[11].location, 336.0);
    }

    #[test]
    fn set_tab_stop_extends_with_default_interval() {
        let mut p = ParagraphAttributes {
            tab_stops: Vec::new(),
            ..ParagraphAttributes::default()
        };
        p.set_tab_stop(2, 100.0);
        let locations: Vec<f32> = p.tab_stops.iter().map(|t| t.location).collect();
        assert_eq!(locations, [28.0, 56.0, 100.0]);
    }

    #[test]
    fn existing_attributes_win_when_supplying_defaults() {
        let defaults = AttributeSet {
            font: Some(Font::new("Avenir", 12.0)),
            kerning: Some(2.0),
            paragraph: Some(ParagraphAttributes {
                alignment: TextAlignment::Center,
                head_indent: 10.0,
                ..ParagraphAttributes::default()
            }),
            transformations: vec![TransformationRecord::from_value(json!({"type": "body"}))],
            ..AttributeSet::default()
        };
        let existing = AttributeSet {
            font: Some(Font::new("Georgia", 20.0)),
            paragraph: Some(ParagraphAttributes {
                alignment: TextAlignment::Right,
                ..ParagraphAttributes::default()
            }),
            transformations: vec![TransformationRecord::from_value(json!({"type": "control"}))],
            ..AttributeSet::default()
        };
        let merged = defaults.supplying_defaults_for(&existing);
        assert_eq!(merged.font.as_ref().map(Font::family), Some("Georgia"));
        assert_eq!(merged.kerning, Some(2.0));
        let paragraph = merged.paragraph.unwrap();
        assert_eq!(paragraph.alignment, TextAlignment::Right);
        assert_eq!(paragraph.head_indent, 10.0);
        let kinds: Vec<_> = merged.transformations.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, [Some("body"), Some("control")]);
    }

    #[test]
    fn insert_transformation_deduplicates() {
        let mut attrs = AttributeSet::new();
        let record =
            TransformationRecord::from_value(json!({"type": "adobe-tracking", "size": 300.0}));
        assert!(attrs.insert_transformation(record.clone()));
        assert!(!attrs.insert_transformation(record));
        assert_eq!(attrs.transformations.len(), 1);
        assert_eq!(attrs.len(), 1);
    }
}
