// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-adapting rich text to a presentation context.
//!
//! Behaviours that depend on the presentation context are stored in the attribute set itself, as
//! serialized [`EmbeddedTransformation`] records. A rich text value can therefore be re-adapted
//! by [`adapt_text`] long after the styles that produced it are gone.
//!
//! Records are deduplicated on insert. Records this version cannot decode are kept in the data
//! and skipped when adapting.

mod adaptive_style;

use serde::{Deserialize, Serialize};

pub use adaptive_style::{AdaptiveStyle, ContentSizeCategory};

use crate::attributes::{AttributeSet, TransformationRecord};
use crate::compose::Tab;
use crate::context::StyleContext;
use crate::font::Font;
use crate::style::Tracking;
use crate::RichText;

/// The presentation context that adaptive transformations respond to.
#[derive(Clone, Copy, Debug)]
pub struct AdaptContext<'a> {
    /// The user's preferred content size.
    pub category: ContentSizeCategory,
    /// Host collaborators.
    pub cx: StyleContext<'a>,
}

impl<'a> AdaptContext<'a> {
    /// Creates a context for `category`.
    pub fn new(category: ContentSizeCategory, cx: StyleContext<'a>) -> Self {
        Self { category, cx }
    }
}

impl Default for AdaptContext<'static> {
    fn default() -> Self {
        Self::new(ContentSizeCategory::default(), StyleContext::default())
    }
}

/// A behaviour that can be stored in an [`AttributeSet`] and re-applied later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EmbeddedTransformation {
    /// [`AdaptiveStyle::Control`].
    Control,
    /// [`AdaptiveStyle::Body`].
    Body,
    /// [`AdaptiveStyle::Preferred`].
    Preferred,
    /// [`AdaptiveStyle::Above`].
    Above {
        /// Threshold point size.
        size: f32,
        /// Family to switch to.
        family: String,
    },
    /// [`AdaptiveStyle::Below`].
    Below {
        /// Threshold point size.
        size: f32,
        /// Family to switch to.
        family: String,
    },
    /// [`Tracking::Adobe`], recomputed from the current font.
    AdobeTracking {
        /// Tracking in thousandths of an em.
        size: f32,
    },
    /// [`Tab::Spacer`].
    Spacer {
        /// Padding after the preceding content.
        size: f32,
    },
    /// [`Tab::HeadIndent`].
    #[serde(rename = "headIndent")]
    HeadIndent {
        /// Padding after the preceding content.
        size: f32,
    },
}

impl From<AdaptiveStyle> for EmbeddedTransformation {
    fn from(style: AdaptiveStyle) -> Self {
        match style {
            AdaptiveStyle::Control => Self::Control,
            AdaptiveStyle::Body => Self::Body,
            AdaptiveStyle::Preferred => Self::Preferred,
            AdaptiveStyle::Above { size, family } => Self::Above { size, family },
            AdaptiveStyle::Below { size, family } => Self::Below { size, family },
        }
    }
}

impl From<Tab> for EmbeddedTransformation {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Spacer(size) => Self::Spacer { size },
            Tab::HeadIndent(size) => Self::HeadIndent { size },
        }
    }
}

impl EmbeddedTransformation {
    /// Serializes this transformation.
    pub fn to_record(&self) -> Option<TransformationRecord> {
        match serde_json::to_value(self) {
            Ok(value) => Some(TransformationRecord::from_value(value)),
            Err(err) => {
                log::warn!("cannot serialize {self:?}: {err}");
                None
            }
        }
    }

    /// Decodes a serialized transformation, or returns `None` for unknown or malformed records.
    ///
    /// A record with fields its type does not have is malformed.
    pub fn from_record(record: &TransformationRecord) -> Option<Self> {
        let transformation = match Self::deserialize(record.as_value()) {
            Ok(transformation) => transformation,
            Err(err) => {
                log::debug!("skipping transformation record {:?}: {err}", record.kind());
                return None;
            }
        };
        let fields = transformation.field_names();
        let unknown = record
            .as_value()
            .as_object()
            .and_then(|map| map.keys().find(|key| !fields.contains(&key.as_str())));
        if let Some(key) = unknown {
            log::debug!(
                "skipping transformation record {:?}: unknown field {key:?}",
                record.kind()
            );
            return None;
        }
        Some(transformation)
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Control | Self::Body | Self::Preferred => &["type"],
            Self::Above { .. } | Self::Below { .. } => &["type", "size", "family"],
            Self::AdobeTracking { .. } | Self::Spacer { .. } | Self::HeadIndent { .. } => {
                &["type", "size"]
            }
        }
    }

    /// The tab this transformation re-applies in the text pass, if any.
    pub fn tab(&self) -> Option<Tab> {
        match *self {
            Self::Spacer { size } => Some(Tab::Spacer(size)),
            Self::HeadIndent { size } => Some(Tab::HeadIndent(size)),
            _ => None,
        }
    }

    /// Re-adapts `attributes` to `cx`.
    ///
    /// Returns `None` when this transformation leaves the attributes unchanged.
    pub fn adapt(&self, attributes: &AttributeSet, cx: &AdaptContext<'_>) -> Option<AttributeSet> {
        let font = match self {
            Self::Control | Self::Body | Self::Preferred => {
                let designed = designed_font(attributes)?;
                let size = designed.size();
                let min = AdaptiveStyle::DEFAULT_MINIMUM_SIZE;
                match self {
                    Self::Control => {
                        designed.with_size(AdaptiveStyle::adapt_control(size, cx.category, min))
                    }
                    Self::Body => {
                        designed.with_size(AdaptiveStyle::adapt_body(size, cx.category, min))
                    }
                    _ => preferred_font(designed, cx)?,
                }
            }
            Self::Above { size, family } => {
                let current = attributes.font.as_ref()?;
                switch_family(attributes, current, current.size() > *size, family, cx)
            }
            Self::Below { size, family } => {
                let current = attributes.font.as_ref()?;
                switch_family(attributes, current, current.size() < *size, family, cx)
            }
            Self::AdobeTracking { size } => {
                let kerning = Tracking::Adobe(*size).kerning(attributes.font.as_ref());
                let mut out = attributes.clone();
                if out.shadowed_kerning.is_some() {
                    out.shadowed_kerning = Some(kerning);
                } else {
                    out.kerning = Some(kerning);
                }
                return Some(out);
            }
            Self::Spacer { .. } | Self::HeadIndent { .. } => return None,
        };
        Some(AttributeSet {
            font: Some(font),
            ..attributes.clone()
        })
    }
}

fn designed_font(attributes: &AttributeSet) -> Option<&Font> {
    let font = attributes
        .non_adapted_font
        .as_ref()
        .or(attributes.font.as_ref());
    if font.is_none() {
        log::warn!("no font to adapt");
    }
    font
}

fn preferred_font(designed: &Font, cx: &AdaptContext<'_>) -> Option<Font> {
    let Some(text_style) = designed.text_style() else {
        log::warn!("{designed} has no text style, cannot adapt");
        return None;
    };
    let font = cx.cx.fonts.preferred_font(text_style, cx.category);
    if font.is_none() {
        log::debug!("no preferred font for {text_style:?} at {:?}", cx.category);
    }
    font
}

fn switch_family(
    attributes: &AttributeSet,
    current: &Font,
    crossed: bool,
    family: &str,
    cx: &AdaptContext<'_>,
) -> Font {
    if crossed {
        return cx.cx.fonts.font_with_family(current, family);
    }
    match designed_font(attributes) {
        Some(designed) if current.family() == family && designed.family() != family => {
            cx.cx.fonts.font_with_family(current, designed.family())
        }
        _ => current.clone(),
    }
}

/// Returns `attributes` with `transformation` added to its transformation list.
///
/// Adding a transformation whose record is already present leaves the list unchanged.
pub fn embed(transformation: &EmbeddedTransformation, attributes: &AttributeSet) -> AttributeSet {
    let mut out = attributes.clone();
    if let Some(record) = transformation.to_record() {
        out.insert_transformation(record);
    }
    out
}

/// Decodes every transformation stored in `attributes`, skipping records that do not decode.
pub fn decode_all(attributes: &AttributeSet) -> Vec<EmbeddedTransformation> {
    attributes
        .transformations
        .iter()
        .filter_map(EmbeddedTransformation::from_record)
        .collect()
}

/// Applies `transformations` to `attributes` in order.
pub fn reapply(
    transformations: &[EmbeddedTransformation],
    attributes: &AttributeSet,
    cx: &AdaptContext<'_>,
) -> AttributeSet {
    let mut out = attributes.clone();
    for transformation in transformations {
        if let Some(adapted) = transformation.adapt(&out, cx) {
            out = adapted;
        }
    }
    out
}

/// Re-adapts `attributes` using the transformations embedded in it.
pub fn adapt_attributes(attributes: &AttributeSet, cx: &AdaptContext<'_>) -> AttributeSet {
    reapply(&decode_all(attributes), attributes, cx)
}

/// Re-adapts every run of `text` to `cx`.
///
/// After the attributes of every run are adapted, embedded tabs recompute their tab stops with the
/// context's [`TextMeasure`](crate::TextMeasure), since the width of the text before them may have
/// changed.
pub fn adapt_text(text: &RichText, cx: &AdaptContext<'_>) -> RichText {
    let tabs: Vec<_> = text
        .runs()
        .filter_map(|(range, attributes)| {
            let tabs: Vec<Tab> = decode_all(attributes)
                .iter()
                .filter_map(EmbeddedTransformation::tab)
                .collect();
            (!tabs.is_empty()).then_some((range, tabs))
        })
        .collect();

    let mut out = text.clone();
    out.map_runs(|_, attributes| adapt_attributes(attributes, cx));
    for (range, run_tabs) in tabs {
        for tab in run_tabs {
            if let Err(err) = tab.update(&mut out, range.clone(), cx.cx.measure) {
                log::warn!("cannot place the stop of {tab:?}: {err}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        adapt_attributes, decode_all, embed, AdaptContext, AdaptiveStyle, ContentSizeCategory,
        EmbeddedTransformation,
    };
    use crate::attributes::{AttributeSet, TransformationRecord};
    use crate::context::StyleContext;
    use crate::font::{Font, FontProvider, TextStyle};
    use crate::style::{Style, StylePart, Tracking};
    use serde_json::json;

    fn context(category: ContentSizeCategory) -> AdaptContext<'static> {
        AdaptContext::new(category, StyleContext::default())
    }

    #[test]
    fn records_use_type_tags() {
        let record = EmbeddedTransformation::Above {
            size: 20.0,
            family: "Avenir Next".into(),
        }
        .to_record()
        .unwrap();
        assert_eq!(
            record.as_value(),
            &json!({"type": "above", "size": 20.0, "family": "Avenir Next"})
        );
        let record = EmbeddedTransformation::HeadIndent { size: 4.0 }
            .to_record()
            .unwrap();
        assert_eq!(record.kind(), Some("headIndent"));
        let record = EmbeddedTransformation::AdobeTracking { size: 300.0 }
            .to_record()
            .unwrap();
        assert_eq!(record.kind(), Some("adobe-tracking"));
    }

    #[test]
    fn embed_round_trips_and_deduplicates() {
        let transformation = EmbeddedTransformation::Below {
            size: 12.0,
            family: "Georgia".into(),
        };
        let attrs = embed(&transformation, &AttributeSet::new());
        let attrs = embed(&transformation, &attrs);
        assert_eq!(attrs.transformations.len(), 1);
        let decoded = decode_all(&attrs);
        assert_eq!(decoded, [transformation.clone()]);
        assert_eq!(decoded[0].to_record(), transformation.to_record());
    }

    #[test]
    fn unknown_records_are_skipped() {
        let mut attrs = AttributeSet::new();
        attrs.insert_transformation(TransformationRecord::from_value(
            json!({"type": "wobble", "size": 3}),
        ));
        attrs.insert_transformation(TransformationRecord::from_value(json!({"type": "above"})));
        attrs.insert_transformation(TransformationRecord::from_value(
            json!({"type": "control", "size": 3}),
        ));
        attrs.insert_transformation(TransformationRecord::from_value(
            json!({"type": "spacer", "size": 3, "family": "Georgia"}),
        ));
        attrs.insert_transformation(TransformationRecord::from_value(
            json!({"type": "spacer", "size": 3}),
        ));
        attrs = embed(&EmbeddedTransformation::Control, &attrs);
        assert_eq!(attrs.transformations.len(), 6);
        assert_eq!(
            decode_all(&attrs),
            [
                EmbeddedTransformation::Spacer { size: 3.0 },
                EmbeddedTransformation::Control
            ]
        );
    }

    #[test]
    fn adaptation_does_not_compound() {
        let style = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 28.0)),
            StylePart::Adapt(AdaptiveStyle::Control),
        ]);
        let attrs = style.attributes(&crate::BasicFontProvider);
        let small = context(ContentSizeCategory::ExtraSmall);
        let once = adapt_attributes(&attrs, &small);
        let twice = adapt_attributes(&once, &small);
        assert_eq!(once.font.as_ref().map(Font::size), Some(25.0));
        assert_eq!(twice.font.as_ref().map(Font::size), Some(25.0));
        let large = adapt_attributes(&twice, &context(ContentSizeCategory::Large));
        assert_eq!(large.font.as_ref().map(Font::size), Some(28.0));
    }

    #[test]
    fn adobe_tracking_follows_adapted_font() {
        let style = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 30.0)),
            StylePart::Adapt(AdaptiveStyle::Body),
            StylePart::Tracking(Tracking::Adobe(300.0)),
        ]);
        let attrs = style.attributes(&crate::BasicFontProvider);
        assert_eq!(attrs.kerning, Some(9.0));
        let adapted = adapt_attributes(&attrs, &context(ContentSizeCategory::ExtraExtraLarge));
        assert_eq!(adapted.font.as_ref().map(Font::size), Some(34.0));
        assert_eq!(adapted.kerning, Some(34.0 * 0.3));
    }

    #[test]
    fn above_switches_family_and_back() {
        let style = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 20.0)),
            StylePart::Adapt(AdaptiveStyle::Body),
            StylePart::Adapt(AdaptiveStyle::Above {
                size: 22.0,
                family: "Georgia".into(),
            }),
        ]);
        let attrs = style.attributes(&crate::BasicFontProvider);
        let big = adapt_attributes(&attrs, &context(ContentSizeCategory::ExtraExtraLarge));
        let font = big.font.clone().unwrap();
        assert_eq!((font.family(), font.size()), ("Georgia", 24.0));
        let small = adapt_attributes(&big, &context(ContentSizeCategory::Small));
        let font = small.font.unwrap();
        assert_eq!((font.family(), font.size()), ("Avenir", 18.0));
    }

    #[derive(Debug)]
    struct PreferredFonts;

    impl FontProvider for PreferredFonts {
        fn preferred_font(
            &self,
            text_style: TextStyle,
            category: ContentSizeCategory,
        ) -> Option<Font> {
            let size = 17.0 + category.point_shift();
            Some(Font::preferred("System", size, text_style))
        }
    }

    #[test]
    fn preferred_asks_the_font_provider() {
        let fonts = PreferredFonts;
        let cx = AdaptContext::new(
            ContentSizeCategory::AccessibilityMedium,
            StyleContext::new(&fonts, &crate::MonospaceMeasure::DEFAULT),
        );
        let style = Style::from_parts([
            StylePart::Font(Font::preferred("System", 17.0, TextStyle::Body)),
            StylePart::Adapt(AdaptiveStyle::Preferred),
        ]);
        let adapted = adapt_attributes(&style.attributes(&fonts), &cx);
        assert_eq!(adapted.font.as_ref().map(Font::size), Some(28.0));

        let plain = Style::from_parts([
            StylePart::Font(Font::new("Avenir", 17.0)),
            StylePart::Adapt(AdaptiveStyle::Preferred),
        ]);
        let attrs = plain.attributes(&fonts);
        assert_eq!(adapt_attributes(&attrs, &cx), attrs);
    }

    #[test]
    fn adaptive_styles_need_a_font() {
        let style = Style::from_parts([StylePart::Adapt(AdaptiveStyle::Control)]);
        let attrs = style.attributes(&crate::BasicFontProvider);
        assert!(attrs.transformations.is_empty());
        assert!(attrs.non_adapted_font.is_none());
    }
}
