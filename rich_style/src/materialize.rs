// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiling styles into attribute sets.

use text_primitives::FontFeature;

use crate::adapt::{self, EmbeddedTransformation};
use crate::attributes::{AttributeSet, ParagraphAttributes};
use crate::context::StyleContext;
use crate::font::FontProvider;
use crate::markup::{self, MarkupOptions};
use crate::style::{FontFeatureProvider, Style, Tracking, VerticalPosition};
use crate::RichText;

/// Compiles `style` into an attribute set.
///
/// The output starts as a copy of `existing`. Fields present in the style overwrite the
/// corresponding attributes; absent fields never clear anything. Feature toggles and emphasis are
/// resolved against the current font through `fonts`, and the style's content size behaviours and
/// proportional tracking are embedded as transformation records.
pub fn materialize(
    style: &Style,
    existing: Option<&AttributeSet>,
    fonts: &dyn FontProvider,
) -> AttributeSet {
    let mut out = existing.cloned().unwrap_or_default();
    for (key, value) in &style.extra {
        out.extra.insert(key.clone(), value.clone());
    }

    write_direct_attributes(style, &mut out);
    write_paragraph(style, &mut out);

    let features = collect_features(style);
    if !features.is_empty() {
        if let Some(font) = &out.font {
            out.font = Some(fonts.apply_features(font, &features));
        }
    }

    if !style.emphasis.is_empty() {
        if let Some(font) = &out.font {
            match fonts.apply_traits(font, font.traits() | style.emphasis) {
                Some(font) => out.font = Some(font),
                None => log::debug!("{font} has no variant with traits {:?}", style.emphasis),
            }
        }
    }

    for adaptation in &style.adaptations {
        let Some(font) = out.font.clone() else {
            log::warn!("{adaptation:?} needs a font to adapt, skipping");
            continue;
        };
        out.non_adapted_font = Some(font);
        out = adapt::embed(&EmbeddedTransformation::from(adaptation.clone()), &out);
    }

    if let Some(tracking) = &style.tracking {
        out.kerning = Some(tracking.kerning(out.font.as_ref()));
        if let Tracking::Adobe(size) = *tracking {
            out = adapt::embed(&EmbeddedTransformation::AdobeTracking { size }, &out);
        }
    }

    out
}

fn write_direct_attributes(style: &Style, out: &mut AttributeSet) {
    macro_rules! update_if_present {
        ($($field:ident),* $(,)?) => {
            $(
                if style.$field.is_some() {
                    out.$field.clone_from(&style.$field);
                }
            )*
        };
    }
    update_if_present!(font, link, color, background_color, baseline_offset, ligatures);
    if let Some((line, color)) = style.underline {
        out.underline_style = Some(line);
        if color.is_some() {
            out.underline_color = color;
        }
    }
    if let Some((line, color)) = style.strikethrough {
        out.strikethrough_style = Some(line);
        if color.is_some() {
            out.strikethrough_color = color;
        }
    }
}

fn write_paragraph(style: &Style, out: &mut AttributeSet) {
    let mut p = out.paragraph.take().unwrap_or_default();
    macro_rules! overwrite {
        ($($target:ident <- $field:ident),* $(,)?) => {
            $(
                if let Some(value) = style.$field {
                    p.$target = value;
                }
            )*
        };
    }
    overwrite!(
        alignment <- alignment,
        line_spacing <- line_spacing,
        paragraph_spacing <- paragraph_spacing_after,
        paragraph_spacing_before <- paragraph_spacing_before,
        first_line_head_indent <- first_line_head_indent,
        head_indent <- head_indent,
        tail_indent <- tail_indent,
        line_break_mode <- line_break_mode,
        line_break_strategy <- line_break_strategy,
        minimum_line_height <- minimum_line_height,
        maximum_line_height <- maximum_line_height,
        base_writing_direction <- base_writing_direction,
        line_height_multiple <- line_height_multiple,
        hyphenation_factor <- hyphenation_factor,
        allows_default_tightening_for_truncation <- allows_default_tightening_for_truncation,
    );
    out.paragraph = (p != ParagraphAttributes::default()).then_some(p);
}

fn collect_features(style: &Style) -> Vec<FontFeature> {
    let mut providers: Vec<&dyn FontFeatureProvider> = style
        .font_feature_providers
        .iter()
        .map(|provider| &**provider)
        .collect();
    if let Some(number_case) = &style.number_case {
        providers.push(number_case);
    }
    if let Some(number_spacing) = &style.number_spacing {
        providers.push(number_spacing);
    }
    if let Some(fractions) = &style.fractions {
        providers.push(fractions);
    }
    let positions: Vec<VerticalPosition> = [
        (style.superscript, VerticalPosition::Superscript),
        (style.subscript, VerticalPosition::Subscript),
        (style.ordinals, VerticalPosition::Ordinals),
        (style.scientific_inferiors, VerticalPosition::ScientificInferiors),
    ]
    .into_iter()
    .filter_map(|(flag, variant)| Some(VerticalPosition::toggled(variant, flag?)))
    .collect();
    for position in &positions {
        providers.push(position);
    }
    for small_caps in &style.small_caps {
        providers.push(small_caps);
    }
    if !style.stylistic_alternates.is_empty() {
        providers.push(&style.stylistic_alternates);
    }
    if !style.contextual_alternates.is_empty() {
        providers.push(&style.contextual_alternates);
    }
    providers
        .into_iter()
        .flat_map(|provider| provider.feature_settings())
        .collect()
}

impl Style {
    /// Compiles this style on its own. See [`materialize`].
    pub fn attributes(&self, fonts: &dyn FontProvider) -> AttributeSet {
        materialize(self, None, fonts)
    }

    /// Compiles this style on top of `existing`, overwriting the attributes it sets.
    pub fn attributes_with(
        &self,
        existing: &AttributeSet,
        fonts: &dyn FontProvider,
    ) -> AttributeSet {
        materialize(self, Some(existing), fonts)
    }

    /// Compiles this style as defaults for `existing`.
    ///
    /// Attributes already in `existing` win over the style's. See
    /// [`AttributeSet::supplying_defaults_for`].
    pub fn supply_defaults(
        &self,
        existing: Option<&AttributeSet>,
        fonts: &dyn FontProvider,
    ) -> AttributeSet {
        let attributes = self.attributes(fonts);
        match existing {
            Some(existing) => attributes.supplying_defaults_for(existing),
            None => attributes,
        }
    }

    /// Styles `text` with this style.
    ///
    /// If the style has a markup styler, `text` is compiled as markup; when that fails the error
    /// is logged and the text is styled as plain text. Plain text has the style's transform
    /// applied and gets the style as defaults for `existing`.
    pub fn attributed_string(
        &self,
        text: &str,
        existing: Option<&AttributeSet>,
        cx: &StyleContext<'_>,
    ) -> RichText {
        if let Some(styler) = &self.xml_styler {
            match markup::compile(text, self, styler.clone(), MarkupOptions::default(), cx) {
                Ok(rich) => return rich,
                Err(err) => log::warn!("styling {text:?} as plain text: {err}"),
            }
        }
        self.plain_attributed_string(text, existing, cx.fonts)
    }

    pub(crate) fn plain_attributed_string(
        &self,
        text: &str,
        existing: Option<&AttributeSet>,
        fonts: &dyn FontProvider,
    ) -> RichText {
        let attributes = self.supply_defaults(existing, fonts);
        match &self.transform {
            Some(transform) => RichText::from_text(transform.apply(text), attributes),
            None => RichText::from_text(text, attributes),
        }
    }
}
