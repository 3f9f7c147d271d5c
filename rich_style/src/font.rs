// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font values and the font resource collaborator.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use text_primitives::{Emphasis, FontFeature};

use crate::adapt::ContentSizeCategory;

/// A semantic text style that a host can map to a preferred, scalable font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// Large title.
    LargeTitle,
    /// First level title.
    Title1,
    /// Second level title.
    Title2,
    /// Third level title.
    Title3,
    /// Headline.
    Headline,
    /// Subheadline.
    Subheadline,
    /// Body text.
    Body,
    /// Callout.
    Callout,
    /// Footnote.
    Footnote,
    /// Primary caption.
    Caption1,
    /// Secondary caption.
    Caption2,
}

/// A concrete font: family, point size, symbolic traits and applied feature settings.
///
/// Fonts are plain values. Deriving a new font never mutates the original; every `with_*` method
/// returns a copy with one property changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    family: Arc<str>,
    size: f32,
    traits: Emphasis,
    features: SmallVec<[FontFeature; 4]>,
    text_style: Option<TextStyle>,
}

impl Font {
    /// Creates a font of `family` at `size` points.
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            traits: Emphasis::NONE,
            features: SmallVec::new(),
            text_style: None,
        }
    }

    /// Creates a font that is known to the host as the preferred font for `text_style`.
    pub fn preferred(family: &str, size: f32, text_style: TextStyle) -> Self {
        Self {
            text_style: Some(text_style),
            ..Self::new(family, size)
        }
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The point size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The symbolic traits of this font.
    pub fn traits(&self) -> Emphasis {
        self.traits
    }

    /// The feature settings applied to this font, in application order.
    pub fn features(&self) -> &[FontFeature] {
        &self.features
    }

    /// The semantic text style this font was created for, if any.
    pub fn text_style(&self) -> Option<TextStyle> {
        self.text_style
    }

    /// Returns a copy at a different point size.
    #[must_use]
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Returns a copy in a different family, keeping every other property.
    #[must_use]
    pub fn with_family(&self, family: &str) -> Self {
        Self {
            family: family.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with exactly `traits`.
    #[must_use]
    pub fn with_traits(&self, traits: Emphasis) -> Self {
        Self {
            traits,
            ..self.clone()
        }
    }

    /// Returns a copy with `features` applied in order.
    ///
    /// A setting for a tag that is already present replaces the earlier value, so later settings
    /// win.
    #[must_use]
    pub fn with_features(&self, features: &[FontFeature]) -> Self {
        let mut font = self.clone();
        for feature in features {
            match font.features.iter_mut().find(|f| f.tag == feature.tag) {
                Some(existing) => existing.value = feature.value,
                None => font.features.push(*feature),
            }
        }
        font
    }

    /// Returns the value of the feature `tag`, if set.
    pub fn feature(&self, tag: text_primitives::Tag) -> Option<u16> {
        self.features
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value)
    }
}

/// Font resource collaborator.
///
/// The engine never inspects font files. Everything that depends on what a font can actually do
/// (feature support, trait combinations, preferred fonts for a content size) goes through this
/// trait. The provided methods implement a permissive host that accepts every request.
pub trait FontProvider {
    /// Applies ordered feature settings to `font`.
    fn apply_features(&self, font: &Font, features: &[FontFeature]) -> Font {
        font.with_features(features)
    }

    /// Returns `font` with exactly `traits`, or `None` if no such font exists.
    fn apply_traits(&self, font: &Font, traits: Emphasis) -> Option<Font> {
        Some(font.with_traits(traits))
    }

    /// Returns `font` in `family`, preserving every other attribute.
    fn font_with_family(&self, font: &Font, family: &str) -> Font {
        font.with_family(family)
    }

    /// Returns the preferred font for `text_style` at `category`, if the host has one.
    fn preferred_font(&self, text_style: TextStyle, category: ContentSizeCategory) -> Option<Font> {
        let _ = (text_style, category);
        None
    }
}

/// A [`FontProvider`] that accepts every request and has no preferred fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicFontProvider;

impl FontProvider for BasicFontProvider {}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.family, self.size)
    }
}
