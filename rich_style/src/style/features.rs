// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font feature toggles.
//!
//! Each toggle maps to one OpenType feature axis. The resulting settings are handed to the
//! [`FontProvider`](crate::FontProvider), which decides what the font can actually do.

use std::fmt;

use text_primitives::{FontFeature, Tag};

/// Something that contributes font feature settings.
///
/// Styles keep an ordered list of providers. Settings for the same tag from later providers
/// replace earlier ones.
pub trait FontFeatureProvider: fmt::Debug + Send + Sync {
    /// The feature settings to apply, in order.
    fn feature_settings(&self) -> Vec<FontFeature>;
}

impl FontFeatureProvider for FontFeature {
    fn feature_settings(&self) -> Vec<FontFeature> {
        vec![*self]
    }
}

impl FontFeatureProvider for Vec<FontFeature> {
    fn feature_settings(&self) -> Vec<FontFeature> {
        self.clone()
    }
}

/// Height of numerals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberCase {
    /// Lining figures that align with capitals.
    Upper,
    /// Old-style figures with ascenders and descenders.
    Lower,
}

impl FontFeatureProvider for NumberCase {
    fn feature_settings(&self) -> Vec<FontFeature> {
        let (on, off) = match self {
            Self::Upper => (b"lnum", b"onum"),
            Self::Lower => (b"onum", b"lnum"),
        };
        vec![
            FontFeature::disabled(Tag::new(off)),
            FontFeature::enabled(Tag::new(on)),
        ]
    }
}

/// Width of numerals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberSpacing {
    /// Every numeral has the same advance.
    Monospaced,
    /// Numerals have individual advances.
    Proportional,
}

impl FontFeatureProvider for NumberSpacing {
    fn feature_settings(&self) -> Vec<FontFeature> {
        let (on, off) = match self {
            Self::Monospaced => (b"tnum", b"pnum"),
            Self::Proportional => (b"pnum", b"tnum"),
        };
        vec![
            FontFeature::disabled(Tag::new(off)),
            FontFeature::enabled(Tag::new(on)),
        ]
    }
}

/// Rendering of fractions such as `1/2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fractions {
    /// No fraction forms.
    Disabled,
    /// Diagonal fractions.
    Diagonal,
    /// Vertically stacked fractions.
    Vertical,
}

impl FontFeatureProvider for Fractions {
    fn feature_settings(&self) -> Vec<FontFeature> {
        let frac = Tag::new(b"frac");
        let afrc = Tag::new(b"afrc");
        match self {
            Self::Disabled => vec![FontFeature::disabled(frac), FontFeature::disabled(afrc)],
            Self::Diagonal => vec![FontFeature::disabled(afrc), FontFeature::enabled(frac)],
            Self::Vertical => vec![FontFeature::disabled(frac), FontFeature::enabled(afrc)],
        }
    }
}

/// Vertical position of glyphs relative to the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalPosition {
    /// Regular glyphs.
    Normal,
    /// Superscript forms.
    Superscript,
    /// Subscript forms.
    Subscript,
    /// Ordinal forms, such as the `st` in `1st`.
    Ordinals,
    /// Scientific inferiors, such as the `2` in `H2O`.
    ScientificInferiors,
}

impl VerticalPosition {
    const TAGS: [&'static [u8; 4]; 4] = [b"sups", b"subs", b"ordn", b"sinf"];

    /// Maps an on/off flag to `variant` or [`VerticalPosition::Normal`].
    pub fn toggled(variant: Self, on: bool) -> Self {
        if on { variant } else { Self::Normal }
    }
}

impl FontFeatureProvider for VerticalPosition {
    fn feature_settings(&self) -> Vec<FontFeature> {
        let active = match self {
            Self::Normal => None,
            Self::Superscript => Some(0),
            Self::Subscript => Some(1),
            Self::Ordinals => Some(2),
            Self::ScientificInferiors => Some(3),
        };
        Self::TAGS
            .iter()
            .enumerate()
            .map(|(i, tag)| FontFeature::toggle(Tag::new(tag), active == Some(i)))
            .collect()
    }
}

/// Small capital forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SmallCaps {
    /// Turn capital letters into small capitals.
    FromUppercase,
    /// Turn lowercase letters into small capitals.
    FromLowercase,
    /// No small capitals.
    Disabled,
}

impl FontFeatureProvider for SmallCaps {
    fn feature_settings(&self) -> Vec<FontFeature> {
        match self {
            Self::FromUppercase => vec![FontFeature::enabled(Tag::new(b"c2sc"))],
            Self::FromLowercase => vec![FontFeature::enabled(Tag::new(b"smcp"))],
            Self::Disabled => vec![
                FontFeature::disabled(Tag::new(b"c2sc")),
                FontFeature::disabled(Tag::new(b"smcp")),
            ],
        }
    }
}

/// The twenty OpenType stylistic sets, each independently on, off or unspecified.
///
/// Merging two values keeps every set that the newer value leaves unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StylisticAlternates {
    sets: [Option<bool>; 20],
}

impl StylisticAlternates {
    /// A value that specifies stylistic set `index` (`1..=20`) only.
    ///
    /// Out-of-range indices produce an empty value.
    pub fn set(index: u8, on: bool) -> Self {
        let mut alternates = Self::default();
        alternates.insert(index, on);
        alternates
    }

    /// Specifies stylistic set `index` (`1..=20`). Out-of-range indices are ignored.
    pub fn insert(&mut self, index: u8, on: bool) {
        if let Some(slot) = usize::from(index)
            .checked_sub(1)
            .and_then(|i| self.sets.get_mut(i))
        {
            *slot = Some(on);
        }
    }

    /// Returns the state of stylistic set `index`, if specified.
    pub fn get(&self, index: u8) -> Option<bool> {
        let i = usize::from(index).checked_sub(1)?;
        self.sets.get(i).copied().flatten()
    }

    /// Overrides the sets specified by `other`.
    pub fn add(&mut self, other: &Self) {
        for (mine, theirs) in self.sets.iter_mut().zip(other.sets) {
            if theirs.is_some() {
                *mine = theirs;
            }
        }
    }

    /// Returns `true` if no set is specified.
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(Option::is_none)
    }
}

impl FontFeatureProvider for StylisticAlternates {
    fn feature_settings(&self) -> Vec<FontFeature> {
        (1..=20_u8)
            .filter_map(|index| {
                let on = self.get(index)?;
                Some(FontFeature::toggle(Tag::stylistic_set(index)?, on))
            })
            .collect()
    }
}

/// Contextual and swash alternates, each independently on, off or unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextualAlternates {
    /// Contextual alternates (`calt`).
    pub contextual: Option<bool>,
    /// Swash alternates (`swsh`).
    pub swash: Option<bool>,
    /// Contextual swash alternates (`cswh`).
    pub contextual_swash: Option<bool>,
}

impl ContextualAlternates {
    /// Contextual alternates on or off.
    pub fn contextual(on: bool) -> Self {
        Self {
            contextual: Some(on),
            ..Self::default()
        }
    }

    /// Swash alternates on or off.
    pub fn swash(on: bool) -> Self {
        Self {
            swash: Some(on),
            ..Self::default()
        }
    }

    /// Contextual swash alternates on or off.
    pub fn contextual_swash(on: bool) -> Self {
        Self {
            contextual_swash: Some(on),
            ..Self::default()
        }
    }

    /// Overrides the alternates specified by `other`.
    pub fn add(&mut self, other: &Self) {
        self.contextual = other.contextual.or(self.contextual);
        self.swash = other.swash.or(self.swash);
        self.contextual_swash = other.contextual_swash.or(self.contextual_swash);
    }

    /// Returns `true` if nothing is specified.
    pub fn is_empty(&self) -> bool {
        self.contextual.is_none() && self.swash.is_none() && self.contextual_swash.is_none()
    }
}

impl FontFeatureProvider for ContextualAlternates {
    fn feature_settings(&self) -> Vec<FontFeature> {
        [
            (b"calt", self.contextual),
            (b"swsh", self.swash),
            (b"cswh", self.contextual_swash),
        ]
        .into_iter()
        .filter_map(|(tag, on)| Some(FontFeature::toggle(Tag::new(tag), on?)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContextualAlternates, FontFeatureProvider, StylisticAlternates, VerticalPosition,
    };
    use text_primitives::Tag;

    #[test]
    fn vertical_position_is_exclusive() {
        let settings = VerticalPosition::Ordinals.feature_settings();
        let enabled: Vec<Tag> = settings
            .iter()
            .filter(|f| f.is_enabled())
            .map(|f| f.tag)
            .collect();
        assert_eq!(enabled, [Tag::new(b"ordn")]);
        assert_eq!(settings.len(), 4);
        assert!(VerticalPosition::Normal
            .feature_settings()
            .iter()
            .all(|f| !f.is_enabled()));
        assert_eq!(
            VerticalPosition::toggled(VerticalPosition::Superscript, false),
            VerticalPosition::Normal
        );
    }

    #[test]
    fn stylistic_alternates_merge_per_set() {
        let mut alternates = StylisticAlternates::set(1, true);
        alternates.add(&StylisticAlternates::set(20, false));
        alternates.add(&StylisticAlternates::set(1, false));
        assert_eq!(alternates.get(1), Some(false));
        assert_eq!(alternates.get(20), Some(false));
        assert_eq!(alternates.get(2), None);
        assert!(StylisticAlternates::set(21, true).is_empty());
        let tags: Vec<Tag> = alternates.feature_settings().iter().map(|f| f.tag).collect();
        assert_eq!(tags, [Tag::new(b"ss01"), Tag::new(b"ss20")]);
    }

    #[test]
    fn contextual_alternates_merge_per_field() {
        let mut alternates = ContextualAlternates::contextual(true);
        alternates.add(&ContextualAlternates::swash(false));
        assert_eq!(alternates.contextual, Some(true));
        assert_eq!(alternates.swash, Some(false));
        assert_eq!(alternates.feature_settings().len(), 2);
    }
}
