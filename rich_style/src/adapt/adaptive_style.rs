// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The user's preferred content size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentSizeCategory {
    /// Extra small.
    ExtraSmall,
    /// Small.
    Small,
    /// Medium.
    Medium,
    /// Large, the default.
    #[default]
    Large,
    /// Extra large.
    ExtraLarge,
    /// Extra extra large.
    ExtraExtraLarge,
    /// Extra extra extra large.
    ExtraExtraExtraLarge,
    /// Accessibility medium.
    AccessibilityMedium,
    /// Accessibility large.
    AccessibilityLarge,
    /// Accessibility extra large.
    AccessibilityExtraLarge,
    /// Accessibility extra extra large.
    AccessibilityExtraExtraLarge,
    /// Accessibility extra extra extra large.
    AccessibilityExtraExtraExtraLarge,
}

impl ContentSizeCategory {
    /// Every category, from smallest to largest.
    pub const ALL: [Self; 12] = [
        Self::ExtraSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::ExtraLarge,
        Self::ExtraExtraLarge,
        Self::ExtraExtraExtraLarge,
        Self::AccessibilityMedium,
        Self::AccessibilityLarge,
        Self::AccessibilityExtraLarge,
        Self::AccessibilityExtraExtraLarge,
        Self::AccessibilityExtraExtraExtraLarge,
    ];

    /// Points added to a size designed for [`ContentSizeCategory::Large`].
    pub fn point_shift(self) -> f32 {
        match self {
            Self::ExtraSmall => -3.0,
            Self::Small => -2.0,
            Self::Medium => -1.0,
            Self::Large => 0.0,
            Self::ExtraLarge => 2.0,
            Self::ExtraExtraLarge => 4.0,
            Self::ExtraExtraExtraLarge => 6.0,
            Self::AccessibilityMedium => 11.0,
            Self::AccessibilityLarge => 16.0,
            Self::AccessibilityExtraLarge => 23.0,
            Self::AccessibilityExtraExtraLarge => 30.0,
            Self::AccessibilityExtraExtraExtraLarge => 36.0,
        }
    }

    /// Returns `true` for the accessibility categories.
    pub fn is_accessibility(self) -> bool {
        self >= Self::AccessibilityMedium
    }
}

/// How a font responds to the content size category.
#[derive(Clone, Debug, PartialEq)]
pub enum AdaptiveStyle {
    /// Scale like a control: grows with the category but stops at the largest regular one.
    Control,
    /// Scale like body text: keeps growing through the accessibility categories.
    Body,
    /// Ask the font provider for the preferred font of the font's text style.
    Preferred,
    /// Switch to `family` when the point size is above `size`.
    Above {
        /// Threshold point size.
        size: f32,
        /// Family to switch to.
        family: String,
    },
    /// Switch to `family` when the point size is below `size`.
    Below {
        /// Threshold point size.
        size: f32,
        /// Family to switch to.
        family: String,
    },
}

impl AdaptiveStyle {
    /// Smallest size scaling will shrink a font to, unless it was designed smaller.
    pub const DEFAULT_MINIMUM_SIZE: f32 = 11.0;

    const CONTROL_MAX_SHIFT: f32 = 6.0;

    /// Scales `size`, designed for the default category, along the control curve.
    ///
    /// ```
    /// use rich_style::{AdaptiveStyle, ContentSizeCategory};
    ///
    /// let size = AdaptiveStyle::adapt_control(28.0, ContentSizeCategory::ExtraSmall, 11.0);
    /// assert_eq!(size, 25.0);
    /// ```
    pub fn adapt_control(size: f32, category: ContentSizeCategory, minimum_size: f32) -> f32 {
        let shift = category.point_shift().min(Self::CONTROL_MAX_SHIFT);
        (size + shift).max(minimum_size.min(size))
    }

    /// Scales `size`, designed for the default category, along the body curve.
    pub fn adapt_body(size: f32, category: ContentSizeCategory, minimum_size: f32) -> f32 {
        (size + category.point_shift()).max(minimum_size.min(size))
    }
}
