// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use crate::font::{BasicFontProvider, FontProvider};
use crate::measure::{MonospaceMeasure, TextMeasure};

/// The host collaborators needed to produce rich text.
#[derive(Clone, Copy)]
pub struct StyleContext<'a> {
    /// Font resources.
    pub fonts: &'a dyn FontProvider,
    /// Text measurement, used to place tab stops.
    pub measure: &'a dyn TextMeasure,
}

impl<'a> StyleContext<'a> {
    /// Creates a context from its collaborators.
    pub fn new(fonts: &'a dyn FontProvider, measure: &'a dyn TextMeasure) -> Self {
        Self { fonts, measure }
    }
}

static BASIC_FONTS: BasicFontProvider = BasicFontProvider;
static MONOSPACE: MonospaceMeasure = MonospaceMeasure::DEFAULT;

impl Default for StyleContext<'static> {
    /// A context with a [`BasicFontProvider`] and a default [`MonospaceMeasure`].
    fn default() -> Self {
        Self::new(&BASIC_FONTS, &MONOSPACE)
    }
}

impl fmt::Debug for StyleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleContext").finish_non_exhaustive()
    }
}
