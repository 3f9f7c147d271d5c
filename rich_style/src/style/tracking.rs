// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::font::Font;

/// Inter-character spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tracking {
    /// A fixed amount of points after every character.
    Point(f32),
    /// Thousandths of an em, so the spacing scales with the point size of the font.
    Adobe(f32),
}

impl Tracking {
    const ADOBE_DIVISOR: f32 = 1000.0;

    /// Returns the kerning, in points, that this tracking produces for `font`.
    ///
    /// Adobe tracking needs a font. Without one it produces `0` and logs a warning.
    pub fn kerning(&self, font: Option<&Font>) -> f32 {
        match *self {
            Self::Point(points) => points,
            Self::Adobe(units) => {
                let Some(font) = font else {
                    log::warn!("cannot apply adobe tracking without a font, using 0 instead");
                    return 0.0;
                };
                font.size() * (units / Self::ADOBE_DIVISOR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tracking;
    use crate::font::Font;

    #[test]
    fn adobe_tracking_scales_with_point_size() {
        let font = Font::new("Avenir", 30.0);
        assert_eq!(Tracking::Adobe(300.0).kerning(Some(&font)), 9.0);
        assert_eq!(Tracking::Adobe(100.0).kerning(None), 0.0);
        assert_eq!(Tracking::Point(5.0).kerning(None), 5.0);
    }
}
