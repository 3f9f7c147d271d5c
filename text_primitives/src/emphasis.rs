// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// A set of symbolic font traits requested on top of a font.
///
/// Emphasis is additive: combining two sets yields their union, which is how styles inherit it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Emphasis(u8);

impl Emphasis {
    /// No traits.
    pub const NONE: Self = Self(0);
    /// Italic or oblique.
    pub const ITALIC: Self = Self(1 << 0);
    /// Bold.
    pub const BOLD: Self = Self(1 << 1);
    /// Expanded width.
    pub const EXPANDED: Self = Self(1 << 2);
    /// Condensed width.
    pub const CONDENSED: Self = Self(1 << 3);
    /// Vertical glyph forms.
    pub const VERTICAL: Self = Self(1 << 4);
    /// Metrics optimized for user interface text.
    pub const UI_OPTIMIZED: Self = Self(1 << 5);
    /// Tighter than normal leading.
    pub const TIGHT_LEADING: Self = Self(1 << 6);
    /// Looser than normal leading.
    pub const LOOSE_LEADING: Self = Self(1 << 7);

    /// Creates a set from its raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if no traits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every trait in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Adds the traits of `other` to this set.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Removes the traits of `other` from this set.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Emphasis {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Emphasis {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Debug for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 8] = [
            "ITALIC",
            "BOLD",
            "EXPANDED",
            "CONDENSED",
            "VERTICAL",
            "UI_OPTIMIZED",
            "TIGHT_LEADING",
            "LOOSE_LEADING",
        ];
        f.write_str("Emphasis(")?;
        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}
