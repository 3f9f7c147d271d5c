// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A 4-byte OpenType tag (for example `smcp`, `ss01`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Creates a tag from a 4-byte literal.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(u32::from_be_bytes(*bytes))
    }

    /// Returns this tag as 4 bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parses a tag from a 4-character ASCII string.
    ///
    /// ```
    /// use text_primitives::Tag;
    ///
    /// assert_eq!(Tag::parse("onum"), Some(Tag::new(b"onum")));
    /// assert_eq!(Tag::parse("toolong"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let bytes: [u8; 4] = s.as_bytes().try_into().ok()?;
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return None;
        }
        Some(Self::new(&bytes))
    }

    /// Returns the stylistic set tag `ss01` through `ss20`.
    ///
    /// Returns `None` for indices outside `1..=20`.
    pub const fn stylistic_set(index: u8) -> Option<Self> {
        if index == 0 || index > 20 {
            return None;
        }
        Some(Self::new(&[b's', b's', b'0' + index / 10, b'0' + index % 10]))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        let s = core::str::from_utf8(&bytes).unwrap_or("????");
        f.write_str(s)
    }
}

/// A single OpenType setting (tag + value).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Setting<T> {
    /// The OpenType tag for this setting.
    pub tag: Tag,
    /// The setting value.
    pub value: T,
}

impl<T> Setting<T> {
    /// Creates a new setting.
    pub const fn new(tag: Tag, value: T) -> Self {
        Self { tag, value }
    }
}

/// A font feature toggle, where `0` disables and non-zero values select an alternate.
pub type FontFeature = Setting<u16>;

impl Setting<u16> {
    /// A feature switched on.
    pub const fn enabled(tag: Tag) -> Self {
        Self::new(tag, 1)
    }

    /// A feature switched off.
    pub const fn disabled(tag: Tag) -> Self {
        Self::new(tag, 0)
    }

    /// A feature switched on or off.
    pub const fn toggle(tag: Tag, on: bool) -> Self {
        Self::new(tag, on as u16)
    }

    /// Returns `true` if this setting enables its feature.
    pub const fn is_enabled(self) -> bool {
        self.value != 0
    }
}

impl fmt::Display for Setting<u16> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            0 => write!(f, "\"{}\" off", self.tag),
            1 => write!(f, "\"{}\" on", self.tag),
            n => write!(f, "\"{}\" {n}", self.tag),
        }
    }
}
