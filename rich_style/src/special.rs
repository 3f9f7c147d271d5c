// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use crate::markup::XmlStyleRule;
use crate::style::Style;

/// Characters that are invisible or easily confused when reading source code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Special {
    /// U+0009.
    Tab,
    /// U+000A.
    LineFeed,
    /// U+000B.
    VerticalTab,
    /// U+000C.
    FormFeed,
    /// U+000D.
    CarriageReturn,
    /// U+0020.
    Space,
    /// U+0085.
    NextLine,
    /// U+00A0.
    NoBreakSpace,
    /// U+2002.
    EnSpace,
    /// U+2003.
    EmSpace,
    /// U+2007.
    FigureSpace,
    /// U+2009.
    ThinSpace,
    /// U+200A.
    HairSpace,
    /// U+200B.
    ZeroWidthSpace,
    /// U+2011.
    NonBreakingHyphen,
    /// U+2012.
    FigureDash,
    /// U+2013.
    EnDash,
    /// U+2014.
    EmDash,
    /// U+2026.
    HorizontalEllipsis,
    /// U+2028.
    LineSeparator,
    /// U+2029.
    ParagraphSeparator,
    /// U+202D.
    LeftToRightOverride,
    /// U+202F.
    NarrowNoBreakSpace,
    /// U+2060.
    WordJoiner,
    /// U+2212.
    MinusSign,
    /// U+FFFC, the placeholder for an attachment.
    ObjectReplacementCharacter,
}

impl Special {
    /// Every special character, by code point.
    pub const ALL: [Self; 26] = [
        Self::Tab,
        Self::LineFeed,
        Self::VerticalTab,
        Self::FormFeed,
        Self::CarriageReturn,
        Self::Space,
        Self::NextLine,
        Self::NoBreakSpace,
        Self::EnSpace,
        Self::EmSpace,
        Self::FigureSpace,
        Self::ThinSpace,
        Self::HairSpace,
        Self::ZeroWidthSpace,
        Self::NonBreakingHyphen,
        Self::FigureDash,
        Self::EnDash,
        Self::EmDash,
        Self::HorizontalEllipsis,
        Self::LineSeparator,
        Self::ParagraphSeparator,
        Self::LeftToRightOverride,
        Self::NarrowNoBreakSpace,
        Self::WordJoiner,
        Self::MinusSign,
        Self::ObjectReplacementCharacter,
    ];

    /// Prefix of the markup elements that insert special characters.
    pub const ELEMENT_PREFIX: &str = "special:";

    /// The character.
    pub fn as_char(self) -> char {
        match self {
            Self::Tab => '\u{0009}',
            Self::LineFeed => '\u{000A}',
            Self::VerticalTab => '\u{000B}',
            Self::FormFeed => '\u{000C}',
            Self::CarriageReturn => '\u{000D}',
            Self::Space => '\u{0020}',
            Self::NextLine => '\u{0085}',
            Self::NoBreakSpace => '\u{00A0}',
            Self::EnSpace => '\u{2002}',
            Self::EmSpace => '\u{2003}',
            Self::FigureSpace => '\u{2007}',
            Self::ThinSpace => '\u{2009}',
            Self::HairSpace => '\u{200A}',
            Self::ZeroWidthSpace => '\u{200B}',
            Self::NonBreakingHyphen => '\u{2011}',
            Self::FigureDash => '\u{2012}',
            Self::EnDash => '\u{2013}',
            Self::EmDash => '\u{2014}',
            Self::HorizontalEllipsis => '\u{2026}',
            Self::LineSeparator => '\u{2028}',
            Self::ParagraphSeparator => '\u{2029}',
            Self::LeftToRightOverride => '\u{202D}',
            Self::NarrowNoBreakSpace => '\u{202F}',
            Self::WordJoiner => '\u{2060}',
            Self::MinusSign => '\u{2212}',
            Self::ObjectReplacementCharacter => '\u{FFFC}',
        }
    }

    /// A readable name, as used in markup element names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::LineFeed => "lineFeed",
            Self::VerticalTab => "verticalTab",
            Self::FormFeed => "formFeed",
            Self::CarriageReturn => "carriageReturn",
            Self::Space => "space",
            Self::NextLine => "nextLine",
            Self::NoBreakSpace => "noBreakSpace",
            Self::EnSpace => "enSpace",
            Self::EmSpace => "emSpace",
            Self::FigureSpace => "figureSpace",
            Self::ThinSpace => "thinSpace",
            Self::HairSpace => "hairSpace",
            Self::ZeroWidthSpace => "zeroWidthSpace",
            Self::NonBreakingHyphen => "nonBreakingHyphen",
            Self::FigureDash => "figureDash",
            Self::EnDash => "enDash",
            Self::EmDash => "emDash",
            Self::HorizontalEllipsis => "horizontalEllipsis",
            Self::LineSeparator => "lineSeparator",
            Self::ParagraphSeparator => "paragraphSeparator",
            Self::LeftToRightOverride => "leftToRightOverride",
            Self::NarrowNoBreakSpace => "narrowNoBreakSpace",
            Self::WordJoiner => "wordJoiner",
            Self::MinusSign => "minusSign",
            Self::ObjectReplacementCharacter => "objectReplacementCharacter",
        }
    }

    /// Markup rules inserting every special character.
    ///
    /// `<special:emDash/>` inserts an em dash. Each element also gets an empty style rule, so it
    /// counts as registered.
    pub fn insertion_rules() -> Vec<XmlStyleRule> {
        Self::ALL
            .into_iter()
            .flat_map(|special| {
                let element = format!("{}{}", Self::ELEMENT_PREFIX, special.name());
                [
                    XmlStyleRule::Enter(element.clone(), Arc::new(special)),
                    XmlStyleRule::Style(element, Style::default()),
                ]
            })
            .collect()
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
