// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use icu_casemap::CaseMapper;
use icu_casemap::options::TitlecaseOptions;
use icu_locale_core::LanguageIdentifier;
use icu_segmenter::WordSegmenter;
use icu_segmenter::options::WordBreakInvariantOptions;

/// A function that rewrites plain text.
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A case transformation applied to plain text before it is styled.
///
/// Case mappings are the full, context-sensitive Unicode mappings, tailored for the language of
/// the locale variants. Capitalization titlecases every word found by Unicode word segmentation.
#[derive(Clone)]
pub enum Transform {
    /// Lowercase.
    Lowercase,
    /// Uppercase.
    Uppercase,
    /// First letter of every word uppercase, the rest lowercase.
    Capitalized,
    /// Lowercase using the rules of a language.
    LowercaseWithLocale(LanguageIdentifier),
    /// Uppercase using the rules of a language.
    UppercaseWithLocale(LanguageIdentifier),
    /// Capitalized using the rules of a language.
    CapitalizedWithLocale(LanguageIdentifier),
    /// An arbitrary function.
    Custom(TransformFn),
}

impl Transform {
    /// Creates a custom transform.
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Applies the transform to `text`.
    pub fn apply(&self, text: &str) -> String {
        let root = LanguageIdentifier::UNKNOWN;
        let mapper = CaseMapper::new();
        match self {
            Self::Lowercase => mapper.lowercase_to_string(text, &root).into(),
            Self::Uppercase => mapper.uppercase_to_string(text, &root).into(),
            Self::Capitalized => capitalized(text, &root),
            Self::LowercaseWithLocale(langid) => mapper.lowercase_to_string(text, langid).into(),
            Self::UppercaseWithLocale(langid) => mapper.uppercase_to_string(text, langid).into(),
            Self::CapitalizedWithLocale(langid) => capitalized(text, langid),
            Self::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowercase => f.write_str("Lowercase"),
            Self::Uppercase => f.write_str("Uppercase"),
            Self::Capitalized => f.write_str("Capitalized"),
            Self::LowercaseWithLocale(l) => f.debug_tuple("LowercaseWithLocale").field(l).finish(),
            Self::UppercaseWithLocale(l) => f.debug_tuple("UppercaseWithLocale").field(l).finish(),
            Self::CapitalizedWithLocale(l) => {
                f.debug_tuple("CapitalizedWithLocale").field(l).finish()
            }
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn capitalized(text: &str, langid: &LanguageIdentifier) -> String {
    let mapper = CaseMapper::new();
    let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
    let breaks: Vec<usize> = segmenter.segment_str(text).collect();
    let mut out = String::with_capacity(text.len());
    for segment in breaks.windows(2) {
        let word = &text[segment[0]..segment[1]];
        out.push_str(&mapper.titlecase_segment_with_only_case_data_to_string(
            word,
            langid,
            TitlecaseOptions::default(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use icu_locale_core::LanguageIdentifier;

    use super::Transform;

    fn langid(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    #[test]
    fn case_transforms() {
        assert_eq!(Transform::Lowercase.apply("Hello World"), "hello world");
        assert_eq!(Transform::Uppercase.apply("straße"), "STRASSE");
        assert_eq!(Transform::Capitalized.apply("hELLO  wide\tworld"), "Hello  Wide\tWorld");
    }

    #[test]
    fn lowercase_uses_final_sigma() {
        assert_eq!(Transform::Lowercase.apply("ΟΔΟΣ ΟΔΟΣ"), "οδος οδος");
    }

    #[test]
    fn capitalized_finds_words_after_punctuation() {
        assert_eq!(Transform::Capitalized.apply("(hello) self-made"), "(Hello) Self-Made");
        assert_eq!(Transform::Capitalized.apply(""), "");
    }

    #[test]
    fn turkic_locales_map_dotted_i() {
        assert_eq!(
            Transform::UppercaseWithLocale(langid("tr-TR")).apply("istanbul"),
            "\u{130}STANBUL"
        );
        assert_eq!(
            Transform::LowercaseWithLocale(langid("az")).apply("I\u{130}"),
            "\u{131}i"
        );
        assert_eq!(
            Transform::CapitalizedWithLocale(langid("tr")).apply("izmir"),
            "\u{130}zmir"
        );
        assert_eq!(Transform::UppercaseWithLocale(langid("en")).apply("i"), "I");
    }

    #[test]
    fn custom_transform() {
        let reverse = Transform::custom(|s| s.chars().rev().collect());
        assert_eq!(reverse.apply("abc"), "cba");
        assert_eq!(format!("{reverse:?}"), "Custom(..)");
    }
}
