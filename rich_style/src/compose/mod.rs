// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building rich text out of heterogeneous fragments.
//!
//! Tracking adds space after every character, including the last one, which visibly offsets
//! centered or trailing-aligned text. Composition therefore keeps the kerning of the very last
//! character in [`AttributeSet::shadowed_kerning`] and moves it back as soon as more text is
//! appended.

mod tab;

use std::fmt;
use std::sync::Arc;

pub use tab::Tab;

use crate::attributes::AttributeSet;
use crate::context::StyleContext;
use crate::special::Special;
use crate::style::{Style, StylePart};
use crate::RichText;

/// A fragment that can append itself to rich text.
pub trait Composable: fmt::Debug {
    /// Appends this fragment to `text`, styled with `base_style`.
    ///
    /// `is_last` is `true` when nothing will be appended after this fragment.
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        is_last: bool,
        cx: &StyleContext<'_>,
    );

    /// Returns this fragment styled with `style` and then `parts`.
    fn styled(&self, style: &Style, parts: Vec<StylePart>, cx: &StyleContext<'_>) -> RichText {
        let style = style.with_parts(parts);
        let mut text = RichText::new();
        self.append_to(&mut text, &style, true, cx);
        remove_kerning_from_last_character(&mut text);
        text
    }

    /// Returns this fragment on its own, with an empty base style.
    fn attributed_string(&self, cx: &StyleContext<'_>) -> RichText {
        self.styled(&Style::default(), Vec::new(), cx)
    }
}

/// A shareable [`Composable`], as used by markup stylers.
pub type SharedComposable = Arc<dyn Composable + Send + Sync>;

/// Concatenates `fragments`, each styled with `base_style`.
///
/// `separator` is appended between fragments, never after the last one. The kerning of the final
/// character is moved to [`AttributeSet::shadowed_kerning`].
///
/// ```
/// use rich_style::{Style, StyleContext, StylePart, Tracking, compose};
///
/// let cx = StyleContext::default();
/// let tracked = Style::from_parts([StylePart::Tracking(Tracking::Point(2.0))]);
/// let text = compose(&[&"one", &"two"], &tracked, Some(&' '), &cx);
/// assert_eq!(text.text(), "one two");
/// let (last, _) = text.attributes_at(6).unwrap();
/// assert_eq!((last.kerning, last.shadowed_kerning), (None, Some(2.0)));
/// ```
pub fn compose(
    fragments: &[&dyn Composable],
    base_style: &Style,
    separator: Option<&dyn Composable>,
    cx: &StyleContext<'_>,
) -> RichText {
    let mut text = RichText::new();
    for (index, fragment) in fragments.iter().enumerate() {
        let is_last = index + 1 == fragments.len();
        append_fragment(&mut text, *fragment, base_style, is_last, cx);
        if let Some(separator) = separator.filter(|_| !is_last) {
            append_fragment(&mut text, separator, base_style, false, cx);
        }
    }
    text
}

fn append_fragment(
    text: &mut RichText,
    fragment: &dyn Composable,
    base_style: &Style,
    is_last: bool,
    cx: &StyleContext<'_>,
) {
    fragment.append_to(text, base_style, is_last, cx);
    if is_last {
        remove_kerning_from_last_character(text);
    } else {
        restore_kerning_on_last_character(text);
    }
}

/// Concatenates already styled texts.
///
/// Kerning held back on the last character of each piece is restored before more text follows.
/// With `remove_trailing_kerning`, the kerning of the final character is held back.
pub fn join(
    texts: &[RichText],
    separator: Option<&RichText>,
    remove_trailing_kerning: bool,
) -> RichText {
    fn push(out: &mut RichText, piece: &RichText) {
        restore_kerning_on_last_character(out);
        out.append(piece);
    }

    let mut out = RichText::new();
    for (index, text) in texts.iter().enumerate() {
        if index > 0 {
            if let Some(separator) = separator {
                push(&mut out, separator);
            }
        }
        push(&mut out, text);
    }
    if remove_trailing_kerning {
        remove_kerning_from_last_character(&mut out);
    } else {
        restore_kerning_on_last_character(&mut out);
    }
    out
}

fn update_last_character(text: &mut RichText, f: impl FnMut(&mut AttributeSet)) {
    if let Some(range) = text.last_char_range() {
        text.update_attributes(range, f);
    }
}

/// Moves the kerning of the last character into its shadowed kerning.
pub fn remove_kerning_from_last_character(text: &mut RichText) {
    update_last_character(text, |attrs| {
        if let Some(kerning) = attrs.kerning.take() {
            attrs.shadowed_kerning = Some(kerning);
        }
    });
}

/// Moves the shadowed kerning of the last character back into its kerning.
pub fn restore_kerning_on_last_character(text: &mut RichText) {
    update_last_character(text, |attrs| {
        if let Some(kerning) = attrs.shadowed_kerning.take() {
            attrs.kerning = Some(kerning);
        }
    });
}

impl Composable for str {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        _is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        text.append(&base_style.attributed_string(self, None, cx));
    }
}

impl Composable for String {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        self.as_str().append_to(text, base_style, is_last, cx);
    }
}

impl Composable for &str {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        (**self).append_to(text, base_style, is_last, cx);
    }
}

impl Composable for char {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        let mut buf = [0; 4];
        self.encode_utf8(&mut buf).append_to(text, base_style, is_last, cx);
    }
}

impl Composable for Special {
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        self.as_char().append_to(text, base_style, is_last, cx);
    }
}

impl Composable for RichText {
    /// Re-styles every run with `base_style` as defaults, so the run's own attributes win.
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        _is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        for (range, attrs) in self.runs() {
            text.append(&base_style.attributed_string(&self.text()[range], Some(attrs), cx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Composable, compose, join};
    use crate::attributes::AttributeSet;
    use crate::context::StyleContext;
    use crate::style::{Style, StylePart, Tracking};
    use crate::RichText;

    fn kerning(text: &RichText) -> Vec<(Option<f32>, Option<f32>)> {
        text.text()
            .char_indices()
            .map(|(i, _)| {
                let (attrs, _) = text.attributes_at(i).unwrap();
                (attrs.kerning, attrs.shadowed_kerning)
            })
            .collect()
    }

    fn tracked(text: &str, points: f32, cx: &StyleContext<'_>) -> RichText {
        Style::from_parts([StylePart::Tracking(Tracking::Point(points))])
            .attributed_string(text, None, cx)
    }

    #[test]
    fn only_the_final_character_loses_kerning() {
        let cx = StyleContext::default();
        let ab = tracked("ab", 5.0, &cx);
        let cd = tracked("cd", 10.0, &cx);
        let text = compose(&[&ab, &cd], &Style::default(), None, &cx);
        assert_eq!(text.text(), "abcd");
        assert_eq!(
            kerning(&text),
            [
                (Some(5.0), None),
                (Some(5.0), None),
                (Some(10.0), None),
                (None, Some(10.0)),
            ]
        );
    }

    #[test]
    fn styled_fragments_restore_kerning_when_composed() {
        let cx = StyleContext::default();
        let style = Style::from_parts([StylePart::Tracking(Tracking::Point(3.0))]);
        let ab = "ab".styled(&style, Vec::new(), &cx);
        assert_eq!(kerning(&ab)[1], (None, Some(3.0)));
        let text = compose(&[&ab, &"c"], &Style::default(), None, &cx);
        assert_eq!(kerning(&text), [(Some(3.0), None), (Some(3.0), None), (None, None)]);
    }

    #[test]
    fn separator_goes_between_fragments() {
        let cx = StyleContext::default();
        let style = Style::from_parts([StylePart::Tracking(Tracking::Point(1.0))]);
        let text = compose(&[&"a", &"b", &"c"], &style, Some(&", "), &cx);
        assert_eq!(text.text(), "a, b, c");
        assert_eq!(kerning(&text).last(), Some(&(None, Some(1.0))));
        assert!(compose(&[], &style, Some(&", "), &cx).is_empty());
    }

    #[test]
    fn rich_text_fragments_keep_their_attributes() {
        let cx = StyleContext::default();
        let inner = Style::from_parts([StylePart::Link("inner".into())])
            .attributed_string("x", None, &cx);
        let outer = Style::from_parts([
            StylePart::Link("outer".into()),
            StylePart::BaselineOffset(2.0),
        ]);
        let text = compose(&[&inner, &"y"], &outer, None, &cx);
        let (x, _) = text.attributes_at(0).unwrap();
        let (y, _) = text.attributes_at(1).unwrap();
        assert_eq!(x.link.as_deref(), Some("inner"));
        assert_eq!(x.baseline_offset, Some(2.0));
        assert_eq!(y.link.as_deref(), Some("outer"));
    }

    #[test]
    fn join_restores_and_trims() {
        let cx = StyleContext::default();
        let style = Style::from_parts([StylePart::Tracking(Tracking::Point(4.0))]);
        let a = "a".styled(&style, Vec::new(), &cx);
        let b = "b".styled(&style, Vec::new(), &cx);
        let separator = RichText::from_text("-", AttributeSet::new());
        let joined = join(&[a.clone(), b.clone()], Some(&separator), true);
        assert_eq!(joined.text(), "a-b");
        assert_eq!(kerning(&joined), [(Some(4.0), None), (None, None), (None, Some(4.0))]);
        let kept = join(&[a, b], None, false);
        assert_eq!(kerning(&kept), [(Some(4.0), None), (Some(4.0), None)]);
    }
}
