// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::adapt::{AdaptContext, AdaptiveStyle, ContentSizeCategory, adapt_text};
use crate::attributes::AttributeSet;
use crate::compose::compose;
use crate::context::StyleContext;
use crate::font::{BasicFontProvider, Font};
use crate::markup::{
    MarkupError, MarkupOptions, RuleStyler, XmlStyleRule, compile, compile_with_rules,
};
use crate::named_styles::NamedStyles;
use crate::style::{Style, StylePart, Transform};
use crate::RichText;

fn linked(target: &str) -> Style {
    Style::from_parts([StylePart::Link(target.into())])
}

fn raised(offset: f32) -> Style {
    Style::from_parts([StylePart::BaselineOffset(offset)])
}

fn rule(element: &str, style: Style) -> XmlStyleRule {
    XmlStyleRule::Style(element.into(), style)
}

fn markup(fragment: &str, rules: Vec<XmlStyleRule>) -> Result<RichText, MarkupError> {
    compile_with_rules(
        fragment,
        &Style::default(),
        rules,
        MarkupOptions::default(),
        &StyleContext::default(),
    )
}

fn attrs_at(text: &RichText, index: usize) -> &AttributeSet {
    text.attributes_at(index).unwrap().0
}

#[test]
fn nested_elements_merge_and_unwind() {
    let text = markup(
        "0<one>1<two>2</two>3</one>4",
        vec![rule("one", linked("a")), rule("two", raised(2.0))],
    )
    .unwrap();
    assert_eq!(text.text(), "01234");
    assert_eq!(attrs_at(&text, 0), &AttributeSet::new());
    assert_eq!(attrs_at(&text, 1).link.as_deref(), Some("a"));
    assert_eq!(attrs_at(&text, 1).baseline_offset, None);
    assert_eq!(attrs_at(&text, 2).link.as_deref(), Some("a"));
    assert_eq!(attrs_at(&text, 2).baseline_offset, Some(2.0));
    assert_eq!(attrs_at(&text, 3), attrs_at(&text, 1));
    assert_eq!(attrs_at(&text, 4), &AttributeSet::new());
    assert_eq!(text.attributes_at(2).unwrap().1, 2..3);
}

#[test]
fn unregistered_elements_abort_unless_allowed() {
    let err = markup("a<foo>b</foo>", Vec::new()).unwrap_err();
    assert!(matches!(
        &err,
        MarkupError::UnregisteredElement { element, line: 1, column: 2 } if element == "foo"
    ));

    let options = MarkupOptions {
        allow_unregistered_elements: true,
        ..MarkupOptions::default()
    };
    let cx = StyleContext::default();
    let text = compile_with_rules("a<foo>b</foo>", &Style::default(), Vec::new(), options, &cx)
        .unwrap();
    assert_eq!(text.text(), "ab");
    assert_eq!(text.run_count(), 1);
}

#[test]
fn error_locations_are_relative_to_the_fragment() {
    let err = markup("ab<foo/>", Vec::new()).unwrap_err();
    assert_eq!((err.line(), err.column()), (1, 3));

    let err = markup("x\n  <foo/>", Vec::new()).unwrap_err();
    assert_eq!((err.line(), err.column()), (2, 3));

    let err = markup("one\n<b>two</c>", vec![rule("b", linked("b"))]).unwrap_err();
    assert!(matches!(err, MarkupError::Syntax { .. }));
    assert_eq!(err.line(), 2);
}

#[test]
fn unclosed_elements_are_malformed() {
    let options = MarkupOptions {
        do_not_wrap: true,
        ..MarkupOptions::default()
    };
    let err = compile_with_rules(
        "<b>text",
        &Style::default(),
        vec![rule("b", linked("b"))],
        options,
        &StyleContext::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MarkupError::Syntax { .. }));

    let err = markup("<b>text", vec![rule("b", linked("b"))]).unwrap_err();
    assert!(matches!(err, MarkupError::Syntax { .. }));
}

#[test]
fn unwrapped_documents_style_their_root() {
    let options = MarkupOptions {
        do_not_wrap: true,
        ..MarkupOptions::default()
    };
    let text = compile_with_rules(
        "<doc>a<b>x</b></doc>",
        &Style::default(),
        vec![rule("doc", linked("doc")), rule("b", raised(1.0))],
        options,
        &StyleContext::default(),
    )
    .unwrap();
    assert_eq!(text.text(), "ax");
    assert_eq!(attrs_at(&text, 0).link.as_deref(), Some("doc"));
    assert_eq!(attrs_at(&text, 1).baseline_offset, Some(1.0));
}

#[test]
fn entities_and_cdata_are_text() {
    let text = markup("a &lt;b&gt; &#233; &amp;<![CDATA[<i>]]>", Vec::new()).unwrap();
    assert_eq!(text.text(), "a <b> \u{e9} &<i>");
}

#[test]
fn markup_rules_insert_special_characters() {
    let cx = StyleContext::default();
    let style = Style::from_parts([StylePart::XmlRules(vec![rule("b", raised(1.0))])]);
    let text = style.attributed_string("a<special:emDash/><b>b</b>", None, &cx);
    assert_eq!(text.text(), "a\u{2014}b");
    assert_eq!(attrs_at(&text, 0), &AttributeSet::new());
    assert_eq!(attrs_at(&text, 4).baseline_offset, Some(1.0));
}

#[test]
fn default_styler_uses_named_styles() {
    let mut named = NamedStyles::with_defaults();
    named.register_style("em", linked("em"));
    let styler = Arc::new(named).default_styler();
    let base = Style::from_parts([StylePart::Font(Font::new("Avenir", 20.0))]);
    let cx = StyleContext::default();
    let text = compile(
        "<body>x<em>y</em><special:tab/></body>",
        &base,
        Arc::new(styler),
        MarkupOptions::default(),
        &cx,
    )
    .unwrap();
    assert_eq!(text.text(), "xy\t");
    assert_eq!(attrs_at(&text, 1).link.as_deref(), Some("em"));

    let adapted = adapt_text(
        &text,
        &AdaptContext::new(ContentSizeCategory::AccessibilityMedium, cx),
    );
    for index in 0..3 {
        let font = attrs_at(&adapted, index).font.clone().unwrap();
        assert_eq!(font.size(), 31.0);
    }
}

#[test]
fn element_stylers_style_their_children() {
    let code = Style::from_parts([
        StylePart::Link("code".into()),
        StylePart::XmlRules(vec![rule("b", raised(3.0))]),
    ]);
    let rules = vec![rule("code", code)];

    let text = markup("<code>a<b>x</b></code>", rules.clone()).unwrap();
    assert_eq!(text.text(), "ax");
    assert_eq!(attrs_at(&text, 0).baseline_offset, None);
    assert_eq!(attrs_at(&text, 1).link.as_deref(), Some("code"));
    assert_eq!(attrs_at(&text, 1).baseline_offset, Some(3.0));

    let err = markup("<code>a</code><b>y</b>", rules).unwrap_err();
    assert!(matches!(
        err,
        MarkupError::UnregisteredElement { ref element, .. } if element == "b"
    ));
}

#[test]
fn prefix_and_suffix_use_the_element_style() {
    let rules = vec![
        rule("li", linked("item")),
        XmlStyleRule::Enter("li".into(), Arc::new("- ")),
        XmlStyleRule::Exit("li".into(), Arc::new('\n')),
    ];
    let text = markup("<li>one</li><li>two</li>!", rules).unwrap();
    assert_eq!(text.text(), "- one\n- two\n!");
    assert_eq!(attrs_at(&text, 0).link.as_deref(), Some("item"));
    assert_eq!(attrs_at(&text, 5).link.as_deref(), Some("item"));
    assert_eq!(attrs_at(&text, 12).link, None);
}

#[test]
fn element_transforms_apply_to_their_text() {
    let text = markup(
        "a<up>bc</up>d",
        vec![rule("up", Style::from_parts([StylePart::Transform(Transform::Uppercase)]))],
    )
    .unwrap();
    assert_eq!(text.text(), "aBCd");
}

#[test]
fn malformed_markup_falls_back_to_plain_text() {
    let cx = StyleContext::default();
    let style = Style::from_parts([
        StylePart::Link("plain".into()),
        StylePart::XmlRules(Vec::new()),
    ]);
    let text = style.attributed_string("a < b", None, &cx);
    assert_eq!(text.text(), "a < b");
    assert_eq!(attrs_at(&text, 0).link.as_deref(), Some("plain"));
}

#[test]
fn composed_fragments_compile_markup() {
    let cx = StyleContext::default();
    let style = Style::from_parts([StylePart::XmlRules(vec![rule("b", raised(1.0))])]);
    let text = compose(&[&"x<b>y</b>", &"z"], &style, None, &cx);
    assert_eq!(text.text(), "xyz");
    assert_eq!(attrs_at(&text, 1).baseline_offset, Some(1.0));
    assert_eq!(attrs_at(&text, 2).baseline_offset, None);
}

#[test]
fn supplied_defaults_never_override_existing_attributes() {
    let existing = AttributeSet {
        link: Some("mine".into()),
        ..AttributeSet::default()
    };
    let style = Style::from_parts([
        StylePart::Link("style".into()),
        StylePart::BaselineOffset(1.0),
    ]);
    let attrs = style.supply_defaults(Some(&existing), &BasicFontProvider);
    assert_eq!(attrs.link.as_deref(), Some("mine"));
    assert_eq!(attrs.baseline_offset, Some(1.0));

    let text = style.attributed_string("x", Some(&existing), &StyleContext::default());
    assert_eq!(attrs_at(&text, 0), &attrs);
}

#[test]
fn adaptations_survive_markup_compilation() {
    let cx = StyleContext::default();
    let rules = vec![XmlStyleRule::Styles(Arc::new(NamedStyles::with_defaults()))];
    let base = Style::from_parts([StylePart::Font(Font::new("Avenir", 12.0))]);
    let text = compile(
        "a<control>b</control>",
        &base,
        Arc::new(RuleStyler::new(rules)),
        MarkupOptions::default(),
        &cx,
    )
    .unwrap();
    let adapted = adapt_text(
        &text,
        &AdaptContext::new(ContentSizeCategory::AccessibilityExtraExtraExtraLarge, cx),
    );
    assert_eq!(attrs_at(&adapted, 0).font.as_ref().map(Font::size), Some(12.0));
    assert_eq!(attrs_at(&adapted, 1).font.as_ref().map(Font::size), Some(18.0));
    assert_eq!(attrs_at(&text, 1).non_adapted_font, Some(Font::new("Avenir", 12.0)));
}

#[test]
fn nested_adaptations_win_over_the_outer_style() {
    let cx = StyleContext::default();
    let inner = Style::from_parts([
        StylePart::Font(Font::new("Avenir", 20.0)),
        StylePart::Adapt(AdaptiveStyle::Control),
    ])
    .attributed_string("x", None, &cx);
    let outer = Style::from_parts([
        StylePart::Font(Font::new("Georgia", 20.0)),
        StylePart::Adapt(AdaptiveStyle::Body),
    ]);
    let text = compose(&[&inner], &outer, None, &cx);
    let kinds: Vec<_> = attrs_at(&text, 0)
        .transformations
        .iter()
        .map(|record| record.kind())
        .collect();
    assert_eq!(kinds, [Some("body"), Some("control")]);

    let adapted = adapt_text(
        &text,
        &AdaptContext::new(ContentSizeCategory::AccessibilityExtraExtraExtraLarge, cx),
    );
    let font = attrs_at(&adapted, 0).font.clone().unwrap();
    assert_eq!((font.family(), font.size()), ("Avenir", 26.0));
}

#[test]
fn fragment_elements_named_like_the_root_are_styled() {
    for fragment in ["a<RichStyleRoot/>", "a<RichStyleRoot>b</RichStyleRoot>"] {
        let err = markup(fragment, Vec::new()).unwrap_err();
        assert!(matches!(
            &err,
            MarkupError::UnregisteredElement { element, line: 1, column: 2 }
                if element == "RichStyleRoot"
        ));
    }

    let text = markup(
        "a<RichStyleRoot>b</RichStyleRoot><RichStyleRoot/>",
        vec![rule("RichStyleRoot", linked("root"))],
    )
    .unwrap();
    assert_eq!(text.text(), "ab");
    assert_eq!(attrs_at(&text, 0).link, None);
    assert_eq!(attrs_at(&text, 1).link.as_deref(), Some("root"));
}
