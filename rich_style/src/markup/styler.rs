// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::compose::SharedComposable;
use crate::named_styles::NamedStyles;
use crate::special::Special;
use crate::style::Style;

/// The attributes of a markup element, by name.
pub type ElementAttributes = HashMap<String, String>;

/// Decides how markup elements are styled.
pub trait XmlStyler: fmt::Debug + Send + Sync {
    /// Returns the style to merge on top of `current` for the content of `element`.
    ///
    /// Returning `None` marks the element as unregistered.
    fn style(
        &self,
        element: &str,
        attributes: &ElementAttributes,
        current: &Style,
    ) -> Option<Style>;

    /// Content inserted after the element's style is applied, before its children.
    fn prefix(&self, _element: &str, _attributes: &ElementAttributes) -> Option<SharedComposable> {
        None
    }

    /// Content inserted after the element's children, before its style is removed.
    fn suffix(&self, _element: &str) -> Option<SharedComposable> {
        None
    }
}

/// A single markup styling rule.
#[derive(Clone, Debug)]
pub enum XmlStyleRule {
    /// Look up elements in a set of named styles.
    Styles(Arc<NamedStyles>),
    /// Style elements named `.0` with `.1`.
    Style(String, Style),
    /// Insert content when entering elements named `.0`.
    Enter(String, SharedComposable),
    /// Insert content when leaving elements named `.0`.
    Exit(String, SharedComposable),
}

/// An [`XmlStyler`] driven by a list of [`XmlStyleRule`]s.
///
/// A matching [`XmlStyleRule::Style`] wins over named styles. Only the first
/// [`XmlStyleRule::Styles`] rule is consulted.
#[derive(Clone, Debug, Default)]
pub struct RuleStyler {
    rules: Vec<XmlStyleRule>,
}

impl RuleStyler {
    /// Creates a styler from `rules`.
    pub fn new(rules: Vec<XmlStyleRule>) -> Self {
        Self { rules }
    }

    /// The rules, in lookup order.
    pub fn rules(&self) -> &[XmlStyleRule] {
        &self.rules
    }
}

impl XmlStyler for RuleStyler {
    fn style(
        &self,
        element: &str,
        _attributes: &ElementAttributes,
        _current: &Style,
    ) -> Option<Style> {
        let explicit = self.rules.iter().find_map(|rule| match rule {
            XmlStyleRule::Style(name, style) if name == element => Some(style),
            _ => None,
        });
        if let Some(style) = explicit {
            return Some(style.clone());
        }
        let named = self.rules.iter().find_map(|rule| match rule {
            XmlStyleRule::Styles(named) => Some(named),
            _ => None,
        })?;
        named.style(element).cloned()
    }

    fn prefix(&self, element: &str, _attributes: &ElementAttributes) -> Option<SharedComposable> {
        self.rules.iter().find_map(|rule| match rule {
            XmlStyleRule::Enter(name, insert) if name == element => Some(insert.clone()),
            _ => None,
        })
    }

    fn suffix(&self, element: &str) -> Option<SharedComposable> {
        self.rules.iter().find_map(|rule| match rule {
            XmlStyleRule::Exit(name, insert) if name == element => Some(insert.clone()),
            _ => None,
        })
    }
}

/// Signature of the function wrapped by [`FnStyler`].
pub type StyleFn = dyn Fn(&str, &ElementAttributes, &Style) -> Option<Style> + Send + Sync;

/// An [`XmlStyler`] that styles elements with a function and inserts nothing.
#[derive(Clone)]
pub struct FnStyler(Arc<StyleFn>);

impl FnStyler {
    /// Wraps `f`.
    pub fn new(
        f: impl Fn(&str, &ElementAttributes, &Style) -> Option<Style> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for FnStyler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnStyler(..)")
    }
}

impl XmlStyler for FnStyler {
    fn style(
        &self,
        element: &str,
        attributes: &ElementAttributes,
        current: &Style,
    ) -> Option<Style> {
        (self.0)(element, attributes, current)
    }
}

impl NamedStyles {
    /// The styler used when no other is given.
    ///
    /// Special character elements such as `<special:emDash/>` insert their character, and every
    /// other element is looked up in these named styles.
    pub fn default_styler(self: Arc<Self>) -> RuleStyler {
        let mut rules = Special::insertion_rules();
        rules.push(XmlStyleRule::Styles(self));
        RuleStyler::new(rules)
    }
}
