// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::adapt::AdaptiveStyle;
use crate::style::{Style, StylePart};

type UnregisteredHook = Arc<dyn Fn(&str) + Send + Sync>;

/// A registry of styles by name.
///
/// Looking up a name that was never registered calls the unregistered hook, which logs a warning
/// unless replaced with [`NamedStyles::set_unregistered_hook`].
#[derive(Clone)]
pub struct NamedStyles {
    styles: HashMap<String, Style>,
    unregistered_hook: UnregisteredHook,
}

impl Default for NamedStyles {
    fn default() -> Self {
        Self {
            styles: HashMap::new(),
            unregistered_hook: Arc::new(|name| log::warn!("unregistered style {name:?}")),
        }
    }
}

impl fmt::Debug for NamedStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedStyles")
            .field("styles", &self.styles)
            .finish_non_exhaustive()
    }
}

impl NamedStyles {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `control`, `body` and `preferred`, which adapt the font with the
    /// [`AdaptiveStyle`] of the same name.
    pub fn with_defaults() -> Self {
        let mut styles = Self::new();
        for (name, adaptation) in [
            ("control", AdaptiveStyle::Control),
            ("body", AdaptiveStyle::Body),
            ("preferred", AdaptiveStyle::Preferred),
        ] {
            styles.register_style(name, Style::from_parts([StylePart::Adapt(adaptation)]));
        }
        styles
    }

    /// Registers `style` under `name`, replacing any previous style with that name.
    pub fn register_style(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Returns the style registered under `name`.
    pub fn style(&self, name: &str) -> Option<&Style> {
        let style = self.styles.get(name);
        if style.is_none() {
            (self.unregistered_hook)(name);
        }
        style
    }

    /// Replaces the function called with the names of unregistered styles.
    pub fn set_unregistered_hook(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.unregistered_hook = Arc::new(hook);
    }

    /// Returns `true` if a style is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no style is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::NamedStyles;
    use crate::adapt::AdaptiveStyle;
    use crate::style::{Style, StylePart};

    #[test]
    fn defaults_adapt_fonts() {
        let styles = NamedStyles::with_defaults();
        assert_eq!(styles.len(), 3);
        let body = styles.style("body").unwrap();
        assert_eq!(body.adaptations, [AdaptiveStyle::Body]);
    }

    #[test]
    fn unregistered_lookups_call_the_hook() {
        let missed = Arc::new(Mutex::new(Vec::new()));
        let mut styles = NamedStyles::new();
        styles.register_style("em", Style::from_parts([StylePart::BaselineOffset(1.0)]));
        let sink = missed.clone();
        styles.set_unregistered_hook(move |name| sink.lock().unwrap().push(name.to_owned()));
        assert!(styles.style("em").is_some());
        assert!(styles.style("strong").is_none());
        assert_eq!(*missed.lock().unwrap(), ["strong"]);
    }
}
