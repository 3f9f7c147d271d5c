// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiling markup into rich text.
//!
//! A markup fragment is a restricted dialect of XML. Every element is styled by an
//! [`XmlStyler`], which returns a style that is merged on top of the style of the enclosing
//! element and may insert content before and after the element's children. Character data is
//! styled with the style of the innermost open element.
//!
//! The fragment is wrapped in a synthetic root element so that text at the top level is well
//! formed, unless [`MarkupOptions::do_not_wrap`] is set. Error locations always refer to the
//! fragment as given.

mod styler;

use std::mem;
use std::sync::Arc;

use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub use styler::{ElementAttributes, FnStyler, RuleStyler, StyleFn, XmlStyleRule, XmlStyler};

use crate::compose::Composable;
use crate::context::StyleContext;
use crate::style::Style;
use crate::RichText;

const ROOT_ELEMENT: &str = "RichStyleRoot";

/// Options for [`compile`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkupOptions {
    /// The fragment is a complete document and is not wrapped in a synthetic root element.
    pub do_not_wrap: bool,
    /// Elements the styler has no style for are left unstyled instead of failing.
    pub allow_unregistered_elements: bool,
}

/// Errors that abort markup compilation.
///
/// Lines and columns are 1-based and count characters of the fragment passed to [`compile`].
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The fragment is not well formed.
    #[error("malformed markup at {line}:{column}: {source}")]
    Syntax {
        /// The parser error.
        #[source]
        source: quick_xml::Error,
        /// Line of the error.
        line: usize,
        /// Column of the error.
        column: usize,
    },
    /// The styler has no style for an element.
    #[error("unregistered element <{element}> at {line}:{column}")]
    UnregisteredElement {
        /// Name of the element.
        element: String,
        /// Line of the element's start tag.
        line: usize,
        /// Column of the element's start tag.
        column: usize,
    },
}

impl MarkupError {
    /// The line of the error.
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::UnregisteredElement { line, .. } => *line,
        }
    }

    /// The column of the error.
    pub fn column(&self) -> usize {
        match self {
            Self::Syntax { column, .. } | Self::UnregisteredElement { column, .. } => *column,
        }
    }
}

/// Compiles `fragment` into rich text.
///
/// `base_style` styles text outside of any element. Its own markup styler is ignored; elements
/// are styled by `styler`, or by the styler carried by the style of an enclosing element.
///
/// ```
/// use std::sync::Arc;
///
/// use rich_style::markup::{MarkupOptions, RuleStyler, XmlStyleRule, compile};
/// use rich_style::{Style, StyleContext, StylePart};
///
/// let rules = vec![XmlStyleRule::Style(
///     "a".into(),
///     Style::from_parts([StylePart::Link("https://linebender.org".into())]),
/// )];
/// let text = compile(
///     "Visit <a>us</a> &amp; say hi",
///     &Style::default(),
///     Arc::new(RuleStyler::new(rules)),
///     MarkupOptions::default(),
///     &StyleContext::default(),
/// )
/// .unwrap();
/// assert_eq!(text.text(), "Visit us & say hi");
/// let (attrs, range) = text.attributes_at(6).unwrap();
/// assert_eq!(range, 6..8);
/// assert_eq!(attrs.link.as_deref(), Some("https://linebender.org"));
/// ```
pub fn compile(
    fragment: &str,
    base_style: &Style,
    styler: Arc<dyn XmlStyler>,
    options: MarkupOptions,
    cx: &StyleContext<'_>,
) -> Result<RichText, MarkupError> {
    let wrapped;
    let (xml, prefix_len) = if options.do_not_wrap {
        (fragment, 0)
    } else {
        wrapped = format!("<{ROOT_ELEMENT}>{fragment}</{ROOT_ELEMENT}>");
        (wrapped.as_str(), ROOT_ELEMENT.len() + 2)
    };

    let mut builder = Builder::new(base_style, styler, options, cx);
    parse(xml, !options.do_not_wrap, &mut builder).map_err(|failure| {
        let (line, column) = location(fragment, failure.offset().saturating_sub(prefix_len));
        match failure {
            Failure::Syntax(source, _) => MarkupError::Syntax {
                source,
                line,
                column,
            },
            Failure::Unregistered(element, _) => MarkupError::UnregisteredElement {
                element,
                line,
                column,
            },
        }
    })?;
    Ok(builder.text)
}

/// Compiles `fragment` with a [`RuleStyler`] made of `rules`.
pub fn compile_with_rules(
    fragment: &str,
    base_style: &Style,
    rules: Vec<XmlStyleRule>,
    options: MarkupOptions,
    cx: &StyleContext<'_>,
) -> Result<RichText, MarkupError> {
    compile(fragment, base_style, Arc::new(RuleStyler::new(rules)), options, cx)
}

enum Failure {
    Syntax(quick_xml::Error, usize),
    Unregistered(String, usize),
}

impl Failure {
    fn syntax(err: impl Into<quick_xml::Error>, reader: &Reader<&[u8]>) -> Self {
        Self::Syntax(err.into(), offset(reader.buffer_position()))
    }

    fn offset(&self) -> usize {
        match self {
            Self::Syntax(_, offset) | Self::Unregistered(_, offset) => *offset,
        }
    }
}

fn offset(position: u64) -> usize {
    usize::try_from(position).unwrap_or(usize::MAX)
}

/// 1-based line and column of byte `offset` in `source`.
fn location(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Feeds the events of `xml` to `builder`.
///
/// When `wrapped`, the first start tag is the synthetic root and is not styled. Every element of
/// the caller's fragment is styled, including start or empty tags named like the root.
fn parse(xml: &str, wrapped: bool, builder: &mut Builder<'_, '_>) -> Result<(), Failure> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut root_seen = false;
    let mut root_open = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(Failure::Syntax(err, offset(reader.error_position())));
            }
        };
        match event {
            Event::Start(e) => {
                let name = element_name(&reader, &e)?;
                if wrapped && !root_seen {
                    root_seen = true;
                    root_open = true;
                    continue;
                }
                let attributes = element_attributes(&reader, &e)?;
                if !builder.enter(&name, &attributes) {
                    return Err(Failure::Unregistered(name, tag_start(xml, &reader)));
                }
            }
            Event::Empty(e) => {
                let name = element_name(&reader, &e)?;
                let attributes = element_attributes(&reader, &e)?;
                if !builder.enter(&name, &attributes) {
                    return Err(Failure::Unregistered(name, tag_start(xml, &reader)));
                }
                builder.exit();
            }
            Event::End(_) => {
                if builder.depth() == 0 {
                    root_open = false;
                } else {
                    builder.exit();
                }
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|err| Failure::syntax(err, &reader))?;
                builder.characters(&text);
            }
            Event::CData(e) => {
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| Failure::syntax(err, &reader))?;
                builder.characters(&text);
            }
            Event::GeneralRef(e) => {
                let name = e.decode().map_err(|err| Failure::syntax(err, &reader))?;
                let entity = format!("&{name};");
                let resolved = quick_xml::escape::unescape(&entity)
                    .map_err(|err| Failure::syntax(err, &reader))?;
                builder.characters(&resolved);
            }
            Event::Eof => {
                let unclosed = builder
                    .open_element()
                    .map(str::to_owned)
                    .or_else(|| root_open.then(|| ROOT_ELEMENT.to_owned()));
                if let Some(element) = unclosed {
                    let err = quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(element));
                    return Err(Failure::Syntax(err, xml.len()));
                }
                return Ok(());
            }
            _ => {}
        }
    }
}

/// Offset of the `<` of the tag the reader just consumed.
fn tag_start(xml: &str, reader: &Reader<&[u8]>) -> usize {
    let end = offset(reader.buffer_position()).min(xml.len());
    xml.get(..end)
        .and_then(|before| before.rfind('<'))
        .unwrap_or(end)
}

fn element_name(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<String, Failure> {
    reader
        .decoder()
        .decode(start.name().as_ref())
        .map(|name| name.into_owned())
        .map_err(|err| Failure::syntax(err, reader))
}

fn element_attributes(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<ElementAttributes, Failure> {
    let mut attributes = ElementAttributes::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| Failure::syntax(err, reader))?;
        let decoder = reader.decoder();
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(|err| Failure::syntax(err, reader))?;
        let raw = decoder
            .decode(&attribute.value)
            .map_err(|err| Failure::syntax(err, reader))?;
        let value = quick_xml::escape::unescape(&raw).map_err(|err| Failure::syntax(err, reader))?;
        attributes.insert(key.into_owned(), value.into_owned());
    }
    Ok(attributes)
}

struct Frame {
    element: String,
    style: Style,
    styler: Arc<dyn XmlStyler>,
}

/// The style stack and the text built so far.
struct Builder<'a, 'cx> {
    current: Frame,
    parents: Vec<Frame>,
    text: RichText,
    allow_unregistered_elements: bool,
    cx: &'a StyleContext<'cx>,
}

impl<'a, 'cx> Builder<'a, 'cx> {
    fn new(
        base_style: &Style,
        styler: Arc<dyn XmlStyler>,
        options: MarkupOptions,
        cx: &'a StyleContext<'cx>,
    ) -> Self {
        Self {
            current: Frame {
                element: String::new(),
                style: base_style.without_xml_styler(),
                styler,
            },
            parents: Vec::new(),
            text: RichText::new(),
            allow_unregistered_elements: options.allow_unregistered_elements,
            cx,
        }
    }

    fn depth(&self) -> usize {
        self.parents.len()
    }

    fn open_element(&self) -> Option<&str> {
        (self.depth() > 0).then_some(self.current.element.as_str())
    }

    /// Pushes a frame for `element`. Returns `false` if the element is unregistered and that is
    /// not allowed.
    ///
    /// A styler carried by the element's style styles the element's children. The prefix comes
    /// from the styler that styled the element and uses the element's style.
    fn enter(&mut self, element: &str, attributes: &ElementAttributes) -> bool {
        let styler = self.current.styler.clone();
        let mut style = match styler.style(element, attributes, &self.current.style) {
            Some(delta) => self.current.style.merged_with(&delta),
            None if self.allow_unregistered_elements => self.current.style.clone(),
            None => return false,
        };
        let children_styler = style.xml_styler.take().unwrap_or_else(|| styler.clone());
        let frame = Frame {
            element: element.to_owned(),
            style,
            styler: children_styler,
        };
        self.parents.push(mem::replace(&mut self.current, frame));

        if let Some(prefix) = styler.prefix(element, attributes) {
            prefix.append_to(&mut self.text, &self.current.style, false, self.cx);
        }
        true
    }

    /// Appends the suffix of the innermost element with its style, then pops its frame.
    fn exit(&mut self) {
        if let Some(suffix) = self.current.styler.suffix(&self.current.element) {
            suffix.append_to(&mut self.text, &self.current.style, false, self.cx);
        }
        if let Some(parent) = self.parents.pop() {
            self.current = parent;
        }
    }

    fn characters(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let piece = self
            .current
            .style
            .plain_attributed_string(text, None, self.cx.fonts);
        self.text.append(&piece);
    }
}

#[cfg(test)]
mod tests {
    use super::location;

    #[test]
    fn locations_count_characters() {
        assert_eq!(location("abc", 0), (1, 1));
        assert_eq!(location("abc", 2), (1, 3));
        assert_eq!(location("ab\ncd", 3), (2, 1));
        assert_eq!(location("ab\ncd", 4), (2, 2));
        assert_eq!(location("é<x", 2), (1, 2));
        assert_eq!(location("ab", 10), (1, 3));
        // Inside a multi-byte character.
        assert_eq!(location("éx", 1), (1, 1));
    }
}
