// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative, mergeable text styles compiled to self-describing rich text.
//!
//! The crate is built around a small pipeline:
//!
//! - A [`Style`] is a record of optional formatting fields. Styles merge with "present fields
//!   win" semantics and are usually written as lists of [`StylePart`]s.
//! - [`materialize`] compiles a style into an [`AttributeSet`], the concrete per-run formatting
//!   of a [`RichText`] value. Font features and emphasis are applied through a [`FontProvider`].
//! - Behaviours that depend on the presentation context (content size scaling, proportional
//!   tracking, tab stops) are embedded into the attribute set as serialized
//!   [`EmbeddedTransformation`] records, so [`adapt_text`] can re-adapt a rich text value without
//!   the style that produced it.
//! - [`compose`] concatenates heterogeneous [`Composable`] fragments (text, rich text, special
//!   characters, tabs and inline [`Image`]s) so that tracking applies to every character but the
//!   very last one.
//! - [`markup::compile`] turns an XML fragment into rich text by looking up a style for every
//!   element through an [`XmlStyler`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library in dependencies.
//!
//! ## Example
//!
//! ```
//! use rich_style::{Font, Style, StyleContext, StylePart, Tracking};
//!
//! let cx = StyleContext::default();
//! let style = Style::from_parts([
//!     StylePart::Font(Font::new("Avenir", 30.0)),
//!     StylePart::Tracking(Tracking::Adobe(300.0)),
//! ]);
//! let text = style.attributed_string("Hello", None, &cx);
//! let (attrs, range) = text.attributes_at(0).unwrap();
//! assert_eq!(range, 0..5);
//! assert_eq!(attrs.kerning, Some(9.0));
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod adapt;
pub mod attributes;
pub mod compose;
mod context;
mod font;
mod image;
pub mod markup;
mod materialize;
mod measure;
mod named_styles;
mod special;
pub mod style;

#[cfg(test)]
mod tests;

pub use attributed_text;
pub use peniko::Color;
pub use text_primitives;

pub use adapt::{
    AdaptContext, AdaptiveStyle, ContentSizeCategory, EmbeddedTransformation, adapt_attributes,
    adapt_text,
};
pub use attributes::{Attachment, AttributeSet, ParagraphAttributes, TabStop, TransformationRecord};
pub use compose::{Composable, SharedComposable, Tab, compose, join};
pub use context::StyleContext;
pub use font::{BasicFontProvider, Font, FontProvider, TextStyle};
pub use image::Image;
pub use markup::{MarkupError, MarkupOptions, XmlStyleRule, XmlStyler};
pub use materialize::materialize;
pub use measure::{MonospaceMeasure, TextMeasure};
pub use named_styles::NamedStyles;
pub use special::Special;
pub use style::{Style, StylePart, Tracking, Transform};

/// Rich text: a string partitioned into runs of [`AttributeSet`]s.
pub type RichText = attributed_text::AttributedText<AttributeSet>;
