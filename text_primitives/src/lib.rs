// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf vocabulary types for declarative text styling.
//!
//! This crate is a small, `no_std`-friendly layer of typed values shared by the style engine and
//! any host that consumes its output: OpenType feature tags and settings, the emphasis trait set,
//! and the enumerations that make up a paragraph's layout attributes.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{Emphasis, FontFeature, Tag};
//!
//! let tag = Tag::parse("smcp").unwrap();
//! assert_eq!(FontFeature::enabled(tag).value, 1);
//! assert_eq!(Tag::stylistic_set(7), Some(Tag::new(b"ss07")));
//!
//! let emphasis = Emphasis::BOLD | Emphasis::ITALIC;
//! assert!(emphasis.contains(Emphasis::BOLD));
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
#![no_std]

mod emphasis;
mod paragraph;
mod tag;

pub use emphasis::Emphasis;
pub use paragraph::{LineBreakMode, LineBreakStrategy, TextAlignment, WritingDirection};
pub use tag::{FontFeature, Setting, Tag};
