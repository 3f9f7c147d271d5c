// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run-partitioned attributed text.
//!
//! [`AttributedText`] stores a `String` together with a list of runs that partition it. Each run
//! carries one attribute value, so looking up "the formatting at this index" is a binary search
//! and the effective range of that formatting comes for free. Range-scoped updates split runs at
//! the range ends and coalesce equal neighbours afterwards.
//!
//! Byte ranges are validated through [`TextRange`]; invalid ranges surface as [`Error`].
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use attributed_text::AttributedText;
//!
//! let mut text = AttributedText::from_text("Hello ", "plain");
//! text.push_str("world", "bold");
//! let (attr, range) = text.attributes_at(8).unwrap();
//! assert_eq!(*attr, "bold");
//! assert_eq!(range, 6..11);
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

extern crate alloc;

mod attributed_text;
mod error;
mod text_range;

pub use crate::attributed_text::AttributedText;
pub use crate::error::Error;
pub use crate::text_range::TextRange;
