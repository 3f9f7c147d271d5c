// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::attributes::Attachment;
use crate::compose::Composable;
use crate::context::StyleContext;
use crate::special::Special;
use crate::style::Style;
use crate::RichText;

/// An image to be placed inline with text.
///
/// The engine never decodes images. The host resolves `id` to pixels when it draws the
/// [`Attachment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Image {
    /// User-specified identifier for the image.
    pub id: u64,
    /// The width of the image in points.
    pub width: f32,
    /// The height of the image in points.
    pub height: f32,
    /// Whether the image is a mask to be tinted with the text color.
    pub template: bool,
}

impl Image {
    /// Creates an image drawn with its own colors.
    pub fn new(id: u64, width: f32, height: f32) -> Self {
        Self {
            id,
            width,
            height,
            template: false,
        }
    }

    /// Creates an image whose opaque pixels take the color of the text.
    pub fn template(id: u64, width: f32, height: f32) -> Self {
        Self {
            template: true,
            ..Self::new(id, width, height)
        }
    }
}

impl Composable for Image {
    /// Appends U+FFFC carrying the image as its [`Attachment`].
    ///
    /// The base style's baseline offset raises the image instead of the character, so it is
    /// moved into the attachment. Template images are tinted with the base style's color.
    fn append_to(
        &self,
        text: &mut RichText,
        base_style: &Style,
        _is_last: bool,
        cx: &StyleContext<'_>,
    ) {
        let mut attributes = base_style.attributes(cx.fonts);
        let baseline_offset = attributes.baseline_offset.take().unwrap_or(0.0);
        attributes.attachment = Some(Attachment {
            image: *self,
            baseline_offset,
            tint: attributes.color.filter(|_| self.template),
        });
        let mut buf = [0; 4];
        let placeholder = Special::ObjectReplacementCharacter.as_char().encode_utf8(&mut buf);
        text.push_str(placeholder, attributes);
    }
}
