// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo attachment preparation — decode, downscale, re-encode as JPEG.
//
// Phone cameras produce 4-12 MB originals; complaint uploads ride rural
// mobile links. Everything is normalised to a bounded JPEG before it is
// handed to the multipart form.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

use abet_core::error::{AbetError, Result};
use abet_core::types::Attachment;

/// Longest edge of an uploaded photo, in pixels.
const MAX_EDGE: u32 = 1600;

/// Prepare raw picked/captured image bytes for upload.
///
/// Accepts anything the `image` crate can decode (JPEG, PNG, HEIC is the
/// platform bridge's job to transcode), downsizes so the longest edge is at
/// most [`MAX_EDGE`] px, and re-encodes as JPEG at `quality` (1-100).
///
/// `index` numbers the photo within its submission ("photo_0.jpg", ...).
pub fn prepare_photo(raw: &[u8], index: usize, quality: u8) -> Result<Attachment> {
    let img = image::load_from_memory(raw)
        .map_err(|e| AbetError::ImageError(format!("failed to decode photo: {e}")))?;

    let (w, h) = (img.width(), img.height());
    let img = if w.max(h) > MAX_EDGE {
        let resized = img.resize(MAX_EDGE, MAX_EDGE, FilterType::Triangle);
        debug!(from = %format!("{w}x{h}"), to = %format!("{}x{}", resized.width(), resized.height()), "photo downscaled");
        resized
    } else {
        img
    };

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AbetError::ImageError(format!("failed to encode JPEG: {e}")))?;

    debug!(bytes_in = raw.len(), bytes_out = out.len(), "photo prepared");
    Ok(Attachment::jpeg(index, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    /// Encode a flat-colour test image as PNG bytes.
    fn png_fixture(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([120, 90, 60])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn small_photo_keeps_its_dimensions() {
        let att = prepare_photo(&png_fixture(640, 480), 0, 70).unwrap();
        let round_tripped = image::load_from_memory(&att.bytes).unwrap();
        assert_eq!((round_tripped.width(), round_tripped.height()), (640, 480));
        assert_eq!(att.mime_type, "image/jpeg");
    }

    #[test]
    fn oversized_photo_is_bounded_to_max_edge() {
        let att = prepare_photo(&png_fixture(3200, 2400), 1, 70).unwrap();
        let round_tripped = image::load_from_memory(&att.bytes).unwrap();
        assert!(round_tripped.width().max(round_tripped.height()) <= MAX_EDGE);
        // Aspect ratio preserved: 4:3 in, 4:3 out.
        assert_eq!(round_tripped.width(), 1600);
        assert_eq!(round_tripped.height(), 1200);
        assert_eq!(att.file_name, "photo_1.jpg");
    }

    #[test]
    fn output_is_jpeg_regardless_of_input_format() {
        let att = prepare_photo(&png_fixture(100, 100), 0, 70).unwrap();
        // JPEG SOI marker.
        assert_eq!(&att.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = prepare_photo(b"definitely not an image", 0, 70);
        assert!(matches!(result, Err(AbetError::ImageError(_))));
    }

    #[test]
    fn quality_out_of_range_is_clamped_not_panicking() {
        assert!(prepare_photo(&png_fixture(32, 32), 0, 0).is_ok());
        assert!(prepare_photo(&png_fixture(32, 32), 0, 255).is_ok());
    }
}
