//! Tile image decoding.

use image::RgbaImage;

use crate::error::DecodeResult;

/// Decode a PNG or JPEG tile into RGBA8 pixels.
///
/// The format is sniffed from the data, so terrain-RGB PNGs and satellite
/// JPEGs both go through here.
pub fn decode_image(bytes: &[u8]) -> DecodeResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    #[test]
    fn png_roundtrip_keeps_channels() {
        let mut source = RgbaImage::new(3, 2);
        source.put_pixel(2, 1, Rgba([1, 134, 160, 255]));

        let mut png = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([1, 134, 160, 255]));
    }

    #[test]
    fn garbage_is_an_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
