use std::path::Path;

use image::error::{DecodingError, ImageFormatHint};
use image::{DynamicImage, ImageDecoder, ImageError, ImageReader, ImageResult};

use crate::{error::PadError, image::Image};

/// Decodes the file into RGB, guessing the format from the file contents.
pub fn decode(path: &Path) -> Result<Image, PadError> {
    decode_inner(path).map_err(|source| PadError::UnreadableImage {
        path: path.to_owned(),
        source,
    })
}

fn decode_inner(path: &Path) -> ImageResult<Image> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let mut decoder = reader.into_decoder()?;
    // A broken ICC chunk is no reason to reject the pixels
    let icc = decoder.icc_profile().unwrap_or(None);
    let pixels = DynamicImage::from_decoder(decoder)?.to_rgb8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(ImageError::Decoding(DecodingError::new(
            format.map(ImageFormatHint::Exact).unwrap_or(ImageFormatHint::Unknown),
            "image has no pixels",
        )));
    }
    Ok(Image {
        icc,
        format,
        pixels,
    })
}

#[cfg(all(test, feature = "png"))]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(3, 2, Rgb([255, 0, 0])).save(&path).unwrap();

        let image = decode(&path).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.format, Some(ImageFormat::Png));
        assert_eq!(image.pixels.get_pixel(2, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_decode_guesses_format_from_contents() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("actually-png.png");
        RgbImage::new(1, 1).save(&png_path).unwrap();
        let misnamed = dir.path().join("actually-png.jpg");
        std::fs::rename(&png_path, &misnamed).unwrap();

        assert_eq!(decode(&misnamed).unwrap().format, Some(ImageFormat::Png));
    }

    #[test]
    fn test_corrupt_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a png").unwrap();

        match decode(&path) {
            Err(PadError::UnreadableImage { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected UnreadableImage, got {other:?}"),
        }
    }
}
