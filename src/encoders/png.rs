use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageResult;

use crate::encoders::common::write_icc;
use crate::image::Image;

pub fn encode<W: Write>(image: &Image, writer: &mut W) -> ImageResult<()> {
    // Canvases are mostly flat padding, which adaptive filtering compresses well
    let mut encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    write_icc(&mut encoder, image);
    image.pixels.write_with_encoder(encoder)
}
