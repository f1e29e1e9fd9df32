use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::ImageResult;

use crate::encoders::common::write_icc;
use crate::image::Image;

pub fn encode<W: Write>(image: &Image, writer: &mut W, quality: u8) -> ImageResult<()> {
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    write_icc(&mut encoder, image);
    image.pixels.write_with_encoder(encoder)
}
