use image::RgbImage;
use pic_scale_safe::ImageSize;

use crate::{error::PadError, filter::Filter};

/// Resamples to exactly `dst_width`x`dst_height`.
pub fn resize(
    pixels: &RgbImage,
    dst_width: u32,
    dst_height: u32,
    filter: Filter,
) -> Result<RgbImage, PadError> {
    if pixels.width() == dst_width && pixels.height() == dst_height {
        return Ok(pixels.clone());
    }
    let src_size = ImageSize::new(pixels.width() as usize, pixels.height() as usize);
    let dst_size = ImageSize::new(dst_width as usize, dst_height as usize);
    let resized = pic_scale_safe::resize_rgb8(
        pixels.as_raw(),
        src_size,
        dst_size,
        filter.into_resize(),
    )
    .map_err(PadError::Resample)?;
    RgbImage::from_raw(dst_width, dst_height, resized)
        .ok_or_else(|| PadError::Resample("resampled buffer has the wrong length".into()))
}
