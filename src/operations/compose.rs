use std::borrow::Cow;

use image::{imageops::replace, RgbImage};

use crate::{
    color::Color,
    error::PadError,
    filter::Filter,
    image::Image,
    operations::resize::resize,
    plan::{CanvasSpec, ResizeDecision},
};

/// Paints a canvas with `background` and pastes the (possibly resampled) image at its center.
pub fn compose(
    image: &Image,
    decision: &ResizeDecision,
    canvas: CanvasSpec,
    background: Color,
    filter: Filter,
) -> Result<Image, PadError> {
    let source = match *decision {
        ResizeDecision::PadOnly => Cow::Borrowed(&image.pixels),
        ResizeDecision::ScaleAndPad { width, height, .. } => {
            Cow::Owned(resize(&image.pixels, width, height, filter)?)
        }
    };

    let mut pixels = RgbImage::from_pixel(canvas.width, canvas.height, background.into());
    let (x, y) = center_offset((canvas.width, canvas.height), source.dimensions());
    // opaque paste, anything outside the canvas is clipped
    replace(&mut pixels, &*source, x, y);
    Ok(image.with_pixels(pixels))
}

/// Offset that centers `inner` on `outer`. Odd remainders leave the extra pixel
/// on the right/bottom, and an `inner` larger than `outer` gets a negative offset.
pub fn center_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    let x = (i64::from(outer.0) - i64::from(inner.0)).div_euclid(2);
    let y = (i64::from(outer.1) - i64::from(inner.1)).div_euclid(2);
    (x, y)
}
