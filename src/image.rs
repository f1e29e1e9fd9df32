use image::{ImageFormat, RgbImage};

/// A decoded raster. Every pipeline step produces a new `Image` instead of editing one in place.
#[derive(Debug, Clone)]
pub struct Image {
    pub icc: Option<Vec<u8>>,
    /// Format the pixels were decoded from, used when the output path has no usable extension
    pub format: Option<ImageFormat>,
    pub pixels: RgbImage,
}

impl Image {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            icc: None,
            format: None,
            pixels,
        }
    }

    /// Keeps the metadata of `self` but swaps in new pixels.
    pub fn with_pixels(&self, pixels: RgbImage) -> Self {
        Self {
            icc: self.icc.clone(),
            format: self.format,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}
