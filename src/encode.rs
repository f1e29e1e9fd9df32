use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{ImageFormat, ImageResult};

use crate::{error::PadError, image::Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        // the quality the photos were saved with before this tool existed
        Self { jpeg_quality: 75 }
    }
}

/// Writes the image to `path` in the format implied by its extension.
pub fn encode(image: &Image, path: &Path, options: &EncodeOptions) -> Result<(), PadError> {
    encode_inner(image, path, options).map_err(|source| PadError::WriteFailure {
        path: path.to_owned(),
        source,
    })
}

fn encode_inner(image: &Image, path: &Path, options: &EncodeOptions) -> ImageResult<()> {
    let format = choose_encoding_format(image, path)?;

    // `File::create` automatically truncates (overwrites) the file if it exists.
    let file = File::create(path)?;
    // Wrap in BufWriter for performance
    let mut writer = BufWriter::new(file);

    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => crate::encoders::png::encode(image, &mut writer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::encoders::jpeg::encode(image, &mut writer, options.jpeg_quality)?,
        _ => image.pixels.write_to(&mut writer, format)?,
    }

    // The buffers would be flushed on drop, but that would swallow errors.
    writer.flush()?;
    Ok(())
}

fn choose_encoding_format(image: &Image, path: &Path) -> ImageResult<ImageFormat> {
    // guess based on the output path, fall back to the input format
    ImageFormat::from_path(path).or_else(|error| image.format.ok_or(error))
}
