use crate::error::PadError;

/// How the batch's reference extent is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum ProbeMode {
    /// Widest width and tallest height, possibly from two different images
    #[default]
    Independent,
    /// Both extents of the single image with the most pixels
    LargestImage,
}

/// Returns the `(max_width, max_height)` of the batch.
pub fn probe<I>(dimensions: I, mode: ProbeMode) -> Result<(u32, u32), PadError>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut dimensions = dimensions.into_iter();
    let first = dimensions.next().ok_or(PadError::EmptyBatch)?;
    let extent = match mode {
        ProbeMode::Independent => dimensions.fold(first, |(max_w, max_h), (w, h)| {
            (max_w.max(w), max_h.max(h))
        }),
        ProbeMode::LargestImage => dimensions.fold(first, |largest, candidate| {
            // the earlier image wins ties
            if area(candidate) > area(largest) {
                candidate
            } else {
                largest
            }
        }),
    };
    Ok(extent)
}

fn area((width, height): (u32, u32)) -> u64 {
    u64::from(width) * u64::from(height)
}
