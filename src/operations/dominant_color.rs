//! Dominant color estimation by modified median cut quantization (MMCQ).
//!
//! Sampled pixels are binned into a 5-bit-per-channel histogram. The box enclosing all
//! populated bins is split along its longest axis at the population median until the
//! palette is full, and the most populous box's average color is the dominant color.

use std::cmp::Reverse;

use image::RgbImage;

use crate::{color::Color, error::PadError};

const SIGNIFICANT_BITS: u32 = 5;
const SHIFT: u32 = 8 - SIGNIFICANT_BITS;
const BINS_PER_CHANNEL: usize = 1 << SIGNIFICANT_BITS;
const HISTOGRAM_SIZE: usize = BINS_PER_CHANNEL * BINS_PER_CHANNEL * BINS_PER_CHANNEL;
/// Share of the palette that is split by population alone; the rest also weighs box volume.
const FRACTION_BY_POPULATION: f64 = 0.75;
/// Pixels brighter than this on every channel are treated as a white border and ignored.
const WHITE_CUTOFF: u8 = 250;

pub const DEFAULT_PALETTE_SIZE: usize = 5;
pub const MAX_PALETTE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSampler {
    quality: u32,
    palette_size: usize,
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self {
            quality: 1,
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

impl ColorSampler {
    /// `quality` is the sampling stride: 1 looks at every pixel, 10 at every tenth.
    pub fn new(quality: u32, palette_size: usize) -> Result<Self, PadError> {
        if quality == 0 {
            return Err(PadError::InvalidConfiguration(
                "color sample quality must be at least 1".into(),
            ));
        }
        if !(2..=MAX_PALETTE_SIZE).contains(&palette_size) {
            return Err(PadError::InvalidConfiguration(format!(
                "palette size must be between 2 and {MAX_PALETTE_SIZE}, got {palette_size}"
            )));
        }
        Ok(Self {
            quality,
            palette_size,
        })
    }

    pub fn sample(&self, pixels: &RgbImage) -> Color {
        let mut histogram = vec![0u32; HISTOGRAM_SIZE];
        let mut sampled = 0u64;
        let mut sums = [0u64; 3];

        for pixel in pixels.pixels().step_by(self.quality as usize) {
            let [r, g, b] = pixel.0;
            sampled += 1;
            sums[0] += u64::from(r);
            sums[1] += u64::from(g);
            sums[2] += u64::from(b);
            if r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF {
                continue;
            }
            histogram[bin_index([r >> SHIFT, g >> SHIFT, b >> SHIFT])] += 1;
        }

        let full = ColorBox {
            lo: [0; 3],
            hi: [(BINS_PER_CHANNEL - 1) as u8; 3],
            count: 0,
        };
        let Some(initial) = full.shrink(&histogram) else {
            // nothing but white: the average is as good as any palette entry
            return average_of(sums, sampled);
        };

        let palette = quantize(&histogram, initial, self.palette_size);
        palette
            .iter()
            .min_by_key(|color_box| Reverse(color_box.count))
            .map(|color_box| color_box.average(&histogram))
            .unwrap_or_else(|| average_of(sums, sampled))
    }
}

fn bin_index([r, g, b]: [u8; 3]) -> usize {
    (usize::from(r) << (2 * SIGNIFICANT_BITS)) | (usize::from(g) << SIGNIFICANT_BITS) | usize::from(b)
}

fn average_of(sums: [u64; 3], count: u64) -> Color {
    let count = count.max(1);
    Color::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}

/// Splits the initial box until there are `palette_size` boxes or nothing left to split.
fn quantize(histogram: &[u32], initial: ColorBox, palette_size: usize) -> Vec<ColorBox> {
    let mut boxes = vec![initial];
    let by_population = (palette_size as f64 * FRACTION_BY_POPULATION).ceil() as usize;
    split_until(&mut boxes, histogram, by_population, |b| b.count);
    split_until(&mut boxes, histogram, palette_size, |b| b.count * b.volume());
    boxes
}

fn split_until(
    boxes: &mut Vec<ColorBox>,
    histogram: &[u32],
    target: usize,
    priority: impl Fn(&ColorBox) -> u64,
) {
    while boxes.len() < target {
        // first box wins ties, which keeps the result deterministic
        let next = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.volume() > 1)
            .min_by_key(|(_, b)| Reverse(priority(b)))
            .map(|(index, _)| index);
        let Some(index) = next else {
            return;
        };
        let color_box = boxes.remove(index);
        match color_box.split(histogram) {
            Some((first, second)) => {
                boxes.push(first);
                boxes.push(second);
            }
            None => {
                boxes.insert(index, color_box);
                return;
            }
        }
    }
}

/// Axis-aligned box of histogram bins, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColorBox {
    lo: [u8; 3],
    hi: [u8; 3],
    count: u64,
}

impl ColorBox {
    fn volume(&self) -> u64 {
        (0..3)
            .map(|c| u64::from(self.hi[c] - self.lo[c]) + 1)
            .product()
    }

    fn bins(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        (self.lo[0]..=self.hi[0]).flat_map(move |r| {
            (self.lo[1]..=self.hi[1])
                .flat_map(move |g| (self.lo[2]..=self.hi[2]).map(move |b| [r, g, b]))
        })
    }

    /// Tightest box inside `self` that still holds all of its populated bins.
    fn shrink(&self, histogram: &[u32]) -> Option<ColorBox> {
        let mut lo = [u8::MAX; 3];
        let mut hi = [0u8; 3];
        let mut count = 0u64;
        for bin in self.bins() {
            let population = histogram[bin_index(bin)];
            if population == 0 {
                continue;
            }
            count += u64::from(population);
            for c in 0..3 {
                lo[c] = lo[c].min(bin[c]);
                hi[c] = hi[c].max(bin[c]);
            }
        }
        (count > 0).then_some(ColorBox { lo, hi, count })
    }

    fn split(&self, histogram: &[u32]) -> Option<(ColorBox, ColorBox)> {
        let widths: [u8; 3] = std::array::from_fn(|c| self.hi[c] - self.lo[c]);
        let axis = (0..3).max_by_key(|&c| (widths[c], Reverse(c)))?;
        let width = usize::from(widths[axis]);
        if width == 0 {
            return None;
        }

        // running population of the slices along the axis
        let mut partial = Vec::with_capacity(width + 1);
        let mut total = 0u64;
        for value in self.lo[axis]..=self.hi[axis] {
            let mut slice = *self;
            slice.lo[axis] = value;
            slice.hi[axis] = value;
            total += slice
                .bins()
                .map(|bin| u64::from(histogram[bin_index(bin)]))
                .sum::<u64>();
            partial.push(total);
        }
        let median = partial.iter().position(|&sum| 2 * sum > total)?;

        // cut into the larger side, away from the median, so a dominant slice keeps its own box
        let left = median;
        let right = width - median;
        let cut = if left <= right {
            (median + right / 2).min(width - 1)
        } else {
            median - 1 - left / 2
        };
        let cut = self.lo[axis] + cut as u8;

        let mut first = *self;
        first.hi[axis] = cut;
        let mut second = *self;
        second.lo[axis] = cut + 1;
        // both halves contain an outer slice of a tight box, so neither is empty
        Some((first.shrink(histogram)?, second.shrink(histogram)?))
    }

    /// Population-weighted average of the bin centers.
    fn average(&self, histogram: &[u32]) -> Color {
        let multiplier = 1u64 << SHIFT;
        let mut sums = [0u64; 3];
        let mut total = 0u64;
        for bin in self.bins() {
            let population = u64::from(histogram[bin_index(bin)]);
            total += population;
            for c in 0..3 {
                sums[c] += population * (u64::from(bin[c]) * multiplier + multiplier / 2);
            }
        }
        average_of(sums, total)
    }
}
