//! Batch canvas sizing and the per-image resize decision.

use crate::{error::PadError, utils::fraction::Fraction};

pub const DEFAULT_UPPER_BOUND: u32 = 1080;
pub const DEFAULT_ASPECT_RATIO: Fraction = Fraction::new(4, 5);
pub const DEFAULT_SIZE_THRESHOLD: u32 = 360;

/// Output dimensions shared by every image of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpec {
    pub fn contains(&self, (width, height): (u32, u32)) -> bool {
        width <= self.width && height <= self.height
    }
}

/// Derives the batch canvas from the probed extent.
///
/// Only the probed width drives the canvas: it is capped at `upper_bound`,
/// and the height follows from `aspect_ratio` (width:height), rounded half up.
pub fn plan_canvas(
    probed: (u32, u32),
    aspect_ratio: Fraction,
    upper_bound: u32,
) -> Result<CanvasSpec, PadError> {
    if !aspect_ratio.is_positive() || upper_bound == 0 {
        return Err(PadError::InvalidConfiguration(format!(
            "cannot plan a canvas with aspect ratio {aspect_ratio} and width bound {upper_bound}"
        )));
    }
    let (max_width, _) = probed;
    let width = max_width.min(upper_bound).max(1);
    let height = Fraction::new(aspect_ratio.denominator(), aspect_ratio.numerator())
        .scale(width)
        .ok_or_else(|| {
            PadError::InvalidConfiguration(format!(
                "aspect ratio {aspect_ratio} makes the canvas too tall for width {width}"
            ))
        })?
        .max(1);
    Ok(CanvasSpec { width, height })
}

/// What to do with a native-size image that does not fit on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum OversizePolicy {
    /// Center it anyway; whatever falls outside the canvas is not visible
    #[default]
    Overhang,
    /// Shrink it until it fits
    Fit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeDecision {
    /// Paste at native resolution
    PadOnly,
    /// Resample to `width`x`height` first
    ScaleAndPad {
        scale_factor: f64,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySelector {
    pub size_threshold: u32,
    pub oversize_policy: OversizePolicy,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self {
            size_threshold: DEFAULT_SIZE_THRESHOLD,
            oversize_policy: OversizePolicy::default(),
        }
    }
}

impl StrategySelector {
    pub fn select(&self, (width, height): (u32, u32), canvas: CanvasSpec) -> ResizeDecision {
        if width < self.size_threshold || height < self.size_threshold {
            // upscaling small images looks worse than padding them
            if self.oversize_policy == OversizePolicy::Fit && !canvas.contains((width, height)) {
                return scale_to_fit((width, height), canvas);
            }
            return ResizeDecision::PadOnly;
        }
        scale_to_fit((width, height), canvas)
    }
}

/// Scales by the dominant axis, unless that would push the other axis off the canvas.
fn scale_to_fit((width, height): (u32, u32), canvas: CanvasSpec) -> ResizeDecision {
    let by_width = Fraction::new(canvas.width, width);
    let by_height = Fraction::new(canvas.height, height);
    let (dominant, other) = if width >= height {
        (by_width, by_height)
    } else {
        (by_height, by_width)
    };
    let factor = dominant.min(other);
    // a factor of at most canvas/extent keeps both results within u32 and on the canvas
    let scaled = |extent: u32, limit: u32| factor.scale(extent).unwrap_or(limit).clamp(1, limit);
    ResizeDecision::ScaleAndPad {
        scale_factor: factor.to_float(),
        width: scaled(width, canvas.width),
        height: scaled(height, canvas.height),
    }
}
