use std::fmt::Display;

use pic_scale_safe::ResamplingFunction;

/// Resampling filter used when a large image is scaled onto the canvas.
/// Names follow imagemagick's `-filter` option.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, strum::EnumString, strum::IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Filter {
    Box,
    Catrom,
    Cubic,
    Gaussian,
    Hermite,
    #[default]
    Lanczos,
    Lanczos2,
    Mitchell,
    Point,
    Spline,
    Triangle,
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stringified: &'static str = self.into();
        f.write_str(stringified)
    }
}

impl Filter {
    pub fn into_resize(self) -> ResamplingFunction {
        match self {
            Filter::Box => ResamplingFunction::Box,
            Filter::Catrom => ResamplingFunction::CatmullRom,
            Filter::Cubic => ResamplingFunction::Cubic,
            Filter::Gaussian => ResamplingFunction::Gaussian,
            Filter::Hermite => ResamplingFunction::Hermite,
            Filter::Lanczos => ResamplingFunction::Lanczos3,
            Filter::Lanczos2 => ResamplingFunction::Lanczos2,
            Filter::Mitchell => ResamplingFunction::MitchellNetravalli,
            Filter::Point => ResamplingFunction::Nearest,
            Filter::Spline => ResamplingFunction::BSpline,
            Filter::Triangle => ResamplingFunction::Bilinear,
        }
    }
}
