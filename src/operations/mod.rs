pub mod compose;
pub mod dominant_color;
pub mod probe;
pub mod resize;

pub use compose::compose;
pub use dominant_color::ColorSampler;
pub use probe::{probe, ProbeMode};
