use std::fmt::Display;

use image::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Largest per-channel difference, handy for approximate comparisons
    pub fn max_channel_distance(&self, other: &Color) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_as_hex() {
        assert_eq!(Color::new(255, 0, 16).to_string(), "#ff0010");
    }

    #[test]
    fn test_pixel_conversion() {
        let color = Color::new(1, 2, 3);
        let pixel: Rgb<u8> = color.into();
        assert_eq!(pixel, Rgb([1, 2, 3]));
        assert_eq!(Color::from(pixel), color);
    }

    #[test]
    fn test_max_channel_distance() {
        let a = Color::new(10, 200, 30);
        let b = Color::new(14, 190, 30);
        assert_eq!(a.max_channel_distance(&b), 10);
        assert_eq!(b.max_channel_distance(&a), 10);
    }
}
