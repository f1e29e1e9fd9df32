//! Helper functions for using `quickcheck`'s `Arbitrary` trait

use quickcheck::Arbitrary;

use crate::utils::fraction::Fraction;

/// Image extents large enough to cover real photos but small enough to allocate in tests.
pub const MAX_DIMENSION: u32 = 6000;

#[must_use]
pub fn dimension(gen: &mut quickcheck::Gen) -> u32 {
    u32::arbitrary(gen) % MAX_DIMENSION + 1
}

#[must_use]
pub fn dimensions(gen: &mut quickcheck::Gen) -> (u32, u32) {
    (dimension(gen), dimension(gen))
}

impl Arbitrary for Fraction {
    fn arbitrary(gen: &mut quickcheck::Gen) -> Self {
        Fraction::new(u32::arbitrary(gen) % 32 + 1, u32::arbitrary(gen) % 32 + 1)
    }
}
