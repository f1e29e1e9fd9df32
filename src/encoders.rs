pub(crate) mod common;
#[cfg(feature = "jpeg")]
pub(crate) mod jpeg;
#[cfg(feature = "png")]
pub(crate) mod png;
