use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = PadError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PadError {
    #[error("unable to read image '{}'", .path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no readable images in batch")]
    EmptyBatch,

    #[error("unable to write image '{}'", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unable to resample image: {0}")]
    Resample(String),

    #[error("unable to list input directory '{}'", .path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to replace output directory '{}'", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PadError {
    /// Errors that only concern a single image and must not stop the rest of the batch.
    pub fn is_per_image(&self) -> bool {
        matches!(
            self,
            PadError::UnreadableImage { .. } | PadError::WriteFailure { .. } | PadError::Resample(_)
        )
    }
}

/// Renders an error together with all of its causes, `outer: inner: innermost`.
pub fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
