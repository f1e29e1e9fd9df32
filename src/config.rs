//! Run configuration: where to read and write, and the tunables of the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    encode::EncodeOptions,
    error::PadError,
    filter::Filter,
    operations::{
        dominant_color::{DEFAULT_PALETTE_SIZE, MAX_PALETTE_SIZE},
        ProbeMode,
    },
    plan::{
        OversizePolicy, StrategySelector, DEFAULT_ASPECT_RATIO, DEFAULT_SIZE_THRESHOLD,
        DEFAULT_UPPER_BOUND,
    },
    utils::fraction::Fraction,
};

/// Everything that shapes the output images, independent of where they live.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Canvas width never exceeds this, no matter how wide the batch is
    pub target_upper_bound_width: u32,
    /// Canvas width:height
    pub aspect_ratio: Fraction,
    /// Images below this on either axis are padded at native size instead of scaled
    pub size_threshold: u32,
    /// Sampling stride of the dominant color estimate, 1 samples every pixel
    pub color_sample_quality: u32,
    pub palette_size: usize,
    pub probe_mode: ProbeMode,
    pub oversize_policy: OversizePolicy,
    pub filter: Filter,
    pub jpeg_quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target_upper_bound_width: DEFAULT_UPPER_BOUND,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            size_threshold: DEFAULT_SIZE_THRESHOLD,
            color_sample_quality: 1,
            palette_size: DEFAULT_PALETTE_SIZE,
            probe_mode: ProbeMode::default(),
            oversize_policy: OversizePolicy::default(),
            filter: Filter::default(),
            jpeg_quality: EncodeOptions::default().jpeg_quality,
        }
    }
}

impl PipelineOptions {
    pub fn validate(&self) -> Result<(), PadError> {
        let invalid = |msg: String| Err(PadError::InvalidConfiguration(msg));
        if self.target_upper_bound_width == 0 {
            return invalid("target width bound must be positive".into());
        }
        if !self.aspect_ratio.is_positive() {
            return invalid(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            ));
        }
        if self.size_threshold == 0 {
            return invalid("size threshold must be positive".into());
        }
        if self.color_sample_quality == 0 {
            return invalid("color sample quality must be at least 1".into());
        }
        if !(2..=MAX_PALETTE_SIZE).contains(&self.palette_size) {
            return invalid(format!(
                "palette size must be between 2 and {MAX_PALETTE_SIZE}, got {}",
                self.palette_size
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return invalid(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }

    pub fn selector(&self) -> StrategySelector {
        StrategySelector {
            size_threshold: self.size_threshold,
            oversize_policy: self.oversize_policy,
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_dir: PathBuf,
    /// Replaced as a whole on every successful run
    pub output_dir: PathBuf,
    pub options: PipelineOptions,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            options: PipelineOptions::default(),
        }
    }

    /// Checks everything that can be checked before touching the filesystem.
    pub fn validate(&self) -> Result<(), PadError> {
        self.options.validate()?;

        if !self.input_dir.is_dir() {
            return Err(PadError::InvalidConfiguration(format!(
                "input '{}' is not a directory",
                self.input_dir.display()
            )));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(PadError::InvalidConfiguration(format!(
                "output '{}' exists and is not a directory",
                self.output_dir.display()
            )));
        }
        // replacing the output renames the path itself, which would swap out the link and not its target
        if fs::symlink_metadata(&self.output_dir).is_ok_and(|metadata| metadata.is_symlink()) {
            return Err(PadError::InvalidConfiguration(format!(
                "output '{}' must not be a symbolic link",
                self.output_dir.display()
            )));
        }
        // the output directory gets replaced wholesale, which must never take the inputs with it
        if let (Ok(input), Ok(output)) = (
            self.input_dir.canonicalize(),
            self.output_dir.canonicalize(),
        ) {
            if input.starts_with(&output) {
                return Err(PadError::InvalidConfiguration(format!(
                    "output '{}' must not contain the input directory",
                    self.output_dir.display()
                )));
            }
        }
        if is_filesystem_root(&self.output_dir) {
            return Err(PadError::InvalidConfiguration(
                "output must not be a filesystem root".into(),
            ));
        }
        Ok(())
    }
}

fn is_filesystem_root(path: &Path) -> bool {
    path.canonicalize()
        .map(|path| path.parent().is_none())
        .unwrap_or(false)
}
