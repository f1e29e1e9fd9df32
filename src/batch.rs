//! Running the whole pipeline over a directory of images.

use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    config::{Config, PipelineOptions},
    decode::decode,
    error::PadError,
    image::Image,
    operations::{compose, probe, ColorSampler},
    output::{OutputSink, StagedOutput},
    plan::{plan_canvas, CanvasSpec, ResizeDecision, StrategySelector},
    report::{BatchResult, Status},
};

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// One input of a batch. Its size is known up front, its pixels are loaded
/// only when its turn comes.
pub trait BatchEntry {
    fn filename(&self) -> &OsStr;
    fn dimensions(&self) -> (u32, u32);
    fn load(&self) -> Result<Cow<'_, Image>, PadError>;
}

/// An already decoded image, as used by callers that keep images in memory.
impl BatchEntry for (OsString, Image) {
    fn filename(&self) -> &OsStr {
        &self.0
    }

    fn dimensions(&self) -> (u32, u32) {
        self.1.dimensions()
    }

    fn load(&self) -> Result<Cow<'_, Image>, PadError> {
        Ok(Cow::Borrowed(&self.1))
    }
}

/// A file that decoded once while the batch was scanned. It is decoded again when processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    filename: OsString,
    path: PathBuf,
    dimensions: (u32, u32),
}

impl BatchEntry for ImageFile {
    fn filename(&self) -> &OsStr {
        &self.filename
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn load(&self) -> Result<Cow<'_, Image>, PadError> {
        decode(&self.path).map(Cow::Owned)
    }
}

/// The per-batch and per-image steps, independent of where images come from and go to.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    sampler: ColorSampler,
    selector: StrategySelector,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Result<Self, PadError> {
        options.validate()?;
        let sampler = ColorSampler::new(options.color_sample_quality, options.palette_size)?;
        let selector = options.selector();
        Ok(Self {
            options,
            sampler,
            selector,
        })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Sizes the canvas shared by every image of the batch.
    pub fn plan<I>(&self, dimensions: I) -> Result<CanvasSpec, PadError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let probed = probe(dimensions, self.options.probe_mode)?;
        let canvas = plan_canvas(
            probed,
            self.options.aspect_ratio,
            self.options.target_upper_bound_width,
        )?;
        info!(
            probed_width = probed.0,
            probed_height = probed.1,
            "canvas is {}x{}",
            canvas.width,
            canvas.height
        );
        Ok(canvas)
    }

    /// Samples the background, picks a strategy and composes one image.
    pub fn process(&self, image: &Image, canvas: CanvasSpec) -> Result<Image, PadError> {
        let background = self.sampler.sample(&image.pixels);
        let decision = self.selector.select(image.dimensions(), canvas);
        if decision == ResizeDecision::PadOnly && !canvas.contains(image.dimensions()) {
            warn!(
                "{}x{} image is larger than the {}x{} canvas, its edges will be cut off",
                image.width(),
                image.height(),
                canvas.width,
                canvas.height
            );
        }
        debug!(?decision, %background, "composing");
        compose(image, &decision, canvas, background, self.options.filter)
    }

    pub fn run<E, S>(&self, entries: &[E], sink: &mut S) -> Result<BatchResult, PadError>
    where
        E: BatchEntry,
        S: OutputSink,
    {
        let mut result = BatchResult::default();
        self.run_into(entries, sink, &mut result)?;
        Ok(result)
    }

    /// Composes every entry onto one shared canvas and hands the results to `sink`.
    ///
    /// The canvas is planned before any image is loaded. Only one image is held
    /// in memory at a time. A failing image is recorded and the rest of the
    /// batch carries on; a batch-level error aborts with `result` kept up to date.
    pub fn run_into<E, S>(
        &self,
        entries: &[E],
        sink: &mut S,
        result: &mut BatchResult,
    ) -> Result<(), PadError>
    where
        E: BatchEntry,
        S: OutputSink,
    {
        let canvas = self.plan(entries.iter().map(BatchEntry::dimensions))?;
        let total = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            let filename = entry.filename();
            let written = entry
                .load()
                .and_then(|image| self.process(&image, canvas))
                .and_then(|composed| sink.write(filename, &composed));
            match written {
                Ok(()) => {
                    info!(file = %filename.to_string_lossy(), "[{}/{total}] done", index + 1);
                    result.record_success(filename);
                }
                Err(error) if !error.is_per_image() => return Err(error),
                Err(error) => {
                    warn!(file = %filename.to_string_lossy(), %error, "[{}/{total}] failed", index + 1);
                    result.record_failure(filename, &error);
                }
            }
        }
        Ok(())
    }
}

/// Reads a directory of images, runs the [`Pipeline`] and replaces the output directory.
#[derive(Debug)]
pub struct BatchOrchestrator {
    config: Config,
    pipeline: Pipeline,
}

impl BatchOrchestrator {
    /// Fails fast on an invalid configuration, before anything is read or written.
    pub fn new(config: Config) -> Result<Self, PadError> {
        config.validate()?;
        let pipeline = Pipeline::new(config.options.clone())?;
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<BatchResult, PadError> {
        let mut result = BatchResult::default();
        self.run_into(&mut result)?;
        Ok(result)
    }

    /// Like [`run`](Self::run), but the outcomes recorded before a batch-level
    /// error stay in `result` so they can still be reported.
    pub fn run_into(&self, result: &mut BatchResult) -> Result<(), PadError> {
        let files = self.scan(result)?;
        if files.is_empty() {
            return Err(PadError::EmptyBatch);
        }

        let mut output =
            StagedOutput::begin(&self.config.output_dir, self.pipeline.options().encode_options())?;
        self.pipeline.run_into(&files, &mut output, result)?;
        output.commit()?;

        info!(
            output = %self.config.output_dir.display(),
            "{} processed, {} failed",
            result.count(Status::Success),
            result.count(Status::Failed)
        );
        Ok(())
    }

    /// Lists the input directory and decodes every image once to learn its size.
    /// The pixels are dropped right away.
    fn scan(&self, result: &mut BatchResult) -> Result<Vec<ImageFile>, PadError> {
        let mut files = Vec::new();
        for (filename, path) in list_dir(&self.config.input_dir)? {
            if !path.is_file() || !is_supported(&filename) {
                debug!(file = %filename.to_string_lossy(), "skipping");
                result.record_skipped(&filename);
                continue;
            }
            match decode(&path) {
                Ok(image) => files.push(ImageFile {
                    filename,
                    path,
                    dimensions: image.dimensions(),
                }),
                Err(error) => {
                    warn!(%error, "skipping unreadable image");
                    result.record_failure(&filename, &error);
                }
            }
        }
        Ok(files)
    }
}

/// Directory entries in lexical filename order.
fn list_dir(dir: &Path) -> Result<Vec<(OsString, PathBuf)>, PadError> {
    let list_err = |source| PadError::InputDirectory {
        path: dir.to_owned(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        entries.push((entry.file_name(), entry.path()));
    }
    entries.sort();
    Ok(entries)
}

fn is_supported(filename: &OsStr) -> bool {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
        })
}
