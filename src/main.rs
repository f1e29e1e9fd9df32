use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padframe::{
    filter::Filter,
    operations::ProbeMode,
    plan::OversizePolicy,
    utils::fraction::Fraction,
    BatchOrchestrator, BatchResult, Config, PipelineOptions,
};

#[derive(Parser)]
#[command(name = "padframe", version)]
#[command(
    about = "Fit a directory of images onto uniform canvases padded with each image's dominant color"
)]
struct Cli {
    /// Directory with the source images (.jpg, .jpeg, .png)
    input: PathBuf,

    /// Directory for the results; its previous contents are replaced
    output: PathBuf,

    /// Upper bound of the canvas width
    #[arg(long, default_value_t = padframe::plan::DEFAULT_UPPER_BOUND)]
    max_width: u32,

    /// Canvas aspect ratio as WIDTH:HEIGHT
    #[arg(long, default_value_t = padframe::plan::DEFAULT_ASPECT_RATIO)]
    aspect: Fraction,

    /// Images smaller than this on either side are padded without scaling
    #[arg(long, default_value_t = padframe::plan::DEFAULT_SIZE_THRESHOLD)]
    threshold: u32,

    /// Dominant color sampling stride, 1 looks at every pixel
    #[arg(long, default_value_t = 1)]
    color_quality: u32,

    /// Number of colors the dominant color is picked from
    #[arg(long, default_value_t = padframe::operations::dominant_color::DEFAULT_PALETTE_SIZE)]
    palette_size: usize,

    /// How the canvas size is derived from the batch: independent, largest-image
    #[arg(long, default_value_t = ProbeMode::default())]
    probe: ProbeMode,

    /// Small images that still exceed the canvas: overhang, fit
    #[arg(long, default_value_t = OversizePolicy::default())]
    oversize: OversizePolicy,

    /// Resampling filter for scaled images
    #[arg(long, default_value_t = Filter::default())]
    filter: Filter,

    /// JPEG output quality, 1-100
    #[arg(long, default_value_t = padframe::encode::EncodeOptions::default().jpeg_quality)]
    quality: u8,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            input_dir: self.input,
            output_dir: self.output,
            options: PipelineOptions {
                target_upper_bound_width: self.max_width,
                aspect_ratio: self.aspect,
                size_threshold: self.threshold,
                color_sample_quality: self.color_quality,
                palette_size: self.palette_size,
                probe_mode: self.probe,
                oversize_policy: self.oversize,
                filter: self.filter,
                jpeg_quality: self.quality,
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "padframe=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("padframe: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    let config = Cli::parse().into_config();
    let orchestrator = BatchOrchestrator::new(config)?;
    let mut result = BatchResult::default();
    let outcome = orchestrator.run_into(&mut result);
    // files already looked at are reported even when the batch as a whole failed
    println!("{result}");
    outcome?;
    if result.has_failures() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
