//! `padframe` fits every image of a directory onto a canvas of one shared size,
//! padding the leftover area with each image's own dominant color.
//!
//! The library is what the `padframe` binary is built on. [`BatchOrchestrator`] runs a
//! whole directory; [`Pipeline`] is the same processing without the filesystem around it.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod batch;
pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
mod encoders;
pub mod error;
pub mod filter;
pub mod image;
pub mod operations;
pub mod output;
pub mod plan;
pub mod report;
pub mod utils;

pub use batch::{BatchOrchestrator, Pipeline};
pub use color::Color;
pub use config::{Config, PipelineOptions};
pub use error::{PadError, Result};
pub use plan::{CanvasSpec, ResizeDecision};
pub use report::{BatchResult, Status};
