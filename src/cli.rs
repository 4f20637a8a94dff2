use clap::Parser;
use std::path::PathBuf;

use crate::bridge::ConvertOptions;
use crate::image::Parallelism;

/// Convert grayscale DICOM frames to RGBA and show or save them
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// DICOM file path(s) to convert
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write `<stem>.png` into DIR instead of rendering in the terminal
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output width in terminal columns
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Output height in terminal rows
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Show frame info and conversion metadata
    #[arg(short, long)]
    pub verbose: bool,

    /// Print conversion metadata as JSON (skips terminal rendering)
    #[arg(long)]
    pub json: bool,

    /// Walk the frame on one thread
    #[arg(long)]
    pub sequential: bool,

    /// Print per-pass timings
    #[arg(long)]
    pub timings: bool,
}

impl Args {
    #[must_use]
    pub fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new();
        if self.sequential {
            options.with_parallelism(Parallelism::Sequential)
        } else {
            options
        }
    }
}
