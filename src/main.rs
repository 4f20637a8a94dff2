use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use dcmrgba::cli::Args;
use dcmrgba::display;
use dcmrgba::logger;
use dcmrgba::{ConversionResult, Converter, PassTimings};
use std::path::Path;
use tracing::info;

fn main() {
    let args = Args::parse();
    logger::init(args.verbose);

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    let multiple_files = args.files.len() > 1;
    let mut any_failed = false;

    for (idx, file_path) in args.files.iter().enumerate() {
        if multiple_files {
            println!("{}", file_path.display());
        }

        if let Err(e) = process_file(file_path, &args) {
            println!("Error: {e:#}");
            any_failed = true;
        }

        if multiple_files && idx < args.files.len() - 1 {
            println!();
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

/// Convert one file, then save, print or render the result
fn process_file(file_path: &Path, args: &Args) -> Result<()> {
    let bytes = std::fs::read(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    let mut timings = PassTimings::new();
    let mut converter = Converter::new()
        .with_options(args.convert_options())
        .with_timing_sink(&mut timings);

    let frame = converter.decode(&bytes)?;
    if args.verbose {
        println!("{}", frame.info);
        println!("{:20}: {}", "Rescale", frame.rescale);
    }

    let result = converter.convert_frame(frame)?;
    if args.verbose {
        print_metadata(&result);
    }
    if args.timings {
        println!("{timings}");
    }

    if args.json {
        println!("{}", serde_json::to_string(&result.metadata)?);
    }

    match &args.output {
        Some(dir) => {
            let out_path = display::output_path(dir, file_path);
            let image = display::to_rgba_image(result)?;
            display::write_png(&image, &out_path)?;
            info!(path = %out_path.display(), "wrote png");
        }
        None if args.json => {}
        None => display::print_image(display::to_rgba_image(result)?, args)?,
    }

    Ok(())
}

fn print_metadata(result: &ConversionResult) {
    let metadata = &result.metadata;
    println!("{:20}: {}", "Min Value", metadata.min_value);
    println!("{:20}: {}", "Max Value", metadata.max_value);
    println!("{:20}: {} bytes", "RGBA Buffer", result.buffer.len());
}
