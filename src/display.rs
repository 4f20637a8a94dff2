use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageFormat, RgbaImage};
use viuer::{Config as ViuerConfig, print};
use crate::bridge::ConversionResult;
use crate::cli::Args;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Wrap a conversion result as an `image` buffer without copying pixels
pub fn to_rgba_image(result: ConversionResult) -> Result<RgbaImage> {
    let ConversionResult { buffer, metadata } = result;
    RgbaImage::from_raw(metadata.width, metadata.height, buffer.into_vec())
        .ok_or_else(|| anyhow!("RGBA buffer does not match {}x{}", metadata.width, metadata.height))
}

/// `<dir>/<stem of input>.png`
#[must_use]
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map_or_else(|| "frame".into(), ToOwned::to_owned);
    name.push(".png");
    dir.join(name)
}

pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn print_image(image: RgbaImage, args: &Args) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();

    let (config_width, config_height) = match (args.width, args.height) {
        (Some(w), ..) => (Some(w), None),
        (None, Some(h)) => (None, Some(h)),
        (None, None) => (Some(24), None),
    };

    let config = ViuerConfig {
        width: config_width,
        height: config_height,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .context("Failed to flush stdout")?;

    print(&DynamicImage::ImageRgba8(image), &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}
