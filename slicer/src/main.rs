use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use image::ImageReader;
use image4d::{DynamicAccess, DynamicImage, IndexExpr};
use log::debug;

mod structs;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Index expression in the order "x, y, z, c", e.g. "10:20, ::-1" or "0, 5"
    #[clap(value_parser, allow_hyphen_values = true)]
    index: IndexExpr,

    /// Path to result image file
    #[clap(value_parser)]
    destination_path: Option<PathBuf>,

    /// Overwrite destination file
    #[clap(short, long, action)]
    overwrite: bool,

    /// Type of pixels used to index the source image
    #[clap(short, long, value_enum)]
    pixel_type: Option<structs::PixelType>,

    /// Store the value into the selected part and save the whole image
    #[clap(short, long, allow_hyphen_values = true)]
    set: Option<f64>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    slice(&cli)
}

fn slice(cli: &Cli) -> Result<()> {
    let mut image = open_source_image(cli)?;

    if let Some(value) = cli.set {
        debug!("Store {} into [{}]", value, cli.index);
        image
            .write_scalar(&cli.index, value)
            .with_context(|| format!("Failed to write into [{}]", cli.index))?;
        return save_result(cli, &image);
    }

    debug!("Read [{}] of the image with extent {}", cli.index, image.extent());
    let access = image
        .read(&cli.index)
        .with_context(|| format!("Failed to read [{}]", cli.index))?;
    match access {
        DynamicAccess::Scalar(value) => println!("{value}"),
        DynamicAccess::View(view) => {
            if cli.destination_path.is_some() {
                save_result(cli, &view)?;
            } else {
                println!("{view}");
            }
        }
    }
    Ok(())
}

fn open_source_image(cli: &Cli) -> Result<DynamicImage> {
    let source_path = &cli.source_path;
    debug!("Opening the source image {:?}", source_path);
    let src_image = ImageReader::open(source_path)
        .with_context(|| format!("Failed to read source file from {:?}", source_path))?
        .decode()
        .with_context(|| "Failed to decode source image")?;

    let image = DynamicImage::try_from(&src_image).with_context(|| {
        format!(
            "Unsupported pixel's format of source image: {:?}",
            src_image.color()
        )
    })?;
    debug!(
        "Source image has extent {} and pixels of type {}",
        image.extent(),
        image.pixel_type()
    );

    Ok(match cli.pixel_type {
        Some(pixel_type) => {
            let pixel_type = pixel_type.into();
            debug!("Convert pixels of the source image into {}", pixel_type);
            image.convert(pixel_type)
        }
        None => image,
    })
}

fn result_path(cli: &Cli) -> PathBuf {
    if let Some(path) = cli.destination_path.clone() {
        return path;
    }
    let ext = cli
        .source_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("png");
    Path::new("./result").with_extension(ext)
}

fn save_result(cli: &Cli, image: &DynamicImage) -> Result<()> {
    let result_path = result_path(cli);
    if result_path.exists() && !cli.overwrite {
        return Err(anyhow!(
            "Destination path {:?} already exists.",
            result_path
        ));
    };

    let dst_image = image::DynamicImage::try_from(image)
        .with_context(|| "Failed to convert the result image")?;
    debug!("Save the result image into the file {:?}", result_path);
    dst_image
        .save(&result_path)
        .with_context(|| "Failed to save the result image")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn parse_negative_index() {
        let cli = Cli::parse_from(["slicer", "src.png", "-1, ::-1", "-s", "-0.5"]);
        assert_eq!(cli.index.len(), 2);
        assert_eq!(cli.set, Some(-0.5));
        assert!(cli.destination_path.is_none());
    }
}
