use crate::constants::DEFAULT_MAX_WIDTH;
use crate::warn;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "compress-image",
    about = "Resize and re-encode raster images to web-friendly JPEGs",
    long_about = "compress-image shrinks raster images to a maximum width and re-encodes them \
                  as quality-controlled JPEGs. Images wider than the cap are scaled down \
                  proportionally; narrower images are converted as-is. Batch mode converts \
                  every recognized image in a directory, continuing past individual failures.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    compress-image screenshot.png compressed.jpg\n  \
    compress-image photo.png web/photo.jpg 1920\n  \
    compress-image --batch ./images ./compressed 1280"
)]
pub struct Args {
    #[arg(
        long,
        help = "Treat input and output as directories and convert every image inside",
        long_help = "Batch mode: convert every recognized image file (png, jpg, jpeg, webp, \
                     gif, bmp, tiff) found directly in the input directory, writing one .jpg \
                     per file into the output directory. Individual failures are reported \
                     and counted but do not stop the batch."
    )]
    pub batch: bool,

    #[arg(
        value_name = "INPUT",
        help = "Input image file (input directory with --batch)"
    )]
    pub input: PathBuf,

    #[arg(
        value_name = "OUTPUT",
        help = "Output file path (output directory with --batch)"
    )]
    pub output: PathBuf,

    #[arg(
        value_name = "MAX_WIDTH",
        help = "Maximum output width in pixels (default: 1280)",
        long_help = "Upper bound on the output width. Wider images are scaled down \
                     proportionally and encoded at quality 85; images that already fit are \
                     re-encoded at quality 90. Invalid values fall back to 1280."
    )]
    pub max_width: Option<String>,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of threads for parallel batch processing. \
                     If not specified, uses number of CPU cores."
    )]
    pub threads: Option<usize>,

    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Resolves the raw width argument. Anything that is not a positive
/// integer falls back to the default rather than failing the run.
pub fn resolve_max_width(raw: Option<&str>) -> u32 {
    match raw {
        None => DEFAULT_MAX_WIDTH,
        Some(value) => match value.trim().parse::<u32>() {
            Ok(width) if width > 0 => width,
            _ => {
                warn!(
                    "Invalid max width {:?}, using default {}px",
                    value, DEFAULT_MAX_WIDTH
                );
                DEFAULT_MAX_WIDTH
            }
        },
    }
}
