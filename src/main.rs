use clap::error::ErrorKind;
use clap::Parser;
use compress_image::{
    batch_compress_images, compress_one, format_failure, format_file_report, logger,
    resolve_max_width, Args, CompressionError,
};
use compress_image::{error, info, warn};
use rayon::ThreadPoolBuilder;
use std::path::Path;
use std::process;

fn main() {
    let args = parse_args();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);
    setup_thread_pool(args.threads);

    let max_width = resolve_max_width(args.max_width.as_deref());

    let code = if args.batch {
        run_batch(&args.input, &args.output, max_width)
    } else {
        run_single(&args.input, &args.output, max_width)
    };
    process::exit(code);
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version requests are not usage errors.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            process::exit(code);
        }
    }
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                warn!("Failed to set thread pool size: {}", e);
            });
    }
}

fn run_single(input: &Path, output: &Path, max_width: u32) -> i32 {
    info!("Compressing: {}", input.display());
    info!("Max width: {}px", max_width);
    info!("");

    match compress_one(input, output, max_width) {
        Ok(report) => {
            info!("{}", format_file_report(&report));
            0
        }
        Err(err @ CompressionError::FileNotFound(_)) => {
            error!("Error: {}", err);
            1
        }
        Err(err) => {
            error!("{}", format_failure(input, &err));
            1
        }
    }
}

fn run_batch(input_dir: &Path, output_dir: &Path, max_width: u32) -> i32 {
    // Per-file failures are already reported and tallied; only setup
    // errors (missing input directory, uncreatable output) reach here.
    match batch_compress_images(input_dir, output_dir, max_width) {
        Ok(_) => 0,
        Err(err) => {
            error!("Error: {}", err);
            1
        }
    }
}
