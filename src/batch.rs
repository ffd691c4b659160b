use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{CompressionError, Result};
use crate::processing::compress_one;
use crate::report::{format_batch_summary, format_failure, format_file_report};
use crate::{error, info, verbose};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

/// Per-batch tally. Files that failed to convert are counted, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
}

/// Whether the path carries one of the recognized image extensions,
/// matched case-insensitively.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Lists the image files directly inside `input_dir` (no recursion),
/// sorted by path for a deterministic processing set.
pub fn collect_image_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    image_files.sort();
    Ok(image_files)
}

/// Output path for a batch entry: same stem, `.jpg` extension, placed in
/// `output_dir`.
pub fn batch_output_path(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| CompressionError::InvalidFileName(input.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(".jpg");
    Ok(output_dir.join(file_name))
}

fn batch_progress_bar(total: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(ProgressStyle::default_bar());
    pb
}

/// Converts every recognized image in `input_dir` into a JPEG in
/// `output_dir`, in parallel. Individual failures are reported and counted;
/// only a missing input directory or an uncreatable output directory is
/// fatal.
pub fn batch_compress_images(
    input_dir: &Path,
    output_dir: &Path,
    max_width: u32,
) -> Result<BatchSummary> {
    if !input_dir.is_dir() {
        return Err(CompressionError::DirectoryNotFound(input_dir.to_path_buf()));
    }

    // Created once up front; workers never race on it.
    fs::create_dir_all(output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output_dir.to_path_buf()))?;

    info!(
        "Batch compression: {} → {}",
        input_dir.display(),
        output_dir.display()
    );
    info!("Max width: {}px", max_width);
    info!("");

    let image_files = collect_image_files(input_dir)?;
    if image_files.is_empty() {
        info!("No image files found in input directory.");
        return Ok(BatchSummary {
            success: 0,
            failed: 0,
        });
    }

    verbose!("Found {} image files to process", image_files.len());

    let progress = batch_progress_bar(image_files.len() as u64);
    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    image_files.par_iter().for_each(|input| {
        let result = batch_output_path(input, output_dir)
            .and_then(|output| compress_one(input, &output, max_width));

        // suspend() keeps each report block contiguous under the bar.
        match result {
            Ok(report) => {
                success.fetch_add(1, Ordering::Relaxed);
                progress.suspend(|| info!("{}", format_file_report(&report)));
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                progress.suspend(|| error!("{}", format_failure(input, &err)));
            }
        }
        progress.inc(1);
    });

    progress.finish_and_clear();

    let summary = BatchSummary {
        success: success.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    };
    info!("{}", format_batch_summary(summary.success, summary.failed));

    Ok(summary)
}
