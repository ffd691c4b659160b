//! Console report formatting for compression results.

use crate::processing::CompressionReport;
use std::path::Path;

/// Format a byte count as `B`, `KB`, or `MB` with one decimal place.
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format the per-file success block. Ends with a newline so printing it
/// leaves a blank separator line after the block.
pub fn format_file_report(report: &CompressionReport) -> String {
    let (orig_w, orig_h) = report.original_dimensions;
    let (out_w, out_h) = report.final_dimensions;

    format!(
        "✓ {}\n  Original: {}x{} ({})\n  Compressed: {}x{} ({})\n  Reduction: {:.1}%\n  Output: {}\n",
        display_name(&report.input),
        orig_w,
        orig_h,
        format_bytes(report.original_size),
        out_w,
        out_h,
        format_bytes(report.compressed_size),
        report.reduction_percent(),
        report.output.display(),
    )
}

/// Format a per-file failure line.
pub fn format_failure(input: &Path, error: &crate::error::CompressionError) -> String {
    format!("✗ {}: {}", display_name(input), error)
}

/// Format the batch footer: a rule followed by the success/failure tally.
pub fn format_batch_summary(success: usize, failed: usize) -> String {
    format!("{}\nCompleted: {} success, {} failed", "─".repeat(40), success, failed)
}
