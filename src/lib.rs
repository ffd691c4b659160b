pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod report;

pub use batch::{
    batch_compress_images, batch_output_path, collect_image_files, is_image_file, BatchSummary,
};
pub use cli::{resolve_max_width, Args};
pub use error::{CompressionError, Result};
pub use processing::{
    compress_one, load_image_with_metadata, resize_to_width, save_jpeg, scaled_dimensions,
    validate_file_exists, CompressionReport,
};
pub use report::{format_batch_summary, format_bytes, format_failure, format_file_report};
