use crate::constants::{JPEG_QUALITY_REENCODED, JPEG_QUALITY_RESIZED};
use crate::error::{CompressionError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageReader};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything worth reporting about one processed file. Sizes and
/// dimensions describe the written output only when the pipeline
/// returned `Ok`.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
}

impl CompressionReport {
    /// Size reduction as a percentage of the original. Negative when the
    /// output grew.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
    }
}

/// Validates that a file exists at the given path.
///
/// # Example
/// ```
/// use std::path::Path;
/// use compress_image::validate_file_exists;
///
/// let result = validate_file_exists(Path::new("nonexistent.jpg"));
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Loads an image and returns it along with the source file size in bytes.
/// The format is sniffed from the file contents, so inputs with a wrong or
/// missing extension still decode.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    validate_file_exists(input_path)?;

    let original_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()
        .map_err(CompressionError::Decode)?;

    Ok((img, original_size))
}

/// Target dimensions for a width cap: unchanged when the image already
/// fits, otherwise scaled proportionally with the height rounded to the
/// nearest pixel (floor of one).
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let scale = max_width as f64 / width as f64;
    let scaled_height = ((height as f64 * scale).round() as u32).max(1);
    (max_width, scaled_height)
}

/// Shrinks the image in place when its width exceeds `max_width`. Returns
/// whether a resize happened, which drives the encode quality choice.
pub fn resize_to_width(img: &mut DynamicImage, max_width: u32) -> bool {
    let (width, height) = img.dimensions();
    if width <= max_width {
        return false;
    }

    let (new_width, new_height) = scaled_dimensions(width, height, max_width);
    *img = img.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3);
    true
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    Ok(())
}

/// Encodes the image as JPEG at the given quality, creating the output's
/// parent directory if needed. The pixel data is converted to RGB first,
/// so alpha channels are flattened.
pub fn save_jpeg(img: &DynamicImage, output: &Path, quality: u8) -> Result<()> {
    ensure_parent_dir(output)?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);

    let rgb = img.to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(CompressionError::Encode)?;
    writer.flush()?;

    Ok(())
}

/// Full single-file pipeline: load, shrink to the width cap if the source
/// is wider, and write a JPEG. Resized images are encoded at quality 85,
/// already-fitting images are re-encoded at quality 90.
///
/// The input must exist before anything is created. The output's parent
/// directory is created next, before the image is decoded.
pub fn compress_one(input: &Path, output: &Path, max_width: u32) -> Result<CompressionReport> {
    validate_file_exists(input)?;
    ensure_parent_dir(output)?;

    let (mut img, original_size) = load_image_with_metadata(input)?;
    let original_dimensions = img.dimensions();

    let resized = resize_to_width(&mut img, max_width);
    let quality = if resized {
        JPEG_QUALITY_RESIZED
    } else {
        JPEG_QUALITY_REENCODED
    };

    save_jpeg(&img, output, quality)?;
    let compressed_size = fs::metadata(output)?.len();

    Ok(CompressionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        original_size,
        compressed_size,
        original_dimensions,
        final_dimensions: img.dimensions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_scaled_dimensions_wide_image() {
        assert_eq!(scaled_dimensions(3000, 2000, 1280), (1280, 853));
        assert_eq!(scaled_dimensions(4000, 1000, 2000), (2000, 500));
    }

    #[test]
    fn test_scaled_dimensions_already_fits() {
        assert_eq!(scaled_dimensions(800, 600, 1280), (800, 600));
        assert_eq!(scaled_dimensions(1280, 720, 1280), (1280, 720));
    }

    #[test]
    fn test_scaled_dimensions_height_floor() {
        // Extreme aspect ratios never round the height down to zero.
        assert_eq!(scaled_dimensions(100_000, 1, 1280), (1280, 1));
    }

    #[test]
    fn test_resize_to_width_shrinks() {
        let mut img = gradient_image(2000, 1000);
        let resized = resize_to_width(&mut img, 1000);
        assert!(resized);
        assert_eq!(img.dimensions(), (1000, 500));
    }

    #[test]
    fn test_resize_to_width_leaves_small_images() {
        let mut img = gradient_image(640, 480);
        let resized = resize_to_width(&mut img, 1280);
        assert!(!resized);
        assert_eq!(img.dimensions(), (640, 480));
    }

    #[test]
    fn test_reduction_percent() {
        let mut report = CompressionReport {
            input: PathBuf::from("a.png"),
            output: PathBuf::from("a.jpg"),
            original_size: 1000,
            compressed_size: 750,
            original_dimensions: (100, 100),
            final_dimensions: (100, 100),
        };
        assert_eq!(report.reduction_percent(), 25.0);

        report.compressed_size = 1250;
        assert_eq!(report.reduction_percent(), -25.0);

        report.original_size = 0;
        assert_eq!(report.reduction_percent(), 0.0);
    }

    #[test]
    fn test_validate_file_exists_missing() {
        let result = validate_file_exists(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_with_metadata_missing() {
        let result = load_image_with_metadata(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }

    #[test]
    fn test_compress_one_resizes_wide_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("wide.jpg");
        gradient_image(1600, 800).save(&input).unwrap();

        let report = compress_one(&input, &output, 800).unwrap();
        assert_eq!(report.original_dimensions, (1600, 800));
        assert_eq!(report.final_dimensions, (800, 400));
        assert!(report.compressed_size > 0);

        let written = image::image_dimensions(&output).unwrap();
        assert_eq!(written, (800, 400));
    }

    #[test]
    fn test_compress_one_reencodes_without_resize() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("small.png");
        let output = dir.path().join("small.jpg");
        gradient_image(320, 240).save(&input).unwrap();

        let report = compress_one(&input, &output, 1280).unwrap();
        assert_eq!(report.final_dimensions, (320, 240));
        assert_eq!(image::image_dimensions(&output).unwrap(), (320, 240));
    }

    #[test]
    fn test_compress_one_creates_output_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("img.png");
        let output = dir.path().join("nested/deeper/img.jpg");
        gradient_image(64, 64).save(&input).unwrap();

        compress_one(&input, &output, 1280).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_compress_one_rejects_corrupt_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        let output = dir.path().join("broken.jpg");
        fs::write(&input, b"this is not an image").unwrap();

        let result = compress_one(&input, &output, 1280);
        assert!(matches!(result, Err(CompressionError::Decode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_compress_one_creates_parent_even_when_decode_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        let output = dir.path().join("nested/broken.jpg");
        fs::write(&input, b"junk bytes").unwrap();

        let result = compress_one(&input, &output, 1280);
        assert!(result.is_err());
        assert!(dir.path().join("nested").is_dir());
        assert!(!output.exists());
    }

    #[test]
    fn test_compress_one_missing_input_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.png");
        let output = dir.path().join("nested/out.jpg");

        let result = compress_one(&input, &output, 1280);
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_compress_one_sniffs_format_despite_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("actually-a-png.dat");
        let output = dir.path().join("out.jpg");
        gradient_image(100, 50).save_with_format(&input, image::ImageFormat::Png).unwrap();

        let report = compress_one(&input, &output, 1280).unwrap();
        assert_eq!(report.original_dimensions, (100, 50));
    }

    #[test]
    fn test_output_is_jpeg_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("img.png");
        let output = dir.path().join("img.webp");
        gradient_image(64, 64).save(&input).unwrap();

        compress_one(&input, &output, 1280).unwrap();
        let format = image::ImageReader::open(&output)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(image::ImageFormat::Jpeg));
    }
}
