use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Writes a small gradient image so the encoder has real pixel data to
/// work with. The format is inferred from the extension.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
    .save(path)
    .unwrap();
}

/// Writes a file that carries an image extension but cannot be decoded.
pub fn write_corrupt_image(path: &Path) {
    fs::write(path, b"these bytes are not a valid image").unwrap();
}

/// Reads back the dimensions of a written output file.
pub fn written_dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}

/// Whether the file starts with the JPEG magic bytes.
pub fn is_jpeg_file(path: &Path) -> bool {
    fs::read(path)
        .map(|bytes| bytes.starts_with(&[0xFF, 0xD8, 0xFF]))
        .unwrap_or(false)
}
