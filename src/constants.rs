/// Width cap applied when the caller does not supply one, in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1280;

/// JPEG quality used when the image was scaled down to fit the width cap.
pub const JPEG_QUALITY_RESIZED: u8 = 85;

/// JPEG quality used when the image already fits and is only re-encoded.
pub const JPEG_QUALITY_REENCODED: u8 = 90;

/// Extensions considered image files during batch directory scans,
/// matched case-insensitively.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];
