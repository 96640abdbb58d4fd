use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageResult, Rgb32FImage};

/// Default square edge the classifier works on
pub const DEFAULT_TARGET_SIZE: u32 = 224;

/// Decode raw bytes of any supported image format
pub fn decode(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Convert image to 8-bit RGB, leaving RGB8 input untouched
pub fn to_rgb(img: DynamicImage) -> DynamicImage {
    if img.color() == ColorType::Rgb8 {
        img
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    }
}

/// Resize to a `size`×`size` square with Lanczos3 resampling
pub fn resize_square(img: &DynamicImage, size: u32) -> DynamicImage {
    img.resize_exact(size, size, FilterType::Lanczos3)
}

/// Scale channel values into [0, 1]
pub fn normalize(img: &DynamicImage) -> Rgb32FImage {
    img.to_rgb32f()
}
