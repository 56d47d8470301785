use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat};

use crate::error::ProcessError;
use crate::processor::pdf::ExtractedImage;

/// Decodes the raw bytes of a page image as JPEG.
pub fn decode_jpeg(image: &ExtractedImage) -> Result<DynamicImage, ProcessError> {
    image::load_from_memory_with_format(&image.data, ImageFormat::Jpeg).map_err(|e| {
        let reason = if image.filters.is_empty() {
            e.to_string()
        } else {
            format!("{} (stream filters: {})", e, image.filters.join(", "))
        };
        ProcessError::Decode {
            page: image.page,
            image: image.index,
            reason,
        }
    })
}

/// Writes a coverage mask as PNG; the format follows the file extension.
pub fn write_mask(mask: &GrayImage, path: &Path) -> Result<(), image::ImageError> {
    mask.save(path)
}

/// File name of the diagnostic mask for one page image.
pub fn mask_file_name(page: u32, index: usize) -> String {
    format!("mask-p{}-i{}.png", page, index)
}
