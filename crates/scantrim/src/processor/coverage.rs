//! Blank-page heuristic: the share of pixels in a decoded page image that
//! carry ink.

use image::{DynamicImage, GrayImage, Luma};

use crate::config::schema::DEFAULT_INK_THRESHOLD;

/// Pixel dimensions of an evaluated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub width: u32,
    pub height: u32,
}

impl PixelBounds {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for PixelBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageResult {
    /// Ink pixels as a percentage of all pixels, 0-100.
    pub coverage_percent: f64,
    pub ink_pixels: u64,
    pub blank_pixels: u64,
    pub bounds: PixelBounds,
}

#[derive(Debug, Clone, Copy)]
pub struct CoverageEstimator {
    ink_threshold: u16,
}

impl Default for CoverageEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_INK_THRESHOLD)
    }
}

impl CoverageEstimator {
    pub fn new(ink_threshold: u16) -> Self {
        Self { ink_threshold }
    }

    /// A pixel is ink when any of its channels is darker than the threshold.
    pub fn is_ink(&self, rgb: [u16; 3]) -> bool {
        rgb.iter().any(|&channel| channel < self.ink_threshold)
    }

    pub fn estimate_coverage(&self, image: &DynamicImage) -> CoverageResult {
        self.scan(image, |_, _, _| {})
    }

    /// Like [`estimate_coverage`](Self::estimate_coverage), but also returns a
    /// same-sized mask with ink pixels black and blank pixels white.
    pub fn estimate_coverage_with_mask(&self, image: &DynamicImage) -> (CoverageResult, GrayImage) {
        let mut mask = GrayImage::new(image.width(), image.height());
        let result = self.scan(image, |x, y, ink| {
            let value = if ink { 0 } else { 255 };
            mask.put_pixel(x, y, Luma([value]));
        });
        (result, mask)
    }

    fn scan<F>(&self, image: &DynamicImage, mut visit: F) -> CoverageResult
    where
        F: FnMut(u32, u32, bool),
    {
        // 8-bit samples are widened to the 16-bit scale (v * 257).
        let rgb = image.to_rgb16();
        let bounds = PixelBounds {
            width: rgb.width(),
            height: rgb.height(),
        };

        let mut ink_pixels = 0u64;
        let mut blank_pixels = 0u64;
        for (x, y, pixel) in rgb.enumerate_pixels() {
            let ink = self.is_ink(pixel.0);
            if ink {
                ink_pixels += 1;
            } else {
                blank_pixels += 1;
            }
            visit(x, y, ink);
        }

        let total = bounds.pixel_count();
        let coverage_percent = if total == 0 {
            0.0
        } else {
            ink_pixels as f64 / total as f64 * 100.0
        };

        CoverageResult {
            coverage_percent,
            ink_pixels,
            blank_pixels,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    /// White image with the first `ink` pixels (row-major) painted black.
    fn with_ink_pixels(width: u32, height: u32, ink: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        for i in 0..ink {
            img.put_pixel(i % width, i / width, Rgb([0, 0, 0]));
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_all_white_is_zero_coverage() {
        let result = CoverageEstimator::default().estimate_coverage(&solid(40, 30, [255, 255, 255]));
        assert_eq!(result.coverage_percent, 0.0);
        assert_eq!(result.ink_pixels, 0);
        assert_eq!(result.blank_pixels, 1200);
        assert_eq!(result.bounds, PixelBounds { width: 40, height: 30 });
    }

    #[test]
    fn test_near_white_above_threshold_is_blank() {
        // 234 * 257 = 60138, just above the default cutoff
        let result = CoverageEstimator::default().estimate_coverage(&solid(10, 10, [234, 250, 240]));
        assert_eq!(result.coverage_percent, 0.0);
    }

    #[test]
    fn test_all_ink_is_full_coverage() {
        let result = CoverageEstimator::default().estimate_coverage(&solid(17, 9, [10, 10, 10]));
        assert_eq!(result.coverage_percent, 100.0);
        assert_eq!(result.blank_pixels, 0);
    }

    #[test]
    fn test_single_dark_channel_counts_as_ink() {
        // 233 * 257 = 59881, below the cutoff on the blue channel only
        let result = CoverageEstimator::default().estimate_coverage(&solid(8, 8, [255, 255, 233]));
        assert_eq!(result.coverage_percent, 100.0);
    }

    #[test]
    fn test_threshold_applies_on_16_bit_scale() {
        let mut img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 1, Rgb([60000, 60000, 60000]));
        img.put_pixel(1, 0, Rgb([65535, 59999, 65535]));
        let result = CoverageEstimator::default().estimate_coverage(&DynamicImage::ImageRgb16(img));
        assert_eq!(result.ink_pixels, 1);
        assert_eq!(result.blank_pixels, 1);
        assert_eq!(result.coverage_percent, 50.0);
    }

    #[test]
    fn test_partial_coverage_ratio() {
        let result = CoverageEstimator::default().estimate_coverage(&with_ink_pixels(10, 10, 25));
        assert_eq!(result.ink_pixels, 25);
        assert!((result.coverage_percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_monotonic_in_ink_pixels() {
        let estimator = CoverageEstimator::default();
        let mut previous = -1.0;
        for ink in [0, 1, 5, 20, 50, 99, 100] {
            let coverage = estimator
                .estimate_coverage(&with_ink_pixels(10, 10, ink))
                .coverage_percent;
            assert!(coverage > previous, "{} <= {}", coverage, previous);
            previous = coverage;
        }
    }

    #[test]
    fn test_custom_threshold() {
        let gray = solid(4, 4, [200, 200, 200]);
        assert_eq!(CoverageEstimator::new(60000).estimate_coverage(&gray).coverage_percent, 100.0);
        assert_eq!(CoverageEstimator::new(50000).estimate_coverage(&gray).coverage_percent, 0.0);
    }

    #[test]
    fn test_empty_image_has_zero_coverage() {
        let result = CoverageEstimator::default().estimate_coverage(&solid(0, 0, [0, 0, 0]));
        assert_eq!(result.coverage_percent, 0.0);
        assert_eq!(result.bounds.pixel_count(), 0);
    }

    #[test]
    fn test_mask_marks_ink_black_and_blank_white() {
        let (result, mask) =
            CoverageEstimator::default().estimate_coverage_with_mask(&with_ink_pixels(4, 2, 3));
        assert_eq!(result.ink_pixels, 3);
        assert_eq!(mask.dimensions(), (4, 2));
        assert_eq!(mask.get_pixel(0, 0).0, [0]);
        assert_eq!(mask.get_pixel(2, 0).0, [0]);
        assert_eq!(mask.get_pixel(3, 0).0, [255]);
        assert_eq!(mask.get_pixel(0, 1).0, [255]);
    }

    #[test]
    fn test_mask_and_plain_estimate_agree() {
        let img = with_ink_pixels(13, 7, 40);
        let estimator = CoverageEstimator::default();
        let (with_mask, _) = estimator.estimate_coverage_with_mask(&img);
        assert_eq!(with_mask, estimator.estimate_coverage(&img));
    }
}
