//! Builders for synthetic scans and configurations.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use scantrim::config::schema::{Config, PageAggregation};

/// Encodes a `width`x`height` JPEG whose left `ink_fraction` is black.
pub fn jpeg(width: u32, height: u32, ink_fraction: f64) -> Vec<u8> {
    let ink_columns = (width as f64 * ink_fraction).round() as u32;
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < ink_columns {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .expect("Failed to encode JPEG");
    buffer.into_inner()
}

/// Builds a PDF where every page carries zero or more DCT-encoded images,
/// the way a scanner emits them.
pub struct PdfBuilder {
    pages: Vec<Vec<Vec<u8>>>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Adds a page with a single scan image of the given ink coverage.
    pub fn scanned_page(self, ink_fraction: f64) -> Self {
        self.page(vec![jpeg(48, 48, ink_fraction)])
    }

    /// Adds a page with no images at all.
    pub fn text_page(self) -> Self {
        self.page(Vec::new())
    }

    pub fn page(mut self, images: Vec<Vec<u8>>) -> Self {
        self.pages.push(images);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();

        for images in self.pages {
            let mut xobjects = Dictionary::new();
            for (i, data) in images.into_iter().enumerate() {
                let image_id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => 48,
                        "Height" => 48,
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => 8,
                        "Filter" => "DCTDecode",
                    },
                    data,
                ));
                xobjects.set(format!("Im{}", i), image_id);
            }
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! { "XObject" => xobjects },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("Failed to serialize PDF");
        bytes
    }
}

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(source_directory: &str, archive_directory: &str) -> Self {
        let mut config = Config::default();
        config.source_directory = source_directory.to_string();
        config.archive_directory = archive_directory.to_string();
        // Tests pin modification times in UTC.
        config.archive.utc = true;
        Self { config }
    }

    pub fn threshold_percent(mut self, threshold: f64) -> Self {
        self.config.retention.threshold_percent = threshold;
        self
    }

    pub fn aggregation(mut self, aggregation: PageAggregation) -> Self {
        self.config.retention.aggregation = aggregation;
        self
    }

    pub fn reserved_suffix(mut self, suffix: &str) -> Self {
        self.config.reserved_suffixes.push(suffix.to_string());
        self
    }

    pub fn write_masks(mut self, enabled: bool) -> Self {
        self.config.diagnostics.write_masks = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
