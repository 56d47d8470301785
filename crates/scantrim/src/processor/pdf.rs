use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::ProcessError;
use crate::processor::retention::RetentionSet;

/// Upper bound on `/Parent` hops when looking up inherited page resources.
const MAX_PAGE_TREE_DEPTH: usize = 64;

const JPEG_FILTER: &str = "DCTDecode";

/// An image XObject referenced from a page's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub object_id: ObjectId,
    /// Resource name, e.g. `Im0`.
    pub name: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub filters: Vec<String>,
}

impl ImageRef {
    pub fn is_jpeg(&self) -> bool {
        self.filters.last().map(String::as_str) == Some(JPEG_FILTER)
    }
}

/// Raw bytes of one page image as stored in the PDF.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    pub page: u32,
    pub index: usize,
    pub filters: Vec<String>,
    pub data: Vec<u8>,
}

/// Result of the trim step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimSummary {
    pub kept_pages: Vec<u32>,
    pub discarded_pages: Vec<u32>,
    pub bytes_written: usize,
}

/// A parsed PDF owned by the pipeline for the duration of one job.
pub struct ScannedDocument {
    path: PathBuf,
    inner: Document,
    file_size: u64,
    page_images: BTreeMap<u32, Vec<ImageRef>>,
    retention: RetentionSet,
}

impl ScannedDocument {
    pub fn parse(path: &Path) -> Result<Self, ProcessError> {
        let parse_error = |reason: String| ProcessError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let file_size = std::fs::metadata(path)
            .map_err(|e| parse_error(e.to_string()))?
            .len();
        let inner = Document::load(path).map_err(|e| parse_error(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            inner,
            file_size,
            page_images: BTreeMap::new(),
            retention: RetentionSet::new(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.inner.get_pages().len() as u32
    }

    /// Size of the source file in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn object_count(&self) -> usize {
        self.inner.objects.len()
    }

    /// Images on `page` (1-based). Empty until [`optimize`](Self::optimize) ran.
    pub fn page_images(&self, page: u32) -> &[ImageRef] {
        self.page_images
            .get(&page)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn retention(&self) -> &RetentionSet {
        &self.retention
    }

    pub fn retention_mut(&mut self) -> &mut RetentionSet {
        &mut self.retention
    }

    /// Structural checks on the catalog and page tree.
    pub fn validate(&self) -> Result<(), ProcessError> {
        let catalog = self
            .inner
            .catalog()
            .map_err(|e| ProcessError::Validation(format!("missing document catalog: {}", e)))?;

        if let Ok(kind) = catalog.get(b"Type").and_then(|t| t.as_name()) {
            if kind != b"Catalog" {
                return Err(ProcessError::Validation(format!(
                    "document catalog has type /{}",
                    String::from_utf8_lossy(kind)
                )));
            }
        }

        let pages_ref = catalog
            .get(b"Pages")
            .map_err(|_| ProcessError::Validation("catalog has no /Pages entry".to_string()))?;
        let pages_root = resolve(&self.inner, pages_ref)
            .and_then(|o| o.as_dict())
            .map_err(|e| ProcessError::Validation(format!("page tree root is unusable: {}", e)))?;

        let page_ids = self.inner.get_pages();
        if page_ids.is_empty() {
            return Err(ProcessError::Validation("document has no pages".to_string()));
        }

        for (number, id) in &page_ids {
            self.inner.get_dictionary(*id).map_err(|e| {
                ProcessError::Validation(format!(
                    "page {} ({} {}) is not a dictionary: {}",
                    number, id.0, id.1, e
                ))
            })?;
        }

        if let Ok(count) = pages_root.get(b"Count").and_then(|c| c.as_i64()) {
            if count != page_ids.len() as i64 {
                return Err(ProcessError::Validation(format!(
                    "page tree declares {} pages but {} were found",
                    count,
                    page_ids.len()
                )));
            }
        }

        Ok(())
    }

    /// Drops unreachable objects and indexes the images on every page.
    pub fn optimize(&mut self) -> Result<(), ProcessError> {
        let pruned = self.inner.prune_objects();
        log::debug!(
            "Pruned {} unreachable objects from {}",
            pruned.len(),
            self.path.display()
        );

        let mut index = BTreeMap::new();
        for (number, page_id) in self.inner.get_pages() {
            let images = collect_page_images(&self.inner, page_id).map_err(|reason| {
                ProcessError::Optimization(format!("page {}: {}", number, reason))
            })?;
            index.insert(number, images);
        }
        self.page_images = index;

        Ok(())
    }

    pub fn extract_image(&self, page: u32, index: usize) -> Result<ExtractedImage, ProcessError> {
        let extraction_error = |reason: String| ProcessError::Extraction {
            page,
            image: index,
            reason,
        };

        let image_ref = self
            .page_images(page)
            .get(index)
            .ok_or_else(|| extraction_error("no such image on page".to_string()))?;

        let stream = self
            .inner
            .get_object(image_ref.object_id)
            .and_then(|o| o.as_stream())
            .map_err(|e| extraction_error(e.to_string()))?;

        if stream.content.is_empty() {
            return Err(extraction_error("image stream is empty".to_string()));
        }

        let data = if image_ref.is_jpeg() && image_ref.filters.len() > 1 {
            let outer = image_ref.filters[..image_ref.filters.len() - 1].join(", ");
            let data = strip_outer_filters(stream, &image_ref.filters).map_err(|e| {
                extraction_error(format!("cannot undo {} before DCTDecode: {}", outer, e))
            })?;
            if data.is_empty() {
                return Err(extraction_error(format!("{} produced no JPEG data", outer)));
            }
            data
        } else {
            stream.content.clone()
        };

        Ok(ExtractedImage {
            page,
            index,
            filters: image_ref.filters.clone(),
            data,
        })
    }

    /// Removes every page the retention set discards and writes the result.
    ///
    /// The document is serialized in memory first, so `dest` is only created
    /// once the complete output exists.
    pub fn trim_and_write(&mut self, dest: &Path) -> Result<TrimSummary, ProcessError> {
        let write_error = |reason: String| ProcessError::Write {
            path: dest.to_path_buf(),
            reason,
        };

        let page_numbers: Vec<u32> = self.inner.get_pages().keys().copied().collect();
        let (kept_pages, discarded_pages): (Vec<u32>, Vec<u32>) = page_numbers
            .into_iter()
            .partition(|page| self.retention.is_kept(*page));

        if kept_pages.is_empty() {
            return Err(write_error(
                "every page was classified as blank, nothing to write".to_string(),
            ));
        }

        if !discarded_pages.is_empty() {
            self.inner.delete_pages(&discarded_pages);
            self.inner.prune_objects();
        }
        self.inner.compress();

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| write_error(e.to_string()))?;
        std::fs::write(dest, &buffer).map_err(|e| write_error(e.to_string()))?;

        Ok(TrimSummary {
            kept_pages,
            discarded_pages,
            bytes_written: buffer.len(),
        })
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object, lopdf::Error> {
    match object {
        Object::Reference(id) => doc.get_object(*id),
        other => Ok(other),
    }
}

/// Decodes every filter in front of the final `DCTDecode`, leaving the JPEG
/// payload.
fn strip_outer_filters(stream: &Stream, filters: &[String]) -> Result<Vec<u8>, lopdf::Error> {
    let leading: Vec<Object> = filters[..filters.len() - 1]
        .iter()
        .map(|name| Object::Name(name.as_bytes().to_vec()))
        .collect();

    let mut outer = stream.clone();
    outer.dict.set("Filter", Object::Array(leading));
    // Parameters are per filter; only the first one applies to the outer layer.
    let first_params = match outer.dict.get(b"DecodeParms") {
        Ok(Object::Array(params)) => Some(params.first().and_then(|p| p.as_dict().ok()).cloned()),
        _ => None,
    };
    match first_params {
        Some(Some(params)) => outer.dict.set("DecodeParms", params),
        Some(None) => {
            outer.dict.remove(b"DecodeParms");
        }
        None => {}
    }

    outer.decompressed_content()
}

fn filter_names(dict: &Dictionary) -> Vec<String> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![String::from_utf8_lossy(name).to_string()],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_name().ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Resources of a page, following `/Parent` for inherited entries.
fn page_resources(doc: &Document, page_id: ObjectId) -> Result<Option<&Dictionary>, String> {
    let mut current = doc.get_dictionary(page_id).map_err(|e| e.to_string())?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(resources) = current.get(b"Resources") {
            return resolve(doc, resources)
                .and_then(|o| o.as_dict())
                .map(Some)
                .map_err(|e| format!("unusable /Resources: {}", e));
        }

        match current.get(b"Parent").and_then(|p| p.as_reference()) {
            Ok(parent_id) => {
                current = doc
                    .get_dictionary(parent_id)
                    .map_err(|e| format!("unusable /Parent: {}", e))?;
            }
            Err(_) => return Ok(None),
        }
    }

    Err("page tree is too deep or cyclic".to_string())
}

fn collect_page_images(doc: &Document, page_id: ObjectId) -> Result<Vec<ImageRef>, String> {
    let Some(resources) = page_resources(doc, page_id)? else {
        return Ok(Vec::new());
    };

    let xobjects = match resources.get(b"XObject") {
        Ok(entry) => resolve(doc, entry)
            .and_then(|o| o.as_dict())
            .map_err(|e| format!("unusable /XObject resources: {}", e))?,
        Err(_) => return Ok(Vec::new()),
    };

    let mut images = Vec::new();
    for (name, value) in xobjects.iter() {
        let name = String::from_utf8_lossy(name).to_string();
        let Object::Reference(object_id) = value else {
            continue;
        };

        let object = doc.get_object(*object_id).map_err(|e| {
            format!(
                "XObject /{} references missing object {} {}: {}",
                name, object_id.0, object_id.1, e
            )
        })?;
        let Ok(stream) = object.as_stream() else {
            continue;
        };

        let is_image = stream
            .dict
            .get(b"Subtype")
            .and_then(|s| s.as_name())
            .map(|s| s == b"Image")
            .unwrap_or(false);
        if !is_image {
            continue;
        }

        images.push(ImageRef {
            object_id: *object_id,
            name,
            width: stream.dict.get(b"Width").and_then(|w| w.as_i64()).ok(),
            height: stream.dict.get(b"Height").and_then(|h| h.as_i64()).ok(),
            filters: filter_names(&stream.dict),
        });
    }

    Ok(images)
}
