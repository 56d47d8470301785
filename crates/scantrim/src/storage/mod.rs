pub mod filesystem;

pub use filesystem::{ArchiveStorage, ORIGINAL_FILE_NAME, PROCESSED_FILE_NAME};
