pub mod batch;
pub mod job;
pub mod scanner;

pub use batch::{run_batch, BatchRunner};
pub use job::{JobResult, ProcessingJob};
pub use scanner::{DirectoryScanner, FileFilter, IncomingFile, ScanDecision, SkipReason};
