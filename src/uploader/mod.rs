// Upload queue module - tracks queued compliance reports and drives their
// concurrent submission to the backend.

pub mod queue;
pub mod transport;

pub use queue::{BatchSummary, FileEntry, QueueEvent, StatusCounts, UploadQueue, UploadStatus};
pub use transport::UploadClient;
