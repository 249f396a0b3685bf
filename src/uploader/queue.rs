use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::uploader::transport::UploadClient;
use crate::validation::ReportValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

/// One tracked report and its upload state.
///
/// `progress` is meaningful only while `Uploading` and never decreases for
/// the lifetime of one request; retry resets it to 0.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(skip)]
    pub(crate) data: Bytes,
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
}

/// Notifications for callers rendering the queue.
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// A candidate failed validation or duplicated an existing entry; no
    /// entry was created.
    Rejected { name: String, reason: String },
    Progress { id: String, progress: u8 },
    /// An entry reached `Success` or `Error`.
    Settled { id: String, status: UploadStatus },
    /// All entries submitted by one `upload_all` call have settled.
    BatchCompleted { summary: BatchSummary },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub submitted: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub uploading: usize,
    pub success: usize,
    pub error: usize,
}

pub(crate) type QueueState = Arc<Mutex<Vec<FileEntry>>>;

/// Mutate one entry by id. Interleaved completions are safe because every
/// update is keyed by the id of its own request.
fn safe_entry_update<F>(state: &QueueState, id: &str, operation: &str, f: F) -> bool
where
    F: FnOnce(&mut FileEntry),
{
    match state.lock() {
        Ok(mut entries) => {
            if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
                f(entry);
                true
            } else {
                log::warn!(
                    "Entry {} not found for {} (removed while in flight?)",
                    id,
                    operation
                );
                false
            }
        }
        Err(e) => {
            log::error!(
                "Failed to acquire queue lock for {} on entry {} (non-critical): {}",
                operation,
                id,
                e
            );
            false
        }
    }
}

fn safe_emit(events: &Option<UnboundedSender<QueueEvent>>, event: QueueEvent) {
    if let Some(sender) = events {
        if sender.send(event).is_err() {
            log::debug!("Queue event receiver dropped (non-critical)");
        }
    }
}

/// Ordered upload queue for compliance reports.
///
/// Entries keep insertion order. `upload_all` submits every pending entry
/// concurrently (fire-all, wait-for-all); failed entries stay in the list
/// until retried or removed.
pub struct UploadQueue {
    entries: QueueState,
    events: Option<UnboundedSender<QueueEvent>>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            events: None,
        }
    }

    /// Queue that reports lifecycle events over a channel. Send failures
    /// are logged and dropped, never propagated.
    pub fn with_events(events: UnboundedSender<QueueEvent>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            events: Some(events),
        }
    }

    /// Best-effort unique id: creation time plus a random suffix.
    fn generate_id() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..9])
    }

    /// Validate and append one candidate. Rejections (bad extension,
    /// oversize, duplicate name+size) surface immediately and never create
    /// an entry.
    pub fn add_file(&self, name: &str, data: Bytes) -> AppResult<String> {
        let size = data.len() as u64;

        if let Err(e) = ReportValidator::validate_report_file(name, size) {
            log::warn!("Rejected {}: {}", name, e);
            safe_emit(
                &self.events,
                QueueEvent::Rejected {
                    name: name.to_string(),
                    reason: e.to_string(),
                },
            );
            return Err(e);
        }

        // Duplicate check and append happen under the same lock.
        let id = {
            let mut entries = self
                .entries
                .lock()
                .map_err(|e| AppError::Internal(format!("queue lock poisoned: {}", e)))?;

            if entries.iter().any(|e| e.name == name && e.size == size) {
                drop(entries);
                let err = AppError::duplicate_file(name);
                log::warn!("Rejected {}: {}", name, err);
                safe_emit(
                    &self.events,
                    QueueEvent::Rejected {
                        name: name.to_string(),
                        reason: err.to_string(),
                    },
                );
                return Err(err);
            }

            let id = Self::generate_id();
            entries.push(FileEntry {
                id: id.clone(),
                name: name.to_string(),
                size,
                data,
                progress: 0,
                status: UploadStatus::Pending,
                error: None,
            });
            id
        };

        log::debug!("Queued {} ({} bytes) as entry {}", name, size, id);
        Ok(id)
    }

    /// Delete one entry by id; the rest keep their order. Returns false if
    /// the id was not present.
    pub fn remove(&self, id: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|e| e.id != id);
                before != entries.len()
            }
            Err(e) => {
                log::error!("Failed to acquire queue lock for remove (non-critical): {}", e);
                false
            }
        }
    }

    /// Empty the list unconditionally. In-flight requests are not
    /// cancelled; their completions are logged and dropped.
    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut entries) => {
                log::info!("Clearing {} queued reports", entries.len());
                entries.clear();
            }
            Err(e) => {
                log::error!("Failed to acquire queue lock for clear (non-critical): {}", e);
            }
        }
    }

    /// Re-queue every failed entry: back to `Pending`, progress 0, error
    /// cleared. Successful and in-flight entries are untouched. Returns
    /// the number re-queued.
    pub fn retry_failed(&self) -> usize {
        match self.entries.lock() {
            Ok(mut entries) => {
                let mut requeued = 0;
                for entry in entries.iter_mut() {
                    if entry.status == UploadStatus::Error {
                        entry.status = UploadStatus::Pending;
                        entry.progress = 0;
                        entry.error = None;
                        requeued += 1;
                    }
                }
                if requeued > 0 {
                    log::info!("Re-queued {} failed reports", requeued);
                }
                requeued
            }
            Err(e) => {
                log::error!("Failed to acquire queue lock for retry (non-critical): {}", e);
                0
            }
        }
    }

    /// Snapshot of the current entries in insertion order.
    pub fn entries(&self) -> Vec<FileEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(e) => {
                log::error!("Failed to acquire queue lock for snapshot (non-critical): {}", e);
                Vec::new()
            }
        }
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in self.entries() {
            match entry.status {
                UploadStatus::Pending => counts.pending += 1,
                UploadStatus::Uploading => counts.uploading += 1,
                UploadStatus::Success => counts.success += 1,
                UploadStatus::Error => counts.error += 1,
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Submit every pending entry concurrently and wait for all of them to
    /// settle. Per-entry failures land on the entries themselves; the
    /// returned `Err` is reserved for the orchestration failing outright.
    ///
    /// `BatchCompleted` fires exactly once per non-empty batch, whatever
    /// the individual outcomes.
    pub async fn upload_all(&self, client: &UploadClient) -> AppResult<BatchSummary> {
        let pending: Vec<FileEntry> = {
            let entries = self
                .entries
                .lock()
                .map_err(|e| AppError::Internal(format!("queue lock poisoned: {}", e)))?;
            entries
                .iter()
                .filter(|e| e.status == UploadStatus::Pending)
                .cloned()
                .collect()
        };

        let mut summary = BatchSummary {
            submitted: pending.len(),
            ..Default::default()
        };
        if pending.is_empty() {
            return Ok(summary);
        }

        log::info!("Uploading {} pending reports", pending.len());

        let mut uploads: FuturesUnordered<_> = pending
            .into_iter()
            .map(|entry| {
                let state = self.entries.clone();
                let events = self.events.clone();
                async move { upload_entry(client, state, events, entry).await }
            })
            .collect();

        while let Some(succeeded) = uploads.next().await {
            if succeeded {
                summary.successful += 1;
            } else {
                summary.failed += 1;
            }
        }

        log::info!(
            "Batch settled: {}/{} successful, {} failed",
            summary.successful,
            summary.submitted,
            summary.failed
        );
        safe_emit(&self.events, QueueEvent::BatchCompleted { summary });
        Ok(summary)
    }
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one entry to a terminal state. Returns whether it succeeded.
async fn upload_entry(
    client: &UploadClient,
    state: QueueState,
    events: Option<UnboundedSender<QueueEvent>>,
    entry: FileEntry,
) -> bool {
    let FileEntry { id, name, data, .. } = entry;

    let progress_state = state.clone();
    let progress_events = events.clone();
    let progress_id = id.clone();

    let result = client
        .upload_report(&name, data, move |bytes_sent, total| {
            let percent = if total == 0 {
                100
            } else {
                (bytes_sent.saturating_mul(100) / total).min(100) as u8
            };
            let mut reported = percent;
            let updated = safe_entry_update(&progress_state, &progress_id, "progress", |entry| {
                entry.status = UploadStatus::Uploading;
                entry.progress = entry.progress.max(percent);
                reported = entry.progress;
            });
            if updated {
                safe_emit(
                    &progress_events,
                    QueueEvent::Progress {
                        id: progress_id.clone(),
                        progress: reported,
                    },
                );
            }
        })
        .await;

    match result {
        Ok(_) => {
            safe_entry_update(&state, &id, "success update", |entry| {
                entry.status = UploadStatus::Success;
                entry.progress = 100;
                entry.error = None;
            });
            log::info!("Uploaded {}", name);
            safe_emit(
                &events,
                QueueEvent::Settled {
                    id,
                    status: UploadStatus::Success,
                },
            );
            true
        }
        Err(e) => {
            let message = e.to_string();
            safe_entry_update(&state, &id, "failure update", |entry| {
                entry.status = UploadStatus::Error;
                entry.error = Some(message.clone());
            });
            log::warn!("Upload failed for {}: {}", name, message);
            safe_emit(
                &events,
                QueueEvent::Settled {
                    id,
                    status: UploadStatus::Error,
                },
            );
            false
        }
    }
}
