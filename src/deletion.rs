// Deletion collaborator: requests issued by the engine, executed in the background
use crate::domain::{PhotoId, PhotoRecord};
use std::fs;
use std::io;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// A request to delete one photo, tagged with the session epoch it was
/// issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    pub epoch: u64,
    pub photo: PhotoRecord,
}

/// Completion of a [`DeletionRequest`], keyed by epoch and photo identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub epoch: u64,
    pub photo_id: PhotoId,
    pub result: std::result::Result<(), String>,
}

/// Where the engine sends deletion requests. Must not block.
pub trait DeletionRequester {
    fn request_delete(&mut self, request: DeletionRequest);
}

impl DeletionRequester for mpsc::UnboundedSender<DeletionRequest> {
    fn request_delete(&mut self, request: DeletionRequest) {
        if let Err(e) = self.send(request) {
            tracing::warn!(
                photo = %e.0.photo.name,
                "deletion worker has shut down, request dropped"
            );
        }
    }
}

/// Performs the physical deletion of a photo
pub trait Deleter: Send + Sync {
    fn delete(&self, photo: &PhotoRecord) -> std::result::Result<(), String>;
}

fn describe_io_error(error: &io::Error) -> String {
    match error.kind() {
        io::ErrorKind::NotFound => "file already gone".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => error.to_string(),
    }
}

/// Moves photos to the system trash
#[derive(Debug, Default)]
pub struct TrashDeleter;

impl Deleter for TrashDeleter {
    fn delete(&self, photo: &PhotoRecord) -> std::result::Result<(), String> {
        if !photo.path.exists() {
            return Err("file already gone".to_string());
        }
        trash::delete(&photo.path).map_err(|e| format!("Trash error: {}", e))
    }
}

/// Removes photos from disk without going through the trash
#[derive(Debug, Default)]
pub struct PermanentDeleter;

impl Deleter for PermanentDeleter {
    fn delete(&self, photo: &PhotoRecord) -> std::result::Result<(), String> {
        fs::remove_file(&photo.path).map_err(|e| describe_io_error(&e))
    }
}

/// Reports success without touching the filesystem
#[derive(Debug, Default)]
pub struct DryRunDeleter;

impl Deleter for DryRunDeleter {
    fn delete(&self, photo: &PhotoRecord) -> std::result::Result<(), String> {
        tracing::info!(photo = %photo.name, "dry run, not deleting");
        Ok(())
    }
}

/// How deleted photos are disposed of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionMode {
    /// Move to the system trash
    #[default]
    Trash,
    /// Remove from disk
    Permanent,
    /// Record decisions only
    DryRun,
}

impl DeletionMode {
    pub fn deleter(self) -> Arc<dyn Deleter> {
        match self {
            DeletionMode::Trash => Arc::new(TrashDeleter),
            DeletionMode::Permanent => Arc::new(PermanentDeleter),
            DeletionMode::DryRun => Arc::new(DryRunDeleter),
        }
    }
}

/// Background executor for deletion requests.
///
/// Requests are received in decision order and each one runs on its own
/// blocking task, so completions can arrive out of order.
pub struct DeletionWorker {
    request_tx: mpsc::UnboundedSender<DeletionRequest>,
    outcome_rx: mpsc::UnboundedReceiver<DeletionOutcome>,
}

impl DeletionWorker {
    /// Spawns the worker on the given runtime
    pub fn spawn(handle: &Handle, deleter: Arc<dyn Deleter>) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        handle.spawn(Self::worker(request_rx, outcome_tx, deleter));

        Self {
            request_tx,
            outcome_rx,
        }
    }

    async fn worker(
        mut request_rx: mpsc::UnboundedReceiver<DeletionRequest>,
        outcome_tx: mpsc::UnboundedSender<DeletionOutcome>,
        deleter: Arc<dyn Deleter>,
    ) {
        while let Some(request) = request_rx.recv().await {
            let deleter = Arc::clone(&deleter);
            let outcome_tx = outcome_tx.clone();

            tokio::spawn(async move {
                let DeletionRequest { epoch, photo } = request;
                let photo_id = photo.id;

                let result = tokio::task::spawn_blocking(move || deleter.delete(&photo))
                    .await
                    .unwrap_or_else(|e| Err(format!("Deletion task panicked: {}", e)));

                // The receiver is gone only when the application is exiting
                let _ = outcome_tx.send(DeletionOutcome {
                    epoch,
                    photo_id,
                    result,
                });
            });
        }
    }

    /// A sender the engine can use as its [`DeletionRequester`]
    pub fn requester(&self) -> mpsc::UnboundedSender<DeletionRequest> {
        self.request_tx.clone()
    }

    /// Next completed deletion, if one is ready (non-blocking)
    pub fn try_next_outcome(&mut self) -> Option<DeletionOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Waits for the next completed deletion
    pub async fn next_outcome(&mut self) -> Option<DeletionOutcome> {
        self.outcome_rx.recv().await
    }
}
