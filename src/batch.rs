// Batch provider: selects the photos for one triage session
use crate::domain::{discover_photos, DiscoveryOptions, PhotoRecord};
use crate::error::{Result, TriageError};
use rand::seq::SliceRandom;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Number of photos per session when nothing else is configured
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Supplies the ordered, finite batch for a session
pub trait BatchProvider: Send + Sync {
    /// Fetches up to `limit` photos. An empty batch is a successful result;
    /// the engine decides what it means.
    fn fetch_batch(&self, limit: usize) -> Result<Vec<PhotoRecord>>;
}

/// Order in which the batch is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchOrder {
    /// Random sample of the library
    #[default]
    Random,
    /// Most recently taken first
    Newest,
    /// Oldest first
    Oldest,
    /// Alphabetical by file name
    Name,
    /// Largest first
    Size,
}

/// Reads photos from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryBatchProvider {
    root: PathBuf,
    discovery: DiscoveryOptions,
    order: BatchOrder,
}

impl DirectoryBatchProvider {
    pub fn new(root: impl Into<PathBuf>, discovery: DiscoveryOptions, order: BatchOrder) -> Self {
        Self {
            root: root.into(),
            discovery,
            order,
        }
    }

    fn apply_order(&self, photos: &mut [PhotoRecord]) {
        // Discovery already returns newest first
        match self.order {
            BatchOrder::Random => photos.shuffle(&mut rand::thread_rng()),
            BatchOrder::Newest => {}
            BatchOrder::Oldest => photos.reverse(),
            BatchOrder::Name => {
                photos.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            BatchOrder::Size => photos.sort_by(|a, b| b.size.cmp(&a.size)),
        }
    }
}

/// Maps a library read failure onto the provider error taxonomy
fn provider_error(error: io::Error, root: &Path) -> TriageError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => {
            TriageError::PermissionDenied(format!("cannot read {}", root.display()))
        }
        _ => TriageError::Unavailable(format!("{}: {}", root.display(), error)),
    }
}

impl BatchProvider for DirectoryBatchProvider {
    fn fetch_batch(&self, limit: usize) -> Result<Vec<PhotoRecord>> {
        let mut photos = discover_photos(&self.root, &self.discovery)
            .map_err(|e| provider_error(e, &self.root))?;

        tracing::debug!(
            root = %self.root.display(),
            found = photos.len(),
            limit,
            "discovered photos"
        );

        self.apply_order(&mut photos);
        photos.truncate(limit);
        for photo in &mut photos {
            photo.read_dimensions();
        }

        Ok(photos)
    }
}

/// Runs batch fetches off the UI thread and hands back the result when
/// polled
pub struct BatchLoader {
    handle: Handle,
    provider: Arc<dyn BatchProvider>,
    pending: Option<oneshot::Receiver<Result<Vec<PhotoRecord>>>>,
}

impl BatchLoader {
    pub fn new(handle: Handle, provider: Arc<dyn BatchProvider>) -> Self {
        Self {
            handle,
            provider,
            pending: None,
        }
    }

    /// Starts fetching a batch, replacing any fetch still in flight
    pub fn request(&mut self, limit: usize) {
        let (tx, rx) = oneshot::channel();
        let provider = Arc::clone(&self.provider);

        self.handle.spawn_blocking(move || {
            // The receiver is gone if the request was superseded
            let _ = tx.send(provider.fetch_batch(limit));
        });

        self.pending = Some(rx);
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the fetched batch once it is ready (non-blocking)
    pub fn poll(&mut self) -> Option<Result<Vec<PhotoRecord>>> {
        let rx = self.pending.as_mut()?;
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                Some(result)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                Some(Err(TriageError::Unavailable(
                    "photo loading task stopped".to_string(),
                )))
            }
        }
    }
}
