// Async preview module for background photo decoding with caching

use crate::domain::PhotoRecord;
use crate::preview::{generate_photo_preview, PhotoPreview, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

/// Maximum number of cached previews
const CACHE_SIZE: usize = 10;

/// Represents a preview loading state
#[derive(Debug, Clone)]
pub enum PreviewState {
    /// Preview is loading
    Loading,
    /// Preview is ready
    Ready(Arc<PhotoPreview>),
    /// Photo could not be decoded
    Error(String),
}

/// Message types for the preview loader
enum PreviewRequest {
    /// Decode a photo. Prefetches carry no response channel.
    Load {
        photo: PhotoRecord,
        response_tx: Option<oneshot::Sender<PreviewState>>,
    },
    /// Shutdown the loader
    Shutdown,
}

/// LRU-like cache for previews
#[derive(Debug)]
struct PreviewCache {
    cache: HashMap<PathBuf, Arc<PhotoPreview>>,
    /// Order of access for LRU eviction (most recent at end)
    access_order: Vec<PathBuf>,
    max_size: usize,
}

impl PreviewCache {
    fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            access_order: Vec::new(),
            max_size,
        }
    }

    /// Get a cached preview, updating access order
    fn get(&mut self, path: &Path) -> Option<Arc<PhotoPreview>> {
        let preview = self.cache.get(path).cloned()?;
        self.access_order.retain(|p| p != path);
        self.access_order.push(path.to_path_buf());
        Some(preview)
    }

    /// Insert a preview, evicting the least recently used if necessary
    fn insert(&mut self, path: PathBuf, preview: Arc<PhotoPreview>) {
        if self.cache.contains_key(&path) {
            self.access_order.retain(|p| p != &path);
        } else if self.cache.len() >= self.max_size && !self.access_order.is_empty() {
            let oldest = self.access_order.remove(0);
            self.cache.remove(&oldest);
        }

        self.cache.insert(path.clone(), preview);
        self.access_order.push(path);
    }

    fn len(&self) -> usize {
        self.cache.len()
    }
}

fn lock(cache: &Mutex<PreviewCache>) -> MutexGuard<'_, PreviewCache> {
    // A panic while holding the lock cannot leave the map half-updated
    cache.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle for sending requests to the preview loader
#[derive(Clone)]
pub struct PreviewLoader {
    request_tx: mpsc::Sender<PreviewRequest>,
    cache: Arc<Mutex<PreviewCache>>,
}

impl PreviewLoader {
    /// Create a new preview loader with a background task on `handle`
    pub fn new(handle: &Handle) -> Self {
        let (request_tx, request_rx) = mpsc::channel(32);
        let cache = Arc::new(Mutex::new(PreviewCache::new(CACHE_SIZE)));

        handle.spawn(Self::worker(request_rx, Arc::clone(&cache)));

        Self { request_tx, cache }
    }

    /// Background worker that decodes photos one at a time
    async fn worker(
        mut request_rx: mpsc::Receiver<PreviewRequest>,
        cache: Arc<Mutex<PreviewCache>>,
    ) {
        while let Some(request) = request_rx.recv().await {
            match request {
                PreviewRequest::Load { photo, response_tx } => {
                    let path = photo.path.clone();

                    if let Some(cached) = lock(&cache).get(&path) {
                        if let Some(tx) = response_tx {
                            let _ = tx.send(PreviewState::Ready(cached));
                        }
                        continue;
                    }

                    let result = tokio::task::spawn_blocking(move || {
                        generate_photo_preview(&photo, MAX_IMAGE_WIDTH, MAX_IMAGE_HEIGHT)
                    })
                    .await;

                    let state = match result {
                        Ok(Ok(preview)) => {
                            let preview = Arc::new(preview);
                            lock(&cache).insert(path, Arc::clone(&preview));
                            PreviewState::Ready(preview)
                        }
                        Ok(Err(e)) => PreviewState::Error(e.to_string()),
                        Err(e) => PreviewState::Error(format!("Task panicked: {}", e)),
                    };

                    if let Some(tx) = response_tx {
                        let _ = tx.send(state);
                    }
                }
                PreviewRequest::Shutdown => break,
            }
        }
    }

    /// Queues a decode without waiting. Returns false if the queue is full
    /// or the worker is gone.
    fn try_load(
        &self,
        photo: &PhotoRecord,
        response_tx: Option<oneshot::Sender<PreviewState>>,
    ) -> bool {
        let request = PreviewRequest::Load {
            photo: photo.clone(),
            response_tx,
        };
        self.request_tx.try_send(request).is_ok()
    }

    pub fn get_cached(&self, path: &Path) -> Option<Arc<PhotoPreview>> {
        lock(&self.cache).get(path)
    }

    pub fn cache_size(&self) -> usize {
        lock(&self.cache).len()
    }

    pub fn shutdown(&self) {
        let _ = self.request_tx.try_send(PreviewRequest::Shutdown);
    }
}

/// Polling wrapper for the synchronous TUI loop
pub struct SyncPreviewManager {
    loader: PreviewLoader,
    /// Current preview state for the active photo
    current_state: PreviewState,
    /// Path of the photo we're currently showing/loading
    current_path: Option<PathBuf>,
    /// Receiver for the current pending preview request
    receiver: Option<oneshot::Receiver<PreviewState>>,
}

impl SyncPreviewManager {
    pub fn new(handle: &Handle) -> Self {
        Self {
            loader: PreviewLoader::new(handle),
            current_state: PreviewState::Loading,
            current_path: None,
            receiver: None,
        }
    }

    /// Request a preview for a photo, returns current state (non-blocking)
    pub fn request_preview(&mut self, photo: &PhotoRecord) -> &PreviewState {
        if self.current_path.as_ref() != Some(&photo.path) {
            self.current_path = Some(photo.path.clone());
            self.receiver = None;

            if let Some(cached) = self.loader.get_cached(&photo.path) {
                self.current_state = PreviewState::Ready(cached);
                return &self.current_state;
            }

            self.current_state = PreviewState::Loading;
            let (tx, rx) = oneshot::channel();
            if self.loader.try_load(photo, Some(tx)) {
                self.receiver = Some(rx);
            } else {
                self.current_state = PreviewState::Error("Preview queue unavailable".to_string());
            }
        }

        if matches!(self.current_state, PreviewState::Loading) {
            if let Some(ref mut rx) = self.receiver {
                match rx.try_recv() {
                    Ok(state) => {
                        self.current_state = state;
                        self.receiver = None;
                    }
                    Err(oneshot::error::TryRecvError::Empty) => {}
                    Err(oneshot::error::TryRecvError::Closed) => {
                        self.current_state =
                            PreviewState::Error("Preview channel closed".to_string());
                        self.receiver = None;
                    }
                }
            }
        }

        &self.current_state
    }

    /// Decodes a photo ahead of time so it is cached when reached
    pub fn prefetch(&self, photo: &PhotoRecord) {
        if self.loader.get_cached(&photo.path).is_none() {
            self.loader.try_load(photo, None);
        }
    }

    pub fn current_state(&self) -> &PreviewState {
        &self.current_state
    }

    /// Forget the active photo (e.g. after a decision or restart)
    pub fn reset(&mut self) {
        self.current_path = None;
        self.current_state = PreviewState::Loading;
        self.receiver = None;
    }

    pub fn cache_size(&self) -> usize {
        self.loader.cache_size()
    }
}

impl Drop for SyncPreviewManager {
    fn drop(&mut self) {
        self.loader.shutdown();
    }
}
