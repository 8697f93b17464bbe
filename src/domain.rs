pub mod clock;
pub mod triage_engine;

pub use clock::{Clock, GestureTimer, ManualClock, SystemClock};
pub use triage_engine::TriageEngine;

use crate::error::TriageError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File extensions treated as photos
const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff", "heic", "heif",
];

/// Opaque identity of a photo within one discovery run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(pub u64);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns true if the extension belongs to a photo format (case-insensitive)
pub fn is_photo_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    PHOTO_EXTENSIONS.contains(&ext.as_str())
}

/// A photo in the batch. The engine never looks inside the file; `path` is
/// only handed to the deleter, the previewer and the external viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub taken_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
}

impl PhotoRecord {
    /// Builds a record from file metadata. Dimensions are left at zero until
    /// [`PhotoRecord::read_dimensions`] is called.
    pub fn from_path(path: &Path, id: PhotoId) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified = metadata.modified()?;
        let taken_at: DateTime<Utc> = modified.into();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(PhotoRecord {
            id,
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            taken_at,
            width: 0,
            height: 0,
        })
    }

    /// Reads pixel dimensions from the image header. Formats the decoder
    /// does not understand keep zero dimensions.
    pub fn read_dimensions(&mut self) {
        match image::image_dimensions(&self.path) {
            Ok((width, height)) => {
                self.width = width;
                self.height = height;
            }
            Err(e) => {
                tracing::debug!(photo = %self.name, error = %e, "could not read dimensions");
            }
        }
    }

    /// "4032×3024", or None when dimensions are unknown
    pub fn dimensions_label(&self) -> Option<String> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(format!("{}×{}", self.width, self.height))
        }
    }
}

/// Per-item outcome of triage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Delete,
}

/// Transient feedback for the most recent decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    None,
    /// The photo was kept (swiped past)
    Skip,
    Delete,
}

/// One entry of the session's append-only decision log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionEntry {
    pub index: usize,
    pub decision: Decision,
}

/// Lifecycle of the triage engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TriageState {
    /// No batch loaded
    #[default]
    Empty,
    /// Batch requested, not yet available
    Loading,
    /// Photos remain to be decided
    Active,
    /// Every photo has been decided; the summary is available
    Complete,
    /// Batch acquisition failed
    Error(TriageError),
}

impl TriageState {
    pub fn name(&self) -> &'static str {
        match self {
            TriageState::Empty => "empty",
            TriageState::Loading => "loading",
            TriageState::Active => "active",
            TriageState::Complete => "complete",
            TriageState::Error(_) => "in error",
        }
    }
}

/// Terminal summary of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageSummary {
    pub total_processed: usize,
    pub deleted_count: usize,
    pub kept_count: usize,
}

/// Progress of the live session, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriageStatistics {
    pub total: usize,
    pub cursor: usize,
    pub kept: usize,
    pub deleted: usize,
    /// Deletes whose accounting was reverted by undo
    pub reverted: usize,
    /// Deletion requests the collaborator reported as successful
    pub confirmed_deletions: usize,
    pub failed_deletions: usize,
    /// Sum of the sizes of confirmed deletions
    pub bytes_freed: u64,
}

impl TriageStatistics {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.cursor)
    }
}

/// Options for photo discovery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Include files and directories whose names start with '.'
    pub show_hidden: bool,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Discovers photos in a directory, newest first.
///
/// Ids are assigned in that order. Unreadable entries are skipped; an
/// unreadable root directory is an error.
pub fn discover_photos(
    dir_path: &Path,
    options: &DiscoveryOptions,
) -> io::Result<Vec<PhotoRecord>> {
    // Fail on the root itself rather than yielding an empty batch
    fs::read_dir(dir_path)?;

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir_path)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || options.show_hidden || !is_hidden(entry));

    let mut photos = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let is_photo = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(is_photo_extension);
        if !is_photo {
            continue;
        }

        match PhotoRecord::from_path(entry.path(), PhotoId(0)) {
            Ok(photo) => photos.push(photo),
            Err(_) => continue,
        }
    }

    photos.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    for (index, photo) in photos.iter_mut().enumerate() {
        photo.id = PhotoId(index as u64);
    }

    Ok(photos)
}
