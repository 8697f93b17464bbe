// Opens photos in the system's default viewer

use std::io;
use std::path::Path;

/// Launches the default viewer for `path` without waiting for it to exit
pub fn open_photo(path: &Path) -> io::Result<()> {
    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} no longer exists", path.display()),
        ));
    }

    tracing::debug!(path = %path.display(), "opening in system viewer");
    open::that_detached(path)
}
