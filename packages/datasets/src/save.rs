//! Capabilities the download helper needs from its host.
//!
//! A [`FileSaver`] persists or offers downloaded bytes to the user; a
//! [`Notifier`] shows a blocking, user-visible message. Both are injected
//! so the download logic runs the same in a terminal, a GUI, or a test.

use std::path::{Path, PathBuf};

/// MIME type datasets are saved with.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Persists or offers a downloaded file to the user.
pub trait FileSaver: Send + Sync {
    /// Saves `contents` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    fn save(&self, file_name: &str, content_type: &str, contents: &[u8]) -> std::io::Result<()>;
}

/// Shows a blocking, user-visible notification.
pub trait Notifier: Send + Sync {
    /// Tells the user something went wrong.
    fn alert(&self, message: &str);
}

/// Saves files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// Creates a saver that writes into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, file_name: &str, content_type: &str, contents: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)?;
        log::info!(
            "Saved {} bytes ({content_type}) to {}",
            contents.len(),
            path.display()
        );
        Ok(())
    }
}
