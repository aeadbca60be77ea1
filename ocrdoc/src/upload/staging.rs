use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{secure_filename, UploadedPayload};
use crate::config::UploadStorage;
use crate::error::{OcrDocError, Result};

enum Staged {
    Memory(Vec<u8>),
    /// Removed from disk when dropped.
    Disk(NamedTempFile),
}

/// An upload held for the duration of one request.
///
/// Disk-backed uploads are deleted when this value is dropped, which covers
/// the success path, OCR failures and early returns alike.
pub struct StagedUpload {
    filename: String,
    size: usize,
    staged: Staged,
}

impl std::fmt::Debug for StagedUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedUpload")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .field("path", &self.path())
            .finish()
    }
}

impl StagedUpload {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Location of the staged file, if the upload lives on disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.staged {
            Staged::Memory(_) => None,
            Staged::Disk(file) => Some(file.path()),
        }
    }

    pub async fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.staged {
            Staged::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
            Staged::Disk(file) => {
                let path = file.path().to_path_buf();
                let bytes = tokio::task::spawn_blocking(move || std::fs::read(path))
                    .await
                    .map_err(|e| OcrDocError::Internal(format!("Staging task panicked: {e}")))??;
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

fn write_temp_file(dir: PathBuf, name: String, bytes: Vec<u8>) -> std::io::Result<NamedTempFile> {
    std::fs::create_dir_all(&dir)?;
    let mut file = tempfile::Builder::new()
        .prefix("ocrdoc-")
        .suffix(&format!("-{name}"))
        .tempfile_in(&dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(file)
}

/// Hold the payload according to the configured storage mode.
pub async fn stage(payload: UploadedPayload, storage: &UploadStorage) -> Result<StagedUpload> {
    let UploadedPayload {
        bytes,
        filename,
        size,
    } = payload;

    let staged = match storage {
        UploadStorage::Memory => Staged::Memory(bytes),
        UploadStorage::Directory(dir) => {
            let dir = dir.clone();
            let name = secure_filename(&filename);
            let file = tokio::task::spawn_blocking(move || write_temp_file(dir, name, bytes))
                .await
                .map_err(|e| OcrDocError::Internal(format!("Staging task panicked: {e}")))??;
            debug!(path = %file.path().display(), size, "Upload staged on disk");
            Staged::Disk(file)
        }
    };

    Ok(StagedUpload {
        filename,
        size,
        staged,
    })
}
