use crate::errors::{ExtractError, ExtractResult};
use std::{io, path::PathBuf};
use tokio::fs;

/// A blobstore kept in a local directory, one file per blob id.
#[derive(Clone, Debug)]
pub struct LocalBlobstore {
    root: PathBuf,
}

impl LocalBlobstore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `blob_id` to the file holding its content.
    pub async fn path(&self, blob_id: &str) -> ExtractResult<PathBuf> {
        if blob_id.is_empty()
            || blob_id == "."
            || blob_id == ".."
            || blob_id.contains(|c| c == '/' || c == '\\')
        {
            return Err(ExtractError::InvalidBlobId(blob_id.to_string()));
        }
        let path = self.root.join(blob_id);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(ExtractError::BlobNotFound(blob_id.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ExtractError::BlobNotFound(blob_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
