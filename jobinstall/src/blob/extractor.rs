use super::blobstore::LocalBlobstore;
use crate::digest::Digest;
use crate::errors::{ExtractError, ExtractResult};
use crate::filesystem::PERMISSIVE_DIR_MODE;
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use tokio::fs;
use tracing::{debug, warn};

/// Populates a directory with the contents of a blob.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Unpack blob `blob_id`, checked against `checksum`, into `dest`.
    ///
    /// On failure the contents of `dest` are unspecified.
    async fn extract(&self, blob_id: &str, checksum: &str, dest: &Path) -> ExtractResult<()>;
}

/// Extracts gzipped tarballs out of a `LocalBlobstore`.
#[derive(Clone, Debug)]
pub struct TarballExtractor {
    blobstore: LocalBlobstore,
}

impl TarballExtractor {
    pub fn new(blobstore: LocalBlobstore) -> Self {
        Self { blobstore }
    }
}

#[async_trait]
impl Extractor for TarballExtractor {
    async fn extract(&self, blob_id: &str, checksum: &str, dest: &Path) -> ExtractResult<()> {
        let digest: Digest = checksum.parse()?;
        let blob = self.blobstore.path(blob_id).await?;

        let to_verify = blob.clone();
        tokio::task::spawn_blocking(move || digest.verify_file(&to_verify))
            .await
            .map_err(io::Error::from)??;
        debug!(blob_id, path = ?blob, "verified blob");

        let existed = match fs::metadata(dest).await {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        if !existed {
            fs::DirBuilder::new()
                .recursive(true)
                .mode(PERMISSIVE_DIR_MODE)
                .create(dest)
                .await?;
        }

        let (archive, target) = (blob.clone(), dest.to_path_buf());
        let unpacked = tokio::task::spawn_blocking(move || unpack(&archive, &target))
            .await
            .map_err(io::Error::from)?;
        if let Err(source) = unpacked {
            // only undo what we created; a pre-existing dest belongs to someone else
            if !existed {
                warn!(path = ?dest, "removing partially extracted directory");
                if let Err(e) = fs::remove_dir_all(dest).await {
                    warn!(path = ?dest, error = %e, "failed to remove partially extracted directory");
                }
            }
            return Err(ExtractError::Decompress { path: blob, source });
        }
        debug!(blob_id, path = ?dest, "extracted blob");
        Ok(())
    }
}

fn unpack(archive: &Path, dest: &Path) -> io::Result<()> {
    let file = File::open(archive)?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);
    archive.unpack(dest)
}
