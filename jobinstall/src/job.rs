use crate::types::{BlobId, Checksum, JobName, JobVersion};
use std::path::{Path, PathBuf};

/// A job bundle already rendered for a deployment and stored in the blobstore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedJobRef {
    pub name: JobName,
    pub version: JobVersion,
    pub blobstore_id: BlobId,
    pub sha1: Checksum,
}

impl RenderedJobRef {
    pub fn new(
        name: impl Into<JobName>,
        version: impl Into<JobVersion>,
        blobstore_id: impl Into<BlobId>,
        sha1: impl Into<Checksum>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            blobstore_id: blobstore_id.into(),
            sha1: sha1.into(),
        }
    }
}

/// A rendered job materialized on disk.
///
/// Only produced by a successful install (or rebuilt by hand from a known path
/// to drive a cleanup). It owns nothing besides the directory at `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstalledJob {
    job_ref: RenderedJobRef,
    path: PathBuf,
}

impl InstalledJob {
    pub fn new(job_ref: RenderedJobRef, path: impl Into<PathBuf>) -> Self {
        Self {
            job_ref,
            path: path.into(),
        }
    }

    pub fn job_ref(&self) -> &RenderedJobRef {
        &self.job_ref
    }

    pub fn name(&self) -> &str {
        &self.job_ref.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
