use crate::types::BlobId;
use std::{io, path::PathBuf, result};
use thiserror::Error;

/// Failures surfaced by `JobInstaller`. Each variant names what was being worked on.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("invalid job reference: {0}")]
    InvalidJobRef(&'static str),
    #[error("creating job directory '{}'", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("extracting blob with ID '{blob_id}'")]
    ExtractionFailed {
        blob_id: BlobId,
        #[source]
        source: ExtractError,
    },
    #[error("globbing '{pattern}'")]
    GlobFailed {
        pattern: String,
        #[source]
        source: io::Error,
    },
    #[error("making '{}' executable", .path.display())]
    PermissionChangeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("removing job installed to '{}'", .path.display())]
    RemovalFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = result::Result<T, InstallError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid blob id '{0}'")]
    InvalidBlobId(BlobId),
    #[error("blob '{0}' not found")]
    BlobNotFound(BlobId),
    #[error("invalid digest '{0}'")]
    InvalidDigest(String),
    #[error(
        "expected {} digest {} for '{}', got {}",
        .algorithm,
        .expected,
        .path.display(),
        .actual
    )]
    DigestMismatch {
        path: PathBuf,
        algorithm: &'static str,
        expected: String,
        actual: String,
    },
    #[error("decompressing '{}'", .path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type ExtractResult<T> = result::Result<T, ExtractError>;
