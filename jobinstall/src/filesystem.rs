use async_trait::async_trait;
use std::{
    fs::Permissions,
    io,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Mode used for directories we create; the process umask trims it.
pub const PERMISSIVE_DIR_MODE: u32 = 0o777;

/// rwxr-xr-x
pub const EXECUTABLE_MODE: u32 = 0o755;

/// The filesystem operations the installer needs.
///
/// `OsFileSystem` is the real thing; tests substitute doubles that fail on demand.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create `path` and any missing parents. An existing directory is not an error.
    async fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Non-recursive shell-style match. No matches yields an empty list.
    async fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;

    async fn chmod(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Delete `path` and everything below it. A missing path is a no-op.
    async fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// `FileSystem` backed by the host OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

#[async_trait]
impl FileSystem for OsFileSystem {
    async fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(path)
            .await
    }

    async fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let pattern = pattern.to_owned();
        tokio::task::spawn_blocking(move || -> io::Result<Vec<PathBuf>> {
            let entries = glob::glob(&pattern)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            entries
                .map(|entry| entry.map_err(glob::GlobError::into_error))
                .collect()
        })
        .await?
    }

    async fn chmod(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, Permissions::from_mode(mode)).await
    }

    async fn remove_all(&self, path: &Path) -> io::Result<()> {
        let result = match fs::symlink_metadata(path).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
            Ok(_) => fs::remove_file(path).await,
            Err(e) => Err(e),
        };
        match result {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
