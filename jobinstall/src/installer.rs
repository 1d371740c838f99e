use crate::blob::Extractor;
use crate::errors::{InstallError, Result};
use crate::filesystem::{FileSystem, EXECUTABLE_MODE, PERMISSIVE_DIR_MODE};
use crate::job::{InstalledJob, RenderedJobRef};
use crate::stage::Stage;
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Installs rendered jobs under a jobs root, one directory per job name, and removes them again.
///
/// The installer holds no state between calls. Two installs of the same job name
/// race on the same directory, so callers must serialize them.
pub struct JobInstaller<F, E> {
    fs: F,
    extractor: E,
    jobs_path: PathBuf,
}

impl<F, E> JobInstaller<F, E>
where
    F: FileSystem,
    E: Extractor,
{
    pub fn new(fs: F, extractor: E, jobs_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            extractor,
            jobs_path: jobs_path.into(),
        }
    }

    /// Where a job named `name` lives once installed.
    pub fn job_path(&self, name: &str) -> PathBuf {
        self.jobs_path.join(name)
    }

    /// Install `job_ref`, reported to `stage` as "Installing job '<name>'".
    ///
    /// A failed install may leave a partially populated job directory behind.
    pub async fn install<S: Stage>(
        &self,
        job_ref: &RenderedJobRef,
        stage: &S,
    ) -> Result<InstalledJob> {
        let stage_name = format!("Installing job '{}'", job_ref.name);
        stage.perform(&stage_name, self.install_job(job_ref)).await
    }

    async fn install_job(&self, job_ref: &RenderedJobRef) -> Result<InstalledJob> {
        if job_ref.name.is_empty() {
            return Err(InstallError::InvalidJobRef("job name is empty"));
        }
        if job_ref.blobstore_id.is_empty() {
            return Err(InstallError::InvalidJobRef("blobstore id is empty"));
        }

        let job_dir = self.job_path(&job_ref.name);
        self.fs
            .mkdir_all(&job_dir, PERMISSIVE_DIR_MODE)
            .await
            .map_err(|source| InstallError::DirectoryCreationFailed {
                path: job_dir.clone(),
                source,
            })?;
        debug!(job = %job_ref.name, path = ?job_dir, "created job directory");

        debug!(job = %job_ref.name, blob_id = %job_ref.blobstore_id, "extracting job");
        self.extractor
            .extract(&job_ref.blobstore_id, &job_ref.sha1, &job_dir)
            .await
            .map_err(|source| InstallError::ExtractionFailed {
                blob_id: job_ref.blobstore_id.clone(),
                source,
            })?;

        let pattern = bin_glob(&job_dir).map_err(|source| InstallError::GlobFailed {
            pattern: format!("{}/bin/*", job_dir.display()),
            source,
        })?;
        let files = self
            .fs
            .glob(&pattern)
            .await
            .map_err(|source| InstallError::GlobFailed {
                pattern: pattern.clone(),
                source,
            })?;
        debug!(job = %job_ref.name, %pattern, matches = files.len(), "globbed executables");
        for file in &files {
            self.fs
                .chmod(file, EXECUTABLE_MODE)
                .await
                .map_err(|source| InstallError::PermissionChangeFailed {
                    path: file.clone(),
                    source,
                })?;
        }
        debug!(job = %job_ref.name, "marked executables");

        Ok(InstalledJob::new(job_ref.clone(), job_dir))
    }

    /// Remove everything at the job's path. A path that is already gone is fine.
    pub async fn cleanup(&self, job: &InstalledJob) -> Result<()> {
        self.fs
            .remove_all(job.path())
            .await
            .map_err(|source| InstallError::RemovalFailed {
                path: job.path().to_path_buf(),
                source,
            })?;
        debug!(job = %job.name(), path = ?job.path(), "removed job");
        Ok(())
    }
}

/// `<job_dir>/bin/*`, with the job dir matched literally.
///
/// Glob patterns are strings, so a job dir that is not valid UTF-8 cannot be matched.
fn bin_glob(job_dir: &Path) -> io::Result<String> {
    let dir = job_dir.to_str().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "job directory is not valid UTF-8",
        )
    })?;
    Ok(format!("{}/bin/*", glob::Pattern::escape(dir)))
}
