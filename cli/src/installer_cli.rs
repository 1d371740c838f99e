use jobinstall::{
    blob::{LocalBlobstore, TarballExtractor},
    errors::InstallError,
    filesystem::OsFileSystem,
    stage::Stage,
    InstalledJob, JobInstaller, RenderedJobRef,
};
use std::path::PathBuf;

pub struct InstallerCli {
    inner: JobInstaller<OsFileSystem, TarballExtractor>,
}

impl InstallerCli {
    pub fn new(jobs_dir: PathBuf, blobstore_dir: PathBuf) -> Self {
        let extractor = TarballExtractor::new(LocalBlobstore::new(blobstore_dir));
        Self {
            inner: JobInstaller::new(OsFileSystem, extractor, jobs_dir),
        }
    }

    pub async fn install<S: Stage>(
        &self,
        job_ref: RenderedJobRef,
        stage: &S,
    ) -> Result<(), InstallError> {
        let job = self.inner.install(&job_ref, stage).await?;
        println!("Installed job '{}' to {}", job.name(), job.path().display());
        Ok(())
    }

    /// Remove the job named `name`, whatever version is installed.
    pub async fn cleanup(&self, name: &str) -> Result<(), InstallError> {
        if name.is_empty() {
            return Err(InstallError::InvalidJobRef("job name is empty"));
        }
        let job = InstalledJob::new(
            RenderedJobRef::new(name, "", "", ""),
            self.inner.job_path(name),
        );
        self.inner.cleanup(&job).await?;
        println!("Removed job '{}'", name);
        Ok(())
    }
}
