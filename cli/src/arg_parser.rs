use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Install rendered jobs from a local blobstore into a jobs directory
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// Directory every job gets its own subdirectory in
    #[clap(long = "jobs-dir", env = "JOBS_DIR", parse(from_os_str))]
    pub jobs_dir: PathBuf,
    /// Directory holding one file per blob id
    #[clap(long = "blobstore-dir", env = "BLOBSTORE_DIR", parse(from_os_str))]
    pub blobstore_dir: PathBuf,
    /// Don't report install progress
    #[clap(short, long)]
    pub quiet: bool,
    /// The sub-command to use
    #[clap(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Subcommand)]
pub enum SubCommand {
    /// install a rendered job
    Install {
        #[clap(long, forbid_empty_values = true)]
        /// name of the job, also the name of its directory
        name: String,

        #[clap(long)]
        /// rendered version of the job
        version: String,

        #[clap(long = "blob-id", forbid_empty_values = true)]
        /// blobstore id of the rendered job tarball
        blob_id: String,

        #[clap(long)]
        /// sha1 of the tarball, or <algorithm>:<hex>
        sha1: String,
    },
    /// remove an installed job
    Cleanup {
        #[clap(long, forbid_empty_values = true)]
        /// name of the job
        name: String,
    },
}
