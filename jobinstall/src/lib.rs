pub mod blob;
mod digest;
pub mod errors;
pub mod filesystem;
mod installer;
mod job;
pub mod stage;
pub mod types;

pub use digest::{Algorithm, Digest};
pub use installer::JobInstaller;
pub use job::{InstalledJob, RenderedJobRef};
