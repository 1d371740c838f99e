mod blobstore;
mod extractor;

pub use blobstore::LocalBlobstore;
pub use extractor::{Extractor, TarballExtractor};
