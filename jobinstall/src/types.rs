pub type JobName = String;
pub type JobVersion = String;
pub type BlobId = String;
pub type Checksum = String;
