use std::path::PathBuf;

/// Rejections reported to the user before classification is attempted.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{name} is not an image (type {mime_type})")]
    UnsupportedType { name: String, mime_type: String },
    #[error("{name} is {size} bytes, larger than the {max} byte limit")]
    TooLarge { name: String, size: u64, max: u64 },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
