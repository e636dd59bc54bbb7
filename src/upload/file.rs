use crate::config::UploadConfig;
use crate::upload::error::UploadError;
use crate::upload::validate::check;
use image::ImageFormat;
use std::path::Path;
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, deriving its MIME type from the extension.
    /// Type and size are checked from the path and metadata before any bytes
    /// are read, and the read itself stops one byte past the limit.
    pub async fn from_path(path: &Path, config: &UploadConfig) -> Result<Self, UploadError> {
        let read_error = |source: std::io::Error| UploadError::Read {
            path: path.to_path_buf(),
            source,
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_type_for_path(path);

        let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
        check(&name, &mime_type, metadata.len(), config)?;

        let file = tokio::fs::File::open(path).await.map_err(read_error)?;
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.take(config.max_file_bytes + 1)
            .read_to_end(&mut bytes)
            .await
            .map_err(read_error)?;

        // metadata can understate special files and files still being written
        check(&name, &mime_type, bytes.len() as u64, config)?;

        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn mime_type_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}
