use crate::config::UploadConfig;
use crate::upload::error::UploadError;
use crate::upload::file::UploadedFile;

/// Type is checked before size.
pub fn validate(file: &UploadedFile, config: &UploadConfig) -> Result<(), UploadError> {
    check(&file.name, &file.mime_type, file.size(), config)
}

/// Same rules as `validate`, for a file that has not been read yet.
pub fn check(
    name: &str,
    mime_type: &str,
    size: u64,
    config: &UploadConfig,
) -> Result<(), UploadError> {
    if !mime_type.starts_with(&config.accepted_mime_prefix) {
        return Err(UploadError::UnsupportedType {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        });
    }

    if size > config.max_file_bytes {
        return Err(UploadError::TooLarge {
            name: name.to_string(),
            size,
            max: config.max_file_bytes,
        });
    }

    Ok(())
}
