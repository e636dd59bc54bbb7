use crate::waste::result::ClassificationResult;
use std::error::Error;

/// Where pages put their output.
pub trait ResultDisplay: Send + Sync {
    /// Static page content (landing page, guide).
    fn show_page(&mut self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Shown while a classification is outstanding.
    fn show_loading(&mut self, file_name: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_result(
        &mut self,
        file_name: &str,
        result: &ClassificationResult,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Error notification for a rejected upload.
    fn show_error(
        &mut self,
        file_name: &str,
        message: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
