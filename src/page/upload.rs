use crate::config::UploadConfig;
use crate::display::interface::ResultDisplay;
use crate::library::logger::interface::Logger;
use crate::upload::error::UploadError;
use crate::upload::file::UploadedFile;
use crate::upload::validate::validate;
use crate::waste::result::ClassificationResult;
use crate::waste_sorter::service::WasteSorter;
use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct UploadPage {
    config: UploadConfig,
    sorter: Arc<WasteSorter>,
    display: Arc<Mutex<dyn ResultDisplay + Send + Sync>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl UploadPage {
    pub fn new(
        config: UploadConfig,
        sorter: Arc<WasteSorter>,
        display: Arc<Mutex<dyn ResultDisplay + Send + Sync>>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            config,
            sorter,
            display,
            logger: logger.with_namespace("upload_page"),
        }
    }

    /// Rejected files are reported on the display and never reach the sorter.
    pub async fn submit(&self, file: UploadedFile) -> Result<ClassificationResult, UploadError> {
        if let Err(e) = validate(&file, &self.config) {
            let _ = self.logger.info(&format!("Rejected upload: {}", e));
            self.show(|display| display.show_error(&file.name, &e.to_string()));
            return Err(e);
        }

        self.show(|display| display.show_loading(&file.name));

        let result = self.sorter.classify_bytes(&file.bytes).await;

        self.show(|display| display.show_result(&file.name, &result));

        Ok(result)
    }

    /// Rejects by extension and file size before reading the file.
    pub async fn submit_path(&self, path: &Path) -> Result<ClassificationResult, UploadError> {
        match UploadedFile::from_path(path, &self.config).await {
            Ok(file) => self.submit(file).await,
            Err(e) => {
                let name = path.display().to_string();
                self.show(|display| display.show_error(&name, &e.to_string()));
                Err(e)
            }
        }
    }

    fn show<F>(&self, render: F)
    where
        F: FnOnce(&mut (dyn ResultDisplay + Send + Sync)) -> Result<(), Box<dyn Error + Send + Sync>>,
    {
        let outcome = match self.display.lock() {
            Ok(mut display) => render(&mut *display),
            Err(_) => Err("display lock poisoned".into()),
        };

        if let Err(e) = outcome {
            let _ = self.logger.warn(&format!("Display failed: {}", e));
        }
    }
}
