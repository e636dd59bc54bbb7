use crate::display::interface::ResultDisplay;
use crate::waste::result::ClassificationResult;
use serde_json::json;
use std::error::Error;

/// One JSON object per line on stdout, for scripting.
pub struct DisplayJson {}

impl DisplayJson {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn result_line(
    file_name: &str,
    result: &ClassificationResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({ "file": file_name, "result": result }))
}

pub fn error_line(file_name: &str, message: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({ "file": file_name, "error": message }))
}

impl ResultDisplay for DisplayJson {
    fn show_page(&mut self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", serde_json::to_string(&json!({ "page": content }))?);
        Ok(())
    }

    fn show_loading(&mut self, _file_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show_result(
        &mut self,
        file_name: &str,
        result: &ClassificationResult,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", result_line(file_name, result)?);
        Ok(())
    }

    fn show_error(
        &mut self,
        file_name: &str,
        message: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", error_line(file_name, message)?);
        Ok(())
    }
}
