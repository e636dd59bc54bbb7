use crate::display::interface::ResultDisplay;
use crate::waste::result::ClassificationResult;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    Page(String),
    Loading(String),
    Result(String, ClassificationResult),
    Error(String, String),
}

#[derive(Default)]
pub struct DisplayFake {
    pub events: Vec<DisplayEvent>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultDisplay for DisplayFake {
    fn show_page(&mut self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.push(DisplayEvent::Page(content.to_string()));
        Ok(())
    }

    fn show_loading(&mut self, file_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.push(DisplayEvent::Loading(file_name.to_string()));
        Ok(())
    }

    fn show_result(
        &mut self,
        file_name: &str,
        result: &ClassificationResult,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events
            .push(DisplayEvent::Result(file_name.to_string(), result.clone()));
        Ok(())
    }

    fn show_error(
        &mut self,
        file_name: &str,
        message: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events
            .push(DisplayEvent::Error(file_name.to_string(), message.to_string()));
        Ok(())
    }
}
