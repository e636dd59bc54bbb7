use crate::display::interface::ResultDisplay;
use crate::waste::result::ClassificationResult;
use std::error::Error;

pub struct DisplayConsole {}

impl DisplayConsole {
    pub fn new() -> Self {
        Self {}
    }
}

/// Draws `lines` inside a box sized to the widest line.
pub fn render_card(lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(width + 2)));
    for line in lines {
        let padding = width - line.chars().count();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(padding)));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width + 2)));
    out
}

pub fn render_result(file_name: &str, result: &ClassificationResult) -> String {
    let mut lines = vec![
        file_name.to_string(),
        format!(
            "{} - {}% confident",
            result.category.name(),
            result.confidence_percent()
        ),
    ];

    if !result.items.is_empty() {
        let badges: Vec<String> = result.items.iter().map(|item| format!("[{}]", item)).collect();
        lines.push(format!("Detected: {}", badges.join(" ")));
    }

    lines.push("Recommendations:".to_string());
    for recommendation in &result.recommendations {
        lines.push(format!("  * {}", recommendation));
    }

    render_card(&lines)
}

impl ResultDisplay for DisplayConsole {
    fn show_page(&mut self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", content);
        Ok(())
    }

    fn show_loading(&mut self, file_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("Analyzing {}...", file_name);
        Ok(())
    }

    fn show_result(
        &mut self,
        file_name: &str,
        result: &ClassificationResult,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", render_result(file_name, result));
        Ok(())
    }

    fn show_error(
        &mut self,
        file_name: &str,
        message: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        eprintln!("! {}: {}", file_name, message);
        Ok(())
    }
}
