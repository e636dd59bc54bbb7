use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use display::{impl_console::DisplayConsole, impl_json::DisplayJson, interface::ResultDisplay};
use futures::future::join_all;
use library::logger::{
    impl_console::LoggerConsole, impl_tracing::LoggerTracing, interface::Logger,
};
use page::upload::UploadPage;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use waste_sorter::service::WasteSorter;

mod config;
mod display;
mod image_classifier;
mod library;
mod page;
mod upload;
mod waste;
mod waste_sorter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Console,
    Tracing,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Landing page
    Home,
    /// How to sort wet, dry and hazardous waste
    Guide,
    /// Classify one or more photos
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "waste-sorter", version, about = "Sort waste photos into wet, dry and hazardous")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Log as timestamped console lines or as tracing events
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Console)]
    log_format: LogFormat,

    /// Model path or URL, overrides the config file
    #[arg(long, global = true)]
    model: Option<String>,

    /// Skip the model and use the pixel heuristic only
    #[arg(long, global = true, conflicts_with = "model")]
    no_model: bool,

    /// Randomize item labels and heuristic confidence
    #[arg(long, global = true)]
    randomize: bool,

    /// Include debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model.source = model.clone();
            config.model.enabled = true;
        }
        if self.no_model {
            config.model.enabled = false;
        }
        if self.randomize {
            config.result.randomize = true;
        }
        if self.verbose {
            config.logger_verbose = true;
        }
    }
}

fn build_logger(format: LogFormat, config: &Config) -> Arc<dyn Logger + Send + Sync> {
    match format {
        LogFormat::Console => Arc::new(LoggerConsole::new(
            config.logger_timezone(),
            config.logger_verbose,
        )),
        LogFormat::Tracing => {
            let level = if config.logger_verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            };
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
            Arc::new(LoggerTracing::new())
        }
    }
}

fn show_page(
    display: &Arc<Mutex<dyn ResultDisplay + Send + Sync>>,
    content: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    display
        .lock()
        .map_err(|_| "display lock poisoned")?
        .show_page(content)
}

/// Submits every file concurrently. Fails only when no file was accepted.
async fn run_classify(
    page: &UploadPage,
    files: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let outcomes = join_all(files.iter().map(|file| page.submit_path(file))).await;

    if outcomes.iter().all(|outcome| outcome.is_err()) {
        return Err(format!("all {} file(s) were rejected", files.len()).into());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);

    let logger = build_logger(cli.log_format, &config);

    let display: Arc<Mutex<dyn ResultDisplay + Send + Sync>> = if cli.json {
        Arc::new(Mutex::new(DisplayJson::new()))
    } else {
        Arc::new(Mutex::new(DisplayConsole::new()))
    };

    match cli.command.unwrap_or(Command::Home) {
        Command::Home => show_page(&display, &page::home::render())?,
        Command::Guide => show_page(&display, &page::guide::render())?,
        Command::Classify { files } => {
            let sorter = Arc::new(WasteSorter::from_config(config.clone(), logger.clone()));
            let status = sorter.init().await;
            let _ = logger.info(&format!("Model status: {:?}", status));

            let upload_page = UploadPage::new(config.upload.clone(), sorter, display, logger);

            run_classify(&upload_page, &files).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::impl_fake::{DisplayEvent, DisplayFake};
    use image::{DynamicImage, ImageBuffer, Rgb};

    struct Fixture {
        display: Arc<Mutex<DisplayFake>>,
        page: UploadPage,
        dir: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let mut config = Config::default();
            config.model.enabled = false;

            let logger: Arc<dyn Logger + Send + Sync> =
                Arc::new(LoggerConsole::new(config.logger_timezone(), false));
            let sorter = Arc::new(WasteSorter::from_config(config.clone(), logger.clone()));
            let display = Arc::new(Mutex::new(DisplayFake::new()));
            let page = UploadPage::new(config.upload, sorter, display.clone(), logger);

            let dir = std::env::temp_dir().join(format!("waste-sorter-{}-{}", std::process::id(), name));
            std::fs::create_dir_all(&dir).unwrap();

            Self { display, page, dir }
        }

        fn write_png(&self, name: &str) -> PathBuf {
            let path = self.dir.join(name);
            DynamicImage::ImageRgb8(ImageBuffer::from_pixel(16, 16, Rgb([240u8, 210, 40])))
                .save(&path)
                .unwrap();
            path
        }

        fn write_text(&self, name: &str) -> PathBuf {
            let path = self.dir.join(name);
            std::fs::write(&path, b"not a photo").unwrap();
            path
        }

        fn errors(&self) -> usize {
            self.display
                .lock()
                .unwrap()
                .events
                .iter()
                .filter(|event| matches!(event, DisplayEvent::Error(_, _)))
                .count()
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[tokio::test]
    async fn test_run_classify_succeeds_when_one_file_is_accepted() {
        let f = Fixture::new("mixed");
        let files = vec![f.write_png("banana.png"), f.write_text("notes.txt")];

        let outcome = run_classify(&f.page, &files).await;

        assert!(outcome.is_ok());
        assert_eq!(f.errors(), 1);
    }

    #[tokio::test]
    async fn test_run_classify_fails_when_every_file_is_rejected() {
        let f = Fixture::new("rejected");
        let files = vec![f.write_text("notes.txt"), f.dir.join("missing.png")];

        let err = run_classify(&f.page, &files).await.unwrap_err();

        assert_eq!(err.to_string(), "all 2 file(s) were rejected");
        assert_eq!(f.errors(), 2);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "waste-sorter",
            "--model",
            "./models/mobilenetv2-7.onnx",
            "--randomize",
            "classify",
            "peel.jpg",
        ])
        .unwrap();
        let mut config = Config::default();
        config.model.enabled = false;

        cli.apply(&mut config);

        assert!(config.model.enabled);
        assert_eq!(config.model.source, "./models/mobilenetv2-7.onnx");
        assert!(config.result.randomize);
        assert!(matches!(cli.command, Some(Command::Classify { ref files }) if files.len() == 1));
    }

    #[test]
    fn test_no_model_disables_model() {
        let cli = Cli::try_parse_from(["waste-sorter", "--no-model", "guide"]).unwrap();
        let mut config = Config::default();

        cli.apply(&mut config);

        assert!(!config.model.enabled);
    }

    #[test]
    fn test_classify_requires_files() {
        assert!(Cli::try_parse_from(["waste-sorter", "classify"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["waste-sorter", "--json"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.json);
    }
}
