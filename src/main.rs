use config::Config;
use console::impl_terminal::ConsoleTerminal;
use image_classifier::impl_custom_vision::ImageClassifierCustomVision;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use shell::main::Shell;
use std::sync::{Arc, Mutex};

mod config;
mod console;
mod image_classifier;
mod library;
mod shell;
mod verdict;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            std::process::exit(1);
        }
    };

    let logger = Arc::new(LoggerConsole::new(
        config.logger_timezone,
        config.logger_enabled,
    ));

    let _ = logger.info(&format!(
        "Loaded configuration: {:?}",
        config.prediction_service
    ));

    let console = Arc::new(Mutex::new(ConsoleTerminal::new()));

    let image_classifier = Arc::new(ImageClassifierCustomVision::new(
        config.prediction_service.clone(),
        logger.clone(),
    ));

    let shell = Shell::new(config, logger, console, image_classifier);

    shell.run()?;

    Ok(())
}
