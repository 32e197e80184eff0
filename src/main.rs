// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use subtrans::app_config::{Config, LogLevel};
use subtrans::app_controller::Controller;
use subtrans::errors::AppError;
use subtrans::providers::google::GoogleTranslate;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// subtrans - subtitle file translator
///
/// Translates .srt and .ssa/.ass subtitle files through the public Google
/// web-translate endpoint, preserving cue order, timing lines and styling
/// metadata.
#[derive(Parser, Debug)]
#[command(name = "subtrans")]
#[command(version = "0.1.0")]
#[command(about = "Subtitle file translator")]
#[command(long_about = "subtrans translates subtitle files while keeping indices, timing lines
and styling metadata untouched.

EXAMPLES:
    subtrans movie.srt                   # Translate using default config
    subtrans -t pt movie.srt             # Translate to Portuguese
    subtrans -s en -t es movie.srt       # Force English as the source
    subtrans -r 3 movie.srt              # Retry failed batches 3 times
    subtrans --save-as-main movie.srt    # Translation takes the original's name
    subtrans -l debug /subs/             # Process a whole directory

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    /// Subtitle file or directory to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code or name (use 'auto' to detect)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code or name (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Keep closed-caption marker lines in the translation
    #[arg(long)]
    keep_cc: bool,

    /// Retry attempts per failed batch (0-10)
    #[arg(short, long)]
    retries: Option<u32>,

    /// Remove the source file once translated
    #[arg(long)]
    remove_source: bool,

    /// Give the translated file the original's name
    #[arg(long)]
    save_as_main: bool,

    /// Directory for translated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    file: Mutex<Option<File>>,
}

static LOGGER: Lazy<CustomLogger> = Lazy::new(|| CustomLogger { file: Mutex::new(None) });

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&*LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    /// Mirror every record into a log file, appending
    fn attach_file(path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;
        if let Ok(mut sink) = LOGGER.file.lock() {
            *sink = Some(file);
        }
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let color = Self::color_for_level(record.level());
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, record.level(), record.args());

            if let Ok(mut sink) = self.file.lock() {
                if let Some(file) = sink.as_mut() {
                    let _ = writeln!(file, "{} {} {}", now, record.level(), record.args());
                }
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Ok(mut sink) = self.file.lock() {
            if let Some(file) = sink.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info).map_err(|e| AppError::Unknown(e.to_string()))?;

    let cli = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration, then apply CLI overrides
    let mut config = Config::load_or_create(&cli.config_path)
        .with_context(|| format!("Failed to load config file: {}", cli.config_path))?;

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }
    if cli.keep_cc {
        config.remove_closed_captions = false;
    }
    if let Some(retries) = cli.retries {
        config.retries = retries;
    }
    if cli.remove_source {
        config.keep_source_file = false;
    }
    if cli.save_as_main {
        config.save_output_as_main = true;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = Some(output_dir.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }
    if let Some(log_file) = &config.log_file {
        CustomLogger::attach_file(log_file)?;
    }

    let backend = Arc::new(GoogleTranslate::new()?);
    let controller = Controller::new(config, backend);
    controller.run(&cli.input_path).await?;
    Ok(())
}
