/*!
 * # subtrans - subtitle file translator
 *
 * A Rust library for translating subtitle files through the public
 * Google web-translate endpoint.
 *
 * ## Features
 *
 * - Sequential-cue (`.srt`) and styled-dialogue (`.ssa`/`.ass`) formats
 * - Size-bounded batching with positional tags, so cue order survives
 *   the round trip through the translation service
 * - Concurrent dispatch with per-batch retry and endpoint rotation
 * - Optional closed-caption stripping
 * - Source-language auto-detection
 * - Keep/replace policies for the original file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `classifier`: Line classification (indices, timestamps, captions, music)
 * - `batch`: Positional tagging and size-bounded batch packing
 * - `srt`: Sequential-cue parsing and reassembly
 * - `ssa`: Styled-dialogue column resolution, extraction and reassembly
 * - `dispatcher`: Concurrent batch translation with retry/fallback
 * - `pipeline`: Per-file translation lifecycle
 * - `app_controller`: File/directory orchestration
 * - `providers`: Translation backend implementations
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod classifier;
pub mod dispatcher;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod srt;
pub mod ssa;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, SubtitleError};
pub use pipeline::TranslationJob;
pub use providers::TranslationBackend;
