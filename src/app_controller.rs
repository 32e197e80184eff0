/*!
 * Application controller.
 *
 * Resolves the input path into a set of subtitle files and runs one
 * `TranslationJob` per file, all of them concurrently. Per-file failures
 * are logged and counted but never abort the other files.
 */

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::future::join_all;
use log::{error, info, warn};

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::pipeline::TranslationJob;
use crate::providers::TranslationBackend;

/// Orchestrates a whole run over a file or a directory tree
pub struct Controller {
    config: Config,
    backend: Arc<dyn TranslationBackend>,
}

impl Controller {
    pub fn new(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Controller { config, backend }
    }

    /// Translate a single file or every subtitle file under a directory
    pub async fn run<P: AsRef<Path>>(&self, input: P) -> Result<()> {
        let input = input.as_ref();

        let files = if FileManager::file_exists(input) {
            vec![input.to_path_buf()]
        } else if FileManager::dir_exists(input) {
            let found = FileManager::find_subtitle_files(input, &self.config.target_language)?;
            info!("found {} subtitle file(s) under {:?}", found.len(), input);
            found
        } else {
            return Err(anyhow!("input path does not exist: {:?}", input));
        };

        if files.is_empty() {
            warn!("nothing to translate under {:?}", input);
            return Ok(());
        }

        let mut tasks = Vec::with_capacity(files.len());
        for file in files {
            let config = self.config.clone();
            let backend = Arc::clone(&self.backend);
            tasks.push(tokio::spawn(async move {
                let outcome = TranslationJob::new(&file, &config, backend).run().await;
                (file, outcome)
            }));
        }

        let mut translated = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;
        for joined in join_all(tasks).await {
            match joined {
                Ok((_, Ok(()))) => translated += 1,
                Ok((file, Err(e))) if is_skip(&e) => {
                    warn!("skipping {:?}: {}", file, e);
                    skipped += 1;
                }
                Ok((file, Err(e))) => {
                    error!("failed to translate {:?}: {}", file, e);
                    failed += 1;
                }
                Err(e) => {
                    error!("translation task panicked: {}", e);
                    failed += 1;
                }
            }
        }

        info!(
            "run complete: {} translated, {} skipped, {} failed",
            translated, skipped, failed
        );
        if failed > 0 {
            return Err(anyhow!("{} file(s) failed to translate", failed));
        }
        Ok(())
    }
}

/// Errors that mean "leave this file alone", not "something broke"
fn is_skip(error: &SubtitleError) -> bool {
    matches!(
        error,
        SubtitleError::AlreadyTranslated(_)
            | SubtitleError::SameLanguage(_)
            | SubtitleError::OutputExists(_)
            | SubtitleError::EmptyFile(_)
    )
}
